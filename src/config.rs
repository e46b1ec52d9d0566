use serde::Deserialize;

/// Default chat model when OPENAI_MODEL is not set.
const DEFAULT_MODEL: &str = "gpt-4o";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: Option<String>, // Optional, for proxies and mocked tests
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY environment variable required"))
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("OPENAI_API_KEY cannot be empty");
                    }
                    Ok(key)
                })?,
            openai_model: std::env::var("OPENAI_MODEL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            openai_base_url: match std::env::var("OPENAI_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
            {
                Some(url) => Some(validate_base_url(url)?),
                None => None,
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8003".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("OpenAI model: {}", config.openai_model);
        if let Some(ref base) = config.openai_base_url {
            tracing::info!("OpenAI base URL configured: {}", base);
        }
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

/// Validates that a provider base URL uses an http(s) scheme.
fn validate_base_url(url: String) -> anyhow::Result<String> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("OPENAI_BASE_URL must start with http:// or https://");
    }
    Ok(url)
}
