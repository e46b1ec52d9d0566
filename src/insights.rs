//! Turns raw model output into the ordered list of insight lines.
//!
//! The model is instructed to answer with numbered prose lines, but it often
//! wraps them in a markdown JSON block or echoes parts of the response object.
//! Extraction strips the fence tokens anywhere in the text, then keeps only the
//! lines that read as insights. During streaming this runs over the entire
//! accumulated text after every fragment, so a line that looked final can still
//! be revised when later fragments merge into the same source line.

/// Marker for the output field the model is told to fill; any line echoing it
/// is structural, not an insight.
const AUGMENTED_DATA_KEY: &str = "\"augmentedData\"";

/// Removes every occurrence of the markdown code-fence tokens, anywhere in the
/// text, not only at line boundaries. The ```json pass must run first or the
/// generic pass would leave a dangling `json` token behind.
pub fn strip_code_fences(raw_text: &str) -> String {
    raw_text.replace("```json", "").replace("```", "")
}

/// Extracts the ordered insight lines from accumulated model output.
///
/// After fence removal the text is split on newlines and each line trimmed.
/// A line survives unless it is empty, starts with a JSON structural character
/// (`{`, `}`, `[`, `]`), or contains the literal `"augmentedData"` key.
/// Surviving lines keep their original order; nothing is merged, reordered, or
/// deduplicated.
pub fn extract_insights(raw_text: &str) -> Vec<String> {
    strip_code_fences(raw_text)
        .split('\n')
        .map(str::trim)
        .filter(|line| {
            !line.is_empty()
                && !line.starts_with('{')
                && !line.starts_with('}')
                && !line.starts_with('[')
                && !line.starts_with(']')
                && !line.contains(AUGMENTED_DATA_KEY)
        })
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_keeps_numbered_insights_in_order() {
        let raw = "1. Works at Acme (because of the email domain)\n2. Travels in summer (because of school-age children)";
        assert_eq!(
            extract_insights(raw),
            vec![
                "1. Works at Acme (because of the email domain)",
                "2. Travels in summer (because of school-age children)",
            ]
        );
    }

    #[test]
    fn test_extract_drops_fences_and_structural_lines() {
        let raw = "1. Likes travel (because of passions list)\n```json\n{\n  \"augmentedData\": [\n]\n}\n```";
        assert_eq!(
            extract_insights(raw),
            vec!["1. Likes travel (because of passions list)"]
        );
    }

    #[test]
    fn test_extract_removes_fence_tokens_inside_a_line() {
        // Fence tokens are removed anywhere, not only at line boundaries.
        let raw = "1. Insight ```json still one line```";
        assert_eq!(extract_insights(raw), vec!["1. Insight  still one line"]);
    }

    #[test]
    fn test_extract_trims_whitespace() {
        let raw = "   1. Padded insight   \n\n\t\n";
        assert_eq!(extract_insights(raw), vec!["1. Padded insight"]);
    }

    #[test]
    fn test_extract_drops_augmented_data_echo() {
        let raw = "some \"augmentedData\" echo\n1. Real insight";
        assert_eq!(extract_insights(raw), vec!["1. Real insight"]);
    }

    #[test]
    fn test_extract_keeps_unquoted_field_name() {
        // Only the quoted key is structural.
        let raw = "1. The augmentedData list grows over time";
        assert_eq!(
            extract_insights(raw),
            vec!["1. The augmentedData list grows over time"]
        );
    }

    #[test]
    fn test_extract_on_empty_input() {
        assert!(extract_insights("").is_empty());
    }

    #[test]
    fn test_strip_code_fences_is_idempotent() {
        let raw = "a ```json b ``` c";
        let once = strip_code_fences(raw);
        assert_eq!(strip_code_fences(&once), once);
    }

    #[test]
    fn test_cumulative_reextraction_revises_partial_lines() {
        // Streaming behavior: a line that looked final is revised when the
        // next fragment continues it.
        let first = extract_insights("1. A");
        assert_eq!(first, vec!["1. A"]);

        let second = extract_insights("1. A is true");
        assert_eq!(second, vec!["1. A is true"]);
    }
}
