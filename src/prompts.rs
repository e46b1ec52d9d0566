use serde_json::Value;

/// System prompt for the single-subject insight analysis.
const SINGLE_SUBJECT_SYSTEM: &str = "You are an expert travel and lifestyle analyst specializing in deriving detailed, evidence-based insights from personal and family data. Your deductions should be specific, well-reasoned, and always supported by data points from the input.";

/// System prompt for the multi-subject group analysis.
const MULTI_SUBJECT_SYSTEM: &str = "You are an expert travel market analyst specializing in segmenting groups of travelers, profiling personality archetypes, and estimating realistic travel radii from personal data. Your conclusions should be specific, well-reasoned, and always supported by data points from the input.";

const SINGLE_SUBJECT_DIRECTIVES: &str = r#"Analyze the provided JSON data and generate detailed insights similar to a professional travel and lifestyle analyst. Your task is to make specific, evidence-based deductions from the data provided.

DEDUCTION REQUIREMENTS:
1. Professional Context:
   - Analyze email domains for career insights
   - Consider loyalty programs for professional travel patterns
   - Deduce work-life patterns from interests and travel preferences

2. Family & Social Analysis:
   - Identify age-appropriate activities and interests
   - Analyze family dynamics and age gaps
   - Consider educational implications for children
   - Deduce lifestyle patterns from family composition

3. Travel & Lifestyle Patterns:
   - Connect loyalty programs to travel frequency
   - Analyze travel timing based on family circumstances
   - Consider seasonal preferences and constraints
   - Identify travel style based on interests and demographics

4. Behavioral & Preference Analysis:
   - Link interests to potential activities
   - Connect lifestyle choices to travel preferences
   - Analyze fitness and wellness patterns
   - Deduce meal and schedule preferences

5. Cultural & Geographic Insights:
   - Consider nationality and residence implications
   - Analyze cultural preferences and limitations
   - Identify location-based opportunities

RESPONSE FORMAT:
- In augmentedData field, provide numbered insights where each insight:
  * Makes a specific deduction
  * Explains the reasoning ("because of...")
  * Links multiple data points
  * Provides actionable implications
  * Follows format: "Deduction (because of specific data points)"

Example insight format:
1. "Principal works at [Company] (because of the email domain)"
2. "Family likely travels during [specific times] (because of children's age and school system)"
3. "Lifestyle indicates [specific pattern] (because of multiple interests and preferences shown)"
"#;

const MULTI_SUBJECT_DIRECTIVES: &str = r#"Analyze the provided JSON data describing a group of customers and generate detailed insights similar to a professional travel market analyst. Your task is to make specific, evidence-based deductions about the group as a whole and about each traveler.

DEDUCTION REQUIREMENTS:
1. Traveler Clustering:
   - Group customers into clusters by shared interests, age bands, and travel preferences
   - Name each cluster and list which customers belong to it
   - Identify the customers who bridge multiple clusters

2. Personality Archetypes:
   - Assign each customer a personality archetype (e.g. explorer, planner, comfort-seeker)
   - Support each archetype with the data points that suggest it
   - Note where loyalty programs or lifestyle tags reinforce the archetype

3. Travel Radius Estimation:
   - Estimate a realistic travel radius for each customer and for the group
   - Consider travel documents, travel span preferences, and special requirements
   - Flag constraints that shrink the radius (documents, requirements, dependents)

4. Group Dynamics:
   - Identify shared bucket-list destinations the whole group could pursue
   - Analyze how age gaps and special requirements shape feasible trips
   - Deduce likely decision makers from the data

RESPONSE FORMAT:
- In augmentedData field, provide numbered insights where each insight:
  * Makes a specific deduction
  * Explains the reasoning ("because of...")
  * Links multiple data points
  * Provides actionable implications
  * Follows format: "Deduction (because of specific data points)"

Example insight format:
1. "Cluster A: adventure travelers (because of shared hiking and diving interests)"
2. "Customer X fits the planner archetype (because of loyalty programs and travel span preferences)"
3. "Group travel radius is continental (because of passport coverage and school-age dependents)"
"#;

/// Selects which fixed analysis-instruction block the model receives.
///
/// Both templates are functionally interchangeable generators of a prompt pair
/// given structured input; routing between them is a caller decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisTemplate {
    /// One main traveler plus dependents ("insight" analysis).
    SingleSubject,
    /// A flat list of customers (clustering, archetypes, travel radius).
    MultiSubject,
}

impl AnalysisTemplate {
    fn system_prompt(&self) -> &'static str {
        match self {
            AnalysisTemplate::SingleSubject => SINGLE_SUBJECT_SYSTEM,
            AnalysisTemplate::MultiSubject => MULTI_SUBJECT_SYSTEM,
        }
    }

    fn directives(&self) -> &'static str {
        match self {
            AnalysisTemplate::SingleSubject => SINGLE_SUBJECT_DIRECTIVES,
            AnalysisTemplate::MultiSubject => MULTI_SUBJECT_DIRECTIVES,
        }
    }

    /// Builds the `(system_prompt, user_prompt)` pair for the given input.
    ///
    /// Pure and deterministic: the user prompt is the template's directive
    /// block with the compact JSON serialization of the input appended. No
    /// escaping happens beyond what JSON serialization already guarantees.
    pub fn build(&self, input: &Value) -> (String, String) {
        let user_prompt = format!("{}\nInput Data: {}", self.directives(), input);
        (self.system_prompt().to_string(), user_prompt)
    }
}
