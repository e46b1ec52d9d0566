use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One traveler as submitted by the caller.
///
/// Fields are passed through unchanged; dates are opaque strings and the tag
/// lists carry free-form category labels. Nothing is validated beyond type
/// coercion, and lists may be empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonProfile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub age: i64,
    pub upcoming_birthday: String,
    pub city_of_residence: String,
    pub email: String,
    pub phone_number: String,
    pub nationality: String,
    pub main_interests: Vec<String>,
    pub social_media_links: Vec<String>,
    pub loyalty_programs: Vec<String>,
    pub passions: Vec<String>,
    pub lifestyle: Vec<String>,
    pub travel_documents: Vec<String>,
    pub type_of_travel: Vec<String>,
    pub travel_span: Vec<String>,
    pub travel_bucket_list: Vec<String>,
    pub special_requirements: Vec<String>,
}

/// Request body of the streaming endpoint: one main traveler plus dependents.
///
/// The credential pair is stored and echoed in plaintext, matching the
/// upstream contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupProfile {
    pub id: String,
    pub group_name: String,
    pub user_name: String,
    pub password: String,
    pub main_user: PersonProfile,
    pub dependents: Vec<PersonProfile>,
    pub augmented_data: String,
}

impl GroupProfile {
    /// Builds the response object emitted after each processed fragment:
    /// every input field, with `augmentedData` replaced by the current
    /// insight list.
    pub fn snapshot(&self, insights: Vec<String>) -> StreamSnapshot {
        StreamSnapshot {
            id: self.id.clone(),
            group_name: self.group_name.clone(),
            user_name: self.user_name.clone(),
            password: self.password.clone(),
            main_user: self.main_user.clone(),
            dependents: self.dependents.clone(),
            augmented_data: insights,
        }
    }
}

/// Full response object re-emitted on every streaming fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamSnapshot {
    pub id: String,
    pub group_name: String,
    pub user_name: String,
    pub password: String,
    pub main_user: PersonProfile,
    pub dependents: Vec<PersonProfile>,
    pub augmented_data: Vec<String>,
}

/// Batch endpoint response with fixed field order.
///
/// The echoed fields keep whatever JSON the caller sent (customers are not
/// parsed into typed profiles), so they are carried as raw values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub id: Value,
    pub group_name: Value,
    pub user_name: Value,
    pub password: Value,
    pub customers: Value,
    pub augmented_data: Vec<String>,
}
