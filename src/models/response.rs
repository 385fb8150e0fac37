use serde::{Deserialize, Serialize};

/// Message envelope returned by create, edit and delete.
///
/// `story_id` is only populated by a successful create.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub story_id: Option<String>,
}
