use serde::{Deserialize, Serialize};

/// Body for both `POST /api/Story/Create` and `PUT /api/Story/Edit/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoryRequest {
    pub title: String,
    pub description: String,
    /// May be empty
    pub url: String,
}

impl StoryRequest {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: String::new(),
        }
    }

    /// A request with every field empty; the API must reject it.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

/// One entry of `GET /api/Story/All`.
///
/// The listing shape is loosely specified, so every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Story {
    #[serde(default, alias = "storyId")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}
