mod auth;
mod response;
mod story;

pub use auth::{AuthToken, Credentials};
pub use response::ApiResponse;
pub use story::{Story, StoryRequest};
