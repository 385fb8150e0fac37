//! HTTP access to the Story API.

pub mod auth;
pub mod http;
pub mod story;

pub use auth::authenticate;
pub use story::{ApiReply, StoryClient};

pub const AUTHENTICATION_PATH: &str = "/api/User/Authentication";
pub const CREATE_PATH: &str = "/api/Story/Create";
pub const EDIT_PATH: &str = "/api/Story/Edit";
pub const ALL_PATH: &str = "/api/Story/All";
pub const DELETE_PATH: &str = "/api/Story/Delete";
