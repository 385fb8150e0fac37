pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod report;
pub mod scenario;
pub mod session;
pub mod validation;

pub use error::{SuiteError, SuiteResult};
