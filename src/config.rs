//! # Suite Configuration
//!
//! Resolves where the suite points and who it logs in as.
//!
//! Precedence (highest to lowest):
//! 1. Command-line overrides (applied by the caller via [`SuiteConfig::with_overrides`])
//! 2. Environment variables (`BASE_URL`, `TEST_USER_NAME`, `TEST_USER_PASSWORD`, `REQUEST_TIMEOUT_SECS`)
//! 3. Config file (`--config <path>`, else `<config_dir>/story-spoiler/config.toml` if present)
//! 4. Default values

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::{SuiteError, SuiteResult};
use crate::models::Credentials;

pub const DEFAULT_BASE_URL: &str = "https://d3s5nxhwblsjbi.cloudfront.net";
pub const DEFAULT_USER_NAME: &str = "DenisTestUser";
pub const DEFAULT_PASSWORD: &str = "DenisTestUser123";

pub const ENV_BASE_URL: &str = "BASE_URL";
pub const ENV_USER_NAME: &str = "TEST_USER_NAME";
pub const ENV_PASSWORD: &str = "TEST_USER_PASSWORD";
pub const ENV_REQUEST_TIMEOUT: &str = "REQUEST_TIMEOUT_SECS";

const CONFIG_DIR_NAME: &str = "story-spoiler";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuiteConfig {
    /// Root of the Story API, stored without a trailing slash
    pub base_url: String,
    pub user_name: String,
    pub password: String,
    /// Per-request timeout; `None` keeps the HTTP client's defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

/// Partial config as read from a TOML file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    base_url: Option<String>,
    user_name: Option<String>,
    password: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_name: DEFAULT_USER_NAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl fmt::Debug for SuiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuiteConfig")
            .field("base_url", &self.base_url)
            .field("user_name", &self.user_name)
            .field("password", &"***")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl SuiteConfig {
    /// Load configuration from the config file (if any) and the environment.
    pub fn load(config_path: Option<&Path>) -> SuiteResult<Self> {
        let mut config = Self::default();

        let path = match config_path {
            Some(path) => Some(path.to_path_buf()),
            None => Self::find_config_file(),
        };

        if let Some(path) = path {
            debug!("Loading config from: {}", path.display());
            config.apply_file(&path)?;
        }

        config.apply_env()?;
        config.normalize()?;
        Ok(config)
    }

    /// Configuration from environment variables over defaults, ignoring config files.
    pub fn from_env() -> SuiteResult<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        config.normalize()?;
        Ok(config)
    }

    /// Apply command-line overrides on top of an already-resolved config.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        user_name: Option<String>,
    ) -> SuiteResult<Self> {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(user) = user_name {
            self.user_name = user;
        }
        self.normalize()?;
        Ok(self)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.user_name, &self.password)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Absolute URL for an API path such as `/api/Story/All`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn find_config_file() -> Option<PathBuf> {
        let path = dirs::config_dir()?
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    fn apply_file(&mut self, path: &Path) -> SuiteResult<()> {
        let content = std::fs::read_to_string(path)?;
        let file: FileConfig = toml::from_str(&content)?;

        if let Some(url) = file.base_url {
            self.base_url = url;
        }
        if let Some(user) = file.user_name {
            self.user_name = user;
        }
        if let Some(password) = file.password {
            self.password = password;
        }
        if file.request_timeout_secs.is_some() {
            self.request_timeout_secs = file.request_timeout_secs;
        }
        Ok(())
    }

    fn apply_env(&mut self) -> SuiteResult<()> {
        if let Some(url) = non_empty_var(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(user) = non_empty_var(ENV_USER_NAME) {
            self.user_name = user;
        }
        if let Some(password) = non_empty_var(ENV_PASSWORD) {
            self.password = password;
        }
        if let Some(raw) = non_empty_var(ENV_REQUEST_TIMEOUT) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                SuiteError::config(format!(
                    "{ENV_REQUEST_TIMEOUT} must be a whole number of seconds, got '{raw}'"
                ))
            })?;
            self.request_timeout_secs = Some(secs);
        }
        Ok(())
    }

    fn normalize(&mut self) -> SuiteResult<()> {
        let trimmed = self.base_url.trim().trim_end_matches('/').to_string();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(SuiteError::config(format!(
                "base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        self.base_url = trimmed;

        if self.user_name.is_empty() {
            return Err(SuiteError::config("user name cannot be empty"));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(SuiteError::config("request timeout must be at least one second"));
        }
        Ok(())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}
