//! Transport configuration.
//!
//! Loads settings from environment variables or a config file, with sensible
//! defaults for a local development server.
//!
//! ## Environment Variables
//! - `NEARSPLIT_BASE_URL`: API base URL (default `http://localhost:8080/api`)
//! - `NEARSPLIT_TIMEOUT_SECS`: per-request timeout in seconds (default `10`)
//! - `NEARSPLIT_RENEWAL_PATH`: credential renewal endpoint (default
//!   `/auth/refresh`)
//! - `NEARSPLIT_LOGIN_ROUTE`: route the UI is sent to on a terminal auth
//!   failure (default `/login`)
//! - `NEARSPLIT_HOME_ROUTE`: default route for an authenticated user
//!   (default `/groups`)
//!
//! All variables are optional; unset variables keep their defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};

/// Settings for the session transport and navigation guard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Base URL every request path is resolved against.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Path of the credential renewal endpoint, relative to `base_url`.
    pub renewal_path: String,
    /// Route the UI is redirected to when the session ends.
    pub login_route: String,
    /// Route an already-authenticated user lands on.
    pub home_route: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: 10,
            renewal_path: "/auth/refresh".to_string(),
            login_route: "/login".to_string(),
            home_route: "/groups".to_string(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for any that are unset.
    ///
    /// # Errors
    /// Returns [`SessionError::Config`] if a set variable has an invalid
    /// value (e.g. a non-numeric timeout).
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("NEARSPLIT_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(timeout) = std::env::var("NEARSPLIT_TIMEOUT_SECS") {
            config.timeout_secs = timeout
                .parse::<u64>()
                .map_err(|e| SessionError::Config(format!("invalid timeout: {e}")))?;
        }
        if let Ok(renewal_path) = std::env::var("NEARSPLIT_RENEWAL_PATH") {
            config.renewal_path = renewal_path;
        }
        if let Ok(login_route) = std::env::var("NEARSPLIT_LOGIN_ROUTE") {
            config.login_route = login_route;
        }
        if let Ok(home_route) = std::env::var("NEARSPLIT_HOME_ROUTE") {
            config.home_route = home_route;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file. The format is detected from the
    /// extension (`.toml` or `.json`).
    ///
    /// # Errors
    /// Returns [`SessionError::Config`] if the file cannot be read, does not
    /// parse, or fails validation.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SessionError::Config(format!("failed to read {}: {e}", path.display()))
        })?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");
        let config: Self = match extension {
            "json" => serde_json::from_str(&contents)
                .map_err(|e| SessionError::Config(format!("invalid JSON format: {e}")))?,
            _ => toml::from_str(&contents)
                .map_err(|e| SessionError::Config(format!("invalid TOML format: {e}")))?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Per-request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(SessionError::Config("base_url must not be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(SessionError::Config("timeout_secs must be positive".to_string()));
        }
        if !self.renewal_path.starts_with('/') {
            return Err(SessionError::Config(format!(
                "renewal_path must start with '/': {}",
                self.renewal_path
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    fn clear_env() {
        std::env::remove_var("NEARSPLIT_BASE_URL");
        std::env::remove_var("NEARSPLIT_TIMEOUT_SECS");
        std::env::remove_var("NEARSPLIT_RENEWAL_PATH");
        std::env::remove_var("NEARSPLIT_LOGIN_ROUTE");
        std::env::remove_var("NEARSPLIT_HOME_ROUTE");
    }

    #[test]
    fn defaults_point_at_local_api() {
        let config = SessionConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.renewal_path, "/auth/refresh");
        assert_eq!(config.login_route, "/login");
        assert_eq!(config.home_route, "/groups");
    }

    #[test]
    fn from_env_uses_defaults_when_unset() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let config = SessionConfig::from_env().expect("defaults are valid");
        assert_eq!(config.base_url, SessionConfig::default().base_url);
    }

    #[test]
    fn from_env_overrides_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("NEARSPLIT_BASE_URL", "https://api.example.com");
        std::env::set_var("NEARSPLIT_TIMEOUT_SECS", "30");
        std::env::set_var("NEARSPLIT_LOGIN_ROUTE", "/signin");

        let config = SessionConfig::from_env().expect("overrides are valid");
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.login_route, "/signin");
        // Unset variables keep their defaults.
        assert_eq!(config.renewal_path, "/auth/refresh");

        clear_env();
    }

    #[test]
    fn from_env_rejects_invalid_timeout() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("NEARSPLIT_TIMEOUT_SECS", "not-a-number");
        let result = SessionConfig::from_env();
        assert!(matches!(result, Err(SessionError::Config(_))));

        clear_env();
    }

    #[test]
    fn from_file_parses_toml() {
        let toml_content = r#"
base_url = "https://api.example.com"
timeout_secs = 20
renewal_path = "/auth/renew"
"#;
        let mut temp_file = NamedTempFile::new().expect("tempfile");
        temp_file.write_all(toml_content.as_bytes()).expect("write");

        let config = SessionConfig::from_file(temp_file.path()).expect("valid file");
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.timeout_secs, 20);
        assert_eq!(config.renewal_path, "/auth/renew");
        // Fields absent from the file keep their defaults.
        assert_eq!(config.login_route, "/login");
    }

    #[test]
    fn from_file_parses_json_by_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{ "base_url": "https://api.example.com" }"#).expect("write");

        let config = SessionConfig::from_file(&path).expect("valid file");
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn from_file_rejects_invalid_toml() {
        let mut temp_file = NamedTempFile::new().expect("tempfile");
        temp_file.write_all(b"base_url = [not toml").expect("write");

        let result = SessionConfig::from_file(temp_file.path());
        assert!(matches!(result, Err(SessionError::Config(_))));
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = SessionConfig { timeout_secs: 0, ..SessionConfig::default() };
        assert!(matches!(config.validate(), Err(SessionError::Config(_))));
    }

    #[test]
    fn url_for_joins_without_double_slash() {
        let config = SessionConfig {
            base_url: "http://localhost:8080/api/".to_string(),
            ..SessionConfig::default()
        };
        assert_eq!(config.url_for("/users/me"), "http://localhost:8080/api/users/me");
    }
}
