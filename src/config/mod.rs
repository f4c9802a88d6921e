//! Configuration management module.
//!
//! This module handles loading, saving, and managing application configuration,
//! including service URLs, the persisted session token, and theme preferences.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/venue-tui";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    pub chat_url: String,
    pub access_token: Option<String>,
    pub email: Option<String>, // Prefills the login form
    pub theme_name: String,
    pub request_timeout_secs: u64,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_chat_url")]
    pub chat_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    "http://localhost:5298/api".to_string()
}

fn default_chat_url() -> String {
    "http://localhost:5001".to_string()
}

fn default_theme_name() -> String {
    "tokyo-night".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance with default values.
    ///
    pub fn new() -> Config {
        Config {
            api_url: default_api_url(),
            chat_url: default_chat_url(),
            access_token: None,
            email: None,
            theme_name: default_theme_name(),
            request_timeout_secs: default_request_timeout_secs(),
            file_path: None,
        }
    }

    /// Try to load an existing configuration from the disk using the custom
    /// directory if provided. A missing file leaves the defaults in place;
    /// it is written on the first save.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        let dir_path = match custom_path {
            Some(path) => PathBuf::from(path),
            None => Config::default_path()?,
        };
        create_dir(&dir_path)?;

        let file_path = dir_path.join(FILE_NAME);
        if file_path.exists() {
            let contents = fs::read_to_string(&file_path).map_err(|source| ConfigError::Read {
                path: file_path.clone(),
                source,
            })?;
            let data: FileSpec =
                serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
                    path: file_path.clone(),
                    message: e.to_string(),
                })?;
            self.api_url = data.api_url;
            self.chat_url = data.chat_url;
            self.access_token = data.access_token;
            self.email = data.email;
            self.theme_name = data.theme_name;
            self.request_timeout_secs = data.request_timeout_secs;
        }
        self.file_path = Some(file_path);
        self.validate()
    }

    /// Check the service URLs and request timeout.
    ///
    pub fn validate(&self) -> Result<(), AppError> {
        check_url("api_url", &self.api_url)?;
        check_url("chat_url", &self.chat_url)?;
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout.into());
        }
        Ok(())
    }

    /// Attempt to serialize the configuration data and write it to the disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::Unsaved)?;
        let data = FileSpec {
            api_url: self.api_url.clone(),
            chat_url: self.chat_url.clone(),
            access_token: self.access_token.clone(),
            email: self.email.clone(),
            theme_name: self.theme_name.clone(),
            request_timeout_secs: self.request_timeout_secs,
        };
        let content =
            serde_yaml::to_string(&data).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        if let Some(parent) = file_path.parent() {
            create_dir(parent)?;
        }
        let write_error = |source| ConfigError::Write {
            path: file_path.clone(),
            source,
        };
        let mut file = fs::File::create(file_path).map_err(write_error)?;
        file.write_all(content.as_bytes()).map_err(write_error)?;
        file.flush().map_err(write_error)?;
        Ok(())
    }

    /// Remember the signed-in session.
    ///
    pub fn set_session(&mut self, token: String, email: String) {
        self.access_token = Some(token);
        self.email = Some(email);
    }

    /// Forget the session token but keep the last email.
    ///
    pub fn clear_session(&mut self) {
        self.access_token = None;
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Returns the path buffer for the default configuration directory or
    /// an error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(Path::new(DEFAULT_DIRECTORY_PATH))),
            None => Err(ConfigError::NoHomeDirectory.into()),
        }
    }
}

fn create_dir(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|source| ConfigError::CreateDirectory {
        path: path.to_path_buf(),
        source,
    })
}

fn check_url(field: &'static str, url: &str) -> Result<(), ConfigError> {
    match reqwest::Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => Ok(()),
        _ => Err(ConfigError::InvalidUrl {
            field,
            url: url.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new();
        config.load(dir.path().to_str()).unwrap();
        assert_eq!(config.api_url, default_api_url());
        assert_eq!(config.access_token, None);
        assert_eq!(config.file_path(), Some(dir.path().join(FILE_NAME).as_path()));
    }

    #[test]
    fn load_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested/config");
        let mut config = Config::new();
        config.load(nested.to_str()).unwrap();
        assert!(nested.exists());
    }

    #[test]
    fn save_then_load_keeps_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new();
        config.load(dir.path().to_str()).unwrap();
        config.api_url = "https://venues.example.com".to_string();
        config.set_session("token-123".to_string(), "chef@example.com".to_string());
        config.save().unwrap();

        let mut reloaded = Config::new();
        reloaded.load(dir.path().to_str()).unwrap();
        assert_eq!(reloaded.api_url, "https://venues.example.com");
        assert_eq!(reloaded.access_token.as_deref(), Some("token-123"));
        assert_eq!(reloaded.email.as_deref(), Some("chef@example.com"));
    }

    #[test]
    fn partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(FILE_NAME), "theme_name: dracula\n").unwrap();
        let mut config = Config::new();
        config.load(dir.path().to_str()).unwrap();
        assert_eq!(config.theme_name, "dracula");
        assert_eq!(config.chat_url, default_chat_url());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(FILE_NAME), "request_timeout_secs: [1, 2").unwrap();
        let mut config = Config::new();
        let error = config.load(dir.path().to_str()).unwrap_err();
        assert!(matches!(
            error,
            AppError::Config(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn save_without_load_fails() {
        let config = Config::new();
        assert!(matches!(
            config.save(),
            Err(AppError::Config(ConfigError::Unsaved))
        ));
    }

    #[test]
    fn clear_session_keeps_email() {
        let mut config = Config::new();
        config.set_session("token".to_string(), "chef@example.com".to_string());
        config.clear_session();
        assert_eq!(config.access_token, None);
        assert_eq!(config.email.as_deref(), Some("chef@example.com"));
    }

    #[test]
    fn validate_rejects_non_http_urls() {
        let mut config = Config::new();
        config.chat_url = "ftp://localhost:5001".to_string();
        assert!(matches!(
            config.validate(),
            Err(AppError::Config(ConfigError::InvalidUrl { field: "chat_url", .. }))
        ));

        config.chat_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::new();
        assert!(config.validate().is_ok());
        config.request_timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(AppError::Config(ConfigError::InvalidTimeout))
        ));
    }
}
