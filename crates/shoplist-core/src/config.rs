use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{ShoplistError, ShoplistResult};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// A roster entry as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    pub id: String,
    pub name: String,
}

impl UserEntry {
    fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub users: Vec<UserEntry>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/shoplist/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("shoplist/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("shoplist\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Loads the default config file, falling back to defaults when it is
    /// missing or unreadable.
    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                if let Ok(config) = Self::load_from(&config_path) {
                    return config;
                }
            }
        }
        Self::default()
    }

    pub fn load_from(path: &Path) -> ShoplistResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ShoplistError::Serialization(e.to_string()))
    }

    pub fn effective_api_base_url(&self) -> ShoplistResult<String> {
        normalize_base_url(
            self.api_base_url
                .as_deref()
                .unwrap_or(DEFAULT_API_BASE_URL),
        )
    }

    pub fn effective_request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    /// Configured roster, or the built-in one when the file names no users.
    pub fn effective_users(&self) -> Vec<UserEntry> {
        if self.users.is_empty() {
            builtin_users()
        } else {
            self.users.clone()
        }
    }
}

pub fn builtin_users() -> Vec<UserEntry> {
    vec![
        UserEntry::new("674ca27e6274e4d6c0c34f91", "FirstUser"),
        UserEntry::new("674ca27e6274e4d6c0c34f92", "SecondUser"),
        UserEntry::new("676826b2bac3fc5627331932", "ThirdUser"),
    ]
}

pub fn normalize_base_url(raw: &str) -> ShoplistResult<String> {
    let base = raw.trim().trim_end_matches('/').to_string();
    if base.is_empty() {
        return Err(ShoplistError::Validation(
            "API base URL must not be empty".to_string(),
        ));
    }
    if !(base.starts_with("https://") || base.starts_with("http://")) {
        return Err(ShoplistError::Validation(
            "API base URL must include http:// or https://".to_string(),
        ));
    }
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(
            config.effective_api_base_url().unwrap(),
            DEFAULT_API_BASE_URL
        );
        assert_eq!(config.effective_request_timeout_secs(), 10);
        assert_eq!(config.effective_users().len(), 3);
        assert_eq!(config.effective_users()[0].name, "FirstUser");
    }

    #[test]
    fn test_load_from_file_overrides_roster() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
api_base_url = "https://lists.example.com/api/"
request_timeout_secs = 3

[[users]]
id = "u1"
name = "Alice"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(
            config.effective_api_base_url().unwrap(),
            "https://lists.example.com/api"
        );
        assert_eq!(config.effective_request_timeout_secs(), 3);
        assert_eq!(
            config.effective_users(),
            vec![UserEntry::new("u1", "Alice")]
        );
    }

    #[test]
    fn test_load_from_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_base_url = [").unwrap();

        let result = AppConfig::load_from(&path);
        assert!(matches!(result, Err(ShoplistError::Serialization(_))));
    }

    #[test]
    fn test_normalize_base_url_rejects_invalid_values() {
        assert!(normalize_base_url("").is_err());
        assert!(normalize_base_url("   ").is_err());
        assert!(normalize_base_url("example.com").is_err());
        assert_eq!(
            normalize_base_url(" http://localhost:3000// ").unwrap(),
            "http://localhost:3000"
        );
    }
}
