use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Connection settings for the trigger API.
///
/// Loaded from `~/.tripwire/config.json` when present; every field is
/// optional in the file and falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ClientConfig {
  /// API root, without a trailing slash, e.g. `https://api.example.com/api/v1`.
  pub base_url: String,
  /// Bearer token sent with every request.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub api_token: Option<String>,
  pub timeout_ms: u64,
  /// Route prefix for trigger detail pages.
  pub route_prefix: String,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      base_url: "http://localhost:8080/api/v1".to_string(),
      api_token: None,
      timeout_ms: 30_000,
      route_prefix: "/dashboard/triggers".to_string(),
    }
  }
}

impl ClientConfig {
  /// `~/.tripwire`, if a home directory can be determined.
  pub fn default_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".tripwire"))
  }

  /// Load from `path`. A missing file yields the defaults.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = match std::fs::read_to_string(path) {
      Ok(content) => content,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
      Err(source) => {
        return Err(ConfigError::Read {
          path: path.to_path_buf(),
          source,
        });
      }
    };

    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  pub fn timeout(&self) -> Duration {
    Duration::from_millis(self.timeout_ms)
  }

  /// Join an API path onto the base URL.
  pub(crate) fn endpoint(&self, path: &str) -> String {
    format!("{}{}", self.base_url.trim_end_matches('/'), path)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ClientConfig::load(&dir.path().join("config.json")).unwrap();
    assert_eq!(config, ClientConfig::default());
  }

  #[test]
  fn test_partial_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "base_url": "https://api.example.com/v1/" }"#).unwrap();

    let config = ClientConfig::load(&path).unwrap();
    assert_eq!(config.base_url, "https://api.example.com/v1/");
    assert_eq!(config.timeout_ms, 30_000);
    assert_eq!(
      config.endpoint("/triggers/abc"),
      "https://api.example.com/v1/triggers/abc"
    );
  }

  #[test]
  fn test_malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(matches!(
      ClientConfig::load(&path),
      Err(ConfigError::Parse { .. })
    ));
  }
}
