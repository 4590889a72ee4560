use std::path::PathBuf;

use thiserror::Error;

/// Errors from the trigger API.
#[derive(Debug, Error)]
pub enum ClientError {
  /// The request never produced a response (connect, timeout, TLS, ...).
  #[error("request failed: {0}")]
  Transport(#[from] reqwest::Error),

  /// The server answered with a non-success status.
  #[error("server returned {status}: {message}")]
  Api { status: u16, message: String },

  /// The server answered 2xx with a body that is not a trigger.
  #[error("invalid response body: {0}")]
  Decode(#[from] serde_json::Error),
}

impl ClientError {
  /// The single message shown to the user when a submission fails.
  pub fn user_message(&self) -> String {
    match self {
      ClientError::Transport(e) if e.is_timeout() => {
        "The server took too long to respond. Please try again.".to_string()
      }
      ClientError::Transport(_) => {
        "Could not reach the server. Check your connection and try again.".to_string()
      }
      ClientError::Api { message, .. } => message.clone(),
      ClientError::Decode(_) => "The server sent an unexpected response.".to_string(),
    }
  }
}

/// Errors loading [`crate::ClientConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config file {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse config file {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}
