//! Tripwire Client
//!
//! The collaborators the trigger form talks to once a document is valid:
//!
//! - [`MutationClient`] creates and updates triggers; [`HttpMutationClient`]
//!   does so over the REST API.
//! - [`CacheInvalidator`] drops stale query results; [`QueryCache`] is the
//!   in-memory implementation.
//! - [`Navigator`] moves the user to the resulting detail view.

mod cache;
mod config;
mod error;
mod http;
mod mutation;
mod navigation;

pub use cache::{CacheInvalidator, CacheKey, QueryCache};
pub use config::ClientConfig;
pub use error::{ClientError, ConfigError};
pub use http::HttpMutationClient;
pub use mutation::MutationClient;
pub use navigation::{Navigator, trigger_route};
