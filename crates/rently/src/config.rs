//! Client configuration.

use std::path::PathBuf;

use rently_session::SessionConfig;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the identity endpoint.
pub const ENV_AUTH_URL: &str = "RENTLY_AUTH_URL";

/// Environment variable overriding the token file location.
pub const ENV_TOKEN_FILE: &str = "RENTLY_TOKEN_FILE";

/// Everything needed to build a [`RentlyClient`](crate::RentlyClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub session: SessionConfig,

    /// Start with the bundled sample listings and chats instead of an
    /// empty catalog.
    pub load_fixtures: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            load_fixtures: true,
        }
    }
}

impl ClientConfig {
    /// Defaults, overridden by `RENTLY_AUTH_URL` and `RENTLY_TOKEN_FILE`
    /// when they are set and non-empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through
    /// `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(endpoint) = var(ENV_AUTH_URL) {
            tracing::debug!(%endpoint, "identity endpoint from environment");
            config.session.endpoint = endpoint;
        }
        if let Some(path) = var(ENV_TOKEN_FILE) {
            tracing::debug!(%path, "token file from environment");
            config.session.token_file = Some(PathBuf::from(path));
        }
        config
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.session.endpoint = endpoint.into();
        self
    }

    pub fn with_token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session.token_file = Some(path.into());
        self
    }
}
