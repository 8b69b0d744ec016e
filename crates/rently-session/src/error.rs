//! Error types for the session layer.

use std::path::PathBuf;

use rently_protocol::{AuthAction, ProtocolError};
use rently_transport::TransportError;

/// Why an identity call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// The service answered with a non-success status (wrong password,
    /// expired token, duplicate account...).
    Rejected,

    /// No usable answer: connection failure, or a body that could not be
    /// decoded into the expected reply.
    Network,
}

/// The low-level failure behind an [`AuthErrorKind::Network`] error.
#[derive(Debug, thiserror::Error)]
pub enum NetworkCause {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// The one error surfaced by `login`, `register` and the social login.
///
/// Forms render [`message()`](Self::message) as-is. It is the server's
/// `error` text when the service supplied one, otherwise a per-operation
/// default. [`kind()`](Self::kind) tells a rejected credential apart from a
/// connectivity problem for callers that care.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct AuthenticationError {
    kind: AuthErrorKind,
    action: AuthAction,
    status: Option<u16>,
    message: String,
    #[source]
    cause: Option<NetworkCause>,
}

impl AuthenticationError {
    /// The service refused the request with `status`. `message` is the
    /// server-supplied text, if any.
    pub(crate) fn rejected(
        action: AuthAction,
        status: u16,
        message: Option<String>,
    ) -> Self {
        Self {
            kind: AuthErrorKind::Rejected,
            action,
            status: Some(status),
            message: message
                .unwrap_or_else(|| default_message(action).to_string()),
            cause: None,
        }
    }

    /// The request never produced a usable reply.
    pub(crate) fn network(
        action: AuthAction,
        cause: impl Into<NetworkCause>,
    ) -> Self {
        Self {
            kind: AuthErrorKind::Network,
            action,
            status: None,
            message: default_message(action).to_string(),
            cause: Some(cause.into()),
        }
    }

    /// Text to show the user.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> AuthErrorKind {
        self.kind
    }

    /// The identity action that failed.
    pub fn action(&self) -> AuthAction {
        self.action
    }

    /// HTTP status of a rejected request. `None` for network failures.
    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

/// Message used when the service gives no `error` text.
pub(crate) fn default_message(action: AuthAction) -> &'static str {
    match action {
        AuthAction::Verify => "session verification failed",
        AuthAction::Login => "login failed",
        AuthAction::Register => "registration failed",
        AuthAction::Google => "social login failed",
    }
}

/// Errors from reading or writing the persisted token.
#[derive(Debug, thiserror::Error)]
pub enum TokenStoreError {
    #[error("failed to read token from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write token to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove token at {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The platform has no per-user configuration directory.
    #[error("could not determine a configuration directory for the token file")]
    NoConfigDir,
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn test_rejected_uses_server_message() {
        let err = AuthenticationError::rejected(
            AuthAction::Login,
            401,
            Some("bad credentials".into()),
        );
        assert_eq!(err.message(), "bad credentials");
        assert_eq!(err.to_string(), "bad credentials");
        assert_eq!(err.kind(), AuthErrorKind::Rejected);
        assert_eq!(err.status(), Some(401));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_rejected_without_message_uses_default() {
        let err = AuthenticationError::rejected(AuthAction::Register, 400, None);
        assert_eq!(err.message(), "registration failed");
    }

    #[test]
    fn test_network_error_keeps_cause() {
        let err = AuthenticationError::network(
            AuthAction::Google,
            TransportError::Unavailable("offline".into()),
        );
        assert_eq!(err.kind(), AuthErrorKind::Network);
        assert_eq!(err.message(), "social login failed");
        assert_eq!(err.status(), None);
        let cause = err.source().expect("network errors carry a cause");
        assert!(cause.to_string().contains("offline"));
    }

    #[test]
    fn test_default_messages_are_distinct() {
        let all = [
            AuthAction::Verify,
            AuthAction::Login,
            AuthAction::Register,
            AuthAction::Google,
        ];
        for a in all {
            for b in all {
                if a != b {
                    assert_ne!(default_message(a), default_message(b));
                }
            }
        }
    }
}
