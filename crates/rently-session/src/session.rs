//! Session types: who is signed in, and how the rest of the client reads it.
//!
//! The signed-in user and their bearer token travel together inside one
//! enum variant, so there is no way to build a session with a user but no
//! token (or the reverse). Every transition replaces the whole value.

use std::path::PathBuf;

use rently_protocol::{Role, User};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// The identity endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str =
    "https://functions.poehali.dev/86a92a9a-d1cc-4754-9931-cd1edd0e489d";

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Where the session talks to and where it keeps its token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// URL of the identity endpoint.
    pub endpoint: String,

    /// File holding the persisted token. `None` means the platform
    /// default, `<config_dir>/rently/auth_token`.
    pub token_file: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token_file: None,
        }
    }
}

// ---------------------------------------------------------------------------
// SessionStatus
// ---------------------------------------------------------------------------

/// The lifecycle state of the session.
///
/// ```text
///                 ┌──(no stored token)──────────────→ Anonymous
/// Uninitialized ──┤                                      ↑   │
///                 └──(stored token)──→ Verifying ──(fail)┘   │(login/register/social)
///                                          │                 ▼
///                                          └──(ok)──→ Authenticated ──(logout)──→ Anonymous
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    Uninitialized,
    Verifying,
    Authenticated,
    Anonymous,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "Uninitialized"),
            Self::Verifying => write!(f, "Verifying"),
            Self::Authenticated => write!(f, "Authenticated"),
            Self::Anonymous => write!(f, "Anonymous"),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Uninitialized,
    Verifying,
    Anonymous,
    Authenticated { user: User, token: String },
}

/// A snapshot of the client's authentication state.
///
/// Only the [`SessionManager`](crate::SessionManager) can construct
/// sessions; everyone else gets clones through a [`SessionView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    state: State,
}

impl Session {
    pub(crate) fn uninitialized() -> Self {
        Self {
            state: State::Uninitialized,
        }
    }

    pub(crate) fn verifying() -> Self {
        Self {
            state: State::Verifying,
        }
    }

    pub(crate) fn anonymous() -> Self {
        Self {
            state: State::Anonymous,
        }
    }

    pub(crate) fn authenticated(user: User, token: String) -> Self {
        Self {
            state: State::Authenticated { user, token },
        }
    }

    pub fn status(&self) -> SessionStatus {
        match self.state {
            State::Uninitialized => SessionStatus::Uninitialized,
            State::Verifying => SessionStatus::Verifying,
            State::Anonymous => SessionStatus::Anonymous,
            State::Authenticated { .. } => SessionStatus::Authenticated,
        }
    }

    /// The signed-in user. `Some` iff the status is `Authenticated`.
    pub fn user(&self) -> Option<&User> {
        match &self.state {
            State::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    /// The bearer token. `Some` iff the status is `Authenticated`.
    pub fn token(&self) -> Option<&str> {
        match &self.state {
            State::Authenticated { token, .. } => Some(token),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, State::Authenticated { .. })
    }

    /// `true` if signed in with the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.user().is_some_and(|u| u.role == role)
    }
}

// ---------------------------------------------------------------------------
// SessionView
// ---------------------------------------------------------------------------

/// Read-only handle on the current session.
///
/// Backed by a `tokio::sync::watch` receiver: reads never block the
/// manager, clones are cheap, and a reader always sees a whole `Session`
/// value (never a user without its token).
#[derive(Debug, Clone)]
pub struct SessionView {
    rx: watch::Receiver<Session>,
}

impl SessionView {
    pub(crate) fn new(rx: watch::Receiver<Session>) -> Self {
        Self { rx }
    }

    /// A clone of the latest session.
    pub fn current(&self) -> Session {
        self.rx.borrow().clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.rx.borrow().status()
    }

    pub fn is_authenticated(&self) -> bool {
        self.rx.borrow().is_authenticated()
    }

    /// A clone of the signed-in user, if any.
    pub fn user(&self) -> Option<User> {
        self.rx.borrow().user().cloned()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.rx.borrow().has_role(role)
    }

    /// Waits until the manager publishes a new session and returns it.
    ///
    /// Returns `None` once the manager has been dropped.
    pub async fn changed(&mut self) -> Option<Session> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}
