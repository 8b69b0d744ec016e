//! Session management for the Rently client.
//!
//! This crate owns the answer to "who is signed in?":
//!
//! 1. **Identity calls**: talking to the remote identity service
//!    ([`IdentityService`] trait, [`IdentityClient`])
//! 2. **Session state**: the single owned [`Session`] value, mutated only
//!    by the [`SessionManager`] and observed through a read-only
//!    [`SessionView`]
//! 3. **Persistence**: keeping the bearer token across runs
//!    ([`TokenStore`] trait, [`FileTokenStore`], [`MemoryTokenStore`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Client facade (above)  ← gates screens and actions on the session status
//!     ↕
//! Session Layer (this crate)  ← owns the session and the persisted token
//!     ↕
//! Protocol + Transport (below)  ← AuthRequest/AuthReply over HTTP
//! ```

#![allow(async_fn_in_trait)]

mod error;
mod identity;
mod manager;
mod session;
mod store;

pub use error::{AuthErrorKind, AuthenticationError, NetworkCause, TokenStoreError};
pub use identity::{IdentityClient, IdentityService};
pub use manager::{ConnectError, HttpSessionManager, SessionManager};
pub use session::{Session, SessionConfig, SessionStatus, SessionView, DEFAULT_ENDPOINT};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
