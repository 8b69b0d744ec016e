//! Wire protocol for the Rently identity service.
//!
//! The identity service is a single HTTP endpoint. Every request is a
//! `POST` with a JSON body whose `action` field selects the operation:
//!
//! ```text
//! { "action": "verify",   "token": ... }                         → { "user" }
//! { "action": "login",    "email", "password" }                  → { "user", "token" }
//! { "action": "register", "email", "password", "name" }          → { "user", "token" }
//! { "action": "google",   "google_id", "email", "name", "avatar_url"? } → { "user", "token" }
//! ```
//!
//! Failures come back with a non-success status and `{ "error": "..." }`.
//!
//! This crate defines:
//!
//! - **Types** ([`AuthRequest`], [`AuthReply`], [`ErrorReply`], [`User`]):
//!   the bodies that travel on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those bodies are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]): what can go wrong during
//!   encoding/decoding.
//!
//! ```text
//! Transport (bytes) → Protocol (AuthRequest / AuthReply) → Session (who is logged in)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{AuthAction, AuthReply, AuthRequest, ErrorReply, Role, User, UserId};
