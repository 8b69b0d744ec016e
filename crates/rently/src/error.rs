//! Unified error type for the Rently client.

use rently_catalog::CatalogError;
use rently_protocol::ProtocolError;
use rently_session::{AuthenticationError, ConnectError, TokenStoreError};
use rently_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically. Every
/// variant displays the inner message unchanged.
#[derive(Debug, thiserror::Error)]
pub enum RentlyError {
    /// Sign-in, registration or verification failed.
    #[error(transparent)]
    Auth(#[from] AuthenticationError),

    /// The client could not be wired up (bad endpoint, no token location).
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    TokenStore(#[from] TokenStoreError),

    /// A listing, chat or moderation operation failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
