//! Error types for the catalog layer.

use rently_protocol::UserId;

use crate::{ChatId, ListingId, ModerationStatus};

/// Errors that can occur during catalog, moderation and chat operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The listing does not exist.
    #[error("listing {0} not found")]
    NotFound(ListingId),

    /// The conversation does not exist.
    #[error("chat {0} not found")]
    ChatNotFound(ChatId),

    /// A moderation decision that the status machine doesn't allow, e.g.
    /// approving a listing that was already rejected.
    #[error("listing {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: ListingId,
        from: ModerationStatus,
        to: ModerationStatus,
    },

    /// The operation needs a signed-in user.
    #[error("sign in required")]
    NotAuthenticated,

    /// The signed-in user lacks the moderator role.
    #[error("user {0} is not a moderator")]
    NotModerator(UserId),

    /// A submitted listing is missing required fields.
    #[error("invalid listing: {0}")]
    InvalidDraft(String),
}
