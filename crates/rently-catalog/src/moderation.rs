//! Role-checked access to the review queue.
//!
//! There is no separate moderator password. A [`ModerationDesk`] can only
//! be obtained through [`ModeratorGate::enter`], which looks at the
//! current session: the user must be signed in and carry
//! [`Role::Moderator`](rently_protocol::Role::Moderator), as reported by
//! the identity service.

use rently_session::SessionView;
use serde::Serialize;

use crate::{Catalog, CatalogError, Listing, ListingId, ModerationStatus};

/// How many listings sit in each review state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModerationCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

/// Checks the session before handing out a [`ModerationDesk`].
pub struct ModeratorGate;

impl ModeratorGate {
    /// Opens the review queue of `catalog` for the signed-in moderator.
    ///
    /// # Errors
    /// - [`CatalogError::NotAuthenticated`] if nobody is signed in
    /// - [`CatalogError::NotModerator`] if the user lacks the role
    pub fn enter<'a>(
        session: &SessionView,
        catalog: &'a mut Catalog,
    ) -> Result<ModerationDesk<'a>, CatalogError> {
        let user = session.user().ok_or(CatalogError::NotAuthenticated)?;
        if !user.is_moderator() {
            tracing::warn!(user_id = %user.id, "moderation refused: missing role");
            return Err(CatalogError::NotModerator(user.id));
        }
        tracing::info!(user_id = %user.id, "moderation desk opened");
        Ok(ModerationDesk { catalog })
    }
}

/// The review queue, borrowed from the catalog for as long as the
/// moderator works on it.
#[derive(Debug)]
pub struct ModerationDesk<'a> {
    catalog: &'a mut Catalog,
}

impl ModerationDesk<'_> {
    pub fn pending(&self) -> impl Iterator<Item = &Listing> {
        self.catalog.by_status(ModerationStatus::Pending)
    }

    pub fn approved(&self) -> impl Iterator<Item = &Listing> {
        self.catalog.by_status(ModerationStatus::Approved)
    }

    pub fn rejected(&self) -> impl Iterator<Item = &Listing> {
        self.catalog.by_status(ModerationStatus::Rejected)
    }

    pub fn counts(&self) -> ModerationCounts {
        self.catalog
            .iter()
            .fold(ModerationCounts::default(), |mut counts, listing| {
                match listing.moderation_status {
                    ModerationStatus::Pending => counts.pending += 1,
                    ModerationStatus::Approved => counts.approved += 1,
                    ModerationStatus::Rejected => counts.rejected += 1,
                }
                counts
            })
    }

    /// Publishes a pending listing.
    pub fn approve(&mut self, id: ListingId) -> Result<(), CatalogError> {
        self.decide(id, ModerationStatus::Approved)
    }

    /// Turns down a pending listing.
    pub fn reject(&mut self, id: ListingId) -> Result<(), CatalogError> {
        self.decide(id, ModerationStatus::Rejected)
    }

    fn decide(&mut self, id: ListingId, to: ModerationStatus) -> Result<(), CatalogError> {
        self.catalog.set_status(id, to)?;
        tracing::info!(listing_id = %id, status = %to, "moderation decision");
        Ok(())
    }
}
