//! The listing catalog.

use rently_protocol::User;

use crate::{
    CatalogError, Listing, ListingDraft, ListingFilter, ListingId, ModerationStatus, fixtures,
};

/// Owns every listing the client knows about, in catalog order.
///
/// Listings are never removed. New submissions are appended with the next
/// free id and stay out of [`filtered`](Self::filtered) results until a
/// moderator approves them.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    listings: Vec<Listing>,
}

impl Catalog {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    /// A catalog preloaded with the sample listings.
    pub fn fixtures() -> Self {
        Self::new(fixtures::listings())
    }

    /// Listings matching `filter`, in catalog order.
    pub fn filtered<'a>(
        &'a self,
        filter: &'a ListingFilter,
    ) -> impl Iterator<Item = &'a Listing> + 'a {
        self.listings.iter().filter(move |l| filter.matches(l))
    }

    pub fn get(&self, id: ListingId) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    /// Flips the favorite mark and returns the new value.
    pub fn toggle_favorite(&mut self, id: ListingId) -> Result<bool, CatalogError> {
        let listing = self.get_mut(id)?;
        listing.favorite = !listing.favorite;
        Ok(listing.favorite)
    }

    pub fn favorites(&self) -> impl Iterator<Item = &Listing> {
        self.listings.iter().filter(|l| l.favorite)
    }

    /// Adds a listing posted by `owner` and returns its id.
    ///
    /// The listing starts `pending` and unverified. The owner's name comes
    /// from the signed-in user, the phone from the draft.
    pub fn submit(&mut self, draft: ListingDraft, owner: &User) -> Result<ListingId, CatalogError> {
        draft.validate().map_err(CatalogError::InvalidDraft)?;

        let id = ListingId(self.listings.iter().map(|l| l.id.0).max().unwrap_or(0) + 1);
        self.listings.push(Listing {
            id,
            title: draft.title,
            price: draft.price,
            rooms: draft.rooms,
            area: draft.area,
            location: draft.location,
            image: draft.image.unwrap_or_default(),
            verified: false,
            favorite: false,
            rental_type: draft.rental_type,
            moderation_status: ModerationStatus::Pending,
            owner_name: owner.name.clone(),
            owner_phone: draft.owner_phone,
            created_at: Some(chrono::Local::now().format("%Y-%m-%d").to_string()),
        });

        tracing::info!(listing_id = %id, owner = %owner.id, "listing submitted for review");
        Ok(id)
    }

    /// Listings in the given review state, in catalog order.
    pub fn by_status(&self, status: ModerationStatus) -> impl Iterator<Item = &Listing> {
        self.listings
            .iter()
            .filter(move |l| l.moderation_status == status)
    }

    /// Applies a moderation decision.
    ///
    /// Fails with [`CatalogError::InvalidTransition`] unless the status
    /// machine allows the move.
    pub(crate) fn set_status(
        &mut self,
        id: ListingId,
        to: ModerationStatus,
    ) -> Result<(), CatalogError> {
        let listing = self.get_mut(id)?;
        let from = listing.moderation_status;
        if !from.can_transition_to(to) {
            return Err(CatalogError::InvalidTransition { id, from, to });
        }
        listing.moderation_status = to;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Listing> {
        self.listings.iter()
    }

    fn get_mut(&mut self, id: ListingId) -> Result<&mut Listing, CatalogError> {
        self.listings
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(CatalogError::NotFound(id))
    }
}
