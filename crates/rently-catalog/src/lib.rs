//! Listings, moderation and conversations for the Rently client.
//!
//! Everything here is in-memory and synchronous. Filtering is a pure
//! function of the catalog and a [`ListingFilter`]; there is no
//! pagination, sorting or debouncing.
//!
//! # Key types
//!
//! - [`Listing`] / [`ModerationStatus`]: an apartment and its review state
//! - [`ListingFilter`]: the search/price/rooms/district/type predicate
//! - [`Catalog`]: owns the listings: filter, favorites, submissions
//! - [`ModeratorGate`] / [`ModerationDesk`]: role-checked moderation
//! - [`Conversations`]: chat threads about listings
//! - [`fixtures`]: the sample data set

mod catalog;
mod chat;
mod error;
pub mod fixtures;
mod filter;
mod listing;
mod moderation;

pub use catalog::Catalog;
pub use chat::{Chat, ChatId, Conversations, Message, MessageId, Sender};
pub use error::CatalogError;
pub use filter::{Choice, ListingFilter, DEFAULT_MAX_PRICE};
pub use listing::{Listing, ListingDraft, ListingId, ModerationStatus, RentalType};
pub use moderation::{ModerationCounts, ModerationDesk, ModeratorGate};
