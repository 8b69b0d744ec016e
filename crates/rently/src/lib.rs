//! # Rently
//!
//! Client core for an apartment rental marketplace: who is signed in,
//! which listings match a search, which screen is showing and which
//! actions need a session.
//!
//! The layers underneath are usable on their own:
//! transport → protocol → session → catalog. This crate ties them
//! together behind [`RentlyClient`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rently::prelude::*;
//!
//! # async fn run() -> Result<(), RentlyError> {
//! let mut client = HttpRentlyClient::connect(&ClientConfig::from_env())?;
//! client.initialize().await;
//!
//! let filter = ListingFilter {
//!     rooms: Choice::Only(2),
//!     ..Default::default()
//! };
//! for listing in client.listings(&filter) {
//!     println!("{} {}", listing.id, listing.title);
//! }
//!
//! if let Gate::RedirectedToLogin = client.contact_owner(ListingId(2))? {
//!     client.login("a@b.com", "secret").await?;
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod router;

pub use client::{HttpRentlyClient, RentlyClient};
pub use config::{ClientConfig, ENV_AUTH_URL, ENV_TOKEN_FILE};
pub use error::RentlyError;
pub use router::{Gate, View, ViewRouter};

pub use rently_catalog as catalog;
pub use rently_protocol as protocol;
pub use rently_session as session;
pub use rently_transport as transport;

pub mod prelude {
    pub use crate::{
        ClientConfig, Gate, HttpRentlyClient, RentlyClient, RentlyError, View, ViewRouter,
    };
    pub use rently_catalog::{
        Chat, ChatId, Choice, Listing, ListingDraft, ListingFilter, ListingId, Message,
        ModerationStatus, RentalType,
    };
    pub use rently_protocol::{Role, User, UserId};
    pub use rently_session::{AuthErrorKind, AuthenticationError, Session, SessionStatus};
}
