//! The catalog search predicate.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Listing, RentalType};

/// Upper end of the default price range.
pub const DEFAULT_MAX_PRICE: u32 = 100_000;

/// A select box value: either "all" or one specific option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> Choice<T> {
    /// `true` if `value` passes this choice.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

/// Parses `"all"` as [`Choice::All`], anything else as the option itself.
impl<T: FromStr> FromStr for Choice<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

/// Everything the search panel can constrain.
///
/// A listing matches iff ALL of these hold:
/// - title or location contains `search`, ignoring case
/// - `min_price <= price <= max_price`
/// - `rooms`, `district` (exact `location`) and `rental_type` admit it
/// - it has been approved by a moderator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingFilter {
    pub search: String,
    pub min_price: u32,
    pub max_price: u32,
    pub rooms: Choice<u8>,
    pub district: Choice<String>,
    pub rental_type: Choice<RentalType>,
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            min_price: 0,
            max_price: DEFAULT_MAX_PRICE,
            rooms: Choice::All,
            district: Choice::All,
            rental_type: Choice::All,
        }
    }
}

impl ListingFilter {
    pub fn matches(&self, listing: &Listing) -> bool {
        self.matches_search(listing)
            && (self.min_price..=self.max_price).contains(&listing.price)
            && self.rooms.admits(&listing.rooms)
            && self.district.admits(&listing.location)
            && self.rental_type.admits(&listing.rental_type)
            && listing.moderation_status.is_public()
    }

    fn matches_search(&self, listing: &Listing) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        listing.title.to_lowercase().contains(&needle)
            || listing.location.to_lowercase().contains(&needle)
    }
}
