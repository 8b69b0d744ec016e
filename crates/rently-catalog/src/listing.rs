//! Listing types and the moderation state machine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ListingId
// ---------------------------------------------------------------------------

/// A unique identifier for a listing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ListingId(pub u64);

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// RentalType
// ---------------------------------------------------------------------------

/// How long the apartment is rented for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RentalType {
    Daily,
    LongTerm,
}

impl RentalType {
    /// The period the price is quoted for.
    pub fn price_unit(self) -> &'static str {
        match self {
            Self::Daily => "per day",
            Self::LongTerm => "per month",
        }
    }
}

impl fmt::Display for RentalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::LongTerm => write!(f, "long-term"),
        }
    }
}

impl FromStr for RentalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "long-term" => Ok(Self::LongTerm),
            other => Err(format!(
                "unknown rental type {other:?} (expected daily or long-term)"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// ModerationStatus
// ---------------------------------------------------------------------------

/// Where a listing is in review.
///
/// ```text
///            ┌──(approve)──→ Approved
/// Pending ───┤
///            └──(reject)───→ Rejected
/// ```
///
/// Both outcomes are final. Only `Approved` listings are shown in the
/// public catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ModerationStatus {
    /// Returns `true` if the listing is visible to everyone.
    pub fn is_public(self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Returns `true` if moving to `target` is a valid decision.
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
        )
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// One apartment offered for rent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    /// Price in whole rubles, per day or per month depending on
    /// `rental_type`.
    pub price: u32,
    pub rooms: u8,
    /// Floor area in square meters.
    pub area: u32,
    /// District name. The district filter compares against this exactly.
    pub location: String,
    pub image: String,
    pub verified: bool,
    pub favorite: bool,
    pub rental_type: RentalType,
    pub moderation_status: ModerationStatus,
    pub owner_name: String,
    pub owner_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// What a user fills in when posting a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingDraft {
    pub title: String,
    pub price: u32,
    pub rooms: u8,
    pub area: u32,
    pub location: String,
    pub rental_type: RentalType,
    pub owner_phone: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl ListingDraft {
    /// Checks the fields a listing can't be published without.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title is required".into());
        }
        if self.location.trim().is_empty() {
            return Err("location is required".into());
        }
        if self.price == 0 {
            return Err("price must be greater than zero".into());
        }
        if self.rooms == 0 {
            return Err("rooms must be at least 1".into());
        }
        Ok(())
    }
}
