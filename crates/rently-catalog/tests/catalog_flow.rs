//! Integration tests for the catalog: a listing goes from submission,
//! through review, into search results and a conversation.

use chrono::NaiveTime;
use rently_catalog::{
    Catalog, ChatId, Choice, Conversations, ListingDraft, ListingFilter, ListingId,
    ModerationStatus, ModeratorGate, RentalType,
};
use rently_protocol::{AuthReply, AuthRequest, Role, User, UserId};
use rently_session::{
    AuthenticationError, IdentityService, MemoryTokenStore, SessionManager, SessionView,
};

// =========================================================================
// Helpers
// =========================================================================

/// Signs everybody in as the same user.
struct Always(User);

impl IdentityService for Always {
    async fn exchange(&self, _request: AuthRequest) -> Result<AuthReply, AuthenticationError> {
        Ok(AuthReply {
            user: self.0.clone(),
            token: Some("t".into()),
        })
    }
}

fn user(id: u64, role: Role) -> User {
    User {
        id: UserId(id),
        email: format!("user{id}@b.com"),
        name: format!("User {id}"),
        avatar_url: None,
        role,
    }
}

async fn signed_in(user: User) -> SessionView {
    let mut mgr = SessionManager::new(Always(user), MemoryTokenStore::new());
    mgr.initialize().await;
    mgr.login("any@b.com", "pw").await.expect("stub always signs in");
    mgr.view()
}

fn draft() -> ListingDraft {
    ListingDraft {
        title: "Two rooms by the river".into(),
        price: 40000,
        rooms: 2,
        area: 60,
        location: "Park district".into(),
        rental_type: RentalType::LongTerm,
        owner_phone: "+7 (999) 111-22-33".into(),
        image: None,
    }
}

fn ids(catalog: &Catalog, filter: &ListingFilter) -> Vec<u64> {
    catalog.filtered(filter).map(|l| l.id.0).collect()
}

// =========================================================================
// Tests
// =========================================================================

#[test]
fn test_two_room_filter_returns_approved_two_room_listings() {
    let catalog = Catalog::fixtures();
    let filter = ListingFilter {
        search: String::new(),
        min_price: 0,
        max_price: 100_000,
        rooms: Choice::Only(2),
        district: Choice::All,
        rental_type: Choice::All,
    };

    assert_eq!(ids(&catalog, &filter), vec![2, 5, 6]);
}

#[test]
fn test_district_and_search_combine() {
    let catalog = Catalog::fixtures();
    let filter = ListingFilter {
        search: "loft".into(),
        district: Choice::Only("Central district".into()),
        ..Default::default()
    };

    assert_eq!(ids(&catalog, &filter), vec![6]);
}

#[test]
fn test_filter_parsed_from_select_values() {
    let catalog = Catalog::fixtures();
    let filter = ListingFilter {
        rooms: "all".parse().unwrap(),
        rental_type: "daily".parse().unwrap(),
        ..Default::default()
    };

    assert_eq!(ids(&catalog, &filter), vec![3, 5]);
}

#[tokio::test]
async fn test_submitted_listing_becomes_searchable_after_approval() {
    let mut catalog = Catalog::fixtures();
    let owner = user(1, Role::User);
    let filter = ListingFilter {
        rooms: Choice::Only(2),
        ..Default::default()
    };

    let id = catalog.submit(draft(), &owner).unwrap();
    assert_eq!(ids(&catalog, &filter), vec![2, 5, 6]);

    let moderator = signed_in(user(2, Role::Moderator)).await;
    let mut desk = ModeratorGate::enter(&moderator, &mut catalog).unwrap();
    assert_eq!(desk.counts().pending, 2);
    desk.approve(id).unwrap();
    drop(desk);

    assert_eq!(ids(&catalog, &filter), vec![2, 5, 6, id.0]);
}

#[tokio::test]
async fn test_rejected_listing_never_shows_up() {
    let mut catalog = Catalog::fixtures();
    let moderator = signed_in(user(2, Role::Moderator)).await;

    let mut desk = ModeratorGate::enter(&moderator, &mut catalog).unwrap();
    desk.reject(ListingId(7)).unwrap();
    assert!(desk.approve(ListingId(7)).is_err());
    drop(desk);

    assert_eq!(
        catalog.get(ListingId(7)).unwrap().moderation_status,
        ModerationStatus::Rejected
    );
    assert!(!ids(&catalog, &ListingFilter::default()).contains(&7));
}

#[tokio::test]
async fn test_regular_user_cannot_moderate() {
    let mut catalog = Catalog::fixtures();
    let renter = signed_in(user(1, Role::User)).await;

    assert!(ModeratorGate::enter(&renter, &mut catalog).is_err());
    assert_eq!(catalog.by_status(ModerationStatus::Pending).count(), 1);
}

#[test]
fn test_contacting_owner_then_chatting() {
    let catalog = Catalog::fixtures();
    let mut convos = Conversations::fixtures();
    let listing = catalog.get(ListingId(6)).unwrap();

    let chat_id = convos.start_chat(listing);
    assert_eq!(chat_id, ChatId(3));
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
    convos.send(chat_id, "Is the loft still free?", noon).unwrap();
    convos.send(chat_id, "  ", noon).unwrap();

    let chat = convos.chat_for_listing(ListingId(6)).unwrap();
    assert_eq!(chat.participant_name, "Sergey Novikov");
    assert_eq!(chat.last_message, "Is the loft still free?");
    assert_eq!(chat.last_message_time, "12:00");
    assert_eq!(convos.messages(chat_id).count(), 1);
}
