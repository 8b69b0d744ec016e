//! `RentlyClient`: the session, the catalog, the conversations and the
//! router behind one handle.
//!
//! Every user-facing action lives here, so the gating rules are applied in
//! one place: actions that need a signed-in user check the session through
//! the [`ViewRouter`] first and come back as [`Gate::RedirectedToLogin`]
//! without touching anything else when nobody is signed in.

use chrono::NaiveTime;
use rently_catalog::{
    Catalog, CatalogError, ChatId, Conversations, Listing, ListingDraft, ListingFilter,
    ListingId, Message, ModerationDesk, ModeratorGate,
};
use rently_protocol::User;
use rently_session::{
    FileTokenStore, HttpSessionManager, IdentityClient, IdentityService, Session,
    SessionManager, SessionView, TokenStore,
};
use rently_transport::HttpTransport;

use crate::{ClientConfig, Gate, RentlyError, View, ViewRouter};

/// A client talking to the identity service over HTTP and keeping its
/// token in a file.
pub type HttpRentlyClient = RentlyClient<IdentityClient<HttpTransport>, FileTokenStore>;

pub struct RentlyClient<I: IdentityService, S: TokenStore> {
    session: SessionManager<I, S>,
    router: ViewRouter,
    catalog: Catalog,
    conversations: Conversations,
}

impl HttpRentlyClient {
    /// Builds a client from configuration.
    ///
    /// Nothing is sent over the network until
    /// [`initialize`](RentlyClient::initialize) or a sign-in call.
    pub fn connect(config: &ClientConfig) -> Result<Self, RentlyError> {
        let session = HttpSessionManager::connect(&config.session)?;
        let client = if config.load_fixtures {
            Self::new(session, Catalog::fixtures(), Conversations::fixtures())
        } else {
            Self::new(session, Catalog::default(), Conversations::default())
        };
        tracing::info!(endpoint = %config.session.endpoint, "client ready");
        Ok(client)
    }
}

impl<I: IdentityService, S: TokenStore> RentlyClient<I, S> {
    pub fn new(
        session: SessionManager<I, S>,
        catalog: Catalog,
        conversations: Conversations,
    ) -> Self {
        let router = ViewRouter::new(session.view());
        Self {
            session,
            router,
            catalog,
            conversations,
        }
    }

    // -- Session ----------------------------------------------------------

    /// Restores a persisted sign-in, see [`SessionManager::initialize`].
    pub async fn initialize(&mut self) -> Session {
        self.session.initialize().await
    }

    /// Signs in and leaves the login screen for [`View::Main`].
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, RentlyError> {
        let user = self.session.login(email, password).await?;
        self.router.finish_login();
        Ok(user)
    }

    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<User, RentlyError> {
        let user = self.session.register(email, password, name).await?;
        self.router.finish_login();
        Ok(user)
    }

    pub async fn login_with_social_provider(
        &mut self,
        provider_id: &str,
        email: &str,
        name: &str,
        avatar_url: Option<&str>,
    ) -> Result<User, RentlyError> {
        let user = self
            .session
            .login_with_social_provider(provider_id, email, name, avatar_url)
            .await?;
        self.router.finish_login();
        Ok(user)
    }

    /// Signs out. The current view is left as it is.
    pub fn logout(&mut self) {
        self.session.logout();
    }

    pub fn session(&self) -> Session {
        self.session.session()
    }

    pub fn session_view(&self) -> SessionView {
        self.session.view()
    }

    // -- Navigation -------------------------------------------------------

    pub fn current_view(&self) -> View {
        self.router.current()
    }

    pub fn router(&self) -> &ViewRouter {
        &self.router
    }

    // -- Catalog ----------------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Approved listings matching `filter`, in catalog order.
    pub fn listings<'a>(
        &'a self,
        filter: &'a ListingFilter,
    ) -> impl Iterator<Item = &'a Listing> + 'a {
        self.catalog.filtered(filter)
    }

    /// Shows one listing.
    pub fn open_listing(&mut self, id: ListingId) -> Result<&Listing, RentlyError> {
        let listing = self.catalog.get(id).ok_or(CatalogError::NotFound(id))?;
        self.router.open_listing(id);
        Ok(listing)
    }

    pub fn toggle_favorite(&mut self, id: ListingId) -> Result<bool, RentlyError> {
        Ok(self.catalog.toggle_favorite(id)?)
    }

    /// Opens the new-listing form.
    pub fn add_listing(&mut self) -> Gate<()> {
        self.router.add_listing()
    }

    /// Posts a listing for review and returns to the catalog.
    pub fn submit_listing(&mut self, draft: ListingDraft) -> Result<Gate<ListingId>, RentlyError> {
        if !self.router.gate("submit_listing").is_allowed() {
            return Ok(Gate::RedirectedToLogin);
        }
        let session = self.session.session();
        let owner = session.user().ok_or(CatalogError::NotAuthenticated)?;
        let id = self.catalog.submit(draft, owner)?;
        self.router.back_to_main();
        Ok(Gate::Allowed(id))
    }

    /// The owner's phone number for `id`.
    pub fn reveal_phone(&mut self, id: ListingId) -> Result<Gate<String>, RentlyError> {
        if !self.router.gate("reveal_phone").is_allowed() {
            return Ok(Gate::RedirectedToLogin);
        }
        let listing = self.catalog.get(id).ok_or(CatalogError::NotFound(id))?;
        Ok(Gate::Allowed(listing.owner_phone.clone()))
    }

    /// Opens the review queue. Needs the moderator role.
    pub fn moderation(&mut self) -> Result<ModerationDesk<'_>, RentlyError> {
        let view = self.session.view();
        Ok(ModeratorGate::enter(&view, &mut self.catalog)?)
    }

    // -- Conversations ----------------------------------------------------

    pub fn conversations(&self) -> &Conversations {
        &self.conversations
    }

    /// Opens the chat list.
    pub fn open_messages(&mut self) -> Gate<()> {
        self.router.open_messages()
    }

    pub fn open_chat(&mut self, id: ChatId) -> Result<Gate<()>, RentlyError> {
        if !self.router.gate("open_chat").is_allowed() {
            return Ok(Gate::RedirectedToLogin);
        }
        self.conversations
            .chat(id)
            .ok_or(CatalogError::ChatNotFound(id))?;
        Ok(self.router.open_chat(id))
    }

    /// Opens the conversation about a listing, starting one with the owner
    /// if none exists yet.
    pub fn contact_owner(&mut self, listing: ListingId) -> Result<Gate<ChatId>, RentlyError> {
        if !self.router.gate("contact_owner").is_allowed() {
            return Ok(Gate::RedirectedToLogin);
        }
        let listing = self
            .catalog
            .get(listing)
            .ok_or(CatalogError::NotFound(listing))?;
        let chat_id = self.conversations.start_chat(listing);
        Ok(self.router.open_chat(chat_id).map(|()| chat_id))
    }

    /// Sends a message stamped with the local time.
    pub fn send_message(
        &mut self,
        chat_id: ChatId,
        text: &str,
    ) -> Result<Option<Message>, RentlyError> {
        self.send_message_at(chat_id, text, chrono::Local::now().time())
    }

    /// Sends a message stamped with `now`. Blank text is ignored and
    /// returns `Ok(None)`.
    pub fn send_message_at(
        &mut self,
        chat_id: ChatId,
        text: &str,
        now: NaiveTime,
    ) -> Result<Option<Message>, RentlyError> {
        if !self.session.session().is_authenticated() {
            return Err(CatalogError::NotAuthenticated.into());
        }
        let sent = self.conversations.send(chat_id, text, now)?;
        Ok(sent.cloned())
    }
}

#[cfg(test)]
mod tests {
    use rently_catalog::{ModerationStatus, RentalType};
    use rently_protocol::{AuthReply, AuthRequest, Role, UserId};
    use rently_session::{AuthenticationError, MemoryTokenStore, SessionStatus};

    use super::*;

    /// Answers every request with the configured user.
    struct StubIdentity {
        user: User,
    }

    impl IdentityService for StubIdentity {
        async fn exchange(
            &self,
            _request: AuthRequest,
        ) -> Result<AuthReply, AuthenticationError> {
            Ok(AuthReply {
                user: self.user.clone(),
                token: Some("T".into()),
            })
        }
    }

    async fn client(role: Role) -> RentlyClient<StubIdentity, MemoryTokenStore> {
        let identity = StubIdentity {
            user: User {
                id: UserId(1),
                email: "a@b.com".into(),
                name: "Anna".into(),
                avatar_url: None,
                role,
            },
        };
        let session = SessionManager::new(identity, MemoryTokenStore::new());
        let mut client = RentlyClient::new(session, Catalog::fixtures(), Conversations::fixtures());
        client.initialize().await;
        client
    }

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    fn draft() -> ListingDraft {
        ListingDraft {
            title: "Sunny studio".into(),
            price: 30000,
            rooms: 1,
            area: 28,
            location: "Northern district".into(),
            rental_type: RentalType::LongTerm,
            owner_phone: "+7 (999) 999-99-99".into(),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_anonymous_contact_owner_redirects_to_login() {
        let mut client = client(Role::User).await;
        client.open_listing(ListingId(1)).unwrap();

        let gate = client.contact_owner(ListingId(1)).unwrap();

        assert_eq!(gate, Gate::RedirectedToLogin);
        assert_eq!(client.current_view(), View::Login);
        assert_eq!(client.conversations().chats().len(), 2);
    }

    #[tokio::test]
    async fn test_login_after_redirect_lands_on_main() {
        let mut client = client(Role::User).await;
        assert!(!client.add_listing().is_allowed());
        assert_eq!(client.current_view(), View::Login);

        client.login("a@b.com", "x").await.unwrap();

        assert_eq!(client.current_view(), View::Main);
        assert_eq!(client.session().status(), SessionStatus::Authenticated);
    }

    #[tokio::test]
    async fn test_contact_owner_opens_existing_chat() {
        let mut client = client(Role::User).await;
        client.login("a@b.com", "x").await.unwrap();

        let gate = client.contact_owner(ListingId(2)).unwrap();

        assert_eq!(gate, Gate::Allowed(ChatId(1)));
        assert_eq!(client.current_view(), View::Chat(ChatId(1)));
        assert_eq!(client.conversations().chats().len(), 2);
    }

    #[tokio::test]
    async fn test_contact_owner_starts_new_chat() {
        let mut client = client(Role::User).await;
        client.login("a@b.com", "x").await.unwrap();

        let chat_id = client.contact_owner(ListingId(5)).unwrap().allowed().unwrap();

        assert_eq!(client.current_view(), View::Chat(chat_id));
        let chat = client.conversations().chat(chat_id).unwrap();
        assert_eq!(chat.participant_name, "Maria Volkova");
        assert_eq!(client.conversations().messages(chat_id).count(), 0);
    }

    #[tokio::test]
    async fn test_contact_owner_of_unknown_listing_fails() {
        let mut client = client(Role::User).await;
        client.login("a@b.com", "x").await.unwrap();

        let err = client.contact_owner(ListingId(404)).unwrap_err();

        assert!(matches!(err, RentlyError::Catalog(CatalogError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_reveal_phone_is_gated() {
        let mut client = client(Role::User).await;
        assert_eq!(
            client.reveal_phone(ListingId(1)).unwrap(),
            Gate::RedirectedToLogin
        );

        client.login("a@b.com", "x").await.unwrap();

        assert_eq!(
            client.reveal_phone(ListingId(1)).unwrap(),
            Gate::Allowed("+7 (999) 123-45-67".to_string())
        );
    }

    #[tokio::test]
    async fn test_submit_listing_uses_session_user_as_owner() {
        let mut client = client(Role::User).await;
        client.login("a@b.com", "x").await.unwrap();
        assert!(client.add_listing().is_allowed());
        assert_eq!(client.current_view(), View::Add);

        let id = client.submit_listing(draft()).unwrap().allowed().unwrap();

        assert_eq!(client.current_view(), View::Main);
        let listing = client.catalog().get(id).unwrap();
        assert_eq!(listing.owner_name, "Anna");
        assert_eq!(listing.moderation_status, ModerationStatus::Pending);
    }

    #[tokio::test]
    async fn test_submit_listing_while_anonymous_is_dropped() {
        let mut client = client(Role::User).await;

        let gate = client.submit_listing(draft()).unwrap();

        assert_eq!(gate, Gate::RedirectedToLogin);
        assert_eq!(client.catalog().len(), 7);
    }

    #[tokio::test]
    async fn test_send_message_requires_session() {
        let mut client = client(Role::User).await;
        let err = client.send_message_at(ChatId(1), "hi", noon()).unwrap_err();
        assert!(matches!(
            err,
            RentlyError::Catalog(CatalogError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_send_message_appends_to_chat() {
        let mut client = client(Role::User).await;
        client.login("a@b.com", "x").await.unwrap();

        let sent = client
            .send_message_at(ChatId(1), "See you at six", noon())
            .unwrap()
            .unwrap();

        assert_eq!(sent.time, "12:00");
        assert!(client.send_message_at(ChatId(1), " ", noon()).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_moderation_requires_role() {
        let mut plain = client(Role::User).await;
        plain.login("a@b.com", "x").await.unwrap();
        assert!(matches!(
            plain.moderation(),
            Err(RentlyError::Catalog(CatalogError::NotModerator(_)))
        ));

        let mut moderator = client(Role::Moderator).await;
        moderator.login("a@b.com", "x").await.unwrap();
        let mut desk = moderator.moderation().unwrap();
        desk.approve(ListingId(7)).unwrap();
        drop(desk);
        assert!(moderator.listings(&ListingFilter::default()).any(|l| l.id == ListingId(7)));
    }

    #[tokio::test]
    async fn test_logout_keeps_view() {
        let mut client = client(Role::User).await;
        client.login("a@b.com", "x").await.unwrap();
        assert!(client.open_messages().is_allowed());

        client.logout();

        assert_eq!(client.current_view(), View::Messages);
        assert!(!client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_favorites_do_not_need_session() {
        let mut client = client(Role::User).await;
        assert!(client.toggle_favorite(ListingId(2)).unwrap());
        assert_eq!(client.catalog().favorites().count(), 1);
    }
}
