//! The session manager: the single owner and mutator of the session.
//!
//! Responsibilities:
//! - Restoring a persisted session at startup (`initialize`)
//! - Signing in (`login`, `register`, `login_with_social_provider`)
//! - Signing out (`logout`)
//! - Keeping the persisted token in step with the in-memory session
//!
//! # Concurrency note
//!
//! Every mutating method takes `&mut self`, so two sign-ins on the same
//! manager cannot overlap; whichever completes last determines the state.
//! Readers never touch the manager: they hold a [`SessionView`] fed by a
//! `watch` channel, which only ever carries whole `Session` values.

use rently_protocol::{AuthAction, AuthRequest, ProtocolError, User};
use rently_transport::{HttpTransport, TransportError};
use tokio::sync::watch;

use crate::{
    AuthenticationError, FileTokenStore, IdentityClient, IdentityService,
    Session, SessionConfig, SessionStatus, SessionView, TokenStore,
    TokenStoreError,
};

/// The production manager: JSON over HTTP, token in a file.
pub type HttpSessionManager =
    SessionManager<IdentityClient<HttpTransport>, FileTokenStore>;

/// Owns the client's session.
///
/// ## Lifecycle
///
/// ```text
/// new() ──→ initialize() ──→ [Anonymous] ──login()/register()/social──→ [Authenticated]
///                │                 ↑                                        │
///                └─(valid token)───┼──────────────→ [Authenticated]         │
///                                  └──────────────── logout() ──────────────┘
/// ```
pub struct SessionManager<I: IdentityService, S: TokenStore> {
    identity: I,
    store: S,
    state: watch::Sender<Session>,
    initialized: bool,
}

impl HttpSessionManager {
    /// Builds a manager from configuration: an HTTP client for
    /// `config.endpoint` and a file store at `config.token_file` (or the
    /// platform default).
    ///
    /// # Errors
    /// Fails if the endpoint URL is invalid or no token location can be
    /// determined.
    pub fn connect(config: &SessionConfig) -> Result<Self, ConnectError> {
        let transport = HttpTransport::new(&config.endpoint)?;
        let store = match &config.token_file {
            Some(path) => FileTokenStore::new(path),
            None => FileTokenStore::default_location()?,
        };
        Ok(Self::new(IdentityClient::new(transport), store))
    }
}

/// Why [`HttpSessionManager::connect`] failed.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Store(#[from] TokenStoreError),
}

impl<I: IdentityService, S: TokenStore> SessionManager<I, S> {
    /// Creates a manager with an `Uninitialized` session. Nothing is read
    /// or sent until [`initialize`](Self::initialize) is called.
    pub fn new(identity: I, store: S) -> Self {
        let (state, _) = watch::channel(Session::uninitialized());
        Self {
            identity,
            store,
            state,
            initialized: false,
        }
    }

    /// A read-only handle other components can hold on to.
    pub fn view(&self) -> SessionView {
        SessionView::new(self.state.subscribe())
    }

    /// A snapshot of the current session.
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.state.borrow().status()
    }

    pub fn identity(&self) -> &I {
        &self.identity
    }

    pub fn token_store(&self) -> &S {
        &self.store
    }

    /// Restores the session from the persisted token. Runs once; later
    /// calls return the current session without doing anything.
    ///
    /// - no stored token → `Anonymous`, no network call
    /// - stored token accepted by `verify` → `Authenticated`
    /// - stored token rejected, or the call fails → the token is deleted
    ///   and the session is `Anonymous`
    ///
    /// Never fails: every problem is logged and degrades to anonymous.
    pub async fn initialize(&mut self) -> Session {
        if self.initialized {
            return self.session();
        }
        self.initialized = true;

        let token = match self.store.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "could not read persisted token");
                None
            }
        };

        let Some(token) = token else {
            tracing::debug!("no persisted token, starting anonymous");
            self.publish(Session::anonymous());
            return self.session();
        };

        self.publish(Session::verifying());

        match self
            .identity
            .exchange(AuthRequest::Verify {
                token: token.clone(),
            })
            .await
        {
            Ok(reply) => {
                tracing::info!(user_id = %reply.user.id, "persisted session restored");
                self.publish(Session::authenticated(reply.user, token));
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    kind = ?e.kind(),
                    "persisted token verification failed"
                );
                self.forget_token();
                self.publish(Session::anonymous());
            }
        }
        self.session()
    }

    /// Signs in with email and password.
    ///
    /// # Errors
    /// Returns [`AuthenticationError`] with the server's message (or
    /// `"login failed"`). The session is left exactly as it was.
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<User, AuthenticationError> {
        self.authenticate(AuthRequest::Login {
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
    }

    /// Creates an account and signs in.
    ///
    /// # Errors
    /// Same contract as [`login`](Self::login); default message
    /// `"registration failed"`.
    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<User, AuthenticationError> {
        self.authenticate(AuthRequest::Register {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        })
        .await
    }

    /// Signs in through a federated provider. `provider_id` is the
    /// provider's stable id for the user.
    ///
    /// # Errors
    /// Same contract as [`login`](Self::login); default message
    /// `"social login failed"`.
    pub async fn login_with_social_provider(
        &mut self,
        provider_id: &str,
        email: &str,
        name: &str,
        avatar_url: Option<&str>,
    ) -> Result<User, AuthenticationError> {
        self.authenticate(AuthRequest::Google {
            google_id: provider_id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            avatar_url: avatar_url.map(str::to_string),
        })
        .await
    }

    /// Signs out locally. No network call, never fails.
    pub fn logout(&mut self) {
        if let Some(user) = self.state.borrow().user() {
            tracing::info!(user_id = %user.id, "signing out");
        }
        self.forget_token();
        self.publish(Session::anonymous());
    }

    /// Shared path for the three token-issuing actions. State is only
    /// touched after the reply has been fully validated.
    async fn authenticate(
        &mut self,
        request: AuthRequest,
    ) -> Result<User, AuthenticationError> {
        let action = request.action();
        debug_assert!(action.issues_token());

        let reply = self.identity.exchange(request).await?;
        let token = reply.token.ok_or_else(|| missing_token(action))?;

        if let Err(e) = self.store.save(&token) {
            tracing::warn!(error = %e, "could not persist token");
        }

        tracing::info!(user_id = %reply.user.id, %action, "session authenticated");
        self.publish(Session::authenticated(reply.user.clone(), token));
        self.initialized = true;
        Ok(reply.user)
    }

    fn forget_token(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "could not delete persisted token");
        }
    }

    fn publish(&self, session: Session) {
        tracing::debug!(status = %session.status(), "session updated");
        self.state.send_replace(session);
    }
}

fn missing_token(action: AuthAction) -> AuthenticationError {
    AuthenticationError::network(
        action,
        ProtocolError::InvalidReply(format!("{action} reply carried no token")),
    )
}

// =========================================================================
// Tests
// =========================================================================
