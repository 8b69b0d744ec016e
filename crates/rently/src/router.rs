//! Which screen the client is on, and the sign-in gate in front of some of
//! them.
//!
//! Plain navigation always succeeds. Actions that need a signed-in user go
//! through [`ViewRouter::gate`]: when the session isn't authenticated the
//! router switches to [`View::Login`] and the action is dropped. It is not
//! queued and nothing replays it after sign-in; finishing the login lands
//! on [`View::Main`].

use std::fmt;

use rently_catalog::{ChatId, ListingId};
use rently_session::SessionView;

/// A screen of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// The catalog with the search panel.
    Main,
    Listing(ListingId),
    /// The new-listing form.
    Add,
    /// The list of chats.
    Messages,
    Chat(ChatId),
    Login,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => write!(f, "main"),
            Self::Listing(id) => write!(f, "listing {id}"),
            Self::Add => write!(f, "add"),
            Self::Messages => write!(f, "messages"),
            Self::Chat(id) => write!(f, "chat {id}"),
            Self::Login => write!(f, "login"),
        }
    }
}

/// What happened to an action that requires sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Gate<T> {
    /// The user was signed in and the action ran.
    Allowed(T),
    /// Nobody was signed in. The router is now on [`View::Login`] and the
    /// action did not run.
    RedirectedToLogin,
}

impl<T> Gate<T> {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }

    pub fn allowed(self) -> Option<T> {
        match self {
            Self::Allowed(value) => Some(value),
            Self::RedirectedToLogin => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Gate<U> {
        match self {
            Self::Allowed(value) => Gate::Allowed(f(value)),
            Self::RedirectedToLogin => Gate::RedirectedToLogin,
        }
    }
}

/// Tracks the current [`View`] against a read-only session.
#[derive(Debug, Clone)]
pub struct ViewRouter {
    current: View,
    session: SessionView,
}

impl ViewRouter {
    /// A router on [`View::Main`].
    pub fn new(session: SessionView) -> Self {
        Self {
            current: View::Main,
            session,
        }
    }

    pub fn current(&self) -> View {
        self.current
    }

    /// Lets the action through if someone is signed in; otherwise
    /// switches to [`View::Login`] and drops it.
    pub fn gate(&mut self, action: &'static str) -> Gate<()> {
        if self.session.is_authenticated() {
            return Gate::Allowed(());
        }
        tracing::info!(action, from = %self.current, "sign-in required, action dropped");
        self.current = View::Login;
        Gate::RedirectedToLogin
    }

    pub fn back_to_main(&mut self) {
        self.go(View::Main);
    }

    pub fn open_listing(&mut self, id: ListingId) {
        self.go(View::Listing(id));
    }

    /// Opens the sign-in screen on request.
    pub fn open_login(&mut self) {
        self.go(View::Login);
    }

    /// Leaves a chat for the chat list.
    pub fn back_to_messages(&mut self) {
        self.go(View::Messages);
    }

    /// Opens the new-listing form. Gated.
    pub fn add_listing(&mut self) -> Gate<()> {
        self.gate("add_listing").map(|()| self.go(View::Add))
    }

    /// Opens the chat list. Gated.
    pub fn open_messages(&mut self) -> Gate<()> {
        self.gate("open_messages").map(|()| self.go(View::Messages))
    }

    /// Opens one chat. Gated.
    pub fn open_chat(&mut self, id: ChatId) -> Gate<()> {
        self.gate("open_chat").map(|()| self.go(View::Chat(id)))
    }

    /// Leaves the sign-in screen after a successful login.
    ///
    /// Always lands on [`View::Main`], whatever was attempted before the
    /// redirect.
    pub fn finish_login(&mut self) {
        self.go(View::Main);
    }

    fn go(&mut self, to: View) {
        tracing::debug!(from = %self.current, %to, "navigate");
        self.current = to;
    }
}
