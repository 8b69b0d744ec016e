//! Chat threads between a renter and a listing's owner.

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::{CatalogError, Listing, ListingId, fixtures};

/// A unique identifier for a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub u64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C-{}", self.0)
    }
}

/// A message identifier, unique within its chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M-{}", self.0)
    }
}

/// Who wrote a message, from the signed-in user's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Me,
    Other,
}

/// One conversation about one listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: ChatId,
    pub listing_id: ListingId,
    pub listing_title: String,
    pub listing_image: String,
    pub participant_name: String,
    pub last_message: String,
    /// `HH:MM` for today, or a free-form label such as "Yesterday".
    pub last_message_time: String,
    pub unread_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub chat_id: ChatId,
    pub sender: Sender,
    pub text: String,
    /// Always `HH:MM`.
    pub time: String,
    pub is_own: bool,
}

/// Every chat and message the client knows about.
#[derive(Debug, Clone, Default)]
pub struct Conversations {
    chats: Vec<Chat>,
    messages: Vec<Message>,
}

impl Conversations {
    pub fn new(chats: Vec<Chat>, messages: Vec<Message>) -> Self {
        Self { chats, messages }
    }

    /// Conversations preloaded with the sample chats.
    pub fn fixtures() -> Self {
        Self::new(fixtures::chats(), fixtures::messages())
    }

    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    pub fn chat(&self, id: ChatId) -> Option<&Chat> {
        self.chats.iter().find(|c| c.id == id)
    }

    /// The messages of one chat, oldest first.
    pub fn messages(&self, chat_id: ChatId) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(move |m| m.chat_id == chat_id)
    }

    /// The chat already open about `listing`, if any.
    pub fn chat_for_listing(&self, listing: ListingId) -> Option<&Chat> {
        self.chats.iter().find(|c| c.listing_id == listing)
    }

    /// Opens a new, empty chat with the listing's owner and returns its id.
    ///
    /// If a chat about this listing already exists, that one is returned
    /// instead; there is never more than one chat per listing.
    pub fn start_chat(&mut self, listing: &Listing) -> ChatId {
        if let Some(existing) = self.chat_for_listing(listing.id) {
            return existing.id;
        }

        let id = ChatId(self.chats.iter().map(|c| c.id.0).max().unwrap_or(0) + 1);
        // New chats go on top, like the most recent conversation.
        self.chats.insert(
            0,
            Chat {
                id,
                listing_id: listing.id,
                listing_title: listing.title.clone(),
                listing_image: listing.image.clone(),
                participant_name: listing.owner_name.clone(),
                last_message: String::new(),
                last_message_time: String::new(),
                unread_count: 0,
            },
        );
        tracing::info!(chat_id = %id, listing_id = %listing.id, "chat started");
        id
    }

    /// Appends a message from the signed-in user to a chat.
    ///
    /// Text that is empty after trimming is ignored and `Ok(None)` is
    /// returned. Otherwise the message gets id `count + 1` (where `count`
    /// is the chat's current message count), the time `now` as `HH:MM`,
    /// and becomes the chat's last message.
    ///
    /// # Errors
    /// [`CatalogError::ChatNotFound`] if the chat doesn't exist.
    pub fn send(
        &mut self,
        chat_id: ChatId,
        text: &str,
        now: NaiveTime,
    ) -> Result<Option<&Message>, CatalogError> {
        let chat = self
            .chats
            .iter_mut()
            .find(|c| c.id == chat_id)
            .ok_or(CatalogError::ChatNotFound(chat_id))?;

        if text.trim().is_empty() {
            return Ok(None);
        }

        let count = self.messages.iter().filter(|m| m.chat_id == chat_id).count();
        let time = now.format("%H:%M").to_string();
        let message = Message {
            id: MessageId(count as u64 + 1),
            chat_id,
            sender: Sender::Me,
            text: text.to_string(),
            time: time.clone(),
            is_own: true,
        };

        chat.last_message = message.text.clone();
        chat.last_message_time = time;
        tracing::debug!(%chat_id, message_id = %message.id, "message sent");

        self.messages.push(message);
        Ok(self.messages.last())
    }
}
