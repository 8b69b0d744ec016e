//! The sample data set the client ships with.
//!
//! Six approved listings, one listing waiting for review, two chats and
//! the message history of the first chat.

use crate::{
    Chat, ChatId, Listing, ListingId, Message, MessageId, ModerationStatus, RentalType,
    Sender,
};

const IMAGE_A: &str = "https://cdn.poehali.dev/projects/d13845ce-797c-4b47-b7b8-dab012dad499/files/e3c208a9-47e6-4af1-b521-694e67859ff3.jpg";
const IMAGE_B: &str = "https://cdn.poehali.dev/projects/d13845ce-797c-4b47-b7b8-dab012dad499/files/3988e34d-d103-4f31-a7bd-da855d2de823.jpg";
const IMAGE_C: &str = "https://cdn.poehali.dev/projects/d13845ce-797c-4b47-b7b8-dab012dad499/files/76082600-7fc7-449f-a6c6-936baf40c74c.jpg";

#[allow(clippy::too_many_arguments)]
fn listing(
    id: u64,
    title: &str,
    price: u32,
    rooms: u8,
    area: u32,
    location: &str,
    image: &str,
    verified: bool,
    rental_type: RentalType,
    owner: (&str, &str),
) -> Listing {
    Listing {
        id: ListingId(id),
        title: title.into(),
        price,
        rooms,
        area,
        location: location.into(),
        image: image.into(),
        verified,
        favorite: false,
        rental_type,
        moderation_status: ModerationStatus::Approved,
        owner_name: owner.0.into(),
        owner_phone: owner.1.into(),
        created_at: None,
    }
}

/// All listings, in catalog order.
pub fn listings() -> Vec<Listing> {
    use RentalType::{Daily, LongTerm};

    let mut pending = listing(
        7,
        "New apartment awaiting review",
        45000,
        2,
        55,
        "Eastern district",
        IMAGE_A,
        false,
        LongTerm,
        ("Ivan Petrov", "+7 (999) 123-45-67"),
    );
    pending.moderation_status = ModerationStatus::Pending;

    vec![
        listing(
            1,
            "Cozy one-room apartment in the center",
            35000,
            1,
            42,
            "Central district",
            IMAGE_A,
            true,
            LongTerm,
            ("Anna Petrova", "+7 (999) 123-45-67"),
        ),
        listing(
            2,
            "Spacious two-room flat with a park view",
            52000,
            2,
            68,
            "Park district",
            IMAGE_B,
            true,
            LongTerm,
            ("Igor Smirnov", "+7 (999) 234-56-78"),
        ),
        listing(
            3,
            "Renovated studio in a new building",
            2800,
            1,
            32,
            "Northern district",
            IMAGE_C,
            false,
            Daily,
            ("Elena Sokolova", "+7 (999) 345-67-89"),
        ),
        listing(
            4,
            "Three-room family apartment",
            68000,
            3,
            85,
            "Southern district",
            IMAGE_A,
            true,
            LongTerm,
            ("Dmitry Kuznetsov", "+7 (999) 456-78-90"),
        ),
        listing(
            5,
            "Freshly refurbished two-room apartment",
            3500,
            2,
            58,
            "Western district",
            IMAGE_B,
            false,
            Daily,
            ("Maria Volkova", "+7 (999) 567-89-01"),
        ),
        listing(
            6,
            "Loft in the historic center",
            82000,
            2,
            95,
            "Central district",
            IMAGE_C,
            true,
            LongTerm,
            ("Sergey Novikov", "+7 (999) 678-90-12"),
        ),
        pending,
    ]
}

/// Existing conversations, most recent first.
pub fn chats() -> Vec<Chat> {
    vec![
        Chat {
            id: ChatId(1),
            listing_id: ListingId(2),
            listing_title: "Spacious two-room flat with a park view".into(),
            listing_image: IMAGE_B.into(),
            participant_name: "Igor Smirnov".into(),
            last_message: "Is the apartment still available?".into(),
            last_message_time: "14:32".into(),
            unread_count: 2,
        },
        Chat {
            id: ChatId(2),
            listing_id: ListingId(4),
            listing_title: "Three-room family apartment".into(),
            listing_image: IMAGE_A.into(),
            participant_name: "Dmitry Kuznetsov".into(),
            last_message: "Thanks for the info!".into(),
            last_message_time: "Yesterday".into(),
            unread_count: 0,
        },
    ]
}

/// Message history, all of it in chat 1.
pub fn messages() -> Vec<Message> {
    let message = |id: u64, sender: Sender, text: &str, time: &str| Message {
        id: MessageId(id),
        chat_id: ChatId(1),
        sender,
        text: text.into(),
        time: time.into(),
        is_own: sender == Sender::Me,
    };

    vec![
        message(1, Sender::Other, "Hello! I'm interested in this apartment", "14:20"),
        message(2, Sender::Me, "Good afternoon! Yes, it's available", "14:25"),
        message(3, Sender::Other, "Is the apartment still available?", "14:32"),
    ]
}
