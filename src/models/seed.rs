//! Mock records standing in for a backend.
//!
//! Each screen receives its seed as a constructor argument, so every test
//! starts from a fresh copy.

use chrono::{DateTime, Duration, Utc};

use super::{
    CallDirection, CallRecord, CallType, Contact, ContactStatus, Conversation, Direction,
    Message, MessageId,
};

#[allow(clippy::too_many_arguments)]
fn conversation(
    id: &str,
    name: &str,
    last_message: &str,
    timestamp: &str,
    unread_count: u32,
    avatar: &str,
    is_online: bool,
    is_group: bool,
) -> Conversation {
    Conversation {
        id: id.to_string(),
        name: name.to_string(),
        last_message: last_message.to_string(),
        timestamp: timestamp.to_string(),
        unread_count,
        avatar: avatar.to_string(),
        is_online,
        is_group,
    }
}

/// Discussions tab seed.
pub fn conversations() -> Vec<Conversation> {
    vec![
        conversation("1", "Alice Martin", "Salut ! Comment vas-tu ?", "10:30", 2, "👩", true, false),
        conversation("2", "Équipe Développement", "La réunion est à 15h", "09:15", 5, "👥", false, true),
        conversation("3", "Bob Dupont", "Merci pour ton aide !", "Hier", 0, "👨", false, false),
        conversation("4", "Sophie Laurent", "À bientôt 👋", "Hier", 0, "👩‍💼", true, false),
        conversation("5", "Projet FortressTalk", "Nouvelle fonctionnalité ajoutée", "Lundi", 0, "🔒", false, true),
    ]
}

fn call(
    id: &str,
    name: &str,
    avatar: &str,
    call_type: CallType,
    direction: CallDirection,
    timestamp: &str,
    duration: Option<&str>,
) -> CallRecord {
    CallRecord {
        id: id.to_string(),
        name: name.to_string(),
        avatar: avatar.to_string(),
        call_type,
        direction,
        timestamp: timestamp.to_string(),
        duration: duration.map(str::to_string),
    }
}

/// Calls tab seed.
pub fn calls() -> Vec<CallRecord> {
    use CallDirection::*;
    use CallType::*;
    vec![
        call("1", "Alice Martin", "👩", Video, Outgoing, "Aujourd'hui, 10:30", Some("15:23")),
        call("2", "Bob Dupont", "👨", Audio, Incoming, "Aujourd'hui, 09:15", Some("8:45")),
        call("3", "Sophie Laurent", "👩‍💼", Video, Missed, "Hier, 18:20", None),
        call("4", "Équipe Développement", "👥", Video, Incoming, "Hier, 15:00", Some("45:12")),
        call("5", "Alice Martin", "👩", Audio, Outgoing, "Lundi, 14:30", Some("5:30")),
    ]
}

fn contact(id: &str, name: &str, avatar: &str, status: ContactStatus, last_seen: &str) -> Contact {
    Contact {
        id: id.to_string(),
        name: name.to_string(),
        avatar: avatar.to_string(),
        status,
        last_seen: last_seen.to_string(),
    }
}

/// Contacts tab seed.
pub fn contacts() -> Vec<Contact> {
    use ContactStatus::*;
    vec![
        contact("1", "Alice Martin", "👩", Online, "En ligne"),
        contact("2", "Bob Dupont", "👨", Offline, "Vu il y a 2h"),
        contact("3", "Sophie Laurent", "👩‍💼", Online, "En ligne"),
        contact("4", "Marc Dubois", "👨‍💼", Away, "Absent"),
        contact("5", "Emma Bernard", "👩‍🦰", Offline, "Vu hier"),
        contact("6", "Lucas Petit", "👨‍🦱", Online, "En ligne"),
    ]
}

/// Opening transcript of every chat screen, relative to `now`.
pub fn chat_messages(now: DateTime<Utc>) -> Vec<Message> {
    let at = |secs_ago: i64| now - Duration::seconds(secs_ago);
    vec![
        Message::new(
            MessageId::from("1"),
            "Salut ! Comment vas-tu ?",
            at(3600),
            Direction::Received,
            true,
        ),
        Message::new(
            MessageId::from("2"),
            "Ça va bien merci ! Et toi ?",
            at(3500),
            Direction::Sent,
            true,
        ),
        Message::new(
            MessageId::from("3"),
            "Super ! Tu es disponible pour un appel ?",
            at(3400),
            Direction::Received,
            true,
        ),
        Message::new(
            MessageId::from("4"),
            "Oui, je suis là. On peut discuter maintenant.",
            at(3300),
            Direction::Sent,
            true,
        ),
    ]
}
