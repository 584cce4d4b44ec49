//! Chat message model

use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc};

/// Opaque message identifier, unique within a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    /// Fresh random identifier for a newly composed message.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who wrote the message, from the local user's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Sent,
    Received,
}

/// Message payload kind. Only `Text` is produced today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    #[default]
    Text,
    Image,
    File,
    Audio,
    Video,
}

/// A single chat message.
///
/// Everything except the read state is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    id: MessageId,
    text: String,
    timestamp: DateTime<Utc>,
    direction: Direction,
    read: bool,
    kind: MessageKind,
}

impl Message {
    pub fn new(
        id: MessageId,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
        direction: Direction,
        read: bool,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            timestamp,
            direction,
            read,
            kind: MessageKind::Text,
        }
    }

    /// A message composed locally right now, not yet seen by the peer.
    pub fn outgoing(text: impl Into<String>) -> Self {
        Self::new(
            MessageId::generate(),
            text,
            Utc::now(),
            Direction::Sent,
            false,
        )
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn is_sent(&self) -> bool {
        self.direction == Direction::Sent
    }

    /// Received messages always count as read.
    pub fn is_read(&self) -> bool {
        match self.direction {
            Direction::Sent => self.read,
            Direction::Received => true,
        }
    }

    #[allow(dead_code)]
    pub fn mark_read(&mut self) {
        self.read = true;
    }

    /// `HH:MM` in the viewer's local time zone.
    pub fn time_label(&self) -> String {
        format_timestamp(&self.timestamp().with_timezone(&Local))
    }
}

/// Render an instant as zero-padded 24-hour `HH:MM` in the given zone.
pub fn format_timestamp<Tz: TimeZone>(ts: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    ts.format("%H:%M").to_string()
}
