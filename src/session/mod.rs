//! Per-conversation chat state: message history, sending, and the simulated
//! typing indicator.

mod typing;

pub use typing::{TypingTimings, DEFAULT_HIDE_AFTER, DEFAULT_SHOW_AFTER};

use chrono::Utc;
use thiserror::Error;
use tokio::sync::watch;

use crate::models::{self, Conversation, Message};
use typing::TypingIndicator;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No conversation with id '{0}'")]
    UnknownConversation(String),
}

/// State of one open chat screen.
///
/// Dropping the session (or calling [`ChatSession::close`]) cancels any
/// pending typing timer.
pub struct ChatSession {
    conversation_id: String,
    peer_name: String,
    messages: Vec<Message>,
    typing: TypingIndicator,
}

impl ChatSession {
    pub fn new(
        conversation_id: impl Into<String>,
        peer_name: impl Into<String>,
        seed: Vec<Message>,
        timings: TypingTimings,
    ) -> Self {
        let session = Self {
            conversation_id: conversation_id.into(),
            peer_name: peer_name.into(),
            messages: seed,
            typing: TypingIndicator::new(timings),
        };
        tracing::debug!(
            "Opened chat session {} with {} ({} messages)",
            session.conversation_id,
            session.peer_name,
            session.messages.len()
        );
        session
    }

    /// Open the session for a listed conversation, seeded with the mock transcript.
    pub fn open(
        conversations: &[Conversation],
        conversation_id: &str,
        timings: TypingTimings,
    ) -> Result<Self, SessionError> {
        let conv = conversations
            .iter()
            .find(|c| c.id == conversation_id)
            .ok_or_else(|| SessionError::UnknownConversation(conversation_id.to_string()))?;
        Ok(Self::new(
            conv.id.clone(),
            conv.name.clone(),
            models::seed::chat_messages(Utc::now()),
            timings,
        ))
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    pub fn peer_name(&self) -> &str {
        &self.peer_name
    }

    /// Messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_peer_typing(&self) -> bool {
        self.typing.is_visible()
    }

    /// Watch the typing indicator. The channel closes when the session does.
    pub fn subscribe_typing(&self) -> watch::Receiver<bool> {
        self.typing.subscribe()
    }

    /// Whether a typing cycle is still pending.
    #[cfg(test)]
    pub fn typing_armed(&self) -> bool {
        self.typing.is_armed()
    }

    /// Append an outgoing message and start the simulated reply.
    ///
    /// Whitespace-only input is ignored and returns `None`. On success the
    /// caller clears its draft and scrolls to the returned message.
    pub fn send_message(&mut self, text: &str) -> Option<&Message> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let msg = Message::outgoing(text);
        tracing::debug!("Sending {} to {}", msg.id(), self.conversation_id);
        self.messages.push(msg);
        self.typing.arm();
        self.messages.last()
    }

    /// Tear the session down, cancelling pending timers.
    pub fn close(mut self) {
        self.typing.cancel();
        tracing::debug!("Closed chat session {}", self.conversation_id);
    }
}
