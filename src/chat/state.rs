//! Conversation state types

use crate::dispatch::AsyncSlice;
use crate::gateway::{parse_timestamp, BotReply, HistoryMessage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed assistant message appended when a send settles with failure. The
/// failure is absorbed into the timeline so the conversation never visibly
/// dead-ends.
pub const FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble responding right now. Please try again.";

const GREETING: &str =
    "Hi! I'm your shopping assistant. How can I help you find the perfect product today?";

const GREETING_SUGGESTIONS: [&str; 3] =
    ["Show me laptops", "I need a smartphone", "What's on sale?"];

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageOrigin {
    User,
    Assistant,
}

/// Delivery state of an optimistic insert.
///
/// A user message is `Pending` from its local append until the send that
/// carried it settles; it is never removed, only confirmed. Assistant
/// messages are confirmed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    Pending,
    Confirmed,
}

/// One entry in the timeline. Immutable once appended, except for the
/// pending-to-confirmed delivery step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub origin: MessageOrigin,
    pub created_at: DateTime<Utc>,
    pub suggestions: Vec<String>,
    pub delivery: Delivery,
}

impl Message {
    /// Optimistic local user message: client-assigned id, current timestamp.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            origin: MessageOrigin::User,
            created_at: Utc::now(),
            suggestions: Vec::new(),
            delivery: Delivery::Pending,
        }
    }

    /// Assistant reply from a settled send.
    pub fn assistant(reply: BotReply) -> Self {
        Self {
            id: reply
                .message_id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            content: reply.content,
            origin: MessageOrigin::Assistant,
            created_at: Utc::now(),
            suggestions: reply.suggestions,
            delivery: Delivery::Confirmed,
        }
    }

    /// The fixed failure-absorbing assistant message.
    pub fn fallback() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: FALLBACK_REPLY.to_string(),
            origin: MessageOrigin::Assistant,
            created_at: Utc::now(),
            suggestions: Vec::new(),
            delivery: Delivery::Confirmed,
        }
    }

    /// The widget's opening assistant message.
    pub fn greeting() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: GREETING.to_string(),
            origin: MessageOrigin::Assistant,
            created_at: Utc::now(),
            suggestions: GREETING_SUGGESTIONS.map(String::from).to_vec(),
            delivery: Delivery::Confirmed,
        }
    }

    /// A stored message from a history payload.
    pub fn from_history(wire: HistoryMessage) -> Self {
        let origin = if wire.kind == "user" {
            MessageOrigin::User
        } else {
            MessageOrigin::Assistant
        };
        Self {
            id: wire
                .message_id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            content: wire.content,
            origin,
            created_at: wire
                .timestamp
                .as_deref()
                .and_then(parse_timestamp)
                .unwrap_or_else(Utc::now),
            suggestions: wire.suggestions,
            delivery: Delivery::Confirmed,
        }
    }
}

/// The conversation slice data: session id, timeline, typing flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub session_id: Option<String>,
    pub messages: Vec<Message>,
    pub is_typing: bool,
}

impl Conversation {
    pub(crate) fn confirm(&mut self, message_id: &str) {
        if let Some(message) = self.messages.iter_mut().find(|m| m.id == message_id) {
            message.delivery = Delivery::Confirmed;
        }
    }
}

/// The conversation engine's owned slice.
pub type ChatState = AsyncSlice<Conversation>;
