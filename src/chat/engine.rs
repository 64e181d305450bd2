//! Conversation engine: the intent surface over the chat slice

use super::event::{ChatEvent, SendPhase};
use super::state::{ChatState, Conversation, Message};
use super::transition::transition;
use crate::dispatch::Phase;
use crate::error::ValidationError;
use crate::gateway::Gateway;
use std::cell::RefCell;
use std::sync::Arc;

/// Owns the conversation slice and drives its intents.
///
/// Single-threaded cooperative: the slice is only ever mutated between
/// await points, never across one, so the `RefCell` borrow is always
/// short-lived. Overlapping intents are allowed and settle independently.
pub struct ChatEngine {
    state: RefCell<ChatState>,
    gateway: Arc<dyn Gateway>,
}

impl ChatEngine {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            state: RefCell::new(ChatState::default()),
            gateway,
        }
    }

    /// Engine seeded with the assistant's opening message and suggestion
    /// chips, as the chat widget shows on first open.
    pub fn with_greeting(gateway: Arc<dyn Gateway>) -> Self {
        let engine = Self::new(gateway);
        engine.state.replace(ChatState::new(Conversation {
            session_id: None,
            messages: vec![Message::greeting()],
            is_typing: false,
        }));
        engine
    }

    /// Read-only snapshot of the slice for out-of-core consumers.
    pub fn snapshot(&self) -> ChatState {
        self.state.borrow().clone()
    }

    fn apply(&self, event: ChatEvent) {
        let current = self.state.take();
        *self.state.borrow_mut() = transition(current, event);
    }

    /// Create the chat session, at most once.
    ///
    /// No-op when a session id is already present. On failure the id stays
    /// absent and the slice carries the error; calling again retries.
    pub async fn open_session(&self) {
        if self.state.borrow().data.session_id.is_some() {
            return;
        }

        self.apply(ChatEvent::SessionCreate(Phase::Requested));
        let outcome = self.gateway.create_chat_session().await;
        if let Err(err) = &outcome {
            tracing::warn!(%err, "chat session creation failed");
        }
        self.apply(ChatEvent::SessionCreate(Phase::settled(outcome)));
    }

    /// Send a message.
    ///
    /// Whitespace-only text is rejected before any state change or network
    /// call. Otherwise the user message is appended optimistically and the
    /// send settles into either the assistant reply or the fallback
    /// message — a remote failure never propagates to the caller.
    pub async fn send(&self, text: &str) -> Result<(), ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyMessage);
        }

        let user = Message::user(text);
        let user_id = user.id.clone();
        let session_id = self.state.borrow().data.session_id.clone();

        self.apply(ChatEvent::MessageSend(SendPhase::Requested { user }));

        let phase = match self
            .gateway
            .send_chat_message(text, session_id.as_deref())
            .await
        {
            Ok(reply) => SendPhase::Succeeded { user_id, reply },
            Err(err) => {
                tracing::warn!(%err, "message send failed, absorbing into timeline");
                SendPhase::Failed {
                    user_id,
                    message: err.to_string(),
                }
            }
        };
        self.apply(ChatEvent::MessageSend(phase));
        Ok(())
    }

    /// Tapping a suggestion chip is just a send.
    pub async fn select_suggestion(&self, text: &str) -> Result<(), ValidationError> {
        self.send(text).await
    }

    /// Reload the timeline from the server. No-op without a session.
    pub async fn load_history(&self) {
        let Some(session_id) = self.state.borrow().data.session_id.clone() else {
            return;
        };

        self.apply(ChatEvent::HistoryFetch(Phase::Requested));
        let outcome = self
            .gateway
            .fetch_chat_history(&session_id)
            .await
            .map(|history| {
                history
                    .messages
                    .into_iter()
                    .map(Message::from_history)
                    .collect()
            });
        self.apply(ChatEvent::HistoryFetch(Phase::settled(outcome)));
    }

    /// Drop the session and the timeline.
    pub fn reset(&self) {
        self.apply(ChatEvent::Reset);
    }

    pub fn clear_error(&self) {
        self.apply(ChatEvent::ErrorCleared);
    }
}
