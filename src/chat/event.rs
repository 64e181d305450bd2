//! Events that drive conversation transitions

use super::state::Message;
use crate::dispatch::Phase;
use crate::gateway::{BotReply, SessionCreated};

/// Observable moments of the conversation engine's intents, plus the two
/// synchronous reducers (reset, error clear).
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// Lazy session creation (`POST /chat/session`)
    SessionCreate(Phase<SessionCreated>),

    /// Message send, with its optimistic insert
    MessageSend(SendPhase),

    /// Timeline reload (`GET /chat/history/{session_id}`)
    HistoryFetch(Phase<Vec<Message>>),

    /// Explicit reset: drops the session id and the timeline
    Reset,

    ErrorCleared,
}

/// Three-phase lifecycle of a single send invocation.
///
/// `Requested` carries the optimistic user message; the terminal phases
/// carry its id so the pending insert can be confirmed. This is the only
/// intent whose requested phase mutates `data` — the insert is irreversible
/// by design.
#[derive(Debug, Clone)]
pub enum SendPhase {
    Requested { user: Message },
    Succeeded { user_id: String, reply: BotReply },
    Failed { user_id: String, message: String },
}
