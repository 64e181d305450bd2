//! Conversation engine
//!
//! Owns the chat session id, the append-only message timeline, and the
//! typing flag. Intents go out through the gateway; their phases come back
//! through the pure transition function.

pub mod event;
mod state;
pub(crate) mod transition;

mod engine;

#[cfg(test)]
mod proptests;

pub use engine::ChatEngine;
pub use event::{ChatEvent, SendPhase};
pub use state::{ChatState, Conversation, Delivery, Message, MessageOrigin, FALLBACK_REPLY};
pub use transition::transition;
