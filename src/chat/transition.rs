//! Pure conversation transition function

use super::event::{ChatEvent, SendPhase};
use super::state::{ChatState, Message};

/// Apply one event to the conversation slice.
///
/// Pure: same state and event always produce the same next state, with no
/// I/O. The engine is the only caller in production; tests drive it
/// directly to pin down phase semantics.
pub fn transition(mut state: ChatState, event: ChatEvent) -> ChatState {
    match event {
        ChatEvent::SessionCreate(phase) => {
            state.apply(phase, |conversation, created| {
                conversation.session_id = Some(created.session_id);
            });
        }

        // Send does not use the generic slice application: its requested
        // phase flips the typing flag instead of `loading`, and its failed
        // phase appends the fallback reply on top of recording the error.
        ChatEvent::MessageSend(SendPhase::Requested { user }) => {
            state.error = None;
            state.data.is_typing = true;
            state.data.messages.push(user);
        }
        ChatEvent::MessageSend(SendPhase::Succeeded { user_id, reply }) => {
            state.data.is_typing = false;
            state.data.confirm(&user_id);
            state.data.messages.push(Message::assistant(reply));
        }
        ChatEvent::MessageSend(SendPhase::Failed { user_id, message }) => {
            state.data.is_typing = false;
            state.error = Some(message);
            state.data.confirm(&user_id);
            state.data.messages.push(Message::fallback());
        }

        ChatEvent::HistoryFetch(phase) => {
            state.apply(phase, |conversation, messages| {
                conversation.messages = messages;
            });
        }

        ChatEvent::Reset => {
            state = ChatState::default();
        }

        ChatEvent::ErrorCleared => {
            state.clear_error();
        }
    }
    state
}
