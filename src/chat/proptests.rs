//! Property tests for the timeline's append-only guarantee

use super::event::{ChatEvent, SendPhase};
use super::state::{ChatState, Message};
use super::transition::transition;
use crate::dispatch::Phase;
use crate::gateway::{BotReply, SessionCreated};
use proptest::prelude::*;

fn short_text() -> impl Strategy<Value = String> {
    "[a-z ]{1,12}"
}

fn chat_event() -> impl Strategy<Value = ChatEvent> {
    prop_oneof![
        Just(ChatEvent::SessionCreate(Phase::Requested)),
        short_text().prop_map(|id| ChatEvent::SessionCreate(Phase::Succeeded(SessionCreated {
            session_id: id,
        }))),
        short_text().prop_map(|msg| ChatEvent::SessionCreate(Phase::Failed(msg))),
        short_text().prop_map(|text| ChatEvent::MessageSend(SendPhase::Requested {
            user: Message::user(text),
        })),
        (short_text(), short_text()).prop_map(|(user_id, content)| {
            ChatEvent::MessageSend(SendPhase::Succeeded {
                user_id,
                reply: BotReply {
                    message_id: None,
                    content,
                    suggestions: Vec::new(),
                },
            })
        }),
        (short_text(), short_text()).prop_map(|(user_id, message)| {
            ChatEvent::MessageSend(SendPhase::Failed { user_id, message })
        }),
        Just(ChatEvent::HistoryFetch(Phase::Requested)),
        proptest::collection::vec(short_text(), 0..4).prop_map(|texts| {
            ChatEvent::HistoryFetch(Phase::Succeeded(
                texts.into_iter().map(Message::user).collect(),
            ))
        }),
        short_text().prop_map(|msg| ChatEvent::HistoryFetch(Phase::Failed(msg))),
        prop_oneof![Just(ChatEvent::Reset), Just(ChatEvent::ErrorCleared)],
    ]
}

/// Whether an event is allowed to replace or drop existing timeline
/// entries. Everything else must only ever append.
fn replaces_timeline(event: &ChatEvent) -> bool {
    matches!(
        event,
        ChatEvent::Reset | ChatEvent::HistoryFetch(Phase::Succeeded(_))
    )
}

proptest! {
    /// Under any event sequence the existing timeline is a prefix of the
    /// next one — message ids and contents in place, nothing removed or
    /// reordered — except across a reset or a history reload.
    #[test]
    fn timeline_only_grows(events in proptest::collection::vec(chat_event(), 0..30)) {
        let mut state = ChatState::default();
        for event in events {
            let before: Vec<(String, String)> = state
                .data
                .messages
                .iter()
                .map(|m| (m.id.clone(), m.content.clone()))
                .collect();
            let replaced = replaces_timeline(&event);

            state = transition(state, event);

            if !replaced {
                prop_assert!(state.data.messages.len() >= before.len());
                for (i, (id, content)) in before.iter().enumerate() {
                    prop_assert_eq!(&state.data.messages[i].id, id);
                    prop_assert_eq!(&state.data.messages[i].content, content);
                }
            }
        }
    }
}
