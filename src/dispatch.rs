//! Intent dispatcher: the three-phase contract shared by both engines
//!
//! Every asynchronous intent is observed as exactly one `Requested` phase
//! followed by exactly one terminal phase (`Succeeded` or `Failed`). Phases
//! for a single invocation apply in that order, exactly once each. There is
//! no retry, no coalescing, and no cancellation: overlapping invocations of
//! the same kind settle independently, and last-settled-wins on shared
//! fields is the defined behavior.

use crate::gateway::GatewayError;
use serde::{Deserialize, Serialize};

/// One observable moment of an asynchronous intent's lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T> {
    Requested,
    Succeeded(T),
    Failed(String),
}

impl<T> Phase<T> {
    /// Fold a settled gateway outcome into its terminal phase.
    pub fn settled(outcome: Result<T, GatewayError>) -> Self {
        match outcome {
            Ok(payload) => Phase::Succeeded(payload),
            Err(err) => Phase::Failed(err.to_string()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Phase::Requested)
    }
}

/// An engine's owned partition of remote-derived state.
///
/// `loading` and `error` reflect the most recently applied phase for this
/// slice; a settled `data` update never coexists with `loading=true` in the
/// same transition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AsyncSlice<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> AsyncSlice<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            loading: false,
            error: None,
        }
    }

    /// Apply one phase of an intent, running `effect` on the payload when
    /// the intent succeeded. Each call applies exactly one phase.
    pub fn apply<P>(&mut self, phase: Phase<P>, effect: impl FnOnce(&mut T, P)) {
        match phase {
            Phase::Requested => {
                self.loading = true;
                self.error = None;
            }
            Phase::Succeeded(payload) => {
                self.loading = false;
                effect(&mut self.data, payload);
            }
            Phase::Failed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayError;

    #[test]
    fn requested_sets_loading_and_clears_error() {
        let mut slice = AsyncSlice::new(0u32);
        slice.error = Some("stale".to_string());

        slice.apply(Phase::<u32>::Requested, |_, _| {});

        assert!(slice.loading);
        assert_eq!(slice.error, None);
    }

    #[test]
    fn succeeded_applies_effect_and_clears_loading() {
        let mut slice = AsyncSlice::new(0u32);
        slice.apply(Phase::<u32>::Requested, |_, _| {});
        slice.apply(Phase::Succeeded(7u32), |data, n| *data = n);

        assert!(!slice.loading);
        assert_eq!(slice.data, 7);
        assert_eq!(slice.error, None);
    }

    #[test]
    fn failed_records_message_and_leaves_data_untouched() {
        let mut slice = AsyncSlice::new(3u32);
        slice.apply(Phase::<u32>::Requested, |_, _| {});
        slice.apply(Phase::<u32>::Failed("boom".to_string()), |data, n| *data = n);

        assert!(!slice.loading);
        assert_eq!(slice.data, 3);
        assert_eq!(slice.error.as_deref(), Some("boom"));
    }

    #[test]
    fn overlapping_invocations_last_settled_wins() {
        let mut slice = AsyncSlice::new(0u32);

        // Two invocations of the same kind, interleaved: neither is
        // coalesced, both apply, the later settle wins the shared field.
        slice.apply(Phase::<u32>::Requested, |_, _| {});
        slice.apply(Phase::<u32>::Requested, |_, _| {});
        slice.apply(Phase::Succeeded(1u32), |data, n| *data = n);
        slice.apply(Phase::Succeeded(2u32), |data, n| *data = n);

        assert_eq!(slice.data, 2);
        assert!(!slice.loading);
    }

    #[test]
    fn settled_maps_outcomes_to_terminal_phases() {
        assert_eq!(Phase::settled(Ok(5u32)), Phase::Succeeded(5));

        let failed = Phase::<u32>::settled(Err(GatewayError::network("offline")));
        assert_eq!(failed, Phase::Failed("offline".to_string()));
        assert!(failed.is_terminal());
        assert!(!Phase::<u32>::Requested.is_terminal());
    }
}
