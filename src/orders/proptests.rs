//! Property tests for the cart invariants

use super::event::{CartAction, OrderEvent};
use super::state::OrdersState;
use super::transition::transition;
use proptest::prelude::*;

fn product_id() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("p1".to_string()),
        Just("p2".to_string()),
        Just("p3".to_string()),
    ]
}

fn cart_action() -> impl Strategy<Value = CartAction> {
    prop_oneof![
        (product_id(), 0.01f64..100.0, 1u32..5).prop_map(|(product_id, unit_price, quantity)| {
            CartAction::Add {
                product_id,
                unit_price,
                quantity,
            }
        }),
        product_id().prop_map(|product_id| CartAction::Remove { product_id }),
        (product_id(), 0u32..5).prop_map(|(product_id, quantity)| CartAction::SetQuantity {
            product_id,
            quantity,
        }),
        Just(CartAction::Clear),
    ]
}

proptest! {
    /// The running total equals the recomputed sum and no product ever
    /// occupies two lines, after every single action in the sequence.
    #[test]
    fn total_and_uniqueness_hold_after_every_action(
        actions in proptest::collection::vec(cart_action(), 0..40)
    ) {
        let mut state = OrdersState::default();
        for action in actions {
            state = transition(state, OrderEvent::Cart(action));

            let cart = &state.data.cart;
            let expected: f64 = cart
                .items
                .iter()
                .map(|l| l.unit_price * f64::from(l.quantity))
                .sum();
            prop_assert!((cart.total - expected).abs() < 1e-9);

            let mut ids: Vec<&str> =
                cart.items.iter().map(|l| l.product_id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), cart.items.len());

            prop_assert!(cart.items.iter().all(|l| l.quantity > 0));
        }
    }

    /// Cart actions never disturb the async side of the slice.
    #[test]
    fn cart_actions_leave_loading_and_error_alone(
        actions in proptest::collection::vec(cart_action(), 0..20)
    ) {
        let mut state = OrdersState::default();
        state.loading = true;
        state.error = Some("Failed to retrieve orders".to_string());

        for action in actions {
            state = transition(state, OrderEvent::Cart(action));
            prop_assert!(state.loading);
            prop_assert_eq!(state.error.as_deref(), Some("Failed to retrieve orders"));
        }
    }
}
