//! Pure cart and order transition function

use super::event::{CartAction, OrderEvent};
use super::state::OrdersState;
use crate::gateway::OrderStatus;

/// Apply one event to the orders slice.
pub fn transition(mut state: OrdersState, event: OrderEvent) -> OrdersState {
    match event {
        OrderEvent::Cart(action) => {
            let cart = &mut state.data.cart;
            match action {
                CartAction::Add {
                    product_id,
                    unit_price,
                    quantity,
                } => cart.add(&product_id, unit_price, quantity),
                CartAction::Remove { product_id } => cart.remove(&product_id),
                CartAction::SetQuantity {
                    product_id,
                    quantity,
                } => cart.set_quantity(&product_id, quantity),
                CartAction::Clear => cart.clear(),
            }
        }

        OrderEvent::OrderCreate(phase) => {
            state.apply(phase, |data, order| {
                // Single observable transition: the created order lands and
                // the cart empties together. No inspection point sees a
                // non-empty cart next to the new current order.
                data.current_order = Some(order.clone());
                data.orders.insert(0, order);
                data.cart.clear();
            });
        }

        OrderEvent::OrdersList(phase) => {
            state.apply(phase, |data, page| {
                data.orders = page.orders;
                data.pagination.total = page.total;
            });
        }

        OrderEvent::OrderFetch(phase) => {
            state.apply(phase, |data, order| {
                data.current_order = Some(order);
            });
        }

        OrderEvent::OrderCancel(phase) => {
            state.apply(phase, |data, order_id| {
                if let Some(order) = data.orders.iter_mut().find(|o| o.id == order_id) {
                    order.status = OrderStatus::Cancelled;
                }
                if let Some(current) = data.current_order.as_mut() {
                    if current.id == order_id {
                        current.status = OrderStatus::Cancelled;
                    }
                }
            });
        }

        OrderEvent::FiltersChanged(filters) => {
            state.data.filters = filters;
        }

        OrderEvent::PageChanged { page, limit } => {
            state.data.pagination.page = page;
            state.data.pagination.limit = limit;
        }

        OrderEvent::CurrentOrderCleared => {
            state.data.current_order = None;
        }

        OrderEvent::ErrorCleared => {
            state.clear_error();
        }
    }
    state
}
