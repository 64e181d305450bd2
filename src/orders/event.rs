//! Events that drive cart and order transitions

use super::state::OrderFilters;
use crate::dispatch::Phase;
use crate::gateway::{Order, OrderPage};

/// Synchronous cart mutations. Validation happens at the engine boundary;
/// by the time an action reaches the transition it is well-formed.
#[derive(Debug, Clone)]
pub enum CartAction {
    Add {
        product_id: String,
        unit_price: f64,
        quantity: u32,
    },
    Remove {
        product_id: String,
    },
    SetQuantity {
        product_id: String,
        quantity: u32,
    },
    Clear,
}

/// Cart actions plus the three-phase order operations and the synchronous
/// reducers for filters, pagination, and error state.
#[derive(Debug, Clone)]
pub enum OrderEvent {
    Cart(CartAction),

    /// `POST /orders`; success carries the created order
    OrderCreate(Phase<Order>),

    /// `GET /orders`; success replaces the list and the pagination total
    OrdersList(Phase<OrderPage>),

    /// `GET /orders/{id}`; success replaces the current order
    OrderFetch(Phase<Order>),

    /// `POST /orders/{id}/cancel`; success carries the cancelled order's id
    OrderCancel(Phase<String>),

    FiltersChanged(OrderFilters),
    PageChanged { page: u32, limit: u32 },
    CurrentOrderCleared,
    ErrorCleared,
}
