//! Cart & order engine: the intent surface over the orders slice

use super::event::{CartAction, OrderEvent};
use super::state::{OrderFilters, OrdersState};
use super::transition::transition;
use crate::dispatch::Phase;
use crate::error::ValidationError;
use crate::gateway::{Gateway, OrderQuery};
use std::cell::RefCell;
use std::sync::Arc;

/// Owns the cart and order slice and drives its intents.
///
/// Cart mutations are synchronous and validated at this boundary; order
/// operations are three-phase and hit the gateway. Same cooperative model
/// as the conversation engine: borrows never span an await.
pub struct OrdersEngine {
    state: RefCell<OrdersState>,
    gateway: Arc<dyn Gateway>,
}

impl OrdersEngine {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            state: RefCell::new(OrdersState::default()),
            gateway,
        }
    }

    /// Read-only snapshot of the slice for out-of-core consumers.
    pub fn snapshot(&self) -> OrdersState {
        self.state.borrow().clone()
    }

    fn apply(&self, event: OrderEvent) {
        let current = self.state.take();
        *self.state.borrow_mut() = transition(current, event);
    }

    /// Add `quantity` units of a product to the cart, merging into an
    /// existing line for the same product. Rejects zero quantities and
    /// non-finite or negative prices without touching the slice.
    pub fn add_item(
        &self,
        product_id: &str,
        unit_price: f64,
        quantity: u32,
    ) -> Result<(), ValidationError> {
        if quantity == 0 {
            return Err(ValidationError::InvalidQuantity);
        }
        if !unit_price.is_finite() || unit_price < 0.0 {
            return Err(ValidationError::InvalidPrice { price: unit_price });
        }
        self.apply(OrderEvent::Cart(CartAction::Add {
            product_id: product_id.to_string(),
            unit_price,
            quantity,
        }));
        Ok(())
    }

    /// Remove a product's line. No-op for an absent product.
    pub fn remove_item(&self, product_id: &str) {
        self.apply(OrderEvent::Cart(CartAction::Remove {
            product_id: product_id.to_string(),
        }));
    }

    /// Set a line's quantity. Zero removes the line.
    pub fn set_quantity(&self, product_id: &str, quantity: u32) {
        self.apply(OrderEvent::Cart(CartAction::SetQuantity {
            product_id: product_id.to_string(),
            quantity,
        }));
    }

    pub fn clear_cart(&self) {
        self.apply(OrderEvent::Cart(CartAction::Clear));
    }

    pub fn set_filters(&self, filters: OrderFilters) {
        self.apply(OrderEvent::FiltersChanged(filters));
    }

    pub fn set_pagination(&self, page: u32, limit: u32) {
        self.apply(OrderEvent::PageChanged { page, limit });
    }

    pub fn clear_current_order(&self) {
        self.apply(OrderEvent::CurrentOrderCleared);
    }

    pub fn clear_error(&self) {
        self.apply(OrderEvent::ErrorCleared);
    }

    /// Query matching the slice's current pagination and filters.
    pub fn current_query(&self) -> OrderQuery {
        self.state.borrow().data.query()
    }

    /// Place the order described by `draft`.
    ///
    /// Rejects an empty draft before any state change or network call. On
    /// success the created order becomes current, lands at the head of the
    /// list, and the cart empties — all in one transition.
    pub async fn create_order(
        &self,
        draft: crate::gateway::OrderDraft,
    ) -> Result<(), ValidationError> {
        if draft.items.is_empty() {
            return Err(ValidationError::EmptyOrder);
        }

        self.apply(OrderEvent::OrderCreate(Phase::Requested));
        let outcome = self.gateway.create_order(&draft).await;
        if let Err(err) = &outcome {
            tracing::warn!(%err, "order creation failed");
        }
        self.apply(OrderEvent::OrderCreate(Phase::settled(outcome)));
        Ok(())
    }

    /// Place an order for the current cart contents.
    pub async fn checkout(&self) -> Result<(), ValidationError> {
        let draft = self.state.borrow().data.cart.draft();
        self.create_order(draft).await
    }

    /// Fetch one page of the order history.
    pub async fn list_orders(&self, query: &OrderQuery) {
        self.apply(OrderEvent::OrdersList(Phase::Requested));
        let outcome = self.gateway.list_orders(query).await;
        if let Err(err) = &outcome {
            tracing::warn!(%err, "order list fetch failed");
        }
        self.apply(OrderEvent::OrdersList(Phase::settled(outcome)));
    }

    /// Fetch a single order into the current-order slot.
    pub async fn fetch_order(&self, id: &str) {
        self.apply(OrderEvent::OrderFetch(Phase::Requested));
        let outcome = self.gateway.fetch_order(id).await;
        if let Err(err) = &outcome {
            tracing::warn!(%err, order_id = id, "order fetch failed");
        }
        self.apply(OrderEvent::OrderFetch(Phase::settled(outcome)));
    }

    /// Cancel an order. Success flips its status to cancelled both in the
    /// order list and in the current-order slot when the ids match.
    pub async fn cancel_order(&self, id: &str) {
        self.apply(OrderEvent::OrderCancel(Phase::Requested));
        let outcome = self
            .gateway
            .cancel_order(id)
            .await
            .map(|()| id.to_string());
        if let Err(err) = &outcome {
            tracing::warn!(%err, order_id = id, "order cancellation failed");
        }
        self.apply(OrderEvent::OrderCancel(Phase::settled(outcome)));
    }
}
