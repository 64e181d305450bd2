//! Mock gateway for engine tests
//!
//! Queued outcomes per operation, a recorded call log, and an optional gate
//! that holds every call in flight until the test releases it — enough to
//! observe intermediate states and overlapping invocations.

use super::error::GatewayError;
use super::types::*;
use super::Gateway;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

type Queue<T> = Mutex<VecDeque<Result<T, GatewayError>>>;

#[derive(Default)]
pub struct MockGateway {
    sessions: Queue<SessionCreated>,
    replies: Queue<BotReply>,
    histories: Queue<ChatHistory>,
    created_orders: Queue<Order>,
    order_pages: Queue<OrderPage>,
    fetched_orders: Queue<Order>,
    cancellations: Queue<()>,
    product_pages: Queue<ProductPage>,
    /// Record of operation names, in call order
    pub calls: Mutex<Vec<String>>,
    gate: Option<Arc<Notify>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway whose calls block until the returned `Notify` is signaled
    /// once per in-flight call.
    pub fn gated() -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let mock = Self {
            gate: Some(gate.clone()),
            ..Self::default()
        };
        (mock, gate)
    }

    pub fn queue_session(&self, outcome: Result<SessionCreated, GatewayError>) {
        self.sessions.lock().unwrap().push_back(outcome);
    }

    pub fn queue_reply(&self, outcome: Result<BotReply, GatewayError>) {
        self.replies.lock().unwrap().push_back(outcome);
    }

    pub fn queue_history(&self, outcome: Result<ChatHistory, GatewayError>) {
        self.histories.lock().unwrap().push_back(outcome);
    }

    pub fn queue_created_order(&self, outcome: Result<Order, GatewayError>) {
        self.created_orders.lock().unwrap().push_back(outcome);
    }

    pub fn queue_order_page(&self, outcome: Result<OrderPage, GatewayError>) {
        self.order_pages.lock().unwrap().push_back(outcome);
    }

    pub fn queue_fetched_order(&self, outcome: Result<Order, GatewayError>) {
        self.fetched_orders.lock().unwrap().push_back(outcome);
    }

    pub fn queue_cancellation(&self, outcome: Result<(), GatewayError>) {
        self.cancellations.lock().unwrap().push_back(outcome);
    }

    pub fn queue_product_page(&self, outcome: Result<ProductPage, GatewayError>) {
        self.product_pages.lock().unwrap().push_back(outcome);
    }

    pub fn call_count(&self, op: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == op).count()
    }

    async fn begin(&self, op: &str) {
        self.calls.lock().unwrap().push(op.to_string());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }

    fn take<T>(queue: &Queue<T>) -> Result<T, GatewayError> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::network("No mock outcome queued")))
    }
}

/// Assistant reply with no suggestions.
pub fn reply(content: &str) -> BotReply {
    BotReply {
        message_id: None,
        content: content.to_string(),
        suggestions: Vec::new(),
    }
}

/// Minimal order payload for tests.
pub fn order(id: &str, status: OrderStatus) -> Order {
    Order {
        id: id.to_string(),
        status,
        items: Vec::new(),
        total_amount: 0.0,
        currency: "USD".to_string(),
        created_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_products_round_trips_through_the_gateway() {
        let mock = MockGateway::new();
        mock.queue_product_page(Ok(ProductPage {
            products: vec![Product {
                id: "p1".to_string(),
                name: "Laptop".to_string(),
                price: 999.0,
                category: Some("computers".to_string()),
            }],
            total: 1,
        }));

        let query = ProductQuery {
            query: Some("laptop".to_string()),
            ..ProductQuery::default()
        };
        let page = mock.search_products(&query).await.unwrap();

        assert_eq!(page.products[0].name, "Laptop");
        assert_eq!(page.total, 1);
        assert_eq!(mock.call_count("search_products"), 1);
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn create_chat_session(&self) -> Result<SessionCreated, GatewayError> {
        self.begin("create_chat_session").await;
        Self::take(&self.sessions)
    }

    async fn send_chat_message(
        &self,
        _text: &str,
        _session_id: Option<&str>,
    ) -> Result<BotReply, GatewayError> {
        self.begin("send_chat_message").await;
        Self::take(&self.replies)
    }

    async fn fetch_chat_history(&self, _session_id: &str) -> Result<ChatHistory, GatewayError> {
        self.begin("fetch_chat_history").await;
        Self::take(&self.histories)
    }

    async fn create_order(&self, _draft: &OrderDraft) -> Result<Order, GatewayError> {
        self.begin("create_order").await;
        Self::take(&self.created_orders)
    }

    async fn list_orders(&self, _query: &OrderQuery) -> Result<OrderPage, GatewayError> {
        self.begin("list_orders").await;
        Self::take(&self.order_pages)
    }

    async fn fetch_order(&self, _id: &str) -> Result<Order, GatewayError> {
        self.begin("fetch_order").await;
        Self::take(&self.fetched_orders)
    }

    async fn cancel_order(&self, _id: &str) -> Result<(), GatewayError> {
        self.begin("cancel_order").await;
        Self::take(&self.cancellations)
    }

    async fn search_products(&self, _query: &ProductQuery) -> Result<ProductPage, GatewayError> {
        self.begin("search_products").await;
        Self::take(&self.product_pages)
    }
}
