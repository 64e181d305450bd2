//! Wire types for the storefront HTTP API
//!
//! Request and response shapes mirror the backend routes. Responses are
//! wrapped in a `{ "success": true, "data": ... }` envelope; failures carry
//! `{ "error": "<message>" }` with a non-2xx status.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Success envelope around every payload.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// Error body shape for non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}

// ============================================================================
// Chat
// ============================================================================

/// Payload of `POST /chat/session`.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionCreated {
    pub session_id: String,
}

/// Payload of `POST /chat/message`: the assistant's reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BotReply {
    #[serde(default)]
    pub message_id: Option<String>,
    pub content: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Payload of `GET /chat/history/{session_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatHistory {
    #[serde(default)]
    pub messages: Vec<HistoryMessage>,
}

/// One stored message in a chat history payload.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryMessage {
    #[serde(default)]
    pub message_id: Option<String>,
    pub content: String,
    /// `"user"` or `"bot"`
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

// ============================================================================
// Orders
// ============================================================================

/// Order lifecycle status. Unrecognized server values collapse to `Unknown`
/// rather than failing the whole payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub fn is_cancelled(self) -> bool {
        self == OrderStatus::Cancelled
    }
}

/// One line of an order payload (request and response).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub price: f64,
    pub quantity: u32,
}

/// A server-side order. The client holds this as a read-only projection;
/// the only field it ever touches is `status`, and only to apply a
/// confirmed cancellation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Request body for `POST /orders`.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDraft {
    pub items: Vec<OrderItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Value>,
}

impl OrderDraft {
    pub fn new(items: Vec<OrderItem>) -> Self {
        Self {
            items,
            shipping_address: None,
            billing_address: None,
        }
    }
}

/// Query parameters for `GET /orders`.
#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
    pub page: u32,
    pub limit: u32,
    pub status: Option<String>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

impl OrderQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            ..Self::default()
        }
    }

    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(status) = &self.status {
            params.push(("status", status.clone()));
        }
        if let Some(from) = self.date_from {
            params.push(("date_from", from.to_rfc3339()));
        }
        if let Some(to) = self.date_to {
            params.push(("date_to", to.to_rfc3339()));
        }
        params
    }
}

/// Payload of `GET /orders`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderPage {
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub total: u64,
}

// ============================================================================
// Products
// ============================================================================

/// Query parameters for `GET /products/search`.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub query: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub limit: Option<u32>,
}

impl ProductQuery {
    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(q) = &self.query {
            params.push(("q", q.clone()));
        }
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        if let Some(min) = self.min_price {
            params.push(("min_price", min.to_string()));
        }
        if let Some(max) = self.max_price {
            params.push(("max_price", max.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

/// One product in a search result.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
}

/// Payload of `GET /products/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPage {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: u64,
}

// ============================================================================
// Timestamps
// ============================================================================

/// Parse a backend timestamp. The backend emits naive ISO-8601
/// (`datetime.utcnow().isoformat()`), but RFC 3339 is accepted too.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}
