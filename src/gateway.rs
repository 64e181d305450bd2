//! Remote gateway for the storefront backend
//!
//! A thin request layer with an at-most-one-outcome-per-call contract: no
//! automatic retries, bearer-token injection on every request, and a global
//! side effect on authorization failure (credential cleared, auth-expired
//! hook fired). The engines only ever see a settled `Result` per call.

mod error;
mod http;
mod types;

#[cfg(test)]
pub mod testing;

pub use error::{GatewayError, GatewayErrorKind};
pub use http::{GatewayConfig, HttpGateway};
pub use types::*;

pub(crate) use types::parse_timestamp;

use async_trait::async_trait;
use std::sync::RwLock;

/// Named network operations consumed by the core (plus `search_products`,
/// which the out-of-scope UI dispatches through the same surface).
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn create_chat_session(&self) -> Result<SessionCreated, GatewayError>;

    /// `session_id` may be absent; the backend tolerates sessionless sends.
    async fn send_chat_message(
        &self,
        text: &str,
        session_id: Option<&str>,
    ) -> Result<BotReply, GatewayError>;

    async fn fetch_chat_history(&self, session_id: &str) -> Result<ChatHistory, GatewayError>;

    async fn create_order(&self, draft: &OrderDraft) -> Result<Order, GatewayError>;

    async fn list_orders(&self, query: &OrderQuery) -> Result<OrderPage, GatewayError>;

    async fn fetch_order(&self, id: &str) -> Result<Order, GatewayError>;

    async fn cancel_order(&self, id: &str) -> Result<(), GatewayError>;

    async fn search_products(&self, query: &ProductQuery) -> Result<ProductPage, GatewayError>;
}

/// Read side of the process-wide bearer credential.
///
/// The core never writes a token; the only mutation is the clear performed
/// by the gateway itself when a call comes back unauthorized.
pub trait CredentialStore: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
    fn clear(&self);
}

/// In-process credential store.
#[derive(Debug, Default)]
pub struct InMemoryCredentials {
    token: RwLock<Option<String>>,
}

impl InMemoryCredentials {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }
}

impl CredentialStore for InMemoryCredentials {
    fn bearer_token(&self) -> Option<String> {
        self.token.read().expect("credential lock poisoned").clone()
    }

    fn clear(&self) {
        *self.token.write().expect("credential lock poisoned") = None;
    }
}
