//! reqwest-backed gateway implementation

use super::error::GatewayError;
use super::types::*;
use super::{CredentialStore, Gateway, InMemoryCredentials};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Backend origin, without the `/api` prefix.
    pub base_url: String,
    pub bearer_token: Option<String>,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("STOREFRONT_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            bearer_token: std::env::var("STOREFRONT_API_TOKEN").ok(),
        }
    }
}

type AuthExpiredHook = Box<dyn Fn() + Send + Sync>;

/// HTTP gateway to the storefront backend.
///
/// Each call settles with exactly one outcome and is never retried. A 401
/// clears the credential store and fires the auth-expired hook (the
/// out-of-core redirect); the caller still receives an ordinary failure.
pub struct HttpGateway {
    client: Client,
    api_base: String,
    credentials: Arc<dyn CredentialStore>,
    on_auth_expired: Option<AuthExpiredHook>,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Self {
        let credentials = Arc::new(InMemoryCredentials::new(config.bearer_token.clone()));
        Self::with_credentials(config, credentials)
    }

    pub fn with_credentials(config: &GatewayConfig, credentials: Arc<dyn CredentialStore>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_base: format!("{}/api", config.base_url.trim_end_matches('/')),
            credentials,
            on_auth_expired: None,
        }
    }

    /// Install the out-of-core side effect for expired authorization.
    pub fn on_auth_expired(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_auth_expired = Some(Box::new(hook));
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Send a request, handle auth expiry, and return the raw success body.
    async fn execute_raw(&self, request: RequestBuilder) -> Result<String, GatewayError> {
        let request = match self.credentials.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::network(format!("Request timeout: {e}"))
            } else if e.is_connect() {
                GatewayError::network(format!("Connection failed: {e}"))
            } else {
                GatewayError::unknown(format!("Request failed: {e}"))
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(self.failure(status, &body));
        }

        Ok(body)
    }

    /// Turn a non-2xx response into an error, applying the 401 side
    /// effects: credential cleared, auth-expired hook fired.
    fn failure(&self, status: StatusCode, body: &str) -> GatewayError {
        if status == StatusCode::UNAUTHORIZED {
            self.credentials.clear();
            if let Some(hook) = &self.on_auth_expired {
                hook();
            }
            tracing::warn!("Authorization expired, credential cleared");
        }
        classify_failure(status, body)
    }

    /// Send a request and unwrap the `{ success, data }` envelope.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, GatewayError> {
        let body = self.execute_raw(request).await?;
        let envelope: Envelope<T> = serde_json::from_str(&body)
            .map_err(|e| GatewayError::network(format!("Failed to parse response: {e}")))?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn create_chat_session(&self) -> Result<SessionCreated, GatewayError> {
        tracing::debug!("POST /chat/session");
        self.execute(self.client.post(self.url("/chat/session")))
            .await
    }

    async fn send_chat_message(
        &self,
        text: &str,
        session_id: Option<&str>,
    ) -> Result<BotReply, GatewayError> {
        tracing::debug!(session_id = ?session_id, "POST /chat/message");
        let body = serde_json::json!({
            "message": text,
            "session_id": session_id,
        });
        self.execute(self.client.post(self.url("/chat/message")).json(&body))
            .await
    }

    async fn fetch_chat_history(&self, session_id: &str) -> Result<ChatHistory, GatewayError> {
        self.execute(
            self.client
                .get(self.url(&format!("/chat/history/{session_id}"))),
        )
        .await
    }

    async fn create_order(&self, draft: &OrderDraft) -> Result<Order, GatewayError> {
        tracing::debug!(items = draft.items.len(), "POST /orders");
        self.execute(self.client.post(self.url("/orders")).json(draft))
            .await
    }

    async fn list_orders(&self, query: &OrderQuery) -> Result<OrderPage, GatewayError> {
        self.execute(
            self.client
                .get(self.url("/orders"))
                .query(&query.to_params()),
        )
        .await
    }

    async fn fetch_order(&self, id: &str) -> Result<Order, GatewayError> {
        self.execute(self.client.get(self.url(&format!("/orders/{id}"))))
            .await
    }

    async fn cancel_order(&self, id: &str) -> Result<(), GatewayError> {
        tracing::debug!(order_id = %id, "POST /orders/{{id}}/cancel");
        // Success body carries no data payload, just the envelope.
        self.execute_raw(self.client.post(self.url(&format!("/orders/{id}/cancel"))))
            .await
            .map(|_| ())
    }

    async fn search_products(&self, query: &ProductQuery) -> Result<ProductPage, GatewayError> {
        self.execute(
            self.client
                .get(self.url("/products/search"))
                .query(&query.to_params()),
        )
        .await
    }
}

fn classify_failure(status: StatusCode, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| format!("HTTP {status}"));

    match status.as_u16() {
        401 | 403 => GatewayError::auth(message),
        400 | 404 => GatewayError::invalid_request(message),
        500..=599 => GatewayError::server_error(message),
        _ => GatewayError::unknown(message),
    }
}
