//! Storefront client core
//!
//! Conversation and cart/order synchronization engines for a storefront
//! client, plus the HTTP gateway they talk through. State lives in owned
//! slices mutated only by pure transition functions; remote operations
//! move through a three-phase requested/succeeded/failed lifecycle, so
//! every intermediate state a consumer can observe is a deliberate one.

pub mod chat;
pub mod dispatch;
pub mod error;
pub mod gateway;
pub mod orders;

pub use chat::ChatEngine;
pub use dispatch::{AsyncSlice, Phase};
pub use error::ValidationError;
pub use gateway::{Gateway, GatewayConfig, GatewayError, HttpGateway};
pub use orders::OrdersEngine;
