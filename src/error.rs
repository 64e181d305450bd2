//! Validation errors rejected before any state mutation or network call

use thiserror::Error;

/// Local validation failure.
///
/// These never reach the dispatcher: an intent that fails validation leaves
/// its slice untouched and issues no gateway call. Remote failures are a
/// different animal — they settle through the phase machinery and land in
/// the owning slice's `error` field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Message text is empty or whitespace-only
    #[error("message text is empty")]
    EmptyMessage,

    /// Cart quantity must be a positive integer
    #[error("quantity must be positive")]
    InvalidQuantity,

    /// Unit price must be a non-negative finite number
    #[error("invalid unit price: {price}")]
    InvalidPrice { price: f64 },

    /// Order payload contains no items
    #[error("order requires at least one item")]
    EmptyOrder,
}
