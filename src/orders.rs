//! Cart & order engine
//!
//! Owns the cart (local, synchronous, running-total invariant) and the
//! order lifecycle state (remote, three-phase). The cart never talks to the
//! network; orders never mutate outside their phase applications.

pub mod event;
mod state;
pub(crate) mod transition;

mod engine;

#[cfg(test)]
mod proptests;

pub use engine::OrdersEngine;
pub use event::{CartAction, OrderEvent};
pub use state::{Cart, CartLine, OrderFilters, OrdersData, OrdersState, Pagination};
pub use transition::transition;
