//! Cart and order state types

use crate::dispatch::AsyncSlice;
use crate::gateway::{Order, OrderDraft, OrderItem, OrderQuery};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One cart line, keyed by `product_id`. At most one line per product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub unit_price: f64,
    pub quantity: u32,
}

/// The local cart.
///
/// Invariant: `total == Σ(unit_price × quantity)` after every mutation,
/// never just eventually — every mutating method recomputes before it
/// returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartLine>,
    pub total: f64,
    pub currency: String,
}

impl Default for Cart {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0.0,
            currency: "USD".to_string(),
        }
    }
}

impl Cart {
    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.items.iter().find(|l| l.product_id == product_id)
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    /// Build the create-order payload from the cart contents.
    pub fn draft(&self) -> OrderDraft {
        OrderDraft::new(
            self.items
                .iter()
                .map(|l| OrderItem {
                    product_id: l.product_id.clone(),
                    price: l.unit_price,
                    quantity: l.quantity,
                })
                .collect(),
        )
    }

    pub(crate) fn add(&mut self, product_id: &str, unit_price: f64, quantity: u32) {
        match self.items.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.items.push(CartLine {
                product_id: product_id.to_string(),
                unit_price,
                quantity,
            }),
        }
        self.recompute();
    }

    pub(crate) fn remove(&mut self, product_id: &str) {
        self.items.retain(|l| l.product_id != product_id);
        self.recompute();
    }

    pub(crate) fn set_quantity(&mut self, product_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }
        if let Some(line) = self.items.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
        }
        self.recompute();
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
        self.total = 0.0;
    }

    fn recompute(&mut self) {
        self.total = self
            .items
            .iter()
            .map(|l| l.unit_price * f64::from(l.quantity))
            .sum();
    }
}

/// Order list pagination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            total: 0,
        }
    }
}

/// Order list filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderFilters {
    pub status: Option<String>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

/// The order engine's slice data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrdersData {
    /// Most-recent-first
    pub orders: Vec<Order>,
    pub current_order: Option<Order>,
    pub cart: Cart,
    pub pagination: Pagination,
    pub filters: OrderFilters,
}

impl OrdersData {
    /// Query for `list_orders` from the current pagination and filters.
    pub fn query(&self) -> OrderQuery {
        OrderQuery {
            page: self.pagination.page,
            limit: self.pagination.limit,
            status: self.filters.status.clone(),
            date_from: self.filters.date_from,
            date_to: self.filters.date_to,
        }
    }
}

/// The cart & order engine's owned slice.
pub type OrdersState = AsyncSlice<OrdersData>;
