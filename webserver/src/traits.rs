//! Service trait definitions for dependency injection
//!
//! Persistence is abstracted behind `OrderStore` so the HTTP layer can run
//! against either backend, or a mock in tests.

use async_trait::async_trait;
use shared::{Order, OrderDate, OrderDraft, OrderId};

use crate::error::WebServerResult;

/// Append-only order persistence
#[mockall::automock]
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a validated order and return the id assigned to it
    async fn insert_order(&self, draft: OrderDraft) -> WebServerResult<OrderId>;

    /// Every order for a date, in insertion order
    async fn find_orders_by_date(&self, date: &OrderDate) -> WebServerResult<Vec<Order>>;

    /// Newest orders for a date, at most `limit` of them
    ///
    /// Display only. Totals are always computed from `find_orders_by_date`.
    async fn find_recent_orders_by_date(&self, date: &OrderDate, limit: usize) -> WebServerResult<Vec<Order>> {
        let orders = self.find_orders_by_date(date).await?;
        Ok(take_recent(orders, limit))
    }

    /// Short backend label for logs and the health endpoint
    fn backend_name(&self) -> &'static str;
}

/// Order by timestamp, newest first; ties put the later insertion first
pub fn sort_recent_first(orders: &mut [Order]) {
    orders.reverse();
    orders.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Keep the `limit` newest orders, newest first
pub fn take_recent(mut orders: Vec<Order>, limit: usize) -> Vec<Order> {
    sort_recent_first(&mut orders);
    orders.truncate(limit);
    orders
}
