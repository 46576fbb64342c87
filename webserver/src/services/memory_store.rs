//! In-memory order store
//!
//! Volatile backend for development and tests. Orders live in a map keyed by
//! date and disappear when the process exits.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use shared::{Order, OrderDate, OrderDraft, OrderId};

use crate::error::WebServerResult;
use crate::traits::OrderStore;

/// Order store backed by a process-local map
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<OrderDate, Vec<Order>>>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total orders held across all dates
    pub async fn len(&self) -> usize {
        self.orders.read().await.values().map(Vec::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert_order(&self, draft: OrderDraft) -> WebServerResult<OrderId> {
        let id = OrderId::new();
        let order = draft.into_order(id);

        tracing::debug!(order_id = %id, date = %order.date, "💾 Stored order in memory");
        self.orders.write().await.entry(order.date).or_default().push(order);

        Ok(id)
    }

    async fn find_orders_by_date(&self, date: &OrderDate) -> WebServerResult<Vec<Order>> {
        Ok(self.orders.read().await.get(date).cloned().unwrap_or_default())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
