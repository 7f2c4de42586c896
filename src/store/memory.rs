//! In-memory store and directory.
//!
//! Reference implementations of the store seams, used by the tests and
//! usable as fixtures by anything embedding the board: documents live in
//! a `Vec` behind a mutex, every successful write broadcasts a fresh
//! snapshot to feed subscribers, and a one-shot failure switch exercises
//! the rollback path without a real outage.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context};
use async_trait::async_trait;
use tokio::sync::{broadcast, Mutex};

use crate::models::{OrderStatus, Resource, WorkOrder};

use super::feed::{OrderFeed, OrderSnapshot};
use super::{AssignmentPatch, AssignmentStore, ResourceDirectory};

const FEED_CAPACITY: usize = 16;

/// In-memory [`AssignmentStore`].
#[derive(Debug)]
pub struct InMemoryStore {
    orders: Mutex<Vec<WorkOrder>>,
    fail_next_write: AtomicBool,
    feed_tx: broadcast::Sender<OrderSnapshot>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::with_orders(Vec::new())
    }

    /// Creates a store seeded with `orders`.
    pub fn with_orders(orders: Vec<WorkOrder>) -> Self {
        let (feed_tx, _) = broadcast::channel(FEED_CAPACITY);
        Self {
            orders: Mutex::new(orders),
            fail_next_write: AtomicBool::new(false),
            feed_tx,
        }
    }

    /// Makes the next `update_assignment` call fail. The switch resets
    /// itself, so the write after the failed one succeeds again.
    pub fn fail_next_write(&self) {
        self.fail_next_write.store(true, Ordering::SeqCst);
    }

    /// Copy of every stored document.
    pub async fn documents(&self) -> Vec<WorkOrder> {
        self.orders.lock().await.clone()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssignmentStore for InMemoryStore {
    async fn fetch_orders(&self, statuses: &[OrderStatus]) -> anyhow::Result<Vec<WorkOrder>> {
        let orders = self.orders.lock().await;
        if statuses.is_empty() {
            return Ok(orders.clone());
        }
        Ok(orders
            .iter()
            .filter(|order| statuses.contains(&order.status))
            .cloned()
            .collect())
    }

    async fn update_assignment(
        &self,
        order_id: &str,
        patch: &AssignmentPatch,
    ) -> anyhow::Result<()> {
        if self.fail_next_write.swap(false, Ordering::SeqCst) {
            bail!("injected write failure");
        }

        let mut orders = self.orders.lock().await;
        let order = orders
            .iter_mut()
            .find(|order| order.id == order_id)
            .with_context(|| format!("order '{order_id}' does not exist"))?;
        order.assigned_resource_id = Some(patch.assigned_resource_id.clone());
        order.start = Some(patch.start);
        order.end = Some(patch.end);
        order.planned_week_start_date = Some(patch.planned_week_start_date);
        order.updated_at = Some(patch.updated_at);

        let snapshot = Arc::new(orders.clone());
        drop(orders);
        // No subscribers is fine; the snapshot is simply not observed.
        let _ = self.feed_tx.send(snapshot);
        Ok(())
    }

    fn subscribe(&self) -> Option<OrderFeed> {
        Some(OrderFeed::new(self.feed_tx.subscribe()))
    }
}

/// Fixed-list [`ResourceDirectory`].
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    resources: Vec<Resource>,
}

impl StaticDirectory {
    /// Creates a directory serving `resources`.
    pub fn new(resources: Vec<Resource>) -> Self {
        Self { resources }
    }
}

#[async_trait]
impl ResourceDirectory for StaticDirectory {
    async fn list_active_resources(&self) -> anyhow::Result<Vec<Resource>> {
        Ok(self
            .resources
            .iter()
            .filter(|resource| resource.active)
            .cloned()
            .collect())
    }
}
