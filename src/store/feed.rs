//! Live order-snapshot feed.
//!
//! Stores that push change notifications deliver them here as full order
//! snapshots rather than deltas, so a consumer that misses messages can
//! still trust the next one it receives. Subscriptions end by dropping
//! the feed; there is no teardown call to forget.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::models::WorkOrder;

/// One full order snapshot, shared between subscribers.
pub type OrderSnapshot = Arc<Vec<WorkOrder>>;

/// Receiving half of a store's change feed.
#[derive(Debug)]
pub struct OrderFeed {
    rx: broadcast::Receiver<OrderSnapshot>,
}

impl OrderFeed {
    /// Wraps a broadcast receiver of full snapshots.
    pub fn new(rx: broadcast::Receiver<OrderSnapshot>) -> Self {
        Self { rx }
    }

    /// Waits for the next snapshot. Returns `None` once the publishing
    /// store is gone. A lagged receiver skips the snapshots it missed
    /// and resumes on a newer one; with full snapshots nothing is lost.
    pub async fn next_snapshot(&mut self) -> Option<OrderSnapshot> {
        loop {
            match self.rx.recv().await {
                Ok(snapshot) => return Some(snapshot),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "order feed lagged, resuming on a newer snapshot");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_feed_delivers_snapshots() {
        let (tx, rx) = broadcast::channel(4);
        let mut feed = OrderFeed::new(rx);

        let snapshot: OrderSnapshot = Arc::new(vec![WorkOrder::new("WO-1")]);
        tx.send(Arc::clone(&snapshot)).unwrap();

        let received = feed.next_snapshot().await.unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].id, "WO-1");
    }

    #[tokio::test]
    async fn test_feed_ends_when_store_drops() {
        let (tx, rx) = broadcast::channel::<OrderSnapshot>(4);
        let mut feed = OrderFeed::new(rx);
        drop(tx);
        assert!(feed.next_snapshot().await.is_none());
    }

    #[tokio::test]
    async fn test_lagged_feed_resumes() {
        // Capacity 1: the second send evicts the first.
        let (tx, rx) = broadcast::channel(1);
        let mut feed = OrderFeed::new(rx);

        tx.send(Arc::new(vec![WorkOrder::new("WO-old")])).unwrap();
        tx.send(Arc::new(vec![WorkOrder::new("WO-new")])).unwrap();

        let received = feed.next_snapshot().await.unwrap();
        assert_eq!(received[0].id, "WO-new");
    }
}
