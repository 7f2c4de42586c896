//! Access to the hosted document store.
//!
//! The board never talks to the store directly; it consumes two seams.
//! [`ResourceDirectory`] lists the active resources maintained by the
//! out-of-scope management screens. [`AssignmentStore`] reads the order
//! documents and writes exactly one thing back: the five-field
//! [`AssignmentPatch`] produced by a move. Stores that push change
//! notifications expose them as an [`OrderFeed`] of full snapshots.
//!
//! All methods return `anyhow::Result`; the transport behind the traits
//! is not this crate's business.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{OrderStatus, Resource, WorkOrder};

mod feed;
mod memory;

pub use feed::{OrderFeed, OrderSnapshot};
pub use memory::{InMemoryStore, StaticDirectory};

/// Partial update written by a reassignment, keyed by order id.
///
/// This is the entire write surface of the scheduling core: the store
/// merges these five fields into the order document and touches nothing
/// else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentPatch {
    /// Resource the order now belongs to.
    pub assigned_resource_id: String,
    /// Recomputed start instant.
    pub start: DateTime<Utc>,
    /// Recomputed end instant.
    pub end: DateTime<Utc>,
    /// ISO-week Monday of the new start.
    pub planned_week_start_date: NaiveDate,
    /// Write marker.
    pub updated_at: DateTime<Utc>,
}

impl AssignmentPatch {
    /// Builds a patch stamped with the current instant.
    pub fn new(
        assigned_resource_id: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        planned_week_start_date: NaiveDate,
    ) -> Self {
        Self {
            assigned_resource_id: assigned_resource_id.into(),
            start,
            end,
            planned_week_start_date,
            updated_at: Utc::now(),
        }
    }
}

/// Source of the active resource list.
#[async_trait]
pub trait ResourceDirectory: Send + Sync {
    /// Lists resources the board may assign to.
    async fn list_active_resources(&self) -> anyhow::Result<Vec<Resource>>;
}

/// Order document access.
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    /// Bulk read seeding the working set. An empty `statuses` slice
    /// means no filter.
    async fn fetch_orders(&self, statuses: &[OrderStatus]) -> anyhow::Result<Vec<WorkOrder>>;

    /// Merges `patch` into the document identified by `order_id`.
    async fn update_assignment(&self, order_id: &str, patch: &AssignmentPatch)
        -> anyhow::Result<()>;

    /// Live snapshot feed, for stores that push changes. The default is
    /// no feed; callers fall back to manual refresh.
    fn subscribe(&self) -> Option<OrderFeed> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_patch_wire_shape() {
        // The store merges by key; the patch must carry exactly the five
        // assignment fields, camelCased.
        let start = chrono::NaiveDate::from_ymd_opt(2024, 3, 18)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
            .and_utc();
        let patch = AssignmentPatch::new(
            "M1",
            start,
            start + chrono::Duration::hours(4),
            chrono::NaiveDate::from_ymd_opt(2024, 3, 18).unwrap(),
        );

        let value = serde_json::to_value(&patch).unwrap();
        let keys: BTreeSet<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        let expected: BTreeSet<&str> = [
            "assignedResourceId",
            "start",
            "end",
            "plannedWeekStartDate",
            "updatedAt",
        ]
        .into_iter()
        .collect();
        assert_eq!(keys, expected);
        assert_eq!(value["assignedResourceId"], "M1");
    }

    #[test]
    fn test_patch_roundtrip() {
        let start = chrono::Utc::now();
        let patch = AssignmentPatch::new(
            "P1",
            start,
            start,
            chrono::NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        );
        let json = serde_json::to_string(&patch).unwrap();
        let back: AssignmentPatch = serde_json::from_str(&json).unwrap();
        assert_eq!(back, patch);
    }
}
