//! Work order model.
//!
//! A work order is the tracked unit of work on the production floor.
//! It moves through statuses, may carry an explicit hour estimate, and,
//! once assigned to a resource, occupies one ISO week on the capacity
//! board via its week bucket key.
//!
//! # Wire Shape
//! Orders live in a hosted document store whose field names are camelCase
//! (`estimatedHours`, `assignedResourceId`, `plannedWeekStartDate`).
//! Serialization preserves that shape.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A production work order.
///
/// # Invariants
/// When `assigned_resource_id` is set, `planned_week_start_date` equals
/// the ISO-week Monday of `start`, and `end >= start`. The reassignment
/// protocol maintains both; [`crate::audit`] checks them over fetched data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    /// Unique order identifier (the document id).
    pub id: String,
    /// Human-readable label (part number, short description).
    #[serde(default)]
    pub name: String,
    /// Number of units to produce.
    #[serde(default)]
    pub quantity: Option<u32>,
    /// Tracking status.
    #[serde(default)]
    pub status: OrderStatus,
    /// Scheduling priority.
    #[serde(default)]
    pub priority: OrderPriority,
    /// Planned start instant.
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    /// Planned completion instant.
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    /// Explicit hour estimate. When absent, the estimator derives one
    /// from the date span, the quantity, or a one-workday default.
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    /// Resource currently assigned to this order.
    #[serde(default)]
    pub assigned_resource_id: Option<String>,
    /// Monday of the ISO week containing `start`, the board's week bucket.
    #[serde(default)]
    pub planned_week_start_date: Option<NaiveDate>,
    /// Marker set on every assignment write.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Work order tracking status.
///
/// Legacy documents spell the terminal status three ways; `Done` accepts
/// all of them on input and writes `Done`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Created, not yet released to the floor.
    #[default]
    Open,
    /// Released for production.
    Released,
    /// Work has started.
    #[serde(alias = "In Progress")]
    InProgress,
    /// Running behind its planned dates.
    Delayed,
    /// Work finished.
    #[serde(alias = "Finished", alias = "Completed")]
    Done,
    /// Cancelled / removed from tracking.
    Removed,
}

/// Scheduling priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrderPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl WorkOrder {
    /// Creates an open, unassigned order.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            quantity: None,
            status: OrderStatus::Open,
            priority: OrderPriority::Medium,
            start: None,
            end: None,
            estimated_hours: None,
            assigned_resource_id: None,
            planned_week_start_date: None,
            updated_at: None,
        }
    }

    /// Sets the label.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the unit quantity.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: OrderPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the planned start.
    pub fn with_start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the planned end.
    pub fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Sets the explicit hour estimate.
    pub fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Assigns the order to a resource and week bucket.
    pub fn with_assignment(
        mut self,
        resource_id: impl Into<String>,
        week_start: NaiveDate,
    ) -> Self {
        self.assigned_resource_id = Some(resource_id.into());
        self.planned_week_start_date = Some(week_start);
        self
    }

    /// Whether the order is assigned to any resource.
    pub fn is_assigned(&self) -> bool {
        self.assigned_resource_id.is_some()
    }

    /// Whether the order is assigned to the given resource.
    pub fn assigned_to(&self, resource_id: &str) -> bool {
        self.assigned_resource_id.as_deref() == Some(resource_id)
    }

    /// Whether the order's week bucket is the given ISO-week Monday.
    pub fn in_week(&self, week_start: NaiveDate) -> bool {
        self.planned_week_start_date == Some(week_start)
    }
}

impl OrderStatus {
    /// Whether the order has left the floor (finished or removed).
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Done | OrderStatus::Removed)
    }

    /// Whether the order belongs on the capacity board.
    pub fn is_schedulable(&self) -> bool {
        !self.is_terminal()
    }
}
