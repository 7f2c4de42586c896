//! The schedule board and its reassignment protocol.
//!
//! [`ScheduleBoard`] owns the working copies of orders and resources and
//! is the only place they are mutated: full refreshes replace them, and
//! [`ScheduleBoard::move_order`] runs the drag protocol. Everything else
//! on the board is a read that delegates to the pure computation modules.
//!
//! # Move protocol
//!
//! A move runs Idle → Optimistically-Applied → (Persisted | Rolled-Back):
//!
//! 1. Validate: the dragged order must be in the working set and its
//!    estimate must be a positive number of hours. A failed validation
//!    is returned as [`MoveOutcome::Rejected`] with nothing changed.
//! 2. Compute: start at 08:00 on the target date, end via the work
//!    calendar, week key at the ISO Monday of the start.
//! 3. Apply: snapshot the working set into a [`PendingTransaction`],
//!    then patch the order in place so the board reflects the move
//!    immediately.
//! 4. Persist: write the five-field patch through the store. Success
//!    commits; failure rolls the whole working set back to the snapshot
//!    and surfaces a [`PersistError`](crate::error::PersistError).
//!
//! One board serializes its moves: `move_order` holds the exclusive
//! borrow until the persist call resolves, so a second move cannot start
//! against a working set with an unresolved transaction. Writes from
//! other clients are not coordinated; the store keeps whichever write
//! lands last.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::{weekly_load, LoadMatrix};
use crate::audit::{audit_working_set, AuditResult};
use crate::calendar::{week_start, WorkCalendar};
use crate::error::{PersistError, ValidationError};
use crate::estimate::DurationEstimator;
use crate::models::{OrderStatus, Resource, WeeklyLoad, WorkOrder};
use crate::store::{AssignmentPatch, AssignmentStore, OrderFeed, ResourceDirectory};
use crate::window::{BoardView, CalendarWindow, WeekendPolicy};

mod transaction;

pub use transaction::PendingTransaction;

/// Hour of day (UTC) a moved order starts at.
pub const MOVE_START_HOUR: u32 = 8;

/// Statuses the board works over. Terminal orders stay in the store for
/// the reporting screens but never reach the working set.
pub const BOARD_STATUSES: [OrderStatus; 4] = [
    OrderStatus::Open,
    OrderStatus::Released,
    OrderStatus::InProgress,
    OrderStatus::Delayed,
];

/// A drag or move-dialog action, reduced to the three facts that matter.
///
/// CamelCased for interaction layers that deliver it as JSON; nothing
/// about the producing widget survives into the protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    /// Order being moved.
    pub dragged_id: String,
    /// Resource row it was dropped on.
    pub target_resource_id: String,
    /// Date cell it was dropped on.
    pub target_date: NaiveDate,
}

impl MoveRequest {
    /// Builds a request targeting an exact date cell.
    pub fn new(
        dragged_id: impl Into<String>,
        target_resource_id: impl Into<String>,
        target_date: NaiveDate,
    ) -> Self {
        Self {
            dragged_id: dragged_id.into(),
            target_resource_id: target_resource_id.into(),
            target_date,
        }
    }

    /// Builds a request targeting a week picked in a move dialog; the
    /// target date snaps to that week's Monday.
    pub fn for_week(
        dragged_id: impl Into<String>,
        target_resource_id: impl Into<String>,
        week: NaiveDate,
    ) -> Self {
        Self::new(dragged_id, target_resource_id, week_start(week))
    }
}

/// What a committed move wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveReceipt {
    /// Order that was moved.
    pub order_id: String,
    /// Resource it now belongs to.
    pub resource_id: String,
    /// Recomputed start instant.
    pub start: DateTime<Utc>,
    /// Recomputed end instant.
    pub end: DateTime<Utc>,
    /// New ISO-week key.
    pub week_start: NaiveDate,
}

/// Result of a move that did not hit a persistence failure.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// The move was applied and persisted.
    Committed(MoveReceipt),
    /// Validation turned the move into a no-op; nothing changed.
    Rejected(ValidationError),
}

/// Working copies of orders and resources plus the collaborators needed
/// to move an order: the store seams, an estimator, and a work calendar.
pub struct ScheduleBoard {
    store: Arc<dyn AssignmentStore>,
    directory: Arc<dyn ResourceDirectory>,
    estimator: DurationEstimator,
    calendar: WorkCalendar,
    weekend_policy: WeekendPolicy,
    orders: Vec<WorkOrder>,
    resources: Vec<Resource>,
}

impl ScheduleBoard {
    /// Creates an empty board over the given store seams. Call
    /// [`refresh`](Self::refresh) to seed the working set.
    pub fn new(store: Arc<dyn AssignmentStore>, directory: Arc<dyn ResourceDirectory>) -> Self {
        Self {
            store,
            directory,
            estimator: DurationEstimator::new(),
            calendar: WorkCalendar::new(),
            weekend_policy: WeekendPolicy::default(),
            orders: Vec::new(),
            resources: Vec::new(),
        }
    }

    /// Sets the estimator.
    pub fn with_estimator(mut self, estimator: DurationEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    /// Sets the work calendar.
    pub fn with_calendar(mut self, calendar: WorkCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the weekend policy used by [`window`](Self::window).
    pub fn with_weekend_policy(mut self, policy: WeekendPolicy) -> Self {
        self.weekend_policy = policy;
        self
    }

    /// Reseeds the working set with the [`BOARD_STATUSES`] orders and the
    /// active resources.
    pub async fn refresh(&mut self) -> anyhow::Result<()> {
        self.refresh_with(&BOARD_STATUSES).await
    }

    /// Reseeds the working set with orders matching `statuses` (an empty
    /// slice fetches everything) and the active resources.
    pub async fn refresh_with(&mut self, statuses: &[OrderStatus]) -> anyhow::Result<()> {
        let orders = self.store.fetch_orders(statuses).await?;
        let resources = self.directory.list_active_resources().await?;
        tracing::debug!(
            orders = orders.len(),
            resources = resources.len(),
            "working set refreshed"
        );
        self.orders = orders;
        self.resources = resources;
        Ok(())
    }

    /// Replaces the working orders wholesale, as when absorbing a
    /// snapshot from a store's live feed.
    pub fn replace_orders(&mut self, orders: Vec<WorkOrder>) {
        self.orders = orders;
    }

    /// The working order set.
    pub fn orders(&self) -> &[WorkOrder] {
        &self.orders
    }

    /// The active resources.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// One working order by id.
    pub fn order(&self, id: &str) -> Option<&WorkOrder> {
        self.orders.iter().find(|order| order.id == id)
    }

    /// Estimated hours for `order`.
    pub fn estimate(&self, order: &WorkOrder) -> f64 {
        self.estimator.estimate(order)
    }

    /// Window of dates for one render, under the board's weekend policy.
    pub fn window(&self, anchor: NaiveDate, view: BoardView) -> CalendarWindow {
        CalendarWindow::build(anchor, view, self.weekend_policy)
    }

    /// Load cell for one resource and week over the working orders.
    pub fn load(&self, resource: &Resource, week: NaiveDate) -> WeeklyLoad {
        weekly_load(&self.estimator, resource, week, &self.orders)
    }

    /// Whole-board load for the window anchored at `anchor`.
    pub fn load_matrix(&self, anchor: NaiveDate, view: BoardView) -> LoadMatrix {
        let window = self.window(anchor, view);
        LoadMatrix::compute(&self.estimator, &self.resources, &window, &self.orders)
    }

    /// Audits the working set, logging every issue found.
    pub fn audit(&self) -> AuditResult {
        let result = audit_working_set(&self.orders, &self.resources);
        if let Err(issues) = &result {
            for issue in issues {
                tracing::warn!(kind = ?issue.kind, "{}", issue.message);
            }
        }
        result
    }

    /// Live snapshot feed from the store, when it offers one.
    pub fn subscribe(&self) -> Option<OrderFeed> {
        self.store.subscribe()
    }

    /// Runs the move protocol for `request`.
    ///
    /// Returns `Ok(Committed)` once the write is persisted,
    /// `Ok(Rejected)` when validation stopped the move before anything
    /// changed, and `Err` when the write failed after the optimistic
    /// apply; in that case the working set has already been rolled back
    /// and the error is ready for the notification layer.
    ///
    /// Dropping the returned future at its await point leaves the
    /// optimistic value in the working set with no rollback; a caller
    /// that cancels a move must [`refresh`](Self::refresh) before
    /// trusting the board again.
    pub async fn move_order(&mut self, request: MoveRequest) -> Result<MoveOutcome, PersistError> {
        let order = match self.order(&request.dragged_id) {
            Some(order) => order,
            None => {
                let error = ValidationError::UnknownOrder(request.dragged_id.clone());
                tracing::warn!("move rejected: {error}");
                return Ok(MoveOutcome::Rejected(error));
            }
        };

        let hours = self.estimator.estimate(order);
        if !(hours > 0.0) {
            let error = ValidationError::InvalidEstimate {
                order_id: order.id.clone(),
                hours,
            };
            tracing::warn!("move rejected: {error}");
            return Ok(MoveOutcome::Rejected(error));
        }

        let start = move_start(request.target_date);
        let end = self.calendar.compute_end(start, hours);
        let week = week_start(start.date_naive());
        let patch = AssignmentPatch::new(request.target_resource_id.clone(), start, end, week);

        let tx =
            PendingTransaction::capture(&self.orders, request.dragged_id.as_str(), patch.clone());
        tx.apply(&mut self.orders);

        match self.store.update_assignment(&request.dragged_id, &patch).await {
            Ok(()) => {
                tx.commit();
                let receipt = MoveReceipt {
                    order_id: request.dragged_id,
                    resource_id: patch.assigned_resource_id,
                    start,
                    end,
                    week_start: week,
                };
                tracing::info!(
                    order_id = %receipt.order_id,
                    resource_id = %receipt.resource_id,
                    week = %receipt.week_start,
                    "assignment persisted"
                );
                Ok(MoveOutcome::Committed(receipt))
            }
            Err(source) => {
                tx.rollback(&mut self.orders);
                tracing::error!(
                    order_id = %request.dragged_id,
                    "assignment write failed, rolled back: {source:#}"
                );
                Err(PersistError {
                    order_id: request.dragged_id,
                    source,
                })
            }
        }
    }
}

/// Start-of-work instant on `date`.
fn move_start(date: NaiveDate) -> DateTime<Utc> {
    let hour = NaiveTime::from_hms_opt(MOVE_START_HOUR, 0, 0).unwrap_or(NaiveTime::MIN);
    date.and_time(hour).and_utc()
}
