//! Weekly load aggregation.
//!
//! Folds the working order set into per-resource, per-week capacity cells:
//! `hours` is the estimator output summed over the orders assigned to the
//! resource in that ISO week, capacity is the resource's daily capacity
//! times [`WORKDAYS_PER_WEEK`] (or [`DEFAULT_WEEKLY_CAPACITY`] when none
//! is configured), and `percentage = round(hours / capacity * 100)`. A
//! non-positive capacity makes the cell indeterminate: no percentage, no
//! band.
//!
//! Everything here is a pure fold over its inputs and is recomputed on
//! every render; nothing is cached and nothing is persisted.

use chrono::NaiveDate;

use crate::estimate::DurationEstimator;
use crate::models::{Resource, WeeklyLoad, WorkOrder};
use crate::window::CalendarWindow;

/// Business days per ISO week.
pub const WORKDAYS_PER_WEEK: f64 = 5.0;

/// Weekly capacity in hours for a resource with no configured capacity.
pub const DEFAULT_WEEKLY_CAPACITY: f64 = 37.0;

/// Computes the load cell for one resource and one ISO week.
///
/// An order contributes when its `assigned_resource_id` matches the
/// resource and its `planned_week_start_date` matches `week`.
pub fn weekly_load(
    estimator: &DurationEstimator,
    resource: &Resource,
    week: NaiveDate,
    orders: &[WorkOrder],
) -> WeeklyLoad {
    let mut hours = 0.0;
    let mut order_ids = Vec::new();
    for order in orders {
        if order.assigned_to(&resource.id) && order.in_week(week) {
            hours += estimator.estimate(order);
            order_ids.push(order.id.clone());
        }
    }

    let capacity_hours = resource.weekly_capacity().unwrap_or(DEFAULT_WEEKLY_CAPACITY);
    let percentage =
        (capacity_hours > 0.0).then(|| (hours / capacity_hours * 100.0).round() as i64);

    WeeklyLoad {
        resource_id: resource.id.clone(),
        week_start: week,
        hours,
        capacity_hours,
        percentage,
        order_ids,
    }
}

/// Load cells for every resource across every week a window touches.
///
/// This is the whole-board aggregation the renderer consumes: one
/// [`WeeklyLoad`] per resource and week key, in resource-major order
/// (all weeks of the first resource, then the next resource).
#[derive(Debug, Clone, PartialEq)]
pub struct LoadMatrix {
    weeks: Vec<NaiveDate>,
    cells: Vec<WeeklyLoad>,
}

impl LoadMatrix {
    /// Aggregates `orders` for every (resource, window week) pair.
    pub fn compute(
        estimator: &DurationEstimator,
        resources: &[Resource],
        window: &CalendarWindow,
        orders: &[WorkOrder],
    ) -> Self {
        let weeks = window.week_starts();
        let mut cells = Vec::with_capacity(resources.len() * weeks.len());
        for resource in resources {
            for week in &weeks {
                cells.push(weekly_load(estimator, resource, *week, orders));
            }
        }
        Self { weeks, cells }
    }

    /// Week keys the matrix covers, ascending.
    pub fn weeks(&self) -> &[NaiveDate] {
        &self.weeks
    }

    /// All cells in resource-major order.
    pub fn cells(&self) -> &[WeeklyLoad] {
        &self.cells
    }

    /// The cell for one resource and week, if the matrix covers it.
    pub fn get(&self, resource_id: &str, week: NaiveDate) -> Option<&WeeklyLoad> {
        self.cells
            .iter()
            .find(|cell| cell.resource_id == resource_id && cell.week_start == week)
    }

    /// Sum of assigned hours over every cell.
    pub fn total_hours(&self) -> f64 {
        self.cells.iter().map(|cell| cell.hours).sum()
    }
}
