//! Work-hour estimation for orders.
//!
//! Order records arrive in every state of completeness, so the estimator
//! resolves a duration from whatever fields are present, in strict
//! precedence:
//!
//! 1. A finite stored `estimated_hours` is used verbatim. Non-positive
//!    stored values pass through untouched; rejecting them is the move
//!    protocol's job, not the estimator's.
//! 2. Otherwise, with both `start` and `end` present, the weekday count of
//!    the span (floored at one day) times the day length, rounded to the
//!    nearest whole hour.
//! 3. Otherwise, with a `quantity` present, [`HOURS_PER_UNIT`] per unit
//!    (quantity floored at one).
//! 4. Otherwise one workday.
//!
//! Every order resolves to an estimate; the chain never errors.

use crate::calendar::{weekdays_between, HOURS_PER_DAY};
use crate::models::WorkOrder;

/// Estimated hours per unit of quantity when nothing better is stored.
pub const HOURS_PER_UNIT: f64 = 2.0;

/// Resolves an order's estimated work-hours.
///
/// # Example
///
/// ```
/// use shopboard::estimate::DurationEstimator;
/// use shopboard::models::WorkOrder;
///
/// let estimator = DurationEstimator::new();
/// let order = WorkOrder::new("WO-17").with_quantity(10);
/// assert_eq!(estimator.estimate(&order), 20.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationEstimator {
    hours_per_day: f64,
}

impl DurationEstimator {
    /// Creates an estimator with the standard [`HOURS_PER_DAY`] day length.
    pub fn new() -> Self {
        Self {
            hours_per_day: HOURS_PER_DAY,
        }
    }

    /// Sets the working hours per day used by the date-span and fallback
    /// branches.
    pub fn with_hours_per_day(mut self, hours: f64) -> Self {
        self.hours_per_day = hours;
        self
    }

    /// Resolves `order` to estimated work-hours by the precedence chain.
    pub fn estimate(&self, order: &WorkOrder) -> f64 {
        if let Some(hours) = order.estimated_hours {
            if hours.is_finite() {
                return hours;
            }
        }
        if let (Some(start), Some(end)) = (order.start, order.end) {
            let days = weekdays_between(start.date_naive(), end.date_naive()).max(1);
            return (f64::from(days) * self.hours_per_day).round();
        }
        if let Some(quantity) = order.quantity {
            return f64::from(quantity.max(1)) * HOURS_PER_UNIT;
        }
        self.hours_per_day
    }
}

impl Default for DurationEstimator {
    fn default() -> Self {
        Self::new()
    }
}
