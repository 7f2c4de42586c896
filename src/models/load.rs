//! Weekly load model.
//!
//! A [`WeeklyLoad`] is one cell of the capacity board: everything assigned
//! to one resource within one ISO week, summed into hours and compared
//! against the resource's weekly capacity. It is derived: recomputed by
//! [`crate::aggregate`] on every read, never persisted, never mutated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Assigned hours vs. capacity for one (resource, week) cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyLoad {
    /// Resource the cell belongs to.
    pub resource_id: String,
    /// ISO-week Monday keying the cell.
    pub week_start: NaiveDate,
    /// Total estimated hours assigned into this week.
    pub hours: f64,
    /// Resolved weekly capacity (configured daily capacity times five,
    /// or the default when none is configured).
    pub capacity_hours: f64,
    /// `round(hours / capacity * 100)`. `None` when the resolved capacity
    /// is not positive; such a cell is indeterminate and carries no band
    /// either.
    pub percentage: Option<i64>,
    /// Orders contributing to `hours`.
    pub order_ids: Vec<String>,
}

/// Visual classification of a load percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadBand {
    /// Load is within capacity.
    Normal,
    /// Load is above 85% of capacity.
    NearCapacity,
    /// Load exceeds capacity.
    OverCapacity,
}

impl LoadBand {
    /// Classifies a rounded percentage.
    pub fn classify(percentage: i64) -> Self {
        if percentage > 100 {
            LoadBand::OverCapacity
        } else if percentage > 85 {
            LoadBand::NearCapacity
        } else {
            LoadBand::Normal
        }
    }
}

impl WeeklyLoad {
    /// The cell's classification band, absent for indeterminate cells.
    pub fn band(&self) -> Option<LoadBand> {
        self.percentage.map(LoadBand::classify)
    }

    /// Whether the cell exceeds its capacity.
    pub fn is_overloaded(&self) -> bool {
        self.band() == Some(LoadBand::OverCapacity)
    }

    /// Number of contributing orders.
    pub fn order_count(&self) -> usize {
        self.order_ids.len()
    }
}
