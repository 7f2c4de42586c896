//! Resource model.
//!
//! Resources are whoever or whatever works an order: people, machines,
//! tools, floor areas. Each carries an optional daily capacity in hours;
//! the weekly load aggregator multiplies it out to a week.
//!
//! Resources are created and deactivated by the resource-management
//! screens; the scheduling core only ever reads active ones.

use serde::{Deserialize, Serialize};

use crate::aggregate::WORKDAYS_PER_WEEK;

/// A resource that work orders can be assigned to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Unique resource identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Resource classification.
    pub kind: ResourceKind,
    /// Available hours per working day. `None` = not configured.
    #[serde(default)]
    pub capacity: Option<f64>,
    /// Whether the resource is available for assignment.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Resource classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    /// A person (operator, fitter, welder).
    Person,
    /// A machine (CNC, press, oven).
    Machine,
    /// A tool or fixture.
    Tool,
    /// A floor area (assembly bay, paint booth).
    Area,
}

impl Resource {
    /// Creates an active resource of the given kind.
    pub fn new(id: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            kind,
            capacity: None,
            active: true,
        }
    }

    /// Creates a person resource.
    pub fn person(id: impl Into<String>) -> Self {
        Self::new(id, ResourceKind::Person)
    }

    /// Creates a machine resource.
    pub fn machine(id: impl Into<String>) -> Self {
        Self::new(id, ResourceKind::Machine)
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the daily capacity in hours.
    pub fn with_capacity(mut self, hours_per_day: f64) -> Self {
        self.capacity = Some(hours_per_day);
        self
    }

    /// Marks the resource inactive.
    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }

    /// Configured weekly capacity: daily capacity times five workdays.
    ///
    /// `None` when no daily capacity is configured; the aggregator then
    /// falls back to [`crate::aggregate::DEFAULT_WEEKLY_CAPACITY`].
    pub fn weekly_capacity(&self) -> Option<f64> {
        self.capacity.map(|c| c * WORKDAYS_PER_WEEK)
    }
}
