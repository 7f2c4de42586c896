//! Integrity checks for the fetched working set.
//!
//! The document store enforces no relational integrity, so the board
//! audits what it fetched before trusting it. Detects:
//! - Duplicate IDs
//! - Assignments to unknown or inactive resources
//! - Orders that end before they start
//! - Week keys that drifted from the order's start date
//!
//! Issues are reported, never repaired: the store owns the documents and
//! the out-of-scope CRUD screens own the fixes.

use std::collections::{HashMap, HashSet};

use crate::calendar::week_start;
use crate::models::{Resource, WorkOrder};

/// Audit result.
pub type AuditResult = Result<(), Vec<AuditIssue>>;

/// An integrity issue in the working set.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditIssue {
    /// Issue category.
    pub kind: AuditIssueKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of working-set issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditIssueKind {
    /// Two documents share the same ID.
    DuplicateId,
    /// An order is assigned to a resource that doesn't exist.
    UnknownResource,
    /// An order is assigned to a deactivated resource.
    InactiveResource,
    /// An order's end instant precedes its start.
    InvertedDates,
    /// An assigned order's week key is not the ISO Monday of its start.
    WeekKeyDrift,
}

impl AuditIssue {
    fn new(kind: AuditIssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Audits a fetched working set.
///
/// Checks:
/// 1. No duplicate order IDs
/// 2. No duplicate resource IDs
/// 3. All assignments point to existing, active resources
/// 4. `end >= start` wherever both are present
/// 5. Assigned orders carry the ISO-week Monday of their start date
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(issues)` with all detected issues.
pub fn audit_working_set(orders: &[WorkOrder], resources: &[Resource]) -> AuditResult {
    let mut issues = Vec::new();

    let mut resource_active: HashMap<&str, bool> = HashMap::new();
    for resource in resources {
        if resource_active
            .insert(resource.id.as_str(), resource.active)
            .is_some()
        {
            issues.push(AuditIssue::new(
                AuditIssueKind::DuplicateId,
                format!("Duplicate resource ID: {}", resource.id),
            ));
        }
    }

    let mut order_ids = HashSet::new();
    for order in orders {
        if !order_ids.insert(order.id.as_str()) {
            issues.push(AuditIssue::new(
                AuditIssueKind::DuplicateId,
                format!("Duplicate order ID: {}", order.id),
            ));
        }

        if let Some(resource_id) = order.assigned_resource_id.as_deref() {
            match resource_active.get(resource_id) {
                None => issues.push(AuditIssue::new(
                    AuditIssueKind::UnknownResource,
                    format!(
                        "Order '{}' is assigned to unknown resource '{resource_id}'",
                        order.id
                    ),
                )),
                Some(false) => issues.push(AuditIssue::new(
                    AuditIssueKind::InactiveResource,
                    format!(
                        "Order '{}' is assigned to inactive resource '{resource_id}'",
                        order.id
                    ),
                )),
                Some(true) => {}
            }
        }

        if let (Some(start), Some(end)) = (order.start, order.end) {
            if end < start {
                issues.push(AuditIssue::new(
                    AuditIssueKind::InvertedDates,
                    format!("Order '{}' ends before it starts", order.id),
                ));
            }
        }

        if order.assigned_resource_id.is_some() {
            if let Some(start) = order.start {
                let expected = week_start(start.date_naive());
                if order.planned_week_start_date != Some(expected) {
                    issues.push(AuditIssue::new(
                        AuditIssueKind::WeekKeyDrift,
                        format!(
                            "Order '{}' carries week key {:?} but starts in the week of {expected}",
                            order.id, order.planned_week_start_date
                        ),
                    ));
                }
            }
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}
