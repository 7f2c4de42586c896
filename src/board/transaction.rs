//! Optimistic-mutation snapshot.
//!
//! A move mutates the working collection before the store confirms the
//! write, so the pre-mutation state must outlive the attempt. Rather
//! than ad hoc copy-and-restore at the call site, the snapshot, the
//! pending patch, and the two exits are one value: apply the patch,
//! then either `commit` (drop the snapshot) or `rollback` (reinstate
//! it wholesale).

use crate::models::WorkOrder;
use crate::store::AssignmentPatch;

/// One in-flight reassignment: the captured pre-move working set plus
/// the patch being attempted.
#[derive(Debug, Clone)]
pub struct PendingTransaction {
    snapshot: Vec<WorkOrder>,
    order_id: String,
    patch: AssignmentPatch,
}

impl PendingTransaction {
    /// Captures `working` as the rollback point for patching `order_id`.
    pub fn capture(
        working: &[WorkOrder],
        order_id: impl Into<String>,
        patch: AssignmentPatch,
    ) -> Self {
        Self {
            snapshot: working.to_vec(),
            order_id: order_id.into(),
            patch,
        }
    }

    /// Order this transaction moves.
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// Patch this transaction writes.
    pub fn patch(&self) -> &AssignmentPatch {
        &self.patch
    }

    /// The captured pre-move working set.
    pub fn snapshot(&self) -> &[WorkOrder] {
        &self.snapshot
    }

    /// Applies the patch to the affected order in `working`. Orders
    /// other than the affected one are never touched.
    pub fn apply(&self, working: &mut [WorkOrder]) {
        if let Some(order) = working.iter_mut().find(|order| order.id == self.order_id) {
            order.assigned_resource_id = Some(self.patch.assigned_resource_id.clone());
            order.start = Some(self.patch.start);
            order.end = Some(self.patch.end);
            order.planned_week_start_date = Some(self.patch.planned_week_start_date);
            order.updated_at = Some(self.patch.updated_at);
        }
    }

    /// Ends the transaction keeping the applied state; the snapshot is
    /// dropped.
    pub fn commit(self) {}

    /// Ends the transaction by reinstating the captured snapshot as the
    /// whole working set.
    pub fn rollback(self, working: &mut Vec<WorkOrder>) {
        *working = self.snapshot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    fn working_set() -> Vec<WorkOrder> {
        vec![
            WorkOrder::new("WO-1").with_estimated_hours(10.0),
            WorkOrder::new("WO-2").with_assignment("M1", monday()),
        ]
    }

    fn patch() -> AssignmentPatch {
        let start = monday().and_hms_opt(8, 0, 0).unwrap().and_utc();
        AssignmentPatch::new("M2", start, start + chrono::Duration::hours(10), monday())
    }

    #[test]
    fn test_apply_touches_only_the_affected_order() {
        let mut working = working_set();
        let tx = PendingTransaction::capture(&working, "WO-1", patch());

        tx.apply(&mut working);

        assert_eq!(working[0].assigned_resource_id.as_deref(), Some("M2"));
        assert_eq!(working[0].planned_week_start_date, Some(monday()));
        assert!(working[0].updated_at.is_some());
        assert_eq!(working[1], working_set()[1]);
    }

    #[test]
    fn test_rollback_restores_the_exact_snapshot() {
        let mut working = working_set();
        let before = working.clone();
        let tx = PendingTransaction::capture(&working, "WO-1", patch());

        tx.apply(&mut working);
        assert_ne!(working, before);

        tx.rollback(&mut working);
        assert_eq!(working, before);
    }

    #[test]
    fn test_commit_keeps_applied_state() {
        let mut working = working_set();
        let tx = PendingTransaction::capture(&working, "WO-1", patch());

        tx.apply(&mut working);
        let applied = working.clone();
        tx.commit();

        assert_eq!(working, applied);
    }

    #[test]
    fn test_apply_with_vanished_order_is_a_no_op() {
        let mut working = working_set();
        let before = working.clone();
        let tx = PendingTransaction::capture(&working, "WO-404", patch());

        tx.apply(&mut working);
        assert_eq!(working, before);
    }
}
