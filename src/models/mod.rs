//! Shop-floor domain models.
//!
//! Provides the persistent data types the board works over (work orders
//! and the resources they are assigned to) plus the derived weekly load
//! cell. Orders and resources mirror the document store's wire shape
//! (camelCase fields, sparse documents); [`WeeklyLoad`] is computed on
//! demand and never stored.
//!
//! # Lifecycle
//!
//! | Type | Origin | Mutated by |
//! |------|--------|------------|
//! | [`WorkOrder`] | document store | reassignment transactions |
//! | [`Resource`] | resource directory | never (read-only here) |
//! | [`WeeklyLoad`] | derived | recomputed per read |

mod load;
mod order;
mod resource;

pub use load::{LoadBand, WeeklyLoad};
pub use order::{OrderPriority, OrderStatus, WorkOrder};
pub use resource::{Resource, ResourceKind};
