//! Resource capacity scheduling for a production-floor order tracker.
//!
//! Converts work-order metadata into time estimates, places them on a
//! business-day calendar, aggregates them into per-resource weekly load,
//! and moves assignments through an optimistic, rollback-capable update
//! protocol. The surrounding tracker (CRUD screens, charts, the hosted
//! document store) consumes this crate; nothing here renders a view or
//! owns a database.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `WorkOrder`, `Resource`, `WeeklyLoad`
//! - **`estimate`**: `DurationEstimator` — work-hours from whatever fields
//!   an order carries
//! - **`calendar`**: `WorkCalendar` — business-day walk to an end instant,
//!   plus ISO-week helpers
//! - **`window`**: `CalendarWindow` — the ordered dates one board render covers
//! - **`aggregate`**: `weekly_load` and `LoadMatrix` — assigned hours vs.
//!   capacity per resource and week
//! - **`audit`**: integrity checks over the fetched working set
//! - **`store`**: traits over the document store, the five-field
//!   `AssignmentPatch`, an in-memory reference implementation
//! - **`board`**: `ScheduleBoard` — the working copies and the move protocol
//! - **`error`**: `ValidationError`, `PersistError`
//!
//! # Data flow
//!
//! Raw order records feed the estimator; the work calendar turns estimates
//! into end instants and week keys; the aggregator folds assigned orders
//! into per-week load cells. A drag becomes a `MoveRequest`, and
//! `ScheduleBoard::move_order` recomputes dates, applies the change
//! optimistically, and persists it through the store seam, rolling back
//! on failure.

pub mod aggregate;
pub mod audit;
pub mod board;
pub mod calendar;
pub mod error;
pub mod estimate;
pub mod models;
pub mod store;
pub mod window;
