//! Calendar window construction for the board.
//!
//! A [`CalendarWindow`] is the ordered list of dates one board render
//! covers: seven days from the ISO Monday of the anchor for a week view,
//! or every day of the anchor's calendar month. Two weekend treatments
//! exist side by side in the trackers this feeds, so the policy is an
//! explicit, named parameter rather than an implicit variant:
//! [`WeekendPolicy::IncludeWeekends`] is the canonical board behavior,
//! [`WeekendPolicy::WeekdaysOnly`] is the condensed five-column rendering.
//!
//! Pure construction; building the same window twice yields the same value.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{is_weekday, week_start};

/// Granularity of a board render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardView {
    /// Seven days from the ISO Monday of the anchor.
    Week,
    /// Every day of the calendar month containing the anchor.
    Month,
}

/// How a window treats Saturdays and Sundays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeekendPolicy {
    /// Weekend cells are rendered (canonical board behavior).
    #[default]
    IncludeWeekends,
    /// Weekend cells are dropped, leaving Monday through Friday.
    WeekdaysOnly,
}

/// Ordered dates for one board render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarWindow {
    /// Date the window was built around.
    pub anchor: NaiveDate,
    /// Granularity the window was built at.
    pub view: BoardView,
    /// Weekend treatment the window was built with.
    pub policy: WeekendPolicy,
    /// The dates, ascending.
    pub days: Vec<NaiveDate>,
}

impl CalendarWindow {
    /// Builds the window for `anchor` at the given granularity and policy.
    pub fn build(anchor: NaiveDate, view: BoardView, policy: WeekendPolicy) -> Self {
        let mut days = match view {
            BoardView::Week => {
                let monday = week_start(anchor);
                (0..7)
                    .filter_map(|offset| monday.checked_add_days(Days::new(offset)))
                    .collect()
            }
            BoardView::Month => {
                let first = anchor.with_day(1).unwrap_or(anchor);
                let mut days = Vec::with_capacity(31);
                let mut day = first;
                while day.month() == first.month() && day.year() == first.year() {
                    days.push(day);
                    day = match day.succ_opt() {
                        Some(next) => next,
                        None => break,
                    };
                }
                days
            }
        };
        if policy == WeekendPolicy::WeekdaysOnly {
            days.retain(|day| is_weekday(*day));
        }
        Self {
            anchor,
            view,
            policy,
            days,
        }
    }

    /// Seven-day week window around `anchor`.
    pub fn week(anchor: NaiveDate) -> Self {
        Self::build(anchor, BoardView::Week, WeekendPolicy::IncludeWeekends)
    }

    /// Five-weekday week window around `anchor`.
    pub fn work_week(anchor: NaiveDate) -> Self {
        Self::build(anchor, BoardView::Week, WeekendPolicy::WeekdaysOnly)
    }

    /// Full-month window around `anchor`.
    pub fn month(anchor: NaiveDate) -> Self {
        Self::build(anchor, BoardView::Month, WeekendPolicy::IncludeWeekends)
    }

    /// ISO-week Mondays covering the window, ascending, deduplicated.
    ///
    /// This is the set of week keys the load aggregator produces cells
    /// for; a month window yields the Mondays of every week it touches,
    /// including a leading Monday from the previous month.
    pub fn week_starts(&self) -> Vec<NaiveDate> {
        let mut starts: Vec<NaiveDate> = self.days.iter().map(|day| week_start(*day)).collect();
        starts.dedup();
        starts
    }

    /// Whether `date` is one of the window's cells.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days.contains(&date)
    }

    /// Number of dates in the window.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether the window holds no dates.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
