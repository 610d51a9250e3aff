//! Commit activity aggregation.
//!
//! Buckets push events into a fixed 30-day calendar window ending at a
//! caller-supplied reference date. Passing the reference date explicitly
//! keeps the window deterministic under test; only the route layer reads
//! the wall clock.

use chrono::{Days, NaiveDate};

use crate::models::{DailyCommits, UserEvent};

/// Number of calendar days in the activity window, reference date inclusive.
pub const WINDOW_DAYS: u64 = 30;

/// Count commits per UTC calendar day over
/// `reference_date - 29 ..= reference_date`.
///
/// Always returns exactly 30 entries in ascending date order. Events that
/// are not pushes, or that fall outside the window, are ignored — the
/// events API windowing is approximate and may return older entries.
pub fn aggregate_daily_commits(
    events: &[UserEvent],
    reference_date: NaiveDate,
) -> Vec<DailyCommits> {
    let start = reference_date - Days::new(WINDOW_DAYS - 1);

    let mut days: Vec<DailyCommits> = start
        .iter_days()
        .take(WINDOW_DAYS as usize)
        .map(|date| DailyCommits {
            date,
            label: date.format("%m-%d").to_string(),
            commits: 0,
        })
        .collect();

    for event in events {
        if !event.is_push() {
            continue;
        }
        let date = event.created_at.date_naive();
        if date < start || date > reference_date {
            continue;
        }
        let index = date.signed_duration_since(start).num_days() as usize;
        days[index].commits += event.commit_count();
    }

    days
}
