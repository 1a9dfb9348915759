//! Adherence state transitions
//!
//! The two permitted mutations of a medication record, as
//! copy-on-write functions: taking a dose and the daily counter reset.
//! Neither can fail on a valid record; the caller persists the
//! returned value.

use super::schedule::today_string;
use crate::database::{DoseEvent, Medication};
use chrono::{DateTime, Utc};

/// Action recorded in history for a take event.
pub const ACTION_TAKEN: &str = "taken";

/// Apply a dose take at `now`.
///
/// Inventory decrements but floors at zero (a take with empty
/// inventory still logs, silently). History gets an append-only
/// entry, the taken counter increments, and `stats.date` is stamped
/// with today so a take on a stale record also performs the implicit
/// day reset. There is no hard cap at `frequency`; callers gate with
/// `schedule::is_takeable` where policy demands it.
pub fn take_dose(med: &Medication, now: DateTime<Utc>) -> Medication {
    let today = today_string(now);

    let mut updated = med.clone();
    updated.inventory = if med.inventory > 0 {
        med.inventory - 1
    } else {
        0
    };
    updated.history.0.push(DoseEvent {
        timestamp: now,
        action: ACTION_TAKEN.to_string(),
        date: today.clone(),
    });
    updated.stats.taken_count += 1;
    updated.stats.date = today;
    updated.updated_at = now;

    updated
}

/// Roll the per-day counters over to `today` if they are stale.
///
/// Returns the updated record, or `None` when the counters already
/// belong to `today` (the caller's "changed" flag). Inventory and
/// history are lifetime-cumulative and are never touched here.
pub fn reset_day(med: &Medication, today: &str) -> Option<Medication> {
    if !super::schedule::is_day_stale(med, today) {
        return None;
    }

    let mut updated = med.clone();
    updated.stats.taken_count = 0;
    updated.stats.skipped_count = 0;
    updated.stats.date = today.to_string();

    Some(updated)
}
