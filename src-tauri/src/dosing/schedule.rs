//! Dose scheduling rules
//!
//! Pure, side-effect-free computation of schedule state for one
//! medication at a given instant. Doses are always consumed in slot
//! order: the Nth take of the day consumes slot N regardless of the
//! wall clock, and a slot that has passed stays open until taken.

use crate::config::{
    DATE_FORMAT, EARLY_DOSE_WINDOW_MINS, FALLBACK_DOSE_SPACING_HOURS, FALLBACK_FIRST_DOSE_HOUR,
    TIME_FORMAT,
};
use crate::database::Medication;
use chrono::{DateTime, Local, NaiveTime, Timelike, Utc};
use serde::Serialize;

/// One administration opportunity, identified by its ordinal position
/// among the day's reminder times.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoseSlot {
    pub index: usize,
    /// `HH:MM` clock time of day.
    pub time: String,
}

/// Synthesize a reminder list for a medication without configured
/// times: `frequency` slots spaced 4 hours apart starting at 08:00.
pub fn fallback_slots(frequency: i64) -> Vec<String> {
    (0..frequency.max(0) as u32)
        .map(|i| {
            format!(
                "{:02}:00",
                FALLBACK_FIRST_DOSE_HOUR + i * FALLBACK_DOSE_SPACING_HOURS
            )
        })
        .collect()
}

/// The medication's reminder times, or the synthesized fallback when
/// none are configured.
pub fn effective_slots(med: &Medication) -> Vec<String> {
    if med.reminder_times.is_empty() {
        fallback_slots(med.frequency)
    } else {
        med.reminder_times.0.clone()
    }
}

/// The slot the next take would consume: position `taken_today` in the
/// ordered list, or `None` once every listed slot is consumed.
pub fn next_slot(slots: &[String], taken_today: i64) -> Option<DoseSlot> {
    if taken_today < 0 {
        return None;
    }
    let index = taken_today as usize;
    slots.get(index).map(|time| DoseSlot {
        index,
        time: time.clone(),
    })
}

/// Whether a dose is takeable at `now`.
///
/// Exhausted (all `frequency` doses taken today) is never takeable.
/// A remaining dose with no slot constraint is always takeable; a
/// scheduled slot opens one hour early and never expires.
pub fn is_takeable(med: &Medication, now: NaiveTime) -> bool {
    let taken = med.taken_today();
    if taken >= med.frequency {
        return false;
    }

    let slots = effective_slots(med);
    match next_slot(&slots, taken) {
        None => true,
        Some(slot) => slot_is_open(&slot.time, now),
    }
}

/// Whether the slot at `slot_time` has opened: `now >= slot - 60 min`.
/// An unparseable time imposes no constraint.
pub fn slot_is_open(slot_time: &str, now: NaiveTime) -> bool {
    match parse_minutes(slot_time) {
        Some(slot_mins) => minutes_of_day(now) >= slot_mins - EARLY_DOSE_WINDOW_MINS,
        None => true,
    }
}

/// Whether the per-day counters belong to an earlier day than `today`.
/// String inequality on `YYYY-MM-DD` is the sole day-boundary signal.
pub fn is_day_stale(med: &Medication, today: &str) -> bool {
    med.stats.date != today
}

/// Today's `YYYY-MM-DD`, UTC-derived to match stored history rows.
pub fn today_string(now: DateTime<Utc>) -> String {
    now.format(DATE_FORMAT).to_string()
}

/// The current `HH:MM` on the local wall clock, for reminder matching.
pub fn current_minute(now: DateTime<Local>) -> String {
    now.format(TIME_FORMAT).to_string()
}

/// Parse `HH:MM` into minutes since midnight without range checking,
/// so synthesized late slots like `20:00` for high frequencies keep
/// their ordering.
fn parse_minutes(hhmm: &str) -> Option<i32> {
    let (h, m) = hhmm.split_once(':')?;
    let hours: i32 = h.trim().parse().ok()?;
    let mins: i32 = m.trim().parse().ok()?;
    Some(hours * 60 + mins)
}

fn minutes_of_day(t: NaiveTime) -> i32 {
    (t.hour() * 60 + t.minute()) as i32
}
