//! Application configuration constants
//!
//! Central location for the scheduling rules, polling cadence and
//! default values used throughout the application.

// ===== Background Loop =====

/// Period of the background tick that drives the daily-reset sweep and
/// the reminder check. The day boundary is detected lazily, so a reset
/// can lag real midnight by up to this interval.
pub const TICK_INTERVAL_SECS: u64 = 60;

// ===== Dose Scheduling =====

/// How early a scheduled dose becomes takeable, in minutes.
/// A slot at 09:00 is takeable from 08:00 onwards.
pub const EARLY_DOSE_WINDOW_MINS: i32 = 60;

/// First synthesized dose slot when a medication has no reminder times.
pub const FALLBACK_FIRST_DOSE_HOUR: u32 = 8;

/// Spacing between synthesized dose slots, in hours.
pub const FALLBACK_DOSE_SPACING_HOURS: u32 = 4;

// ===== Medication Defaults =====

/// Doses per day when none is specified.
pub const DEFAULT_FREQUENCY: i64 = 1;

/// Low-stock alert threshold when none is specified.
pub const DEFAULT_LIMIT_ALERT: i64 = 5;

// ===== Time Formats =====

/// Calendar dates in stats and history entries. Derived from UTC,
/// matching the rows written by earlier clients.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reminder times of day. Zero-padded 24-hour wall clock; the reminder
/// check matches these against the *local* clock.
pub const TIME_FORMAT: &str = "%H:%M";
