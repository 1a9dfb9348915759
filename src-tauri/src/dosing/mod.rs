//! Medication adherence core
//!
//! Pure dose-eligibility and state-transition rules:
//! - `schedule`: which slot is next and whether it is takeable now
//! - `adherence`: the take-dose and daily-reset transitions

pub mod adherence;
pub mod schedule;

pub use adherence::{reset_day, take_dose};
pub use schedule::{is_day_stale, is_takeable, next_slot, DoseSlot};
