//! Services module
//!
//! Business logic services that coordinate between commands and repository.

pub mod medications;
pub mod reminders;
pub mod tasks;

pub use medications::MedicationsService;
pub use reminders::RemindersService;
pub use tasks::TasksService;
