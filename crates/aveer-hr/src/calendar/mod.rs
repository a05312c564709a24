//! Calendar scheduling support: stored events and their recurrence rules.

pub mod event;
pub mod recurrence;

pub use event::CalendarEvent;
