//! RRULE encoding, decoding, and plain-English rendering.
//!
//! The platform persists a recurrence as a single RFC 5545 `RRULE` string on
//! the owning calendar event. This module converts between that string and
//! [`RecurrenceRule`], and renders the string as a sentence for schedule
//! summaries. Both directions are pure and permissive; nothing here owns
//! storage or validates beyond what the conversions need.

mod codec;
mod describe;
mod rule;

pub use codec::{decode_recurrence, encode_recurrence};
pub use describe::describe_recurrence;
pub use rule::{Frequency, OneOrMany, RecurrenceRule, WeekdayCode};
