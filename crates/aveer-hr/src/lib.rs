//! Domain engine for the aveer people operations platform.
//!
//! The crate hosts the pure logic shared by every surface: recurrence rule
//! encoding, decoding, and schedule prose under [`calendar`], review-cycle
//! scoring and score-sheet import under [`appraisal`], plus the
//! configuration, telemetry, and error plumbing the binaries wire together.

pub mod appraisal;
pub mod calendar;
pub mod config;
pub mod error;
pub mod telemetry;
