//! Performance appraisal scoring for review cycles.
//!
//! A cycle pairs an employee self-assessment with a manager review across a
//! set of objectives and goals. Scoring itself is pure and stateless; review
//! workflows and persistence stay with the callers.

pub mod domain;
pub mod import;
pub mod scoring;

pub use domain::{Goal, GoalScore, Objective, ReviewPhase};
pub use import::{ScoreImportError, ScoreSheet, ScoreSheetImporter};
pub use scoring::{
    calculate_appraisal_score, AppraisalScoreInput, AppraisalScoreResult, ScoreWeights,
};
