use serde::{Deserialize, Serialize};

/// A single measurable goal inside an appraisal objective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub title: String,
}

impl Goal {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// A review-cycle objective grouping one or more goals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub id: String,
    pub title: String,
    pub goals: Vec<Goal>,
}

impl Objective {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            goals: Vec::new(),
        }
    }

    pub fn with_goals(mut self, goals: Vec<Goal>) -> Self {
        self.goals = goals;
        self
    }
}

/// Raw points one party assigned to one goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalScore {
    pub goal_id: String,
    pub score: f64,
}

impl GoalScore {
    pub fn new(goal_id: impl Into<String>, score: f64) -> Self {
        Self {
            goal_id: goal_id.into(),
            score,
        }
    }
}

/// Where a review cycle stands relative to its two sign-off gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewPhase {
    AwaitingSelfAssessment,
    AwaitingManagerReview,
    Complete,
}

impl ReviewPhase {
    pub fn from_flags(is_employee_submitted: bool, is_manager_reviewed: bool) -> Self {
        match (is_employee_submitted, is_manager_reviewed) {
            (false, _) => ReviewPhase::AwaitingSelfAssessment,
            (true, false) => ReviewPhase::AwaitingManagerReview,
            (true, true) => ReviewPhase::Complete,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ReviewPhase::AwaitingSelfAssessment => "awaiting_self_assessment",
            ReviewPhase::AwaitingManagerReview => "awaiting_manager_review",
            ReviewPhase::Complete => "complete",
        }
    }
}
