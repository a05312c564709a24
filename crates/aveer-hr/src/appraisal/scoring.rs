use serde::{Deserialize, Serialize};

use super::domain::{GoalScore, Objective, ReviewPhase};

/// Fixed per-goal rating ceiling. Every goal is rated out of five points in
/// every organization; this is a domain constant, not a setting.
const MAX_GOAL_RATING: f64 = 5.0;

fn default_employee_weight() -> f64 {
    30.0
}

fn default_manager_weight() -> f64 {
    70.0
}

/// Organization-configured split between self-assessment and manager review,
/// in percent points. Expected to sum to 100; the scorer does not enforce or
/// re-normalize that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub employee_percent: f64,
    pub manager_percent: f64,
}

impl ScoreWeights {
    pub fn new(employee_percent: f64, manager_percent: f64) -> Self {
        Self {
            employee_percent,
            manager_percent,
        }
    }

    pub fn sum(&self) -> f64 {
        self.employee_percent + self.manager_percent
    }

    pub fn is_balanced(&self) -> bool {
        (self.sum() - 100.0).abs() < f64::EPSILON
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            employee_percent: default_employee_weight(),
            manager_percent: default_manager_weight(),
        }
    }
}

/// Everything the scorer reads for one employee's review cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppraisalScoreInput {
    pub objectives: Vec<Objective>,
    #[serde(default)]
    pub employee_goal_scores: Vec<GoalScore>,
    #[serde(default)]
    pub manager_goal_scores: Vec<GoalScore>,
    pub is_employee_submitted: bool,
    pub is_manager_reviewed: bool,
    #[serde(default = "default_employee_weight")]
    pub employee_weight_percent: f64,
    #[serde(default = "default_manager_weight")]
    pub manager_weight_percent: f64,
}

impl AppraisalScoreInput {
    pub fn new(objectives: Vec<Objective>) -> Self {
        Self {
            objectives,
            employee_goal_scores: Vec::new(),
            manager_goal_scores: Vec::new(),
            is_employee_submitted: false,
            is_manager_reviewed: false,
            employee_weight_percent: default_employee_weight(),
            manager_weight_percent: default_manager_weight(),
        }
    }

    pub fn with_employee_scores(mut self, scores: Vec<GoalScore>) -> Self {
        self.employee_goal_scores = scores;
        self
    }

    pub fn with_manager_scores(mut self, scores: Vec<GoalScore>) -> Self {
        self.manager_goal_scores = scores;
        self
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.employee_weight_percent = weights.employee_percent;
        self.manager_weight_percent = weights.manager_percent;
        self
    }

    pub fn employee_submitted(mut self) -> Self {
        self.is_employee_submitted = true;
        self
    }

    pub fn manager_reviewed(mut self) -> Self {
        self.is_manager_reviewed = true;
        self
    }

    pub fn total_goals(&self) -> usize {
        self.objectives
            .iter()
            .map(|objective| objective.goals.len())
            .sum()
    }

    pub fn review_phase(&self) -> ReviewPhase {
        ReviewPhase::from_flags(self.is_employee_submitted, self.is_manager_reviewed)
    }
}

/// Composite outcome for a completed review cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppraisalScoreResult {
    pub total_goals: usize,
    pub total_possible_score: f64,
    pub employee_score: f64,
    pub manager_score: f64,
    pub employee_score_percentage: f64,
    pub manager_score_percentage: f64,
    pub final_score: f64,
}

impl AppraisalScoreResult {
    /// One-line rendering for dashboards and logs. Rounding happens only
    /// here; the stored figures stay exact.
    pub fn summary(&self) -> String {
        format!(
            "final score {:.1} of 100 (employee {:.1}%, manager {:.1}%)",
            self.final_score, self.employee_score_percentage, self.manager_score_percentage
        )
    }
}

/// Computes the weighted composite score for one review cycle.
///
/// `None` marks a cycle that is not yet scoreable: a sign-off still
/// outstanding, or no goals to rate. Callers render that state on its own
/// branch; it is not a failure.
pub fn calculate_appraisal_score(input: &AppraisalScoreInput) -> Option<AppraisalScoreResult> {
    if !input.is_employee_submitted || !input.is_manager_reviewed {
        return None;
    }

    let total_goals = input.total_goals();
    if input.objectives.is_empty() || total_goals == 0 {
        return None;
    }

    let total_possible_score = total_goals as f64 * MAX_GOAL_RATING;
    let employee_score: f64 = input
        .employee_goal_scores
        .iter()
        .map(|entry| entry.score)
        .sum();
    let manager_score: f64 = input
        .manager_goal_scores
        .iter()
        .map(|entry| entry.score)
        .sum();

    let final_score = (employee_score / total_possible_score) * input.employee_weight_percent
        + (manager_score / total_possible_score) * input.manager_weight_percent;

    Some(AppraisalScoreResult {
        total_goals,
        total_possible_score,
        employee_score,
        manager_score,
        employee_score_percentage: employee_score / total_possible_score * 100.0,
        manager_score_percentage: manager_score / total_possible_score * 100.0,
        final_score,
    })
}
