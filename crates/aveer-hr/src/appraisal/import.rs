use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use super::domain::{Goal, GoalScore, Objective};

/// Why a score-sheet import failed outright. Row-level problems (blank
/// cells, unparseable numbers) are skipped, not errors.
#[derive(Debug, Error)]
pub enum ScoreImportError {
    #[error("failed to read score sheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid score sheet CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Goal listing and per-party scores recovered from a score-sheet export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreSheet {
    /// Distinct goal identifiers in row order, scored or not.
    pub goals: Vec<String>,
    pub employee: Vec<GoalScore>,
    pub manager: Vec<GoalScore>,
}

impl ScoreSheet {
    /// Wraps the sheet's goal listing in a single objective for scoring.
    pub fn as_objective(&self, id: &str, title: &str) -> Objective {
        let goals = self
            .goals
            .iter()
            .map(|goal_id| Goal::new(goal_id.clone(), goal_id.clone()))
            .collect();
        Objective::new(id, title).with_goals(goals)
    }
}

/// Reads `Goal,Employee Score,Manager Score` exports from the review tooling.
pub struct ScoreSheetImporter;

impl ScoreSheetImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ScoreSheet, ScoreImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ScoreSheet, ScoreImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut sheet = ScoreSheet::default();
        let mut seen_goals: HashSet<String> = HashSet::new();
        let mut scored_by_employee: HashSet<String> = HashSet::new();
        let mut scored_by_manager: HashSet<String> = HashSet::new();

        for record in csv_reader.deserialize::<ScoreRow>() {
            let row = record?;
            let goal_id = row.goal.trim().to_string();
            if goal_id.is_empty() {
                continue;
            }

            if seen_goals.insert(goal_id.clone()) {
                sheet.goals.push(goal_id.clone());
            }

            // The first row carrying a value wins per goal and column.
            if let Some(score) = row.employee_score() {
                if scored_by_employee.insert(goal_id.clone()) {
                    sheet.employee.push(GoalScore::new(goal_id.clone(), score));
                }
            }

            if let Some(score) = row.manager_score() {
                if scored_by_manager.insert(goal_id.clone()) {
                    sheet.manager.push(GoalScore::new(goal_id, score));
                }
            }
        }

        Ok(sheet)
    }
}

#[derive(Debug, Deserialize)]
struct ScoreRow {
    #[serde(rename = "Goal")]
    goal: String,
    #[serde(
        rename = "Employee Score",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    employee: Option<String>,
    #[serde(
        rename = "Manager Score",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    manager: Option<String>,
}

impl ScoreRow {
    fn employee_score(&self) -> Option<f64> {
        self.employee.as_deref().and_then(parse_score)
    }

    fn manager_score(&self) -> Option<f64> {
        self.manager.as_deref().and_then(parse_score)
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_score(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reader_collects_goals_and_both_score_columns() {
        let csv = "Goal,Employee Score,Manager Score\n\
g-01,4,4.5\n\
g-02,3.5,4\n";
        let sheet = ScoreSheetImporter::from_reader(Cursor::new(csv)).expect("sheet parses");

        assert_eq!(sheet.goals, vec!["g-01".to_string(), "g-02".to_string()]);
        assert_eq!(
            sheet.employee,
            vec![GoalScore::new("g-01", 4.0), GoalScore::new("g-02", 3.5)]
        );
        assert_eq!(
            sheet.manager,
            vec![GoalScore::new("g-01", 4.5), GoalScore::new("g-02", 4.0)]
        );
    }

    #[test]
    fn blank_cells_leave_goals_unscored_but_counted() {
        let csv = "Goal,Employee Score,Manager Score\n\
g-01,4,\n\
g-02,,\n";
        let sheet = ScoreSheetImporter::from_reader(Cursor::new(csv)).expect("sheet parses");

        assert_eq!(sheet.goals.len(), 2);
        assert_eq!(sheet.employee, vec![GoalScore::new("g-01", 4.0)]);
        assert!(sheet.manager.is_empty());
    }

    #[test]
    fn unparseable_scores_are_skipped() {
        let csv = "Goal,Employee Score,Manager Score\n\
g-01,great,4\n";
        let sheet = ScoreSheetImporter::from_reader(Cursor::new(csv)).expect("sheet parses");

        assert!(sheet.employee.is_empty());
        assert_eq!(sheet.manager, vec![GoalScore::new("g-01", 4.0)]);
    }

    #[test]
    fn first_scored_row_wins_per_goal_and_column() {
        let csv = "Goal,Employee Score,Manager Score\n\
g-01,,3\n\
g-01,4,5\n";
        let sheet = ScoreSheetImporter::from_reader(Cursor::new(csv)).expect("sheet parses");

        assert_eq!(sheet.goals, vec!["g-01".to_string()]);
        assert_eq!(sheet.employee, vec![GoalScore::new("g-01", 4.0)]);
        assert_eq!(sheet.manager, vec![GoalScore::new("g-01", 3.0)]);
    }

    #[test]
    fn rows_without_a_goal_id_are_dropped() {
        let csv = "Goal,Employee Score,Manager Score\n\
,4,4\n\
g-01,2,2\n";
        let sheet = ScoreSheetImporter::from_reader(Cursor::new(csv)).expect("sheet parses");

        assert_eq!(sheet.goals, vec!["g-01".to_string()]);
    }

    #[test]
    fn sheet_wraps_into_a_single_objective() {
        let csv = "Goal,Employee Score,Manager Score\n\
g-01,4,4\n\
g-02,,\n";
        let sheet = ScoreSheetImporter::from_reader(Cursor::new(csv)).expect("sheet parses");
        let objective = sheet.as_objective("sheet", "Imported score sheet");

        assert_eq!(objective.goals.len(), 2);
        assert_eq!(objective.goals[0].id, "g-01");
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = ScoreSheetImporter::from_path("./does-not-exist.csv")
            .expect_err("expected io error");

        match error {
            ScoreImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
