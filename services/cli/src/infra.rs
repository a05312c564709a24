use aveer_hr::appraisal::ScoreWeights;
use aveer_hr::calendar::recurrence::{Frequency, WeekdayCode};
use aveer_hr::config::AppConfig;
use chrono::NaiveDate;
use tracing::warn;

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_frequency(raw: &str) -> Result<Frequency, String> {
    Frequency::from_token(raw)
        .ok_or_else(|| format!("'{raw}' is not one of daily, weekly, monthly, yearly"))
}

pub(crate) fn parse_weekday(raw: &str) -> Result<WeekdayCode, String> {
    WeekdayCode::from_code(raw)
        .ok_or_else(|| format!("'{raw}' is not a weekday code (SU, MO, TU, WE, TH, FR, SA)"))
}

/// Command-line overrides take precedence over the configured weights. The
/// scorer applies whatever split it is given, so an unbalanced split is
/// logged rather than rejected.
pub(crate) fn resolve_weights(
    config: &AppConfig,
    employee_override: Option<f64>,
    manager_override: Option<f64>,
) -> ScoreWeights {
    let configured = config.appraisal.weights;
    let weights = ScoreWeights::new(
        employee_override.unwrap_or(configured.employee_percent),
        manager_override.unwrap_or(configured.manager_percent),
    );

    if !weights.is_balanced() {
        warn!(
            employee = weights.employee_percent,
            manager = weights.manager_percent,
            "appraisal weights do not sum to 100"
        );
    }

    weights
}
