use std::env;
use std::fmt;

use crate::appraisal::ScoreWeights;

/// Distinguishes runtime behavior for different stages of the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration shared by every binary surface.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub appraisal: AppraisalConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let defaults = ScoreWeights::default();
        let employee_percent = weight_var("APPRAISAL_EMPLOYEE_WEIGHT", defaults.employee_percent)?;
        let manager_percent = weight_var("APPRAISAL_MANAGER_WEIGHT", defaults.manager_percent)?;

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            appraisal: AppraisalConfig {
                weights: ScoreWeights::new(employee_percent, manager_percent),
            },
        })
    }
}

fn weight_var(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::InvalidWeight { name }),
        Err(_) => Ok(default),
    }
}

/// Tracing verbosity controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Review-cycle scoring settings, sourced from the organization's settings.
#[derive(Debug, Clone)]
pub struct AppraisalConfig {
    pub weights: ScoreWeights,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidWeight { name: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidWeight { name } => {
                write!(f, "{name} must be a number of percent points")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APPRAISAL_EMPLOYEE_WEIGHT");
        env::remove_var("APPRAISAL_MANAGER_WEIGHT");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.appraisal.weights, ScoreWeights::default());
    }

    #[test]
    fn load_reads_weight_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        env::set_var("APPRAISAL_EMPLOYEE_WEIGHT", "40");
        env::set_var("APPRAISAL_MANAGER_WEIGHT", "60");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.appraisal.weights, ScoreWeights::new(40.0, 60.0));
    }

    #[test]
    fn load_rejects_unparseable_weights() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APPRAISAL_EMPLOYEE_WEIGHT", "heavy");
        let error = AppConfig::load().expect_err("expected invalid weight");
        reset_env();

        match error {
            ConfigError::InvalidWeight { name } => {
                assert_eq!(name, "APPRAISAL_EMPLOYEE_WEIGHT");
            }
        }
    }
}
