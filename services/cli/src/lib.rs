mod cli;
mod demo;
mod infra;

use aveer_hr::config::AppConfig;
use aveer_hr::error::AppError;
use aveer_hr::telemetry;
use tracing::debug;

pub fn run() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(?config.environment, "configuration loaded");

    cli::run(&config)
}
