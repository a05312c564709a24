use crate::demo::{run_demo, DemoArgs};
use crate::infra;
use aveer_hr::appraisal::{
    calculate_appraisal_score, AppraisalScoreInput, ScoreSheet, ScoreSheetImporter,
};
use aveer_hr::calendar::recurrence::{
    decode_recurrence, describe_recurrence, encode_recurrence, Frequency, RecurrenceRule,
    WeekdayCode,
};
use aveer_hr::config::AppConfig;
use aveer_hr::error::AppError;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Aveer HR Toolkit",
    about = "Inspect stored schedules and score appraisal cycles from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Inspect and build stored schedule rules
    Schedule {
        #[command(subcommand)]
        command: ScheduleCommand,
    },
    /// Score performance review cycles
    Appraisal {
        #[command(subcommand)]
        command: AppraisalCommand,
    },
    /// Run an end-to-end demo covering schedules and appraisal scoring (default command)
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ScheduleCommand {
    /// Render a stored rule as an English schedule sentence
    Describe(RuleArgs),
    /// Decode a stored rule into its structured JSON form
    Decode(RuleArgs),
    /// Build a rule from its parts and print the stored form
    Encode(EncodeArgs),
}

#[derive(Subcommand, Debug)]
enum AppraisalCommand {
    /// Score one review cycle from a CSV score sheet
    Score(ScoreArgs),
}

#[derive(Args, Debug)]
pub(crate) struct RuleArgs {
    /// Stored rule text, with or without the RRULE: prefix
    #[arg(long)]
    pub(crate) rule: String,
}

#[derive(Args, Debug)]
pub(crate) struct EncodeArgs {
    /// Repeat cadence: daily, weekly, monthly, or yearly
    #[arg(long, value_parser = infra::parse_frequency)]
    pub(crate) freq: Frequency,
    /// Periods between occurrences (1 = every period)
    #[arg(long, default_value_t = 1)]
    pub(crate) interval: u32,
    /// Stop after this many occurrences
    #[arg(long)]
    pub(crate) count: Option<u32>,
    /// Last occurrence date (YYYY-MM-DD)
    #[arg(long, value_parser = infra::parse_date)]
    pub(crate) until: Option<NaiveDate>,
    /// Weekday codes, comma separated (for example MO,WE,FR)
    #[arg(long, value_delimiter = ',', value_parser = infra::parse_weekday)]
    pub(crate) weekdays: Vec<WeekdayCode>,
    /// Ordinal for the weekday list: 1 = first, -1 = last
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) position: Option<i32>,
    /// Days of the month, comma separated (negatives count from the end)
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub(crate) month_days: Vec<i32>,
    /// Months of the year, comma separated (1-12)
    #[arg(long, value_delimiter = ',')]
    pub(crate) months: Vec<i32>,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// CSV score sheet with Goal, Employee Score, and Manager Score columns
    #[arg(long)]
    pub(crate) sheet: PathBuf,
    /// Override the configured employee weight (percent)
    #[arg(long)]
    pub(crate) employee_weight: Option<f64>,
    /// Override the configured manager weight (percent)
    #[arg(long)]
    pub(crate) manager_weight: Option<f64>,
    /// Treat the self-assessment as still outstanding
    #[arg(long)]
    pub(crate) pending_self_assessment: bool,
    /// Treat the manager review as still outstanding
    #[arg(long)]
    pub(crate) pending_manager_review: bool,
}

pub(crate) fn run(config: &AppConfig) -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Schedule { command } => run_schedule(command),
        Command::Appraisal {
            command: AppraisalCommand::Score(args),
        } => run_score(args, config),
        Command::Demo(args) => run_demo(args, config),
    }
}

fn run_schedule(command: ScheduleCommand) -> Result<(), AppError> {
    match command {
        ScheduleCommand::Describe(args) => {
            let sentence = describe_recurrence(&args.rule);
            if sentence.is_empty() {
                println!("No readable schedule parts");
            } else {
                println!("{sentence}");
            }
        }
        ScheduleCommand::Decode(args) => {
            let rule = decode_recurrence(&args.rule);
            match serde_json::to_string_pretty(&rule) {
                Ok(json) => println!("{json}"),
                Err(err) => println!("Structured form unavailable: {err}"),
            }
        }
        ScheduleCommand::Encode(args) => {
            println!("{}", encode_recurrence(&build_rule(args)));
        }
    }

    Ok(())
}

fn build_rule(args: EncodeArgs) -> RecurrenceRule {
    let EncodeArgs {
        freq,
        interval,
        count,
        until,
        weekdays,
        position,
        month_days,
        months,
    } = args;

    let mut rule = RecurrenceRule::new(freq).every(interval);
    if let Some(count) = count {
        rule = rule.times(count);
    }
    if let Some(until) = until {
        rule = rule.until(until);
    }
    if !weekdays.is_empty() {
        rule = rule.on_weekdays(weekdays);
    }
    if let Some(position) = position {
        rule = rule.at_position(position);
    }

    rule.on_month_days(month_days).in_months(months)
}

fn run_score(args: ScoreArgs, config: &AppConfig) -> Result<(), AppError> {
    let ScoreArgs {
        sheet,
        employee_weight,
        manager_weight,
        pending_self_assessment,
        pending_manager_review,
    } = args;

    let sheet = ScoreSheetImporter::from_path(&sheet)?;
    println!(
        "Score sheet: {} goals, {} employee ratings, {} manager ratings",
        sheet.goals.len(),
        sheet.employee.len(),
        sheet.manager.len()
    );

    let weights = infra::resolve_weights(config, employee_weight, manager_weight);
    let objective = sheet.as_objective("score-sheet", "Imported score sheet");
    let ScoreSheet {
        employee, manager, ..
    } = sheet;

    let mut input = AppraisalScoreInput::new(vec![objective])
        .with_employee_scores(employee)
        .with_manager_scores(manager)
        .with_weights(weights);
    if !pending_self_assessment {
        input = input.employee_submitted();
    }
    if !pending_manager_review {
        input = input.manager_reviewed();
    }

    println!("Review phase: {}", input.review_phase().label());
    match calculate_appraisal_score(&input) {
        Some(result) => {
            println!("{}", result.summary());
            println!(
                "Points: employee {} and manager {} of {} possible across {} goals",
                result.employee_score,
                result.manager_score,
                result.total_possible_score,
                result.total_goals
            );
        }
        None => println!("Not yet scored"),
    }

    Ok(())
}
