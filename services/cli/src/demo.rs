use aveer_hr::appraisal::{
    calculate_appraisal_score, AppraisalScoreInput, Goal, GoalScore, Objective,
};
use aveer_hr::calendar::recurrence::{
    decode_recurrence, describe_recurrence, encode_recurrence, Frequency, RecurrenceRule,
    WeekdayCode,
};
use aveer_hr::calendar::CalendarEvent;
use aveer_hr::config::AppConfig;
use aveer_hr::error::AppError;
use chrono::{Duration, Local, NaiveDate};
use clap::Args;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Anchor date for the sample events (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) anchor: Option<NaiveDate>,
    /// Skip the appraisal scoring portion of the demo.
    #[arg(long)]
    pub(crate) skip_appraisal: bool,
}

pub(crate) fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let DemoArgs {
        anchor,
        skip_appraisal,
    } = args;
    let anchor = anchor.unwrap_or_else(|| Local::now().date_naive());

    println!("People operations demo");
    println!("Anchor date: {anchor}");

    println!("\nTeam calendar");
    for event in sample_events(anchor) {
        println!("- {}", event.title);
        match event.rrule.as_deref() {
            Some(stored) => println!("    stored: {stored}"),
            None => println!("    stored: (none)"),
        }
        println!("    reads:  {}", event.schedule_summary());
    }

    println!("\nEditing a stored schedule");
    let stored = encode_recurrence(
        &RecurrenceRule::new(Frequency::Monthly)
            .on_weekdays(vec![WeekdayCode::Fr])
            .at_position(-1),
    );
    println!("- stored:  {stored}");

    let mut rule = decode_recurrence(&stored);
    rule.interval = 2;
    rule = rule.times(6);
    let updated = encode_recurrence(&rule);
    println!("- updated: {updated}");
    println!("- reads:   {}", describe_recurrence(&updated));
    match serde_json::to_string_pretty(&rule) {
        Ok(json) => println!("- structured form:\n{json}"),
        Err(err) => println!("- structured form unavailable: {err}"),
    }

    if skip_appraisal {
        return Ok(());
    }

    println!("\nAppraisal scoring");
    let input = sample_review_cycle(config);
    println!(
        "- weights: employee {}% / manager {}%",
        input.employee_weight_percent, input.manager_weight_percent
    );
    println!("- review phase: {}", input.review_phase().label());
    match calculate_appraisal_score(&input) {
        Some(result) => {
            println!(
                "- {} goals rated, {} possible points",
                result.total_goals, result.total_possible_score
            );
            println!("- {}", result.summary());
        }
        None => println!("- not yet scored"),
    }

    Ok(())
}

fn sample_events(anchor: NaiveDate) -> Vec<CalendarEvent> {
    let standup = CalendarEvent::new("evt-standup", "Team standup", anchor).with_recurrence(
        &RecurrenceRule::new(Frequency::Weekly).on_weekdays(vec![
            WeekdayCode::Mo,
            WeekdayCode::We,
            WeekdayCode::Fr,
        ]),
    );

    let payroll = CalendarEvent::new("evt-payroll", "Payroll cutoff", anchor).with_recurrence(
        &RecurrenceRule::new(Frequency::Monthly)
            .on_weekdays(vec![WeekdayCode::Fr])
            .at_position(-1),
    );

    let planning = CalendarEvent::new("evt-planning", "Quarterly planning", anchor)
        .with_recurrence(
            &RecurrenceRule::new(Frequency::Monthly)
                .every(3)
                .until(anchor + Duration::days(365)),
        );

    let onboarding = CalendarEvent::new("evt-onboarding", "New hire onboarding", anchor);

    vec![standup, payroll, planning, onboarding]
}

fn sample_review_cycle(config: &AppConfig) -> AppraisalScoreInput {
    let objectives = vec![
        Objective::new("obj-delivery", "Ship the quarterly roadmap").with_goals(vec![
            Goal::new("g-01", "Close out the migration"),
            Goal::new("g-02", "Cut p99 latency in half"),
            Goal::new("g-03", "Document the rollout runbook"),
        ]),
        Objective::new("obj-growth", "Grow the team").with_goals(vec![
            Goal::new("g-04", "Mentor two new hires"),
            Goal::new("g-05", "Run the hiring loop"),
        ]),
    ];

    AppraisalScoreInput::new(objectives)
        .with_employee_scores(vec![
            GoalScore::new("g-01", 4.0),
            GoalScore::new("g-02", 4.0),
            GoalScore::new("g-03", 4.0),
            GoalScore::new("g-04", 4.0),
            GoalScore::new("g-05", 4.0),
        ])
        .with_manager_scores(vec![
            GoalScore::new("g-01", 4.5),
            GoalScore::new("g-02", 4.5),
            GoalScore::new("g-03", 4.5),
            GoalScore::new("g-04", 4.5),
            GoalScore::new("g-05", 4.0),
        ])
        .with_weights(config.appraisal.weights)
        .employee_submitted()
        .manager_reviewed()
}
