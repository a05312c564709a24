use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use super::codec::{parse_until, split_day_token, split_parts};
use super::rule::WeekdayCode;

/// Renders a stored `RRULE` string as an English schedule sentence.
///
/// Rendering reads the raw rule parts rather than [`RecurrenceRule`], so it
/// also covers parts the structured form does not carry: WKST, BYHOUR,
/// BYMINUTE, BYSECOND, BYWEEKNO, BYYEARDAY, and the sub-daily frequency
/// tokens. Unparseable values are skipped, every clause is omitted when its
/// part is absent, and clauses always appear in the same order.
///
/// [`RecurrenceRule`]: super::rule::RecurrenceRule
pub fn describe_recurrence(rrule: &str) -> String {
    let parts: HashMap<String, String> = split_parts(rrule).into_iter().collect();
    let mut clauses: Vec<String> = Vec::new();

    let frequency_token = parts.get("FREQ").map(|value| value.to_ascii_uppercase());

    if let Some(noun) = frequency_token.as_deref().and_then(frequency_noun) {
        let interval = parts
            .get("INTERVAL")
            .and_then(|value| value.trim().parse::<u32>().ok())
            .unwrap_or(1);

        if interval > 1 {
            clauses.push(format!("Every {interval} {noun}s"));
        } else {
            clauses.push(format!("Every {noun}"));
        }
    }

    if let Some(day) = parts.get("WKST").and_then(|code| WeekdayCode::from_code(code)) {
        if day != WeekdayCode::Mo {
            clauses.push(format!("(weeks starting on {})", day.full_name()));
        }
    }

    if let Some(value) = parts.get("BYDAY") {
        let setpos = parts
            .get("BYSETPOS")
            .and_then(|raw| raw.trim().parse::<i32>().ok());

        let mut names: Vec<String> = Vec::new();
        for token in value.split(',') {
            let (prefix, code) = split_day_token(token);
            if let Some(day) = WeekdayCode::from_code(code) {
                // BYSETPOS applies to every listed day; a token's own prefix
                // only counts when no BYSETPOS is given.
                let name = match setpos.or(prefix) {
                    Some(position) => format!("{} {}", ordinal_word(position), day.full_name()),
                    None => day.full_name().to_string(),
                };
                names.push(name);
            }
        }

        if !names.is_empty() {
            let preposition = if frequency_token.as_deref() == Some("WEEKLY") {
                "on "
            } else {
                "on the "
            };
            clauses.push(format!("{preposition}{}", oxford_join(&names)));
        }
    }

    if let Some(days) = numeric_values(&parts, "BYMONTHDAY") {
        let phrases: Vec<String> = days.into_iter().map(month_day_phrase).collect();
        clauses.push(format!("on the {}", oxford_join(&phrases)));
    }

    if let Some(value) = parts.get("BYMONTH") {
        let months: Vec<String> = value
            .split(',')
            .filter_map(|item| item.trim().parse::<u32>().ok())
            .filter_map(month_name)
            .map(str::to_string)
            .collect();
        if !months.is_empty() {
            clauses.push(format!("in {}", oxford_join(&months)));
        }
    }

    if let Some(value) = parts.get("BYHOUR") {
        let hours: Vec<String> = value
            .split(',')
            .filter_map(|item| item.trim().parse::<u32>().ok())
            .map(clock_phrase)
            .collect();
        if !hours.is_empty() {
            clauses.push(format!("at {}", oxford_join(&hours)));
        }
    }

    if let Some(value) = parts.get("BYMINUTE") {
        let minutes: Vec<String> = value
            .split(',')
            .filter_map(|item| item.trim().parse::<u32>().ok())
            .map(|minute| format!("{minute} {}", pluralize("minute", minute)))
            .collect();
        if !minutes.is_empty() {
            clauses.push(format!("at {}", oxford_join(&minutes)));
        }
    }

    if let Some(value) = parts.get("BYSECOND") {
        let seconds: Vec<String> = value
            .split(',')
            .filter_map(|item| item.trim().parse::<u32>().ok())
            .map(|second| format!("{second} {}", pluralize("second", second)))
            .collect();
        if !seconds.is_empty() {
            clauses.push(format!("and {}", oxford_join(&seconds)));
        }
    }

    if let Some(weeks) = numeric_values(&parts, "BYWEEKNO") {
        let phrases: Vec<String> = weeks.into_iter().map(week_phrase).collect();
        clauses.push(format!("during {}", oxford_join(&phrases)));
    }

    if let Some(days) = numeric_values(&parts, "BYYEARDAY") {
        let phrases: Vec<String> = days.into_iter().map(year_day_phrase).collect();
        clauses.push(format!("on the {}", oxford_join(&phrases)));
    }

    if let Some(count) = parts
        .get("COUNT")
        .and_then(|value| value.trim().parse::<u32>().ok())
    {
        clauses.push(format!("for {count} {}", pluralize("time", count)));
    }

    if let Some(date) = parts.get("UNTIL").and_then(|value| parse_until(value)) {
        clauses.push(format!("until {}", long_date(date)));
    }

    clauses.join(" ")
}

fn frequency_noun(token: &str) -> Option<&'static str> {
    match token {
        "SECONDLY" => Some("second"),
        "MINUTELY" => Some("minute"),
        "HOURLY" => Some("hour"),
        "DAILY" => Some("day"),
        "WEEKLY" => Some("week"),
        "MONTHLY" => Some("month"),
        "YEARLY" => Some("year"),
        _ => None,
    }
}

fn numeric_values(parts: &HashMap<String, String>, key: &str) -> Option<Vec<i32>> {
    let values: Vec<i32> = parts
        .get(key)?
        .split(',')
        .filter_map(|item| item.trim().parse::<i32>().ok())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

fn ordinal_word(position: i32) -> String {
    match position {
        1 => "first".to_string(),
        2 => "second".to_string(),
        3 => "third".to_string(),
        4 => "fourth".to_string(),
        5 => "fifth".to_string(),
        -1 => "last".to_string(),
        -2 => "second-to-last".to_string(),
        -3 => "third-to-last".to_string(),
        -4 => "fourth-to-last".to_string(),
        -5 => "fifth-to-last".to_string(),
        other => format!("{other}th"),
    }
}

fn ordinal_suffix(value: i32) -> String {
    let tens = value % 100;
    let suffix = if (11..=13).contains(&tens) {
        "th"
    } else {
        match value % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{value}{suffix}")
}

fn month_day_phrase(day: i32) -> String {
    match day {
        -1 => "last day".to_string(),
        // unsigned_abs: i32::MIN has no positive i32 counterpart.
        value if value < 0 => format!("{}th-to-last day", value.unsigned_abs()),
        value => ordinal_suffix(value),
    }
}

fn month_name(month: u32) -> Option<&'static str> {
    match month {
        1 => Some("January"),
        2 => Some("February"),
        3 => Some("March"),
        4 => Some("April"),
        5 => Some("May"),
        6 => Some("June"),
        7 => Some("July"),
        8 => Some("August"),
        9 => Some("September"),
        10 => Some("October"),
        11 => Some("November"),
        12 => Some("December"),
        _ => None,
    }
}

fn week_phrase(week: i32) -> String {
    if week < 0 {
        format!("{}th-to-last week", week.unsigned_abs())
    } else {
        format!("week {week}")
    }
}

fn year_day_phrase(day: i32) -> String {
    if day < 0 {
        format!("{}th-to-last day of the year", day.unsigned_abs())
    } else {
        format!("{} day of the year", ordinal_suffix(day))
    }
}

fn clock_phrase(hour: u32) -> String {
    let meridiem = if hour % 24 < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        rest => rest,
    };
    format!("{display} {meridiem}")
}

fn pluralize(noun: &str, value: u32) -> String {
    if value == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

fn long_date(date: NaiveDate) -> String {
    format!(
        "{} {}, {}",
        date.format("%B"),
        ordinal_suffix(date.day() as i32),
        date.year()
    )
}

fn oxford_join(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [rest @ .., last] => {
            let joined: Vec<&str> = rest.iter().map(String::as_str).collect();
            format!("{}, and {}", joined.join(", "), last)
        }
    }
}
