use chrono::NaiveDate;

use super::rule::{Frequency, OneOrMany, RecurrenceRule, WeekdayCode};

/// Serializes a rule to its canonical `RRULE:` string.
///
/// Rule parts appear in a fixed order so equal rules always produce
/// identical strings. The grammar admits an ordinal either as a numeric
/// prefix on a BYDAY token (`BYDAY=-1FR`) or as a separate BYSETPOS part;
/// this encoder always writes the BYSETPOS form with bare weekday codes,
/// while [`decode_recurrence`] accepts both spellings.
pub fn encode_recurrence(rule: &RecurrenceRule) -> String {
    let mut out = format!("RRULE:FREQ={}", rule.frequency.as_token());

    if rule.interval > 1 {
        out.push_str(&format!(";INTERVAL={}", rule.interval));
    }

    if let Some(count) = rule.count {
        out.push_str(&format!(";COUNT={count}"));
    }

    if let Some(until) = rule.until {
        out.push_str(&format!(";UNTIL={}", until.format("%Y%m%d")));
    }

    if let Some(months) = rule.by_month.as_ref().filter(|set| !set.values().is_empty()) {
        out.push_str(&format!(";BYMONTH={}", join_values(months.values())));
    }

    if let Some(days) = rule.month_day.as_ref().filter(|set| !set.values().is_empty()) {
        out.push_str(&format!(";BYMONTHDAY={}", join_values(days.values())));
    }

    if let Some(weekdays) = rule.weekdays.as_ref().filter(|list| !list.is_empty()) {
        if let Some(position) = rule.position {
            out.push_str(&format!(";BYSETPOS={position}"));
        }

        let codes: Vec<&str> = weekdays.iter().map(|day| day.as_code()).collect();
        out.push_str(&format!(";BYDAY={}", codes.join(",")));
    }

    out
}

/// Rebuilds the structured rule from a stored `RRULE` string.
///
/// Decoding is best-effort: the `RRULE:` prefix is optional, unknown rule
/// parts and unparseable numbers are skipped, and a missing or unrecognized
/// FREQ falls back to daily so editing surfaces can still re-populate a form
/// from whatever a stored string yields.
pub fn decode_recurrence(rrule: &str) -> RecurrenceRule {
    let mut rule = RecurrenceRule::new(Frequency::Daily);
    let mut embedded_position: Option<i32> = None;
    let mut explicit_position: Option<i32> = None;

    for (key, value) in split_parts(rrule) {
        match key.as_str() {
            "FREQ" => {
                if let Some(frequency) = Frequency::from_token(&value) {
                    rule.frequency = frequency;
                }
            }
            "INTERVAL" => {
                if let Ok(interval) = value.parse::<u32>() {
                    rule.interval = interval;
                }
            }
            "COUNT" => {
                if let Ok(count) = value.parse::<u32>() {
                    rule.count = Some(count);
                }
            }
            "UNTIL" => {
                if let Some(until) = parse_until(&value) {
                    rule.until = Some(until);
                }
            }
            "BYDAY" => {
                let mut weekdays = Vec::new();
                for token in value.split(',') {
                    let (prefix, code) = split_day_token(token);
                    // The first prefixed token decides; later prefixes do
                    // not overwrite it.
                    if embedded_position.is_none() {
                        embedded_position = prefix;
                    }
                    if let Some(day) = WeekdayCode::from_code(code) {
                        weekdays.push(day);
                    }
                }
                if !weekdays.is_empty() {
                    rule.weekdays = Some(weekdays);
                }
            }
            "BYSETPOS" => {
                if let Ok(position) = value.parse::<i32>() {
                    explicit_position = Some(position);
                }
            }
            "BYMONTHDAY" => {
                rule.month_day = OneOrMany::from_values(parse_value_list(&value));
            }
            "BYMONTH" => {
                rule.by_month = OneOrMany::from_values(parse_value_list(&value));
            }
            // Unrecognized rule parts are ignored.
            _ => {}
        }
    }

    // BYSETPOS is authoritative when both spellings appear.
    rule.position = explicit_position.or(embedded_position);

    rule
}

/// Splits a rule string into uppercase key/value pairs, dropping the
/// optional `RRULE:` prefix and any segment without both halves.
pub(super) fn split_parts(rrule: &str) -> Vec<(String, String)> {
    let body = rrule.trim();
    let body = match body.split_once(':') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("RRULE") => rest,
        _ => body,
    };

    body.split(';')
        .filter_map(|segment| {
            let (key, value) = segment.split_once('=')?;
            let key = key.trim().to_ascii_uppercase();
            let value = value.trim().to_string();
            if key.is_empty() || value.is_empty() {
                return None;
            }
            Some((key, value))
        })
        .collect()
}

/// Splits a BYDAY token into its optional signed ordinal prefix and the
/// remaining weekday code. Tokens that do not match the prefixed shape come
/// back whole with no ordinal.
pub(super) fn split_day_token(token: &str) -> (Option<i32>, &str) {
    let trimmed = token.trim();
    let (sign, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits_end = body
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(body.len());
    let (digits, code) = body.split_at(digits_end);

    if digits.is_empty() || code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return (None, trimmed);
    }

    match digits.parse::<i32>() {
        Ok(ordinal) => (Some(sign * ordinal), code),
        Err(_) => (None, trimmed),
    }
}

/// Reads the date half of an UNTIL value, tolerating and discarding a
/// `THHMMSS[Z]` time suffix. Stored rules carry date-only precision.
pub(super) fn parse_until(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    let date_part = trimmed.get(..8).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y%m%d").ok()
}

fn parse_value_list(value: &str) -> Vec<i32> {
    value
        .split(',')
        .filter_map(|item| item.trim().parse::<i32>().ok())
        .collect()
}

fn join_values(values: &[i32]) -> String {
    values
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_emits_rule_parts_in_fixed_order() {
        let rule = RecurrenceRule::new(Frequency::Monthly)
            .in_months(vec![3, 6])
            .until(NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date"))
            .times(12)
            .every(2);

        assert_eq!(
            encode_recurrence(&rule),
            "RRULE:FREQ=MONTHLY;INTERVAL=2;COUNT=12;UNTIL=20250630;BYMONTH=3,6"
        );
    }

    #[test]
    fn encode_skips_interval_of_one() {
        let rule = RecurrenceRule::new(Frequency::Daily);
        assert_eq!(encode_recurrence(&rule), "RRULE:FREQ=DAILY");
    }

    #[test]
    fn encode_prefers_setpos_form_for_ordinal_weekdays() {
        let rule = RecurrenceRule::new(Frequency::Monthly)
            .on_weekdays(vec![WeekdayCode::Fr])
            .at_position(-1);

        assert_eq!(
            encode_recurrence(&rule),
            "RRULE:FREQ=MONTHLY;BYSETPOS=-1;BYDAY=FR"
        );
    }

    #[test]
    fn encode_joins_weekday_lists_with_commas() {
        let rule = RecurrenceRule::new(Frequency::Weekly).on_weekdays(vec![
            WeekdayCode::Mo,
            WeekdayCode::We,
            WeekdayCode::Fr,
        ]);

        assert_eq!(encode_recurrence(&rule), "RRULE:FREQ=WEEKLY;BYDAY=MO,WE,FR");
    }

    #[test]
    fn encode_passes_out_of_range_values_through() {
        let rule = RecurrenceRule::new(Frequency::Monthly).on_month_days(vec![45]);
        assert_eq!(encode_recurrence(&rule), "RRULE:FREQ=MONTHLY;BYMONTHDAY=45");
    }

    #[test]
    fn decode_round_trips_frequency_and_interval() {
        let original = RecurrenceRule::new(Frequency::Weekly).every(3);
        let decoded = decode_recurrence(&encode_recurrence(&original));

        assert_eq!(decoded.frequency, Frequency::Weekly);
        assert_eq!(decoded.interval, 3);
    }

    #[test]
    fn decode_accepts_both_ordinal_spellings() {
        let from_setpos = decode_recurrence("RRULE:FREQ=MONTHLY;BYDAY=FR;BYSETPOS=-1");
        let from_prefix = decode_recurrence("RRULE:FREQ=MONTHLY;BYDAY=-1FR");

        assert_eq!(from_setpos, from_prefix);
        assert_eq!(from_setpos.weekdays, Some(vec![WeekdayCode::Fr]));
        assert_eq!(from_setpos.position, Some(-1));
    }

    #[test]
    fn decode_first_embedded_prefix_wins() {
        let rule = decode_recurrence("FREQ=MONTHLY;BYDAY=2TU,-1FR");
        assert_eq!(rule.position, Some(2));
        assert_eq!(rule.weekdays, Some(vec![WeekdayCode::Tu, WeekdayCode::Fr]));
    }

    #[test]
    fn decode_setpos_overrides_embedded_prefix() {
        let rule = decode_recurrence("FREQ=MONTHLY;BYDAY=2TU;BYSETPOS=1");
        assert_eq!(rule.position, Some(1));
        assert_eq!(rule.weekdays, Some(vec![WeekdayCode::Tu]));
    }

    #[test]
    fn decode_unwraps_single_values() {
        let rule = decode_recurrence("RRULE:FREQ=MONTHLY;BYMONTHDAY=15");
        assert_eq!(rule.month_day, Some(OneOrMany::One(15)));

        let rule = decode_recurrence("RRULE:FREQ=MONTHLY;BYMONTHDAY=1,15");
        assert_eq!(rule.month_day, Some(OneOrMany::Many(vec![1, 15])));
    }

    #[test]
    fn decode_defaults_missing_freq_to_daily() {
        let rule = decode_recurrence("INTERVAL=2");
        assert_eq!(rule.frequency, Frequency::Daily);
        assert_eq!(rule.interval, 2);
    }

    #[test]
    fn decode_ignores_unknown_parts_and_bad_numbers() {
        let rule = decode_recurrence("RRULE:FREQ=WEEKLY;COUNT=soon;RSCALE=GREGORIAN;INTERVAL=2");
        assert_eq!(rule.frequency, Frequency::Weekly);
        assert!(rule.count.is_none());
        assert_eq!(rule.interval, 2);
    }

    #[test]
    fn decode_skips_unknown_weekday_codes() {
        let rule = decode_recurrence("FREQ=WEEKLY;BYDAY=MO,XX");
        assert_eq!(rule.weekdays, Some(vec![WeekdayCode::Mo]));
    }

    #[test]
    fn decode_strips_time_suffix_from_until() {
        let rule = decode_recurrence("FREQ=DAILY;UNTIL=20250105T000000Z");
        assert_eq!(rule.until, NaiveDate::from_ymd_opt(2025, 1, 5));
    }

    #[test]
    fn decode_works_without_rrule_prefix() {
        let rule = decode_recurrence("FREQ=YEARLY;BYMONTH=1");
        assert_eq!(rule.frequency, Frequency::Yearly);
        assert_eq!(rule.by_month, Some(OneOrMany::One(1)));
    }

    #[test]
    fn split_day_token_recognizes_signed_prefixes() {
        assert_eq!(split_day_token("-1FR"), (Some(-1), "FR"));
        assert_eq!(split_day_token("+2MO"), (Some(2), "MO"));
        assert_eq!(split_day_token("FR"), (None, "FR"));
        assert_eq!(split_day_token("-FR"), (None, "-FR"));
        assert_eq!(split_day_token("12X"), (None, "12X"));
    }
}
