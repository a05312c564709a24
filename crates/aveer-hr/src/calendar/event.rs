use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::recurrence::{decode_recurrence, describe_recurrence, encode_recurrence, RecurrenceRule};

/// A scheduled calendar entry as stored by the platform.
///
/// A recurring event keeps its cadence as RRULE text in `rrule`; one-off
/// events leave it empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub starts_on: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rrule: Option<String>,
}

impl CalendarEvent {
    pub fn new(id: impl Into<String>, title: impl Into<String>, starts_on: NaiveDate) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            starts_on,
            ends_on: None,
            rrule: None,
        }
    }

    pub fn ending_on(mut self, ends_on: NaiveDate) -> Self {
        self.ends_on = Some(ends_on);
        self
    }

    /// Stores the rule in its serialized form.
    pub fn with_recurrence(mut self, rule: &RecurrenceRule) -> Self {
        self.rrule = Some(encode_recurrence(rule));
        self
    }

    pub fn repeats(&self) -> bool {
        self.recurrence_text().is_some()
    }

    /// Re-populates the structured rule from the stored text, if any.
    pub fn recurrence(&self) -> Option<RecurrenceRule> {
        self.recurrence_text().map(decode_recurrence)
    }

    /// Schedule line for list views and notifications.
    pub fn schedule_summary(&self) -> String {
        match self.recurrence_text() {
            Some(raw) => describe_recurrence(raw),
            None => "Does not repeat".to_string(),
        }
    }

    fn recurrence_text(&self) -> Option<&str> {
        self.rrule.as_deref().filter(|raw| !raw.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::recurrence::{Frequency, WeekdayCode};

    fn start_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 1).expect("valid date")
    }

    #[test]
    fn recurring_event_round_trips_its_rule() {
        let rule = RecurrenceRule::new(Frequency::Weekly)
            .on_weekdays(vec![WeekdayCode::Mo, WeekdayCode::We]);
        let event = CalendarEvent::new("evt-1", "Team sync", start_date()).with_recurrence(&rule);

        assert!(event.repeats());
        assert_eq!(event.rrule.as_deref(), Some("RRULE:FREQ=WEEKLY;BYDAY=MO,WE"));
        assert_eq!(event.recurrence(), Some(rule));
    }

    #[test]
    fn one_off_event_does_not_repeat() {
        let event = CalendarEvent::new("evt-2", "Onboarding session", start_date());

        assert!(!event.repeats());
        assert!(event.recurrence().is_none());
        assert_eq!(event.schedule_summary(), "Does not repeat");
    }

    #[test]
    fn blank_rrule_text_counts_as_no_recurrence() {
        let mut event = CalendarEvent::new("evt-3", "Review", start_date());
        event.rrule = Some("   ".to_string());

        assert!(!event.repeats());
        assert_eq!(event.schedule_summary(), "Does not repeat");
    }

    #[test]
    fn schedule_summary_describes_the_stored_rule() {
        let rule = RecurrenceRule::new(Frequency::Monthly)
            .on_weekdays(vec![WeekdayCode::Fr])
            .at_position(-1);
        let event = CalendarEvent::new("evt-4", "Payroll close", start_date())
            .ending_on(NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date"))
            .with_recurrence(&rule);

        assert_eq!(event.schedule_summary(), "Every month on the last Friday");
    }

    #[test]
    fn serialization_skips_absent_optional_fields() {
        let event = CalendarEvent::new("evt-5", "One-off", start_date());
        let json = serde_json::to_value(&event).expect("event serializes");

        assert!(json.get("rrule").is_none());
        assert!(json.get("ends_on").is_none());
    }
}
