use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Calendar-scale repeat cadence for stored schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub const fn as_token(self) -> &'static str {
        match self {
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Yearly => "YEARLY",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_uppercase().as_str() {
            "DAILY" => Some(Self::Daily),
            "WEEKLY" => Some(Self::Weekly),
            "MONTHLY" => Some(Self::Monthly),
            "YEARLY" => Some(Self::Yearly),
            _ => None,
        }
    }
}

/// Two-letter weekday codes used by the BYDAY rule part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WeekdayCode {
    Su,
    Mo,
    Tu,
    We,
    Th,
    Fr,
    Sa,
}

impl WeekdayCode {
    pub const fn as_code(self) -> &'static str {
        match self {
            WeekdayCode::Su => "SU",
            WeekdayCode::Mo => "MO",
            WeekdayCode::Tu => "TU",
            WeekdayCode::We => "WE",
            WeekdayCode::Th => "TH",
            WeekdayCode::Fr => "FR",
            WeekdayCode::Sa => "SA",
        }
    }

    pub const fn full_name(self) -> &'static str {
        match self {
            WeekdayCode::Su => "Sunday",
            WeekdayCode::Mo => "Monday",
            WeekdayCode::Tu => "Tuesday",
            WeekdayCode::We => "Wednesday",
            WeekdayCode::Th => "Thursday",
            WeekdayCode::Fr => "Friday",
            WeekdayCode::Sa => "Saturday",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "SU" => Some(Self::Su),
            "MO" => Some(Self::Mo),
            "TU" => Some(Self::Tu),
            "WE" => Some(Self::We),
            "TH" => Some(Self::Th),
            "FR" => Some(Self::Fr),
            "SA" => Some(Self::Sa),
            _ => None,
        }
    }
}

/// One value or several, for rule parts that accept either a bare integer or
/// a list. A singleton stays scalar through serialization instead of
/// becoming a one-element array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(i32),
    Many(Vec<i32>),
}

impl OneOrMany {
    pub fn values(&self) -> &[i32] {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value),
            OneOrMany::Many(values) => values,
        }
    }

    pub(crate) fn from_values(values: Vec<i32>) -> Option<Self> {
        match values.len() {
            0 => None,
            1 => Some(OneOrMany::One(values[0])),
            _ => Some(OneOrMany::Many(values)),
        }
    }
}

fn default_interval() -> u32 {
    1
}

/// Structured recurrence description for a stored schedule.
///
/// `weekdays` pairs with `position` to express ordinal rules such as "the
/// last Friday of the month". `count` and `until` may both be present but
/// only one should drive termination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    #[serde(default = "default_interval")]
    pub interval: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekdays: Option<Vec<WeekdayCode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_day: Option<OneOrMany>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_month: Option<OneOrMany>,
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: 1,
            count: None,
            until: None,
            weekdays: None,
            month_day: None,
            position: None,
            by_month: None,
        }
    }

    /// Repeat every `interval` periods instead of every one.
    pub fn every(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    /// Stop after `count` occurrences.
    pub fn times(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Last possible occurrence date, inclusive.
    pub fn until(mut self, until: NaiveDate) -> Self {
        self.until = Some(until);
        self
    }

    pub fn on_weekdays(mut self, weekdays: Vec<WeekdayCode>) -> Self {
        self.weekdays = Some(weekdays);
        self
    }

    /// Ordinal qualifier for the weekday list (-1 = last).
    pub fn at_position(mut self, position: i32) -> Self {
        self.position = Some(position);
        self
    }

    pub fn on_month_days(mut self, days: Vec<i32>) -> Self {
        self.month_day = OneOrMany::from_values(days);
        self
    }

    pub fn in_months(mut self, months: Vec<i32>) -> Self {
        self.by_month = OneOrMany::from_values(months);
        self
    }
}
