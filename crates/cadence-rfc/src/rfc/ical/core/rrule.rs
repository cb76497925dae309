//! RECUR values for `RRULE` (RFC 5545 §3.3.10).
//!
//! Only the parts an exported event carries are modelled: `FREQ`,
//! `INTERVAL`, `UNTIL`, `BYDAY` and `BYMONTHDAY`.

use std::fmt;

use chrono::Weekday;

use super::DateTime;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Two-letter `BYDAY` code for a weekday.
#[must_use]
pub const fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

/// Weekday for a two-letter code, ignoring case and surrounding space.
#[must_use]
pub fn parse_weekday_code(code: &str) -> Option<Weekday> {
    let code = code.trim();
    WEEK.into_iter()
        .find(|day| weekday_code(*day).eq_ignore_ascii_case(code))
}

/// `FREQ` values an event can recur at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Self; 4] = [Self::Daily, Self::Weekly, Self::Monthly, Self::Yearly];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }

    /// Case-insensitive lookup by name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|freq| freq.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `BYDAY` entry: `MO`, or `2FR` / `-1FR` with an ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayNum {
    pub ordinal: Option<i8>,
    pub weekday: Weekday,
}

impl WeekdayNum {
    #[must_use]
    pub const fn every(weekday: Weekday) -> Self {
        Self {
            ordinal: None,
            weekday,
        }
    }

    /// `None` unless `ordinal` is in `-53..=53` and non-zero.
    #[must_use]
    pub fn nth(ordinal: i8, weekday: Weekday) -> Option<Self> {
        (ordinal != 0 && (-53..=53).contains(&ordinal)).then_some(Self {
            ordinal: Some(ordinal),
            weekday,
        })
    }
}

impl fmt::Display for WeekdayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ordinal) = self.ordinal {
            write!(f, "{ordinal}")?;
        }
        f.write_str(weekday_code(self.weekday))
    }
}

/// Recurrence rule written as an `RRULE` value.
///
/// Parts render in the order `FREQ`, `INTERVAL`, `UNTIL`, `BYDAY`,
/// `BYMONTHDAY`; an interval of 1 is left out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RRule {
    pub freq: Option<Frequency>,
    pub interval: Option<u32>,
    /// Inclusive.
    pub until: Option<DateTime>,
    pub by_day: Vec<WeekdayNum>,
    pub by_monthday: Vec<i8>,
}

impl RRule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_frequency(freq: Frequency) -> Self {
        Self {
            freq: Some(freq),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn daily() -> Self {
        Self::with_frequency(Frequency::Daily)
    }

    #[must_use]
    pub fn weekly() -> Self {
        Self::with_frequency(Frequency::Weekly)
    }

    #[must_use]
    pub fn monthly() -> Self {
        Self::with_frequency(Frequency::Monthly)
    }

    #[must_use]
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = Some(interval);
        self
    }

    #[must_use]
    pub fn with_until(mut self, until: DateTime) -> Self {
        self.until = Some(until);
        self
    }

    #[must_use]
    pub fn with_by_day(mut self, days: Vec<WeekdayNum>) -> Self {
        self.by_day = days;
        self
    }

    #[must_use]
    pub fn with_by_monthday(mut self, days: Vec<i8>) -> Self {
        self.by_monthday = days;
        self
    }
}

fn joined<T: ToString>(items: &[T]) -> Option<String> {
    (!items.is_empty()).then(|| {
        items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    })
}

impl fmt::Display for RRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [
            ("FREQ", self.freq.as_ref().map(ToString::to_string)),
            (
                "INTERVAL",
                self.interval
                    .filter(|n| *n != 1)
                    .as_ref()
                    .map(ToString::to_string),
            ),
            ("UNTIL", self.until.as_ref().map(ToString::to_string)),
            ("BYDAY", joined(&self.by_day)),
            ("BYMONTHDAY", joined(&self.by_monthday)),
        ];

        let rendered: Vec<String> = parts
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| format!("{name}={v}")))
            .collect();
        f.write_str(&rendered.join(";"))
    }
}
