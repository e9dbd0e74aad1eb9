//! `Value::DateTime` (spec §3: "a single value holding either an absolute
//! instant or a span; switches display mode when the span exceeds a fixed
//! threshold of 100 years"). Built on `chrono`, the crate the pack's other
//! example repos reach for date/time handling (the teacher has no date
//! type of its own).

use std::fmt;

use chrono::{Duration, NaiveDateTime};

const YEAR_THRESHOLD_DAYS: i64 = 100 * 365;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DateTimeValue {
    Instant(NaiveDateTime),
    Span(Duration),
}

impl DateTimeValue {
    pub fn instant(value: NaiveDateTime) -> Self {
        DateTimeValue::Instant(value)
    }

    pub fn span(value: Duration) -> Self {
        DateTimeValue::Span(value)
    }

    pub fn is_span(&self) -> bool {
        matches!(self, DateTimeValue::Span(_))
    }

    /// True once a span's magnitude exceeds the 100-year threshold named
    /// in spec §3, switching display to a coarser year-based form.
    pub fn exceeds_year_threshold(&self) -> bool {
        match self {
            DateTimeValue::Span(duration) => duration.num_days().abs() > YEAR_THRESHOLD_DAYS,
            DateTimeValue::Instant(_) => false,
        }
    }
}

impl fmt::Display for DateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTimeValue::Instant(instant) => write!(f, "{}", instant.format("%Y-%m-%dT%H:%M:%S")),
            DateTimeValue::Span(duration) if self.exceeds_year_threshold() => {
                let years = duration.num_days() as f64 / 365.25;
                write!(f, "{years:.2}y")
            }
            DateTimeValue::Span(duration) => write!(f, "{}s", duration.num_seconds()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switches_display_past_hundred_years() {
        let short = DateTimeValue::span(Duration::days(30));
        let long = DateTimeValue::span(Duration::days(200 * 365));
        assert!(!short.exceeds_year_threshold());
        assert!(long.exceeds_year_threshold());
        assert!(long.to_string().ends_with('y'));
        assert!(short.to_string().ends_with('s'));
    }
}
