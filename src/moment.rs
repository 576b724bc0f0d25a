//! Resolved date/time constraint windows.
//!
//! A [`MomentRange`] is the typed form the filter engine consumes. A
//! [`TimeRange`] is its string form, round-tripped through the slot memory
//! between conversation turns.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

bitflags::bitflags! {
    /// Which axes of a [`MomentRange`] carry a constraint.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RangeAxes: u8 {
        const START_DATE = 1 << 0;
        const START_TIME = 1 << 1;
        const END_DATE   = 1 << 2;
        const END_TIME   = 1 << 3;
    }
}

/// Four independently optional constraints. `None` means "any".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MomentRange {
    pub start_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_date: Option<NaiveDate>,
    pub end_time: Option<NaiveTime>,
}

impl MomentRange {
    /// A range with no constraint on any axis.
    pub const fn unbounded() -> Self {
        Self { start_date: None, start_time: None, end_date: None, end_time: None }
    }

    pub fn axes(&self) -> RangeAxes {
        let mut axes = RangeAxes::empty();
        axes.set(RangeAxes::START_DATE, self.start_date.is_some());
        axes.set(RangeAxes::START_TIME, self.start_time.is_some());
        axes.set(RangeAxes::END_DATE, self.end_date.is_some());
        axes.set(RangeAxes::END_TIME, self.end_time.is_some());
        axes
    }

    pub fn is_unbounded(&self) -> bool {
        self.axes().is_empty()
    }

    pub fn to_time_range(&self) -> TimeRange {
        TimeRange {
            start_date: self.start_date.map(|d| d.format(DATE_FORMAT).to_string()),
            start_time: self.start_time.map(|t| t.format(TIME_FORMAT).to_string()),
            end_date: self.end_date.map(|d| d.format(DATE_FORMAT).to_string()),
            end_time: self.end_time.map(|t| t.format(TIME_FORMAT).to_string()),
        }
    }
}

/// String-encoded [`MomentRange`], as persisted in slot memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl TimeRange {
    /// Decode into typed form. Fields that do not parse are dropped.
    pub fn to_moment_range(&self) -> MomentRange {
        MomentRange {
            start_date: self.start_date.as_deref().and_then(parse_date),
            start_time: self.start_time.as_deref().and_then(parse_time),
            end_date: self.end_date.as_deref().and_then(parse_date),
            end_time: self.end_time.as_deref().and_then(parse_time),
        }
    }
}

impl From<MomentRange> for TimeRange {
    fn from(range: MomentRange) -> Self {
        range.to_time_range()
    }
}

impl From<&TimeRange> for MomentRange {
    fn from(range: &TimeRange) -> Self {
        range.to_moment_range()
    }
}

/// Parse a `YYYY-MM-DD` date. Empty or malformed input yields `None`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(text, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(err) => {
            debug!(value = text, %err, "dropping unparseable date");
            None
        }
    }
}

/// Parse an `HH:MM:SS` (or `HH:MM`) time of day.
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    match NaiveTime::parse_from_str(text, TIME_FORMAT).or_else(|_| NaiveTime::parse_from_str(text, "%H:%M")) {
        Ok(time) => Some(time),
        Err(err) => {
            debug!(value = text, %err, "dropping unparseable time");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_range() -> MomentRange {
        MomentRange {
            start_date: NaiveDate::from_ymd_opt(2013, 2, 12),
            start_time: NaiveTime::from_hms_opt(18, 30, 15),
            end_date: NaiveDate::from_ymd_opt(2013, 2, 14),
            end_time: NaiveTime::from_hms_opt(23, 0, 0),
        }
    }

    #[test]
    fn time_range_round_trips_every_axis_combination() {
        let full = full_range();
        for bits in 0u8..16 {
            let axes = RangeAxes::from_bits_truncate(bits);
            let range = MomentRange {
                start_date: full.start_date.filter(|_| axes.contains(RangeAxes::START_DATE)),
                start_time: full.start_time.filter(|_| axes.contains(RangeAxes::START_TIME)),
                end_date: full.end_date.filter(|_| axes.contains(RangeAxes::END_DATE)),
                end_time: full.end_time.filter(|_| axes.contains(RangeAxes::END_TIME)),
            };
            assert_eq!(range.to_time_range().to_moment_range(), range);
            assert_eq!(range.axes(), axes);
        }
    }

    #[test]
    fn time_range_uses_camel_case_json() {
        let json = serde_json::to_string(&full_range().to_time_range()).unwrap();
        assert_eq!(
            json,
            r#"{"startDate":"2013-02-12","startTime":"18:30:15","endDate":"2013-02-14","endTime":"23:00:00"}"#
        );
    }

    #[test]
    fn malformed_fields_become_absent() {
        let tr = TimeRange {
            start_date: Some("2013-02-30".into()),
            start_time: Some("25:00:00".into()),
            end_date: Some(String::new()),
            end_time: Some("21:15".into()),
        };
        let range = tr.to_moment_range();
        assert_eq!(range.start_date, None);
        assert_eq!(range.start_time, None);
        assert_eq!(range.end_date, None);
        assert_eq!(range.end_time, NaiveTime::from_hms_opt(21, 15, 0));
    }

    #[test]
    fn missing_json_keys_decode_as_absent() {
        let tr: TimeRange = serde_json::from_str(r#"{"startTime":"20:00:00"}"#).unwrap();
        let range = tr.to_moment_range();
        assert_eq!(range.axes(), RangeAxes::START_TIME);
        assert!(!range.is_unbounded());
        assert!(MomentRange::unbounded().is_unbounded());
    }
}
