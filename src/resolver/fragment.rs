//! Slot payload decoding.
//!
//! A temporal slot carries a recognizer payload shaped like
//!
//! ```json
//! {"values": [
//!   {"type": "datetime", "value": "2013-02-12 20:00:00"},
//!   {"type": "datetimerange", "start": "2013-02-12 18:00:00", "end": "2013-02-12 21:00:00"}
//! ]}
//! ```
//!
//! Only the last memory value and, within it, the last candidate are used.
//! An ambiguous phrase may yield several candidates; picking the last one is
//! a fixed rule, not a ranking.

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use tracing::debug;

use crate::memory::MemoryValue;
use crate::moment::{parse_date, parse_time};

/// Recognized resolution kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    Date,
    Time,
    DateTime,
    DateTimeRange,
}

impl FragmentKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "date" => Some(Self::Date),
            "time" => Some(Self::Time),
            "datetime" => Some(Self::DateTime),
            "datetimerange" => Some(Self::DateTimeRange),
            _ => None,
        }
    }
}

/// Date/time endpoints decoded from one slot for one turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateTimeFragment {
    pub start_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_date: Option<NaiveDate>,
    pub end_time: Option<NaiveTime>,
}

impl DateTimeFragment {
    pub const fn absent() -> Self {
        Self { start_date: None, start_time: None, end_date: None, end_time: None }
    }

    pub fn date(date: NaiveDate) -> Self {
        Self { start_date: Some(date), ..Self::absent() }
    }

    pub fn time(time: NaiveTime) -> Self {
        Self { start_time: Some(time), ..Self::absent() }
    }

    pub fn is_absent(&self) -> bool {
        *self == Self::absent()
    }
}

#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(default)]
    values: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    start: Option<String>,
    #[serde(default)]
    end: Option<String>,
}

/// Decode the temporal slot stored under one memory key.
///
/// Anything missing or malformed decodes to an absent fragment (or to absent
/// endpoints within it).
pub fn decode(values: &[MemoryValue]) -> DateTimeFragment {
    let Some(resolution) = values.last().and_then(|v| v.resolution.as_ref()) else {
        return DateTimeFragment::absent();
    };
    let payload = match Payload::deserialize(resolution) {
        Ok(payload) => payload,
        Err(err) => {
            debug!(%err, "ignoring malformed temporal payload");
            return DateTimeFragment::absent();
        }
    };
    let Some(candidate) = payload.values.last() else {
        return DateTimeFragment::absent();
    };
    let Some(kind) = FragmentKind::from_tag(&candidate.kind) else {
        debug!(kind = candidate.kind.as_str(), "ignoring unsupported resolution kind");
        return DateTimeFragment::absent();
    };

    let fragment = match kind {
        FragmentKind::Date => DateTimeFragment {
            start_date: candidate.value.as_deref().and_then(parse_date),
            ..DateTimeFragment::absent()
        },
        FragmentKind::Time => DateTimeFragment {
            start_time: candidate.value.as_deref().and_then(parse_time),
            ..DateTimeFragment::absent()
        },
        FragmentKind::DateTime => {
            let (start_date, start_time) = split(candidate.value.as_deref());
            DateTimeFragment { start_date, start_time, ..DateTimeFragment::absent() }
        }
        FragmentKind::DateTimeRange => {
            let (start_date, start_time) = split(candidate.start.as_deref());
            let (end_date, end_time) = split(candidate.end.as_deref());
            DateTimeFragment { start_date, start_time, end_date, end_time }
        }
    };

    debug!(?kind, ?fragment, "decoded temporal fragment");
    fragment
}

fn split(value: Option<&str>) -> (Option<NaiveDate>, Option<NaiveTime>) {
    value.and_then(split_instant).map_or((None, None), |(d, t)| (Some(d), t))
}

/// Split an instant like `2013-02-12 20:00:00` into its date and time axes.
///
/// A date-only instant keeps its date and leaves the time absent. An instant
/// whose time part is present but invalid is dropped entirely.
fn split_instant(text: &str) -> Option<(NaiveDate, Option<NaiveTime>)> {
    let caps = regex!(r"^\s*(\d{4}-\d{2}-\d{2})(?:[T ]?(\d{1,2}:\d{2}(?::\d{2})?))?\s*$").captures(text)?;
    let date = parse_date(caps.get(1)?.as_str())?;
    match caps.get(2) {
        Some(time) => Some((date, Some(parse_time(time.as_str())?))),
        None => Some((date, None)),
    }
}
