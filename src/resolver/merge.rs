//! Fragment merging.
//!
//! Each axis takes the first present value, left to right:
//!
//! ```text
//! start_date = datetime ▸ date ▸ previous
//! start_time = datetime ▸ time ▸ previous
//! end_date   =            date ▸ previous
//! end_time   =            date ▸ previous
//! ```
//!
//! The time-only and datetime-only slots never contribute end values.
//!
//! When a `datetime` and a `date` fragment arrive in the same turn the
//! datetime's date is kept for `start_date`. Nothing in the slot contract
//! orders the two; this is the merge order applied as-is.

use tracing::debug;

use super::fragment::DateTimeFragment;
use crate::moment::{MomentRange, TimeRange};

/// Outcome of a resolution cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedRange {
    /// No axis is constrained: any persisted range must be removed.
    Clear,
    /// At least one axis is constrained.
    Set(MomentRange),
}

impl ResolvedRange {
    /// The range to filter with. `Clear` filters nothing.
    pub fn range(&self) -> MomentRange {
        match self {
            ResolvedRange::Clear => MomentRange::unbounded(),
            ResolvedRange::Set(range) => *range,
        }
    }

    /// String form for persistence, `None` when the slot should be deleted.
    pub fn to_time_range(&self) -> Option<TimeRange> {
        match self {
            ResolvedRange::Clear => None,
            ResolvedRange::Set(range) => Some(range.to_time_range()),
        }
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, ResolvedRange::Clear)
    }
}

/// Merge this turn's fragments with the previously resolved range.
pub fn resolve(
    datetime: &DateTimeFragment,
    date: &DateTimeFragment,
    time: &DateTimeFragment,
    previous: &MomentRange,
) -> ResolvedRange {
    if datetime.start_date.is_some() && date.start_date.is_some() {
        debug!(
            datetime = ?datetime.start_date,
            date = ?date.start_date,
            "datetime and date both present; datetime wins"
        );
    }

    let merged = MomentRange {
        start_date: datetime.start_date.or(date.start_date).or(previous.start_date),
        start_time: datetime.start_time.or(time.start_time).or(previous.start_time),
        end_date: date.end_date.or(previous.end_date),
        end_time: date.end_time.or(previous.end_time),
    };

    if merged.is_unbounded() {
        debug!("resolved range is empty; clearing");
        ResolvedRange::Clear
    } else {
        debug!(axes = ?merged.axes(), "resolved range");
        ResolvedRange::Set(merged)
    }
}
