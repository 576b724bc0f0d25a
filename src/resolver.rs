//! Temporal range resolution.
//!
//! Date and time information trickles in across turns and through three
//! separate slots. Each slot payload decodes into a [`DateTimeFragment`]
//! (`fragment.rs`); the fragments are then merged with the range resolved on
//! the previous turn (`merge.rs`).
//!
//! ```text
//! filter-datetime ──decode──┐
//! filter-date     ──decode──┼── merge ──▶ ResolvedRange::{Set, Clear}
//! filter-time     ──decode──┤
//! resolved-times  ──────────┘
//! ```

#[path = "resolver/fragment.rs"]
mod fragment;
#[path = "resolver/merge.rs"]
mod merge;

pub use fragment::{DateTimeFragment, FragmentKind, decode};
pub use merge::{ResolvedRange, resolve};
