//! Timestamp block parsing.
//!
//! Splits a track's free-text timestamp block into ordered, contiguous
//! segments: each line contributes one segment starting at its time token,
//! and each segment ends where the next one starts (the last one at the
//! track's end marker).

mod split;
mod timestamp;

pub use split::{split, Segment};
pub use timestamp::is_timestamp;
