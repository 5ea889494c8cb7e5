//! Segment type and block splitting.

use crate::error::SegmentParseError;

use super::timestamp::is_timestamp;

/// A named sub-range `[start, end)` of a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Position in the block (0-based).
    pub index: usize,
    /// `"{index:03} {text}"`, the line with its time token removed.
    pub label: String,
    pub start: String,
    pub end: String,
}

/// Splits `block` into one segment per non-empty line, in line order.
///
/// Segment `i` ends where segment `i + 1` starts; the last one ends at
/// `end_marker`.
pub fn split(block: &str, end_marker: &str) -> Result<Vec<Segment>, SegmentParseError> {
    let block = block.trim();
    if block.is_empty() {
        return Err(SegmentParseError::Empty);
    }

    let mut segments = Vec::new();
    for (index, line) in block
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .enumerate()
    {
        let mut tokens: Vec<&str> = line.split_whitespace().collect();
        let pos = tokens
            .iter()
            .position(|t| is_timestamp(t))
            .ok_or_else(|| SegmentParseError::NoTimestamp {
                line: line.to_string(),
            })?;
        let start = tokens.remove(pos);
        if tokens.is_empty() {
            return Err(SegmentParseError::EmptyLabel {
                line: line.to_string(),
            });
        }
        segments.push(Segment {
            index,
            label: format!("{:03} {}", index, tokens.join(" ")),
            start: start.to_string(),
            end: String::new(),
        });
    }

    let starts: Vec<String> = segments.iter().skip(1).map(|s| s.start.clone()).collect();
    let ends = starts.into_iter().chain(std::iter::once(end_marker.to_string()));
    for (segment, end) in segments.iter_mut().zip(ends) {
        segment.end = end;
    }
    Ok(segments)
}
