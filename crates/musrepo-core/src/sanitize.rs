//! Path-component sanitization for titles and segment labels.

use crate::error::PathError;

/// Characters that are illegal in a file name on at least one common filesystem.
const ILLEGAL: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Strips filesystem-illegal characters from `text`.
///
/// - Removes `/ \ : * ? " < > |`, NUL and other control characters
/// - Leaves every other character (spaces and dots included) untouched
/// - Fails if nothing usable is left (empty, `.` or `..`)
pub fn sanitize(text: &str) -> Result<String, PathError> {
    let out: String = text
        .chars()
        .filter(|c| !ILLEGAL.contains(c) && !c.is_control())
        .collect();

    if out.trim().is_empty() || out == "." || out == ".." {
        return Err(PathError::Empty {
            original: text.to_string(),
        });
    }
    Ok(out)
}
