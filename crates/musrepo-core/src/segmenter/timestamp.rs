//! `[h:]mm:ss` token recognition.

/// Returns true if `token` is a time like `4:05`, `04:05` or `1:04:05`.
///
/// Minutes and seconds are one or two digits in 0–59; the optional hour
/// prefix is any run of digits.
pub fn is_timestamp(token: &str) -> bool {
    let parts: Vec<&str> = token.split(':').collect();
    let (hours, rest) = match parts.len() {
        2 => (None, &parts[..]),
        3 => (Some(parts[0]), &parts[1..]),
        _ => return false,
    };
    if let Some(h) = hours {
        if h.is_empty() || !h.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
    }
    rest.iter().all(|p| is_sexagesimal(p))
}

fn is_sexagesimal(part: &str) -> bool {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    part.parse::<u8>().map(|v| v < 60).unwrap_or(false)
}
