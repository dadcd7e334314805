//! Shared helpers for locating `:`-delimited sections in text dumps.

/// Byte offset just past the first line (after `from`) whose trimmed content equals `marker`.
pub(crate) fn offset_after_line(text: &str, from: usize, marker: &str) -> Option<usize> {
    let mut offset = from;
    for line in text[from..].split_inclusive('\n') {
        offset += line.len();
        if line.trim() == marker {
            return Some(offset);
        }
    }
    None
}

/// Lines of a trimmed section payload, or `None` when it holds at most one line.
pub(crate) fn payload_lines(payload: &str) -> Option<std::str::Lines<'_>> {
    let payload = payload.trim();
    if payload.contains('\n') {
        Some(payload.lines())
    } else {
        None
    }
}
