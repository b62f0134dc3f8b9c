//! Line splitting and line-break normalization.

use std::borrow::Cow;

/// Split `text` into lines on `\r\n`, `\r` or `\n`. Terminators are not part
/// of the lines, and a final terminator does not start an empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                lines.push(&text[start..i]);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            b'\n' => {
                lines.push(&text[start..i]);
                i += 1;
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Whether `text` already uses only `\n` and ends with one (or is empty).
pub fn is_normalized(text: &str) -> bool {
    !text.contains('\r') && (text.is_empty() || text.ends_with('\n'))
}

/// Rejoin the lines of `text` with `\n`, terminating every line including the
/// last. Empty text stays empty.
pub fn normalize_lines(text: &str) -> Cow<'_, str> {
    if is_normalized(text) {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len() + 1);
    for line in split_lines(text) {
        result.push_str(line);
        result.push('\n');
    }
    Cow::Owned(result)
}
