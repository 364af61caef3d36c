/// Return the first `max_chars` characters of `text`.
///
/// Counts chars rather than bytes so a cut never lands inside a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
