/// Prefixes every line of `text` with `width` spaces. A trailing newline
/// does not open a new line, so nothing is appended after it.
pub fn indent(width: usize, text: &str) -> String {
    let pad = " ".repeat(width);
    if text.is_empty() {
        return pad;
    }
    let mut out = String::with_capacity(text.len() + width);
    for line in text.split_inclusive('\n') {
        out.push_str(&pad);
        out.push_str(line);
    }
    out
}

/// Drops a single whitespace character from the very end of `text`.
pub fn remove_trailing_whitespace(text: &str) -> &str {
    match text.chars().next_back() {
        Some(last) if last.is_ascii_whitespace() => &text[..text.len() - last.len_utf8()],
        _ => text,
    }
}
