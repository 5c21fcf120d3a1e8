/// Makes a tag value usable as (part of) a single path component.
pub fn sanitize_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if is_disallowed_char(ch) {
            out.push('_');
        } else {
            out.push(ch);
        }
    }

    if out == "." || out == ".." {
        out = "_".repeat(out.len());
    }

    out
}

/// Replaces every whitespace character with an underscore.
pub fn replace_whitespace(value: &str) -> String {
    value
        .chars()
        .map(|ch| if ch.is_whitespace() { '_' } else { ch })
        .collect()
}

fn is_disallowed_char(ch: char) -> bool {
    matches!(ch, '/' | '\\') || ch == '\0' || ch.is_control()
}
