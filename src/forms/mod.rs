//! JSON payloads accepted by the API and their conversion into domain types.

pub mod products;
pub mod users;

/// Collapse whitespace runs into single spaces and drop control characters.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if !ch.is_control() {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Sanitize each line, trim blank lines at both ends and keep at most one
/// blank line between paragraphs.
pub(crate) fn sanitize_multiline_text(input: &str) -> String {
    let mut result: Vec<String> = Vec::new();

    for line in input.lines().map(sanitize_inline_text) {
        let blank = line.is_empty();
        if blank && result.last().is_none_or(|previous| previous.is_empty()) {
            continue;
        }
        result.push(line);
    }

    while result.last().is_some_and(|line| line.is_empty()) {
        result.pop();
    }

    result.join("\n")
}
