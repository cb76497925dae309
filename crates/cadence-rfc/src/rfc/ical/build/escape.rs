//! iCalendar text escaping.

/// Escapes text for iCalendar TEXT values (RFC 5545 §3.3.11).
///
/// Backslash, comma, semicolon and newline are escaped; bare CR is dropped.
#[must_use]
pub fn escape_text(s: &str) -> String {
    s.chars().fold(String::with_capacity(s.len()), |mut out, c| {
        match c {
            '\\' | ',' | ';' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
        out
    })
}

/// Escapes a parameter value, quoting it when it contains delimiters.
///
/// Quoted values use caret encoding (RFC 6868).
#[must_use]
pub fn escape_param_value(s: &str) -> String {
    if !s.contains([':', ';', ',', '"', '\n']) {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '^' => out.push_str("^^"),
            '\n' => out.push_str("^n"),
            '"' => out.push_str("^'"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
