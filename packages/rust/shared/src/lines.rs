//! Line splitting that keeps terminators.
//!
//! Every downstream stage is line-ordered, and the splitter must be able to
//! rebuild the exact input, so lines always carry their own `\n`, `\r\n` or
//! `\r` terminator.

/// Split `text` into lines, each keeping its terminator.
///
/// Concatenating the result always reproduces `text` exactly. A trailing
/// line without a terminator is still returned; empty input yields no lines.
pub fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..=i]);
                start = i + 1;
            }
            b'\r' => {
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                lines.push(&text[start..=i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }

    lines
}

/// Separate a line into its body and its terminator (possibly empty).
pub fn split_terminator(line: &str) -> (&str, &str) {
    let body_len = if line.ends_with("\r\n") {
        line.len() - 2
    } else if line.ends_with('\n') || line.ends_with('\r') {
        line.len() - 1
    } else {
        line.len()
    };

    line.split_at(body_len)
}
