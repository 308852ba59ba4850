//! Per-line text normalization.
//!
//! Each rule is a function `&str -> String`. Enabled rules run in a fixed
//! order: embedded links, URLs, emails, then whitespace. Whitespace runs last
//! so removed tokens leave single-space boundaries.

use std::sync::LazyLock;

use regex::Regex;

use docsplit_shared::{CleaningConfig, split_terminator};

/// Normalize a single line.
///
/// The line terminator is detached first and re-attached unchanged, so line
/// structure survives whitespace collapsing. Applying this twice with the
/// same config gives the same result as applying it once.
pub fn normalize_line(line: &str, config: &CleaningConfig) -> String {
    let (body, terminator) = split_terminator(line);
    let mut text = body.to_string();

    // One pass resolves any depth of link nesting. Removing a URL or email
    // can still join its neighbours into a new token (e.g. `[a@b.io[x]]`),
    // so repeat until nothing changes.
    loop {
        let next = remove_tokens(&text, config);
        if next == text {
            break;
        }
        text = next;
    }

    if config.collapse_whitespace {
        text = collapse_whitespace(&text);
    }

    text.push_str(terminator);
    text
}

/// One pass of the token-removal rules (1-3).
fn remove_tokens(text: &str, config: &CleaningConfig) -> String {
    let mut result = text.to_string();

    if config.remove_embedded_links {
        result = remove_embedded_links(&result);
    }
    if config.remove_urls {
        result = remove_urls(&result);
    }
    if config.remove_emails {
        result = remove_emails(&result);
    }

    result
}

// ---------------------------------------------------------------------------
// Rule 1: Embedded links
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkKind {
    /// `[[label]]`, unwrapped to `label`.
    Reference,
    /// `![[target]]`, dropped with its contents.
    Embed,
}

impl LinkKind {
    fn marker(self) -> &'static str {
        match self {
            Self::Reference => "[[",
            Self::Embed => "![[",
        }
    }
}

/// An opening marker waiting for its `]]`. `start` is the byte offset in the
/// output where the link's contents begin.
#[derive(Debug)]
struct OpenLink {
    kind: LinkKind,
    start: usize,
}

/// Drop `![[embed]]` tokens entirely and unwrap `[[label]]` to `label`.
///
/// Scans left to right once, keeping open markers on a stack so nested
/// links resolve innermost first. A `]]` closes the most recent open link.
/// An embed ends at its first `]]`, so `[[` inside one is plain text.
/// Markers that never close are put back verbatim.
fn remove_embedded_links(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut open: Vec<OpenLink> = Vec::new();

    for ch in text.chars() {
        out.push(ch);
        if ch != '[' && ch != ']' {
            continue;
        }

        // A pair only forms from two characters of the current link's body.
        let frame_start = open.last().map_or(0, |link| link.start);
        let len = out.len();
        if len < frame_start + 2 || out.as_bytes()[len - 2] != ch as u8 {
            continue;
        }

        if ch == ']' {
            if let Some(link) = open.pop() {
                match link.kind {
                    LinkKind::Reference => out.truncate(len - 2),
                    LinkKind::Embed => out.truncate(link.start),
                }
            }
        } else if !matches!(open.last(), Some(link) if link.kind == LinkKind::Embed) {
            out.truncate(len - 2);
            let kind = if out.len() > frame_start && out.ends_with('!') {
                out.pop();
                LinkKind::Embed
            } else {
                LinkKind::Reference
            };
            open.push(OpenLink {
                kind,
                start: out.len(),
            });
        }
    }

    if open.is_empty() {
        out
    } else {
        restore_unclosed(&out, &open)
    }
}

/// Re-insert the markers of links that never closed. Offsets in `open` are
/// nondecreasing and fall on ASCII boundaries.
fn restore_unclosed(out: &str, open: &[OpenLink]) -> String {
    let extra: usize = open.iter().map(|link| link.kind.marker().len()).sum();
    let mut restored = String::with_capacity(out.len() + extra);
    let mut copied = 0;

    for link in open {
        restored.push_str(&out[copied..link.start]);
        restored.push_str(link.kind.marker());
        copied = link.start;
    }
    restored.push_str(&out[copied..]);
    restored
}

// ---------------------------------------------------------------------------
// Rule 2: URLs
// ---------------------------------------------------------------------------

/// Drop `http://` and `https://` URLs up to the first character that cannot
/// appear in a URL.
fn remove_urls(text: &str) -> String {
    static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"https?://[A-Za-z0-9\-._~:/?#\[\]@!$&'()*+,;=%]+").expect("valid regex")
    });

    URL_RE.replace_all(text, "").to_string()
}

// ---------------------------------------------------------------------------
// Rule 3: Emails
// ---------------------------------------------------------------------------

/// Drop `local@domain.tld` addresses with a top-level label of 2+ letters.
fn remove_emails(text: &str) -> String {
    static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").expect("valid regex")
    });

    EMAIL_RE.replace_all(text, "").to_string()
}

// ---------------------------------------------------------------------------
// Rule 4: Whitespace
// ---------------------------------------------------------------------------

/// Collapse every whitespace run (newlines included) to one space and trim.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

    WS_RE.replace_all(text, " ").trim().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
