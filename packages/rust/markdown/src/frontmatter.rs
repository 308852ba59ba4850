//! Front matter stripping.
//!
//! A single forward scan with two states. Every line that trims to `---`
//! flips the state and is dropped; lines seen while inside a block are
//! dropped. There is no lookahead, so an odd number of delimiters drops
//! everything after the last one.

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    Outside,
    Inside,
}

impl BlockState {
    fn toggled(self) -> Self {
        match self {
            Self::Outside => Self::Inside,
            Self::Inside => Self::Outside,
        }
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim() == "---"
}

/// Remove `---` delimited blocks. Returns the input unchanged when disabled.
pub fn strip_frontmatter(lines: Vec<String>, enabled: bool) -> Vec<String> {
    if !enabled {
        return lines;
    }

    let mut state = BlockState::Outside;
    let mut kept = Vec::with_capacity(lines.len());

    for line in lines {
        if is_delimiter(&line) {
            state = state.toggled();
            continue;
        }

        match state {
            BlockState::Outside => kept.push(line),
            BlockState::Inside => {}
        }
    }

    if state == BlockState::Inside {
        tracing::debug!("unterminated front matter block, trailing lines dropped");
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(text: &str) -> Vec<String> {
        docsplit_shared::split_lines(text)
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn removes_leading_block() {
        let result = strip_frontmatter(lines("---\ntitle: X\n---\nBody text\n"), true);
        assert_eq!(result, vec!["Body text\n"]);
    }

    #[test]
    fn disabled_returns_input() {
        let input = lines("---\ntitle: X\n---\nBody text\n");
        let result = strip_frontmatter(input.clone(), false);
        assert_eq!(result, input);
    }

    #[test]
    fn delimiter_matched_after_trimming() {
        let result = strip_frontmatter(lines("  ---  \r\nkey: v\r\n---\r\nBody\r\n"), true);
        assert_eq!(result, vec!["Body\r\n"]);
    }

    #[test]
    fn longer_rules_are_not_delimiters() {
        let result = strip_frontmatter(lines("----\nkept\n--- x\n"), true);
        assert_eq!(result, vec!["----\n", "kept\n", "--- x\n"]);
    }

    #[test]
    fn no_front_matter_is_untouched() {
        let input = lines("# Title\n\nParagraph\n");
        let result = strip_frontmatter(input.clone(), true);
        assert_eq!(result, input);
    }

    #[test]
    fn later_block_pairs_are_also_removed() {
        let result = strip_frontmatter(lines("intro\n---\nhidden\n---\noutro\n"), true);
        assert_eq!(result, vec!["intro\n", "outro\n"]);
    }

    // Known quirk: an unmatched third delimiter (e.g. a Markdown horizontal
    // rule after the front matter) re-enters the block and drops the rest.
    #[test]
    fn odd_delimiter_count_drops_trailing_content() {
        let result = strip_frontmatter(
            lines("---\ntitle: X\n---\nBody\n---\nafter the rule\nmore\n"),
            true,
        );
        assert_eq!(result, vec!["Body\n"]);
    }

    #[test]
    fn unterminated_block_drops_everything_after_opening() {
        let result = strip_frontmatter(lines("---\ntitle: X\nBody\n"), true);
        assert!(result.is_empty());
    }
}
