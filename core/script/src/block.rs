use crate::types::StateId;

/// Scope prefix that introduces a state declaration, as in `s:STATE_X = { ... }`.
pub const STATE_SCOPE: &str = "s:";

/// A state block located inside a larger text.
///
/// `start..end` is a byte range of the source text. It begins at the `s:`
/// declaration token and ends just after the matching closing brace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
}

impl<'a> Block<'a> {
    /// Text before the block.
    pub fn prefix(&self, source: &'a str) -> &'a str {
        &source[..self.start]
    }

    /// Text after the block.
    pub fn suffix(&self, source: &'a str) -> &'a str {
        &source[self.end..]
    }
}

/// Find the first `s:<state> = {` block in `text` and return its exact span.
///
/// Returns `None` when no declaration is present, or when the braces never
/// balance before the end of the text (truncated or malformed input).
pub fn extract_block<'a>(text: &'a str, state: &StateId) -> Option<Block<'a>> {
    let (start, body_start) = find_declaration(text, state)?;
    let end = find_block_end(text, body_start)?;
    Some(Block {
        start,
        end,
        text: &text[start..end],
    })
}

/// Locate the first `s:<state>` token followed by `=` and `{`.
///
/// Returns the offset of the token and the offset just past the opening brace.
fn find_declaration(text: &str, state: &StateId) -> Option<(usize, usize)> {
    let needle = format!("{STATE_SCOPE}{state}");
    let bytes = text.as_bytes();

    for (pos, _) in text.match_indices(needle.as_str()) {
        if pos > 0 && is_ident_byte(bytes[pos - 1]) {
            continue;
        }

        let mut i = skip_whitespace(bytes, pos + needle.len());
        if bytes.get(i) != Some(&b'=') {
            continue;
        }
        i = skip_whitespace(bytes, i + 1);
        if bytes.get(i) != Some(&b'{') {
            continue;
        }
        return Some((pos, i + 1));
    }

    None
}

/// Scan from just inside an opening brace to its matching close.
///
/// Returns the offset one past the closing brace, or `None` if the text ends
/// first.
pub fn find_block_end(text: &str, body_start: usize) -> Option<usize> {
    let mut depth: usize = 0;

    for (offset, byte) in text.as_bytes().get(body_start..)?.iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                if depth == 0 {
                    return Some(body_start + offset + 1);
                }
                depth -= 1;
            }
            _ => {}
        }
    }

    None
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b':'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(s: &str) -> StateId {
        s.parse().unwrap()
    }

    fn depth_at_end(block: &str) -> i64 {
        block.bytes().fold(0, |depth, b| match b {
            b'{' => depth + 1,
            b'}' => depth - 1,
            _ => depth,
        })
    }

    #[test]
    fn test_extracts_nested_block() {
        let text = r#"
s:STATE_A = {
    region_state:GER = {
        create_pop = { culture = north_german size = 1000 }
    }
}
s:STATE_B = { region_state:FRA = { } }
"#;
        let block = extract_block(text, &state("STATE_A")).unwrap();
        assert!(block.text.starts_with("s:STATE_A"));
        assert!(block.text.ends_with('}'));
        assert_eq!(depth_at_end(block.text), 0);
        assert!(!block.text.contains("STATE_B"));
        assert_eq!(&text[block.start..block.end], block.text);
    }

    #[test]
    fn test_compact_declaration() {
        let text = "s:STATE_A={country=c:FRA}";
        let block = extract_block(text, &state("STATE_A")).unwrap();
        assert_eq!(block.start, 0);
        assert_eq!(block.end, text.len());
    }

    #[test]
    fn test_prefix_of_longer_identifier_is_not_matched() {
        let text = "s:STATE_AB = { x = 1 }\ns:STATE_A = { y = 2 }";
        let block = extract_block(text, &state("STATE_A")).unwrap();
        assert_eq!(block.text, "s:STATE_A = { y = 2 }");
    }

    #[test]
    fn test_reference_without_block_is_skipped() {
        let text = "target = s:STATE_A\ns:STATE_A = { y = 2 }";
        let block = extract_block(text, &state("STATE_A")).unwrap();
        assert_eq!(block.text, "s:STATE_A = { y = 2 }");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let text = "s:STATE_A = { first }\ns:STATE_A = { second }";
        let block = extract_block(text, &state("STATE_A")).unwrap();
        assert_eq!(block.text, "s:STATE_A = { first }");
    }

    #[test]
    fn test_missing_state() {
        assert!(extract_block("s:STATE_B = { }", &state("STATE_A")).is_none());
        assert!(extract_block("", &state("STATE_A")).is_none());
    }

    #[test]
    fn test_truncated_block_is_not_found() {
        let text = "s:STATE_A = {\n    region_state:GER = {\n        size = 10\n    }\n";
        assert!(extract_block(text, &state("STATE_A")).is_none());
        assert!(extract_block("s:STATE_A = {", &state("STATE_A")).is_none());
    }

    #[test]
    fn test_prefix_and_suffix() {
        let text = "# header\ns:STATE_A = { }\n# trailer";
        let block = extract_block(text, &state("STATE_A")).unwrap();
        assert_eq!(block.prefix(text), "# header\n");
        assert_eq!(block.suffix(text), "\n# trailer");
    }

    #[test]
    fn test_non_ascii_text_around_block() {
        let text = "# Åland öar\ns:STATE_A = { name = \"Île\" }\n# slut";
        let block = extract_block(text, &state("STATE_A")).unwrap();
        assert_eq!(block.text, "s:STATE_A = { name = \"Île\" }");
    }
}
