//! Escaping of the field separator inside scalar values.
//!
//! Wiki markup cannot carry a literal `|` inside a field value, so content
//! pipes are written as the `{{!}}` template. Content that itself starts the
//! escape (`{{!`) is written as `{{!!`, which keeps [`decode`] an exact
//! inverse of [`encode`] for every input.
//!
//! MediaWiki also defines a `{{!!}}` magic word meaning `||`. It is not
//! supported: `{{!!` always decodes to a literal `{{!`, so in `{{!!}}` the
//! trailing `}}` is read as a closing template token.

use std::borrow::Cow;
use std::ops::Range;

pub const SEPARATOR: char = '|';
pub const ESCAPED_SEPARATOR: &str = "{{!}}";

const ESCAPE_LEAD: &str = "{{!";
const ESCAPED_LEAD: &str = "{{!!";

/// Text decoded from markup, with the byte spans produced by escapes.
///
/// Spans are sorted and disjoint. Anything inside them is content, never
/// structure, even when it looks like a separator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    text: String,
    literals: Vec<Range<usize>>,
}

impl Decoded {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn literals(&self) -> &[Range<usize>] {
        &self.literals
    }

    /// True if `span` overlaps any escaped span.
    pub fn is_literal(&self, span: Range<usize>) -> bool {
        let idx = self.literals.partition_point(|lit| lit.end <= span.start);
        self.literals.get(idx).is_some_and(|lit| lit.start < span.end)
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Escapes content so that it can be written as a field value.
///
/// The result never contains a literal separator.
pub fn encode(text: &str) -> Cow<'_, str> {
    if !text.contains(SEPARATOR) && !text.contains(ESCAPE_LEAD) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + ESCAPED_SEPARATOR.len());
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        if rest.starts_with(ESCAPE_LEAD) {
            out.push_str(ESCAPED_LEAD);
            rest = &rest[ESCAPE_LEAD.len()..];
        } else if c == SEPARATOR {
            out.push_str(ESCAPED_SEPARATOR);
            rest = &rest[c.len_utf8()..];
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    Cow::Owned(out)
}

/// Inverse of [`encode`].
pub fn decode(text: &str) -> String {
    decode_buffer(text).into_text()
}

/// Decodes a whole page, remembering where the escapes were.
pub fn decode_buffer(text: &str) -> Decoded {
    let mut decoded = Decoded { text: String::with_capacity(text.len()), literals: Vec::new() };
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        let start = decoded.text.len();
        if rest.starts_with(ESCAPED_SEPARATOR) {
            decoded.text.push(SEPARATOR);
            decoded.literals.push(start..decoded.text.len());
            rest = &rest[ESCAPED_SEPARATOR.len()..];
        } else if rest.starts_with(ESCAPED_LEAD) {
            decoded.text.push_str(ESCAPE_LEAD);
            decoded.literals.push(start..decoded.text.len());
            rest = &rest[ESCAPED_LEAD.len()..];
        } else {
            decoded.text.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_escaped_separator() {
        assert_eq!(decode("a{{!}}b"), "a|b");
        assert_eq!(encode("a|b"), "a{{!}}b");
    }

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(encode("heart"), Cow::Borrowed("heart")));
    }

    #[test]
    fn test_escape_token_as_content() {
        let encoded = encode("{{!}}");
        assert_eq!(encoded, "{{!!}}");
        assert!(!encoded.contains(SEPARATOR));
        assert_eq!(decode(&encoded), "{{!}}");
    }

    #[test]
    fn test_literal_spans() {
        let decoded = decode_buffer("x={{!}}|y{{!!");
        assert_eq!(decoded.text(), "x=||y{{!");
        assert_eq!(decoded.literals(), &[2..3, 5..8]);
        assert!(decoded.is_literal(2..3));
        assert!(!decoded.is_literal(3..4));
        assert!(decoded.is_literal(4..6));
        assert!(!decoded.is_literal(0..2));
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(s in "[a-z|{}! =]{0,24}") {
            prop_assert_eq!(decode(&encode(&s)), s);
        }

        #[test]
        fn encode_never_emits_a_separator(s in "\\PC{0,24}") {
            prop_assert!(!encode(&s).contains(SEPARATOR));
        }
    }
}
