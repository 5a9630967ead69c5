// src/parser.rs
use log::{debug, trace, warn};

use crate::core::scanner::{Scanner, Token, TokenKind};
use crate::errors::ParserError;
use crate::types::{Branch, Field, Node};
use crate::{Page, ParseStatus};

/// Result of one builder step.
///
/// `cursor` is the token that ended the step, and `closed` is false once the
/// scanner ran out of input inside an open template. Every step is a pure
/// function of the scanner and the position it starts from.
#[derive(Debug)]
struct Step<T> {
    value: T,
    cursor: Token,
    closed: bool,
}

impl<T> Step<T> {
    fn closed(value: T, cursor: Token) -> Self {
        Self { value, cursor, closed: true }
    }

    fn open(value: T, cursor: Token) -> Self {
        Self { value, cursor, closed: false }
    }
}

// --- Public Entry Point ---

/// Parses the first template call found in `raw` into a [`Page`].
///
/// Text before the first `{{` and after its matching `}}` is ignored. Input
/// that ends inside an open template still yields every node read up to that
/// point, with [`ParseStatus::Incomplete`].
pub fn parse_page(title: &str, raw: &str) -> Result<Page, ParserError> {
    let scanner = Scanner::new(raw);

    let mut token = scanner.next_token(0);
    while !matches!(token.kind, TokenKind::OpenTemplate | TokenKind::End) {
        token = scanner.next_token(token.end());
    }
    if token.kind == TokenKind::End {
        return Err(ParserError::NoTemplateCall(title.to_string()));
    }

    let step = build_template(&scanner, token.end());
    let status = if step.closed {
        let trailing = scanner.slice(step.cursor.end()..scanner.text().len());
        if !trailing.is_empty() {
            debug!("Ignoring {} bytes after the template call of '{}'", trailing.len(), title);
        }
        ParseStatus::Complete
    } else {
        warn!("Template '{}' on page '{}' is not terminated", step.value.name(), title);
        ParseStatus::Incomplete
    };

    debug!("Parsed page '{}' ({:?}, {} top-level nodes)", title, status, step.value.children().len());
    Ok(Page::new(step.value, status))
}

// --- Tree Building ---

/// Builds one template call whose name starts at `start`, just after `{{`.
fn build_template(scanner: &Scanner, start: usize) -> Step<Branch> {
    let name_end = scanner.next_token(start);
    let mut branch = Branch::template(scanner.slice(start..name_end.start()));
    trace!("Entering template '{}' at {}", branch.name(), start);

    let mut positional = 0;
    let mut cursor = name_end;
    loop {
        match cursor.kind {
            TokenKind::CloseTemplate => {
                trace!("Leaving template '{}' at {}", branch.name(), cursor.start());
                return Step::closed(branch, cursor);
            }
            TokenKind::End => return Step::open(branch, cursor),
            TokenKind::Separator => {
                let step = build_argument(scanner, cursor.end(), &mut positional);
                if let Some(node) = step.value {
                    branch.push(node);
                }
                if !step.closed {
                    return Step::open(branch, step.cursor);
                }
                cursor = step.cursor;
            }
            TokenKind::OpenTemplate => {
                let step = build_nested(scanner, &cursor);
                branch.push(step.value);
                if !step.closed {
                    return Step::open(branch, step.cursor);
                }
                cursor = step.cursor;
            }
            // `=` outside an argument is plain text
            TokenKind::Assignment => cursor = scanner.next_token(cursor.end()),
        }
    }
}

/// Builds the argument following a separator.
///
/// Named arguments become fields; nested calls without a name become
/// anonymous child branches; anything else is a positional argument.
fn build_argument(scanner: &Scanner, start: usize, positional: &mut usize) -> Step<Option<Node>> {
    let token = scanner.next_token(start);
    match token.kind {
        TokenKind::Assignment => build_field(scanner, &token),
        TokenKind::OpenTemplate => {
            let lead = scanner.slice(start..token.start());
            if !lead.is_empty() {
                warn!("Dropping text '{}' before a nested template", lead);
            }
            let step = build_nested(scanner, &token);
            Step { value: Some(step.value.into()), cursor: step.cursor, closed: step.closed }
        }
        TokenKind::Separator | TokenKind::CloseTemplate | TokenKind::End => {
            *positional += 1;
            let value = scanner.slice(start..token.start());
            let node: Option<Node> = (!value.is_empty()).then(|| Field::new(positional.to_string(), value).into());
            Step::closed(node, token)
        }
    }
}

/// Builds a `name=value` argument from its assignment token.
fn build_field(scanner: &Scanner, assignment: &Token) -> Step<Option<Node>> {
    let name_start = scanner.prev_token(assignment.start()).map_or(0, |token| token.end());
    let name = scanner.slice(name_start..assignment.start());
    let value_start = assignment.end();

    let mut token = scanner.next_value_token(value_start);
    if token.kind != TokenKind::OpenTemplate {
        let value = scanner.slice(value_start..token.start());
        trace!("Field '{}' = '{}'", name, value);
        return Step::closed(Some(Field::new(name, value).into()), token);
    }

    let lead = scanner.slice(value_start..token.start());
    if !lead.is_empty() {
        warn!("Dropping text '{}' before the nested template of field '{}'", lead, name);
    }

    let mut group = Branch::group(name);
    while token.kind == TokenKind::OpenTemplate {
        let step = build_nested(scanner, &token);
        group.push(step.value);
        if !step.closed {
            return Step::open(Some(group.into()), step.cursor);
        }
        token = step.cursor;
        while token.kind == TokenKind::Assignment {
            token = scanner.next_token(token.end());
        }
    }
    trace!("Field '{}' holds {} nested templates", group.name(), group.children().len());
    Step::closed(Some(group.into()), token)
}

/// Builds the template opened by `open` and moves past its closing token.
fn build_nested(scanner: &Scanner, open: &Token) -> Step<Branch> {
    let step = build_template(scanner, open.end());
    if !step.closed {
        return step;
    }
    let cursor = scanner.next_token(step.cursor.end());
    Step::closed(step.value, cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Page {
        parse_page("Test", raw).unwrap()
    }

    #[test]
    fn test_flat_template() {
        let page = parse("{{Linguistic metaphor|Source=heart|Target=mind}}");
        let root = page.root();
        assert_eq!(page.status(), ParseStatus::Complete);
        assert_eq!(root.name(), "Linguistic metaphor");
        assert!(root.is_template_call());
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.field("Source").map(Field::value), Some("heart"));
        assert_eq!(root.field("Target").map(Field::value), Some("mind"));
    }

    #[test]
    fn test_whitespace_and_line_ends_are_trimmed() {
        let page = parse("{{Schema\r\n|Name = Seeing \r\n|Type=frame\r\n}}");
        let root = page.root();
        assert_eq!(root.name(), "Schema");
        assert_eq!(root.field("Name").map(Field::value), Some("Seeing"));
        assert_eq!(root.field("Type").map(Field::value), Some("frame"));
    }

    #[test]
    fn test_field_with_consecutive_nested_templates() {
        let page = parse(
            "{{Metaphor|Name=MORE IS UP|Aliases={{Metaphor.Alias|Metaphor.Alias.Name=A}}\n{{Metaphor.Alias|Metaphor.Alias.Name=B}}|Type=primary}}",
        );
        let root = page.root();
        let aliases = root.branch("Aliases").unwrap();
        assert!(!aliases.is_template_call());
        assert_eq!(aliases.children().len(), 2);

        let names: Vec<&str> = aliases
            .branches()
            .map(|alias| alias.field("Metaphor.Alias.Name").unwrap().value())
            .collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(root.field("Type").map(Field::value), Some("primary"));
    }

    #[test]
    fn test_anonymous_nested_template() {
        let page = parse("{{Outer|{{Inner|x=1}}|y=2}}");
        let root = page.root();
        let inner = root.children()[0].as_branch().unwrap();
        assert!(inner.is_template_call());
        assert_eq!(inner.name(), "Inner");
        assert_eq!(root.field("y").map(Field::value), Some("2"));
    }

    #[test]
    fn test_deep_nesting() {
        let page = parse("{{A|b={{B|c={{C|d={{D|e=deep}}}}}}}}");
        let d = page
            .root()
            .branch("b")
            .and_then(|b| b.branch("B"))
            .and_then(|b| b.branch("c"))
            .and_then(|c| c.branch("C"))
            .and_then(|c| c.branch("d"))
            .and_then(|d| d.branch("D"))
            .unwrap();
        assert_eq!(d.field("e").map(Field::value), Some("deep"));
        assert_eq!(page.status(), ParseStatus::Complete);
    }

    #[test]
    fn test_assignment_inside_value_is_content() {
        let page = parse("{{Example|Text=a = b|Source=x}}");
        assert_eq!(page.root().field("Text").map(Field::value), Some("a = b"));
    }

    #[test]
    fn test_positional_arguments() {
        let page = parse("{{Cite|first||third|key=v}}");
        let root = page.root();
        assert_eq!(root.field("1").map(Field::value), Some("first"));
        assert!(root.field("2").is_none());
        assert_eq!(root.field("3").map(Field::value), Some("third"));
        assert_eq!(root.field("key").map(Field::value), Some("v"));
    }

    #[test]
    fn test_escaped_separator_in_value() {
        let page = parse("{{Example|Text=a{{!}}b|Source=x}}");
        assert_eq!(page.root().field("Text").map(Field::value), Some("a|b"));
        assert_eq!(page.root().children().len(), 2);
    }

    #[test]
    fn test_unterminated_template() {
        let page = parse("{{Linguistic metaphor|Source=heart|Target=mi");
        assert_eq!(page.status(), ParseStatus::Incomplete);
        assert_eq!(page.root().field("Source").map(Field::value), Some("heart"));
        assert_eq!(page.root().field("Target").map(Field::value), Some("mi"));
    }

    #[test]
    fn test_unterminated_nested_template() {
        let page = parse("{{A|x=1|g={{B|y=2");
        assert_eq!(page.status(), ParseStatus::Incomplete);
        let b = page.root().branch("g").and_then(|g| g.branch("B")).unwrap();
        assert_eq!(b.field("y").map(Field::value), Some("2"));
    }

    #[test]
    fn test_surrounding_text_is_ignored() {
        let page = parse("Intro text = ignored | here\n{{A|x=1}}\n[[Category:Test]]");
        assert_eq!(page.root().name(), "A");
        assert_eq!(page.root().children().len(), 1);
    }

    #[test]
    fn test_page_without_template() {
        let err = parse_page("Plain", "just text").unwrap_err();
        assert!(matches!(err, ParserError::NoTemplateCall(title) if title == "Plain"));
    }
}
