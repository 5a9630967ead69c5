//! Lookups over a parsed tree by field name.

use std::slice;

use crate::errors::QueryError;
use crate::types::{Branch, Node};

pub const LINGUISTIC_METAPHOR: &str = "Linguistic metaphor";
pub const SOURCE_ROLE: &str = "Source";
pub const TARGET_ROLE: &str = "Target";
pub const EXAMPLE_TEXT: &str = "Example.Text";

/// Pre-order iterator over the values of every field with a given name.
///
/// A clone taken before iterating replays the same sequence.
#[derive(Debug, Clone)]
pub struct ValuesOf<'a> {
    name: &'a str,
    stack: Vec<slice::Iter<'a, Node>>,
}

impl<'a> Iterator for ValuesOf<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            match level.next() {
                None => {
                    self.stack.pop();
                }
                Some(Node::Field(field)) if field.name() == self.name => return Some(field.value()),
                Some(Node::Field(_)) => {}
                Some(Node::Branch(branch)) => self.stack.push(branch.children().iter()),
            }
        }
    }
}

/// Values of all fields called `name`, at any depth, in document order.
///
/// Names are matched exactly, dots included (`"Metaphor.Alias.Name"`).
pub fn values_of<'a>(tree: &'a Branch, name: &'a str) -> ValuesOf<'a> {
    ValuesOf { name, stack: vec![tree.children().iter()] }
}

/// First non-empty value of `role` in a tree rooted at `expected_template`.
///
/// When several fields carry the role, the first one in document order wins
/// and the rest are not consulted. A tree rooted at any other template is
/// [`QueryError::WrongTemplate`]; a missing or empty field is `Ok(None)`.
pub fn first_role_value<'a>(
    tree: &'a Branch,
    expected_template: &str,
    role: &'a str,
) -> Result<Option<&'a str>, QueryError> {
    if tree.name().trim() != expected_template {
        return Err(QueryError::WrongTemplate {
            expected: expected_template.to_string(),
            found: tree.name().to_string(),
        });
    }
    Ok(values_of(tree, role).next().filter(|value| !value.is_empty()))
}

pub fn linguistic_source(tree: &Branch) -> Result<Option<&str>, QueryError> {
    first_role_value(tree, LINGUISTIC_METAPHOR, SOURCE_ROLE)
}

pub fn linguistic_target(tree: &Branch) -> Result<Option<&str>, QueryError> {
    first_role_value(tree, LINGUISTIC_METAPHOR, TARGET_ROLE)
}

pub fn example_texts(tree: &Branch) -> ValuesOf<'_> {
    values_of(tree, EXAMPLE_TEXT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Field;

    fn linguistic_metaphor() -> Branch {
        Branch::template(LINGUISTIC_METAPHOR)
            .with(Field::new("Name", "Address barrier"))
            .with(
                Branch::group("Examples")
                    .with(Branch::template("Example").with(Field::new(EXAMPLE_TEXT, "first")))
                    .with(
                        Branch::template("Example")
                            .with(Field::new(EXAMPLE_TEXT, "second"))
                            .with(Field::new(SOURCE_ROLE, "barrier")),
                    ),
            )
            .with(Field::new(SOURCE_ROLE, "obstacle"))
            .with(Field::new(TARGET_ROLE, ""))
            .with(Field::new(EXAMPLE_TEXT, "third"))
    }

    #[test]
    fn test_values_in_document_order_at_any_depth() {
        let tree = linguistic_metaphor();
        let texts: Vec<&str> = example_texts(&tree).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_values_iterator_is_restartable() {
        let tree = linguistic_metaphor();
        let values = values_of(&tree, EXAMPLE_TEXT);
        assert_eq!(values.clone().count(), 3);
        assert_eq!(values.count(), 3);
        assert_eq!(values_of(&tree, "Missing").next(), None);
    }

    #[test]
    fn test_first_match_wins() {
        let tree = linguistic_metaphor();
        assert_eq!(linguistic_source(&tree), Ok(Some("barrier")));
    }

    #[test]
    fn test_empty_role_is_absent() {
        let tree = linguistic_metaphor();
        assert_eq!(linguistic_target(&tree), Ok(None));
    }

    #[test]
    fn test_wrong_template() {
        let tree = Branch::template("Metaphor").with(Field::new(SOURCE_ROLE, "x"));
        assert_eq!(
            linguistic_source(&tree),
            Err(QueryError::WrongTemplate { expected: LINGUISTIC_METAPHOR.to_string(), found: "Metaphor".to_string() })
        );
    }
}
