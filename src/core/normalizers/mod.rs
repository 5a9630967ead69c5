// Declare submodules
pub mod alias;
pub mod roles;
pub mod schema;

// Re-export normalizers
pub use alias::AliasNormalizer;
pub use roles::RoleNameNormalizer;
pub use schema::SchemaNameNormalizer;

use crate::types::{Branch, Node};

/// An in-place rewrite of a page tree.
///
/// Implementations must be idempotent: applying one to its own output
/// changes nothing and returns 0.
pub trait Normalizer: Send + Sync {
    fn name(&self) -> &str;

    /// Rewrites `root` and returns the number of nodes changed or inserted.
    fn apply(&self, title: &str, root: &mut Branch) -> usize;
}

/// Applies `rewrite` to the value of every field called `name`, at any depth.
///
/// `rewrite` returns `None` to leave a value alone. Returns how many values
/// actually changed.
pub(crate) fn rewrite_fields<F>(branch: &mut Branch, name: &str, rewrite: &mut F) -> usize
where
    F: FnMut(&str) -> Option<String>,
{
    let mut changed = 0;
    for node in branch.children_mut() {
        match node {
            Node::Field(field) if field.name() == name => {
                if let Some(value) = rewrite(field.value()) {
                    if value != field.value() {
                        field.set_value(value);
                        changed += 1;
                    }
                }
            }
            Node::Field(_) => {}
            Node::Branch(child) => changed += rewrite_fields(child, name, rewrite),
        }
    }
    changed
}
