//! Write-back of a tree as wiki template markup.
//!
//! Output layout:
//!
//! ```text
//! {{Metaphor
//! |Name=MORE IS UP
//! |Aliases={{Metaphor.Alias
//! |Metaphor.Alias.Name=MORE IS UP
//! }}
//! }}
//! ```

use log::warn;

use crate::core::escape::{encode, SEPARATOR};
use crate::types::{Branch, Node};

/// Renders `tree` as template markup that parses back to an equal tree.
pub fn to_template_markup(tree: &Branch) -> String {
    let mut output = String::new();
    write_branch(tree, &mut output);
    output
}

fn write_branch(branch: &Branch, output: &mut String) {
    if branch.is_template_call() {
        output.push_str("{{");
        output.push_str(&encode(branch.name()));
        output.push('\n');
        for child in branch.children() {
            output.push(SEPARATOR);
            match child {
                Node::Field(field) => {
                    output.push_str(&encode(field.name()));
                    output.push('=');
                    output.push_str(&encode(field.value()));
                }
                Node::Branch(nested) => write_branch(nested, output),
            }
            output.push('\n');
        }
        output.push_str("}}");
    } else {
        output.push_str(&encode(branch.name()));
        output.push('=');
        for child in branch.children() {
            match child {
                Node::Branch(call) if call.is_template_call() => write_branch(call, output),
                other => warn!(
                    "Skipping '{}' in field '{}': only template calls can be written there",
                    other.name(),
                    branch.name()
                ),
            }
        }
    }
}
