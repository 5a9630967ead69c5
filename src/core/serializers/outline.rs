use std::fmt::Write;

use crate::types::{Branch, Node};

/// Indented, human-readable dump of a tree, for debugging.
pub fn to_outline(tree: &Branch) -> String {
    let mut output = String::new();
    write_branch(tree, 0, &mut output);
    output
}

fn write_branch(branch: &Branch, depth: usize, output: &mut String) {
    let indent = "  ".repeat(depth);
    if branch.is_template_call() {
        let _ = writeln!(output, "{}{{{{{}}}}}", indent, branch.name());
    } else {
        let _ = writeln!(output, "{}{}:", indent, branch.name());
    }
    for child in branch.children() {
        match child {
            Node::Field(field) => {
                let _ = writeln!(output, "{}  {}: {}", indent, field.name(), field.value());
            }
            Node::Branch(nested) => write_branch(nested, depth + 1, output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Field;

    #[test]
    fn test_outline() {
        let tree = Branch::template("Metaphor")
            .with(Field::new("Name", "MORE IS UP"))
            .with(Branch::group("Aliases").with(Branch::template("Metaphor.Alias").with(Field::new("Metaphor.Alias.Name", "UP"))));

        let expected = "{{Metaphor}}\n  Name: MORE IS UP\n  Aliases:\n    {{Metaphor.Alias}}\n      Metaphor.Alias.Name: UP\n";
        assert_eq!(to_outline(&tree), expected);
    }
}
