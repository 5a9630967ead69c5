//! XML rendering of a tree
//!
//! ## Format
//!
//! - Branch → `<branch name=".." template-call="true|false">`
//! - Field → `<field name="..">value</field>`
//! - Children → nested elements, two-space indent
//!
//! ## Example
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <branch name="Linguistic metaphor" template-call="true">
//!   <field name="Source">heart</field>
//!   <field name="Target">mind</field>
//! </branch>
//! ```

use crate::types::{Branch, Field, Node};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

struct MarkupSerializer {
    output: String,
    indent_level: usize,
}

impl MarkupSerializer {
    fn new() -> Self {
        Self { output: String::new(), indent_level: 0 }
    }

    fn push_indent(&mut self, s: &str) {
        self.output.push_str(&"  ".repeat(self.indent_level));
        self.output.push_str(s);
    }

    fn serialize_branch(&mut self, branch: &Branch) {
        let open = format!(
            r#"<branch name="{}" template-call="{}""#,
            escape_xml(branch.name()),
            branch.is_template_call()
        );

        if branch.is_empty() {
            self.push_indent(&open);
            self.output.push_str("/>\n");
            return;
        }

        self.push_indent(&open);
        self.output.push_str(">\n");
        self.indent_level += 1;
        for child in branch.children() {
            match child {
                Node::Field(field) => self.serialize_field(field),
                Node::Branch(nested) => self.serialize_branch(nested),
            }
        }
        self.indent_level -= 1;
        self.push_indent("</branch>\n");
    }

    fn serialize_field(&mut self, field: &Field) {
        let element = format!(
            r#"<field name="{}">{}</field>"#,
            escape_xml(field.name()),
            escape_xml(field.value())
        );
        self.push_indent(&element);
        self.output.push('\n');
    }
}

/// Renders `tree` as an XML document.
pub fn to_structured_markup(tree: &Branch) -> String {
    let mut serializer = MarkupSerializer::new();
    serializer.output.push_str(XML_DECLARATION);
    serializer.output.push('\n');
    serializer.serialize_branch(tree);
    serializer.output
}

/// Escape XML special characters
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\"', "&quot;")
        .replace('\'', "&apos;")
}
