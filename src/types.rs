use serde::Serialize;

/// A node of a parsed template tree.
///
/// Children of a [`Branch`] keep their source order; code that consumes the
/// tree (role lookups in particular) depends on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Field(Field),
    Branch(Branch),
}

/// A name bound to a scalar value, e.g. `Source=heart`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Field {
    name: String,
    value: String,
}

/// A named, ordered collection of nodes.
///
/// A template-call branch corresponds to a `{{name|...}}` unit. A branch that
/// is not a template call is a field whose value is one or more nested
/// template calls, e.g. `Aliases={{Alias|...}}{{Alias|...}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Branch {
    name: String,
    template_call: bool,
    children: Vec<Node>,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

impl Branch {
    /// Creates an empty `{{name}}` branch.
    pub fn template(name: impl Into<String>) -> Self {
        Self { name: name.into(), template_call: true, children: Vec::new() }
    }

    /// Creates an empty branch holding the nested calls of a `name=` field.
    pub fn group(name: impl Into<String>) -> Self {
        Self { name: name.into(), template_call: false, children: Vec::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_template_call(&self) -> bool {
        self.template_call
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn push(&mut self, node: impl Into<Node>) -> &mut Self {
        self.children.push(node.into());
        self
    }

    /// Builder-style [`Branch::push`].
    pub fn with(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Direct child fields, in order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.children.iter().filter_map(Node::as_field)
    }

    /// Direct child branches, in order.
    pub fn branches(&self) -> impl Iterator<Item = &Branch> {
        self.children.iter().filter_map(Node::as_branch)
    }

    /// First direct child field called `name`.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().find(|field| field.name == name)
    }

    /// First direct child branch called `name`.
    pub fn branch(&self, name: &str) -> Option<&Branch> {
        self.branches().find(|branch| branch.name == name)
    }
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Field(field) => field.name(),
            Node::Branch(branch) => branch.name(),
        }
    }

    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Node::Field(field) => Some(field),
            Node::Branch(_) => None,
        }
    }

    pub fn as_branch(&self) -> Option<&Branch> {
        match self {
            Node::Branch(branch) => Some(branch),
            Node::Field(_) => None,
        }
    }

    pub fn as_field_mut(&mut self) -> Option<&mut Field> {
        match self {
            Node::Field(field) => Some(field),
            Node::Branch(_) => None,
        }
    }

    pub fn as_branch_mut(&mut self) -> Option<&mut Branch> {
        match self {
            Node::Branch(branch) => Some(branch),
            Node::Field(_) => None,
        }
    }
}

// Macro to generate the From/TryFrom impls between Node and its variants
macro_rules! impl_node_conversion {
    ($variant:ident, $type:ty) => {
        impl From<$type> for Node {
            fn from(value: $type) -> Node {
                Node::$variant(value)
            }
        }

        impl TryFrom<Node> for $type {
            type Error = Node;

            fn try_from(node: Node) -> Result<$type, Self::Error> {
                match node {
                    Node::$variant(value) => Ok(value),
                    other => Err(other),
                }
            }
        }
    };
}

impl_node_conversion!(Field, Field);
impl_node_conversion!(Branch, Branch);
