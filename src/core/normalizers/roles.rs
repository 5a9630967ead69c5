use log::trace;

use crate::config::NormalizerConfig;
use crate::types::Branch;

use super::{rewrite_fields, Normalizer};

/// Lower-cases the first character of every role name.
#[derive(Debug, Clone)]
pub struct RoleNameNormalizer {
    field: String,
}

impl RoleNameNormalizer {
    pub fn new(field: impl Into<String>) -> Self {
        Self { field: field.into() }
    }

    pub fn from_config(config: &NormalizerConfig) -> Self {
        Self::new(config.role_field.clone())
    }
}

impl Normalizer for RoleNameNormalizer {
    fn name(&self) -> &str {
        "roles"
    }

    fn apply(&self, title: &str, root: &mut Branch) -> usize {
        let changed = rewrite_fields(root, &self.field, &mut uncapitalize);
        trace!("Uncapitalized {} role names on '{}'", changed, title);
        changed
    }
}

fn uncapitalize(value: &str) -> Option<String> {
    let mut chars = value.chars();
    let first = chars.next()?;
    let mut lowered: String = first.to_lowercase().collect();
    lowered.push_str(chars.as_str());
    Some(lowered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Field;

    fn schema() -> Branch {
        Branch::template("Schema")
            .with(Field::new("Name", "Seeing"))
            .with(
                Branch::group("Roles")
                    .with(Branch::template("Role").with(Field::new("Role.Name", "Viewer")))
                    .with(Branch::template("Role").with(Field::new("Role.Name", "phenomenon")))
                    .with(Branch::template("Role").with(Field::new("Role.Name", ""))),
            )
    }

    #[test]
    fn test_uncapitalizes_nested_roles() {
        let mut tree = schema();
        let normalizer = RoleNameNormalizer::from_config(&NormalizerConfig::default());
        assert_eq!(normalizer.apply("Schema:Seeing", &mut tree), 1);

        let roles: Vec<&str> = crate::core::query::values_of(&tree, "Role.Name").collect();
        assert_eq!(roles, vec!["viewer", "phenomenon", ""]);
        assert_eq!(tree.field("Name").map(Field::value), Some("Seeing"));
    }

    #[test]
    fn test_idempotent() {
        let mut tree = schema();
        let normalizer = RoleNameNormalizer::new("Role.Name");
        normalizer.apply("Schema:Seeing", &mut tree);
        let once = tree.clone();
        assert_eq!(normalizer.apply("Schema:Seeing", &mut tree), 0);
        assert_eq!(tree, once);
    }
}
