use log::{debug, trace, warn};

use crate::config::NormalizerConfig;
use crate::core::query::values_of;
use crate::types::{Branch, Field, Node};

use super::Normalizer;

/// Makes sure a page lists its own title among its aliases.
///
/// For a page titled `Metaphor:MORE IS UP` the tree must contain an
/// `{{Metaphor.Alias|Metaphor.Alias.Name=MORE IS UP}}` call inside the
/// `Aliases` field. Pages whose title lacks the prefix are left alone.
#[derive(Debug, Clone)]
pub struct AliasNormalizer {
    title_prefix: String,
    group: String,
    template: String,
    field: String,
}

impl AliasNormalizer {
    pub fn from_config(config: &NormalizerConfig) -> Self {
        Self {
            title_prefix: config.alias_title_prefix.clone(),
            group: config.alias_group.clone(),
            template: config.alias_template.clone(),
            field: config.alias_field.clone(),
        }
    }
}

impl Normalizer for AliasNormalizer {
    fn name(&self) -> &str {
        "alias"
    }

    fn apply(&self, title: &str, root: &mut Branch) -> usize {
        let Some(alias) = title.strip_prefix(self.title_prefix.as_str()).map(str::trim) else {
            trace!("'{}' is not a '{}' page, skipping alias check", title, self.title_prefix);
            return 0;
        };
        if alias.is_empty() || values_of(root, &self.field).any(|existing| existing == alias) {
            return 0;
        }

        let entry = Branch::template(self.template.as_str()).with(Field::new(self.field.as_str(), alias));
        // Pages often carry the group as an empty `|Aliases=` field.
        let slot = root.children_mut().iter_mut().find(|node| node.name() == self.group);
        match slot {
            Some(Node::Branch(group)) => {
                group.push(entry);
            }
            Some(node) => {
                if !node.as_field().is_some_and(|field| field.value().is_empty()) {
                    warn!("Field '{}' on '{}' holds text, not adding alias '{}'", self.group, title, alias);
                    return 0;
                }
                *node = Branch::group(self.group.as_str()).with(entry).into();
            }
            None => {
                root.push(Branch::group(self.group.as_str()).with(entry));
            }
        }
        debug!("Added missing alias '{}' to '{}'", alias, title);
        1
    }
}
