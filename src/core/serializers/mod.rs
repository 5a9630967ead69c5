pub mod markup;
pub mod outline;
pub mod template;

pub use markup::to_structured_markup;
pub use outline::to_outline;
pub use template::to_template_markup;

use crate::types::Branch;

/// Pretty-printed JSON rendering of `tree`.
pub fn to_json(tree: &Branch) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(tree)
}
