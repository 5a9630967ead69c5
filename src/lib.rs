//! Parser and serializer for wiki template-call records such as
//! `{{Linguistic metaphor|Source=heart|Target={{Frame|Name=mind}}}}`.
//!
//! Pages are parsed into a [`Branch`]/[`Field`] tree and kept in a
//! [`Document`] under their title. Trees can be queried by field name,
//! normalized in place, and written back as template markup or XML.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

pub mod config;
pub mod core;
pub mod errors;
pub mod parser;
pub mod registry;
pub mod types;

pub use config::NormalizerConfig;
pub use crate::core::normalizers::Normalizer;
pub use crate::core::query::ValuesOf;
pub use errors::{DocumentError, ParserError, QueryError};
pub use parser::parse_page;
pub use registry::NormalizerRegistry;
pub use types::{Branch, Field, Node};

use crate::core::{query, serializers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    Complete,
    /// The input ended inside an open template; the tree holds what was read.
    Incomplete,
}

/// One parsed page: its root template call and how parsing ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    root: Branch,
    status: ParseStatus,
}

impl Page {
    pub fn new(root: Branch, status: ParseStatus) -> Self {
        Self { root, status }
    }

    pub fn root(&self) -> &Branch {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Branch {
        &mut self.root
    }

    pub fn status(&self) -> ParseStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.status == ParseStatus::Complete
    }

    pub fn into_root(self) -> Branch {
        self.root
    }
}

/// Parsed pages keyed by title.
///
/// Parsing is a pure function ([`parse_page`]), so pages can be parsed on
/// any thread and inserted afterwards. The document does no locking of its
/// own around a page's tree.
pub struct Document {
    pages: HashMap<String, Page>,
    normalizers: NormalizerRegistry,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates an empty document with the standard normalizers.
    pub fn new() -> Self {
        Self::with_config(&NormalizerConfig::default())
    }

    pub fn with_config(config: &NormalizerConfig) -> Self {
        Self { pages: HashMap::new(), normalizers: NormalizerRegistry::new(config) }
    }

    /// Parses `text` and stores it under `title`.
    ///
    /// An unterminated template is not an error; check the returned status.
    pub fn parse_page(&mut self, title: &str, text: &str) -> Result<ParseStatus, DocumentError> {
        if self.pages.contains_key(title) {
            return Err(DocumentError::DuplicateTitle(title.to_string()));
        }
        let page = parse_page(title, text)?;
        let status = page.status();
        self.insert(title, page)?;
        Ok(status)
    }

    /// Stores `page` under `title`. An existing page must be removed first.
    pub fn insert(&mut self, title: &str, page: Page) -> Result<(), DocumentError> {
        if self.pages.contains_key(title) {
            return Err(DocumentError::DuplicateTitle(title.to_string()));
        }
        debug!("Inserting page '{}'", title);
        self.pages.insert(title.to_string(), page);
        Ok(())
    }

    pub fn remove(&mut self, title: &str) -> Option<Page> {
        debug!("Removing page '{}'", title);
        self.pages.remove(title)
    }

    pub fn get(&self, title: &str) -> Option<&Page> {
        self.pages.get(title)
    }

    pub fn get_mut(&mut self, title: &str) -> Option<&mut Page> {
        self.pages.get_mut(title)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.pages.contains_key(title)
    }

    /// Titles of all stored pages, sorted.
    pub fn titles(&self) -> Vec<&str> {
        let mut titles: Vec<&str> = self.pages.keys().map(String::as_str).collect();
        titles.sort_unstable();
        titles
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn normalizers(&self) -> &NormalizerRegistry {
        &self.normalizers
    }

    fn page(&self, title: &str) -> Result<&Page, DocumentError> {
        self.pages.get(title).ok_or_else(|| DocumentError::UnknownPage(title.to_string()))
    }

    // --- Queries ---

    pub fn values_of<'a>(&'a self, title: &str, name: &'a str) -> Result<ValuesOf<'a>, DocumentError> {
        Ok(query::values_of(self.page(title)?.root(), name))
    }

    pub fn linguistic_source(&self, title: &str) -> Result<Option<&str>, DocumentError> {
        Ok(query::linguistic_source(self.page(title)?.root())?)
    }

    pub fn linguistic_target(&self, title: &str) -> Result<Option<&str>, DocumentError> {
        Ok(query::linguistic_target(self.page(title)?.root())?)
    }

    pub fn example_texts(&self, title: &str) -> Result<ValuesOf<'_>, DocumentError> {
        Ok(query::example_texts(self.page(title)?.root()))
    }

    // --- Serialization ---

    pub fn page_markup(&self, title: &str) -> Result<String, DocumentError> {
        Ok(serializers::to_template_markup(self.page(title)?.root()))
    }

    pub fn page_structured(&self, title: &str) -> Result<String, DocumentError> {
        Ok(serializers::to_structured_markup(self.page(title)?.root()))
    }

    // --- Normalization ---

    /// Applies the normalizer registered as `name`; returns the rewrite count.
    pub fn normalize(&mut self, title: &str, name: &str) -> Result<usize, DocumentError> {
        let normalizer = self.normalizers.get(name)?;
        self.apply(title, normalizer)
    }

    /// Applies every registered normalizer in registration order.
    pub fn normalize_all(&mut self, title: &str) -> Result<usize, DocumentError> {
        let mut changed = 0;
        for normalizer in self.normalizers.all()? {
            changed += self.apply(title, normalizer)?;
        }
        Ok(changed)
    }

    fn apply(&mut self, title: &str, normalizer: Arc<dyn Normalizer>) -> Result<usize, DocumentError> {
        let page = self
            .pages
            .get_mut(title)
            .ok_or_else(|| DocumentError::UnknownPage(title.to_string()))?;
        let changed = normalizer.apply(title, page.root_mut());
        debug!("Normalizer '{}' changed {} nodes on '{}'", normalizer.name(), changed, title);
        Ok(changed)
    }
}
