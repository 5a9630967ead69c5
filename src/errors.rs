use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("Page '{0}' does not contain a template call")]
    NoTemplateCall(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    /// The root branch is a different template, so the role does not apply.
    #[error("Expected a '{expected}' template, found '{found}'")]
    WrongTemplate { expected: String, found: String },
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("A page titled '{0}' is already loaded; remove it first")]
    DuplicateTitle(String),
    #[error("No page titled '{0}' has been parsed")]
    UnknownPage(String),
    #[error("No normalizer registered as '{0}'")]
    UnknownNormalizer(String),
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error(transparent)]
    Parser(#[from] ParserError),
    #[error(transparent)]
    Query(#[from] QueryError),
}
