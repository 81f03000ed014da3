use thiserror::Error;

/// Which directive flag an entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    Add,
    Delete,
    Overwrite,
}

/// Errors produced while parsing directive flags
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectiveError {
    /// Key cannot be represented in a `key:"value"` tag
    #[error("Invalid {kind:?} tag key '{key}': keys may only contain letters, digits and '_'")]
    InvalidKey { kind: DirectiveKind, key: String },
    /// Overwrite value would break the tag syntax
    #[error("Invalid value for tag '{key}': '{value}' must not contain '\"'")]
    InvalidValue { key: String, value: String },
}
