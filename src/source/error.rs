use thiserror::Error;

/// Errors produced while reading or writing Go source structure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    /// The Go grammar could not be loaded or parsing was cancelled
    #[error("Go parser unavailable: {0}")]
    Parser(String),
    /// The text is not syntactically valid Go
    #[error("line {line}, column {column}: syntax error")]
    Syntax { line: usize, column: usize },
    /// The file does not start with a `package` clause
    #[error("expected 'package' clause at the start of the file")]
    MissingPackageClause,
    /// A field without a source location was added to a parsed file
    #[error("field '{field}' has no location in the source file")]
    DetachedField { field: String },
    /// A tag literal contains an invalid escape sequence
    #[error("line {line}: invalid escape in tag literal")]
    InvalidTagLiteral { line: usize },
}
