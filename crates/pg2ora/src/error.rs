//! Error types for pg2ora

use thiserror::Error;

/// Result type alias for conversion operations
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Broad classification of a [`ConvertError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The input is valid PostgreSQL but uses a construct we refuse to translate.
    UnsupportedConstruct,
    /// The input (or an internal marker run) is not well formed.
    MalformedInput,
    /// The statement shape is inconsistent (e.g. column/value counts differ).
    StructuralMismatch,
    /// The PostgreSQL parser rejected the input.
    Parse,
    /// The builder could not render the accumulated model.
    Builder,
}

/// The specific construct that was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unsupported {
    /// Type name missing from the type table.
    #[error("type {0}")]
    Type(String),

    /// Function outside the allow-list, or an allowed one used in an unsupported form.
    #[error("function {0}")]
    Function(String),

    /// Identifier with too many parts or characters that cannot be quoted.
    #[error("name {0}")]
    Name(String),

    /// Boolean expression the predicate translator does not handle.
    #[error("predicate {0}")]
    Predicate(String),

    /// `IS` comparison against something other than NULL.
    #[error("IS comparison against non-NULL value: {0}")]
    NullComparison(String),

    /// `ON CONFLICT` without explicit conflict target columns.
    #[error("ON CONFLICT requires conflict target columns")]
    MissingConflictColumns,

    /// `INSERT ... RETURNING` without an `ON CONFLICT` clause to identify the row.
    #[error("INSERT ... RETURNING requires ON CONFLICT target columns")]
    MissingOnConflict,

    /// `RETURNING` referencing the `excluded` pseudo-table.
    #[error("RETURNING cannot reference the excluded table")]
    ExcludedTable,

    /// Any other construct.
    #[error("{0}")]
    Construct(String),
}

/// Error types for statement conversion
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Refused construct
    #[error("Unsupported {0}")]
    Unsupported(#[from] Unsupported),

    /// Placeholder marker run broken at the given byte offset
    #[error("Malformed placeholder marker at offset {offset}")]
    MalformedMarker { offset: usize },

    /// More than one statement in the input
    #[error("Expected a single statement, found {0}")]
    MultipleStatements(usize),

    /// No statement in the input
    #[error("Expected a single statement, found none")]
    EmptyInput,

    /// Statement parts that must line up do not
    #[error("Structural mismatch: {0}")]
    StructuralMismatch(String),

    /// Parser error, message kept as reported
    #[error("Parse error: {0}")]
    Parse(String),

    /// Builder render error
    #[error("Builder error: {0}")]
    Builder(String),
}

impl ConvertError {
    /// Create an unsupported-construct error
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(Unsupported::Construct(message.into()))
    }

    /// Create a structural mismatch error
    pub fn mismatch(message: impl Into<String>) -> Self {
        Self::StructuralMismatch(message.into())
    }

    /// Create a builder error
    pub fn builder(message: impl Into<String>) -> Self {
        Self::Builder(message.into())
    }

    /// Classify this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Unsupported(_) => ErrorCategory::UnsupportedConstruct,
            Self::MalformedMarker { .. } | Self::MultipleStatements(_) | Self::EmptyInput => {
                ErrorCategory::MalformedInput
            }
            Self::StructuralMismatch(_) => ErrorCategory::StructuralMismatch,
            Self::Parse(_) => ErrorCategory::Parse,
            Self::Builder(_) => ErrorCategory::Builder,
        }
    }

    /// Check if this is an unsupported-construct error
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }

    /// Check if this is a malformed-input error
    pub fn is_malformed(&self) -> bool {
        self.category() == ErrorCategory::MalformedInput
    }

    /// The refused construct, if this is an unsupported-construct error
    pub fn as_unsupported(&self) -> Option<&Unsupported> {
        match self {
            Self::Unsupported(u) => Some(u),
            _ => None,
        }
    }
}

impl From<pg_query::Error> for ConvertError {
    fn from(err: pg_query::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
