//! Conversion options.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target SQL dialect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Oracle,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Oracle => "oracle",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "oracle" => Ok(Dialect::Oracle),
            other => Err(format!("unsupported target dialect: {other}")),
        }
    }
}

/// Options controlling one conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Target dialect.
    pub dialect: Dialect,
    /// Refuse expressions that have no explicit translation (default `true`).
    ///
    /// When `false`, such expressions are copied through in their PostgreSQL
    /// rendering and a warning is logged.
    pub strict: bool,
    /// The caller already runs inside a transaction, so emulation scripts
    /// must not add their own savepoint/commit framing.
    pub in_transaction: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::Oracle,
            strict: true,
            in_transaction: false,
        }
    }
}

impl ConvertOptions {
    /// Create options with defaults (strict, not in a transaction).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target dialect.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Set strict mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Allow untranslated expressions to pass through.
    pub fn lenient(self) -> Self {
        self.with_strict(false)
    }

    /// Mark the conversion as running inside a caller-managed transaction.
    pub fn in_transaction(mut self, in_transaction: bool) -> Self {
        self.in_transaction = in_transaction;
        self
    }

    pub(crate) fn settings(&self) -> Settings {
        Settings {
            dialect: self.dialect,
            strict: self.strict,
        }
    }
}

/// The part of [`ConvertOptions`] shared with nested statement scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Settings {
    pub dialect: Dialect,
    pub strict: bool,
}
