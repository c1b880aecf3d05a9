//! # pg2ora
//!
//! Convert PostgreSQL statements to Oracle.
//!
//! ## Features
//!
//! - **One statement in, one script out**: SELECT, INSERT, UPDATE and DELETE
//! - **Positional markers**: `$1` becomes `:1`, never renumbered
//! - **Upsert**: `INSERT ... ON CONFLICT` becomes `MERGE INTO ...`
//! - **RETURNING**: emulated with a follow-up SELECT, optionally framed by a
//!   savepoint and commit
//! - **Fail closed**: anything without a translation rule is an
//!   [`Unsupported`] error, unless the converter is lenient
//!
//! ## Usage
//!
//! ```
//! let sql = pg2ora::convert("select title from a union select title from b").unwrap();
//! assert_eq!(sql, "(SELECT title FROM b) UNION (SELECT title FROM a)");
//!
//! let upsert = pg2ora::convert(
//!     "insert into a(field1) values($1) on conflict (field1) do update set b = $2",
//! )
//! .unwrap();
//! assert!(upsert.starts_with("MERGE INTO a t\nUSING (select :1 field1 FROM DUAL) s"));
//! ```
//!
//! Options are set on a [`Converter`]:
//!
//! ```
//! use pg2ora::{ConvertOptions, Converter};
//!
//! let converter = Converter::new(ConvertOptions::new().lenient().in_transaction(true));
//! let sql = converter
//!     .convert("update t set n = n + 1 where id = $1 returning n")
//!     .unwrap();
//! assert_eq!(sql, "UPDATE t SET n=(n + 1) WHERE id=:1;\nSELECT n FROM t WHERE id=:1");
//! ```

pub mod builder;
pub mod condition;
pub mod convert;
pub mod error;
pub mod ident;
pub mod options;
pub mod parse;
pub mod placeholder;
pub mod reserved;
pub mod types;
pub mod value;

pub use builder::{JoinKind, Operation, QueryBuilder, SetOp};
pub use condition::Condition;
pub use convert::{Converter, convert};
pub use error::{ConvertError, ConvertResult, ErrorCategory, Unsupported};
pub use ident::{Ident, IdentPart};
pub use options::{ConvertOptions, Dialect};
pub use value::Value;
