//! Statement conversion.
//!
//! [`Converter::convert`] runs the whole pipeline for one statement:
//!
//! 1. `$N` markers are hidden from the parser as sentinel string literals.
//! 2. The text is parsed; it must hold exactly one statement.
//! 3. The statement translator for its kind fills a [`QueryBuilder`]
//!    (or, for upserts, produces a MERGE script).
//! 4. RETURNING is emulated on top of the base statement.
//! 5. Sentinels become Oracle `:N` markers.
//!
//! Translation fails closed: a construct without a rule is an
//! [`Unsupported`](crate::Unsupported) error unless the converter is lenient.
//!
//! [`QueryBuilder`]: crate::QueryBuilder

mod context;
mod delete;
mod expr;
mod function;
mod insert;
mod predicate;
mod projection;
mod returning;
mod select;
mod table;
mod update;
mod upsert;

use crate::builder::Operation;
use crate::error::{ConvertError, ConvertResult};
use crate::options::ConvertOptions;
use crate::parse::{node_kind, parse_single};
use crate::placeholder::{dollar_to_sentinel, sentinel_to_target};
use context::ConversionContext;
use pg_query::NodeEnum;
use std::time::Instant;

/// Converts PostgreSQL statements to Oracle.
///
/// Holds only immutable options, so one converter can be shared between
/// threads.
///
/// # Example
///
/// ```
/// use pg2ora::{ConvertOptions, Converter};
///
/// let converter = Converter::new(ConvertOptions::default());
/// let sql = converter.convert("select count(distinct $1) from b").unwrap();
/// assert_eq!(sql, "SELECT count(DISTINCT :1) FROM b");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert one statement.
    pub fn convert(&self, sql: &str) -> ConvertResult<String> {
        let start = Instant::now();
        let settings = self.options.settings();

        let prepared = dollar_to_sentinel(sql);
        let stmt = parse_single(&prepared)?;

        let in_transaction = self.options.in_transaction;
        let (ctx, returning) = match stmt.node.as_ref() {
            Some(NodeEnum::SelectStmt(s)) => {
                let mut ctx = ConversionContext::new(settings, Operation::Select, in_transaction);
                select::translate(&mut ctx, s)?;
                (ctx, &[][..])
            }
            Some(NodeEnum::InsertStmt(s)) => {
                let mut ctx = ConversionContext::new(settings, Operation::Insert, in_transaction);
                insert::translate(&mut ctx, s)?;
                (ctx, s.returning_list.as_slice())
            }
            Some(NodeEnum::UpdateStmt(s)) => {
                let mut ctx = ConversionContext::new(settings, Operation::Update, in_transaction);
                update::translate(&mut ctx, s)?;
                (ctx, s.returning_list.as_slice())
            }
            Some(NodeEnum::DeleteStmt(s)) => {
                let mut ctx = ConversionContext::new(settings, Operation::Delete, in_transaction);
                delete::translate(&mut ctx, s)?;
                (ctx, &[][..])
            }
            _ => {
                return Err(ConvertError::unsupported(format!(
                    "statement {}",
                    node_kind(&stmt)
                )));
            }
        };

        let base = ctx.base_sql()?;
        let script = returning::apply(&ctx, returning, base)?;
        let out = sentinel_to_target(&script)?;

        tracing::debug!(
            kind = ctx.operation().as_str(),
            dialect = %settings.dialect,
            strict = settings.strict,
            elapsed_us = start.elapsed().as_micros() as u64,
            "converted statement"
        );
        Ok(out)
    }
}

/// Convert one statement with default options.
pub fn convert(sql: &str) -> ConvertResult<String> {
    Converter::default().convert(sql)
}

#[cfg(test)]
pub(crate) mod tests_support {
    use crate::options::{ConvertOptions, Settings};
    use crate::parse::parse_single;
    use pg_query::NodeEnum;
    use pg_query::protobuf::Node;

    pub fn strict() -> Settings {
        ConvertOptions::default().settings()
    }

    pub fn lenient() -> Settings {
        ConvertOptions::default().lenient().settings()
    }

    pub fn parse_stmt(sql: &str) -> Node {
        parse_single(sql).unwrap()
    }

    /// The expression of the first projection item of a SELECT.
    pub fn first_target(sql: &str) -> Node {
        let Some(NodeEnum::SelectStmt(select)) = parse_stmt(sql).node else {
            panic!("expected select");
        };
        let Some(NodeEnum::ResTarget(target)) = select.target_list[0].node.clone() else {
            panic!("expected target");
        };
        *target.val.unwrap()
    }
}
