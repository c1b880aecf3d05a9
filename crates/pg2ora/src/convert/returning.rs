//! `RETURNING` emulated with a follow-up SELECT.
//!
//! The base statement and a SELECT of the returned projection run as one
//! script. Outside a caller's transaction the script opens a savepoint and
//! commits, so the SELECT sees the statement's own changes.

use super::context::ConversionContext;
use super::projection;
use crate::builder::Operation;
use crate::condition::Condition;
use crate::error::{ConvertError, ConvertResult, Unsupported};
use crate::parse::deparse_expr;
use pg_query::NodeEnum;
use pg_query::protobuf::Node;

const SAVEPOINT: &str = "Savepoint a;";
const COMMIT: &str = "commit;";

/// Append the RETURNING emulation to `base`; without a RETURNING list the
/// base statement is returned unchanged.
pub(crate) fn apply(
    ctx: &ConversionContext,
    returning: &[Node],
    base: String,
) -> ConvertResult<String> {
    if returning.is_empty() {
        return Ok(base);
    }
    let select = match ctx.operation() {
        Operation::Insert => insert_select(ctx, returning)?,
        Operation::Update => update_select(ctx, returning)?,
        op => {
            return Err(ConvertError::unsupported(format!(
                "{} ... RETURNING",
                op.as_str()
            )));
        }
    };
    Ok(frame(&base, &select, ctx.in_transaction))
}

fn frame(base: &str, select: &str, in_transaction: bool) -> String {
    if in_transaction {
        format!("{base};\n{select}")
    } else {
        format!("{SAVEPOINT}\n{base};\n{select};\n{COMMIT}")
    }
}

/// Select the inserted (or merged) row back by its conflict columns.
fn insert_select(ctx: &ConversionContext, returning: &[Node]) -> ConvertResult<String> {
    if ctx.insert_from_select {
        return Err(ConvertError::unsupported("RETURNING from INSERT ... SELECT"));
    }
    let Some(upsert) = &ctx.upsert else {
        return Err(Unsupported::MissingOnConflict.into());
    };
    for target in returning {
        if references_excluded(target)? {
            return Err(Unsupported::ExcludedTable.into());
        }
    }

    let mut child = ctx.child(Operation::Select);
    projection::translate(&mut child, returning)?;
    child.builder.from(upsert.table.clone());

    let mut key = Vec::with_capacity(upsert.conflict_columns.len());
    for column in &upsert.conflict_columns {
        let value = ctx.insert_value(column).ok_or_else(|| {
            ConvertError::mismatch(format!("conflict column {column} has no insert value"))
        })?;
        key.push(if value.is_null() {
            Condition::is_null(column.clone())
        } else {
            Condition::eq(column.clone(), value.clone())
        });
    }
    child.builder.and_where(Condition::And(key));
    child.builder.to_bound_sql()
}

/// Select the updated rows back through the statement's own WHERE.
fn update_select(ctx: &ConversionContext, returning: &[Node]) -> ConvertResult<String> {
    let table = ctx
        .builder
        .table()
        .ok_or_else(|| ConvertError::builder("UPDATE without target table"))?;

    let mut child = ctx.child(Operation::Select);
    projection::translate(&mut child, returning)?;
    child.builder.from(table);
    child.builder.and_where(ctx.builder.where_condition());
    child.builder.to_bound_sql()
}

fn references_excluded(target: &Node) -> ConvertResult<bool> {
    let expr = match target.node.as_ref() {
        Some(NodeEnum::ResTarget(res)) => res.val.as_deref(),
        _ => None,
    };
    match expr {
        Some(expr) => Ok(deparse_expr(expr)?.to_ascii_lowercase().contains("excluded.")),
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::tests_support::{parse_stmt, strict};
    use crate::convert::{insert, update};

    fn insert_returning(sql: &str, in_transaction: bool) -> ConvertResult<String> {
        let stmt = parse_stmt(sql);
        let Some(NodeEnum::InsertStmt(stmt)) = stmt.node else {
            panic!("expected insert");
        };
        let mut ctx = ConversionContext::new(strict(), Operation::Insert, in_transaction);
        insert::translate(&mut ctx, &stmt)?;
        let base = ctx.base_sql()?;
        apply(&ctx, &stmt.returning_list, base)
    }

    fn update_returning(sql: &str, in_transaction: bool) -> ConvertResult<String> {
        let stmt = parse_stmt(sql);
        let Some(NodeEnum::UpdateStmt(stmt)) = stmt.node else {
            panic!("expected update");
        };
        let mut ctx = ConversionContext::new(strict(), Operation::Update, in_transaction);
        update::translate(&mut ctx, &stmt)?;
        let base = ctx.base_sql()?;
        apply(&ctx, &stmt.returning_list, base)
    }

    #[test]
    fn upsert_returning_is_framed() {
        let sql = insert_returning(
            "insert into a (id, name) values (7, 'x') on conflict (id) do nothing returning id, name",
            false,
        )
        .unwrap();
        assert!(sql.starts_with("Savepoint a;\nMERGE INTO a t\n"));
        assert!(sql.ends_with(
            "INSERT (id,name) VALUES(s.id, s.name);\nSELECT id,name FROM a WHERE id=7;\ncommit;"
        ));
    }

    #[test]
    fn in_transaction_skips_framing() {
        let sql = update_returning("update t set n = n + 1 where id = 3 returning n", true).unwrap();
        assert_eq!(sql, "UPDATE t SET n=(n + 1) WHERE id=3;\nSELECT n FROM t WHERE id=3");
    }

    #[test]
    fn update_returning_reuses_table_and_where() {
        let sql = update_returning("update t x set n = 1 where x.k = 'a' returning x.n", false)
            .unwrap();
        assert_eq!(
            sql,
            "Savepoint a;\nUPDATE t x SET n=1 WHERE x.k='a';\nSELECT x.n FROM t x WHERE x.k='a';\ncommit;"
        );
    }

    #[test]
    fn null_key_uses_is_null() {
        let sql = insert_returning(
            "insert into a (k, v) values (null, 1) on conflict (k) do update set v = 2 returning v",
            true,
        )
        .unwrap();
        assert!(sql.ends_with(";\nSELECT v FROM a WHERE k IS NULL"));
    }

    #[test]
    fn insert_requires_on_conflict() {
        let err = insert_returning("insert into a (id) values (1) returning id", false).unwrap_err();
        assert_eq!(err.as_unsupported(), Some(&Unsupported::MissingOnConflict));
    }

    #[test]
    fn excluded_in_projection_is_refused() {
        let err = insert_returning(
            "insert into a (id) values (1) on conflict (id) do nothing returning excluded.id",
            false,
        )
        .unwrap_err();
        assert_eq!(err.as_unsupported(), Some(&Unsupported::ExcludedTable));
    }

    #[test]
    fn insert_select_returning_is_refused() {
        assert!(
            insert_returning("insert into a (id) select id from b returning id", false)
                .unwrap_err()
                .is_unsupported()
        );
    }
}
