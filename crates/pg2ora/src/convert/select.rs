//! SELECT statements and set operations.

use super::context::ConversionContext;
use super::expr::{column_name, resolve};
use super::{predicate, projection, table};
use crate::builder::Operation;
use crate::error::{ConvertError, ConvertResult};
use crate::parse::{describe, node_kind};
use crate::placeholder::marker_position;
use crate::value::Value;
use pg_query::NodeEnum;
use pg_query::protobuf::{
    LimitOption, Node, SelectStmt, SetOperation, SortBy, SortByDir, SortByNulls,
};

pub(crate) fn translate(ctx: &mut ConversionContext, stmt: &SelectStmt) -> ConvertResult<()> {
    reject_unsupported(stmt)?;
    order_by(ctx, &stmt.sort_clause)?;
    limit(ctx, stmt)?;

    match stmt.op() {
        SetOperation::SetopUnion | SetOperation::SetopIntersect | SetOperation::SetopExcept => {
            set_operation(ctx, stmt)
        }
        _ => simple(ctx, stmt),
    }
}

/// Translate a nested query in a fresh context and render it.
pub(crate) fn nested(parent: &ConversionContext, node: &Node) -> ConvertResult<String> {
    match node.node.as_ref() {
        Some(NodeEnum::SelectStmt(stmt)) => nested_select(parent, stmt),
        _ => Err(ConvertError::unsupported(format!(
            "nested {}",
            node_kind(node)
        ))),
    }
}

fn nested_select(parent: &ConversionContext, stmt: &SelectStmt) -> ConvertResult<String> {
    let mut child = parent.child(Operation::Select);
    translate(&mut child, stmt)?;
    child.builder.to_bound_sql()
}

fn reject_unsupported(stmt: &SelectStmt) -> ConvertResult<()> {
    let refuse = |what: &str| Err(ConvertError::unsupported(what.to_string()));
    if stmt.with_clause.is_some() {
        return refuse("WITH");
    }
    if stmt.into_clause.is_some() {
        return refuse("SELECT INTO");
    }
    if !stmt.locking_clause.is_empty() {
        return refuse("FOR UPDATE / FOR SHARE");
    }
    if !stmt.window_clause.is_empty() {
        return refuse("WINDOW");
    }
    if !stmt.values_lists.is_empty() {
        return refuse("VALUES as a query");
    }
    if stmt.having_clause.is_some() {
        return refuse("HAVING");
    }
    if stmt.group_distinct {
        return refuse("GROUP BY DISTINCT");
    }
    if stmt.distinct_clause.iter().any(|n| n.node.is_some()) {
        return refuse("DISTINCT ON");
    }
    if stmt.limit_option() == LimitOption::WithTies {
        return refuse("FETCH ... WITH TIES");
    }
    Ok(())
}

fn simple(ctx: &mut ConversionContext, stmt: &SelectStmt) -> ConvertResult<()> {
    projection::translate(ctx, &stmt.target_list)?;
    table::translate_from(ctx, &stmt.from_clause)?;

    if let Some(where_clause) = stmt.where_clause.as_deref() {
        let cond = predicate::translate(&ctx.settings, where_clause)?;
        ctx.builder.and_where(cond);
    }

    match stmt.group_clause.as_slice() {
        [] => {}
        [key] => match key.node.as_ref() {
            Some(NodeEnum::ColumnRef(col)) => {
                let key = column_name(col)?;
                ctx.builder.group_by(key);
            }
            _ => {
                return Err(ConvertError::unsupported(format!(
                    "GROUP BY {}",
                    describe(key)
                )));
            }
        },
        keys => {
            return Err(ConvertError::unsupported(format!(
                "GROUP BY with {} keys",
                keys.len()
            )));
        }
    }

    if !stmt.distinct_clause.is_empty() {
        ctx.builder.distinct();
    }
    Ok(())
}

/// Both operands are translated on their own. UNION and INTERSECT are
/// written right operand first; EXCEPT keeps source order.
fn set_operation(ctx: &mut ConversionContext, stmt: &SelectStmt) -> ConvertResult<()> {
    let (Some(left), Some(right)) = (stmt.larg.as_deref(), stmt.rarg.as_deref()) else {
        return Err(ConvertError::unsupported("set operation without two operands"));
    };
    let left = nested_select(ctx, left)?;
    let right = nested_select(ctx, right)?;

    match stmt.op() {
        SetOperation::SetopUnion => {
            ctx.builder.union(stmt.all, right, left);
        }
        SetOperation::SetopIntersect => {
            ctx.builder.intersect(stmt.all, right, left);
        }
        SetOperation::SetopExcept => {
            ctx.builder.except(stmt.all, left, right);
        }
        _ => return Err(ConvertError::unsupported("set operation")),
    }
    Ok(())
}

fn order_by(ctx: &mut ConversionContext, sort_clause: &[Node]) -> ConvertResult<()> {
    for item in sort_clause {
        let Some(NodeEnum::SortBy(sort)) = item.node.as_ref() else {
            return Err(ConvertError::unsupported(format!(
                "ORDER BY {}",
                node_kind(item)
            )));
        };
        let key = sort_key(sort)?;
        ctx.builder.order_by(key);
    }
    Ok(())
}

/// A plain column name in default order. Directions, NULLS ordering,
/// qualified names and expressions are refused.
fn sort_key(sort: &SortBy) -> ConvertResult<String> {
    let node = sort
        .node
        .as_deref()
        .ok_or_else(|| ConvertError::unsupported("ORDER BY without key"))?;
    if sort.sortby_dir() != SortByDir::SortbyDefault {
        return Err(ConvertError::unsupported("ORDER BY direction"));
    }
    if sort.sortby_nulls() != SortByNulls::SortbyNullsDefault {
        return Err(ConvertError::unsupported("ORDER BY ... NULLS"));
    }
    match node.node.as_ref() {
        Some(NodeEnum::ColumnRef(col)) if col.fields.len() == 1 => column_name(col),
        _ => Err(ConvertError::unsupported(format!(
            "ORDER BY {}",
            describe(node)
        ))),
    }
}

fn limit(ctx: &mut ConversionContext, stmt: &SelectStmt) -> ConvertResult<()> {
    let count = row_count(ctx, stmt.limit_count.as_deref(), "LIMIT")?;
    let offset = row_count(ctx, stmt.limit_offset.as_deref(), "OFFSET")?;
    if count.is_some() || offset.is_some() {
        ctx.builder.limit(count, offset);
    }
    Ok(())
}

/// An integer literal or a placeholder; `LIMIT ALL` / `LIMIT NULL` mean none.
fn row_count(
    ctx: &ConversionContext,
    node: Option<&Node>,
    clause: &str,
) -> ConvertResult<Option<Value>> {
    let Some(node) = node else {
        return Ok(None);
    };
    match resolve(&ctx.settings, node)? {
        Value::Null => Ok(None),
        value @ Value::Int(_) => Ok(Some(value)),
        Value::Str(text) if marker_position(&text).is_some() => Ok(Some(Value::Str(text))),
        Value::Expr(text) if text.starts_with(':') => Ok(Some(Value::Expr(text))),
        _ => Err(ConvertError::unsupported(format!(
            "{clause} {}",
            describe(node)
        ))),
    }
}
