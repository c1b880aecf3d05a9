//! UPDATE statements.

use super::context::ConversionContext;
use super::expr::resolve;
use super::predicate;
use super::table::table_ref;
use crate::error::{ConvertError, ConvertResult};
use crate::ident::render_name;
use crate::options::Settings;
use crate::parse::describe;
use crate::value::Value;
use pg_query::NodeEnum;
use pg_query::protobuf::{MultiAssignRef, Node, ResTarget, UpdateStmt};

pub(crate) fn translate(ctx: &mut ConversionContext, stmt: &UpdateStmt) -> ConvertResult<()> {
    if stmt.with_clause.is_some() {
        return Err(ConvertError::unsupported("WITH"));
    }
    if !stmt.from_clause.is_empty() {
        return Err(ConvertError::unsupported("UPDATE ... FROM"));
    }

    let rv = stmt
        .relation
        .as_ref()
        .ok_or_else(|| ConvertError::unsupported("UPDATE without target table"))?;
    let table = table_ref(rv, true)?;
    ctx.builder.from(table);

    for target in &stmt.target_list {
        let (column, value) = assignment(&ctx.settings, target)?;
        ctx.builder.update(column, value);
    }

    if let Some(where_clause) = stmt.where_clause.as_deref() {
        let cond = predicate::translate(&ctx.settings, where_clause)?;
        ctx.builder.and_where(cond);
    }
    Ok(())
}

/// One `column = value` pair of a SET list.
pub(crate) fn assignment(settings: &Settings, target: &Node) -> ConvertResult<(String, Value)> {
    let res = set_target(target)?;
    let column = render_name(&[res.name.as_str()])?;
    let val = res
        .val
        .as_deref()
        .ok_or_else(|| ConvertError::unsupported(format!("SET {} without value", res.name)))?;
    Ok((column, assignment_value(settings, val)?))
}

fn set_target(node: &Node) -> ConvertResult<&ResTarget> {
    match node.node.as_ref() {
        Some(NodeEnum::ResTarget(res)) if res.indirection.is_empty() => Ok(res),
        Some(NodeEnum::ResTarget(res)) => Err(ConvertError::unsupported(format!(
            "subscripted SET target {}",
            res.name
        ))),
        _ => Err(ConvertError::unsupported("SET item")),
    }
}

/// The value side of an assignment. Tuple assignments
/// (`(a, b) = (x, y)`) arrive one column at a time.
pub(crate) fn assignment_value(settings: &Settings, val: &Node) -> ConvertResult<Value> {
    match val.node.as_ref() {
        Some(NodeEnum::MultiAssignRef(multi)) => tuple_element(settings, multi),
        _ => resolve(settings, val),
    }
}

fn tuple_element(settings: &Settings, multi: &MultiAssignRef) -> ConvertResult<Value> {
    let source = multi
        .source
        .as_deref()
        .ok_or_else(|| ConvertError::unsupported("tuple assignment without source"))?;
    let Some(NodeEnum::RowExpr(row)) = source.node.as_ref() else {
        return Err(ConvertError::unsupported(format!(
            "tuple assignment from {}",
            describe(source)
        )));
    };
    if row.args.len() != multi.ncolumns as usize {
        return Err(ConvertError::mismatch(format!(
            "tuple assignment of {} columns from {} values",
            multi.ncolumns,
            row.args.len()
        )));
    }
    let element = usize::try_from(multi.colno - 1)
        .ok()
        .and_then(|idx| row.args.get(idx))
        .ok_or_else(|| ConvertError::mismatch("tuple assignment index out of range"))?;
    resolve(settings, element)
}
