//! `INSERT ... ON CONFLICT` emulated with `MERGE`.
//!
//! The inserted row becomes the `USING` pseudo-row `s`, the conflict columns
//! become the `ON` condition, and `excluded.<col>` references in the update
//! list point at `s`, references to the target table at `t`. Conflict columns are compared through a scalar
//! subquery so they may also appear in the update list.

use super::context::{ConversionContext, UpsertDescriptor};
use super::update::assignment_value;
use crate::error::{ConvertError, ConvertResult, Unsupported};
use crate::ident::render_name;
use crate::value::Value;
use pg_query::NodeEnum;
use pg_query::protobuf::{InferClause, Node, OnConflictAction, OnConflictClause, ResTarget};

/// Pseudo-row alias of the inserted values.
const SOURCE_ALIAS: &str = "s";
/// Alias of the MERGE target.
const TARGET_ALIAS: &str = "t";

/// `target_names` are the names the statement may use for the target table
/// (its name and alias).
pub(crate) fn translate(
    ctx: &mut ConversionContext,
    clause: &OnConflictClause,
    target_names: &[&str],
) -> ConvertResult<()> {
    let conflict_columns = conflict_columns(clause.infer.as_deref())?;
    for column in &conflict_columns {
        if !ctx.insert_columns.contains(column) {
            return Err(ConvertError::mismatch(format!(
                "conflict column {column} is not an insert column"
            )));
        }
    }

    let do_nothing = match clause.action() {
        OnConflictAction::OnconflictNothing => true,
        OnConflictAction::OnconflictUpdate => false,
        other => {
            return Err(ConvertError::unsupported(format!("ON CONFLICT action {other:?}")));
        }
    };
    if clause.where_clause.is_some() {
        return Err(ConvertError::unsupported("ON CONFLICT DO UPDATE ... WHERE"));
    }

    let mut update_set = Vec::with_capacity(clause.target_list.len());
    if !do_nothing {
        for target in &clause.target_list {
            update_set.push(set_item(ctx, target, target_names)?);
        }
    }

    let table = ctx
        .builder
        .table()
        .ok_or_else(|| ConvertError::builder("INSERT without target table"))?
        .to_string();

    let descriptor = UpsertDescriptor {
        table,
        using: ctx
            .insert_values
            .iter()
            .zip(&ctx.insert_columns)
            .map(|(value, column)| format!("{} {column}", value.display()))
            .collect(),
        on: conflict_columns
            .iter()
            .map(|k| format!("(SELECT {TARGET_ALIAS}.{k} FROM DUAL) = {SOURCE_ALIAS}.{k}"))
            .collect(),
        update_set,
        insert_columns: ctx.insert_columns.clone(),
        insert_values: ctx
            .insert_columns
            .iter()
            .map(|c| format!("{SOURCE_ALIAS}.{c}"))
            .collect(),
        conflict_columns,
        do_nothing,
    };

    let sql = render_merge(&descriptor);
    tracing::trace!(%sql, "upsert rewritten as MERGE");
    ctx.override_sql = Some(sql);
    ctx.upsert = Some(descriptor);
    Ok(())
}

/// Rendered conflict target columns; a bare constraint name does not say
/// which columns to match on.
fn conflict_columns(infer: Option<&InferClause>) -> ConvertResult<Vec<String>> {
    let Some(infer) = infer else {
        return Err(Unsupported::MissingConflictColumns.into());
    };
    if !infer.conname.is_empty() || infer.index_elems.is_empty() {
        return Err(Unsupported::MissingConflictColumns.into());
    }
    if infer.where_clause.is_some() {
        return Err(ConvertError::unsupported("partial index conflict target"));
    }

    infer
        .index_elems
        .iter()
        .map(|elem| match elem.node.as_ref() {
            Some(NodeEnum::IndexElem(index)) if !index.name.is_empty() => {
                render_name(&[index.name.as_str()])
            }
            _ => Err(ConvertError::unsupported("expression conflict target")),
        })
        .collect()
}

fn set_item(ctx: &ConversionContext, target: &Node, target_names: &[&str]) -> ConvertResult<String> {
    let Some(NodeEnum::ResTarget(res)) = target.node.as_ref() else {
        return Err(ConvertError::unsupported("ON CONFLICT SET item"));
    };
    if !res.indirection.is_empty() {
        return Err(ConvertError::unsupported(format!(
            "subscripted SET target {}",
            res.name
        )));
    }
    let column = render_name(&[res.name.as_str()])?;
    let value = set_value(ctx, res, target_names)?;
    Ok(format!("{column} = {}", value.display()))
}

fn set_value(
    ctx: &ConversionContext,
    res: &ResTarget,
    target_names: &[&str],
) -> ConvertResult<Value> {
    let mut val = res
        .val
        .as_deref()
        .cloned()
        .ok_or_else(|| ConvertError::unsupported(format!("SET {} without value", res.name)))?;
    requalify(&mut val, target_names);
    assignment_value(&ctx.settings, &val)
}

/// Point `excluded.<col>` at the pseudo-row and target table references at
/// the MERGE target alias.
fn requalify(node: &mut Node, target_names: &[&str]) {
    let recurse = |child: &mut Node| requalify(child, target_names);
    match node.node.as_mut() {
        Some(NodeEnum::ColumnRef(col)) => {
            if col.fields.len() == 2
                && let Some(NodeEnum::String(s)) = col.fields[0].node.as_mut()
            {
                if s.sval == "excluded" {
                    s.sval = SOURCE_ALIAS.to_string();
                } else if target_names.contains(&s.sval.as_str()) {
                    s.sval = TARGET_ALIAS.to_string();
                }
            }
        }
        Some(NodeEnum::AExpr(expr)) => {
            for side in [expr.lexpr.as_deref_mut(), expr.rexpr.as_deref_mut()]
                .into_iter()
                .flatten()
            {
                recurse(side);
            }
        }
        Some(NodeEnum::TypeCast(cast)) => {
            if let Some(arg) = cast.arg.as_deref_mut() {
                recurse(arg);
            }
        }
        Some(NodeEnum::FuncCall(call)) => call.args.iter_mut().for_each(recurse),
        Some(NodeEnum::MultiAssignRef(multi)) => {
            if let Some(source) = multi.source.as_deref_mut() {
                recurse(source);
            }
        }
        Some(NodeEnum::RowExpr(row)) => row.args.iter_mut().for_each(recurse),
        Some(NodeEnum::List(list)) => list.items.iter_mut().for_each(recurse),
        _ => {}
    }
}

/// Render the MERGE statement.
pub(crate) fn render_merge(d: &UpsertDescriptor) -> String {
    let mut sql = format!(
        "MERGE INTO {} {TARGET_ALIAS}\nUSING (select {} FROM DUAL) {SOURCE_ALIAS}\nON ({})\n",
        d.table,
        d.using.join(", "),
        d.on.join(" AND ")
    );
    if !d.do_nothing {
        sql.push_str(&format!(
            "WHEN MATCHED THEN\nUPDATE SET {}\n",
            d.update_set.join(", ")
        ));
    }
    sql.push_str(&format!(
        "WHEN NOT MATCHED THEN\nINSERT ({}) VALUES({})",
        d.insert_columns.join(","),
        d.insert_values.join(", ")
    ));
    sql
}
