//! INSERT statements.

use super::context::ConversionContext;
use super::expr::resolve;
use super::table::table_ref;
use super::{select, upsert};
use crate::error::{ConvertError, ConvertResult};
use crate::ident::render_name;
use crate::parse::node_kind;
use pg_query::NodeEnum;
use pg_query::protobuf::{InsertStmt, Node, OverridingKind};

pub(crate) fn translate(ctx: &mut ConversionContext, stmt: &InsertStmt) -> ConvertResult<()> {
    if stmt.with_clause.is_some() {
        return Err(ConvertError::unsupported("WITH"));
    }
    if stmt.r#override() != OverridingKind::OverridingNotSet {
        return Err(ConvertError::unsupported("OVERRIDING"));
    }

    let rv = stmt
        .relation
        .as_ref()
        .ok_or_else(|| ConvertError::unsupported("INSERT without target table"))?;
    let table = table_ref(rv, false)?;
    ctx.builder.into_table(table);

    if stmt.cols.is_empty() {
        return Err(ConvertError::unsupported("INSERT without a column list"));
    }
    let columns = stmt
        .cols
        .iter()
        .map(insert_column)
        .collect::<ConvertResult<Vec<_>>>()?;

    let source = match stmt.select_stmt.as_deref() {
        Some(node) => node,
        None => return Err(ConvertError::unsupported("INSERT ... DEFAULT VALUES")),
    };
    let Some(NodeEnum::SelectStmt(source_stmt)) = source.node.as_ref() else {
        return Err(ConvertError::unsupported(format!(
            "INSERT source {}",
            node_kind(source)
        )));
    };

    match source_stmt.values_lists.as_slice() {
        [] => {
            if stmt.on_conflict_clause.is_some() {
                return Err(ConvertError::unsupported("INSERT ... SELECT with ON CONFLICT"));
            }
            let sql = select::nested(ctx, source)?;
            ctx.builder.columns(columns.clone());
            ctx.builder.insert_select(sql);
            ctx.insert_from_select = true;
            ctx.insert_columns = columns;
        }
        [row] => {
            let values = match row.node.as_ref() {
                Some(NodeEnum::List(list)) => list
                    .items
                    .iter()
                    .map(|item| resolve(&ctx.settings, item))
                    .collect::<ConvertResult<Vec<_>>>()?,
                _ => return Err(ConvertError::unsupported("VALUES row")),
            };
            ctx.set_insert_row(columns.clone(), values.clone())?;
            ctx.builder.columns(columns);
            ctx.builder.insert_values(values);
        }
        rows => {
            return Err(ConvertError::unsupported(format!(
                "multi-row VALUES ({} rows)",
                rows.len()
            )));
        }
    }

    if let Some(clause) = stmt.on_conflict_clause.as_deref() {
        let mut target_names = vec![rv.relname.as_str()];
        if let Some(alias) = &rv.alias {
            target_names.push(alias.aliasname.as_str());
        }
        upsert::translate(ctx, clause, &target_names)?;
    }
    Ok(())
}

fn insert_column(node: &Node) -> ConvertResult<String> {
    match node.node.as_ref() {
        Some(NodeEnum::ResTarget(res)) if res.indirection.is_empty() => {
            render_name(&[res.name.as_str()])
        }
        _ => Err(ConvertError::unsupported("subscripted INSERT column")),
    }
}
