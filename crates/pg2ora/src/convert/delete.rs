//! DELETE statements.

use super::context::ConversionContext;
use super::predicate;
use super::table::table_ref;
use crate::error::{ConvertError, ConvertResult};
use pg_query::protobuf::DeleteStmt;

pub(crate) fn translate(ctx: &mut ConversionContext, stmt: &DeleteStmt) -> ConvertResult<()> {
    if stmt.with_clause.is_some() {
        return Err(ConvertError::unsupported("WITH"));
    }
    if !stmt.using_clause.is_empty() {
        return Err(ConvertError::unsupported("DELETE ... USING"));
    }
    if !stmt.returning_list.is_empty() {
        return Err(ConvertError::unsupported("DELETE ... RETURNING"));
    }

    let rv = stmt
        .relation
        .as_ref()
        .ok_or_else(|| ConvertError::unsupported("DELETE without target table"))?;
    let table = table_ref(rv, true)?;
    ctx.builder.from(table);

    if let Some(where_clause) = stmt.where_clause.as_deref() {
        let cond = predicate::translate(&ctx.settings, where_clause)?;
        ctx.builder.and_where(cond);
    }
    Ok(())
}
