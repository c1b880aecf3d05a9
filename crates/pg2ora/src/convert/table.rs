//! Table references, subqueries in FROM, and join chains.

use super::context::ConversionContext;
use super::{predicate, select};
use crate::builder::{JoinKind, Operation};
use crate::error::{ConvertError, ConvertResult};
use crate::ident::render_name;
use crate::parse::{describe, node_kind};
use pg_query::NodeEnum;
use pg_query::protobuf::{Alias, JoinExpr, JoinType, Node, RangeSubselect, RangeVar};

/// Translate a FROM list; only a single item (table, subquery, or join
/// chain) is supported.
pub(crate) fn translate_from(ctx: &mut ConversionContext, from: &[Node]) -> ConvertResult<()> {
    match from {
        [] => Ok(()),
        [item] => from_item(ctx, item),
        _ => Err(ConvertError::unsupported("comma-separated FROM list")),
    }
}

fn from_item(ctx: &mut ConversionContext, node: &Node) -> ConvertResult<()> {
    let source = match node.node.as_ref() {
        Some(NodeEnum::RangeVar(rv)) => table_ref(rv, true)?,
        Some(NodeEnum::RangeSubselect(sub)) => subquery(ctx, sub)?,
        Some(NodeEnum::JoinExpr(join)) => return join_chain(ctx, join),
        _ => {
            return Err(ConvertError::unsupported(format!(
                "FROM item {}",
                node_kind(node)
            )));
        }
    };
    ctx.builder.from(source);
    Ok(())
}

/// Render `[schema.]table [alias]`.
pub(crate) fn table_ref(rv: &RangeVar, with_alias: bool) -> ConvertResult<String> {
    if !rv.inh {
        return Err(ConvertError::unsupported(format!("ONLY {}", rv.relname)));
    }
    let mut parts = Vec::with_capacity(3);
    for part in [&rv.catalogname, &rv.schemaname, &rv.relname] {
        if !part.is_empty() {
            parts.push(part.as_str());
        }
    }
    let mut sql = render_name(&parts)?;
    if with_alias && let Some(alias) = &rv.alias {
        sql.push(' ');
        sql.push_str(&alias_name(alias)?);
    }
    Ok(sql)
}

fn alias_name(alias: &Alias) -> ConvertResult<String> {
    if !alias.colnames.is_empty() {
        return Err(ConvertError::unsupported(format!(
            "column aliases on {}",
            alias.aliasname
        )));
    }
    render_name(&[alias.aliasname.as_str()])
}

/// `(<select>) [alias]`, translated in a fresh context.
fn subquery(ctx: &ConversionContext, sub: &RangeSubselect) -> ConvertResult<String> {
    if sub.lateral {
        return Err(ConvertError::unsupported("LATERAL subquery"));
    }
    let inner = sub
        .subquery
        .as_deref()
        .ok_or_else(|| ConvertError::unsupported("subquery without a query"))?;
    let mut sql = format!("({})", select::nested(ctx, inner)?);
    if ctx.operation() == Operation::Select
        && let Some(alias) = &sub.alias
    {
        sql.push(' ');
        sql.push_str(&alias_name(alias)?);
    }
    Ok(sql)
}

/// Walk a join chain left to right, adding each join to the builder.
fn join_chain(ctx: &mut ConversionContext, join: &JoinExpr) -> ConvertResult<()> {
    if ctx.operation() != Operation::Select {
        return Err(ConvertError::unsupported(format!(
            "JOIN in {}",
            ctx.operation().as_str()
        )));
    }
    if join.is_natural {
        return Err(ConvertError::unsupported("NATURAL JOIN"));
    }
    if !join.using_clause.is_empty() {
        return Err(ConvertError::unsupported("JOIN ... USING"));
    }
    if join.alias.is_some() {
        return Err(ConvertError::unsupported("aliased join"));
    }

    let left = join
        .larg
        .as_deref()
        .ok_or_else(|| ConvertError::unsupported("join without left side"))?;
    match left.node.as_ref() {
        Some(NodeEnum::JoinExpr(inner)) => join_chain(ctx, inner)?,
        Some(NodeEnum::RangeVar(_) | NodeEnum::RangeSubselect(_)) => from_item(ctx, left)?,
        _ => {
            return Err(ConvertError::unsupported(format!(
                "join operand {}",
                node_kind(left)
            )));
        }
    }

    let right = match join.rarg.as_deref().and_then(|r| r.node.as_ref()) {
        Some(NodeEnum::RangeVar(rv)) => table_ref(rv, true)?,
        _ => return Err(ConvertError::unsupported("join with a non-table right side")),
    };

    let on = match join.quals.as_deref() {
        None => None,
        Some(quals) if matches!(quals.node, Some(NodeEnum::BoolExpr(_))) => {
            return Err(ConvertError::unsupported(format!(
                "compound join condition {}",
                describe(quals)
            )));
        }
        Some(quals) => Some(predicate::translate(&ctx.settings, quals)?),
    };

    let kind = match (join.jointype(), &on) {
        (JoinType::JoinInner, None) => JoinKind::Cross,
        (JoinType::JoinInner, Some(_)) => JoinKind::Inner,
        (JoinType::JoinLeft, _) => JoinKind::Left,
        (JoinType::JoinRight, _) => JoinKind::Right,
        (JoinType::JoinFull, _) => JoinKind::Full,
        (other, _) => {
            return Err(ConvertError::unsupported(format!("join type {other:?}")));
        }
    };
    tracing::trace!(?kind, table = %right, "join");
    ctx.builder.join(kind, right, on);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::tests_support::{parse_stmt, strict};

    fn render_from(sql: &str) -> ConvertResult<String> {
        let stmt = parse_stmt(sql);
        let Some(NodeEnum::SelectStmt(select)) = stmt.node else {
            panic!("expected select");
        };
        let mut ctx = ConversionContext::new(strict(), Operation::Select, false);
        ctx.builder.select(["x"]);
        translate_from(&mut ctx, &select.from_clause)?;
        let sql = ctx.builder.to_bound_sql()?;
        Ok(sql.trim_start_matches("SELECT x FROM ").to_string())
    }

    #[test]
    fn plain_tables() {
        assert_eq!(render_from("select x from t").unwrap(), "t");
        assert_eq!(render_from("select x from app.t a").unwrap(), "app.t a");
        assert_eq!(render_from("select x from t as \"Weird\"").unwrap(), "t \"Weird\"");
        assert_eq!(render_from("select x").unwrap(), "DUAL");
    }

    #[test]
    fn subqueries() {
        assert_eq!(
            render_from("select x from (select id from u) s").unwrap(),
            "(SELECT id FROM u) s"
        );
    }

    #[test]
    fn join_chains() {
        assert_eq!(
            render_from("select x from a join b on a.id = b.id").unwrap(),
            "a INNER JOIN b ON a.id=b.id"
        );
        assert_eq!(
            render_from(
                "select x from a left join b on a.id = b.a_id full join c on c.id = b.c_id"
            )
            .unwrap(),
            "a LEFT JOIN b ON a.id=b.a_id FULL OUTER JOIN c ON c.id=b.c_id"
        );
        assert_eq!(
            render_from("select x from a cross join b").unwrap(),
            "a CROSS JOIN b"
        );
        assert_eq!(
            render_from("select x from (select id from u) s right join b on s.id = b.id")
                .unwrap(),
            "(SELECT id FROM u) s RIGHT JOIN b ON s.id=b.id"
        );
    }

    #[test]
    fn unsupported_joins() {
        for sql in [
            "select x from a, b",
            "select x from a join b using (id)",
            "select x from a natural join b",
            "select x from a join b on a.id = b.id and a.k = b.k",
            "select x from a join (select 1 id) s on a.id = s.id",
            "select x from only a",
            "select x from c.s.t",
        ] {
            assert!(render_from(sql).unwrap_err().is_unsupported(), "{sql}");
        }
    }
}
