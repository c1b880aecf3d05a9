//! SELECT list (and RETURNING list) items.

use super::context::ConversionContext;
use super::expr::{column_name, resolve};
use crate::error::{ConvertError, ConvertResult, Unsupported};
use crate::ident::{render_name, render_qualifier};
use crate::options::Settings;
use crate::parse::{deparse_expr, describe, node_kind};
use pg_query::NodeEnum;
use pg_query::protobuf::{AExprKind, ColumnRef, Node, ResTarget};

/// Translate a target list into the context's projection.
///
/// A function call or arithmetic expression replaces the whole list. Alone
/// that is just the item itself; mixed with other items it is refused in
/// strict mode.
pub(crate) fn translate(ctx: &mut ConversionContext, targets: &[Node]) -> ConvertResult<()> {
    let mut items = Vec::with_capacity(targets.len());
    for target in targets {
        let res = res_target(target)?;
        let val = res
            .val
            .as_deref()
            .ok_or_else(|| ConvertError::unsupported("projection item without expression"))?;

        if collapses(val) {
            let item = with_alias(resolve(&ctx.settings, val)?.display(), &res.name)?;
            if targets.len() > 1 {
                if ctx.settings.strict {
                    return Err(ConvertError::unsupported(format!(
                        "{} mixed with other projection items",
                        describe(val)
                    )));
                }
                tracing::warn!(%item, "collapsing projection to a single expression");
            }
            ctx.builder.set_projection(vec![item]);
            return Ok(());
        }

        items.push(with_alias(item(&ctx.settings, val)?, &res.name)?);
    }
    ctx.builder.select(items);
    Ok(())
}

fn res_target(node: &Node) -> ConvertResult<&ResTarget> {
    match node.node.as_ref() {
        Some(NodeEnum::ResTarget(res)) => Ok(res),
        _ => Err(ConvertError::unsupported(format!(
            "projection item {}",
            node_kind(node)
        ))),
    }
}

fn collapses(node: &Node) -> bool {
    match node.node.as_ref() {
        Some(NodeEnum::FuncCall(_)) => true,
        Some(NodeEnum::AExpr(expr)) => expr.kind() == AExprKind::AexprOp,
        _ => false,
    }
}

fn item(settings: &Settings, node: &Node) -> ConvertResult<String> {
    match node.node.as_ref() {
        Some(NodeEnum::CaseExpr(case)) => {
            if let Some(arg) = case.arg.as_deref()
                && matches!(arg.node, Some(NodeEnum::TypeCast(_)))
            {
                return Err(ConvertError::unsupported(format!(
                    "CASE on a cast: {}",
                    describe(node)
                )));
            }
            deparse_expr(node)
        }
        Some(NodeEnum::ColumnRef(col)) => star_or_column(col),
        _ => Ok(resolve(settings, node)?.display()),
    }
}

/// `*`, `t.*`, or a plain column name.
fn star_or_column(col: &ColumnRef) -> ConvertResult<String> {
    let star = matches!(
        col.fields.last().and_then(|f| f.node.as_ref()),
        Some(NodeEnum::AStar(_))
    );
    if !star {
        return column_name(col);
    }
    match col.fields.as_slice() {
        [_] => Ok("*".to_string()),
        [qualifier, _] => match qualifier.node.as_ref() {
            Some(NodeEnum::String(s)) => Ok(format!("{}.*", render_qualifier(&s.sval)?)),
            _ => Err(Unsupported::Name(describe(qualifier)).into()),
        },
        _ => {
            let parts: Vec<String> = col.fields.iter().map(describe).collect();
            Err(Unsupported::Name(parts.join(".")).into())
        }
    }
}

fn with_alias(item: String, alias: &str) -> ConvertResult<String> {
    if alias.is_empty() {
        return Ok(item);
    }
    Ok(format!("{item} {}", render_name(&[alias])?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Operation;
    use crate::convert::tests_support::{lenient, parse_stmt, strict};

    fn project(settings: Settings, sql: &str) -> ConvertResult<String> {
        let stmt = parse_stmt(sql);
        let Some(NodeEnum::SelectStmt(select)) = stmt.node else {
            panic!("expected select");
        };
        let mut ctx = ConversionContext::new(settings, Operation::Select, false);
        translate(&mut ctx, &select.target_list)?;
        Ok(ctx.builder.projection().join(","))
    }

    #[test]
    fn columns_and_stars() {
        assert_eq!(project(strict(), "select a, t.b from t").unwrap(), "a,t.b");
        assert_eq!(project(strict(), "select * from t").unwrap(), "*");
        assert_eq!(project(strict(), "select t.* from t").unwrap(), "t.*");
        assert_eq!(
            project(strict(), "select level, \"Mixed\" from t").unwrap(),
            "\"LEVEL\",\"Mixed\""
        );
    }

    #[test]
    fn aliases() {
        assert_eq!(
            project(strict(), "select a as x, b as size from t").unwrap(),
            "a x,b \"SIZE\""
        );
        assert_eq!(
            project(strict(), "select count(*) as n from t").unwrap(),
            "count(*) n"
        );
    }

    #[test]
    fn casts_and_literals() {
        assert_eq!(
            project(strict(), "select '1'::int, 'x', 2 from t").unwrap(),
            "CAST('1' AS NUMBER),'x',2"
        );
    }

    #[test]
    fn case_is_deparsed() {
        assert_eq!(
            project(strict(), "select case when a = 1 then 'x' end from t").unwrap(),
            "CASE WHEN a = 1 THEN 'x' END"
        );
        assert!(
            project(strict(), "select case a::int when 1 then 'x' end from t")
                .unwrap_err()
                .is_unsupported()
        );
    }

    #[test]
    fn single_expression() {
        assert_eq!(
            project(strict(), "select a + 1 from t").unwrap(),
            "a + 1"
        );
    }

    #[test]
    fn mixed_expressions_depend_on_strictness() {
        let sql = "select id, count(*) from t";
        assert!(project(strict(), sql).unwrap_err().is_unsupported());
        assert_eq!(project(lenient(), sql).unwrap(), "count(*)");
    }
}
