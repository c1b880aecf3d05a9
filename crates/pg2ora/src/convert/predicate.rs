//! Boolean expressions to [`Condition`]s.

use super::expr::{operand, operator_name, resolve};
use crate::condition::Condition;
use crate::error::{ConvertError, ConvertResult, Unsupported};
use crate::options::Settings;
use crate::parse::{deparse_expr, describe};
use pg_query::NodeEnum;
use pg_query::protobuf::{AExpr, AExprKind, BoolExprType, Node, NullTestType};

/// Lower a boolean expression.
pub(crate) fn translate(settings: &Settings, node: &Node) -> ConvertResult<Condition> {
    match node.node.as_ref() {
        Some(NodeEnum::BoolExpr(b)) => {
            let children = || -> ConvertResult<Vec<Condition>> {
                b.args.iter().map(|arg| translate(settings, arg)).collect()
            };
            match b.boolop() {
                BoolExprType::AndExpr => Ok(Condition::And(children()?)),
                BoolExprType::OrExpr => Ok(Condition::Or(children()?)),
                _ => Err(Unsupported::Predicate(describe(node)).into()),
            }
        }
        Some(NodeEnum::AExpr(expr)) => translate_aexpr(settings, expr, node),
        Some(NodeEnum::NullTest(test)) => {
            let arg = test
                .arg
                .as_deref()
                .ok_or_else(|| ConvertError::unsupported("IS NULL without operand"))?;
            let lhs = operand(settings, arg)?;
            match test.nulltesttype() {
                NullTestType::IsNotNull => Ok(Condition::not_null(lhs)),
                _ => Ok(Condition::is_null(lhs)),
            }
        }
        Some(NodeEnum::BooleanTest(_)) => Err(Unsupported::NullComparison(describe(node)).into()),
        _ => Err(Unsupported::Predicate(describe(node)).into()),
    }
}

fn translate_aexpr(settings: &Settings, expr: &AExpr, node: &Node) -> ConvertResult<Condition> {
    match expr.kind() {
        AExprKind::AexprOp => comparison(settings, expr, node),
        AExprKind::AexprOpAny | AExprKind::AexprOpAll => Err(Unsupported::Predicate(format!(
            "quantified comparison {}",
            describe(node)
        ))
        .into()),
        AExprKind::AexprLike => like(settings, expr, false),
        AExprKind::AexprIlike => like(settings, expr, true),
        AExprKind::AexprBetween => between(settings, expr, false),
        AExprKind::AexprNotBetween => between(settings, expr, true),
        AExprKind::AexprIn => in_list(settings, expr),
        _ => raw_fallback(settings, node),
    }
}

fn sides<'a>(expr: &'a AExpr) -> ConvertResult<(&'a Node, &'a Node)> {
    match (expr.lexpr.as_deref(), expr.rexpr.as_deref()) {
        (Some(l), Some(r)) => Ok((l, r)),
        _ => Err(Unsupported::Predicate("operator without two operands".to_string()).into()),
    }
}

fn comparison(settings: &Settings, expr: &AExpr, node: &Node) -> ConvertResult<Condition> {
    let op = operator_name(&expr.name)?;
    let make: fn(String, crate::value::Value) -> Condition = match op {
        "=" => Condition::Eq,
        "<>" | "!=" => Condition::Neq,
        ">" => Condition::Gt,
        ">=" => Condition::Gte,
        "<" => Condition::Lt,
        "<=" => Condition::Lte,
        _ => return raw_fallback(settings, node),
    };
    let (l, r) = sides(expr)?;
    Ok(make(operand(settings, l)?, resolve(settings, r)?))
}

/// `(NOT) LIKE`, and `(NOT) ILIKE` as an upper-cased LIKE.
fn like(settings: &Settings, expr: &AExpr, case_insensitive: bool) -> ConvertResult<Condition> {
    let op = operator_name(&expr.name)?;
    let not = if op.starts_with('!') { "NOT " } else { "" };
    let (l, r) = sides(expr)?;
    let l = operand(settings, l)?;
    let r = operand(settings, r)?;
    let sql = if case_insensitive {
        format!("UPPER({l}) {not}LIKE UPPER({r})")
    } else {
        format!("{l} {not}LIKE {r}")
    };
    Ok(Condition::raw(sql))
}

fn between(settings: &Settings, expr: &AExpr, negated: bool) -> ConvertResult<Condition> {
    let (l, r) = sides(expr)?;
    let bounds = match r.node.as_ref() {
        Some(NodeEnum::List(list)) => list.items.as_slice(),
        _ => &[],
    };
    let [lo, hi] = bounds else {
        return Err(Unsupported::Predicate("BETWEEN without two bounds".to_string()).into());
    };
    let not = if negated { "NOT " } else { "" };
    Ok(Condition::raw(format!(
        "{} {not}BETWEEN {} AND {}",
        operand(settings, l)?,
        operand(settings, lo)?,
        operand(settings, hi)?
    )))
}

fn in_list(settings: &Settings, expr: &AExpr) -> ConvertResult<Condition> {
    let op = operator_name(&expr.name)?;
    let not = if op == "<>" { "NOT " } else { "" };
    let (l, r) = sides(expr)?;
    let Some(NodeEnum::List(list)) = r.node.as_ref() else {
        return Err(Unsupported::Predicate(format!("IN {}", describe(r))).into());
    };
    let items = list
        .items
        .iter()
        .map(|item| operand(settings, item))
        .collect::<ConvertResult<Vec<_>>>()?;
    Ok(Condition::raw(format!(
        "{} {not}IN ({})",
        operand(settings, l)?,
        items.join(", ")
    )))
}

/// Comparison operators without a translation rule.
fn raw_fallback(settings: &Settings, node: &Node) -> ConvertResult<Condition> {
    if settings.strict {
        return Err(Unsupported::Predicate(describe(node)).into());
    }
    let text = deparse_expr(node)?;
    tracing::warn!(fragment = %text, "passing predicate through untranslated");
    Ok(Condition::raw(text))
}
