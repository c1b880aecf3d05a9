//! Expression resolution: one parsed expression to a [`Value`].

use super::function;
use crate::error::{ConvertError, ConvertResult, Unsupported};
use crate::ident::render_name;
use crate::options::Settings;
use crate::parse::{deparse_expr, describe};
use crate::types::{Temporal, map_type_name};
use crate::value::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use pg_query::NodeEnum;
use pg_query::protobuf::{AConst, AExpr, AExprKind, ColumnRef, Node, TypeCast, a_const};
use rust_decimal::Decimal;
use std::str::FromStr;

/// How an operator is written in Oracle.
enum OperatorForm {
    Infix(&'static str),
    Function(&'static str),
}

fn binary_operator(op: &str) -> Option<OperatorForm> {
    let form = match op {
        "+" => OperatorForm::Infix("+"),
        "-" => OperatorForm::Infix("-"),
        "*" => OperatorForm::Infix("*"),
        "/" => OperatorForm::Infix("/"),
        "||" => OperatorForm::Infix("||"),
        "%" => OperatorForm::Function("MOD"),
        "^" => OperatorForm::Function("POWER"),
        "&" => OperatorForm::Function("BITAND"),
        _ => return None,
    };
    Some(form)
}

/// Resolve one expression.
pub(crate) fn resolve(settings: &Settings, node: &Node) -> ConvertResult<Value> {
    match node.node.as_ref() {
        Some(NodeEnum::AConst(c)) => resolve_const(c),
        Some(NodeEnum::TypeCast(cast)) => resolve_cast(settings, cast),
        Some(NodeEnum::FuncCall(call)) => function::translate(settings, call),
        Some(NodeEnum::AExpr(expr)) if expr.kind() == AExprKind::AexprOp => {
            resolve_operator(settings, expr)
        }
        Some(NodeEnum::ColumnRef(col)) => Ok(Value::expr(column_name(col)?)),
        Some(NodeEnum::ParamRef(param)) => Ok(Value::expr(format!(":{}", param.number))),
        _ => passthrough(settings, node),
    }
}

/// The escape hatch for expressions without a translation rule.
pub(crate) fn passthrough(settings: &Settings, node: &Node) -> ConvertResult<Value> {
    if settings.strict {
        return Err(ConvertError::unsupported(format!("expression {}", describe(node))));
    }
    let text = deparse_expr(node)?;
    tracing::warn!(fragment = %text, "passing expression through untranslated");
    Ok(Value::expr(text))
}

fn resolve_const(c: &AConst) -> ConvertResult<Value> {
    if c.isnull {
        return Ok(Value::Null);
    }
    match c.val.as_ref() {
        Some(a_const::Val::Ival(i)) => Ok(Value::Int(i64::from(i.ival))),
        Some(a_const::Val::Fval(f)) => parse_number(&f.fval),
        Some(a_const::Val::Boolval(b)) => Ok(Value::Int(i64::from(b.boolval))),
        Some(a_const::Val::Sval(s)) => Ok(Value::Str(s.sval.clone())),
        Some(a_const::Val::Bsval(b)) => Err(ConvertError::unsupported(format!(
            "bit string literal {}",
            b.bsval
        ))),
        None => Ok(Value::Null),
    }
}

/// Integer if it fits, else a finite float, else an exact decimal.
pub(crate) fn parse_number(text: &str) -> ConvertResult<Value> {
    if let Ok(i) = text.parse::<i64>() {
        return Ok(Value::Int(i));
    }
    if let Ok(f) = text.parse::<f64>()
        && f.is_finite()
    {
        return Ok(Value::Float(f));
    }
    Decimal::from_str(text)
        .map(Value::Decimal)
        .map_err(|_| ConvertError::unsupported(format!("numeric literal {text}")))
}

fn resolve_cast(settings: &Settings, cast: &TypeCast) -> ConvertResult<Value> {
    let type_name = cast
        .type_name
        .as_ref()
        .ok_or_else(|| ConvertError::unsupported("cast without a type"))?;
    let arg = cast
        .arg
        .as_deref()
        .ok_or_else(|| ConvertError::unsupported("cast without an operand"))?;

    if let Some(kind) = Temporal::of(type_name)
        && let Some(text) = string_const(arg)
        && let Some(literal) = temporal_literal(kind, text)
    {
        return Ok(Value::expr(literal));
    }

    let mapped = map_type_name(type_name)?;
    let inner = resolve(settings, arg)?;
    Ok(Value::expr(format!("CAST({} AS {mapped})", inner.display())))
}

/// Render a typed Oracle literal if `text` is a well-formed value of `kind`.
fn temporal_literal(kind: Temporal, text: &str) -> Option<String> {
    let text = text.trim();
    match kind {
        Temporal::Date => {
            let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
            Some(format!("DATE '{}'", date.format("%Y-%m-%d")))
        }
        Temporal::Timestamp => {
            let ts = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .or_else(|| {
                    NaiveDate::parse_from_str(text, "%Y-%m-%d")
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                })?;
            Some(format!("TIMESTAMP '{}'", ts.format("%Y-%m-%d %H:%M:%S%.f")))
        }
        Temporal::TimestampTz => {
            let ts = DateTime::parse_from_rfc3339(text)
                .or_else(|_| DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f%#z"))
                .or_else(|_| DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f %#z"))
                .ok()?;
            Some(format!(
                "TIMESTAMP '{}'",
                ts.format("%Y-%m-%d %H:%M:%S%.f %:z")
            ))
        }
    }
}

fn resolve_operator(settings: &Settings, expr: &AExpr) -> ConvertResult<Value> {
    let op = operator_name(&expr.name)?;
    let rhs = expr
        .rexpr
        .as_deref()
        .ok_or_else(|| ConvertError::unsupported(format!("operator {op} without operand")))?;

    let Some(lhs) = expr.lexpr.as_deref() else {
        return match op {
            "-" | "+" => Ok(Value::expr(format!("{op}{}", operand(settings, rhs)?))),
            _ => Err(ConvertError::unsupported(format!("prefix operator {op}"))),
        };
    };

    let form = binary_operator(op)
        .ok_or_else(|| ConvertError::unsupported(format!("operator {op}")))?;
    let l = operand(settings, lhs)?;
    let r = operand(settings, rhs)?;
    let sql = match form {
        OperatorForm::Infix(sym) => format!("{l} {sym} {r}"),
        OperatorForm::Function(name) => format!("{name}({l}, {r})"),
    };
    Ok(Value::expr(sql))
}

/// Resolve an operand, parenthesizing nested operator expressions.
pub(crate) fn operand(settings: &Settings, node: &Node) -> ConvertResult<String> {
    let value = resolve(settings, node)?;
    if is_compound(node) {
        Ok(format!("({})", value.display()))
    } else {
        Ok(value.display())
    }
}

fn is_compound(node: &Node) -> bool {
    matches!(
        node.node.as_ref(),
        Some(NodeEnum::AExpr(_) | NodeEnum::BoolExpr(_) | NodeEnum::NullTest(_))
    )
}

/// The operator symbol of an `A_Expr`, ignoring a `pg_catalog` qualifier.
pub(crate) fn operator_name(name: &[Node]) -> ConvertResult<&str> {
    match name {
        [op] | [_, op] => string_value(op)
            .ok_or_else(|| ConvertError::unsupported("operator without a name")),
        _ => Err(ConvertError::unsupported("qualified operator")),
    }
}

/// Render a column reference (one or two parts, no `*`).
pub(crate) fn column_name(col: &ColumnRef) -> ConvertResult<String> {
    let parts = name_parts(&col.fields)?;
    render_name(&parts)
}

/// The string parts of a dotted name; `*` and subscripts fail with
/// [`Unsupported::Name`].
pub(crate) fn name_parts(fields: &[Node]) -> ConvertResult<Vec<&str>> {
    fields
        .iter()
        .map(|f| match f.node.as_ref() {
            Some(NodeEnum::String(s)) => Ok(s.sval.as_str()),
            Some(NodeEnum::AStar(_)) => Err(Unsupported::Name("*".to_string()).into()),
            _ => Err(Unsupported::Name(describe(f)).into()),
        })
        .collect()
}

/// The text of a `String` node.
pub(crate) fn string_value(node: &Node) -> Option<&str> {
    match node.node.as_ref() {
        Some(NodeEnum::String(s)) => Some(s.sval.as_str()),
        _ => None,
    }
}

/// The text of a string constant.
pub(crate) fn string_const(node: &Node) -> Option<&str> {
    match node.node.as_ref() {
        Some(NodeEnum::AConst(c)) if !c.isnull => match c.val.as_ref() {
            Some(a_const::Val::Sval(s)) => Some(s.sval.as_str()),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ConvertOptions;
    use crate::parse::parse_single;

    fn strict() -> Settings {
        ConvertOptions::default().settings()
    }

    fn lenient() -> Settings {
        ConvertOptions::default().lenient().settings()
    }

    /// Resolve the first projection item of `select <expr>`.
    fn resolve_sql(settings: &Settings, expr: &str) -> ConvertResult<Value> {
        let stmt = parse_single(&format!("select {expr}")).unwrap();
        let Some(NodeEnum::SelectStmt(select)) = stmt.node else {
            panic!("expected select");
        };
        let Some(NodeEnum::ResTarget(target)) = select.target_list[0].node.as_ref() else {
            panic!("expected target");
        };
        resolve(settings, target.val.as_deref().unwrap())
    }

    fn display(expr: &str) -> String {
        resolve_sql(&strict(), expr).unwrap().display()
    }

    #[test]
    fn literals() {
        assert_eq!(resolve_sql(&strict(), "42").unwrap(), Value::Int(42));
        assert_eq!(
            resolve_sql(&strict(), "9999999999").unwrap(),
            Value::Int(9_999_999_999)
        );
        assert_eq!(
            resolve_sql(&strict(), "12.50").unwrap(),
            Value::Float(12.5)
        );
        assert_eq!(resolve_sql(&strict(), "'x'").unwrap(), Value::from("x"));
        assert_eq!(resolve_sql(&strict(), "null").unwrap(), Value::Null);
        assert_eq!(resolve_sql(&strict(), "true").unwrap(), Value::Int(1));
        assert_eq!(resolve_sql(&strict(), "false").unwrap(), Value::Int(0));
    }

    #[test]
    fn number_parse_order() {
        assert_eq!(parse_number("7").unwrap(), Value::Int(7));
        assert_eq!(parse_number("0.1").unwrap(), Value::Float(0.1));
        assert_eq!(parse_number("1e5").unwrap().display(), "100000");
        assert_eq!(parse_number("-2.25").unwrap().display(), "-2.25");
        assert!(parse_number("1e400").is_err());
    }

    #[test]
    fn casts() {
        assert_eq!(display("'1'::int"), "CAST('1' AS NUMBER)");
        assert_eq!(display("x::numeric(10,2)"), "CAST(x AS NUMBER(10,2))");
        assert_eq!(display("cast(x as varchar(20))"), "CAST(x AS VARCHAR2(4000))");
        assert_eq!(display("x::text"), "CAST(x AS CLOB)");
    }

    #[test]
    fn unknown_cast_type_is_rejected() {
        let err = resolve_sql(&strict(), "x::interval").unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Unsupported(Unsupported::Type(_))
        ));
    }

    #[test]
    fn temporal_literals() {
        assert_eq!(
            display("'2024-03-01 10:20:30'::timestamp"),
            "TIMESTAMP '2024-03-01 10:20:30'"
        );
        assert_eq!(
            display("'2024-03-01 10:20:30.5'::timestamp"),
            "TIMESTAMP '2024-03-01 10:20:30.500'"
        );
        assert_eq!(display("'2024-03-01'::date"), "DATE '2024-03-01'");
        assert_eq!(
            display("'2024-03-01 10:20:30+08'::timestamptz"),
            "TIMESTAMP '2024-03-01 10:20:30 +08:00'"
        );
        // not a literal we can check: generic cast
        assert_eq!(display("'today'::date"), "CAST('today' AS DATE)");
    }

    #[test]
    fn arithmetic() {
        assert_eq!(display("b+'1'::int"), "b + CAST('1' AS NUMBER)");
        assert_eq!(display("(a + 1) * 2"), "(a + 1) * 2");
        assert_eq!(display("a % 3"), "MOD(a, 3)");
        assert_eq!(display("a ^ 2"), "POWER(a, 2)");
        assert_eq!(display("a || 'x'"), "a || 'x'");
        assert_eq!(display("-a"), "-a");
    }

    #[test]
    fn unknown_operator_is_rejected() {
        assert!(resolve_sql(&strict(), "a << 2").unwrap_err().is_unsupported());
        assert!(resolve_sql(&lenient(), "a << 2").unwrap_err().is_unsupported());
    }

    #[test]
    fn column_names() {
        assert_eq!(display("title"), "title");
        assert_eq!(display("t.level"), "t.\"LEVEL\"");
        assert!(resolve_sql(&strict(), "s.t.c").unwrap_err().is_unsupported());
    }

    #[test]
    fn fallback_depends_on_strictness() {
        let err = resolve_sql(&strict(), "coalesce(a, b)").unwrap_err();
        assert!(err.is_unsupported());
        assert_eq!(
            resolve_sql(&lenient(), "coalesce(a, b)").unwrap(),
            Value::expr("COALESCE(a, b)")
        );
    }
}
