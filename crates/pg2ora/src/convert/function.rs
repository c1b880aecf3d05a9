//! Function calls. Only a small allow-list translates; everything else is refused.

use super::expr::{column_name, resolve, string_const, string_value};
use crate::error::{ConvertError, ConvertResult, Unsupported};
use crate::options::Settings;
use crate::parse::describe;
use crate::placeholder::marker_position;
use crate::value::Value;
use pg_query::NodeEnum;
use pg_query::protobuf::{FuncCall, Node};

const ALLOWED_FUNCTIONS: &[&str] = &["now", "count", "extract", "sum", "avg"];

/// `extract` fields Oracle understands.
const EXTRACT_FIELDS: &[&str] = &[
    "year",
    "month",
    "day",
    "hour",
    "minute",
    "second",
    "timezone_hour",
    "timezone_minute",
];

pub(crate) fn translate(settings: &Settings, call: &FuncCall) -> ConvertResult<Value> {
    let name = function_name(&call.funcname)?;
    if !ALLOWED_FUNCTIONS.contains(&name.as_str()) {
        return Err(Unsupported::Function(name).into());
    }

    if call.over.is_some() {
        return Err(Unsupported::Function(format!("{name} with OVER")).into());
    }
    if call.agg_filter.is_some() {
        return Err(Unsupported::Function(format!("{name} with FILTER")).into());
    }
    if call.agg_within_group || !call.agg_order.is_empty() {
        return Err(Unsupported::Function(format!("{name} with ordered arguments")).into());
    }
    if call.func_variadic {
        return Err(Unsupported::Function(format!("{name} with VARIADIC")).into());
    }

    match name.as_str() {
        "now" if call.args.is_empty() => Ok(Value::expr("SYSTIMESTAMP")),
        "now" => Err(Unsupported::Function("now with arguments".to_string()).into()),
        "extract" => extract(settings, call),
        _ => aggregate(&name, call),
    }
}

/// The function's name, lower case, with a `pg_catalog` qualifier dropped.
fn function_name(funcname: &[Node]) -> ConvertResult<String> {
    let parts: Vec<&str> = funcname.iter().filter_map(string_value).collect();
    match parts.as_slice() {
        ["pg_catalog", name] | [name] => Ok(name.to_ascii_lowercase()),
        _ => Err(Unsupported::Function(parts.join(".")).into()),
    }
}

/// `extract(field FROM source)`
fn extract(settings: &Settings, call: &FuncCall) -> ConvertResult<Value> {
    let [field, source] = call.args.as_slice() else {
        return Err(Unsupported::Function("extract with unexpected arguments".to_string()).into());
    };

    let field = string_const(field)
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| Unsupported::Function(format!("extract field {}", describe(field))))?;
    if !EXTRACT_FIELDS.contains(&field.as_str()) {
        return Err(Unsupported::Function(format!("extract({field})")).into());
    }

    let source = if is_now_call(source) {
        "SYSTIMESTAMP".to_string()
    } else {
        resolve(settings, source)?.display()
    };
    Ok(Value::expr(format!("extract({field} FROM {source})")))
}

fn is_now_call(node: &Node) -> bool {
    match node.node.as_ref() {
        Some(NodeEnum::FuncCall(call)) => {
            call.args.is_empty()
                && function_name(&call.funcname).is_ok_and(|name| name == "now")
        }
        _ => false,
    }
}

/// `count`, `sum`, `avg`: one column or marker argument, optional DISTINCT.
fn aggregate(name: &str, call: &FuncCall) -> ConvertResult<Value> {
    let arg = match (call.agg_star, call.args.as_slice()) {
        (true, []) if name == "count" => "*".to_string(),
        (false, [arg]) => aggregate_argument(name, arg)?,
        _ => {
            return Err(Unsupported::Function(format!(
                "{name} with {} arguments",
                call.args.len()
            ))
            .into());
        }
    };
    let distinct = if call.agg_distinct { "DISTINCT " } else { "" };
    Ok(Value::expr(format!("{name}({distinct}{arg})")))
}

fn aggregate_argument(name: &str, arg: &Node) -> ConvertResult<String> {
    match arg.node.as_ref() {
        Some(NodeEnum::ColumnRef(col)) => column_name(col),
        Some(NodeEnum::ParamRef(param)) => Ok(format!(":{}", param.number)),
        _ => match string_const(arg) {
            Some(text) if marker_position(text).is_some() => Ok(Value::from(text).display()),
            _ => Err(ConvertError::Unsupported(Unsupported::Function(format!(
                "{name}({})",
                describe(arg)
            )))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::tests_support::{first_target, strict};

    fn translate_sql(expr: &str) -> ConvertResult<Value> {
        let node = first_target(&format!("select {expr}"));
        let Some(NodeEnum::FuncCall(call)) = node.node.as_ref() else {
            panic!("expected function call");
        };
        translate(&strict(), call)
    }

    fn display(expr: &str) -> String {
        translate_sql(expr).unwrap().display()
    }

    #[test]
    fn now_is_systimestamp() {
        assert_eq!(display("now()"), "SYSTIMESTAMP");
    }

    #[test]
    fn aggregates() {
        assert_eq!(display("count(*)"), "count(*)");
        assert_eq!(display("count(id)"), "count(id)");
        assert_eq!(display("COUNT(distinct t.id)"), "count(DISTINCT t.id)");
        assert_eq!(display("sum(amount)"), "sum(amount)");
        assert_eq!(display("avg(level)"), "avg(\"LEVEL\")");
        assert_eq!(
            display("count(distinct '--cvted-phs1')"),
            "count(DISTINCT '--cvted-phs1')"
        );
    }

    #[test]
    fn extract_fields() {
        assert_eq!(
            display("extract(year from now())"),
            "extract(year FROM SYSTIMESTAMP)"
        );
        assert_eq!(
            display("extract(month from created_at)"),
            "extract(month FROM created_at)"
        );
        assert!(translate_sql("extract(epoch from created_at)").is_err());
    }

    #[test]
    fn functions_outside_the_allow_list() {
        let err = translate_sql("lower(name)").unwrap_err();
        assert_eq!(
            err.as_unsupported(),
            Some(&Unsupported::Function("lower".to_string()))
        );
    }

    #[test]
    fn window_and_filter_clauses_are_refused() {
        assert!(translate_sql("count(*) over ()").unwrap_err().is_unsupported());
        assert!(
            translate_sql("sum(x) filter (where x > 0)")
                .unwrap_err()
                .is_unsupported()
        );
        assert!(translate_sql("count(x order by y)").unwrap_err().is_unsupported());
    }

    #[test]
    fn aggregate_arguments_must_be_simple() {
        assert!(translate_sql("sum(a + b)").is_err());
        assert!(translate_sql("sum('x')").is_err());
        assert!(translate_sql("count(a, b)").is_err());
    }
}
