//! Predicate algebra rendered into WHERE / ON clauses.
//!
//! Leaves compare a rendered left-hand side against a [`Value`]; `And` / `Or`
//! nest arbitrarily. [`Condition::Raw`] carries a fragment that was rendered
//! elsewhere (LIKE, BETWEEN, IN lists).

use crate::value::Value;

/// A boolean condition.
///
/// # Example
/// ```
/// use pg2ora::{Condition, Value};
///
/// let cond = Condition::And(vec![
///     Condition::eq("status", Value::from("active")),
///     Condition::Or(vec![
///         Condition::gt("age", Value::Int(18)),
///         Condition::is_null("age"),
///     ]),
/// ]);
/// assert_eq!(cond.to_sql(), "status='active' AND (age>18 OR age IS NULL)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Conjunction
    And(Vec<Condition>),
    /// Disjunction
    Or(Vec<Condition>),
    /// lhs = value
    Eq(String, Value),
    /// lhs <> value
    Neq(String, Value),
    /// lhs > value
    Gt(String, Value),
    /// lhs >= value
    Gte(String, Value),
    /// lhs < value
    Lt(String, Value),
    /// lhs <= value
    Lte(String, Value),
    /// lhs IS NULL
    IsNull(String),
    /// lhs IS NOT NULL
    NotNull(String),
    /// Pre-rendered fragment
    Raw(String),
}

impl Condition {
    pub fn eq(lhs: impl Into<String>, value: Value) -> Self {
        Condition::Eq(lhs.into(), value)
    }

    pub fn neq(lhs: impl Into<String>, value: Value) -> Self {
        Condition::Neq(lhs.into(), value)
    }

    pub fn gt(lhs: impl Into<String>, value: Value) -> Self {
        Condition::Gt(lhs.into(), value)
    }

    pub fn gte(lhs: impl Into<String>, value: Value) -> Self {
        Condition::Gte(lhs.into(), value)
    }

    pub fn lt(lhs: impl Into<String>, value: Value) -> Self {
        Condition::Lt(lhs.into(), value)
    }

    pub fn lte(lhs: impl Into<String>, value: Value) -> Self {
        Condition::Lte(lhs.into(), value)
    }

    pub fn is_null(lhs: impl Into<String>) -> Self {
        Condition::IsNull(lhs.into())
    }

    pub fn not_null(lhs: impl Into<String>) -> Self {
        Condition::NotNull(lhs.into())
    }

    pub fn raw(sql: impl Into<String>) -> Self {
        Condition::Raw(sql.into())
    }

    /// True for an empty `And` / `Or`, which renders to nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Condition::And(c) | Condition::Or(c) => c.iter().all(Condition::is_empty),
            _ => false,
        }
    }

    /// The condition that actually renders: an `And` / `Or` with a single
    /// non-empty child stands for that child.
    fn effective(&self) -> &Condition {
        match self {
            Condition::And(children) | Condition::Or(children) => {
                let mut rest = children.iter().filter(|c| !c.is_empty());
                match (rest.next(), rest.next()) {
                    (Some(only), None) => only.effective(),
                    _ => self,
                }
            }
            _ => self,
        }
    }

    /// Render as SQL text (without a `WHERE` keyword).
    pub fn to_sql(&self) -> String {
        match self {
            Condition::And(children) => join(children, " AND ", |c| {
                matches!(c, Condition::Or(_) | Condition::Raw(_))
            }),
            Condition::Or(children) => join(children, " OR ", |c| {
                matches!(c, Condition::And(_) | Condition::Raw(_))
            }),
            Condition::Eq(lhs, v) => compare(lhs, "=", v),
            Condition::Neq(lhs, v) => compare(lhs, "<>", v),
            Condition::Gt(lhs, v) => compare(lhs, ">", v),
            Condition::Gte(lhs, v) => compare(lhs, ">=", v),
            Condition::Lt(lhs, v) => compare(lhs, "<", v),
            Condition::Lte(lhs, v) => compare(lhs, "<=", v),
            Condition::IsNull(lhs) => format!("{lhs} IS NULL"),
            Condition::NotNull(lhs) => format!("{lhs} IS NOT NULL"),
            Condition::Raw(sql) => sql.clone(),
        }
    }
}

fn compare(lhs: &str, op: &str, value: &Value) -> String {
    format!("{lhs}{op}{}", value.operand())
}

/// Join the non-empty children; with more than one child, children matching
/// `needs_parens` are wrapped.
fn join(children: &[Condition], sep: &str, needs_parens: impl Fn(&Condition) -> bool) -> String {
    let parts: Vec<&Condition> = children
        .iter()
        .filter(|c| !c.is_empty())
        .map(Condition::effective)
        .collect();
    if let [only] = parts.as_slice() {
        return only.to_sql();
    }
    parts
        .iter()
        .map(|&c| {
            let sql = c.to_sql();
            if needs_parens(c) { format!("({sql})") } else { sql }
        })
        .collect::<Vec<_>>()
        .join(sep)
}
