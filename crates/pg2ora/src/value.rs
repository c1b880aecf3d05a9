//! Resolved values and literal quoting.

use rust_decimal::Decimal;
use std::fmt;

/// The result of resolving one expression.
///
/// Literals are quoted when rendered; [`Value::Expr`] is an already-rendered
/// Oracle fragment that is spliced verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Null,
    Expr(String),
}

impl Value {
    /// Create a pre-rendered fragment.
    pub fn expr(sql: impl Into<String>) -> Self {
        Value::Expr(sql.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Render as it appears in a statement.
    pub fn display(&self) -> String {
        match self {
            Value::Str(s) => quote_literal(s),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Decimal(d) => d.to_string(),
            Value::Null => "NULL".to_string(),
            Value::Expr(e) => e.clone(),
        }
    }

    /// Render for use as an operand, parenthesizing compound fragments.
    pub fn operand(&self) -> String {
        match self {
            Value::Expr(e) if !is_atomic(e) => format!("({e})"),
            _ => self.display(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

/// Quote a string literal: wrap in `'`, double embedded quotes, drop NUL.
pub fn quote_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\0' => {}
            '\'' => out.push_str("''"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// A fragment that needs no parentheses as an operand: a name, a marker, a
/// number, a quoted or typed literal, or a function call.
pub(crate) fn is_atomic(sql: &str) -> bool {
    if sql.is_empty() {
        return false;
    }
    if is_quoted_literal(sql) {
        return true;
    }
    if let Some(literal) = sql
        .strip_prefix("TIMESTAMP ")
        .or_else(|| sql.strip_prefix("DATE "))
        && is_quoted_literal(literal)
    {
        return true;
    }
    if let Some(open) = sql.find('(')
        && sql.ends_with(')')
        && open > 0
        && sql[..open]
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
        && encloses(&sql[open..])
    {
        return true;
    }
    sql.bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'"' | b':' | b'$' | b'#'))
}

fn is_quoted_literal(sql: &str) -> bool {
    sql.len() >= 2
        && sql.starts_with('\'')
        && sql.ends_with('\'')
        && !sql[1..sql.len() - 1].replace("''", "").contains('\'')
}

/// True if the leading `(` of `group` closes at its last byte.
fn encloses(group: &str) -> bool {
    let mut depth = 0usize;
    let mut in_literal = false;
    for (i, b) in group.bytes().enumerate() {
        match b {
            b'\'' => in_literal = !in_literal,
            b'(' if !in_literal => depth += 1,
            b')' if !in_literal => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i == group.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn display_literals() {
        assert_eq!(Value::from("value1").display(), "'value1'");
        assert_eq!(Value::Int(-3).display(), "-3");
        assert_eq!(Value::Float(1.5).display(), "1.5");
        assert_eq!(
            Value::Decimal("12.50".parse().unwrap()).display(),
            "12.50"
        );
        assert_eq!(Value::Null.display(), "NULL");
        assert_eq!(Value::expr("SYSTIMESTAMP").display(), "SYSTIMESTAMP");
    }

    #[test]
    fn quote_literal_escapes() {
        assert_eq!(quote_literal("it's"), "'it''s'");
        assert_eq!(quote_literal("a\0b"), "'ab'");
        assert_eq!(quote_literal(""), "''");
    }

    #[test]
    fn compound_operands_are_parenthesized() {
        assert_eq!(Value::expr("b").operand(), "b");
        assert_eq!(Value::expr("t.\"LEVEL\"").operand(), "t.\"LEVEL\"");
        assert_eq!(Value::expr("count(DISTINCT x)").operand(), "count(DISTINCT x)");
        assert_eq!(
            Value::expr("CAST('1' AS NUMBER)").operand(),
            "CAST('1' AS NUMBER)"
        );
        assert_eq!(
            Value::expr("b + CAST('1' AS NUMBER)").operand(),
            "(b + CAST('1' AS NUMBER))"
        );
        assert_eq!(Value::expr("f(a) + g(b)").operand(), "(f(a) + g(b))");
        assert_eq!(
            Value::expr("DATE '2024-01-01'").operand(),
            "DATE '2024-01-01'"
        );
        assert_eq!(Value::from("a b").operand(), "'a b'");
    }

    proptest! {
        #[test]
        fn quoted_literals_are_safe(s in any::<String>()) {
            let quoted = quote_literal(&s);
            prop_assert!(!quoted.contains('\0'));
            prop_assert!(quoted.starts_with('\'') && quoted.ends_with('\''));

            let inner = &quoted[1..quoted.len() - 1];
            // every quote inside the literal is doubled
            prop_assert!(!inner.replace("''", "").contains('\''));
            prop_assert_eq!(inner.replace("''", "'"), s.replace('\0', ""));
        }
    }
}
