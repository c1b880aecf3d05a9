//! PostgreSQL → Oracle type name mapping.
//!
//! The parser hands type names over in their internal spelling
//! (`pg_catalog.int4`, `pg_catalog.numeric`, ...). [`type_display`] turns a
//! parsed type into an upper-case canonical name with modifiers, and
//! [`map_type`] looks that name up.

use crate::error::{ConvertResult, Unsupported};
use pg_query::NodeEnum;
use pg_query::protobuf::{TypeName, a_const};

/// Map a canonical PostgreSQL type name to its Oracle spelling.
///
/// `NUMERIC`-prefixed names keep everything after the prefix, so precision and
/// scale survive (`NUMERIC(10,2)` → `NUMBER(10,2)`). Other names are matched
/// without modifiers; their Oracle type carries its own size.
pub fn map_type(name: &str) -> ConvertResult<String> {
    let name = name.trim();
    if let Some(rest) = name.strip_prefix("NUMERIC") {
        return Ok(format!("NUMBER{rest}"));
    }

    let base = match name.find('(') {
        Some(idx) => name[..idx].trim_end(),
        None => name,
    };

    let mapped = match base {
        "CHAR" | "BPCHAR" | "CHARACTER" | "VARCHAR" | "CHARACTER VARYING" => "VARCHAR2(4000)",
        "TEXT" | "JSON" | "JSONB" => "CLOB",
        "UUID" => "RAW(16)",
        "BYTEA" => "BLOB",
        "DECIMAL" | "DEC" | "INTEGER" | "INT" | "INT2" | "INT4" | "INT8" | "SMALLINT"
        | "BIGINT" => "NUMBER",
        "BOOL" | "BOOLEAN" => "NUMBER(1)",
        "FLOAT" | "FLOAT4" | "FLOAT8" | "REAL" | "DOUBLE PRECISION" => "FLOAT",
        "TIMESTAMP" | "TIMESTAMP WITHOUT TIME ZONE" => "TIMESTAMP",
        "TIMESTAMPTZ" | "TIMESTAMP WITH TIME ZONE" => "TIMESTAMP WITH TIME ZONE",
        "DATE" => "DATE",
        _ => return Err(Unsupported::Type(name.to_string()).into()),
    };
    Ok(mapped.to_string())
}

/// Canonical upper-case name of a parsed type, with modifiers.
///
/// Array types and `%TYPE` references have no Oracle counterpart and fail with
/// [`Unsupported::Type`].
pub fn type_display(type_name: &TypeName) -> ConvertResult<String> {
    let parts: Vec<&str> = type_name
        .names
        .iter()
        .filter_map(|n| match n.node.as_ref() {
            Some(NodeEnum::String(s)) => Some(s.sval.as_str()),
            _ => None,
        })
        .collect();

    let base = match parts.as_slice() {
        ["pg_catalog", name] | [name] => name.to_ascii_uppercase(),
        _ => return Err(Unsupported::Type(parts.join(".")).into()),
    };

    if !type_name.array_bounds.is_empty() {
        return Err(Unsupported::Type(format!("{base}[]")).into());
    }
    if type_name.pct_type || type_name.setof {
        return Err(Unsupported::Type(base).into());
    }

    if type_name.typmods.is_empty() {
        return Ok(base);
    }

    let mut mods = Vec::with_capacity(type_name.typmods.len());
    for m in &type_name.typmods {
        match m.node.as_ref() {
            Some(NodeEnum::AConst(c)) => match c.val.as_ref() {
                Some(a_const::Val::Ival(i)) => mods.push(i.ival.to_string()),
                _ => return Err(Unsupported::Type(base).into()),
            },
            _ => return Err(Unsupported::Type(base).into()),
        }
    }
    Ok(format!("{base}({})", mods.join(",")))
}

/// Resolve a parsed type straight to its Oracle spelling.
pub fn map_type_name(type_name: &TypeName) -> ConvertResult<String> {
    map_type(&type_display(type_name)?)
}

/// The temporal kind of a parsed type, if it is one we render typed literals for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temporal {
    Timestamp,
    TimestampTz,
    Date,
}

impl Temporal {
    pub fn of(type_name: &TypeName) -> Option<Self> {
        let display = type_display(type_name).ok()?;
        match display.as_str() {
            "TIMESTAMP" => Some(Temporal::Timestamp),
            "TIMESTAMPTZ" => Some(Temporal::TimestampTz),
            "DATE" => Some(Temporal::Date),
            _ => None,
        }
    }
}
