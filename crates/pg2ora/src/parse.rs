//! Thin layer over `pg_query`.

use crate::error::{ConvertError, ConvertResult};
use pg_query::NodeEnum;
use pg_query::protobuf::Node;
use std::time::Instant;

/// Parse `sql` and return its only statement.
///
/// Zero statements fail with [`ConvertError::EmptyInput`], more than one with
/// [`ConvertError::MultipleStatements`].
pub fn parse_single(sql: &str) -> ConvertResult<Node> {
    let start = Instant::now();
    let parsed = pg_query::parse(sql)?;
    tracing::debug!(elapsed_us = start.elapsed().as_micros() as u64, "parsed statement");

    let mut stmts = parsed.protobuf.stmts;
    match stmts.len() {
        0 => return Err(ConvertError::EmptyInput),
        1 => {}
        n => return Err(ConvertError::MultipleStatements(n)),
    }
    stmts
        .pop()
        .and_then(|raw| raw.stmt)
        .map(|stmt| *stmt)
        .ok_or(ConvertError::EmptyInput)
}

/// Render one expression node the way PostgreSQL would print it.
pub fn deparse_expr(node: &Node) -> ConvertResult<String> {
    let mut template = pg_query::parse("SELECT NULL")?.protobuf;
    let target = template
        .stmts
        .first_mut()
        .and_then(|raw| raw.stmt.as_deref_mut())
        .and_then(|stmt| match stmt.node.as_mut() {
            Some(NodeEnum::SelectStmt(select)) => select.target_list.first_mut(),
            _ => None,
        })
        .and_then(|target| match target.node.as_mut() {
            Some(NodeEnum::ResTarget(res)) => Some(res),
            _ => None,
        })
        .ok_or_else(|| ConvertError::Parse("unexpected deparse template shape".to_string()))?;
    target.val = Some(Box::new(node.clone()));

    let sql = pg_query::deparse(&template)?;
    Ok(sql.strip_prefix("SELECT ").unwrap_or(&sql).to_string())
}

/// Parse `sql` and print it back in canonical PostgreSQL form.
pub fn canonical(sql: &str) -> ConvertResult<String> {
    let parsed = pg_query::parse(sql)?;
    Ok(pg_query::deparse(&parsed.protobuf)?)
}

/// Split a script into statements, dropping empty ones.
pub fn split_statements(sql: &str) -> ConvertResult<Vec<&str>> {
    Ok(pg_query::split_with_parser(sql)?
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect())
}

/// Short description of a node for error messages.
pub(crate) fn describe(node: &Node) -> String {
    deparse_expr(node).unwrap_or_else(|_| node_kind(node).to_string())
}

/// The node's kind, for error messages and logs.
pub(crate) fn node_kind(node: &Node) -> &'static str {
    match node.node.as_ref() {
        Some(NodeEnum::SelectStmt(_)) => "SELECT",
        Some(NodeEnum::InsertStmt(_)) => "INSERT",
        Some(NodeEnum::UpdateStmt(_)) => "UPDATE",
        Some(NodeEnum::DeleteStmt(_)) => "DELETE",
        Some(NodeEnum::MergeStmt(_)) => "MERGE",
        Some(NodeEnum::CreateStmt(_)) => "CREATE TABLE",
        Some(NodeEnum::IndexStmt(_)) => "CREATE INDEX",
        Some(NodeEnum::AlterTableStmt(_)) => "ALTER TABLE",
        Some(NodeEnum::DropStmt(_)) => "DROP",
        Some(NodeEnum::TruncateStmt(_)) => "TRUNCATE",
        Some(NodeEnum::TransactionStmt(_)) => "transaction control",
        Some(NodeEnum::VariableSetStmt(_)) => "SET",
        Some(NodeEnum::ExplainStmt(_)) => "EXPLAIN",
        Some(NodeEnum::CopyStmt(_)) => "COPY",
        Some(NodeEnum::SubLink(_)) => "subquery expression",
        Some(NodeEnum::CaseExpr(_)) => "CASE expression",
        Some(NodeEnum::CoalesceExpr(_)) => "COALESCE",
        Some(NodeEnum::RowExpr(_)) => "row expression",
        Some(NodeEnum::AArrayExpr(_)) => "array expression",
        Some(NodeEnum::AIndirection(_)) => "subscript",
        Some(NodeEnum::CollateClause(_)) => "COLLATE",
        Some(_) => "expression",
        None => "empty node",
    }
}
