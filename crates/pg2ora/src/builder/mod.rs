//! Structured Oracle SQL builder.
//!
//! The conversion core never writes statement text directly: it accumulates
//! clauses into a [`QueryBuilder`] and asks for the bound SQL at the end.
//!
//! ## Design
//!
//! - One builder per statement; the kind is fixed at construction.
//! - Values are bound inline (quoted literals), so the output is a complete
//!   statement.
//! - Incomplete models (UPDATE without SET, INSERT without values, ...) are
//!   reported by [`QueryBuilder::to_bound_sql`], never rendered.

mod render;

use crate::condition::Condition;
use crate::value::Value;

/// Statement kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Select,
    Insert,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Select => "SELECT",
            Operation::Insert => "INSERT",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
        }
    }
}

/// Join kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL OUTER JOIN",
            JoinKind::Cross => "CROSS JOIN",
        }
    }
}

#[derive(Debug, Clone)]
struct Join {
    kind: JoinKind,
    table: String,
    on: Option<Condition>,
}

/// Set operation combining two rendered selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOp {
    Union,
    Intersect,
    Except,
}

impl SetOp {
    pub fn keyword(&self, all: bool) -> &'static str {
        match (self, all) {
            (SetOp::Union, false) => "UNION",
            (SetOp::Union, true) => "UNION ALL",
            (SetOp::Intersect, false) => "INTERSECT",
            (SetOp::Intersect, true) => "INTERSECT ALL",
            // Oracle spells EXCEPT as MINUS.
            (SetOp::Except, false) => "MINUS",
            (SetOp::Except, true) => "MINUS ALL",
        }
    }
}

#[derive(Debug, Clone)]
struct Compound {
    op: SetOp,
    all: bool,
    first: String,
    second: String,
}

#[derive(Debug, Clone)]
enum InsertSource {
    Values(Vec<Value>),
    Select(String),
}

/// Clause accumulator for one statement.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    operation: Operation,
    distinct: bool,
    projection: Vec<String>,
    table: Option<String>,
    joins: Vec<Join>,
    columns: Vec<String>,
    insert_source: Option<InsertSource>,
    assignments: Vec<(String, Value)>,
    conditions: Vec<Condition>,
    group_by: Vec<String>,
    order_by: Vec<String>,
    limit: Option<Value>,
    offset: Option<Value>,
    compound: Option<Compound>,
    build_error: Option<String>,
}

impl QueryBuilder {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            distinct: false,
            projection: Vec::new(),
            table: None,
            joins: Vec::new(),
            columns: Vec::new(),
            insert_source: None,
            assignments: Vec::new(),
            conditions: Vec::new(),
            group_by: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
            compound: None,
            build_error: None,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    // ==================== SELECT ====================

    /// Append projection items (already rendered).
    pub fn select<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projection.extend(items.into_iter().map(Into::into));
        self
    }

    /// Replace the projection list.
    pub fn set_projection(&mut self, items: Vec<String>) -> &mut Self {
        self.projection = items;
        self
    }

    pub fn projection(&self) -> &[String] {
        &self.projection
    }

    pub fn distinct(&mut self) -> &mut Self {
        self.distinct = true;
        self
    }

    /// Set the source (SELECT) or target (INSERT/UPDATE/DELETE) table,
    /// alias included.
    pub fn from(&mut self, table: impl Into<String>) -> &mut Self {
        if self.table.is_some() {
            self.build_error = Some("more than one source table".to_string());
        }
        self.table = Some(table.into());
        self
    }

    /// Alias of [`from`](Self::from) for INSERT targets.
    pub fn into_table(&mut self, table: impl Into<String>) -> &mut Self {
        self.from(table)
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// Add a join against the current source.
    pub fn join(
        &mut self,
        kind: JoinKind,
        table: impl Into<String>,
        on: Option<Condition>,
    ) -> &mut Self {
        if self.operation != Operation::Select {
            self.build_error = Some(format!("JOIN in {}", self.operation.as_str()));
        }
        self.joins.push(Join {
            kind,
            table: table.into(),
            on,
        });
        self
    }

    pub fn group_by(&mut self, key: impl Into<String>) -> &mut Self {
        self.group_by.push(key.into());
        self
    }

    pub fn order_by(&mut self, key: impl Into<String>) -> &mut Self {
        self.order_by.push(key.into());
        self
    }

    /// Row limit, and optional row offset.
    pub fn limit(&mut self, limit: Option<Value>, offset: Option<Value>) -> &mut Self {
        self.limit = limit;
        self.offset = offset;
        self
    }

    /// Combine two rendered selects. `first` is written before `second`.
    pub fn compound(
        &mut self,
        op: SetOp,
        all: bool,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> &mut Self {
        self.compound = Some(Compound {
            op,
            all,
            first: first.into(),
            second: second.into(),
        });
        self
    }

    pub fn union(
        &mut self,
        all: bool,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> &mut Self {
        self.compound(SetOp::Union, all, first, second)
    }

    pub fn intersect(
        &mut self,
        all: bool,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> &mut Self {
        self.compound(SetOp::Intersect, all, first, second)
    }

    pub fn except(
        &mut self,
        all: bool,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> &mut Self {
        self.compound(SetOp::Except, all, first, second)
    }

    // ==================== WHERE ====================

    /// Add a condition, ANDed with the existing ones.
    pub fn and_where(&mut self, cond: Condition) -> &mut Self {
        if !cond.is_empty() {
            self.conditions.push(cond);
        }
        self
    }

    /// The accumulated WHERE conditions as one conjunction.
    pub fn where_condition(&self) -> Condition {
        Condition::And(self.conditions.clone())
    }

    // ==================== INSERT ====================

    /// Set the INSERT column list (already rendered).
    pub fn columns<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Single VALUES row.
    pub fn insert_values(&mut self, values: Vec<Value>) -> &mut Self {
        self.insert_source = Some(InsertSource::Values(values));
        self
    }

    /// INSERT ... SELECT source (already rendered).
    pub fn insert_select(&mut self, select_sql: impl Into<String>) -> &mut Self {
        self.insert_source = Some(InsertSource::Select(select_sql.into()));
        self
    }

    // ==================== UPDATE ====================

    /// Add a SET assignment.
    pub fn update(&mut self, column: impl Into<String>, value: Value) -> &mut Self {
        self.assignments.push((column.into(), value));
        self
    }
}
