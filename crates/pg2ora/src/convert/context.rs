use crate::builder::{Operation, QueryBuilder};
use crate::error::{ConvertError, ConvertResult};
use crate::options::Settings;
use crate::value::Value;

/// Everything the MERGE template needs, already rendered.
#[derive(Debug, Clone, Default)]
pub(crate) struct UpsertDescriptor {
    pub table: String,
    pub conflict_columns: Vec<String>,
    /// `<value> <column>` items of the USING pseudo-row.
    pub using: Vec<String>,
    /// ON condition pairs, joined with AND.
    pub on: Vec<String>,
    /// `<column> = <value>` items; empty for DO NOTHING.
    pub update_set: Vec<String>,
    pub insert_columns: Vec<String>,
    pub insert_values: Vec<String>,
    pub do_nothing: bool,
}

/// Accumulator for one statement translation.
///
/// Nested statements (subqueries, set operation operands, returning
/// projections) get their own context from [`ConversionContext::child`];
/// only the settings travel down.
#[derive(Debug)]
pub(crate) struct ConversionContext {
    pub settings: Settings,
    pub builder: QueryBuilder,
    /// Rendered insert column names, index-aligned with `insert_values`.
    pub insert_columns: Vec<String>,
    pub insert_values: Vec<Value>,
    /// True when the insert source is a SELECT rather than a VALUES row.
    pub insert_from_select: bool,
    pub upsert: Option<UpsertDescriptor>,
    /// Script text that replaces the builder's rendering.
    pub override_sql: Option<String>,
    pub in_transaction: bool,
}

impl ConversionContext {
    pub fn new(settings: Settings, operation: Operation, in_transaction: bool) -> Self {
        Self {
            settings,
            builder: QueryBuilder::new(operation),
            insert_columns: Vec::new(),
            insert_values: Vec::new(),
            insert_from_select: false,
            upsert: None,
            override_sql: None,
            in_transaction,
        }
    }

    /// A fresh context for a nested statement.
    pub fn child(&self, operation: Operation) -> Self {
        Self::new(self.settings, operation, false)
    }

    pub fn operation(&self) -> Operation {
        self.builder.operation()
    }

    /// Record the insert column list and values; they must line up.
    pub fn set_insert_row(&mut self, columns: Vec<String>, values: Vec<Value>) -> ConvertResult<()> {
        if columns.len() != values.len() {
            return Err(ConvertError::mismatch(format!(
                "INSERT lists {} columns but {} values",
                columns.len(),
                values.len()
            )));
        }
        self.insert_columns = columns;
        self.insert_values = values;
        Ok(())
    }

    /// The insert value bound to `column`.
    pub fn insert_value(&self, column: &str) -> Option<&Value> {
        self.insert_columns
            .iter()
            .position(|c| c == column)
            .map(|idx| &self.insert_values[idx])
    }

    /// The statement text: the override script if one was set, else the
    /// builder's rendering.
    pub fn base_sql(&self) -> ConvertResult<String> {
        match &self.override_sql {
            Some(sql) => Ok(sql.clone()),
            None => self.builder.to_bound_sql(),
        }
    }
}
