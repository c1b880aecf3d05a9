use super::{InsertSource, Operation, QueryBuilder};
use crate::condition::Condition;
use crate::error::{ConvertError, ConvertResult};

impl QueryBuilder {
    /// Validate builder state.
    pub fn validate(&self) -> ConvertResult<()> {
        if let Some(err) = &self.build_error {
            return Err(ConvertError::builder(err.clone()));
        }
        match self.operation {
            Operation::Select => {
                if self.compound.is_none() && self.projection.is_empty() {
                    return Err(ConvertError::builder("SELECT without projection"));
                }
            }
            Operation::Insert => {
                if self.table.is_none() {
                    return Err(ConvertError::builder("INSERT without target table"));
                }
                match &self.insert_source {
                    None => return Err(ConvertError::builder("INSERT without values")),
                    Some(InsertSource::Values(values)) => {
                        if values.len() != self.columns.len() {
                            return Err(ConvertError::builder(format!(
                                "INSERT has {} columns but {} values",
                                self.columns.len(),
                                values.len()
                            )));
                        }
                    }
                    Some(InsertSource::Select(_)) => {}
                }
            }
            Operation::Update => {
                if self.table.is_none() {
                    return Err(ConvertError::builder("UPDATE without target table"));
                }
                if self.assignments.is_empty() {
                    return Err(ConvertError::builder("UPDATE requires at least one SET"));
                }
            }
            Operation::Delete => {
                if self.table.is_none() {
                    return Err(ConvertError::builder("DELETE without target table"));
                }
            }
        }
        Ok(())
    }

    /// Render the statement with every value bound inline.
    pub fn to_bound_sql(&self) -> ConvertResult<String> {
        self.validate()?;
        let sql = match self.operation {
            Operation::Select => self.render_select(),
            Operation::Insert => self.render_insert(),
            Operation::Update => self.render_update(),
            Operation::Delete => self.render_delete(),
        };
        Ok(sql)
    }

    fn render_select(&self) -> String {
        let mut sql = String::new();

        if let Some(c) = &self.compound {
            sql.push_str(&format!(
                "({}) {} ({})",
                c.first,
                c.op.keyword(c.all),
                c.second
            ));
        } else {
            sql.push_str("SELECT ");
            if self.distinct {
                sql.push_str("DISTINCT ");
            }
            sql.push_str(&self.projection.join(","));

            sql.push_str(" FROM ");
            sql.push_str(self.table.as_deref().unwrap_or("DUAL"));

            for join in &self.joins {
                sql.push(' ');
                sql.push_str(join.kind.keyword());
                sql.push(' ');
                sql.push_str(&join.table);
                if let Some(on) = &join.on {
                    sql.push_str(" ON ");
                    sql.push_str(&on.to_sql());
                }
            }

            self.push_where(&mut sql);

            if !self.group_by.is_empty() {
                sql.push_str(" GROUP BY ");
                sql.push_str(&self.group_by.join(","));
            }
        }

        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by.join(","));
        }

        if let Some(offset) = &self.offset {
            sql.push_str(&format!(" OFFSET {} ROWS", offset.display()));
        }
        if let Some(limit) = &self.limit {
            sql.push_str(&format!(" FETCH NEXT {} ROWS ONLY", limit.display()));
        }

        sql
    }

    fn render_insert(&self) -> String {
        let mut sql = format!(
            "INSERT INTO {} ({})",
            self.table.as_deref().unwrap_or_default(),
            self.columns.join(",")
        );
        match &self.insert_source {
            Some(InsertSource::Values(values)) => {
                let values: Vec<String> = values.iter().map(|v| v.display()).collect();
                sql.push_str(&format!(" VALUES ({})", values.join(",")));
            }
            Some(InsertSource::Select(select)) => {
                sql.push(' ');
                sql.push_str(select);
            }
            None => {}
        }
        sql
    }

    fn render_update(&self) -> String {
        let sets: Vec<String> = self
            .assignments
            .iter()
            .map(|(col, value)| format!("{col}={}", value.operand()))
            .collect();
        let mut sql = format!(
            "UPDATE {} SET {}",
            self.table.as_deref().unwrap_or_default(),
            sets.join(",")
        );
        self.push_where(&mut sql);
        sql
    }

    fn render_delete(&self) -> String {
        let mut sql = format!("DELETE FROM {}", self.table.as_deref().unwrap_or_default());
        self.push_where(&mut sql);
        sql
    }

    fn push_where(&self, sql: &mut String) {
        let cond = Condition::And(self.conditions.clone());
        if !cond.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&cond.to_sql());
        }
    }
}
