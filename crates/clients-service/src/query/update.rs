//! UPDATE 语句构建
//!
//! 只支持 `col = col + $n` 形式的相对自增，由存储层原子完成。

use crate::error::{ClientsError, Result};

use super::clause::{Filter, render_where};
use super::predicate::{FilterPredicate, bind};
use super::statement::Statement;
use super::value::SqlValue;

/// UPDATE 语句构建器
#[derive(Debug, Clone)]
pub struct UpdateQuery {
    table: &'static str,
    increments: Vec<(&'static str, i64)>,
    filters: Vec<Filter>,
}

impl UpdateQuery {
    pub fn table(table: &'static str) -> Self {
        Self {
            table,
            increments: Vec::new(),
            filters: Vec::new(),
        }
    }

    pub fn increment(mut self, column: &'static str, delta: i64) -> Self {
        self.increments.push((column, delta));
        self
    }

    pub fn filter(mut self, column: &'static str, predicate: FilterPredicate) -> Self {
        self.filters.push((column, predicate));
        self
    }

    pub fn build(self) -> Result<Statement> {
        if self.increments.is_empty() {
            return Err(ClientsError::validation(format!(
                "UPDATE {} 缺少 SET 子句",
                self.table
            )));
        }

        let mut params = Vec::new();
        let sets: Vec<String> = self
            .increments
            .into_iter()
            .map(|(column, delta)| {
                format!(
                    "{} = {} + {}",
                    column,
                    column,
                    bind(&mut params, SqlValue::Int(delta))
                )
            })
            .collect();
        let where_clause = render_where(&self.filters, &mut params)?;

        let sql = format!(
            "UPDATE {} SET {}{}",
            self.table,
            sets.join(", "),
            where_clause
        );
        Ok(Statement::new(sql, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_binds_delta_before_filter() {
        let stmt = UpdateQuery::table("clients")
            .increment("score", -3)
            .filter("id", FilterPredicate::equal("c1"))
            .build()
            .unwrap();
        assert_eq!(stmt.sql, "UPDATE clients SET score = score + $1 WHERE id = $2");
        assert_eq!(
            stmt.params,
            vec![SqlValue::Int(-3), SqlValue::Text("c1".to_string())]
        );
    }

    #[test]
    fn test_update_without_increment_is_error() {
        let result = UpdateQuery::table("clients")
            .filter("id", FilterPredicate::equal("c1"))
            .build();
        assert!(result.is_err());
    }
}
