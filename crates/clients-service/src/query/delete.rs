//! DELETE 语句构建

use crate::error::Result;

use super::clause::{Filter, render_where};
use super::predicate::FilterPredicate;
use super::statement::Statement;

/// DELETE 语句构建器
///
/// 不带过滤条件时删除整表。
#[derive(Debug, Clone)]
pub struct DeleteQuery {
    table: &'static str,
    filters: Vec<Filter>,
}

impl DeleteQuery {
    pub fn from(table: &'static str) -> Self {
        Self {
            table,
            filters: Vec::new(),
        }
    }

    pub fn filter(mut self, column: &'static str, predicate: FilterPredicate) -> Self {
        self.filters.push((column, predicate));
        self
    }

    pub fn build(self) -> Result<Statement> {
        let mut params = Vec::new();
        let where_clause = render_where(&self.filters, &mut params)?;
        Ok(Statement::new(
            format!("DELETE FROM {}{}", self.table, where_clause),
            params,
        ))
    }
}
