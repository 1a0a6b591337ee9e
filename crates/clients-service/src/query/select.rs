//! SELECT 语句构建

use crate::error::{ClientsError, Result};

use super::clause::{Filter, OrderClause, render_order, render_where};
use super::predicate::FilterPredicate;
use super::statement::Statement;

/// SELECT 语句构建器
#[derive(Debug, Clone)]
pub struct SelectQuery {
    table: &'static str,
    columns: Vec<&'static str>,
    filters: Vec<Filter>,
    order: Vec<OrderClause>,
}

impl SelectQuery {
    pub fn from(table: &'static str) -> Self {
        Self {
            table,
            columns: Vec::new(),
            filters: Vec::new(),
            order: Vec::new(),
        }
    }

    pub fn columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        self.columns.extend(columns);
        self
    }

    pub fn filter(mut self, column: &'static str, predicate: FilterPredicate) -> Self {
        self.filters.push((column, predicate));
        self
    }

    pub fn filters<I>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = Filter>,
    {
        self.filters.extend(filters);
        self
    }

    pub fn order_by(mut self, column: &'static str, desc: bool) -> Self {
        self.order.push(OrderClause { column, desc });
        self
    }

    pub fn build(self) -> Result<Statement> {
        if self.columns.is_empty() {
            return Err(ClientsError::validation(format!(
                "SELECT {} 缺少列",
                self.table
            )));
        }

        let mut params = Vec::new();
        let where_clause = render_where(&self.filters, &mut params)?;
        let sql = format!(
            "SELECT {} FROM {}{}{}",
            self.columns.join(", "),
            self.table,
            where_clause,
            render_order(&self.order)
        );

        Ok(Statement::new(sql, params))
    }
}
