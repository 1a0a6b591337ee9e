//! INSERT 语句构建
//!
//! 插入总是完整指定的列值对，不经过过滤谓词。

use crate::error::{ClientsError, Result};

use super::predicate::bind;
use super::statement::Statement;
use super::value::SqlValue;

/// INSERT 语句构建器
#[derive(Debug, Clone)]
pub struct InsertQuery {
    table: &'static str,
    values: Vec<(&'static str, SqlValue)>,
    returning: Option<&'static str>,
}

impl InsertQuery {
    pub fn table(table: &'static str) -> Self {
        Self {
            table,
            values: Vec::new(),
            returning: None,
        }
    }

    pub fn value(mut self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        self.values.push((column, value.into()));
        self
    }

    /// 仅在值存在时写入该列，缺省交给存储层默认值
    pub fn value_opt<V: Into<SqlValue>>(self, column: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.value(column, value),
            None => self,
        }
    }

    pub fn returning(mut self, column: &'static str) -> Self {
        self.returning = Some(column);
        self
    }

    pub fn build(self) -> Result<Statement> {
        if self.values.is_empty() {
            return Err(ClientsError::validation(format!(
                "INSERT {} 缺少列",
                self.table
            )));
        }

        let mut params = Vec::with_capacity(self.values.len());
        let (columns, placeholders): (Vec<&str>, Vec<String>) = self
            .values
            .into_iter()
            .map(|(column, value)| (column, bind(&mut params, value)))
            .unzip();

        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            columns.join(", "),
            placeholders.join(", ")
        );
        if let Some(column) = self.returning {
            sql.push_str(" RETURNING ");
            sql.push_str(column);
        }

        Ok(Statement::new(sql, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_with_returning() {
        let stmt = InsertQuery::table("client_matches")
            .value("client_id", "c1")
            .value("score", 7i64)
            .returning("id")
            .build()
            .unwrap();
        assert_eq!(
            stmt.sql,
            "INSERT INTO client_matches (client_id, score) VALUES ($1, $2) RETURNING id"
        );
        assert_eq!(
            stmt.params,
            vec![SqlValue::Text("c1".to_string()), SqlValue::Int(7)]
        );
    }

    #[test]
    fn test_optional_value_is_omitted() {
        let stmt = InsertQuery::table("clients")
            .value("id", "c1")
            .value_opt::<i64>("score", None)
            .build()
            .unwrap();
        assert_eq!(stmt.sql, "INSERT INTO clients (id) VALUES ($1)");
    }

    #[test]
    fn test_empty_insert_is_error() {
        assert!(InsertQuery::table("clients").build().is_err());
    }
}
