//! 构建完成的语句及其参数绑定

use sqlx::postgres::{PgArguments, PgRow, Postgres};
use sqlx::query::{Query, QueryAs, QueryScalar};
use sqlx::FromRow;

use super::value::SqlValue;

/// 参数化语句
///
/// `params` 的顺序与 `sql` 中 `$1..$n` 占位符从左到右的顺序一致。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

macro_rules! bind_params {
    ($query:expr, $params:expr) => {
        $params.iter().fold($query, |query, param| match param {
            SqlValue::Text(value) => query.bind(value.as_str()),
            SqlValue::Int(value) => query.bind(*value),
            SqlValue::Timestamp(value) => query.bind(*value),
            SqlValue::TextArray(values) => query.bind(values.as_slice()),
        })
    };
}

impl Statement {
    pub fn new(sql: String, params: Vec<SqlValue>) -> Self {
        Self { sql, params }
    }

    /// 绑定参数的执行型查询
    pub fn query(&self) -> Query<'_, Postgres, PgArguments> {
        bind_params!(sqlx::query(&self.sql), self.params)
    }

    /// 绑定参数并映射为实体
    pub fn query_as<T>(&self) -> QueryAs<'_, Postgres, T, PgArguments>
    where
        T: for<'r> FromRow<'r, PgRow>,
    {
        bind_params!(sqlx::query_as::<Postgres, T>(&self.sql), self.params)
    }

    /// 绑定参数并读取单列
    pub fn query_scalar<T>(&self) -> QueryScalar<'_, Postgres, T, PgArguments>
    where
        (T,): for<'r> FromRow<'r, PgRow>,
    {
        bind_params!(sqlx::query_scalar::<Postgres, T>(&self.sql), self.params)
    }
}
