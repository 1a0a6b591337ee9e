//! 绑定参数值

use chrono::{DateTime, Utc};

/// 语句中的绑定参数
///
/// 调用方提供的值只会以该类型进入参数列表，不会拼接进 SQL 文本。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Text(String),
    Int(i64),
    Timestamp(DateTime<Utc>),
    /// 作为单个数组参数绑定（`TEXT[]`）
    TextArray(Vec<String>),
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}
