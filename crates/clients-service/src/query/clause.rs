//! 各类语句共用的子句渲染

use crate::error::Result;

use super::predicate::FilterPredicate;
use super::value::SqlValue;

/// 绑定到列的过滤条件
pub type Filter = (&'static str, FilterPredicate);

/// ORDER BY 子句
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderClause {
    pub column: &'static str,
    pub desc: bool,
}

/// 渲染 WHERE 子句，多个条件以 AND 连接，顺序与传入顺序一致
pub(crate) fn render_where(filters: &[Filter], params: &mut Vec<SqlValue>) -> Result<String> {
    if filters.is_empty() {
        return Ok(String::new());
    }

    let clauses = filters
        .iter()
        .map(|(column, predicate)| predicate.to_sql(column, params))
        .collect::<Result<Vec<_>>>()?;

    Ok(format!(" WHERE {}", clauses.join(" AND ")))
}

pub(crate) fn render_order(order: &[OrderClause]) -> String {
    if order.is_empty() {
        return String::new();
    }

    let parts: Vec<String> = order
        .iter()
        .map(|o| format!("{} {}", o.column, if o.desc { "DESC" } else { "ASC" }))
        .collect();

    format!(" ORDER BY {}", parts.join(", "))
}
