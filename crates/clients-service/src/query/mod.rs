//! 查询构建器
//!
//! 将可选过滤条件与固定子句组合为参数化语句，避免手工拼接 SQL 字符串。
//!
//! - [`SelectQuery`] — 列、过滤条件、排序
//! - [`InsertQuery`] — 完整指定的列值对，可带 `RETURNING`
//! - [`UpdateQuery`] — `SET` 赋值 / 原子自增与过滤条件
//! - [`DeleteQuery`] — 过滤条件，缺省为整表删除
//!
//! 每个构建器的 `build` 返回 [`Statement`]：`$1..$n` 占位符的 SQL 与顺序一致的参数列表。
//! 多个过滤条件以 AND 连接，顺序与传入顺序一致。结构性错误直接返回 `Err`，不会产出半成品语句。
//!
//! ```ignore
//! let stmt = SelectQuery::from("clients")
//!     .columns(["id"])
//!     .filter("score", FilterPredicate::range(RangeOperator::GreaterThan, [10i64])?)
//!     .order_by("score", true)
//!     .build()?;
//! let ids: Vec<String> = stmt.query_scalar().fetch_all(&pool).await?;
//! ```

mod clause;
mod delete;
mod insert;
mod predicate;
mod select;
mod statement;
mod update;
mod value;

pub use clause::{Filter, OrderClause};
pub use delete::DeleteQuery;
pub use insert::InsertQuery;
pub use predicate::{FilterPredicate, RangeBound, RangeOperator};
pub use select::SelectQuery;
pub use statement::Statement;
pub use update::UpdateQuery;
pub use value::SqlValue;
