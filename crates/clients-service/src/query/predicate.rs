//! 过滤谓词
//!
//! 每个谓词对应请求中的一个可选字段，渲染为一条参数化子句。
//! 列名与运算符来自代码中的固定集合，值一律通过占位符绑定。

use crate::error::{ClientsError, Result};

use super::value::SqlValue;

/// 范围比较运算符
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOperator {
    Equal,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
    Between,
}

impl RangeOperator {
    /// 运算符需要的绑定值数量
    pub fn arity(self) -> usize {
        match self {
            Self::Between => 2,
            _ => 1,
        }
    }

    fn as_sql(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::LessThan => "<",
            Self::LessOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterOrEqual => ">=",
            Self::Between => "BETWEEN",
        }
    }
}

/// 范围谓词的边界值
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeBound {
    Single(SqlValue),
    Pair(SqlValue, SqlValue),
}

/// 过滤谓词
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterPredicate {
    /// `col = $n`
    Equality(SqlValue),
    /// `col LIKE $n`，值两侧补 `%`
    Contains(String),
    /// `col <op> $n` 或 `col BETWEEN $n AND $n+1`
    Range { op: RangeOperator, bound: RangeBound },
    /// `col = ANY($n)`，整组值作为一个数组参数绑定，不受占位符数量上限约束
    AnyOf(Vec<String>),
}

impl FilterPredicate {
    pub fn equal(value: impl Into<SqlValue>) -> Self {
        Self::Equality(value.into())
    }

    pub fn contains(fragment: impl Into<String>) -> Self {
        Self::Contains(fragment.into())
    }

    pub fn any_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self::AnyOf(values.into_iter().map(Into::into).collect())
    }

    /// 构造范围谓词
    ///
    /// `Between` 必须恰好两个值，其余运算符必须恰好一个值。
    pub fn range<I, V>(op: RangeOperator, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<SqlValue>,
    {
        let values: Vec<SqlValue> = values.into_iter().map(Into::into).collect();
        let count = values.len();
        let mut values = values.into_iter();

        let bound = match (op, values.next(), values.next(), values.next()) {
            (RangeOperator::Between, Some(lower), Some(upper), None) => {
                RangeBound::Pair(lower, upper)
            }
            (op, Some(value), None, None) if op != RangeOperator::Between => {
                RangeBound::Single(value)
            }
            _ => {
                return Err(ClientsError::validation(format!(
                    "{:?} 需要 {} 个值, 实际 {} 个",
                    op,
                    op.arity(),
                    count
                )));
            }
        };

        Ok(Self::Range { op, bound })
    }

    pub fn between(lower: impl Into<SqlValue>, upper: impl Into<SqlValue>) -> Self {
        Self::Range {
            op: RangeOperator::Between,
            bound: RangeBound::Pair(lower.into(), upper.into()),
        }
    }

    /// 渲染为子句，并按占位符顺序追加绑定值
    pub(crate) fn to_sql(&self, column: &str, params: &mut Vec<SqlValue>) -> Result<String> {
        match self {
            Self::Equality(value) => Ok(format!("{} = {}", column, bind(params, value.clone()))),
            Self::Contains(fragment) => {
                let pattern = format!("%{}%", escape_like(fragment));
                Ok(format!("{} LIKE {}", column, bind(params, pattern.into())))
            }
            Self::Range { op, bound } => match (op, bound) {
                (RangeOperator::Between, RangeBound::Pair(lower, upper)) => {
                    let lower = bind(params, lower.clone());
                    let upper = bind(params, upper.clone());
                    Ok(format!("{} BETWEEN {} AND {}", column, lower, upper))
                }
                (op, RangeBound::Single(value)) if *op != RangeOperator::Between => Ok(format!(
                    "{} {} {}",
                    column,
                    op.as_sql(),
                    bind(params, value.clone())
                )),
                _ => Err(ClientsError::validation(format!(
                    "{} 的范围条件与运算符 {:?} 不匹配",
                    column, op
                ))),
            },
            Self::AnyOf(values) => {
                if values.is_empty() {
                    return Err(ClientsError::validation(format!(
                        "{} 的 ANY 条件不能为空",
                        column
                    )));
                }
                let placeholder = bind(params, SqlValue::TextArray(values.clone()));
                Ok(format!("{} = ANY({})", column, placeholder))
            }
        }
    }
}

/// 追加一个绑定值并返回其占位符
pub(crate) fn bind(params: &mut Vec<SqlValue>, value: SqlValue) -> String {
    params.push(value);
    format!("${}", params.len())
}

/// 转义 LIKE 通配符，调用方输入按字面匹配
fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for ch in fragment.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
