//! 客户实体与查询条件

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ClientsError, Result};
use crate::query::{Filter, FilterPredicate};

/// 客户
///
/// `score` 是缓存值，始终等于创建时积分加上全部比赛记录的积分之和
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    /// 生日（null 表示未知，而非纪元零点）
    #[sqlx(default)]
    pub birthday: Option<DateTime<Utc>>,
    pub score: i64,
    /// 由存储层在插入时写入
    #[sqlx(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// 创建客户的输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    pub name: String,
    pub birthday: Option<DateTime<Utc>>,
    pub score: i64,
}

impl NewClient {
    pub fn new(name: impl Into<String>, birthday: Option<DateTime<Utc>>, score: i64) -> Self {
        Self {
            name: name.into(),
            birthday,
            score,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ClientsError::validation("name 不能为空"));
        }
        Ok(())
    }
}

/// 客户查询条件
///
/// 每个字段都是可选的，未设置表示不限制。名称按子串匹配，其余字段按等值或范围匹配。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFilter {
    pub id: Option<String>,
    pub name: Option<String>,
    pub birthday: Option<FilterPredicate>,
    pub score: Option<FilterPredicate>,
    pub created_at: Option<FilterPredicate>,
}

impl ClientFilter {
    /// 按固定字段顺序展开为 (列, 谓词) 列表
    pub fn predicates(&self) -> Vec<Filter> {
        [
            self.id.clone().map(|id| ("id", FilterPredicate::equal(id))),
            self.name
                .clone()
                .map(|name| ("name", FilterPredicate::contains(name))),
            self.birthday.clone().map(|p| ("birthday", p)),
            self.score.clone().map(|p| ("score", p)),
            self.created_at.clone().map(|p| ("created_at", p)),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::RangeOperator;

    #[test]
    fn test_new_client_requires_name() {
        assert!(NewClient::new("alice", None, 0).validate().is_ok());
        assert!(NewClient::new("   ", None, 0).validate().is_err());
    }

    #[test]
    fn test_empty_filter_has_no_predicates() {
        let filter = ClientFilter::default();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_predicates_follow_field_order() {
        let filter = ClientFilter {
            created_at: Some(FilterPredicate::between(
                DateTime::<Utc>::UNIX_EPOCH,
                Utc::now(),
            )),
            score: Some(FilterPredicate::range(RangeOperator::GreaterOrEqual, [3i64]).unwrap()),
            name: Some("ali".to_string()),
            ..Default::default()
        };

        let columns: Vec<&str> = filter.predicates().iter().map(|(c, _)| *c).collect();
        assert_eq!(columns, vec!["name", "score", "created_at"]);
        assert_eq!(
            filter.predicates()[0].1,
            FilterPredicate::Contains("ali".to_string())
        );
    }
}
