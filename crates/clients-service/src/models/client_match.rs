//! 比赛记录

use serde::{Deserialize, Serialize};

/// 比赛记录
///
/// 一条记录对应一次客户积分变动
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ClientMatch {
    pub id: i64,
    /// 关联客户（不校验是否存在）
    pub client_id: String,
    /// 积分增量，可为负
    pub score: i64,
}

/// 记录比赛的输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatch {
    pub client_id: String,
    pub score: i64,
}

impl NewMatch {
    pub fn new(client_id: impl Into<String>, score: i64) -> Self {
        Self {
            client_id: client_id.into(),
            score,
        }
    }
}
