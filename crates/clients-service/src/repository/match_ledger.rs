//! 比赛账本
//!
//! 记录比赛并同步调整客户积分。两步写入在同一事务内完成，
//! 任何一步失败都整体回滚，外部不会观察到只写了一半的状态。

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::{info, instrument, warn};

use super::traits::MatchLedgerTrait;
use crate::error::Result;
use crate::models::{ClientMatch, NewMatch};
use crate::query::{FilterPredicate, InsertQuery, SelectQuery, Statement, UpdateQuery};

const MATCHES_TABLE: &str = "client_matches";
const CLIENTS_TABLE: &str = "clients";

/// 比赛账本
///
/// 客户积分 = 创建时积分 + 该客户全部比赛记录积分之和。
/// 并发写同一客户时依赖数据库行级原子自增，不使用进程内锁。
pub struct MatchLedger {
    pool: PgPool,
}

impl MatchLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 记录比赛并调整积分
    ///
    /// 返回新比赛记录的 ID。不校验客户是否存在，客户不存在时比赛记录照常写入。
    #[instrument(skip(self, new_match), fields(client_id = %new_match.client_id, delta = new_match.score))]
    pub async fn record_match(&self, new_match: &NewMatch) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        // tx 未提交即被 drop 时自动回滚
        let match_id = Self::insert_match_in_tx(&mut tx, new_match).await?;
        let touched =
            Self::apply_score_delta_in_tx(&mut tx, &new_match.client_id, new_match.score).await?;

        tx.commit().await?;

        if touched == 0 {
            warn!(match_id, "Match recorded for unknown client");
        } else {
            info!(match_id, "Match recorded");
        }

        Ok(match_id)
    }

    /// 在事务中写入比赛记录
    pub async fn insert_match_in_tx(conn: &mut PgConnection, new_match: &NewMatch) -> Result<i64> {
        let id = Self::insert_statement(new_match)?
            .query_scalar::<i64>()
            .fetch_one(conn)
            .await?;
        Ok(id)
    }

    /// 在事务中原子调整客户积分
    ///
    /// 返回受影响的客户行数
    pub async fn apply_score_delta_in_tx(
        conn: &mut PgConnection,
        client_id: &str,
        delta: i64,
    ) -> Result<u64> {
        let result = Self::score_delta_statement(client_id, delta)?
            .query()
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// 列出客户的比赛记录（按 ID 升序）
    pub async fn list_by_client(&self, client_id: &str) -> Result<Vec<ClientMatch>> {
        let matches = SelectQuery::from(MATCHES_TABLE)
            .columns(["id", "client_id", "score"])
            .filter("client_id", FilterPredicate::equal(client_id))
            .order_by("id", false)
            .build()?
            .query_as::<ClientMatch>()
            .fetch_all(&self.pool)
            .await?;
        Ok(matches)
    }

    pub(crate) fn insert_statement(new_match: &NewMatch) -> Result<Statement> {
        InsertQuery::table(MATCHES_TABLE)
            .value("client_id", new_match.client_id.as_str())
            .value("score", new_match.score)
            .returning("id")
            .build()
    }

    pub(crate) fn score_delta_statement(client_id: &str, delta: i64) -> Result<Statement> {
        UpdateQuery::table(CLIENTS_TABLE)
            .increment("score", delta)
            .filter("id", FilterPredicate::equal(client_id))
            .build()
    }
}

#[async_trait]
impl MatchLedgerTrait for MatchLedger {
    async fn record_match(&self, new_match: &NewMatch) -> Result<i64> {
        self.record_match(new_match).await
    }
}
