//! 客户仓储
//!
//! 提供客户的创建、条件查询、批量获取与删除

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};

use super::traits::ClientRepositoryTrait;
use crate::error::Result;
use crate::id::{IdGenerator, UuidIdGenerator};
use crate::models::{Client, ClientFilter, NewClient};
use crate::query::{DeleteQuery, FilterPredicate, InsertQuery, SelectQuery, Statement};

const TABLE: &str = "clients";
const COLUMNS: [&str; 5] = ["id", "name", "birthday", "score", "created_at"];

/// 客户仓储
pub struct ClientRepository {
    pool: PgPool,
    id_generator: Arc<dyn IdGenerator>,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self::with_id_generator(pool, Arc::new(UuidIdGenerator))
    }

    pub fn with_id_generator(pool: PgPool, id_generator: Arc<dyn IdGenerator>) -> Self {
        Self { pool, id_generator }
    }

    /// 创建客户
    ///
    /// 生日未设置时不写该列，`created_at` 由存储层默认值填充
    #[instrument(skip(self, client), fields(name = %client.name))]
    pub async fn create(&self, client: &NewClient) -> Result<String> {
        client.validate()?;

        let id = self.id_generator.generate();
        Self::insert_statement(&id, client)?
            .query()
            .execute(&self.pool)
            .await?;

        info!(client_id = %id, "Client created");
        Ok(id)
    }

    /// 按条件查询客户 ID
    ///
    /// 按积分降序，积分相同时按 ID 升序；无条件时返回全部客户
    #[instrument(skip(self))]
    pub async fn query_ids(&self, filter: &ClientFilter) -> Result<Vec<String>> {
        let ids: Vec<String> = Self::query_statement(filter)?
            .query_scalar()
            .fetch_all(&self.pool)
            .await?;

        debug!(count = ids.len(), "Clients matched");
        Ok(ids)
    }

    /// 批量获取客户
    ///
    /// 不存在的 ID 直接忽略；空列表不访问数据库
    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    pub async fn get_by_ids(&self, ids: &[String]) -> Result<Vec<Client>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let clients = Self::get_statement(ids)?
            .query_as::<Client>()
            .fetch_all(&self.pool)
            .await?;

        Ok(clients)
    }

    /// 删除客户（幂等）
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        let result = DeleteQuery::from(TABLE)
            .filter("id", FilterPredicate::equal(id))
            .build()?
            .query()
            .execute(&self.pool)
            .await?;

        debug!(rows = result.rows_affected(), "Client delete executed");
        Ok(())
    }

    /// 清空客户表
    ///
    /// 返回删除的行数
    #[instrument(skip(self))]
    pub async fn delete_all(&self) -> Result<u64> {
        let result = DeleteQuery::from(TABLE)
            .build()?
            .query()
            .execute(&self.pool)
            .await?;

        let rows = result.rows_affected();
        warn!(rows, "All clients deleted");
        Ok(rows)
    }

    pub(crate) fn insert_statement(id: &str, client: &NewClient) -> Result<Statement> {
        InsertQuery::table(TABLE)
            .value("id", id)
            .value("name", client.name.as_str())
            .value_opt("birthday", client.birthday)
            .value("score", client.score)
            .build()
    }

    pub(crate) fn query_statement(filter: &ClientFilter) -> Result<Statement> {
        SelectQuery::from(TABLE)
            .columns(["id"])
            .filters(filter.predicates())
            .order_by("score", true)
            .order_by("id", false)
            .build()
    }

    pub(crate) fn get_statement(ids: &[String]) -> Result<Statement> {
        SelectQuery::from(TABLE)
            .columns(COLUMNS)
            .filter("id", FilterPredicate::any_of(ids.iter().map(String::as_str)))
            .order_by("score", true)
            .order_by("id", false)
            .build()
    }
}

#[async_trait]
impl ClientRepositoryTrait for ClientRepository {
    async fn create(&self, client: &NewClient) -> Result<String> {
        self.create(client).await
    }

    async fn query_ids(&self, filter: &ClientFilter) -> Result<Vec<String>> {
        self.query_ids(filter).await
    }

    async fn get_by_ids(&self, ids: &[String]) -> Result<Vec<Client>> {
        self.get_by_ids(ids).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.delete(id).await
    }

    async fn delete_all(&self) -> Result<u64> {
        self.delete_all().await
    }
}
