//! 仓储 Trait 定义
//!
//! 定义仓储接口，便于 gRPC 层依赖抽象而非具体实现，支持 mock 测试

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Client, ClientFilter, NewClient, NewMatch};

/// 客户仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientRepositoryTrait: Send + Sync {
    async fn create(&self, client: &NewClient) -> Result<String>;
    async fn query_ids(&self, filter: &ClientFilter) -> Result<Vec<String>>;
    async fn get_by_ids(&self, ids: &[String]) -> Result<Vec<Client>>;
    async fn delete(&self, id: &str) -> Result<()>;
    async fn delete_all(&self) -> Result<u64>;
}

/// 比赛账本接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchLedgerTrait: Send + Sync {
    async fn record_match(&self, new_match: &NewMatch) -> Result<i64>;
}
