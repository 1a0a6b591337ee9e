//! 数据库连接管理模块
//!
//! 提供 PostgreSQL 连接池管理，支持健康检查和连接配置。

use crate::config::DatabaseConfig;
use crate::error::Result;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{info, instrument, warn};

/// 数据库连接池包装
///
/// 进程内唯一的连接池句柄，克隆共享同一个池；`close` 只会真正执行一次。
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
    closed: Arc<AtomicBool>,
}

impl Database {
    /// 创建数据库连接池
    #[instrument(skip(config))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        info!("Connecting to database...");

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await?;

        info!("Database connection pool created");

        Ok(Self::from_pool(pool))
    }

    /// 包装已有连接池（测试中复用外部创建的池）
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// 获取连接池引用
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// 健康检查
    ///
    /// 启动时在对外提供服务前调用，连接池不可用时直接失败
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// 关闭连接池
    ///
    /// 返回本次调用是否执行了关闭；重复调用为空操作。
    pub async fn close(&self) -> bool {
        if self.closed.swap(true, Ordering::AcqRel) {
            warn!("Database connection pool already closed");
            return false;
        }
        self.pool.close().await;
        info!("Database connection pool closed");
        true
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}
