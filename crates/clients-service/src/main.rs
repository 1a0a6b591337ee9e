//! 客户服务
//!
//! 提供客户管理、比赛记录与排序工具的 gRPC 服务入口。

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clients_proto::clients::clients_service_server::ClientsServiceServer;
use clients_shared::{config::AppConfig, database::Database, logging};
use tokio::signal;
use tonic::transport::Server;
use tracing::{info, warn};

use clients_service::{
    grpc::ClientsServiceImpl,
    repository::{ClientRepository, MatchLedger},
};

const SERVICE_NAME: &str = "clients-service";

#[tokio::main]
async fn main() -> Result<()> {
    // 1. 加载配置；日志尚未初始化，失败原因在初始化后补记
    let (config, load_error) = match AppConfig::load(SERVICE_NAME) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // 2. 初始化日志
    logging::init(&config.logging)?;
    if let Some(e) = load_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    info!("Starting {}...", SERVICE_NAME);
    info!(environment = %config.environment, "Configuration loaded");

    let grpc_addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("Invalid gRPC address: {}", config.server_addr()))?;

    // 3. 初始化数据库连接
    let db = Database::connect(&config.database).await?;
    db.health_check().await?;
    let pool = db.pool().clone();
    info!("Database connection established");

    // 4. 创建仓储
    let client_repo = Arc::new(ClientRepository::new(pool.clone()));
    let match_ledger = Arc::new(MatchLedger::new(pool));
    info!("Repositories initialized");

    // 5. 启动 gRPC 服务
    let grpc_service = ClientsServiceImpl::new(client_repo, match_ledger);
    info!("gRPC server listening on {}", grpc_addr);

    let served = Server::builder()
        .add_service(ClientsServiceServer::new(grpc_service))
        .serve_with_shutdown(grpc_addr, shutdown_signal())
        .await;

    // 无论服务如何退出，连接池只关闭一次
    db.close().await;
    served?;

    info!("Service shutdown complete");
    Ok(())
}

/// 优雅关闭信号处理
///
/// 监听 Ctrl+C 和 SIGTERM 信号
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown...");
        }
    }
}
