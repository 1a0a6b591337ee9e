//! 客户服务
//!
//! 维护客户档案与比赛记录，并提供无状态的字符串排序工具。
//!
//! ## 核心功能
//!
//! - **客户管理**：创建、条件查询、批量获取、删除客户
//! - **比赛账本**：记录比赛并在同一事务内调整客户积分
//! - **排序工具**：字符串列表排序，可选去重
//!
//! ## 模块结构
//!
//! - `models`: 领域模型定义
//! - `error`: 错误类型定义
//! - `query`: 参数化 SQL 构建器
//! - `repository`: 数据库仓储层
//! - `grpc`: gRPC 服务端实现
//! - `id`: 客户 ID 生成
//! - `sort`: 排序工具

pub mod error;
pub mod grpc;
pub mod id;
pub mod models;
pub mod query;
pub mod repository;
pub mod sort;

pub use error::{ClientsError, Result};
pub use grpc::ClientsServiceImpl;
pub use models::{Client, ClientFilter, ClientMatch, NewClient, NewMatch};
pub use repository::{ClientRepository, MatchLedger};
