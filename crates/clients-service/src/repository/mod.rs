//! 数据库仓储层
//!
//! 提供客户与比赛记录的数据访问接口，SQL 统一由查询构建器生成。
//!
//! ## 设计原则
//!
//! - 仓储只负责数据持久化，不包含传输层逻辑
//! - 所有调用方输入均作为绑定参数传递
//! - 跨表写入（记录比赛 + 调整积分）在单个事务内完成
//! - 定义 trait 接口以支持 mock 测试

mod client_repo;
mod match_ledger;
mod traits;

pub use client_repo::ClientRepository;
pub use match_ledger::MatchLedger;
pub use traits::*;
