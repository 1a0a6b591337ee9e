//! 客户 ID 生成

use uuid::Uuid;

/// 不透明 ID 生成器
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// 基于 UUID v7 的 ID 生成器
///
/// 输出 32 位无连字符十六进制串，按时间近似有序
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn generate(&self) -> String {
        Uuid::now_v7().simple().to_string()
    }
}
