//! 客户服务错误类型
//!
//! 区分调用方输入错误与存储层错误，存储错误原样向上传递，不做重试。

use thiserror::Error;

/// 客户服务错误类型
#[derive(Debug, Error)]
pub enum ClientsError {
    #[error("参数校验失败: {0}")]
    Validation(String),

    #[error("数据库错误: {0}")]
    Storage(#[from] sqlx::Error),
}

/// 客户服务 Result 类型别名
pub type Result<T> = std::result::Result<T, ClientsError>;

impl ClientsError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// 获取错误码
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            ClientsError::validation("x").error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            ClientsError::Storage(sqlx::Error::RowNotFound).error_code(),
            "STORAGE_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        let err = ClientsError::validation("name 不能为空");
        assert!(err.to_string().contains("name 不能为空"));
    }
}
