//! 核心服务错误类型
//!
//! 定义仓储层和服务层的业务错误与系统错误

use thiserror::Error;
use uuid::Uuid;

/// 核心服务错误类型
#[derive(Debug, Error)]
pub enum BinnyError {
    // === 资源不存在 ===
    #[error("图鉴不存在: {0}")]
    CollectionNotFound(i64),

    #[error("用户尚未拥有图鉴: user_id={0}")]
    UserCollectionMissing(i64),

    #[error("宠物不存在: {0}")]
    BinnyNotFound(i64),

    #[error("奖励记录不存在: {0}")]
    RewardHistoryNotFound(i64),

    #[error("文件不存在: {0}")]
    FileNotFound(Uuid),

    // === 参数错误 ===
    #[error("参数校验失败: {0}")]
    Validation(String),

    // === 系统错误 ===
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JSON 序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 核心服务 Result 类型别名
pub type Result<T> = std::result::Result<T, BinnyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlx_error_converts_to_database() {
        let err: BinnyError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, BinnyError::Database(_)));
    }

    #[test]
    fn test_display_contains_context() {
        assert!(BinnyError::BinnyNotFound(42).to_string().contains("42"));
        let id = Uuid::new_v4();
        assert!(BinnyError::FileNotFound(id).to_string().contains(&id.to_string()));
    }
}
