//! 上传文件实体

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 已持久化的上传文件，创建后不可变
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StoredFile {
    pub uuid: Uuid,
    pub user_id: i64,
    pub name: String,
    pub content_type: String,
    pub blob: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

/// 待写入的上传文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFile {
    pub uuid: Uuid,
    pub user_id: i64,
    pub name: String,
    pub content_type: String,
    pub blob: Vec<u8>,
}

impl NewFile {
    /// 生成新的文件 UUID
    pub fn new(
        user_id: i64,
        name: impl Into<String>,
        content_type: impl Into<String>,
        blob: Vec<u8>,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            user_id,
            name: name.into(),
            content_type: content_type.into(),
            blob,
        }
    }
}
