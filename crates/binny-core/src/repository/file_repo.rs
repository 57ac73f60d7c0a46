//! 上传文件仓储

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::traits::FileRepositoryTrait;
use crate::error::Result;
use crate::models::{NewFile, StoredFile};

pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_file(&self, file: &NewFile) -> Result<StoredFile> {
        let stored = sqlx::query_as::<_, StoredFile>(
            r#"
            INSERT INTO files (uuid, user_id, name, content_type, blob)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING uuid, user_id, name, content_type, blob, created_at
            "#,
        )
        .bind(file.uuid)
        .bind(file.user_id)
        .bind(&file.name)
        .bind(&file.content_type)
        .bind(&file.blob)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    /// 获取用户自己的文件
    pub async fn get_user_file(&self, user_id: i64, uuid: Uuid) -> Result<Option<StoredFile>> {
        let file = sqlx::query_as::<_, StoredFile>(
            r#"
            SELECT uuid, user_id, name, content_type, blob, created_at
            FROM files
            WHERE uuid = $1 AND user_id = $2
            "#,
        )
        .bind(uuid)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(file)
    }
}

#[async_trait]
impl FileRepositoryTrait for FileRepository {
    async fn create_file(&self, file: &NewFile) -> Result<StoredFile> {
        self.create_file(file).await
    }

    async fn get_user_file(&self, user_id: i64, uuid: Uuid) -> Result<Option<StoredFile>> {
        self.get_user_file(user_id, uuid).await
    }
}
