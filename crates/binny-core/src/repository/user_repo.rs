//! 用户与图鉴仓储

use async_trait::async_trait;
use sqlx::PgPool;

use super::traits::UserRepositoryTrait;
use crate::error::Result;
use crate::models::{BinnyCollection, BinnyUser};

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 幂等创建用户
    ///
    /// 冲突时做一次空更新，使 RETURNING 在两种情况下都返回行
    pub async fn ensure_user(&self, username: &str) -> Result<BinnyUser> {
        let user = sqlx::query_as::<_, BinnyUser>(
            r#"
            INSERT INTO binny_users (username)
            VALUES ($1)
            ON CONFLICT (username) DO UPDATE SET username = EXCLUDED.username
            RETURNING id, username, created_at, updated_at
            "#,
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn get_collection_by_user(&self, user_id: i64) -> Result<Option<BinnyCollection>> {
        let collection = sqlx::query_as::<_, BinnyCollection>(
            r#"
            SELECT id, user_id, created_at, updated_at
            FROM binny_collections
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(collection)
    }

    pub async fn ensure_collection(&self, user_id: i64) -> Result<BinnyCollection> {
        let collection = sqlx::query_as::<_, BinnyCollection>(
            r#"
            INSERT INTO binny_collections (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id, user_id, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(collection)
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn ensure_user(&self, username: &str) -> Result<BinnyUser> {
        self.ensure_user(username).await
    }

    async fn get_collection_by_user(&self, user_id: i64) -> Result<Option<BinnyCollection>> {
        self.get_collection_by_user(user_id).await
    }

    async fn ensure_collection(&self, user_id: i64) -> Result<BinnyCollection> {
        self.ensure_collection(user_id).await
    }
}
