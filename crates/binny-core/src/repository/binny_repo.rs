//! 宠物与图鉴仓储

use async_trait::async_trait;
use sqlx::PgPool;

use super::traits::BinnyRepositoryTrait;
use crate::error::Result;
use crate::models::{Binny, BinnyCollection};

pub struct BinnyRepository {
    pool: PgPool,
}

impl BinnyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== 查询操作 ====================

    /// 获取用户图鉴中的宠物
    pub async fn get_user_binny(&self, user_id: i64, id: i64) -> Result<Option<Binny>> {
        let binny = sqlx::query_as::<_, Binny>(
            r#"
            SELECT b.id, b.collection_id, b.binny_type, b.name, b.xp, b.created_at, b.updated_at
            FROM binnies b
            JOIN binny_collections c ON c.id = b.collection_id
            WHERE b.id = $1 AND c.user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(binny)
    }

    pub async fn get_binnies_by_ids(&self, ids: &[i64]) -> Result<Vec<Binny>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let binnies = sqlx::query_as::<_, Binny>(
            r#"
            SELECT id, collection_id, binny_type, name, xp, created_at, updated_at
            FROM binnies
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(binnies)
    }

    pub async fn list_by_collection(&self, collection_id: i64) -> Result<Vec<Binny>> {
        let binnies = sqlx::query_as::<_, Binny>(
            r#"
            SELECT id, collection_id, binny_type, name, xp, created_at, updated_at
            FROM binnies
            WHERE collection_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(collection_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(binnies)
    }

    pub async fn get_user_collection(
        &self,
        user_id: i64,
        collection_id: i64,
    ) -> Result<Option<BinnyCollection>> {
        let collection = sqlx::query_as::<_, BinnyCollection>(
            r#"
            SELECT id, user_id, created_at, updated_at
            FROM binny_collections
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(collection_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(collection)
    }

    pub async fn count_rewards(&self, binny_ids: &[i64]) -> Result<Vec<(i64, i64)>> {
        if binny_ids.is_empty() {
            return Ok(Vec::new());
        }

        let counts = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT binny_id, COUNT(*)
            FROM reward_histories
            WHERE binny_id = ANY($1)
            GROUP BY binny_id
            "#,
        )
        .bind(binny_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }

    // ==================== 写入操作 ====================

    /// 重命名宠物，不属于该用户时返回 None
    pub async fn rename_binny(&self, user_id: i64, id: i64, name: &str) -> Result<Option<Binny>> {
        let binny = sqlx::query_as::<_, Binny>(
            r#"
            UPDATE binnies b
            SET name = $3, updated_at = NOW()
            FROM binny_collections c
            WHERE b.id = $1 AND c.id = b.collection_id AND c.user_id = $2
            RETURNING b.id, b.collection_id, b.binny_type, b.name, b.xp, b.created_at, b.updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(binny)
    }
}

#[async_trait]
impl BinnyRepositoryTrait for BinnyRepository {
    async fn get_user_binny(&self, user_id: i64, id: i64) -> Result<Option<Binny>> {
        self.get_user_binny(user_id, id).await
    }

    async fn get_binnies_by_ids(&self, ids: &[i64]) -> Result<Vec<Binny>> {
        self.get_binnies_by_ids(ids).await
    }

    async fn list_by_collection(&self, collection_id: i64) -> Result<Vec<Binny>> {
        self.list_by_collection(collection_id).await
    }

    async fn get_user_collection(
        &self,
        user_id: i64,
        collection_id: i64,
    ) -> Result<Option<BinnyCollection>> {
        self.get_user_collection(user_id, collection_id).await
    }

    async fn rename_binny(&self, user_id: i64, id: i64, name: &str) -> Result<Option<Binny>> {
        self.rename_binny(user_id, id, name).await
    }

    async fn count_rewards(&self, binny_ids: &[i64]) -> Result<Vec<(i64, i64)>> {
        self.count_rewards(binny_ids).await
    }
}
