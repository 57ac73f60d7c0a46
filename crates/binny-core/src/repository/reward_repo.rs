//! 奖励记录仓储
//!
//! 识别结果写入、宠物查找或创建、经验累加在同一个事务内完成

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::traits::RewardRepositoryTrait;
use crate::error::{BinnyError, Result};
use crate::models::{
    Binny, BinnyType, DEFAULT_BINNY_NAME, DetectionResult, NewDetectionResult, RewardGrant,
    RewardHistory,
};

const HISTORY_COLUMNS: &str = "id, user_id, file_id, detection_result_id, binny_id, \
     is_binny_created, earned_xp, resulting_xp, created_at, updated_at";

/// upsert 返回的宠物，`inserted` 表示是否为本次插入
#[derive(sqlx::FromRow)]
struct UpsertedBinny {
    #[sqlx(flatten)]
    binny: Binny,
    inserted: bool,
}

/// 奖励记录上待写入的结果
struct HistoryOutcome {
    detection_result_id: i64,
    binny_id: Option<i64>,
    is_binny_created: Option<bool>,
    earned_xp: Option<i64>,
    resulting_xp: Option<i64>,
}

pub struct RewardRepository {
    pool: PgPool,
}

impl RewardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== 查询操作 ====================

    pub async fn get_user_history(&self, user_id: i64, id: i64) -> Result<Option<RewardHistory>> {
        let sql = format!(
            r#"
            SELECT {HISTORY_COLUMNS}
            FROM reward_histories
            WHERE id = $1 AND user_id = $2
            "#
        );
        let history = sqlx::query_as::<_, RewardHistory>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(history)
    }

    /// 按创建时间倒序分页
    pub async fn list_user_histories(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RewardHistory>> {
        let sql = format!(
            "SELECT {HISTORY_COLUMNS} FROM reward_histories \
             WHERE user_id = $1 ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
        );
        let histories = sqlx::query_as::<_, RewardHistory>(&sql)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(histories)
    }

    pub async fn count_user_histories(&self, user_id: i64) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM reward_histories WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }

    pub async fn get_detection_results_by_ids(&self, ids: &[i64]) -> Result<Vec<DetectionResult>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, DetectionResult>(
            r#"
            SELECT id, is_clean, confidence, binny_type, how_to_recycle, created_at
            FROM detection_results
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(results)
    }

    // ==================== 写入操作 ====================

    pub async fn create_history(&self, user_id: i64, file_id: Uuid) -> Result<RewardHistory> {
        let sql = format!(
            r#"
            INSERT INTO reward_histories (user_id, file_id)
            VALUES ($1, $2)
            RETURNING {HISTORY_COLUMNS}
            "#
        );
        let history = sqlx::query_as::<_, RewardHistory>(&sql)
            .bind(user_id)
            .bind(file_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(history)
    }

    /// 非干净垃圾：只记录识别结果
    pub async fn record_detection(
        &self,
        history_id: i64,
        detection: &NewDetectionResult,
    ) -> Result<RewardHistory> {
        let mut tx = self.pool.begin().await?;

        let detection_id = Self::insert_detection_in_tx(&mut tx, detection).await?;
        let history = Self::apply_outcome_in_tx(
            &mut tx,
            history_id,
            &HistoryOutcome {
                detection_result_id: detection_id,
                binny_id: None,
                is_binny_created: None,
                earned_xp: None,
                resulting_xp: None,
            },
        )
        .await?;

        tx.commit().await?;
        Ok(history)
    }

    /// 干净垃圾：记录识别结果并发放经验
    ///
    /// 新宠物以 0 经验创建；已存在则经验增加 `reward_xp`。
    /// 查找或创建与累加由单条 upsert 完成，依赖 (collection_id, binny_type) 唯一约束，
    /// 并发请求不会产生重复宠物，也不会丢失累加。
    pub async fn grant_reward(
        &self,
        history_id: i64,
        collection_id: i64,
        detection: &NewDetectionResult,
        reward_xp: i64,
    ) -> Result<RewardGrant> {
        let mut tx = self.pool.begin().await?;

        let detection_id = Self::insert_detection_in_tx(&mut tx, detection).await?;
        let upserted =
            Self::upsert_binny_in_tx(&mut tx, collection_id, detection.binny_type, reward_xp)
                .await?;

        let created = upserted.inserted;
        let earned_xp = if created { 0 } else { reward_xp };
        let history = Self::apply_outcome_in_tx(
            &mut tx,
            history_id,
            &HistoryOutcome {
                detection_result_id: detection_id,
                binny_id: Some(upserted.binny.id),
                is_binny_created: Some(created),
                earned_xp: Some(earned_xp),
                resulting_xp: Some(upserted.binny.xp),
            },
        )
        .await?;

        tx.commit().await?;

        Ok(RewardGrant {
            history,
            binny: upserted.binny,
            created,
        })
    }

    // ==================== 事务操作 ====================

    async fn insert_detection_in_tx(
        tx: &mut PgConnection,
        detection: &NewDetectionResult,
    ) -> Result<i64> {
        let id: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO detection_results (is_clean, confidence, binny_type, how_to_recycle)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(detection.is_clean)
        .bind(detection.confidence)
        .bind(detection.binny_type)
        .bind(&detection.how_to_recycle)
        .fetch_one(tx)
        .await?;

        Ok(id.0)
    }

    /// `xmax = 0` 仅对本语句新插入的行成立
    async fn upsert_binny_in_tx(
        tx: &mut PgConnection,
        collection_id: i64,
        binny_type: BinnyType,
        reward_xp: i64,
    ) -> Result<UpsertedBinny> {
        let upserted = sqlx::query_as::<_, UpsertedBinny>(
            r#"
            INSERT INTO binnies (collection_id, binny_type, name, xp)
            VALUES ($1, $2, $3, 0)
            ON CONFLICT (collection_id, binny_type)
            DO UPDATE SET xp = binnies.xp + $4, updated_at = NOW()
            RETURNING id, collection_id, binny_type, name, xp, created_at, updated_at,
                      (xmax = 0) AS inserted
            "#,
        )
        .bind(collection_id)
        .bind(binny_type)
        .bind(DEFAULT_BINNY_NAME)
        .bind(reward_xp)
        .fetch_one(tx)
        .await?;

        Ok(upserted)
    }

    /// 奖励记录只允许补充一次结果
    async fn apply_outcome_in_tx(
        tx: &mut PgConnection,
        history_id: i64,
        outcome: &HistoryOutcome,
    ) -> Result<RewardHistory> {
        let sql = format!(
            "UPDATE reward_histories \
             SET detection_result_id = $2, binny_id = $3, is_binny_created = $4, \
                 earned_xp = $5, resulting_xp = $6, updated_at = NOW() \
             WHERE id = $1 AND detection_result_id IS NULL \
             RETURNING {HISTORY_COLUMNS}"
        );
        let history = sqlx::query_as::<_, RewardHistory>(&sql)
            .bind(history_id)
            .bind(outcome.detection_result_id)
            .bind(outcome.binny_id)
            .bind(outcome.is_binny_created)
            .bind(outcome.earned_xp)
            .bind(outcome.resulting_xp)
            .fetch_optional(tx)
            .await?;

        history.ok_or(BinnyError::RewardHistoryNotFound(history_id))
    }
}

#[async_trait]
impl RewardRepositoryTrait for RewardRepository {
    async fn create_history(&self, user_id: i64, file_id: Uuid) -> Result<RewardHistory> {
        self.create_history(user_id, file_id).await
    }

    async fn record_detection(
        &self,
        history_id: i64,
        detection: &NewDetectionResult,
    ) -> Result<RewardHistory> {
        self.record_detection(history_id, detection).await
    }

    async fn grant_reward(
        &self,
        history_id: i64,
        collection_id: i64,
        detection: &NewDetectionResult,
        reward_xp: i64,
    ) -> Result<RewardGrant> {
        self.grant_reward(history_id, collection_id, detection, reward_xp)
            .await
    }

    async fn get_user_history(&self, user_id: i64, id: i64) -> Result<Option<RewardHistory>> {
        self.get_user_history(user_id, id).await
    }

    async fn list_user_histories(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RewardHistory>> {
        self.list_user_histories(user_id, limit, offset).await
    }

    async fn count_user_histories(&self, user_id: i64) -> Result<i64> {
        self.count_user_histories(user_id).await
    }

    async fn get_detection_results_by_ids(&self, ids: &[i64]) -> Result<Vec<DetectionResult>> {
        self.get_detection_results_by_ids(ids).await
    }
}
