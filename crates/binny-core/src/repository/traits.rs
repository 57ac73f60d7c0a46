//! 仓储 Trait 定义
//!
//! 服务层依赖这些接口而非具体实现，便于 mock 测试

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    Binny, BinnyCollection, BinnyUser, DetectionResult, NewDetectionResult, NewFile,
    RewardGrant, RewardHistory, StoredFile,
};

/// 用户与图鉴仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// 按用户名获取用户，不存在则创建
    async fn ensure_user(&self, username: &str) -> Result<BinnyUser>;

    async fn get_collection_by_user(&self, user_id: i64) -> Result<Option<BinnyCollection>>;
    /// 获取用户的图鉴，不存在则创建
    async fn ensure_collection(&self, user_id: i64) -> Result<BinnyCollection>;
}

/// 上传文件仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileRepositoryTrait: Send + Sync {
    async fn create_file(&self, file: &NewFile) -> Result<StoredFile>;
    async fn get_user_file(&self, user_id: i64, uuid: Uuid) -> Result<Option<StoredFile>>;
}

/// 宠物仓储接口
///
/// 查询均按所属用户过滤
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BinnyRepositoryTrait: Send + Sync {
    async fn get_user_binny(&self, user_id: i64, id: i64) -> Result<Option<Binny>>;
    async fn get_binnies_by_ids(&self, ids: &[i64]) -> Result<Vec<Binny>>;
    async fn list_by_collection(&self, collection_id: i64) -> Result<Vec<Binny>>;
    async fn get_user_collection(
        &self,
        user_id: i64,
        collection_id: i64,
    ) -> Result<Option<BinnyCollection>>;
    async fn rename_binny(&self, user_id: i64, id: i64, name: &str) -> Result<Option<Binny>>;
    /// 统计每只宠物关联的奖励记录数，返回 (binny_id, count)，没有记录的宠物不出现
    async fn count_rewards(&self, binny_ids: &[i64]) -> Result<Vec<(i64, i64)>>;
}

/// 奖励记录仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RewardRepositoryTrait: Send + Sync {
    /// 创建一条尚无结果的奖励记录
    async fn create_history(&self, user_id: i64, file_id: Uuid) -> Result<RewardHistory>;

    /// 事务内写入识别结果并挂到奖励记录上（不发放经验）
    async fn record_detection(
        &self,
        history_id: i64,
        detection: &NewDetectionResult,
    ) -> Result<RewardHistory>;

    /// 事务内写入识别结果，查找或创建对应类型的宠物并发放经验
    async fn grant_reward(
        &self,
        history_id: i64,
        collection_id: i64,
        detection: &NewDetectionResult,
        reward_xp: i64,
    ) -> Result<RewardGrant>;

    async fn get_user_history(&self, user_id: i64, id: i64) -> Result<Option<RewardHistory>>;
    async fn list_user_histories(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RewardHistory>>;
    async fn count_user_histories(&self, user_id: i64) -> Result<i64>;
    async fn get_detection_results_by_ids(&self, ids: &[i64]) -> Result<Vec<DetectionResult>>;
}
