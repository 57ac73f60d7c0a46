//! 回收奖励服务
//!
//! ## 奖励流程
//!
//! 1. 保存上传文件，创建一条无结果的奖励记录
//! 2. 调用识别服务（失败按"未识别"处理）
//! 3. 未识别出物体：直接返回奖励记录
//! 4. 只取第一个识别物体，构造识别结果
//! 5. 不干净：事务内写入识别结果，不发放经验
//! 6. 干净：事务内写入识别结果并查找或创建同类型宠物，
//!    新宠物经验为 0，已有宠物经验 + [`REWARD_XP`]

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use binny_shared::observability::metrics;

use crate::ai::{DetectedObject, DetectionResponse, ImageDetector, ImagePayload};
use crate::error::{BinnyError, Result};
use crate::models::{BinnyUser, NewDetectionResult, NewFile, RewardHistory};
use crate::repository::{FileRepositoryTrait, RewardRepositoryTrait, UserRepositoryTrait};

/// 每次识别到已有宠物类型的干净垃圾获得的经验
pub const REWARD_XP: i64 = 500;

/// 回收奖励服务
pub struct RewardService<UR, FR, RR, D: ?Sized = dyn ImageDetector>
where
    UR: UserRepositoryTrait,
    FR: FileRepositoryTrait,
    RR: RewardRepositoryTrait,
    D: ImageDetector,
{
    user_repo: Arc<UR>,
    file_repo: Arc<FR>,
    reward_repo: Arc<RR>,
    detector: Arc<D>,
}

impl<UR, FR, RR, D> RewardService<UR, FR, RR, D>
where
    UR: UserRepositoryTrait,
    FR: FileRepositoryTrait,
    RR: RewardRepositoryTrait,
    D: ImageDetector + ?Sized,
{
    pub fn new(
        user_repo: Arc<UR>,
        file_repo: Arc<FR>,
        reward_repo: Arc<RR>,
        detector: Arc<D>,
    ) -> Self {
        Self {
            user_repo,
            file_repo,
            reward_repo,
            detector,
        }
    }

    /// 处理一次上传，返回（可能已补充结果的）奖励记录
    #[instrument(skip(self, upload), fields(user_id = user.id, file_name = %upload.name))]
    pub async fn request_reward(
        &self,
        user: &BinnyUser,
        upload: ImagePayload,
    ) -> Result<RewardHistory> {
        let started = Instant::now();
        let (outcome, history) = self.process(user, upload).await?;

        metrics::record_reward_request(outcome, started.elapsed().as_secs_f64());
        Ok(history)
    }

    async fn process(
        &self,
        user: &BinnyUser,
        upload: ImagePayload,
    ) -> Result<(&'static str, RewardHistory)> {
        let file = NewFile::new(
            user.id,
            upload.name.clone(),
            upload.content_type.clone(),
            upload.bytes.clone(),
        );
        let file = self.file_repo.create_file(&file).await?;
        let history = self.reward_repo.create_history(user.id, file.uuid).await?;

        let response = self.detector.detect(&upload).await;
        let Some(object) = first_object(&response) else {
            info!(history_id = history.id, "未识别出可回收物");
            return Ok(("no_detection", history));
        };

        let detection = NewDetectionResult::from(&object);
        if !detection.is_clean {
            let history = self
                .reward_repo
                .record_detection(history.id, &detection)
                .await?;
            info!(
                history_id = history.id,
                binny_type = %detection.binny_type,
                "识别为不干净的垃圾，不发放经验"
            );
            return Ok(("dirty", history));
        }

        let collection = self
            .user_repo
            .get_collection_by_user(user.id)
            .await?
            .ok_or(BinnyError::UserCollectionMissing(user.id))?;

        let grant = self
            .reward_repo
            .grant_reward(history.id, collection.id, &detection, REWARD_XP)
            .await?;

        info!(
            history_id = grant.history.id,
            binny_id = grant.binny.id,
            binny_type = %grant.binny.binny_type,
            created = grant.created,
            xp = grant.binny.xp,
            "经验发放完成"
        );

        if grant.created {
            metrics::record_binny_created(grant.binny.binny_type.as_str());
            Ok(("created", grant.history))
        } else {
            Ok(("rewarded", grant.history))
        }
    }
}

/// 只取第一个识别物体，其余丢弃且不解析
///
/// 第一个物体无法解析（未知类型或状态）时按未识别处理
fn first_object(response: &DetectionResponse) -> Option<DetectedObject> {
    if !response.success {
        return None;
    }

    let discarded = response.objects.len().saturating_sub(1);
    if discarded > 0 {
        debug!(discarded, "识别出多个物体，仅使用第一个");
    }

    match response.first_object()? {
        Ok(object) => Some(object),
        Err(e) => {
            warn!(error = %e, "识别结果无法解析，按未识别处理");
            metrics::record_detection_failure("decode");
            None
        }
    }
}
