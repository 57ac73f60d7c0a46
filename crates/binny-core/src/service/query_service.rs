//! 查询服务
//!
//! 宠物、图鉴、奖励记录、上传文件的只读查询，以及宠物重命名。
//! 所有查询都按会话用户过滤，不属于该用户的记录视为不存在。

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{BinnyError, Result};
use crate::models::{Binny, BinnyCollection, BinnyUser, RewardHistory, StoredFile};
use crate::repository::{
    BinnyRepositoryTrait, FileRepositoryTrait, RewardRepositoryTrait, UserRepositoryTrait,
};
use crate::service::dto::{
    BinnyView, CollectionView, HomeView, RewardHistoryPage, RewardHistoryView, UserSummary,
};

/// 首页展示的最近奖励记录条数
pub const RECENT_HISTORY_LIMIT: i64 = 10;

/// 宠物名称最大长度（字符）
pub const MAX_BINNY_NAME_CHARS: usize = 100;

pub struct QueryService<UR, BR, RR, FR>
where
    UR: UserRepositoryTrait,
    BR: BinnyRepositoryTrait,
    RR: RewardRepositoryTrait,
    FR: FileRepositoryTrait,
{
    user_repo: Arc<UR>,
    binny_repo: Arc<BR>,
    reward_repo: Arc<RR>,
    file_repo: Arc<FR>,
}

impl<UR, BR, RR, FR> QueryService<UR, BR, RR, FR>
where
    UR: UserRepositoryTrait,
    BR: BinnyRepositoryTrait,
    RR: RewardRepositoryTrait,
    FR: FileRepositoryTrait,
{
    pub fn new(
        user_repo: Arc<UR>,
        binny_repo: Arc<BR>,
        reward_repo: Arc<RR>,
        file_repo: Arc<FR>,
    ) -> Self {
        Self {
            user_repo,
            binny_repo,
            reward_repo,
            file_repo,
        }
    }

    // ==================== 宠物 ====================

    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn binny(&self, user: &BinnyUser, id: i64) -> Result<BinnyView> {
        let binny = self
            .binny_repo
            .get_user_binny(user.id, id)
            .await?
            .ok_or(BinnyError::BinnyNotFound(id))?;

        let mut views = self.binny_views(vec![binny]).await?;
        views.pop().ok_or(BinnyError::BinnyNotFound(id))
    }

    /// 重命名宠物，名称去除首尾空白后长度须在 1..=100 之间
    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn rename_binny(&self, user: &BinnyUser, id: i64, name: &str) -> Result<BinnyView> {
        let name = normalize_binny_name(name)?;

        let binny = self
            .binny_repo
            .rename_binny(user.id, id, &name)
            .await?
            .ok_or(BinnyError::BinnyNotFound(id))?;

        info!(binny_id = binny.id, name = %binny.name, "宠物已重命名");

        let mut views = self.binny_views(vec![binny]).await?;
        views.pop().ok_or(BinnyError::BinnyNotFound(id))
    }

    // ==================== 图鉴 ====================

    pub async fn collection(&self, user: &BinnyUser, collection_id: i64) -> Result<CollectionView> {
        let collection = self
            .binny_repo
            .get_user_collection(user.id, collection_id)
            .await?
            .ok_or(BinnyError::CollectionNotFound(collection_id))?;

        self.collection_view(collection).await
    }

    /// 会话用户自己的图鉴
    pub async fn user_collection(&self, user: &BinnyUser) -> Result<CollectionView> {
        let collection = self.require_collection(user).await?;
        self.collection_view(collection).await
    }

    // ==================== 奖励记录 ====================

    pub async fn reward_history(&self, user: &BinnyUser, id: i64) -> Result<RewardHistoryView> {
        let history = self
            .reward_repo
            .get_user_history(user.id, id)
            .await?
            .ok_or(BinnyError::RewardHistoryNotFound(id))?;

        self.history_view(user, history).await
    }

    /// 分页列出奖励记录，页码从 1 开始
    pub async fn list_reward_histories(
        &self,
        user: &BinnyUser,
        page: i64,
        page_size: i64,
    ) -> Result<RewardHistoryPage> {
        let offset = (page.max(1) - 1)
            .checked_mul(page_size)
            .ok_or_else(|| BinnyError::Validation(format!("页码超出范围: {page}")))?;
        let histories = self
            .reward_repo
            .list_user_histories(user.id, page_size, offset)
            .await?;
        let total = self.reward_repo.count_user_histories(user.id).await?;

        Ok(RewardHistoryPage {
            items: self.history_views(user, histories).await?,
            total,
        })
    }

    /// 单条奖励记录转视图
    pub async fn history_view(
        &self,
        user: &BinnyUser,
        history: RewardHistory,
    ) -> Result<RewardHistoryView> {
        let id = history.id;
        let mut views = self.history_views(user, vec![history]).await?;
        views.pop().ok_or(BinnyError::RewardHistoryNotFound(id))
    }

    /// 批量转视图，识别结果与宠物各只查询一次
    pub async fn history_views(
        &self,
        user: &BinnyUser,
        histories: Vec<RewardHistory>,
    ) -> Result<Vec<RewardHistoryView>> {
        let detection_ids: Vec<i64> = histories
            .iter()
            .filter_map(|h| h.detection_result_id)
            .collect();
        let mut binny_ids: Vec<i64> = histories.iter().filter_map(|h| h.binny_id).collect();
        binny_ids.sort_unstable();
        binny_ids.dedup();

        let detections: HashMap<i64, _> = self
            .reward_repo
            .get_detection_results_by_ids(&detection_ids)
            .await?
            .into_iter()
            .map(|d| (d.id, d))
            .collect();

        let binnies = self.binny_repo.get_binnies_by_ids(&binny_ids).await?;
        let binnies: HashMap<i64, BinnyView> = self
            .binny_views(binnies)
            .await?
            .into_iter()
            .map(|b| (b.id, b))
            .collect();

        let summary = UserSummary::from(user);
        let views = histories
            .into_iter()
            .map(|history| {
                let detection = history
                    .detection_result_id
                    .and_then(|id| detections.get(&id).cloned());
                let binny = history.binny_id.and_then(|id| binnies.get(&id).cloned());
                RewardHistoryView::new(history, summary.clone(), detection, binny)
            })
            .collect();

        Ok(views)
    }

    // ==================== 文件 ====================

    pub async fn file(&self, user: &BinnyUser, uuid: Uuid) -> Result<StoredFile> {
        self.file_repo
            .get_user_file(user.id, uuid)
            .await?
            .ok_or(BinnyError::FileNotFound(uuid))
    }

    // ==================== 首页 ====================

    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn home(&self, user: &BinnyUser) -> Result<HomeView> {
        let collection = self.require_collection(user).await?;
        let recent = self
            .reward_repo
            .list_user_histories(user.id, RECENT_HISTORY_LIMIT, 0)
            .await?;

        Ok(HomeView {
            user: UserSummary::from(user),
            collection_id: collection.id,
            recent_reward_histories: self.history_views(user, recent).await?,
        })
    }

    // ==================== 内部方法 ====================

    async fn require_collection(&self, user: &BinnyUser) -> Result<BinnyCollection> {
        self.user_repo
            .get_collection_by_user(user.id)
            .await?
            .ok_or(BinnyError::UserCollectionMissing(user.id))
    }

    async fn collection_view(&self, collection: BinnyCollection) -> Result<CollectionView> {
        let binnies = self.binny_repo.list_by_collection(collection.id).await?;
        Ok(CollectionView {
            id: collection.id,
            binny_list: self.binny_views(binnies).await?,
        })
    }

    /// 补充奖励次数，保持输入顺序
    async fn binny_views(&self, binnies: Vec<Binny>) -> Result<Vec<BinnyView>> {
        let ids: Vec<i64> = binnies.iter().map(|b| b.id).collect();
        let counts: HashMap<i64, i64> = self
            .binny_repo
            .count_rewards(&ids)
            .await?
            .into_iter()
            .collect();

        Ok(binnies
            .into_iter()
            .map(|binny| {
                let count = counts.get(&binny.id).copied().unwrap_or(0);
                BinnyView::new(binny, count)
            })
            .collect())
    }
}

/// 去除首尾空白并校验长度
pub fn normalize_binny_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(BinnyError::Validation("宠物名称不能为空".to_string()));
    }
    if trimmed.chars().count() > MAX_BINNY_NAME_CHARS {
        return Err(BinnyError::Validation(format!(
            "宠物名称不能超过 {MAX_BINNY_NAME_CHARS} 个字符"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BinnyType, DetectionResult};
    use crate::repository::{
        MockBinnyRepositoryTrait, MockFileRepositoryTrait, MockRewardRepositoryTrait,
        MockUserRepositoryTrait,
    };
    use chrono::Utc;

    type TestService = QueryService<
        MockUserRepositoryTrait,
        MockBinnyRepositoryTrait,
        MockRewardRepositoryTrait,
        MockFileRepositoryTrait,
    >;

    fn test_user() -> BinnyUser {
        BinnyUser {
            id: 1,
            username: "binny".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn binny(id: i64, xp: i64) -> Binny {
        Binny {
            id,
            collection_id: 5,
            binny_type: BinnyType::Cup,
            name: "Cuppy".to_string(),
            xp,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn history(id: i64, detection: Option<i64>, binny: Option<i64>) -> RewardHistory {
        RewardHistory {
            id,
            user_id: 1,
            file_id: Uuid::new_v4(),
            detection_result_id: detection,
            binny_id: binny,
            is_binny_created: binny.map(|_| false),
            earned_xp: binny.map(|_| 500),
            resulting_xp: binny.map(|_| 1000),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(
        user_repo: MockUserRepositoryTrait,
        binny_repo: MockBinnyRepositoryTrait,
        reward_repo: MockRewardRepositoryTrait,
    ) -> TestService {
        QueryService::new(
            Arc::new(user_repo),
            Arc::new(binny_repo),
            Arc::new(reward_repo),
            Arc::new(MockFileRepositoryTrait::new()),
        )
    }

    #[test]
    fn test_normalize_binny_name() {
        assert_eq!(normalize_binny_name("  Cuppy ").unwrap(), "Cuppy");
        assert!(matches!(
            normalize_binny_name("   "),
            Err(BinnyError::Validation(_))
        ));
        assert!(normalize_binny_name(&"a".repeat(100)).is_ok());
        assert!(normalize_binny_name(&"a".repeat(101)).is_err());
        // 按字符计数而非字节
        assert!(normalize_binny_name(&"瓶".repeat(100)).is_ok());
    }

    #[tokio::test]
    async fn test_binny_includes_level_and_reward_count() {
        let mut binny_repo = MockBinnyRepositoryTrait::new();
        binny_repo
            .expect_get_user_binny()
            .returning(|_, id| Ok(Some(binny(id, 1500))));
        binny_repo
            .expect_count_rewards()
            .returning(|ids| Ok(vec![(ids[0], 4)]));

        let service = service(
            MockUserRepositoryTrait::new(),
            binny_repo,
            MockRewardRepositoryTrait::new(),
        );

        let view = service.binny(&test_user(), 9).await.unwrap();
        assert_eq!(view.id, 9);
        assert_eq!(view.level, 5);
        assert_eq!(view.reward_count, 4);
    }

    #[tokio::test]
    async fn test_binny_of_other_user_is_not_found() {
        let mut binny_repo = MockBinnyRepositoryTrait::new();
        binny_repo.expect_get_user_binny().returning(|_, _| Ok(None));

        let service = service(
            MockUserRepositoryTrait::new(),
            binny_repo,
            MockRewardRepositoryTrait::new(),
        );

        let result = service.binny(&test_user(), 9).await;
        assert!(matches!(result, Err(BinnyError::BinnyNotFound(9))));
    }

    #[tokio::test]
    async fn test_rename_rejects_blank_name_without_touching_repo() {
        let mut binny_repo = MockBinnyRepositoryTrait::new();
        binny_repo.expect_rename_binny().never();

        let service = service(
            MockUserRepositoryTrait::new(),
            binny_repo,
            MockRewardRepositoryTrait::new(),
        );

        let result = service.rename_binny(&test_user(), 1, " \t ").await;
        assert!(matches!(result, Err(BinnyError::Validation(_))));
    }

    #[tokio::test]
    async fn test_rename_trims_name() {
        let mut binny_repo = MockBinnyRepositoryTrait::new();
        binny_repo
            .expect_rename_binny()
            .withf(|user_id, id, name| *user_id == 1 && *id == 2 && &name[..] == "Bottly")
            .returning(|_, id, name| {
                Ok(Some(Binny {
                    name: name.to_string(),
                    ..binny(id, 0)
                }))
            });
        binny_repo.expect_count_rewards().returning(|_| Ok(vec![]));

        let service = service(
            MockUserRepositoryTrait::new(),
            binny_repo,
            MockRewardRepositoryTrait::new(),
        );

        let view = service.rename_binny(&test_user(), 2, "  Bottly  ").await.unwrap();
        assert_eq!(view.name, "Bottly");
        assert_eq!(view.reward_count, 0);
    }

    #[tokio::test]
    async fn test_rename_accepts_padded_max_length_name() {
        let mut binny_repo = MockBinnyRepositoryTrait::new();
        binny_repo
            .expect_rename_binny()
            .withf(|_, _, name| name.chars().count() == MAX_BINNY_NAME_CHARS)
            .times(1)
            .returning(|_, id, name| {
                Ok(Some(Binny {
                    name: name.to_string(),
                    ..binny(id, 0)
                }))
            });
        binny_repo.expect_count_rewards().returning(|_| Ok(vec![]));

        let service = service(
            MockUserRepositoryTrait::new(),
            binny_repo,
            MockRewardRepositoryTrait::new(),
        );

        let name = format!("   {}   ", "b".repeat(MAX_BINNY_NAME_CHARS));
        let view = service.rename_binny(&test_user(), 2, &name).await.unwrap();
        assert_eq!(view.name.chars().count(), MAX_BINNY_NAME_CHARS);
    }

    #[tokio::test]
    async fn test_history_views_join_detection_and_binny() {
        let mut reward_repo = MockRewardRepositoryTrait::new();
        reward_repo
            .expect_get_detection_results_by_ids()
            .returning(|ids| {
                Ok(ids
                    .iter()
                    .map(|&id| DetectionResult {
                        id,
                        is_clean: true,
                        confidence: id as f64 / 100.0,
                        binny_type: BinnyType::Cup,
                        how_to_recycle: None,
                        created_at: Utc::now(),
                    })
                    .collect())
            });
        let mut binny_repo = MockBinnyRepositoryTrait::new();
        binny_repo
            .expect_get_binnies_by_ids()
            .withf(|ids| ids.len() == 1 && ids[0] == 21)
            .returning(|ids| Ok(ids.iter().map(|&id| binny(id, 1000)).collect()));
        binny_repo
            .expect_count_rewards()
            .returning(|_| Ok(vec![(21, 2)]));

        let service = service(MockUserRepositoryTrait::new(), binny_repo, reward_repo);

        let histories = vec![
            history(3, Some(12), Some(21)),
            history(2, Some(11), Some(21)),
            history(1, None, None),
        ];
        let views = service.history_views(&test_user(), histories).await.unwrap();

        assert_eq!(views.len(), 3);
        assert_eq!(views[0].id, 3);
        assert_eq!(
            views[0].detection_result.as_ref().map(|d| d.confidence),
            Some(0.12)
        );
        assert_eq!(views[0].binny.as_ref().map(|b| b.reward_count), Some(2));
        assert_eq!(views[0].is_level_up, Some(true));
        assert_eq!(views[2].detection_result, None);
        assert_eq!(views[2].binny, None);
        assert_eq!(views[2].is_level_up, None);
        assert_eq!(views[2].user.username, "binny");
    }

    #[tokio::test]
    async fn test_home_lists_recent_histories() {
        let mut user_repo = MockUserRepositoryTrait::new();
        user_repo.expect_get_collection_by_user().returning(|user_id| {
            Ok(Some(BinnyCollection {
                id: 5,
                user_id,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }))
        });
        let mut reward_repo = MockRewardRepositoryTrait::new();
        reward_repo
            .expect_list_user_histories()
            .withf(|user_id, limit, offset| {
                *user_id == 1 && *limit == RECENT_HISTORY_LIMIT && *offset == 0
            })
            .returning(|_, _, _| Ok(vec![history(1, None, None)]));
        reward_repo
            .expect_get_detection_results_by_ids()
            .returning(|_| Ok(vec![]));
        let mut binny_repo = MockBinnyRepositoryTrait::new();
        binny_repo
            .expect_get_binnies_by_ids()
            .returning(|_| Ok(vec![]));
        binny_repo.expect_count_rewards().returning(|_| Ok(vec![]));

        let service = service(user_repo, binny_repo, reward_repo);

        let home = service.home(&test_user()).await.unwrap();
        assert_eq!(home.collection_id, 5);
        assert_eq!(home.user.id, 1);
        assert_eq!(home.recent_reward_histories.len(), 1);
    }

    #[tokio::test]
    async fn test_list_reward_histories_offsets_by_page() {
        let mut reward_repo = MockRewardRepositoryTrait::new();
        reward_repo
            .expect_list_user_histories()
            .withf(|_, limit, offset| *limit == 20 && *offset == 40)
            .returning(|_, _, _| Ok(vec![]));
        reward_repo
            .expect_count_user_histories()
            .returning(|_| Ok(45));
        reward_repo
            .expect_get_detection_results_by_ids()
            .returning(|_| Ok(vec![]));
        let mut binny_repo = MockBinnyRepositoryTrait::new();
        binny_repo
            .expect_get_binnies_by_ids()
            .returning(|_| Ok(vec![]));
        binny_repo.expect_count_rewards().returning(|_| Ok(vec![]));

        let service = service(MockUserRepositoryTrait::new(), binny_repo, reward_repo);

        let page = service
            .list_reward_histories(&test_user(), 3, 20)
            .await
            .unwrap();
        assert_eq!(page.total, 45);
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_list_reward_histories_rejects_overflowing_page() {
        let mut reward_repo = MockRewardRepositoryTrait::new();
        reward_repo.expect_list_user_histories().never();
        reward_repo.expect_count_user_histories().never();

        let service = service(
            MockUserRepositoryTrait::new(),
            MockBinnyRepositoryTrait::new(),
            reward_repo,
        );

        let result = service.list_reward_histories(&test_user(), i64::MAX, 100).await;
        assert!(matches!(result, Err(BinnyError::Validation(_))));
    }
}
