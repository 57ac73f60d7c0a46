//! 服务层视图对象
//!
//! 由领域模型聚合而来，字段即 API 返回的 JSON 结构

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Binny, BinnyType, BinnyUser, DetectionResult, RewardHistory};

/// 用户摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
}

impl From<&BinnyUser> for UserSummary {
    fn from(user: &BinnyUser) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

/// 宠物视图
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinnyView {
    pub id: i64,
    pub binny_type: BinnyType,
    pub name: String,
    pub xp: i64,
    pub level: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// 关联的奖励记录数
    pub reward_count: i64,
}

impl BinnyView {
    pub fn new(binny: Binny, reward_count: i64) -> Self {
        Self {
            level: binny.level(),
            id: binny.id,
            binny_type: binny.binny_type,
            name: binny.name,
            xp: binny.xp,
            created_at: binny.created_at,
            updated_at: binny.updated_at,
            reward_count,
        }
    }
}

/// 识别结果视图，不含主键和时间戳
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionResultView {
    pub is_clean: bool,
    pub confidence: f64,
    pub binny_type: BinnyType,
    pub how_to_recycle: Option<String>,
}

impl From<DetectionResult> for DetectionResultView {
    fn from(result: DetectionResult) -> Self {
        Self {
            is_clean: result.is_clean,
            confidence: result.confidence,
            binny_type: result.binny_type,
            how_to_recycle: result.how_to_recycle,
        }
    }
}

/// 奖励记录视图
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardHistoryView {
    pub id: i64,
    pub user: UserSummary,
    pub file_id: Uuid,
    pub detection_result: Option<DetectionResultView>,
    pub binny: Option<BinnyView>,
    pub is_binny_created: Option<bool>,
    pub earned_xp: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_level_up: Option<bool>,
}

impl RewardHistoryView {
    pub fn new(
        history: RewardHistory,
        user: UserSummary,
        detection_result: Option<DetectionResult>,
        binny: Option<BinnyView>,
    ) -> Self {
        Self {
            is_level_up: history.is_level_up(),
            id: history.id,
            user,
            file_id: history.file_id,
            detection_result: detection_result.map(DetectionResultView::from),
            binny,
            is_binny_created: history.is_binny_created,
            earned_xp: history.earned_xp,
            created_at: history.created_at,
            updated_at: history.updated_at,
        }
    }
}

/// 图鉴视图
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionView {
    pub id: i64,
    pub binny_list: Vec<BinnyView>,
}

/// 首页视图
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeView {
    pub user: UserSummary,
    pub collection_id: i64,
    pub recent_reward_histories: Vec<RewardHistoryView>,
}

/// 奖励记录分页
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardHistoryPage {
    pub items: Vec<RewardHistoryView>,
    pub total: i64,
}
