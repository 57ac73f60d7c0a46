//! 识别结果与奖励记录实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::binny::Binny;
use super::enums::BinnyType;
use crate::ai::DetectedObject;
use crate::leveling;

/// 识别结果，每次成功识别创建一条，之后不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DetectionResult {
    pub id: i64,
    pub is_clean: bool,
    pub confidence: f64,
    pub binny_type: BinnyType,
    #[sqlx(default)]
    pub how_to_recycle: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 待写入的识别结果
#[derive(Debug, Clone, PartialEq)]
pub struct NewDetectionResult {
    pub is_clean: bool,
    pub confidence: f64,
    pub binny_type: BinnyType,
    pub how_to_recycle: Option<String>,
}

impl From<&DetectedObject> for NewDetectionResult {
    fn from(object: &DetectedObject) -> Self {
        Self {
            is_clean: object.status.is_clean(),
            confidence: object.confidence,
            binny_type: object.label,
            how_to_recycle: object.how_to_recycle.clone(),
        }
    }
}

/// 奖励记录
///
/// 一次"上传-识别-奖励"尝试的审计记录。创建时没有任何结果，
/// 之后最多在一个事务内补充一次识别结果和宠物变化。
/// `earned_xp` 非空当且仅当存在识别结果且结果为干净。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RewardHistory {
    pub id: i64,
    pub user_id: i64,
    pub file_id: Uuid,
    #[sqlx(default)]
    pub detection_result_id: Option<i64>,
    #[sqlx(default)]
    pub binny_id: Option<i64>,
    #[sqlx(default)]
    pub is_binny_created: Option<bool>,
    #[sqlx(default)]
    pub earned_xp: Option<i64>,
    /// 本次奖励后宠物的经验值，用于判断是否升级
    #[sqlx(default)]
    pub resulting_xp: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RewardHistory {
    /// 是否已经记录了识别结果
    pub fn has_detection(&self) -> bool {
        self.detection_result_id.is_some()
    }

    /// 本次奖励是否让宠物升级；没有关联宠物时为 None
    pub fn is_level_up(&self) -> Option<bool> {
        self.binny_id?;
        let earned = self.earned_xp.unwrap_or(0);
        let resulting = self.resulting_xp.unwrap_or(0);
        Some(leveling::is_level_up(resulting, earned))
    }
}

/// 干净垃圾奖励的事务结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardGrant {
    pub history: RewardHistory,
    pub binny: Binny,
    /// 宠物是否为本次新建
    pub created: bool,
}
