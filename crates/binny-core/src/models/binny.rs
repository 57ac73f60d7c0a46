//! 宠物实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::BinnyType;
use crate::leveling::level_for_xp;

/// 新宠物的默认名称
pub const DEFAULT_BINNY_NAME: &str = "Binny";

/// 宠物
///
/// 属于某个图鉴，同一图鉴内每种类型最多一只；经验值只增不减
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Binny {
    pub id: i64,
    pub collection_id: i64,
    pub binny_type: BinnyType,
    pub name: String,
    pub xp: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Binny {
    /// 当前等级
    pub fn level(&self) -> u32 {
        level_for_xp(self.xp)
    }
}
