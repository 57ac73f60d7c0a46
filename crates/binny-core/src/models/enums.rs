//! 枚举类型定义
//!
//! 宠物类型同时支持数据库（sqlx）和 JSON（serde）序列化，
//! 其余枚举只出现在与 AI 服务的交互中。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 宠物类型
///
/// 与识别服务返回的垃圾类别一一对应，每种垃圾孵化一种宠物
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
pub enum BinnyType {
    /// 外卖杯
    Cup,
    /// 塑料瓶
    Bottle,
    /// 外卖餐盒
    Container,
}

impl BinnyType {
    pub const ALL: [BinnyType; 3] = [Self::Cup, Self::Bottle, Self::Container];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cup => "cup",
            Self::Bottle => "bottle",
            Self::Container => "container",
        }
    }
}

impl fmt::Display for BinnyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BinnyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cup" => Ok(Self::Cup),
            "bottle" => Ok(Self::Bottle),
            "container" => Ok(Self::Container),
            other => Err(format!("未知的宠物类型: {other}")),
        }
    }
}

/// 垃圾清洁状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WasteStatus {
    /// 干净，可直接回收
    Clean,
    /// 脏污，需要处理后才能回收
    Dirty,
}

impl WasteStatus {
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Clean)
    }
}

/// 生成素材类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    /// 宠物贴图
    Texture,
    /// 宠物配饰
    Accessory,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Texture => "texture",
            Self::Accessory => "accessory",
        }
    }
}
