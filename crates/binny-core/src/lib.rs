//! Binny 核心业务库
//!
//! 用户上传垃圾照片，外部 AI 服务识别类型与清洁程度，
//! 干净的可回收物为同类型的宠物（Binny）累积经验。
//!
//! ## 模块结构
//!
//! - `models`: 领域模型
//! - `leveling`: 经验值与等级换算
//! - `repository`: PostgreSQL 仓储
//! - `ai`: 外部识别/贴图生成服务客户端
//! - `service`: 奖励流程与查询服务
//! - `error`: 错误类型

pub mod ai;
pub mod error;
pub mod leveling;
pub mod models;
pub mod repository;
pub mod service;

pub use error::{BinnyError, Result};
pub use leveling::level_for_xp;
pub use service::{QueryService, REWARD_XP, RewardService};
