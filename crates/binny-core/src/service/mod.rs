//! 服务层
//!
//! - `reward_service`: 上传、识别、发放经验的完整流程
//! - `query_service`: 宠物、图鉴、奖励记录、文件的只读查询与重命名
//! - `dto`: 返回给 API 层的视图对象

pub mod dto;
pub mod query_service;
pub mod reward_service;

pub use dto::*;
pub use query_service::QueryService;
pub use reward_service::{REWARD_XP, RewardService};
