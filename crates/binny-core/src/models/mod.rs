//! 领域模型
//!
//! 包含用户、图鉴、宠物、上传文件、识别结果与奖励记录

pub mod binny;
pub mod enums;
pub mod file;
pub mod reward;
pub mod user;

pub use binny::{Binny, DEFAULT_BINNY_NAME};
pub use enums::{AssetType, BinnyType, WasteStatus};
pub use file::{NewFile, StoredFile};
pub use reward::{DetectionResult, NewDetectionResult, RewardGrant, RewardHistory};
pub use user::{BinnyCollection, BinnyUser};
