//! 数据库仓储层
//!
//! 仓储只负责数据持久化，不包含业务逻辑；
//! 需要原子性的写入（识别结果 + 宠物经验）在仓储内部以事务完成。

mod binny_repo;
mod file_repo;
mod reward_repo;
mod traits;
mod user_repo;

pub use binny_repo::BinnyRepository;
pub use file_repo::FileRepository;
pub use reward_repo::RewardRepository;
pub use traits::*;
pub use user_repo::UserRepository;
