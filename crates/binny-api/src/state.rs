//! 应用状态定义

use std::sync::Arc;

use binny_core::ai::{ImageDetector, TextureGenerator};
use binny_core::models::BinnyUser;
use binny_core::repository::{BinnyRepository, FileRepository, RewardRepository, UserRepository};
use binny_core::service::{QueryService, RewardService};
use sqlx::PgPool;

pub type AppRewardService = RewardService<UserRepository, FileRepository, RewardRepository>;
pub type AppQueryService =
    QueryService<UserRepository, BinnyRepository, RewardRepository, FileRepository>;

/// Axum 应用共享状态
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// 启动时确认存在的会话用户
    pub session_user: Arc<BinnyUser>,
    pub reward_service: Arc<AppRewardService>,
    pub query_service: Arc<AppQueryService>,
    pub detector: Arc<dyn ImageDetector>,
    pub generator: Arc<dyn TextureGenerator>,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        session_user: BinnyUser,
        detector: Arc<dyn ImageDetector>,
        generator: Arc<dyn TextureGenerator>,
    ) -> Self {
        let user_repo = Arc::new(UserRepository::new(pool.clone()));
        let binny_repo = Arc::new(BinnyRepository::new(pool.clone()));
        let file_repo = Arc::new(FileRepository::new(pool.clone()));
        let reward_repo = Arc::new(RewardRepository::new(pool.clone()));

        let reward_service = Arc::new(RewardService::new(
            user_repo.clone(),
            file_repo.clone(),
            reward_repo.clone(),
            detector.clone(),
        ));
        let query_service = Arc::new(QueryService::new(
            user_repo,
            binny_repo,
            reward_repo,
            file_repo,
        ));

        Self {
            pool,
            session_user: Arc::new(session_user),
            reward_service,
            query_service,
            detector,
            generator,
        }
    }
}
