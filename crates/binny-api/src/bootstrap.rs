//! 启动引导
//!
//! 确认会话用户及其图鉴存在，选择识别服务实现并组装应用状态

use std::sync::Arc;

use binny_core::ai::{AiClient, FixtureDetector, ImageDetector};
use binny_core::models::BinnyUser;
use binny_core::repository::UserRepository;
use binny_core::Result;
use binny_shared::config::{AiConfig, SessionConfig};
use sqlx::PgPool;
use tracing::info;

use crate::state::AppState;

/// 幂等地创建会话用户和图鉴
pub async fn ensure_session_user(pool: &PgPool, session: &SessionConfig) -> Result<BinnyUser> {
    let repo = UserRepository::new(pool.clone());
    let user = repo.ensure_user(&session.username).await?;
    let collection = repo.ensure_collection(user.id).await?;

    info!(
        user_id = user.id,
        username = %user.username,
        collection_id = collection.id,
        "会话用户已就绪"
    );
    Ok(user)
}

/// 配置了固定识别结果时使用它，否则调用 AI 服务
pub fn build_detector(config: &AiConfig, client: Arc<AiClient>) -> Result<Arc<dyn ImageDetector>> {
    match &config.mock_detection_path {
        Some(path) => Ok(Arc::new(FixtureDetector::from_path(path)?)),
        None => {
            info!(base_url = client.base_url(), "使用 AI 识别服务");
            Ok(client as Arc<dyn ImageDetector>)
        }
    }
}

/// 组装应用状态
pub async fn build_state(
    pool: PgPool,
    session: &SessionConfig,
    ai: &AiConfig,
) -> Result<AppState> {
    let user = ensure_session_user(&pool, session).await?;
    let client = Arc::new(AiClient::new(ai)?);
    let detector = build_detector(ai, client.clone())?;

    Ok(AppState::new(pool, user, detector, client))
}
