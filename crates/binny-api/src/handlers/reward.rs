//! 回收奖励

use axum::{
    Json,
    extract::{Path, Query, State},
};
use binny_core::service::RewardHistoryView;
use tracing::info;

use crate::dto::{ApiResponse, PageResponse, PaginationParams};
use crate::error::Result;
use crate::extract::{ImageUpload, SessionUser};
use crate::state::AppState;

/// 上传垃圾照片，识别并发放经验
///
/// POST /api/rewards
pub async fn create_reward(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    ImageUpload(image): ImageUpload,
) -> Result<Json<ApiResponse<RewardHistoryView>>> {
    let history = state.reward_service.request_reward(&user, image).await?;
    info!(
        history_id = history.id,
        earned_xp = history.earned_xp,
        "奖励请求处理完成"
    );

    let view = state.query_service.history_view(&user, history).await?;
    Ok(Json(ApiResponse::success(view)))
}

/// 分页获取奖励记录，按时间倒序
///
/// GET /api/rewards
pub async fn list_rewards(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<RewardHistoryView>>>> {
    let page = state
        .query_service
        .list_reward_histories(&user, params.page(), params.limit())
        .await?;

    Ok(Json(ApiResponse::success(PageResponse::new(
        page.items,
        page.total,
        params.page(),
        params.limit(),
    ))))
}

/// GET /api/rewards/{id}
pub async fn get_reward(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<RewardHistoryView>>> {
    let view = state.query_service.reward_history(&user, id).await?;
    Ok(Json(ApiResponse::success(view)))
}
