//! 会话用户与首页

use axum::{Json, extract::State};
use binny_core::service::{HomeView, UserSummary};

use crate::dto::ApiResponse;
use crate::error::Result;
use crate::extract::SessionUser;
use crate::state::AppState;

/// 当前会话用户
///
/// GET /api/me
pub async fn me(SessionUser(user): SessionUser) -> Json<ApiResponse<UserSummary>> {
    Json(ApiResponse::success(UserSummary::from(user.as_ref())))
}

/// 首页：用户、图鉴 ID 与最近的奖励记录
///
/// GET /api/home
pub async fn home(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<ApiResponse<HomeView>>> {
    let home = state.query_service.home(&user).await?;
    Ok(Json(ApiResponse::success(home)))
}
