//! 图鉴查询

use axum::{
    Json,
    extract::{Path, State},
};
use binny_core::service::CollectionView;

use crate::dto::ApiResponse;
use crate::error::Result;
use crate::extract::SessionUser;
use crate::state::AppState;

/// 会话用户自己的图鉴
///
/// GET /api/collection
pub async fn get_my_collection(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<ApiResponse<CollectionView>>> {
    let collection = state.query_service.user_collection(&user).await?;
    Ok(Json(ApiResponse::success(collection)))
}

/// GET /api/collections/{id}
pub async fn get_collection(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CollectionView>>> {
    let collection = state.query_service.collection(&user, id).await?;
    Ok(Json(ApiResponse::success(collection)))
}
