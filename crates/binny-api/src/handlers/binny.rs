//! 宠物查询与重命名

use axum::{
    Json,
    extract::{Path, State},
};
use binny_core::service::BinnyView;
use validator::Validate;

use crate::dto::{ApiResponse, RenameBinnyRequest};
use crate::error::Result;
use crate::extract::SessionUser;
use crate::state::AppState;

/// GET /api/binnies/{id}
pub async fn get_binny(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<BinnyView>>> {
    let binny = state.query_service.binny(&user, id).await?;
    Ok(Json(ApiResponse::success(binny)))
}

/// PATCH /api/binnies/{id}
pub async fn rename_binny(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Path(id): Path<i64>,
    Json(req): Json<RenameBinnyRequest>,
) -> Result<Json<ApiResponse<BinnyView>>> {
    req.validate()?;

    let binny = state.query_service.rename_binny(&user, id, &req.name).await?;
    Ok(Json(ApiResponse::success(binny)))
}
