//! 上传文件查询

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::dto::{ApiResponse, FileDto};
use crate::error::Result;
use crate::extract::SessionUser;
use crate::state::AppState;

/// GET /api/files/{uuid}
pub async fn get_file(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Path(uuid): Path<Uuid>,
) -> Result<Json<ApiResponse<FileDto>>> {
    let file = state.query_service.file(&user, uuid).await?;
    Ok(Json(ApiResponse::success(FileDto::from(file))))
}
