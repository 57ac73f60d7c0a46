//! 自定义提取器
//!
//! - [`SessionUser`]: 当前会话用户
//! - [`ImageUpload`]: multipart 中必填的 `file` 字段
//! - [`OptionalImageUpload`]: 可选的 `file` 字段，非 multipart 请求视为未上传

use std::sync::Arc;

use axum::extract::{FromRequest, FromRequestParts, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use binny_core::ai::ImagePayload;
use binny_core::models::BinnyUser;

use crate::error::ApiError;
use crate::state::AppState;

/// multipart 中上传文件的字段名
pub const UPLOAD_FIELD: &str = "file";

const DEFAULT_FILE_NAME: &str = "upload";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// 当前会话用户
#[derive(Debug, Clone)]
pub struct SessionUser(pub Arc<BinnyUser>);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(state.session_user.clone()))
    }
}

/// 必填的上传图片
#[derive(Debug)]
pub struct ImageUpload(pub ImagePayload);

impl<S> FromRequest<S> for ImageUpload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state).await?;
        read_upload(multipart)
            .await?
            .map(Self)
            .ok_or_else(|| ApiError::InvalidUpload(format!("缺少上传字段 `{UPLOAD_FIELD}`")))
    }
}

/// 可选的上传图片
#[derive(Debug)]
pub struct OptionalImageUpload(pub Option<ImagePayload>);

impl<S> FromRequest<S> for OptionalImageUpload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("multipart/form-data"));
        if !is_multipart {
            return Ok(Self(None));
        }

        let multipart = Multipart::from_request(req, state).await?;
        Ok(Self(read_upload(multipart).await?))
    }
}

/// 读取第一个 `file` 字段，其余字段忽略
async fn read_upload(mut multipart: Multipart) -> Result<Option<ImagePayload>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let name = field.file_name().unwrap_or(DEFAULT_FILE_NAME).to_string();
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Err(ApiError::InvalidUpload("上传文件为空".to_string()));
        }

        return Ok(Some(ImagePayload::new(name, content_type, bytes.to_vec())));
    }

    Ok(None)
}
