//! API 错误类型定义
//!
//! 统一把业务错误映射为 HTTP 状态码和 `{success, code, message, data}` 响应体

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use binny_core::BinnyError;
use serde_json::json;
use uuid::Uuid;

/// API 错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // 请求错误
    #[error("参数验证失败: {0}")]
    Validation(String),
    #[error("上传文件无效: {0}")]
    InvalidUpload(String),
    #[error("上传文件过大")]
    PayloadTooLarge,

    // 资源不存在
    #[error("宠物不存在: {0}")]
    BinnyNotFound(i64),
    #[error("图鉴不存在: {0}")]
    CollectionNotFound(i64),
    #[error("奖励记录不存在: {0}")]
    RewardHistoryNotFound(i64),
    #[error("文件不存在: {0}")]
    FileNotFound(Uuid),
    #[error("资源不存在: {0}")]
    NotFound(String),

    // 系统错误
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
    #[error("内部错误: {0}")]
    Internal(String),
}

impl ApiError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,

            Self::BinnyNotFound(_)
            | Self::CollectionNotFound(_)
            | Self::RewardHistoryNotFound(_)
            | Self::FileNotFound(_)
            | Self::NotFound(_) => StatusCode::NOT_FOUND,

            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidUpload(_) => "INVALID_UPLOAD",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::BinnyNotFound(_) => "BINNY_NOT_FOUND",
            Self::CollectionNotFound(_) => "COLLECTION_NOT_FOUND",
            Self::RewardHistoryNotFound(_) => "REWARD_HISTORY_NOT_FOUND",
            Self::FileNotFound(_) => "FILE_NOT_FOUND",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志
        let message = match &self {
            Self::Database(e) => {
                tracing::error!(error = %e, "数据库操作失败");
                "服务内部错误，请稍后重试".to_string()
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "服务内部错误，请稍后重试".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
            "data": serde_json::Value::Null
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// 从核心服务错误转换
impl From<BinnyError> for ApiError {
    fn from(err: BinnyError) -> Self {
        match err {
            BinnyError::Database(e) => Self::Database(e),
            BinnyError::BinnyNotFound(id) => Self::BinnyNotFound(id),
            BinnyError::CollectionNotFound(id) => Self::CollectionNotFound(id),
            BinnyError::RewardHistoryNotFound(id) => Self::RewardHistoryNotFound(id),
            BinnyError::FileNotFound(uuid) => Self::FileNotFound(uuid),
            BinnyError::Validation(msg) => Self::Validation(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// multipart 请求体不是合法的 multipart
impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge
        } else {
            Self::InvalidUpload(rejection.body_text())
        }
    }
}

/// 读取 multipart 字段失败（含超过请求体上限）
impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge
        } else {
            Self::InvalidUpload(err.body_text())
        }
    }
}

/// API Result 类型别名
pub type Result<T> = std::result::Result<T, ApiError>;
