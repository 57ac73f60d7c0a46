//! 响应 DTO 定义

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use binny_core::models::StoredFile;
use serde::Serialize;
use uuid::Uuid;

/// 分页响应
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl<T> PageResponse<T> {
    pub fn new(items: Vec<T>, total: i64, page: i64, page_size: i64) -> Self {
        let total_pages = if page_size > 0 {
            (total + page_size - 1) / page_size
        } else {
            0
        };

        Self {
            items,
            total,
            page,
            page_size,
            total_pages,
        }
    }
}

/// API 统一响应
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: "操作成功".to_string(),
            data: Some(data),
        }
    }
}

/// 上传文件，内容以 base64 返回
#[derive(Debug, Clone, Serialize)]
pub struct FileDto {
    pub uuid: Uuid,
    pub name: String,
    pub content_type: String,
    pub data: String,
}

impl From<StoredFile> for FileDto {
    fn from(file: StoredFile) -> Self {
        Self {
            uuid: file.uuid,
            name: file.name,
            content_type: file.content_type,
            data: BASE64.encode(&file.blob),
        }
    }
}
