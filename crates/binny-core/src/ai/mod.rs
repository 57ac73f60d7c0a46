//! 外部 AI 服务
//!
//! 垃圾识别与贴图生成都委托给外部 HTTP 服务。
//! 调用失败（网络错误、非 2xx 状态、响应无法解析）不会向上抛出，
//! 而是记录日志后返回"未成功"的默认响应。
//!
//! - `client`: 基于 reqwest 的 HTTP 客户端
//! - `fixture`: 从 JSON 文件读取固定识别结果（本地调试用）
//! - `dto`: 与 AI 服务交互的数据结构

mod client;
mod dto;
mod fixture;

use async_trait::async_trait;

pub use client::AiClient;
pub use dto::{
    DetectedObject, DetectionResponse, GeneratedFile, GenerationForm, GenerationResponse,
    ImagePayload,
};
pub use fixture::FixtureDetector;

/// 垃圾识别接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageDetector: Send + Sync {
    /// 识别图片中的垃圾，失败时返回 [`DetectionResponse::unsuccessful`]
    async fn detect(&self, image: &ImagePayload) -> DetectionResponse;
}

/// 贴图生成接口
#[async_trait]
pub trait TextureGenerator: Send + Sync {
    /// 生成贴图；带图片时以图片为参考生成，失败时返回 [`GenerationResponse::unsuccessful`]
    async fn generate(
        &self,
        form: &GenerationForm,
        image: Option<&ImagePayload>,
    ) -> GenerationResponse;
}
