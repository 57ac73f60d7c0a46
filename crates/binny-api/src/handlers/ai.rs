//! AI 服务代理
//!
//! 识别与贴图生成的结果原样返回，不包裹统一响应结构

use axum::{
    Json,
    extract::{Query, State},
};
use binny_core::ai::{DetectionResponse, GenerationForm, GenerationResponse};
use tracing::info;

use crate::extract::{ImageUpload, OptionalImageUpload};
use crate::state::AppState;

/// 识别上传图片中的垃圾（不记录、不发放经验）
///
/// POST /api/detect
pub async fn detect(
    State(state): State<AppState>,
    ImageUpload(image): ImageUpload,
) -> Json<DetectionResponse> {
    let response = state.detector.detect(&image).await;
    info!(
        success = response.success,
        total_objects = response.total_objects,
        "识别完成"
    );
    Json(response)
}

/// 生成宠物贴图，可附带参考图
///
/// POST /api/generate?model=&asset_type=
pub async fn generate(
    State(state): State<AppState>,
    Query(form): Query<GenerationForm>,
    OptionalImageUpload(image): OptionalImageUpload,
) -> Json<GenerationResponse> {
    Json(state.generator.generate(&form, image.as_ref()).await)
}
