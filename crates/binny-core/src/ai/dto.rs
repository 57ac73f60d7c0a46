//! AI 服务交互数据结构
//!
//! 字段命名与 AI 服务的 JSON 协议保持一致（snake_case）。
//! 未声明的字段收进 `extra`，代理接口原样返回。
//! `objects` 保留原始 JSON，只在需要时解析单个物体。

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::models::{AssetType, BinnyType, WasteStatus};

/// 待识别/待生成的图片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// 识别出的单个物体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    pub label: BinnyType,
    pub confidence: f64,
    pub status: WasteStatus,
    #[serde(default)]
    pub how_to_recycle: Option<String>,
    /// 物体包围盒，本服务不使用，仅透传
    #[serde(default)]
    pub box_2d: Option<Vec<f64>>,
}

/// 识别服务响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub objects: Vec<Value>,
    #[serde(default)]
    pub total_objects: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DetectionResponse {
    /// 调用失败时的默认响应：未识别出任何物体
    pub fn unsuccessful() -> Self {
        Self {
            success: false,
            objects: Vec::new(),
            total_objects: 0,
            extra: Map::new(),
        }
    }

    /// 由已解析的物体构造成功响应
    pub fn detected(objects: impl IntoIterator<Item = DetectedObject>) -> Self {
        let objects: Vec<Value> = objects
            .into_iter()
            .filter_map(|object| serde_json::to_value(object).ok())
            .collect();
        Self {
            success: true,
            total_objects: objects.len() as i64,
            objects,
            extra: Map::new(),
        }
    }

    /// 是否可以据此发放奖励
    pub fn has_detection(&self) -> bool {
        self.success && !self.objects.is_empty()
    }

    /// 解析第一个物体；其余物体不解析
    pub fn first_object(&self) -> Option<serde_json::Result<DetectedObject>> {
        self.objects.first().map(DetectedObject::deserialize)
    }
}

/// 贴图生成参数（同时作为查询参数转发给 AI 服务）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationForm {
    pub model: BinnyType,
    pub asset_type: AssetType,
}

/// 生成的文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub filename: String,
    pub content_base64: String,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 贴图生成服务响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub file: Option<GeneratedFile>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GenerationResponse {
    /// 调用失败时的默认响应
    pub fn unsuccessful() -> Self {
        Self {
            success: false,
            file: None,
            extra: Map::new(),
        }
    }
}

/// AI 服务可能把空列表返回成 null
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}
