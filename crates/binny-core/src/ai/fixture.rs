//! 固定识别结果
//!
//! 本地开发时不依赖 AI 服务，直接返回 JSON 文件里的识别结果

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use super::ImageDetector;
use super::dto::{DetectionResponse, ImagePayload};
use crate::error::{BinnyError, Result};

#[derive(Debug, Clone)]
pub struct FixtureDetector {
    response: DetectionResponse,
}

impl FixtureDetector {
    pub fn new(response: DetectionResponse) -> Self {
        Self { response }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            BinnyError::Internal(format!("读取识别结果文件失败 {}: {e}", path.display()))
        })?;
        let response: DetectionResponse = serde_json::from_str(&content)?;

        info!(path = %path.display(), objects = response.objects.len(), "使用固定识别结果");
        Ok(Self::new(response))
    }
}

#[async_trait]
impl ImageDetector for FixtureDetector {
    async fn detect(&self, _image: &ImagePayload) -> DetectionResponse {
        self.response.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BinnyType, WasteStatus};

    fn fixture_path() -> std::path::PathBuf {
        std::env::temp_dir().join(format!("binny-fixture-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = FixtureDetector::from_path("/nonexistent/mock_detection.json");
        assert!(matches!(result, Err(BinnyError::Internal(_))));
    }

    #[test]
    fn test_invalid_json_is_error() {
        let path = fixture_path();
        std::fs::write(&path, "{not json").unwrap();

        let result = FixtureDetector::from_path(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(BinnyError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_returns_fixture_for_any_image() {
        let path = fixture_path();
        let body = serde_json::json!({
            "success": true,
            "objects": [{"label": "container", "confidence": 0.7, "status": "clean"}],
            "total_objects": 1
        });
        std::fs::write(&path, body.to_string()).unwrap();

        let detector = FixtureDetector::from_path(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let image = ImagePayload::new("a.png", "image/png", vec![1, 2, 3]);
        let response = detector.detect(&image).await;
        assert!(response.has_detection());
        let object = response.first_object().unwrap().unwrap();
        assert_eq!(object.label, BinnyType::Container);
        assert_eq!(object.status, WasteStatus::Clean);
    }
}
