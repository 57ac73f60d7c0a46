//! AI 服务 HTTP 客户端

use std::time::Duration;

use async_trait::async_trait;
use binny_shared::config::AiConfig;
use binny_shared::observability::metrics;
use reqwest::multipart::{Form, Part};
use tracing::{debug, error, instrument};

use super::dto::{DetectionResponse, GenerationForm, GenerationResponse, ImagePayload};
use super::{ImageDetector, TextureGenerator};
use crate::error::{BinnyError, Result};

/// AI 服务客户端
///
/// - `POST {base_url}/detect`：multipart 字段 `image`
/// - `POST {base_url}/assets/create?model=&asset_type=`：multipart 字段 `file`
/// - `GET {base_url}/assets?model=&asset_type=`：不带参考图时生成
#[derive(Debug, Clone)]
pub struct AiClient {
    base_url: String,
    client: reqwest::Client,
}

impl AiClient {
    pub fn new(config: &AiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| BinnyError::Internal(format!("创建 AI 服务 HTTP 客户端失败: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn image_part(image: &ImagePayload) -> reqwest::Result<Part> {
        Part::bytes(image.bytes.clone())
            .file_name(image.name.clone())
            .mime_str(&image.content_type)
    }

    async fn send_detect(&self, image: &ImagePayload) -> reqwest::Result<DetectionResponse> {
        let form = Form::new().part("image", Self::image_part(image)?);
        self.client
            .post(self.url("/detect"))
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    async fn send_generate(
        &self,
        form: &GenerationForm,
        image: Option<&ImagePayload>,
    ) -> reqwest::Result<GenerationResponse> {
        let request = match image {
            Some(image) => self
                .client
                .post(self.url("/assets/create"))
                .query(form)
                .multipart(Form::new().part("file", Self::image_part(image)?)),
            None => self.client.get(self.url("/assets")).query(form),
        };

        request.send().await?.error_for_status()?.json().await
    }
}

/// 失败原因标签，用于指标
fn failure_reason(err: &reqwest::Error) -> &'static str {
    if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connect"
    } else if err.is_status() {
        "http_status"
    } else if err.is_decode() {
        "decode"
    } else {
        "transport"
    }
}

#[async_trait]
impl ImageDetector for AiClient {
    #[instrument(skip(self, image), fields(file_name = %image.name, size = image.bytes.len()))]
    async fn detect(&self, image: &ImagePayload) -> DetectionResponse {
        match self.send_detect(image).await {
            Ok(response) => {
                debug!(
                    success = response.success,
                    total_objects = response.total_objects,
                    "识别服务返回结果"
                );
                response
            }
            Err(e) => {
                let reason = failure_reason(&e);
                error!(
                    reason,
                    status = e.status().map(|s| s.as_u16()),
                    error = %e,
                    "识别服务调用失败，按未识别处理"
                );
                metrics::record_detection_failure(reason);
                DetectionResponse::unsuccessful()
            }
        }
    }
}

#[async_trait]
impl TextureGenerator for AiClient {
    #[instrument(
        skip(self, image),
        fields(model = %form.model, asset_type = form.asset_type.as_str())
    )]
    async fn generate(
        &self,
        form: &GenerationForm,
        image: Option<&ImagePayload>,
    ) -> GenerationResponse {
        match self.send_generate(form, image).await {
            Ok(response) => {
                metrics::record_texture_generation(if response.success {
                    "success"
                } else {
                    "unsuccessful"
                });
                response
            }
            Err(e) => {
                error!(
                    reason = failure_reason(&e),
                    status = e.status().map(|s| s.as_u16()),
                    error = %e,
                    "贴图生成服务调用失败"
                );
                metrics::record_texture_generation("error");
                GenerationResponse::unsuccessful()
            }
        }
    }
}
