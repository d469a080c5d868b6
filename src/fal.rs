use reqwest::Client;
use serde_json::json;
use thiserror::Error;
use tracing::{error, info};

use crate::models::{GenerateRequest, GenerateResponse};

const MODEL_PATH: &str = "fal-ai/bytedance/seedream/v4/text-to-image";

#[derive(Debug, Error)]
pub enum FalError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("API error: status={status} body={body}")]
    Api { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Response(String),
}

pub struct FalClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl FalClient {
    pub fn new(api_key: String) -> Self {
        let base_url = std::env::var("FAL_API_BASE")
            .unwrap_or_else(|_| "https://fal.run".to_string());
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Marshal the validated form state into the Seedream argument object.
    /// `max_images` and `sync_mode` are fixed; `seed` is omitted when unset.
    pub fn build_payload(request: &GenerateRequest) -> serde_json::Value {
        let mut payload = json!({
            "prompt": request.prompt.trim(),
            "image_size": &request.size,
            "num_images": request.num_images,
            "max_images": 1,
            "enable_safety_checker": request.enable_safety_checker,
            "sync_mode": true,
        });
        if let Some(seed) = request.seed {
            payload["seed"] = json!(seed);
        }
        payload
    }

    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, FalError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), MODEL_PATH);
        let payload = Self::build_payload(request);

        info!("Requesting {} image(s) from {}", request.num_images, url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Key {}", self.api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| FalError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Seedream API error: status={} body={}", status, body);
            return Err(FalError::Api { status: status.as_u16(), body });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FalError::Http(e.to_string()))?;
        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| FalError::Response(format!("parse error: {e}")))?;

        if let Some(seed) = parsed.seed {
            info!("Seed used: {}", seed);
        }
        info!("Received {} image URL(s)", parsed.images.len());
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ImageSize, SizePreset};
    use pretty_assertions::assert_eq;

    fn request() -> GenerateRequest {
        GenerateRequest {
            prompt: "  A futuristic cityscape at sunset  ".into(),
            size: ImageSize::Preset(SizePreset::SquareHd),
            num_images: 2,
            seed: None,
            enable_safety_checker: false,
        }
    }

    #[test]
    fn payload_carries_fixed_arguments() {
        let payload = FalClient::build_payload(&request());
        assert_eq!(payload["prompt"], "A futuristic cityscape at sunset");
        assert_eq!(payload["image_size"], "square_hd");
        assert_eq!(payload["num_images"], 2);
        assert_eq!(payload["max_images"], 1);
        assert_eq!(payload["sync_mode"], true);
        assert_eq!(payload["enable_safety_checker"], false);
    }

    #[test]
    fn seed_is_omitted_unless_set() {
        let mut req = request();
        assert!(FalClient::build_payload(&req).get("seed").is_none());
        req.seed = Some(42);
        assert_eq!(FalClient::build_payload(&req)["seed"], 42);
    }

    #[test]
    fn custom_size_marshals_as_dimensions() {
        let mut req = request();
        req.size = ImageSize::Custom { width: 2048, height: 1024 };
        let payload = FalClient::build_payload(&req);
        assert_eq!(payload["image_size"]["width"], 2048);
        assert_eq!(payload["image_size"]["height"], 1024);
    }

    #[test]
    fn response_parses_ordered_image_urls() {
        let body = r#"{
            "seed": 12345,
            "images": [
                {"url": "https://fal.media/files/one.png", "width": 1024, "height": 1024},
                {"url": "https://fal.media/files/two.png", "width": 1024, "height": 1024}
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.seed, Some(12345));
        let urls: Vec<&str> = parsed.images.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://fal.media/files/one.png",
                "https://fal.media/files/two.png"
            ]
        );
    }

    #[test]
    fn response_tolerates_missing_seed() {
        let parsed: GenerateResponse =
            serde_json::from_str(r#"{"images": [{"url": "https://fal.media/a.png"}]}"#).unwrap();
        assert_eq!(parsed.seed, None);
        assert_eq!(parsed.images.len(), 1);
    }
}
