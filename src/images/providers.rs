// src/images/providers.rs
//! One backend per image provider.
//!
//! Key-based backends issue one JSON POST per call and map the provider's
//! response shape to [`ImagePayload`]s. Pollinations needs no request at all:
//! the image is addressed by a URL embedding the prompt and a random seed.

use super::{ImageBackend, ImagePayload, ImageProvider};
use crate::constants::{
    ERROR_BODY_PREVIEW_LENGTH, IMAGE_HEIGHT, IMAGE_WIDTH, NANO_BANANA_ENDPOINT,
    NANO_BANANA_MODEL, POLLINATIONS_BASE_URL, POLLINATIONS_SEED_RANGE, SEGMIND_ENDPOINT,
    SEGMIND_GUIDANCE_SCALE, SEGMIND_INFERENCE_STEPS, STABILITY_CFG_SCALE, STABILITY_ENDPOINT,
    STABILITY_STEPS,
};
use crate::error::AppError;
use crate::types::{ApiKey, ValidationError};
use rand::Rng;
use reqwest::{header, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use url::Url;

/// Sends a provider request and decodes its JSON body.
///
/// Non-success statuses become [`AppError::ImageService`] with a preview of
/// the response body.
async fn send_json<T: DeserializeOwned>(
    provider: ImageProvider,
    request: RequestBuilder,
) -> Result<T, AppError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(AppError::ImageService {
            provider,
            status,
            body: body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect(),
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        AppError::MalformedResponse(format!("{} response could not be parsed: {}", provider, e))
    })
}

// ---------------------------------------------------------------------------
// Nano Banana
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct NanoBananaResponse {
    #[serde(default)]
    data: Vec<NanoBananaImage>,
}

#[derive(Debug, Deserialize)]
struct NanoBananaImage {
    url: Option<String>,
}

/// OpenAI-style image generations endpoint, bearer auth, URL results.
pub struct NanoBananaBackend {
    client: Client,
    key: ApiKey,
    endpoint: String,
}

impl NanoBananaBackend {
    pub fn new(client: Client, key: ApiKey, endpoint: Option<String>) -> Self {
        Self {
            client,
            key,
            endpoint: endpoint.unwrap_or_else(|| NANO_BANANA_ENDPOINT.to_string()),
        }
    }
}

#[async_trait::async_trait]
impl ImageBackend for NanoBananaBackend {
    fn provider(&self) -> ImageProvider {
        ImageProvider::NanoBanana
    }

    async fn render(&self, prompt: &str) -> Result<Vec<ImagePayload>, AppError> {
        log::debug!("POST {} (nano_banana)", self.endpoint);
        let body = json!({
            "model": NANO_BANANA_MODEL,
            "prompt": prompt,
            "n": 1,
            "size": format!("{}x{}", IMAGE_WIDTH, IMAGE_HEIGHT),
            "quality": "hd",
        });
        let request = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.key.as_str())
            .json(&body);

        let response: NanoBananaResponse = send_json(self.provider(), request).await?;
        Ok(response
            .data
            .into_iter()
            .filter_map(|img| img.url)
            .map(ImagePayload::Url)
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Segmind
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SegmindResponse {
    #[serde(default)]
    images: Vec<String>,
}

/// SDXL text-to-image, `x-api-key` auth, base64 results.
pub struct SegmindBackend {
    client: Client,
    key: ApiKey,
    endpoint: String,
}

impl SegmindBackend {
    pub fn new(client: Client, key: ApiKey, endpoint: Option<String>) -> Self {
        Self {
            client,
            key,
            endpoint: endpoint.unwrap_or_else(|| SEGMIND_ENDPOINT.to_string()),
        }
    }
}

#[async_trait::async_trait]
impl ImageBackend for SegmindBackend {
    fn provider(&self) -> ImageProvider {
        ImageProvider::Segmind
    }

    async fn render(&self, prompt: &str) -> Result<Vec<ImagePayload>, AppError> {
        log::debug!("POST {} (segmind)", self.endpoint);
        let body = json!({
            "prompt": prompt,
            "num_inference_steps": SEGMIND_INFERENCE_STEPS,
            "guidance_scale": SEGMIND_GUIDANCE_SCALE,
            "width": IMAGE_WIDTH,
            "height": IMAGE_HEIGHT,
            "num_images": 1,
        });
        let request = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", self.key.as_str())
            .json(&body);

        let response: SegmindResponse = send_json(self.provider(), request).await?;
        Ok(response.images.into_iter().map(ImagePayload::Base64).collect())
    }
}

// ---------------------------------------------------------------------------
// Stability
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct StabilityResponse {
    #[serde(default)]
    artifacts: Vec<StabilityArtifact>,
}

#[derive(Debug, Deserialize)]
struct StabilityArtifact {
    base64: Option<String>,
}

/// Stable Diffusion XL v1 text-to-image, bearer auth, base64 artifacts.
pub struct StabilityBackend {
    client: Client,
    key: ApiKey,
    endpoint: String,
}

impl StabilityBackend {
    pub fn new(client: Client, key: ApiKey, endpoint: Option<String>) -> Self {
        Self {
            client,
            key,
            endpoint: endpoint.unwrap_or_else(|| STABILITY_ENDPOINT.to_string()),
        }
    }
}

#[async_trait::async_trait]
impl ImageBackend for StabilityBackend {
    fn provider(&self) -> ImageProvider {
        ImageProvider::Stability
    }

    async fn render(&self, prompt: &str) -> Result<Vec<ImagePayload>, AppError> {
        log::debug!("POST {} (stability)", self.endpoint);
        let body = json!({
            "text_prompts": [{ "text": prompt }],
            "cfg_scale": STABILITY_CFG_SCALE,
            "height": IMAGE_HEIGHT,
            "width": IMAGE_WIDTH,
            "samples": 1,
            "steps": STABILITY_STEPS,
        });
        let request = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.key.as_str())
            .header(header::ACCEPT, "application/json")
            .json(&body);

        let response: StabilityResponse = send_json(self.provider(), request).await?;
        Ok(response
            .artifacts
            .into_iter()
            .filter_map(|a| a.base64)
            .map(ImagePayload::Base64)
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Pollinations
// ---------------------------------------------------------------------------

/// Keyless provider: the image URL is the request.
pub struct PollinationsBackend {
    base_url: String,
}

impl PollinationsBackend {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| POLLINATIONS_BASE_URL.to_string()),
        }
    }

    /// Builds the image URL for `prompt` with the given seed.
    pub fn image_url(&self, prompt: &str, seed: u32) -> Result<Url, AppError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ValidationError::InvalidUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;

        url.path_segments_mut()
            .map_err(|_| ValidationError::InvalidUrl {
                url: self.base_url.clone(),
                reason: "URL cannot take path segments".to_string(),
            })?
            .pop_if_empty()
            .push(prompt);

        url.query_pairs_mut()
            .append_pair("width", &IMAGE_WIDTH.to_string())
            .append_pair("height", &IMAGE_HEIGHT.to_string())
            .append_pair("enhance", "true")
            .append_pair("seed", &seed.to_string());

        Ok(url)
    }
}

#[async_trait::async_trait]
impl ImageBackend for PollinationsBackend {
    fn provider(&self) -> ImageProvider {
        ImageProvider::Pollinations
    }

    async fn render(&self, prompt: &str) -> Result<Vec<ImagePayload>, AppError> {
        let seed = rand::rng().random_range(POLLINATIONS_SEED_RANGE);
        let url = self.image_url(prompt, seed)?;
        Ok(vec![ImagePayload::Url(url.into())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pollinations_url_shape() {
        let backend = PollinationsBackend::new(None);
        let url = backend.image_url("A red fox / at dawn", 42).unwrap();
        assert_eq!(
            url.as_str(),
            "https://image.pollinations.ai/prompt/A%20red%20fox%20%2F%20at%20dawn?width=1024&height=1024&enhance=true&seed=42"
        );
    }

    #[tokio::test]
    async fn test_pollinations_seed_is_in_range() {
        let backend = PollinationsBackend::new(None);
        for _ in 0..20 {
            let payloads = backend.render("sunrise over hills").await.unwrap();
            let [ImagePayload::Url(raw)] = payloads.as_slice() else {
                panic!("expected exactly one URL payload");
            };
            let url = Url::parse(raw).unwrap();
            let seed: u32 = url
                .query_pairs()
                .find(|(k, _)| k == "seed")
                .map(|(_, v)| v.parse().unwrap())
                .unwrap();
            assert!(POLLINATIONS_SEED_RANGE.contains(&seed));
        }
    }

    #[test]
    fn test_response_shapes_decode() {
        let nano: NanoBananaResponse =
            serde_json::from_str(r#"{"data":[{"url":"https://cdn/x.png"},{"url":null}]}"#).unwrap();
        assert_eq!(nano.data.len(), 2);

        let segmind: SegmindResponse = serde_json::from_str(r#"{"images":["AAAA"]}"#).unwrap();
        assert_eq!(segmind.images, vec!["AAAA"]);

        let stability: StabilityResponse = serde_json::from_str(
            r#"{"artifacts":[{"base64":"BBBB","seed":1,"finishReason":"SUCCESS"}]}"#,
        )
        .unwrap();
        assert_eq!(stability.artifacts[0].base64.as_deref(), Some("BBBB"));

        let empty: SegmindResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.images.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_network_failure() {
        let backend = SegmindBackend::new(
            Client::new(),
            ApiKey::new("sg-key").unwrap(),
            Some("http://127.0.0.1:1/txt2img".to_string()),
        );
        let err = backend.render("anything").await.unwrap_err();
        assert!(matches!(err, AppError::NetworkFailure(_)));
    }
}
