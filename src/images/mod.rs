//! Image generation: one capability trait, one backend per provider.
//!
//! The provider is picked once, when the [`ImageGenerator`] is built from
//! configuration. Generation never fails as a whole: each (prompt,
//! repetition) request that fails is recorded as a [`GeneratedImage`]
//! carrying the error, and the remaining requests still run.

mod providers;
mod store;

pub use crate::model::{GeneratedImage, ImagePayload, ImageProvider};
pub use providers::{
    NanoBananaBackend, PollinationsBackend, SegmindBackend, StabilityBackend,
};
pub use store::{image_filename, save_images};

use crate::config::PipelineConfig;
use crate::error::AppError;
use std::path::{Path, PathBuf};

/// The ability to turn a text prompt into image payloads.
///
/// One call is one request to the provider, asking for one image.
#[async_trait::async_trait]
pub trait ImageBackend: Send + Sync {
    fn provider(&self) -> ImageProvider;

    async fn render(&self, prompt: &str) -> Result<Vec<ImagePayload>, AppError>;
}

/// Runs prompts through the configured backend and saves the results.
pub struct ImageGenerator {
    backend: Box<dyn ImageBackend>,
    http: reqwest::Client,
}

impl ImageGenerator {
    /// Builds the generator for the configured provider.
    ///
    /// Fails when the provider needs an API key and none is configured.
    pub fn from_config(config: &PipelineConfig, http: reqwest::Client) -> Result<Self, AppError> {
        let provider = config.image_provider;
        let endpoint = config.image_endpoint.clone();

        let key = match provider.key_variable() {
            Some(variable) => Some(
                config
                    .provider_keys
                    .for_provider(provider)
                    .cloned()
                    .ok_or_else(|| {
                        AppError::MissingConfiguration(format!(
                            "{} is required for the {} image provider",
                            variable, provider
                        ))
                    })?,
            ),
            None => None,
        };

        let backend: Box<dyn ImageBackend> = match (provider, key) {
            (ImageProvider::NanoBanana, Some(key)) => {
                Box::new(NanoBananaBackend::new(http.clone(), key, endpoint))
            }
            (ImageProvider::Segmind, Some(key)) => {
                Box::new(SegmindBackend::new(http.clone(), key, endpoint))
            }
            (ImageProvider::Stability, Some(key)) => {
                Box::new(StabilityBackend::new(http.clone(), key, endpoint))
            }
            (ImageProvider::Pollinations, _) => Box::new(PollinationsBackend::new(endpoint)),
            (other, None) => {
                return Err(AppError::MissingConfiguration(format!(
                    "no API key configured for the {} image provider",
                    other
                )))
            }
        };

        log::info!("Image provider: {}", provider);
        Ok(Self::with_backend(backend, http))
    }

    /// Builds a generator around an explicit backend.
    pub fn with_backend(backend: Box<dyn ImageBackend>, http: reqwest::Client) -> Self {
        Self { backend, http }
    }

    pub fn provider(&self) -> ImageProvider {
        self.backend.provider()
    }

    /// Requests `count_per_prompt` images for every prompt, in order.
    ///
    /// A count of zero is treated as one. Failed requests are recorded
    /// inline and do not stop the remaining requests.
    pub async fn generate_images(
        &self,
        prompts: &[String],
        count_per_prompt: u32,
    ) -> Vec<GeneratedImage> {
        let provider = self.backend.provider();
        let repetitions = count_per_prompt.max(1);
        let mut images = Vec::new();

        for prompt in prompts {
            for _ in 0..repetitions {
                match self.backend.render(prompt).await {
                    Ok(payloads) if payloads.is_empty() => {
                        log::warn!("{} returned no images for prompt '{}'", provider, prompt);
                        images.push(GeneratedImage::failed(
                            prompt,
                            provider,
                            "provider response contained no images",
                        ));
                    }
                    Ok(payloads) => {
                        images.extend(
                            payloads
                                .into_iter()
                                .map(|payload| GeneratedImage::succeeded(prompt, provider, payload)),
                        );
                    }
                    Err(e) => {
                        log::error!("Error generating image with {}: {}", provider, e);
                        images.push(GeneratedImage::failed(prompt, provider, e.to_string()));
                    }
                }
            }
        }

        log::info!(
            "Generated {} image entries ({} failed) for {} prompts",
            images.len(),
            images.iter().filter(|img| img.is_error()).count(),
            prompts.len()
        );
        images
    }

    /// Writes every usable image to `dir` as PNG. See [`save_images`].
    pub async fn save_images(
        &self,
        images: &[GeneratedImage],
        dir: &Path,
    ) -> Result<Vec<PathBuf>, AppError> {
        save_images(&self.http, images, dir).await
    }
}
