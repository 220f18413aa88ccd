// src/config.rs
use crate::constants::{
    DEFAULT_GEMINI_MODEL, DEFAULT_IMAGES_DIR, DEFAULT_LLM_TEMPERATURE,
    DEFAULT_MAX_CAPTION_LENGTH, DEFAULT_RESULTS_DIR, INSTAGRAM_MAX_HASHTAGS,
};
use crate::error::AppError;
use crate::images::ImageProvider;
use crate::types::{ApiKey, ValidationError};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Parsed command-line input.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Topic to create content about (prompts interactively when omitted)
    pub topic: Option<String>,

    /// Image provider: nano_banana, segmind, stability or pollinations (overrides IMAGE_GENERATION_API)
    #[arg(long)]
    pub provider: Option<String>,

    /// Directory for the JSON result file
    #[arg(long, default_value = DEFAULT_RESULTS_DIR)]
    pub results_dir: String,

    /// Directory for downloaded/decoded PNG images
    #[arg(long, default_value = DEFAULT_IMAGES_DIR)]
    pub images_dir: String,

    /// Generate images but do not download or write them to disk
    #[arg(long, default_value_t = false)]
    pub no_save_images: bool,

    /// Images requested per prompt (overrides NUM_IMAGES)
    #[arg(long)]
    pub images_per_prompt: Option<u32>,

    /// Gemini model used for every stage (overrides GEMINI_MODEL)
    #[arg(long)]
    pub model: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Keys for the key-based image providers. Any of them may be absent; only
/// the selected provider's key is required.
#[derive(Debug, Clone, Default)]
pub struct ProviderKeys {
    pub nano_banana: Option<ApiKey>,
    pub segmind: Option<ApiKey>,
    pub stability: Option<ApiKey>,
}

impl ProviderKeys {
    /// Returns the key configured for `provider`, if the provider needs one.
    pub fn for_provider(&self, provider: ImageProvider) -> Option<&ApiKey> {
        match provider {
            ImageProvider::NanoBanana => self.nano_banana.as_ref(),
            ImageProvider::Segmind => self.segmind.as_ref(),
            ImageProvider::Stability => self.stability.as_ref(),
            ImageProvider::Pollinations => None,
        }
    }
}

/// Resolved pipeline configuration, built once and passed to every stage.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub llm_api_key: ApiKey,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub image_provider: ImageProvider,
    pub provider_keys: ProviderKeys,
    /// Replaces the selected provider's built-in endpoint when set.
    pub image_endpoint: Option<String>,
    pub max_caption_length: u32,
    /// Never above the Instagram limit of 30.
    pub hashtag_limit: usize,
    pub images_per_prompt: u32,
    pub results_dir: PathBuf,
    pub images_dir: PathBuf,
    pub save_images: bool,
    pub verbose: bool,
    /// `None` keeps outbound calls unbounded.
    pub http_timeout: Option<Duration>,
}

impl PipelineConfig {
    /// Resolves a complete pipeline configuration from CLI input and environment.
    ///
    /// A `.env` file in the working directory is loaded first when present;
    /// variables already set in the process environment win.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => log::warn!("Ignoring unreadable .env file: {}", e),
        }
        Self::resolve_with(cli, |name| std::env::var(name).ok())
    }

    /// Resolves configuration using `lookup` for environment variables.
    pub fn resolve_with<F>(cli: CommandLineInput, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let llm_api_key = env("GOOGLE_API_KEY").ok_or_else(|| {
            AppError::MissingConfiguration(
                "GOOGLE_API_KEY environment variable not set".to_string(),
            )
        })?;
        let llm_api_key = ApiKey::new(llm_api_key)?;

        let image_provider = match cli.provider.or_else(|| env("IMAGE_GENERATION_API")) {
            Some(name) => name.parse::<ImageProvider>()?,
            None => ImageProvider::Pollinations,
        };

        let provider_keys = ProviderKeys {
            nano_banana: env("NANO_BANANA_API_KEY").map(ApiKey::new).transpose()?,
            segmind: env("SEGMIND_API_KEY").map(ApiKey::new).transpose()?,
            stability: env("STABILITY_API_KEY").map(ApiKey::new).transpose()?,
        };

        let max_caption_length =
            parse_number(env("MAX_CAPTION_LENGTH"), "MAX_CAPTION_LENGTH")?
                .unwrap_or(DEFAULT_MAX_CAPTION_LENGTH);

        let hashtag_limit = parse_number(env("HASHTAG_LIMIT"), "HASHTAG_LIMIT")?
            .map(|limit| (limit as usize).min(INSTAGRAM_MAX_HASHTAGS))
            .unwrap_or(INSTAGRAM_MAX_HASHTAGS);

        let images_per_prompt = match cli.images_per_prompt {
            Some(n) => n,
            None => parse_number(env("NUM_IMAGES"), "NUM_IMAGES")?.unwrap_or(1),
        };
        if images_per_prompt == 0 || images_per_prompt > 4 {
            return Err(ValidationError::OutOfBounds {
                value: images_per_prompt,
                min: 1,
                max: 4,
            }
            .into());
        }

        let http_timeout = parse_number(env("HTTP_TIMEOUT_SECS"), "HTTP_TIMEOUT_SECS")?
            .map(|secs| Duration::from_secs(u64::from(secs)));

        Ok(PipelineConfig {
            llm_api_key,
            llm_model: cli
                .model
                .or_else(|| env("GEMINI_MODEL"))
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            llm_temperature: DEFAULT_LLM_TEMPERATURE,
            image_provider,
            provider_keys,
            image_endpoint: env("IMAGE_API_ENDPOINT"),
            max_caption_length,
            hashtag_limit,
            images_per_prompt,
            results_dir: PathBuf::from(cli.results_dir),
            images_dir: PathBuf::from(cli.images_dir),
            save_images: !cli.no_save_images,
            verbose: cli.verbose,
            http_timeout,
        })
    }

    /// Builds the HTTP client shared by the LLM runtime and image providers.
    pub fn http_client(&self) -> Result<reqwest::Client, AppError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.http_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

fn parse_number(value: Option<String>, field: &'static str) -> Result<Option<u32>, AppError> {
    value
        .map(|v| {
            v.trim().parse::<u32>().map_err(|_| {
                AppError::from(ValidationError::InvalidNumber {
                    field,
                    value: v.clone(),
                })
            })
        })
        .transpose()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            llm_api_key: ApiKey::new("test-key-for-defaults-only")
                .expect("Default API key should be valid"),
            llm_model: DEFAULT_GEMINI_MODEL.to_string(),
            llm_temperature: DEFAULT_LLM_TEMPERATURE,
            image_provider: ImageProvider::Pollinations,
            provider_keys: ProviderKeys::default(),
            image_endpoint: None,
            max_caption_length: DEFAULT_MAX_CAPTION_LENGTH,
            hashtag_limit: INSTAGRAM_MAX_HASHTAGS,
            images_per_prompt: 1,
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            save_images: true,
            verbose: false,
            http_timeout: None,
        }
    }
}
