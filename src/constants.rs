// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains. Reading them
//! tells you what a content package looks like and how each image provider
//! is asked to render.

// ---------------------------------------------------------------------------
// Content package shape
// ---------------------------------------------------------------------------

/// Instagram accepts at most 30 hashtags per post.
pub const INSTAGRAM_MAX_HASHTAGS: usize = 30;

/// Number of image prompts in every content package.
pub const IMAGE_PROMPT_COUNT: usize = 3;

/// Lines of the image-prompt stage output this short are headings or noise.
pub const IMAGE_PROMPT_MIN_CHARS: usize = 20;

/// Characters stripped from the start of an image prompt line (enumeration).
pub const IMAGE_PROMPT_ENUMERATION_CHARS: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '.', '-', '•', ' ',
];

/// Returned when the review output has no short caption marker.
pub const SHORT_CAPTION_PLACEHOLDER: &str = "Check the full content for short caption";

/// Default long caption limit, matching Instagram's caption limit.
pub const DEFAULT_MAX_CAPTION_LENGTH: u32 = 2200;

/// Short captions are asked to fit a single preview line.
pub const SHORT_CAPTION_MAX_CHARS: u32 = 150;

// ---------------------------------------------------------------------------
// LLM defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

pub const DEFAULT_LLM_TEMPERATURE: f32 = 0.7;

pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// ---------------------------------------------------------------------------
// Image generation parameters
// ---------------------------------------------------------------------------

/// Square output; every provider is asked for the same resolution.
pub const IMAGE_WIDTH: u32 = 1024;
pub const IMAGE_HEIGHT: u32 = 1024;

pub const NANO_BANANA_ENDPOINT: &str = "https://api.nanobanana.ai/v1/images/generations";
pub const NANO_BANANA_MODEL: &str = "nano-banana-v1";

pub const SEGMIND_ENDPOINT: &str = "https://api.segmind.com/v1/sdxl1.0-txt2img";
pub const SEGMIND_INFERENCE_STEPS: u32 = 20;
pub const SEGMIND_GUIDANCE_SCALE: f32 = 7.5;

pub const STABILITY_ENDPOINT: &str =
    "https://api.stability.ai/v1/generation/stable-diffusion-xl-1024-v1-0/text-to-image";
pub const STABILITY_STEPS: u32 = 30;
pub const STABILITY_CFG_SCALE: u32 = 7;

pub const POLLINATIONS_BASE_URL: &str = "https://image.pollinations.ai/prompt/";

/// Seeds are drawn uniformly from this inclusive range.
pub const POLLINATIONS_SEED_RANGE: std::ops::RangeInclusive<u32> = 1..=10_000_000;

// ---------------------------------------------------------------------------
// Output layout
// ---------------------------------------------------------------------------

pub const DEFAULT_RESULTS_DIR: &str = "results";

pub const DEFAULT_IMAGES_DIR: &str = "generated_images";

pub const RESULT_FILE_PREFIX: &str = "instagram_content";

/// `chrono` format for the timestamp in result filenames.
pub const RESULT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
