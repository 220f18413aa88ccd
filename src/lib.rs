// src/lib.rs
//! insta-content-crew library: a fixed four-stage LLM pipeline that turns a
//! topic into Instagram captions, hashtags, image prompts and images.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `PipelineConfig`
//! - **Domain model**: `ContentResult`, `CaptionSet`, `GeneratedImage`, `Stage`
//! - **Agents and LLM runtime**: `AgentProfile`, `TaskCatalog`, `AgentRuntime`
//! - **Images**: `ImageGenerator`, `ImageBackend` and the four provider backends
//! - **Pipeline**: `ContentCrew` and its capability traits

mod agents;
mod config;
mod constants;
mod error;
mod extraction;
mod images;
mod llm;
mod model;
mod output;
mod pipeline;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, ServiceFailureKind};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, PipelineConfig, ProviderKeys};

// --- Domain Model ---
pub use crate::model::{
    CaptionSet, ContentResult, GeneratedImage, ImagePayload, ImageProvider, Stage, TaskOutput,
};

// --- Domain Types ---
pub use crate::types::{ApiKey, Topic};

// --- Agents and LLM Runtime ---
pub use crate::agents::{
    profile_for, AgentProfile, StageTask, TaskCatalog, TaskVariables, CONTENT_REVIEWER,
    CONTENT_WRITER, RESEARCH_SPECIALIST, VISUAL_STRATEGIST,
};
pub use crate::llm::{system_instruction, task_message, AgentRuntime, GeminiRuntime};

// --- Text Extraction ---
pub use crate::extraction::{
    extract_captions, extract_hashtags, extract_hashtags_limited, extract_long_caption,
    extract_short_caption, fallback_image_prompts, parse_image_prompts,
};

// --- Images ---
pub use crate::images::{
    image_filename, save_images, ImageBackend, ImageGenerator, NanoBananaBackend,
    PollinationsBackend, SegmindBackend, StabilityBackend,
};

// --- Output ---
pub use crate::output::{result_filename, sanitize_topic, write_result};

// --- Pipeline ---
pub use crate::pipeline::{
    ContentAuthoring, ContentCrew, ContentRun, ImageProduction, ProducedImages,
    ResultPersistence, StageOutputs,
};

// --- Constants ---
pub use crate::constants::{
    DEFAULT_IMAGES_DIR, DEFAULT_RESULTS_DIR, IMAGE_PROMPT_COUNT, INSTAGRAM_MAX_HASHTAGS,
    SHORT_CAPTION_PLACEHOLDER,
};
