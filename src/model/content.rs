use super::GeneratedImage;
use crate::types::Topic;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;

/// Captions and hashtags scraped from the review stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptionSet {
    pub short_caption: String,
    pub long_caption: String,
    /// At most 30 entries, each starting with `#`.
    pub hashtags: Vec<String>,
}

/// The persisted artifact of one run.
#[derive(Debug, Clone, Serialize)]
pub struct ContentResult {
    pub topic: Topic,
    pub created_at: DateTime<Local>,
    pub research: String,
    pub content: CaptionSet,
    /// Always exactly three prompts.
    pub image_prompts: Vec<String>,
    pub generated_images: Vec<GeneratedImage>,
    pub saved_image_paths: Vec<PathBuf>,
}

impl ContentResult {
    /// Images whose generation request failed.
    pub fn failed_images(&self) -> impl Iterator<Item = &GeneratedImage> {
        self.generated_images.iter().filter(|img| img.is_error())
    }
}
