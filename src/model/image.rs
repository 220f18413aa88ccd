use crate::types::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The external text-to-image backends a run can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageProvider {
    /// Key-based, returns hosted image URLs.
    NanoBanana,
    /// Key-based, returns base64 images.
    Segmind,
    /// Key-based, returns base64 artifacts.
    Stability,
    /// Keyless; images are addressed by a templated URL.
    Pollinations,
}

impl ImageProvider {
    pub const ALL: [ImageProvider; 4] = [
        ImageProvider::NanoBanana,
        ImageProvider::Segmind,
        ImageProvider::Stability,
        ImageProvider::Pollinations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NanoBanana => "nano_banana",
            Self::Segmind => "segmind",
            Self::Stability => "stability",
            Self::Pollinations => "pollinations",
        }
    }

    /// Name of the environment variable holding this provider's key.
    pub fn key_variable(&self) -> Option<&'static str> {
        match self {
            Self::NanoBanana => Some("NANO_BANANA_API_KEY"),
            Self::Segmind => Some("SEGMIND_API_KEY"),
            Self::Stability => Some("STABILITY_API_KEY"),
            Self::Pollinations => None,
        }
    }

    pub fn requires_key(&self) -> bool {
        self.key_variable().is_some()
    }
}

impl fmt::Display for ImageProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageProvider {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| ValidationError::UnknownProvider {
                name: s.to_string(),
                expected: Self::ALL.map(|p| p.as_str()).join(", "),
            })
    }
}

/// Where the pixels of a generated image live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePayload {
    Url(String),
    Base64(String),
}

/// One image request outcome: a payload on success, an error message on
/// failure. Serialized flat, e.g. `{"prompt": .., "url": .., "api": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedImage {
    pub prompt: String,
    #[serde(flatten)]
    pub payload: Option<ImagePayload>,
    #[serde(rename = "api")]
    pub provider: ImageProvider,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GeneratedImage {
    pub fn succeeded(prompt: &str, provider: ImageProvider, payload: ImagePayload) -> Self {
        Self {
            prompt: prompt.to_string(),
            payload: Some(payload),
            provider,
            error: None,
        }
    }

    pub fn failed(prompt: &str, provider: ImageProvider, error: impl Into<String>) -> Self {
        Self {
            prompt: prompt.to_string(),
            payload: None,
            provider,
            error: Some(error.into()),
        }
    }

    pub fn url(&self) -> Option<&str> {
        match &self.payload {
            Some(ImagePayload::Url(url)) => Some(url),
            _ => None,
        }
    }

    pub fn base64(&self) -> Option<&str> {
        match &self.payload {
            Some(ImagePayload::Base64(data)) => Some(data),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
