// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// API key for an external service (LLM or image provider).
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new API key with validation
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into().trim().to_string();

        if key.is_empty() {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot be empty".to_string(),
            });
        }

        if key.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot contain whitespace".to_string(),
            });
        }

        Ok(Self(key))
    }

    /// Get the API key as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact API key in display
        let visible: String = self.0.chars().take(4).collect();
        write!(f, "{}...", visible)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self)
    }
}

/// The subject a content package is created for.
///
/// This is the whole of a content request: one topic per run, immutable once
/// accepted. Surrounding whitespace is dropped; a blank topic is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Topic(String);

impl Topic {
    pub fn new(topic: impl Into<String>) -> Result<Self, ValidationError> {
        let topic = topic.into().trim().to_string();
        if topic.is_empty() {
            return Err(ValidationError::EmptyField("topic"));
        }
        Ok(Self(topic))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_rejects_blank() {
        assert!(ApiKey::new("").is_err());
        assert!(ApiKey::new("   ").is_err());
        assert!(ApiKey::new("abc def").is_err());
    }

    #[test]
    fn test_api_key_display_is_redacted() {
        let key = ApiKey::new("AIzaSyExampleKey123").unwrap();
        assert_eq!(key.to_string(), "AIza...");
        assert_eq!(format!("{:?}", key), "ApiKey(AIza...)");
    }

    #[test]
    fn test_topic_is_trimmed() {
        let topic = Topic::new("  Sustainable Fashion \n").unwrap();
        assert_eq!(topic.as_str(), "Sustainable Fashion");
    }

    #[test]
    fn test_topic_rejects_blank() {
        assert!(matches!(
            Topic::new(" \t"),
            Err(ValidationError::EmptyField("topic"))
        ));
    }
}
