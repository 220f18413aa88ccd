// src/llm/gemini.rs
//! Thin client for the Gemini `generateContent` endpoint.
//!
//! One call per task, no streaming, no tools. Authentication uses the
//! `x-goog-api-key` header set once on the client's default headers.

use super::prompt::{system_instruction, task_message};
use super::AgentRuntime;
use crate::agents::StageTask;
use crate::config::PipelineConfig;
use crate::constants::{ERROR_BODY_PREVIEW_LENGTH, GEMINI_API_BASE_URL};
use crate::error::{AppError, ServiceFailureKind};
use crate::model::TaskOutput;
use crate::types::ApiKey;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Runs stage tasks against a Gemini model.
#[derive(Clone)]
pub struct GeminiRuntime {
    client: Client,
    model: String,
    temperature: f32,
    base_url: String,
}

impl GeminiRuntime {
    /// Creates a runtime with the configured key, model and temperature.
    ///
    /// The client is built with its own default headers, so no key ever
    /// leaks into the shared image-download client.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, AppError> {
        let mut builder = Client::builder().default_headers(Self::create_headers(&config.llm_api_key)?);
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            model: config.llm_model.clone(),
            temperature: config.llm_temperature,
            base_url: GEMINI_API_BASE_URL.to_string(),
        })
    }

    /// Points the runtime at another API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let mut key = header::HeaderValue::from_str(api_key.as_str()).map_err(|e| {
            AppError::MissingConfiguration(format!("Invalid API key format: {}", e))
        })?;
        key.set_sensitive(true);
        headers.insert("x-goog-api-key", key);

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Concatenates the text parts of the first candidate.
fn completion_text(stage: &str, response: GenerateContentResponse) -> Result<String, AppError> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(AppError::LlmService {
            stage: stage.to_string(),
            kind: ServiceFailureKind::Blocked,
            message: reason,
        });
    }

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AppError::LlmService {
            stage: stage.to_string(),
            kind: ServiceFailureKind::EmptyCompletion,
            message: "model returned no text".to_string(),
        });
    }

    Ok(text)
}

#[async_trait::async_trait]
impl AgentRuntime for GeminiRuntime {
    async fn execute(&self, task: &StageTask, context: &[&TaskOutput]) -> Result<String, AppError> {
        let system = system_instruction(&task.agent);
        let message = task_message(task, context);
        let request = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![TextPart { text: &system }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![TextPart { text: &message }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        let url = self.endpoint();
        log::debug!("POST {} ({} stage, {} chars)", url, task.stage, message.len());

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect());
            return Err(AppError::LlmService {
                stage: task.stage.to_string(),
                kind: ServiceFailureKind::HttpStatus(status.as_u16()),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        completion_text(task.stage.as_str(), parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_joins_text_parts() {
        let response = parse(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hello "}, {"text": "world"}]},
                "finishReason": "STOP"
            }]
        }));
        assert_eq!(completion_text("research", response).unwrap(), "Hello world");
    }

    #[test]
    fn test_blocked_prompt() {
        let response = parse(json!({"promptFeedback": {"blockReason": "SAFETY"}}));
        let err = completion_text("review", response).unwrap_err();
        assert!(matches!(
            err,
            AppError::LlmService { kind: ServiceFailureKind::Blocked, ref message, .. } if message == "SAFETY"
        ));
    }

    #[test]
    fn test_empty_completion() {
        let response = parse(json!({"candidates": [{"content": {"parts": []}}]}));
        assert!(matches!(
            completion_text("writing", response),
            Err(AppError::LlmService { kind: ServiceFailureKind::EmptyCompletion, .. })
        ));
        assert!(completion_text("writing", parse(json!({}))).is_err());
    }

    #[test]
    fn test_request_shape() {
        let request = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![TextPart { text: "sys" }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![TextPart { text: "hi" }],
            }],
            generation_config: GenerationConfig { temperature: 0.5 },
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "systemInstruction": {"parts": [{"text": "sys"}]},
                "contents": [{"role": "user", "parts": [{"text": "hi"}]}],
                "generationConfig": {"temperature": 0.5}
            })
        );
    }

    #[test]
    fn test_endpoint() {
        let runtime = GeminiRuntime::from_config(&PipelineConfig::default())
            .unwrap()
            .with_base_url("http://localhost:8080/v1beta/");
        assert_eq!(
            runtime.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }
}
