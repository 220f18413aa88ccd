use serde::Serialize;
use std::fmt;

/// Position of a run in the fixed content pipeline.
///
/// The order is total and never branches:
/// `Idle → Research → Writing → Review → ImagePrompting → ImageGeneration
/// → Persisted → Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Idle,
    Research,
    Writing,
    Review,
    ImagePrompting,
    ImageGeneration,
    Persisted,
    Done,
}

impl Stage {
    /// The stage that follows this one, `None` once the run is done.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Idle => Some(Stage::Research),
            Stage::Research => Some(Stage::Writing),
            Stage::Writing => Some(Stage::Review),
            Stage::Review => Some(Stage::ImagePrompting),
            Stage::ImagePrompting => Some(Stage::ImageGeneration),
            Stage::ImageGeneration => Some(Stage::Persisted),
            Stage::Persisted => Some(Stage::Done),
            Stage::Done => None,
        }
    }

    /// Whether this stage is executed by the agent runtime.
    pub fn is_llm_stage(self) -> bool {
        matches!(
            self,
            Stage::Research | Stage::Writing | Stage::Review | Stage::ImagePrompting
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Research => "research",
            Stage::Writing => "writing",
            Stage::Review => "review",
            Stage::ImagePrompting => "image_prompting",
            Stage::ImageGeneration => "image_generation",
            Stage::Persisted => "persisted",
            Stage::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw text an LLM stage produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutput {
    pub stage: Stage,
    pub text: String,
}

impl TaskOutput {
    pub fn new(stage: Stage, text: impl Into<String>) -> Self {
        Self {
            stage,
            text: text.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}
