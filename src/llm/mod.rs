//! LLM execution: the seam between the fixed task list and a model service.
//!
//! Stages depend on [`AgentRuntime`], never on HTTP details, so the
//! orchestrator can be driven by a scripted runtime in tests.

mod gemini;
mod prompt;

pub use gemini::GeminiRuntime;
pub use prompt::{system_instruction, task_message};

use crate::agents::StageTask;
use crate::error::AppError;
use crate::model::TaskOutput;

/// The ability to run one task as one model call.
///
/// `context` holds the outputs of the stages the task depends on, in run
/// order. Implementations return the model's raw text.
#[async_trait::async_trait]
pub trait AgentRuntime: Send + Sync {
    async fn execute(&self, task: &StageTask, context: &[&TaskOutput]) -> Result<String, AppError>;
}
