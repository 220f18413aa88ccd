//! Agent personas and task definitions for the four LLM stages.
//!
//! The "crew" is a fixed, ordered list of tasks. Each task names the stages
//! whose output it receives as context; nothing is delegated dynamically.

mod profiles;
mod tasks;

pub use profiles::{
    profile_for, AgentProfile, CONTENT_REVIEWER, CONTENT_WRITER, RESEARCH_SPECIALIST,
    VISUAL_STRATEGIST,
};
pub use tasks::{StageTask, TaskCatalog, TaskVariables};
