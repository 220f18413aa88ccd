// src/llm/prompt.rs
//! Turns a persona and a rendered task into the two messages a model sees.

use crate::agents::{AgentProfile, StageTask};
use crate::model::TaskOutput;

/// System instruction built from the agent persona.
pub fn system_instruction(agent: &AgentProfile) -> String {
    format!(
        "You are {}. {}\nYour personal goal is: {}",
        agent.role, agent.backstory, agent.goal
    )
}

/// User message: the task, its output contract and any upstream context.
pub fn task_message(task: &StageTask, context: &[&TaskOutput]) -> String {
    let mut message = format!(
        "Current Task: {}\n\nThis is the expected criteria for your final answer: {}\n\
         You MUST return the actual complete content as the final answer, not a summary.",
        task.description.trim(),
        task.expected_output
    );

    if !context.is_empty() {
        let joined = context
            .iter()
            .map(|output| output.as_str().trim())
            .collect::<Vec<_>>()
            .join("\n\n----------\n\n");
        message.push_str("\n\nThis is the context you're working with:\n");
        message.push_str(&joined);
    }

    message.push_str("\n\nBegin!");
    message
}
