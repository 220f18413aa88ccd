// src/agents/tasks.rs
//! Task templates for the four LLM stages, rendered with Handlebars.
//!
//! The writing template asks for literal `SHORT CAPTION` and `LONG CAPTION`
//! labels; caption extraction depends on the review stage keeping them.

use super::profiles::{profile_for, AgentProfile};
use crate::config::PipelineConfig;
use crate::constants::SHORT_CAPTION_MAX_CHARS;
use crate::error::AppError;
use crate::model::Stage;
use crate::types::Topic;
use handlebars::Handlebars;
use serde::Serialize;

const RESEARCH_TEMPLATE: &str = r#"Research the topic: "{{topic}}"

Your research should include:
1. Key facts and statistics about the topic
2. Current trends and developments
3. Interesting insights or perspectives
4. Relevant examples or case studies
5. Data points that would be engaging for Instagram audiences

Focus on information that is:
- Visually interesting
- Shareable and engaging
- Relevant to current conversations
- Easy to understand in social media format

Provide a comprehensive research summary with clear sections and bullet points."#;

const WRITING_TEMPLATE: &str = r#"Using the research provided, create Instagram content about "{{topic}}" including:

1. SHORT CAPTION (under {{short_caption_max}} characters):
   - Hook that grabs attention
   - Key message or insight
   - Call-to-action

2. LONG CAPTION (under {{max_caption_length}} characters):
   - Engaging opening line
   - Story or detailed explanation
   - Key points from research
   - Call-to-action
   - Relevant hashtags (up to {{hashtag_limit}})

3. HASHTAG STRATEGY:
   - 5-10 trending hashtags
   - 5-10 niche-specific hashtags
   - 5-10 branded or general hashtags

Make sure the content is engaging, easy to read, optimized for Instagram's algorithm,
includes clear calls-to-action and uses emojis appropriately."#;

const REVIEW_TEMPLATE: &str = r#"Review and edit the Instagram content provided. Focus on:

1. GRAMMAR AND CLARITY: fix grammatical errors, improve sentence structure, ensure flow.
2. TONE AND VOICE: keep a consistent, engaging tone aligned with the brand voice.
3. ENGAGEMENT OPTIMIZATION: strengthen hooks, improve calls-to-action, optimize hashtags.
4. LENGTH AND FORMAT:
   - Short caption under {{short_caption_max}} characters, long caption under {{max_caption_length}} characters
   - Hashtag count at most {{hashtag_limit}}
   - Keep the "SHORT CAPTION" and "LONG CAPTION" labels, each on its own line

Provide the final polished content with any improvements made."#;

const IMAGE_PROMPT_TEMPLATE: &str = r#"Create 3 detailed image prompts for the topic: "{{topic}}"

Each prompt should be:
1. VISUALLY COMPELLING: images that stop users from scrolling
2. INSTAGRAM-OPTIMIZED: square format, high contrast, engaging composition
3. TOPIC-RELEVANT: directly related to the content and message
4. DETAILED: specific visual elements, lighting, mood, style
5. DIVERSE: each prompt offers a different visual perspective

Consider the main subject and composition, lighting and mood, color palette, style
(photography, illustration, etc.), background and setting, and text overlay possibilities.

Write each prompt on a single line as a detailed description usable with any text-to-image AI."#;

const RESEARCH_OUTPUT: &str = "A detailed research summary with key facts, trends, and insights \
about the topic, formatted for easy consumption by content creators.";

const WRITING_OUTPUT: &str =
    "Complete Instagram content package with short caption, long caption, and hashtag strategy.";

const REVIEW_OUTPUT: &str = "Final polished Instagram content with all improvements applied.";

const IMAGE_PROMPT_OUTPUT: &str = "Three detailed image prompts optimized for Instagram content, \
each offering a unique visual perspective on the topic.";

/// Stage, template, declared output and context dependencies, in run order.
const TASK_TABLE: [(Stage, &str, &str, &[Stage]); 4] = [
    (Stage::Research, RESEARCH_TEMPLATE, RESEARCH_OUTPUT, &[]),
    (Stage::Writing, WRITING_TEMPLATE, WRITING_OUTPUT, &[Stage::Research]),
    (Stage::Review, REVIEW_TEMPLATE, REVIEW_OUTPUT, &[Stage::Writing]),
    (Stage::ImagePrompting, IMAGE_PROMPT_TEMPLATE, IMAGE_PROMPT_OUTPUT, &[]),
];

/// Values substituted into every task template.
#[derive(Debug, Clone, Serialize)]
pub struct TaskVariables {
    pub topic: String,
    pub short_caption_max: u32,
    pub max_caption_length: u32,
    pub hashtag_limit: usize,
}

impl TaskVariables {
    pub fn new(topic: &Topic, config: &PipelineConfig) -> Self {
        Self {
            topic: topic.as_str().to_string(),
            short_caption_max: SHORT_CAPTION_MAX_CHARS,
            max_caption_length: config.max_caption_length,
            hashtag_limit: config.hashtag_limit,
        }
    }
}

/// A fully rendered task, ready for the agent runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTask {
    pub stage: Stage,
    pub agent: AgentProfile,
    pub description: String,
    pub expected_output: &'static str,
    /// Stages whose output is handed to this task as context.
    pub context: &'static [Stage],
}

/// The four task templates, registered once.
pub struct TaskCatalog {
    registry: Handlebars<'static>,
}

impl TaskCatalog {
    pub fn new() -> Result<Self, AppError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);

        for (stage, template, _, _) in TASK_TABLE {
            registry
                .register_template_string(stage.as_str(), template)
                .map_err(|e| AppError::TemplateRenderError {
                    name: stage.to_string(),
                    message: e.to_string(),
                })?;
        }

        Ok(Self { registry })
    }

    /// Renders the four tasks, in run order.
    pub fn render(&self, vars: &TaskVariables) -> Result<Vec<StageTask>, AppError> {
        TASK_TABLE
            .iter()
            .map(|&(stage, _, expected_output, context)| {
                let description = self.registry.render(stage.as_str(), vars).map_err(|e| {
                    AppError::TemplateRenderError {
                        name: stage.to_string(),
                        message: e.to_string(),
                    }
                })?;
                let agent = *profile_for(stage).ok_or_else(|| AppError::InternalError {
                    message: format!("no agent profile for stage {}", stage),
                    source: None,
                })?;

                Ok(StageTask {
                    stage,
                    agent,
                    description,
                    expected_output,
                    context,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(topic: &str) -> TaskVariables {
        TaskVariables::new(&Topic::new(topic).unwrap(), &PipelineConfig::default())
    }

    fn render(topic: &str) -> Vec<StageTask> {
        TaskCatalog::new().unwrap().render(&vars(topic)).unwrap()
    }

    #[test]
    fn test_tasks_in_fixed_order_with_context() {
        let tasks = render("Digital Nomad Lifestyle");
        let order: Vec<_> = tasks.iter().map(|t| t.stage).collect();
        assert_eq!(
            order,
            vec![Stage::Research, Stage::Writing, Stage::Review, Stage::ImagePrompting]
        );
        assert!(tasks[0].context.is_empty());
        assert_eq!(tasks[1].context, &[Stage::Research]);
        assert_eq!(tasks[2].context, &[Stage::Writing]);
        assert!(tasks[3].context.is_empty());
    }

    #[test]
    fn test_topic_is_not_html_escaped() {
        let tasks = render(r#"R&D: "<Labs>""#);
        assert!(tasks[0]
            .description
            .starts_with(r#"Research the topic: "R&D: "<Labs>"""#));
        assert!(tasks[3].description.contains(r#"R&D: "<Labs>""#));
    }

    #[test]
    fn test_limits_flow_into_writing_and_review() {
        let vars = TaskVariables {
            hashtag_limit: 12,
            max_caption_length: 1000,
            ..vars("Sustainable Fashion")
        };
        let tasks = TaskCatalog::new().unwrap().render(&vars).unwrap();
        assert!(tasks[1].description.contains("SHORT CAPTION (under 150 characters)"));
        assert!(tasks[1].description.contains("LONG CAPTION (under 1000 characters)"));
        assert!(tasks[1].description.contains("Relevant hashtags (up to 12)"));
        assert!(tasks[2].description.contains("Hashtag count at most 12"));
    }

    #[test]
    fn test_each_stage_has_its_persona() {
        let tasks = render("AI in Healthcare");
        let roles: Vec<_> = tasks.iter().map(|t| t.agent.role).collect();
        assert_eq!(
            roles,
            vec![
                "Research Specialist",
                "Instagram Content Writer",
                "Content Reviewer and Editor",
                "Visual Content Strategist"
            ]
        );
    }
}
