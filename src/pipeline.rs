// src/pipeline.rs
//! Pipeline capability traits and the orchestrator that runs them.
//!
//! A run walks the fixed stage order: the four LLM stages, then image
//! generation, then persistence. Each trait describes one capability so a
//! stage can be exercised in isolation.

use crate::agents::{TaskCatalog, TaskVariables};
use crate::config::PipelineConfig;
use crate::error::AppError;
use crate::extraction::{extract_captions, parse_image_prompts};
use crate::images::{GeneratedImage, ImageGenerator};
use crate::llm::{AgentRuntime, GeminiRuntime};
use crate::model::{ContentResult, Stage, TaskOutput};
use crate::output::write_result;
use crate::types::Topic;
use chrono::Local;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Produces the raw text of every LLM stage for a topic.
#[async_trait::async_trait]
pub trait ContentAuthoring {
    async fn author(&self, topic: &Topic) -> Result<StageOutputs, AppError>;
}

/// Turns image prompts into generated (and optionally saved) images.
#[async_trait::async_trait]
pub trait ImageProduction {
    async fn produce(&self, prompts: &[String]) -> Result<ProducedImages, AppError>;
}

/// Stores the finished artifact.
pub trait ResultPersistence {
    fn persist(&self, result: &ContentResult) -> Result<PathBuf, AppError>;
}

/// LLM outputs of one run, in stage order.
#[derive(Debug, Clone, Default)]
pub struct StageOutputs {
    outputs: Vec<TaskOutput>,
}

impl StageOutputs {
    pub fn get(&self, stage: Stage) -> Option<&TaskOutput> {
        self.outputs.iter().find(|output| output.stage == stage)
    }

    /// Text of `stage`, empty when the stage produced nothing.
    pub fn text(&self, stage: Stage) -> &str {
        self.get(stage).map(TaskOutput::as_str).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskOutput> {
        self.outputs.iter()
    }

    fn push(&mut self, output: TaskOutput) {
        self.outputs.push(output);
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProducedImages {
    pub generated: Vec<GeneratedImage>,
    pub saved_paths: Vec<PathBuf>,
}

/// A completed run: the artifact and where it was written.
#[derive(Debug, Clone)]
pub struct ContentRun {
    pub result: ContentResult,
    pub result_file: PathBuf,
}

/// Runs the fixed content pipeline for one topic at a time.
pub struct ContentCrew {
    config: PipelineConfig,
    runtime: Arc<dyn AgentRuntime>,
    images: ImageGenerator,
    catalog: TaskCatalog,
    trace: Mutex<Vec<Stage>>,
}

impl ContentCrew {
    /// Builds the crew around an explicit agent runtime and image generator.
    pub fn new(
        config: PipelineConfig,
        runtime: Arc<dyn AgentRuntime>,
        images: ImageGenerator,
    ) -> Result<Self, AppError> {
        Ok(Self {
            config,
            runtime,
            images,
            catalog: TaskCatalog::new()?,
            trace: Mutex::new(Vec::new()),
        })
    }

    /// Builds the Gemini runtime and the configured image provider.
    ///
    /// Fails when the selected image provider has no key.
    pub fn from_config(config: PipelineConfig) -> Result<Self, AppError> {
        let runtime = GeminiRuntime::from_config(&config)?;
        let images = ImageGenerator::from_config(&config, config.http_client()?)?;
        Self::new(config, Arc::new(runtime), images)
    }

    /// Stages entered by the latest run, in order.
    ///
    /// After a failure the last entry is the stage that failed.
    pub fn trace(&self) -> Vec<Stage> {
        self.trace
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Records `stage` in the trace.
    ///
    /// Entering `Idle` or `Research` starts a new trace, so each run (or each
    /// direct `author` call) owns its own. Any other out-of-order entry is
    /// logged and still recorded.
    fn enter(&self, stage: Stage) {
        let mut trace = self
            .trace
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let expected = trace.last().and_then(|s| s.next());
        match stage {
            Stage::Idle => trace.clear(),
            Stage::Research if expected != Some(Stage::Research) => trace.clear(),
            _ if expected.is_some_and(|next| next != stage) => {
                log::warn!(
                    "Stage {} entered after {}, expected {}",
                    stage,
                    trace.last().map_or("nothing", |s| s.as_str()),
                    expected.map_or("nothing", |s| s.as_str())
                );
            }
            _ => {}
        }

        trace.push(stage);
        log::info!("Stage: {}", stage);
    }

    /// Runs every stage for `topic` and writes the result file.
    ///
    /// An LLM failure aborts the run before anything is written. Image
    /// failures are recorded in the result instead.
    pub async fn create_content(&self, topic: &Topic) -> Result<ContentRun, AppError> {
        self.enter(Stage::Idle);
        log::info!("Starting Instagram content creation for: {}", topic);

        let outputs = self.author(topic).await?;

        let content = extract_captions(outputs.text(Stage::Review), self.config.hashtag_limit);
        let image_prompts = parse_image_prompts(outputs.text(Stage::ImagePrompting), topic.as_str());
        log::info!(
            "Extracted {} hashtags and {} image prompts",
            content.hashtags.len(),
            image_prompts.len()
        );

        let images = self.produce(&image_prompts).await?;

        let result = ContentResult {
            topic: topic.clone(),
            created_at: Local::now(),
            research: outputs.text(Stage::Research).to_string(),
            content,
            image_prompts,
            generated_images: images.generated,
            saved_image_paths: images.saved_paths,
        };

        let result_file = self.persist(&result)?;
        self.enter(Stage::Done);

        Ok(ContentRun {
            result,
            result_file,
        })
    }
}

#[async_trait::async_trait]
impl ContentAuthoring for ContentCrew {
    async fn author(&self, topic: &Topic) -> Result<StageOutputs, AppError> {
        let tasks = self.catalog.render(&TaskVariables::new(topic, &self.config))?;
        let mut outputs = StageOutputs::default();

        for task in &tasks {
            self.enter(task.stage);

            let context: Vec<&TaskOutput> = task
                .context
                .iter()
                .filter_map(|stage| outputs.get(*stage))
                .collect();
            let text = self.runtime.execute(task, &context).await?;
            log::info!("{} finished ({} chars)", task.agent.role, text.len());

            outputs.push(TaskOutput::new(task.stage, text));
        }

        Ok(outputs)
    }
}

#[async_trait::async_trait]
impl ImageProduction for ContentCrew {
    async fn produce(&self, prompts: &[String]) -> Result<ProducedImages, AppError> {
        self.enter(Stage::ImageGeneration);
        log::info!("Generating images using {} API...", self.images.provider());

        let generated = self
            .images
            .generate_images(prompts, self.config.images_per_prompt)
            .await;

        let saved_paths = if self.config.save_images {
            match self.images.save_images(&generated, &self.config.images_dir).await {
                Ok(paths) => paths,
                Err(e) => {
                    log::error!(
                        "Could not save images to {}: {}",
                        self.config.images_dir.display(),
                        e
                    );
                    Vec::new()
                }
            }
        } else {
            log::info!("Image saving disabled; keeping URLs and payloads only");
            Vec::new()
        };

        Ok(ProducedImages {
            generated,
            saved_paths,
        })
    }
}

impl ResultPersistence for ContentCrew {
    fn persist(&self, result: &ContentResult) -> Result<PathBuf, AppError> {
        self.enter(Stage::Persisted);
        write_result(result, &self.config.results_dir)
    }
}
