use insta_content_crew::{
    AgentRuntime, AppError, ContentCrew, ImageGenerator, ImageProvider, PipelineConfig,
    ServiceFailureKind, Stage, StageTask, TaskOutput, Topic,
};
use pretty_assertions::assert_eq;
use std::path::Path;
use std::sync::{Arc, Mutex};

const REVIEW: &str = "\
Here is the polished content.

SHORT CAPTION:

Charge ahead, the EV era is here ⚡

LONG CAPTION:
#Preview
The road ahead is electric.
Batteries are cheaper than ever.
#ElectricCars #EVs #Future
";

const IMAGE_PROMPTS: &str = "\
# Prompts
1. A sleek electric car charging at sunset, golden light, square format
2. Close-up of a glowing battery pack, blue tones, studio lighting
";

/// Returns canned text per stage and records the context each call received.
struct ScriptedRuntime {
    fail_at: Option<Stage>,
    calls: Mutex<Vec<(Stage, Vec<String>)>>,
}

impl ScriptedRuntime {
    fn new(fail_at: Option<Stage>) -> Arc<Self> {
        Arc::new(Self {
            fail_at,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(Stage, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl AgentRuntime for ScriptedRuntime {
    async fn execute(&self, task: &StageTask, context: &[&TaskOutput]) -> Result<String, AppError> {
        self.calls.lock().unwrap().push((
            task.stage,
            context.iter().map(|c| c.as_str().to_string()).collect(),
        ));

        if self.fail_at == Some(task.stage) {
            return Err(AppError::LlmService {
                stage: task.stage.to_string(),
                kind: ServiceFailureKind::HttpStatus(503),
                message: "model overloaded".to_string(),
            });
        }

        Ok(match task.stage {
            Stage::Research => "Research: EV sales doubled since 2021.".to_string(),
            Stage::Writing => "Draft captions about electric cars.".to_string(),
            Stage::Review => REVIEW.to_string(),
            Stage::ImagePrompting => IMAGE_PROMPTS.to_string(),
            other => format!("unexpected stage {}", other),
        })
    }
}

fn crew(runtime: Arc<ScriptedRuntime>, results_dir: &Path) -> ContentCrew {
    let config = PipelineConfig {
        results_dir: results_dir.to_path_buf(),
        save_images: false,
        ..PipelineConfig::default()
    };
    let images = ImageGenerator::from_config(&config, reqwest::Client::new()).unwrap();
    ContentCrew::new(config, runtime, images).unwrap()
}

#[tokio::test]
async fn test_full_run_writes_result_file() {
    let temp = tempfile::tempdir().unwrap();
    let results_dir = temp.path().join("results");
    let runtime = ScriptedRuntime::new(None);
    let crew = crew(runtime.clone(), &results_dir);

    let run = crew
        .create_content(&Topic::new("The Future of Electric Cars").unwrap())
        .await
        .unwrap();

    let result = &run.result;
    assert_eq!(result.research, "Research: EV sales doubled since 2021.");
    assert_eq!(result.content.short_caption, "Charge ahead, the EV era is here ⚡");
    assert_eq!(
        result.content.long_caption,
        "The road ahead is electric.\nBatteries are cheaper than ever."
    );
    assert_eq!(
        result.content.hashtags,
        vec!["#Preview", "#ElectricCars", "#EVs", "#Future"]
    );
    assert_eq!(
        result.image_prompts,
        vec![
            "A sleek electric car charging at sunset, golden light, square format",
            "Close-up of a glowing battery pack, blue tones, studio lighting",
            "Professional Instagram post about The Future of Electric Cars, modern design, high quality",
        ]
    );

    assert_eq!(result.generated_images.len(), 3);
    assert!(result
        .generated_images
        .iter()
        .all(|img| img.provider == ImageProvider::Pollinations && img.url().is_some()));
    assert!(result.saved_image_paths.is_empty());

    assert_eq!(run.result_file.parent(), Some(results_dir.as_path()));
    let name = run.result_file.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("instagram_content_The_Future_of_Electric_Cars_"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&run.result_file).unwrap()).unwrap();
    assert_eq!(json["topic"], "The Future of Electric Cars");
    assert_eq!(json["image_prompts"].as_array().unwrap().len(), 3);
    assert_eq!(json["generated_images"][0]["api"], "pollinations");
    assert!(json["created_at"].is_string());
}

#[tokio::test]
async fn test_context_flows_along_declared_dependencies() {
    let temp = tempfile::tempdir().unwrap();
    let runtime = ScriptedRuntime::new(None);
    let crew = crew(runtime.clone(), temp.path());

    crew.create_content(&Topic::new("Sustainable Fashion").unwrap())
        .await
        .unwrap();

    assert_eq!(
        runtime.calls(),
        vec![
            (Stage::Research, vec![]),
            (
                Stage::Writing,
                vec!["Research: EV sales doubled since 2021.".to_string()]
            ),
            (
                Stage::Review,
                vec!["Draft captions about electric cars.".to_string()]
            ),
            (Stage::ImagePrompting, vec![]),
        ]
    );
    assert_eq!(crew.trace().last(), Some(&Stage::Done));
}

#[tokio::test]
async fn test_llm_failure_aborts_without_writing() {
    let temp = tempfile::tempdir().unwrap();
    let results_dir = temp.path().join("results");
    let runtime = ScriptedRuntime::new(Some(Stage::Review));
    let crew = crew(runtime.clone(), &results_dir);

    let err = crew
        .create_content(&Topic::new("AI in Healthcare").unwrap())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("model overloaded"));
    assert!(!results_dir.exists());
    assert_eq!(
        crew.trace(),
        vec![Stage::Idle, Stage::Research, Stage::Writing, Stage::Review]
    );
    assert_eq!(runtime.calls().len(), 3);
}

#[tokio::test]
async fn test_each_run_starts_a_fresh_trace() {
    let temp = tempfile::tempdir().unwrap();
    let crew = crew(ScriptedRuntime::new(None), temp.path());
    let topic = Topic::new("Remote Work Productivity").unwrap();

    crew.create_content(&topic).await.unwrap();
    crew.create_content(&topic).await.unwrap();

    let trace = crew.trace();
    assert_eq!(trace.len(), 8);
    assert_eq!(trace.first(), Some(&Stage::Idle));
}
