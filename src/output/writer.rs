//! Writes the run artifact to disk.

use super::paths::result_filename;
use crate::error::AppError;
use crate::model::ContentResult;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes `result` as indented JSON into `dir`, creating it if needed.
///
/// Returns the path of the written file.
pub fn write_result(result: &ContentResult, dir: &Path) -> Result<PathBuf, AppError> {
    fs::create_dir_all(dir)?;

    let path = dir.join(result_filename(result.topic.as_str(), &result.created_at));
    let json = serde_json::to_string_pretty(result)?;

    log::debug!("Writing {} bytes to {}", json.len(), path.display());
    fs::write(&path, json)?;
    log::info!("Results saved to: {}", path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CaptionSet, GeneratedImage, ImagePayload, ImageProvider};
    use crate::types::Topic;
    use chrono::Local;

    fn sample() -> ContentResult {
        ContentResult {
            topic: Topic::new("AI: The Future?!").unwrap(),
            created_at: Local::now(),
            research: "Notes".to_string(),
            content: CaptionSet {
                short_caption: "Short".to_string(),
                long_caption: "Long".to_string(),
                hashtags: vec!["#ai".to_string()],
            },
            image_prompts: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            generated_images: vec![
                GeneratedImage::succeeded(
                    "a",
                    ImageProvider::Pollinations,
                    ImagePayload::Url("https://image.test/a".to_string()),
                ),
                GeneratedImage::failed("b", ImageProvider::Pollinations, "boom"),
            ],
            saved_image_paths: vec![],
        }
    }

    #[test]
    fn test_writes_pretty_json_into_new_directory() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("results");

        let path = write_result(&sample(), &dir).unwrap();

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("instagram_content_AI_The_Future_"));
        assert!(name.ends_with(".json"));

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"topic\": \"AI: The Future?!\""));

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["content"]["hashtags"][0], "#ai");
        assert_eq!(value["generated_images"][0]["url"], "https://image.test/a");
        assert_eq!(value["generated_images"][0]["api"], "pollinations");
        assert_eq!(value["generated_images"][1]["error"], "boom");
        assert!(value["generated_images"][1].get("url").is_none());
    }
}
