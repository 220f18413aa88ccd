// src/extraction.rs
//! Scrapes structured fields out of free-form stage output.
//!
//! The review stage is asked to label its captions with literal markers
//! (`SHORT CAPTION`, `LONG CAPTION`) and the image-prompt stage to write one
//! prompt per line. These functions read exactly that and nothing more; when
//! the markers are missing they fall back to fixed values instead of failing.

use crate::constants::{
    IMAGE_PROMPT_COUNT, IMAGE_PROMPT_ENUMERATION_CHARS, IMAGE_PROMPT_MIN_CHARS,
    INSTAGRAM_MAX_HASHTAGS, SHORT_CAPTION_PLACEHOLDER,
};
use crate::model::CaptionSet;

const SHORT_MARKERS: [&str; 2] = ["SHORT CAPTION", "SHORT:"];
const LONG_MARKERS: [&str; 2] = ["LONG CAPTION", "LONG:"];

fn has_marker(line: &str, markers: &[&str]) -> bool {
    let upper = line.to_uppercase();
    markers.iter().any(|m| upper.contains(m))
}

/// Returns the first non-blank line after a short caption marker.
///
/// Falls back to a fixed placeholder when no marker is followed by text.
pub fn extract_short_caption(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();

    for (idx, line) in lines.iter().enumerate() {
        if !has_marker(line, &SHORT_MARKERS) {
            continue;
        }
        if let Some(caption) = lines[idx + 1..]
            .iter()
            .map(|l| l.trim())
            .find(|l| !l.is_empty())
        {
            return caption.to_string();
        }
    }

    SHORT_CAPTION_PLACEHOLDER.to_string()
}

/// Collects the lines following the first long caption marker.
///
/// Blank lines are skipped. Hashtag lines (starting with `#`) are skipped
/// until the first caption line is collected, after which the next one ends
/// the caption. Without a marker the text is returned unchanged.
pub fn extract_long_caption(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();

    let Some(start) = lines.iter().position(|l| has_marker(l, &LONG_MARKERS)) else {
        return text.to_string();
    };

    let mut caption_lines: Vec<&str> = Vec::new();
    for line in lines[start + 1..].iter().map(|l| l.trim()) {
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            if caption_lines.is_empty() {
                continue;
            }
            break;
        }
        caption_lines.push(line);
    }

    caption_lines.join("\n")
}

/// Every whitespace-separated `#tag` in order, capped at 30.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    extract_hashtags_limited(text, INSTAGRAM_MAX_HASHTAGS)
}

/// Like [`extract_hashtags`] with a lower cap. The cap never exceeds 30.
pub fn extract_hashtags_limited(text: &str, limit: usize) -> Vec<String> {
    text.split_whitespace()
        .filter(|token| token.starts_with('#') && token.chars().count() > 1)
        .take(limit.min(INSTAGRAM_MAX_HASHTAGS))
        .map(str::to_string)
        .collect()
}

/// Parses exactly three image prompts from the image-prompt stage output.
///
/// Keeps lines longer than 20 characters that are not headings, strips
/// leading enumeration, and pads with topic fallbacks when fewer than three
/// survive.
pub fn parse_image_prompts(text: &str, topic: &str) -> Vec<String> {
    let mut prompts: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| {
            !line.is_empty()
                && !line.starts_with('#')
                && line.chars().count() > IMAGE_PROMPT_MIN_CHARS
        })
        .map(|line| {
            line.trim_start_matches(IMAGE_PROMPT_ENUMERATION_CHARS)
                .trim()
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect();

    if prompts.len() < IMAGE_PROMPT_COUNT {
        prompts.extend(fallback_image_prompts(topic));
    }

    prompts.truncate(IMAGE_PROMPT_COUNT);
    prompts
}

/// The three generic prompts used when the stage output is unusable.
pub fn fallback_image_prompts(topic: &str) -> [String; IMAGE_PROMPT_COUNT] {
    [
        format!("Professional Instagram post about {topic}, modern design, high quality"),
        format!("Engaging social media visual for {topic}, vibrant colors, square format"),
        format!("Creative illustration representing {topic}, clean background, Instagram ready"),
    ]
}

/// Scrapes captions and hashtags from the review stage output.
pub fn extract_captions(review: &str, hashtag_limit: usize) -> CaptionSet {
    CaptionSet {
        short_caption: extract_short_caption(review),
        long_caption: extract_long_caption(review),
        hashtags: extract_hashtags_limited(review, hashtag_limit),
    }
}
