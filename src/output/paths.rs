//! Pure functions for result filename generation.

use crate::constants::{RESULT_FILE_PREFIX, RESULT_TIMESTAMP_FORMAT};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Reduces a topic to a filename component.
///
/// Keeps alphanumerics, spaces, hyphens and underscores, drops trailing
/// whitespace and turns the remaining spaces into underscores.
pub fn sanitize_topic(topic: &str) -> String {
    topic
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .trim_end()
        .replace(' ', "_")
}

/// `instagram_content_<topic>_<YYYYMMDD_HHMMSS>.json`
pub fn result_filename<Tz>(topic: &str, created_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{}_{}_{}.json",
        RESULT_FILE_PREFIX,
        sanitize_topic(topic),
        created_at.format(RESULT_TIMESTAMP_FORMAT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_sanitize_topic() {
        assert_eq!(sanitize_topic("AI: The Future?!"), "AI_The_Future");
        assert_eq!(sanitize_topic("Remote Work Productivity"), "Remote_Work_Productivity");
        assert_eq!(sanitize_topic("well-being_101   "), "well-being_101");
        assert_eq!(sanitize_topic("?!"), "");
    }

    #[test]
    fn test_leading_whitespace_is_kept() {
        assert_eq!(sanitize_topic(" Café "), "_Café");
    }

    #[test]
    fn test_result_filename() {
        let at = Utc.with_ymd_and_hms(2025, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(
            result_filename("AI in Healthcare", &at),
            "instagram_content_AI_in_Healthcare_20250307_090501.json"
        );
    }
}
