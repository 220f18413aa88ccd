use insta_content_crew::{
    extract_captions, extract_hashtags, extract_long_caption, extract_short_caption,
    fallback_image_prompts, parse_image_prompts, result_filename, sanitize_topic,
    SHORT_CAPTION_PLACEHOLDER,
};
use pretty_assertions::assert_eq;

#[test]
fn test_hashtags_never_exceed_instagram_limit() {
    let text = (0..75).map(|i| format!("#tag{} word", i)).collect::<Vec<_>>().join(" ");
    let tags = extract_hashtags(&text);
    assert_eq!(tags.len(), 30);
    assert!(tags.iter().all(|t| t.starts_with('#') && t.len() > 1));
    assert_eq!(tags.first().map(String::as_str), Some("#tag0"));
    assert_eq!(tags.last().map(String::as_str), Some("#tag29"));
}

#[test]
fn test_lone_hash_is_not_a_hashtag() {
    assert_eq!(extract_hashtags("# heading #real #"), vec!["#real"]);
}

#[test]
fn test_image_prompts_always_three() {
    let topic = "Digital Nomad Lifestyle";
    let fifty = (1..=50)
        .map(|i| format!("{}. Laptop on a beach hut table, scene number {}", i, i))
        .collect::<Vec<_>>()
        .join("\n");
    let one = "- A wide shot of a coworking space in Lisbon at golden hour";

    for text in ["", one, fifty.as_str()] {
        assert_eq!(parse_image_prompts(text, topic).len(), 3);
    }

    let padded = parse_image_prompts(one, topic);
    assert_eq!(padded[0], "A wide shot of a coworking space in Lisbon at golden hour");
    assert_eq!(padded[1..], fallback_image_prompts(topic)[..2]);

    assert_eq!(
        parse_image_prompts(&fifty, topic)[2],
        "Laptop on a beach hut table, scene number 3"
    );
}

#[test]
fn test_short_lines_and_headings_are_not_prompts() {
    let text = "## Image Prompts\nShort line here\n• A bowl of ramen under soft window light";
    let prompts = parse_image_prompts(text, "Food");
    assert_eq!(prompts[0], "A bowl of ramen under soft window light");
    assert_eq!(prompts[1], fallback_image_prompts("Food")[0]);
}

#[test]
fn test_short_caption_skips_blank_lines() {
    assert_eq!(extract_short_caption("SHORT CAPTION\n\n\nHello world"), "Hello world");
    assert_eq!(extract_short_caption("short: \n  Hi there  "), "Hi there");
    assert_eq!(extract_short_caption("no markers"), SHORT_CAPTION_PLACEHOLDER);
}

#[test]
fn test_long_caption_without_marker_is_identity() {
    let text = "Just a paragraph.\n\n#tags #here";
    assert_eq!(extract_long_caption(text), text);
}

#[test]
fn test_captions_respect_hashtag_limit() {
    let review = "SHORT CAPTION\nHook\nLONG CAPTION\nStory\n#a #b #c #d";
    let set = extract_captions(review, 2);
    assert_eq!(set.short_caption, "Hook");
    assert_eq!(set.long_caption, "Story");
    assert_eq!(set.hashtags, vec!["#a", "#b"]);
}

#[test]
fn test_result_file_name_from_topic() {
    assert_eq!(sanitize_topic("AI: The Future?!"), "AI_The_Future");

    let at = chrono::DateTime::parse_from_rfc3339("2024-11-02T18:30:59+01:00").unwrap();
    assert_eq!(
        result_filename("AI: The Future?!", &at),
        "instagram_content_AI_The_Future_20241102_183059.json"
    );
}
