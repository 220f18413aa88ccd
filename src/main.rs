// src/main.rs

use clap::Parser;
use insta_content_crew::{
    AppError, CommandLineInput, ContentCrew, ContentRun, PipelineConfig, Topic,
};
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::io::{self, BufRead, Write};

const EXAMPLE_TOPICS: [&str; 5] = [
    "The Future of Electric Cars",
    "AI in Healthcare",
    "Digital Nomad Lifestyle",
    "Sustainable Fashion",
    "Remote Work Productivity",
];

const RULE_WIDTH: usize = 50;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("insta_content_crew.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Maps the menu answer to a topic: a number picks an example, blank picks
/// the first one, anything else is taken as the topic itself.
fn choose_topic(choice: &str) -> String {
    let choice = choice.trim();
    match choice.parse::<usize>() {
        Ok(n) if (1..=EXAMPLE_TOPICS.len()).contains(&n) => EXAMPLE_TOPICS[n - 1].to_string(),
        _ if choice.is_empty() => EXAMPLE_TOPICS[0].to_string(),
        _ => choice.to_string(),
    }
}

fn prompt_for_topic() -> io::Result<String> {
    println!("Available example topics:");
    for (i, topic) in EXAMPLE_TOPICS.iter().enumerate() {
        println!("{}. {}", i + 1, topic);
    }

    print!(
        "\nEnter topic number (1-{}) or type your own topic: ",
        EXAMPLE_TOPICS.len()
    );
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(choose_topic(&line))
}

fn print_summary(run: &ContentRun) {
    let result = &run.result;
    let rule = "=".repeat(RULE_WIDTH);

    println!("\n{}", rule);
    println!("FINAL INSTAGRAM CONTENT");
    println!("{}", rule);

    println!("\nSHORT CAPTION:");
    println!("{}", result.content.short_caption);

    println!("\nLONG CAPTION:");
    println!("{}", result.content.long_caption);

    println!("\nHASHTAGS:");
    println!("{}", result.content.hashtags.join(" "));

    println!("\nIMAGE PROMPTS:");
    for (i, prompt) in result.image_prompts.iter().enumerate() {
        println!("{}. {}", i + 1, prompt);
    }

    if !result.saved_image_paths.is_empty() {
        println!("\nSAVED IMAGES:");
        for path in &result.saved_image_paths {
            println!("  - {}", path.display());
        }
    }

    let failed = result.failed_images().count();
    if failed > 0 {
        println!(
            "\n⚠️  {} of {} image requests failed; see the result file for details.",
            failed,
            result.generated_images.len()
        );
    }

    println!("\nResults saved to: {}", run.result_file.display());
    println!("\nContent creation completed successfully!");
}

/// Resolves configuration, picks the topic and builds the crew.
///
/// Runs before the Ctrl-C handler is installed, so an interrupt while
/// typing the topic keeps its default behavior.
fn prepare(cli: CommandLineInput) -> Result<(ContentCrew, Topic), AppError> {
    let topic = cli.topic.clone();
    let config = PipelineConfig::resolve(cli)?;

    let topic = match topic {
        Some(topic) => topic,
        None => prompt_for_topic()?,
    };
    let topic = Topic::new(topic)?;
    println!("\nSelected topic: {}", topic);

    Ok((ContentCrew::from_config(config)?, topic))
}

fn report_error(e: &AppError) {
    log::debug!("Pipeline failed: {:?}", e);
    println!("\nError: {}", e);
    println!("Please check your API keys and try again");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    println!("Instagram Content Creation Multi-Agent System");
    println!("{}", "=".repeat(RULE_WIDTH));

    let (crew, topic) = match prepare(cli) {
        Ok(prepared) => prepared,
        Err(e) => {
            report_error(&e);
            return Ok(());
        }
    };

    tokio::select! {
        outcome = crew.create_content(&topic) => match outcome {
            Ok(run) => print_summary(&run),
            Err(e) => report_error(&e),
        },
        _ = tokio::signal::ctrl_c() => {
            println!("\n\nProcess interrupted by user");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choose_topic() {
        assert_eq!(choose_topic("2\n"), "AI in Healthcare");
        assert_eq!(choose_topic("5"), "Remote Work Productivity");
        assert_eq!(choose_topic("   \n"), "The Future of Electric Cars");
        assert_eq!(choose_topic("6"), "6");
        assert_eq!(choose_topic("0"), "0");
        assert_eq!(choose_topic(" Urban Gardening \n"), "Urban Gardening");
    }
}
