mod config;
mod process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;

use mdlift_core::Recognizer;
use mdlift_understanding::OcrService;

use config::Config;
use process::process_content;

#[derive(Parser)]
#[command(name = "mdlift")]
#[command(about = "mdlift — OCR Markdown image uploads into plain text")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// OCR every image referenced by a content blob and substitute the text
    Process {
        /// Content blob, usually a JSON envelope with a `content` field
        content_json: String,
        /// Project root; uploads are resolved under `<project_path>/public`
        project_path: String,
    },
    /// Recognize a single image file
    Single {
        /// Upload path or file path of the image
        image_path: String,
    },
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // Structured logging goes to stderr; stdout carries exactly one JSON
    // object for the host pipeline to parse.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            println!("{}", json!({ "error": err.to_string() }));
            std::process::exit(1);
        }
    };

    let recognizer = OcrService::new(
        &config.api_base,
        config.zhipuai_api_key.clone(),
        &config.model,
    );

    let result = match cli.command {
        Commands::Process {
            content_json,
            project_path,
        } => run_process(&recognizer, &content_json, &project_path).await,
        Commands::Single { image_path } => run_single(&recognizer, &image_path).await,
    };

    let output = match result {
        Ok(value) => value,
        Err(err) => json!({ "success": false, "error": format!("{:#}", err) }),
    };

    println!("{}", output);
    let success = output
        .get("success")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    std::process::exit(if success { 0 } else { 1 });
}

async fn run_process(
    recognizer: &dyn Recognizer,
    content_json: &str,
    project_path: &str,
) -> Result<serde_json::Value> {
    std::env::set_current_dir(project_path)
        .map_err(|e| anyhow::anyhow!("cannot enter project path {}: {}", project_path, e))?;
    info!(path = %project_path, "Processing content blob");
    let report = process_content(recognizer, content_json).await;
    Ok(serde_json::to_value(report)?)
}

async fn run_single(recognizer: &dyn Recognizer, image_path: &str) -> Result<serde_json::Value> {
    match recognizer.recognize(image_path).await {
        Ok(text) => Ok(json!({ "success": true, "text": text })),
        Err(err) => Ok(json!({ "success": false, "error": format!("{:#}", err) })),
    }
}
