use std::{path::PathBuf, process::ExitCode};

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::*;
use gemini_vision::{logging, Config, GenerativeModel, DEFAULT_PROMPT};

/// Ask Gemini about an image.
#[derive(Debug, Parser)]
#[command(name = "gemini-vision", version, about)]
struct Cli {
    /// Path to a .jpg, .jpeg, .png, .gif or .webp file
    image: PathBuf,

    /// Question to send along with the image
    #[arg(short, long, default_value = DEFAULT_PROMPT)]
    prompt: String,

    /// Model identifier, overriding GEMINI_MODEL and the config file
    #[arg(short, long)]
    model: Option<String>,

    /// Log request details to stderr
    #[arg(short, long)]
    verbose: bool,
}

async fn run(cli: Cli) -> Result<()> {
    if !cli.image.exists() {
        bail!("Image file '{}' not found", cli.image.display());
    }

    let mut config = Config::load().context("failed to load configuration")?;
    if let Some(model) = cli.model {
        config.model = model;
    }
    let model = GenerativeModel::from_config(&config);

    println!("{} {}", "Analyzing image:".bright_blue(), cli.image.display());
    println!("{}", "Sending request to Gemini...".bright_black());

    let response = model
        .generate_content_with_image(&cli.image, cli.prompt)
        .await?;

    println!("\n{}", "=== Gemini Response ===".bright_green().bold());
    println!("{}", response.text());
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    logging::init(logging::level(cli.verbose));

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
