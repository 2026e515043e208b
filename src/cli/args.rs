use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use super::commands;

/// Entry point for the `learnkit` command-line interface.
#[derive(Debug, Parser)]
#[command(
    name = "learnkit",
    about = "AI learning plans, step deep-dives and background images",
    version,
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log upstream requests and pipeline stages at debug level
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Build a learning plan for a topic.
    Learn(LearnArgs),
    /// Expand one plan step ("dive deeper").
    Expand(ExpandArgs),
    /// Generate a background image from a scene description.
    Image(ImageArgs),
    /// Show or change saved settings.
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind (defaults to config setting)
    #[arg(long)]
    pub bind: Option<String>,

    /// Port to listen on (defaults to config setting)
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Debug, Args)]
pub struct LearnArgs {
    /// Print the raw JSON response instead of formatted text
    #[arg(long)]
    pub json: bool,

    /// What you want to learn, e.g. "Rust in 5 steps"
    #[arg(required = true, trailing_var_arg = true)]
    pub topic: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ExpandArgs {
    #[arg(long)]
    pub topic: String,

    /// Title of the step to expand
    #[arg(long)]
    pub title: String,

    /// Description of the step to expand
    #[arg(long)]
    pub description: String,

    /// Zero-based position of the step in its plan
    #[arg(long, requires = "count")]
    pub index: Option<usize>,

    /// Number of steps in the plan
    #[arg(long)]
    pub count: Option<usize>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ImageArgs {
    /// Write the decoded PNG here instead of printing the data URL
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Scene description, e.g. "a sunset over mountains"
    #[arg(required = true, trailing_var_arg = true)]
    pub prompt: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// LLM provider (openai or openrouter)
    #[arg(long)]
    pub provider: Option<String>,

    /// Set the API key
    #[arg(long)]
    pub api_key: Option<String>,

    /// Set timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Set max tokens
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Set chat completion model
    #[arg(long)]
    pub chat_model: Option<String>,

    /// Set image generation model
    #[arg(long)]
    pub image_model: Option<String>,

    /// Print the current configuration without changing it
    #[arg(long)]
    pub show: bool,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        commands::run(self).await
    }
}
