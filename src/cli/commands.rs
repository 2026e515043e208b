use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result, bail};

use crate::client::AIClient;
use crate::config::Config;
use crate::expander::{self, StepReference};
use crate::image;
use crate::pipeline::LearningOrchestrator;
use crate::server::{self, AppState};

use super::args::{Cli, Command, ExpandArgs, ImageArgs, LearnArgs, ServeArgs};
use super::config_cmd;
use super::output;
use super::util::join_words;

pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Config(args) => config_cmd::handle_config(&args),
        Command::Serve(args) => serve(args, Config::load()?).await,
        Command::Learn(args) => learn(args, Config::load()?).await,
        Command::Expand(args) => expand(args, Config::load()?).await,
        Command::Image(args) => generate_image(args, Config::load()?).await,
    }
}

async fn serve(args: ServeArgs, mut config: Config) -> Result<()> {
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let bind = config.server.bind.clone();
    let port = config.server.port;
    let state = AppState::from_config(config)?;
    server::run_serve(state, &bind, port).await
}

async fn learn(args: LearnArgs, config: Config) -> Result<()> {
    let topic = join_words(&args.topic);
    let client = Arc::new(AIClient::new(&config.llm)?);
    let orchestrator = LearningOrchestrator::standard(client, &config);

    let response = orchestrator.run(&topic).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        output::print_plan(&topic, &response);
    }
    Ok(())
}

async fn expand(args: ExpandArgs, config: Config) -> Result<()> {
    let mut reference = StepReference::new(&args.topic, &args.title, &args.description);
    if let (Some(index), Some(count)) = (args.index, args.count) {
        reference = reference.at(index, count);
    }

    let client = AIClient::new(&config.llm)?;
    let expanded = expander::expand_step(&client, &reference, &config.models).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&expanded)?);
    } else {
        output::print_expansion(&reference.step_title, &expanded);
    }
    Ok(())
}

async fn generate_image(args: ImageArgs, config: Config) -> Result<()> {
    let prompt = join_words(&args.prompt);
    let client = AIClient::new(&config.llm)?;
    let image = image::generate_background(&client, &client, &prompt, &config.models).await?;

    let Some(path) = args.output else {
        println!("{}", image.data_url);
        return Ok(());
    };

    let Some(bytes) = image.png_bytes() else {
        bail!("Image response could not be decoded");
    };
    fs::write(&path, bytes).with_context(|| format!("Failed to write image to {}", path.display()))?;
    println!("🖼️  Saved background to {}", path.display());
    Ok(())
}
