use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use llmgate::{Commands, Container, ContainerConfig, Router};

#[derive(Parser)]
#[command(name = "llmgate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use deterministic offline clients instead of the live provider
    #[arg(long, global = true)]
    mock: bool,

    /// Provider endpoint; defaults to OPENROUTER_BASE_URL or the public API
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Chat model identifier; defaults to OPENROUTER_MODEL
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Image model identifier; defaults to OPENROUTER_IMAGE_MODEL
    #[arg(long, global = true)]
    image_model: Option<String>,

    /// JSON transcript file carrying conversation history across invocations
    #[arg(short, long, global = true)]
    transcript: Option<PathBuf>,

    /// Maximum number of prior turns sent as context
    #[arg(long, global = true, default_value = "20")]
    history_limit: usize,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = ContainerConfig::from_env();
    config.mock = cli.mock;
    config.transcript = cli.transcript;
    config.history_limit = cli.history_limit;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(model) = cli.model {
        config.chat_model = model;
    }
    if let Some(image_model) = cli.image_model {
        config.image_model = image_model;
    }

    let container = Container::new(config);
    let router = Router::new(&container);

    let output = router.route(cli.command).await?;
    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}
