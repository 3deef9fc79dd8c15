mod api;
mod commands;
mod render;
mod util;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::ScoringClient;
use crate::render::OutputFormat;
use crate::util::exit_error;

#[derive(Parser)]
#[command(name = "toxscore", version, about = "Score comments and YouTube videos for toxicity")]
struct Cli {
    /// Scoring API base URL
    #[arg(long, env = "TOXSCORE_API_URL", default_value = "http://localhost:8000")]
    api_url: String,

    /// Output format
    #[arg(long, env = "TOXSCORE_OUTPUT", value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Skip the /health warm-up probe before scoring
    #[arg(long)]
    no_warmup: bool,

    /// Debug logging for toxscore (RUST_LOG takes precedence)
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check scoring API health
    Health,
    /// Score one or more comments
    Comment(commands::comment::CommentArgs),
    /// Score the comments of a YouTube video
    Youtube(commands::youtube::YoutubeArgs),
}

fn init_tracing(verbose: bool, json: bool) {
    let default_filter = if verbose {
        "toxscore=debug,toxscore_core=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let client = match ScoringClient::new(&cli.api_url) {
        Ok(c) => c,
        Err(e) => exit_error(&e, Some("Set --api-url or TOXSCORE_API_URL to an http(s) URL")),
    };

    let scoring = !matches!(cli.command, Commands::Health);
    if scoring && !cli.no_warmup {
        let probe = client.clone();
        tokio::spawn(async move { probe.warmup().await });
    }

    let code = match cli.command {
        Commands::Health => commands::health::run(&client).await,
        Commands::Comment(args) => commands::comment::run(&client, args, cli.output).await,
        Commands::Youtube(args) => commands::youtube::run(&client, args, cli.output).await,
    };

    std::process::exit(code);
}
