mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ytsa-cli")]
#[command(about = "YouTube comment sentiment analysis")]
struct Cli {
    /// Print single-line JSON instead of pretty-printed output
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch, classify and summarize the comments of one video
    Analyze {
        video_id: String,

        /// Number of comments to analyze (defaults to YTSA_MAX_COMMENTS)
        #[arg(long)]
        max_comments: Option<usize>,
    },
    /// Classify a single piece of text with the configured classifier
    Classify { text: String },
    /// Show the normalized form of a piece of text
    Clean { text: String },
    /// Print the static sample analysis
    Sample,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let output = match cli.command {
        Commands::Analyze {
            video_id,
            max_comments,
        } => commands::run_analyze(&video_id, max_comments).await?,
        Commands::Classify { text } => commands::run_classify(&text).await?,
        Commands::Clean { text } => commands::run_clean(&text),
        Commands::Sample => commands::run_sample()?,
    };

    println!("{}", commands::render(&output, cli.compact)?);
    Ok(())
}

#[cfg(test)]
mod tests;
