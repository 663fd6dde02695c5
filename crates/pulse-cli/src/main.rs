mod render;

use clap::{Parser, Subcommand};
use pulse_core::{analyze, build_prompt, with_phases, DashboardView, Topic};
use pulse_gemini::GeminiClient;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pulse-cli")]
#[command(about = "Social Pulse: grounded opinion analysis from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze the social pulse of a topic and render the dashboard
    Analyze {
        /// Topic to analyze, e.g. "Remote Work"
        topic: String,

        /// Print the dashboard view as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the prompt that would be sent for a topic, without calling the model
    Prompt {
        topic: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze { topic, json } => run_analyze(&topic, json).await,
        Commands::Prompt { topic } => {
            let topic = Topic::parse(&topic).map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("{}", build_prompt(&topic));
            Ok(())
        }
    }
}

/// Runs one grounded analysis and prints the dashboard.
///
/// The topic is validated before config is loaded, so an empty topic fails
/// without needing an API key.
async fn run_analyze(raw_topic: &str, json: bool) -> anyhow::Result<()> {
    let topic = Topic::parse(raw_topic).map_err(|e| anyhow::anyhow!(e.user_message()))?;
    let config = pulse_core::load_app_config_from_env()?;
    let client = GeminiClient::from_config(&config)?;
    tracing::info!(topic = %topic, model = %client.model(), "starting analysis");

    let outcome = with_phases(
        config.phase_interval(),
        |phase| eprintln!("{phase}"),
        analyze(&client, &topic),
    )
    .await;

    let result = outcome.map_err(|e| {
        tracing::error!(topic = %topic, error = %e, "analysis failed");
        anyhow::anyhow!(e.user_message())
    })?;
    tracing::info!(
        topic = %topic,
        sources = result.sources.len(),
        rescaled = !result.warnings.is_empty(),
        "analysis complete"
    );
    let view = DashboardView::from_result(&result);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render::Dashboard(&view));
    }
    Ok(())
}
