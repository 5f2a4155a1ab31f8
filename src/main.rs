//! Activity Visualizer CLI
//!
//! Prints the derived views as JSON, or serves them over HTTP.

use activity_visualizer::{
    config::Config, rank_peaks, ActiveCounts, Dataset, RankedPeak, VERSION,
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "activity-viz")]
#[command(version = VERSION)]
#[command(about = "Durations, dependency graph and daily load from project activity CSVs", long_about = None)]
struct Cli {
    /// Config file (defaults to the per-user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the activity and adjacency CSV files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print activities with their durations
    Activities,

    /// Print the raw adjacency matrix
    Adjacency,

    /// Print graph nodes with degrees and the link list
    Network,

    /// Print the daily active-activity series with peak days
    Counts {
        /// Peak percentile (0-100); 0 keeps only the maximum days.
        /// Without it the fixed top-10% rule is used.
        #[arg(long)]
        percentile: Option<f64>,

        /// Attach relative intensity and hue to each peak
        #[arg(long)]
        ranked: bool,
    },

    /// Serve the views over HTTP
    #[cfg(feature = "server")]
    Serve {
        /// Port to listen on
        #[arg(long, env = "PORT")]
        port: Option<u16>,
    },

    /// Show configuration
    Config,
}

#[derive(Serialize)]
struct RankedCounts {
    counts: Vec<activity_visualizer::DailyCount>,
    peaks: Vec<RankedPeak>,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref(), cli.data_dir)?;

    match cli.command {
        Commands::Activities => print_json(&config.dataset()?.activities()?),
        Commands::Adjacency => print_json(&config.dataset()?.adjacency()?),
        Commands::Network => print_json(&config.dataset()?.network()?),
        Commands::Counts { percentile, ranked } => {
            cmd_counts(&config.dataset()?, percentile, ranked)
        }
        #[cfg(feature = "server")]
        Commands::Serve { port } => cmd_serve(&config, port),
        Commands::Config => cmd_config(&config, cli.config),
    }
}

fn load_config(path: Option<&std::path::Path>, data_dir: Option<PathBuf>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Could not load configuration")?;

    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    Ok(config)
}

fn cmd_counts(dataset: &Dataset, percentile: Option<f64>, ranked: bool) -> anyhow::Result<()> {
    let ActiveCounts { counts, peaks } = match percentile {
        Some(p) => dataset.active_counts_with_percentile(p)?,
        None => dataset.active_counts()?,
    };

    if ranked {
        let peaks = rank_peaks(&peaks);
        print_json(&RankedCounts { counts, peaks })
    } else {
        print_json(&ActiveCounts { counts, peaks })
    }
}

#[cfg(feature = "server")]
fn cmd_serve(config: &Config, port: Option<u16>) -> anyhow::Result<()> {
    use activity_visualizer::server::{run, ServerConfig};

    let server_config = ServerConfig::new(port.unwrap_or(config.port), config.dataset()?);
    let dataset = &server_config.dataset;
    tracing::info!(
        activities = %dataset.activities_path().display(),
        adjacency = %dataset.adjacency_path().display(),
        "Serving activity data"
    );

    let runtime = tokio::runtime::Runtime::new().context("Could not start async runtime")?;
    runtime.block_on(async {
        let server = run(server_config).await?;
        println!(
            "Activity Visualizer API server running on http://{}",
            server.addr()
        );
        println!("Available endpoints:");
        println!("  GET /api/activities     - Activity data with durations");
        println!("  GET /api/adjacency      - Raw adjacency matrix");
        println!("  GET /api/network        - Network graph data");
        println!("  GET /api/active-counts  - Daily activity counts with peaks");
        println!();
        println!("Press Ctrl+C to stop");

        tokio::signal::ctrl_c()
            .await
            .context("Could not listen for Ctrl+C")?;
        server.shutdown().await
    })
}

fn cmd_config(config: &Config, path: Option<PathBuf>) -> anyhow::Result<()> {
    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", path.unwrap_or_else(Config::config_path));
    println!();
    println!("{}", config.to_json()?);
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Could not serialize output")?;
    println!("{json}");
    Ok(())
}
