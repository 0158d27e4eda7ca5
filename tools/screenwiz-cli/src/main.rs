//! Screenwiz CLI: render screen-capture frames and edit zoom timelines.
//!
//! Usage:
//!   screenwiz render <FRAMES_DIR>     Render a frame sequence to PNG files
//!   screenwiz timeline <FILE> <ACTION> Edit a zoom timeline JSON file
//!   screenwiz info <FRAMES_DIR>       Show frame sequence information
//!   screenwiz config                  Show or write the configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use screenwiz_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "screenwiz",
    about = "Zoom, frame and composite screen recordings",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/screenwiz/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a directory of frames through the pipeline
    Render(commands::render::RenderArgs),

    /// Edit a zoom timeline file
    Timeline {
        /// Timeline JSON file
        file: PathBuf,

        #[command(subcommand)]
        action: commands::timeline::TimelineAction,
    },

    /// Show frame sequence information
    Info {
        /// Directory of numbered frame images
        frames_dir: PathBuf,

        /// Frame rate of the recording
        #[arg(long, default_value = "30")]
        fps: f64,
    },

    /// Print the effective configuration
    Config {
        /// Also write it to the standard config location
        #[arg(long)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };

    // Initialize logging
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    screenwiz_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Render(args) => commands::render::run(args, &config).await,
        Commands::Timeline { file, action } => commands::timeline::run(file, action, &config),
        Commands::Info { frames_dir, fps } => commands::info::run(frames_dir, fps),
        Commands::Config { write } => {
            commands::config::run(&config, cli.config.as_deref(), write)
        }
    }
}
