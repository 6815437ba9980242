use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "mattermost_video_preview")]
#[command(about = "Post video previews to Mattermost and run file operations from chat buttons", long_about = None)]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a thumbnail grid for a video and post it
    Preview {
        file: PathBuf,
        /// Grid as RxC, e.g. 5x6
        #[arg(short, long)]
        grid: Option<String>,
        /// Seconds between frames; 0 spreads frames over the whole video
        #[arg(short, long)]
        interval: Option<f64>,
        /// Thumbnail height in pixels
        #[arg(long)]
        height: Option<u32>,
    },
    /// Run a configured operation from a button callback payload
    #[command(name = "run_command")]
    RunCommand {
        /// `{"context": {"command": "<operation>", "filename": "<path>"}}`
        payload: String,
    },
}
