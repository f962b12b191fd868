use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Path to site configuration file
    #[arg(long, default_value = "harvest_config.json")]
    pub config_file: PathBuf,

    /// Directory to store output data
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Seconds to wait for the table widget to attach to the document
    #[arg(long, default_value_t = 20)]
    pub readiness_timeout: u64,

    /// Path to a Chrome/Chromium binary (auto-detected if not set)
    #[clap(long, env = "GOLDHARVEST_CHROME")]
    pub chrome_path: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract from a previously captured markup snapshot instead of a live session
    Recover {
        /// Path to the saved page markup
        snapshot_file: PathBuf,
    },
}
