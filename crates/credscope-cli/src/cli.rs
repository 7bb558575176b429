use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "credscope")]
#[command(version, about = "Credscope - harvested credential dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base URL (defaults to http://localhost:8080)
    #[arg(long, global = true, env = "CREDSCOPE_SERVER")]
    pub server: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload a log file to the backend
    Upload(UploadArgs),
}

#[derive(Args)]
pub struct UploadArgs {
    /// Path of the log file to upload
    pub file: PathBuf,

    /// Filter text sent alongside the file
    #[arg(long, default_value = "")]
    pub filter: String,
}
