//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "resume-rag")]
#[command(about = "Resume API with retrieval-augmented question answering")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a TOML configuration file (default: config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Enable CORS for browser clients (overrides config)
        #[arg(long)]
        cors: Option<bool>,
        /// Serve a JSON profile instead of reading PostgreSQL
        #[arg(long)]
        profile_file: Option<PathBuf>,
    },
    /// Create the profile tables
    Init {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Embed the profile and upsert it into the vector index
    Sync {
        /// Read the profile from a JSON file instead of PostgreSQL
        #[arg(long)]
        profile_file: Option<PathBuf>,
    },
    /// Ask one question about the resume
    Ask {
        /// The question
        query: String,
        /// Read the profile from a JSON file instead of PostgreSQL
        #[arg(long)]
        profile_file: Option<PathBuf>,
    },
    /// Show current configuration with secrets masked
    Config,
}
