pub mod init;
pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "minipress")]
#[command(version)]
#[command(about = "A minimal single-binary blog engine", long_about = None)]
pub struct Cli {
    #[arg(short, long, default_value = "minipress.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scaffold a new site directory with a config file
    Init {
        #[arg(default_value = ".")]
        path: PathBuf,
        #[arg(long)]
        name: Option<String>,
    },
    /// Run the blog server
    Serve {
        /// Override [server].host from the config file
        #[arg(short = 'H', long)]
        host: Option<String>,
        /// Override [server].port from the config file
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Apply pending database migrations and exit
    Migrate,
}
