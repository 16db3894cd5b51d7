use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "competitive arena rating backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the backend server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Create or reset the database schema
    Init,
    /// Import players from a JSON seed file
    Seed {
        /// Path to a JSON list of players
        path: PathBuf,
    },
    /// Rebuild all ratings from the recorded match log
    Replay,
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}
