use anyhow::Result;

use arena_rating::cli::Command;
use arena_rating::{
    handle_completions, handle_init, handle_replay, handle_seed, handle_serve, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Init => handle_init(),
        Command::Seed { path } => handle_seed(path),
        Command::Replay => handle_replay(),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
