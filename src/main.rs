use anyhow::Result;
use clap::Parser;
use log::info;

mod cli;

use cli::Cli;
use cli::app::Commands;
use cli::commands::handle_inspect_command;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    info!("Starting json-optional");

    match cli.command {
        Commands::Inspect(cmd) => handle_inspect_command(cmd),
    }
}
