use super::commands::InspectCommand;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "json-optional")]
#[command(about = "Inspect absent, null and present fields of JSON documents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report the tri-state of fields in a JSON object
    Inspect(InspectCommand),
}
