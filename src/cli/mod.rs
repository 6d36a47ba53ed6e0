use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

#[derive(Parser)]
#[command(name = "drink-vend")]
#[command(about = "Buy a drink through the vending state machines")]
#[command(long_about = "drink-vend collects your order at the terminal and hands it to the \
                       vending workflows, relaying any questions they ask back to you. \
                       Run it without a subcommand to buy a drink.")]
pub struct Cli {
    /// Configuration file (defaults to ./drink-vend.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a drink and buy it (default)
    Buy,
    /// Start the interactive vending workflow and answer its questions
    Relay,
    /// Report on an existing execution, waiting for it to finish
    Status {
        /// Execution ARN to report on
        execution_id: String,
        /// Which workflow produced the execution
        #[arg(long, value_enum, default_value_t = Flow::Relay)]
        flow: Flow,
    },
    /// List the drinks on offer
    Menu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Flow {
    Purchase,
    Relay,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Buy => "buy",
            Commands::Relay => "relay",
            Commands::Status { .. } => "status",
            Commands::Menu => "menu",
        }
    }
}
