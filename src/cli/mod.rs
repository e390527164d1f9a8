//! CLI module - argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod entity_cmd;
pub mod filters;
pub mod helpers;
pub mod output;
pub mod table;

pub use args::{Cli, Commands, GlobalOpts, OutputFormat};
pub use filters::StatusFilter;

use miette::Result;

/// Dispatch a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    let global = cli.global;
    match cli.command {
        Commands::Init(args) => commands::init::run(args, &global),
        Commands::Device(cmd) => commands::device::run(cmd, &global),
        Commands::Customer(cmd) => commands::customer::run(cmd, &global),
        Commands::Unit(cmd) => commands::unit::run(cmd, &global),
        Commands::Order(cmd) => commands::order::run(cmd, &global),
        Commands::Completions { shell } => commands::completions::run(shell),
    }
}
