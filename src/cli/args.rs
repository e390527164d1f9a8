//! Command-line argument definitions

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::cli::commands::customer::CustomerCommands;
use crate::cli::commands::device::DeviceCommands;
use crate::cli::commands::init::InitArgs;
use crate::cli::commands::order::OrderCommands;
use crate::cli::commands::unit::UnitCommands;

#[derive(Parser, Debug)]
#[command(name = "crm")]
#[command(version)]
#[command(
    about = "Record keeper for catalog devices, customers, units in the field and their service orders"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted by every subcommand
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Database file (overrides CRM_DATABASE and config files)
    #[arg(long, global = true, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub format: OutputFormat,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the database (or bring its schema up to date)
    Init(InitArgs),

    /// Equipment catalog
    #[command(subcommand)]
    Device(DeviceCommands),

    /// Customers
    #[command(subcommand)]
    Customer(CustomerCommands),

    /// Devices in the field (physical units at customers)
    #[command(subcommand)]
    Unit(UnitCommands),

    /// Service orders
    #[command(subcommand)]
    Order(OrderCommands),

    /// Print shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Output format for list and show commands
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// TSV for lists, pretty text for single records
    #[default]
    Auto,
    /// Bordered table
    Table,
    /// Tab-separated values
    Tsv,
    /// Comma-separated values
    Csv,
    /// JSON
    Json,
    /// YAML
    Yaml,
    /// Record ids only, one per line
    Id,
}
