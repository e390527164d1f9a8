//! `crm init` command - create or migrate the database

use console::style;
use miette::Result;

use crate::cli::entity_cmd::load_config;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Store;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Print the database path only
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

pub fn run(args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let path = config.database_path();
    let existed = path.exists();

    let mut store = Store::open(&path)?;
    // open() already migrated; a second pass reports nothing new
    let applied = store.migrate()?;
    let stats = store.statistics()?;

    if args.quiet || global.format == OutputFormat::Id {
        println!("{}", path.display());
        return Ok(());
    }

    let verb = if existed { "Opened" } else { "Initialized" };
    println!(
        "{} {} database at {}",
        style("✓").green(),
        verb,
        style(path.display()).cyan()
    );
    println!(
        "   schema version {}{}",
        stats.schema_version,
        if applied > 0 { " (migrated)" } else { "" }
    );
    println!(
        "   {} devices, {} customers, {} devices in field, {} orders",
        stats.devices, stats.customers, stats.devices_in_field, stats.orders
    );

    Ok(())
}
