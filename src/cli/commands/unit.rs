//! `crm unit` command - devices in the field
//!
//! `--customer` and `--analyzer` take raw record ids.

use clap::Subcommand;
use miette::Result;

use crate::cli::entity_cmd::{
    open_store, output_written, required_id, required_text, run_delete_generic,
    run_list_generic, run_show_generic, DeleteArgs, ListArgs, ShowArgs,
};
use crate::cli::GlobalOpts;
use crate::core::store::ListFilter;
use crate::core::EntityKind;
use crate::entities::{DeviceInFieldPatch, NewDeviceInField};

#[derive(Subcommand, Debug)]
pub enum UnitCommands {
    /// List devices in the field
    List(UnitListArgs),

    /// Register a unit at a customer
    New(NewArgs),

    /// Show a unit
    Show(ShowArgs),

    /// Change a unit's fields
    Update(UpdateArgs),

    /// Delete a unit (refused while orders reference it)
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct UnitListArgs {
    #[command(flatten)]
    pub common: ListArgs,

    /// Only units located at this customer id
    #[arg(long, short = 'c')]
    pub customer: Option<i64>,

    /// Only units of this catalog device id
    #[arg(long, short = 'a')]
    pub analyzer: Option<i64>,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Serial number
    #[arg(long)]
    pub serial: Option<String>,

    /// Customer id
    #[arg(long, short = 'c')]
    pub customer: Option<i64>,

    /// Catalog device id
    #[arg(long, short = 'a')]
    pub analyzer: Option<i64>,

    /// Ownership status (free text, e.g. "owned", "leased")
    #[arg(long)]
    pub owner_status: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Unit id
    pub id: i64,

    #[arg(long)]
    pub serial: Option<String>,

    /// Move the unit to another customer id
    #[arg(long, short = 'c')]
    pub customer: Option<i64>,

    /// Catalog device id
    #[arg(long, short = 'a')]
    pub analyzer: Option<i64>,

    #[arg(long)]
    pub owner_status: Option<String>,
}

/// Run a unit subcommand
pub fn run(cmd: UnitCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        UnitCommands::List(args) => run_list(args, global),
        UnitCommands::New(args) => run_new(args, global),
        UnitCommands::Show(args) => run_show_generic(EntityKind::DeviceInField, &args, global),
        UnitCommands::Update(args) => run_update(args, global),
        UnitCommands::Delete(args) => run_delete_generic(EntityKind::DeviceInField, &args, global),
    }
}

fn run_list(args: UnitListArgs, global: &GlobalOpts) -> Result<()> {
    let filter = ListFilter {
        customer: args.customer,
        analyzer: args.analyzer,
        ..Default::default()
    };
    run_list_generic(EntityKind::DeviceInField, &args.common, filter, None, global)
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let new = NewDeviceInField {
        serial_number: required_text(args.serial, "serial", "Serial number")?,
        customer: required_id(args.customer, "customer", "Customer id")?,
        analyzer: required_id(args.analyzer, "analyzer", "Device (analyzer) id")?,
        owner_status: required_text(args.owner_status, "owner-status", "Owner status")?,
    };

    let mut store = open_store(global)?;
    let unit = store.create_device_in_field(&new)?;
    output_written(&store, &unit.into(), "Created", global)
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let patch = DeviceInFieldPatch {
        serial_number: args.serial,
        customer: args.customer,
        analyzer: args.analyzer,
        owner_status: args.owner_status,
    };
    if patch.is_empty() {
        return Err(miette::miette!("nothing to update; pass at least one field flag"));
    }

    let mut store = open_store(global)?;
    let unit = store.update_device_in_field(args.id, &patch)?;
    output_written(&store, &unit.into(), "Updated", global)
}
