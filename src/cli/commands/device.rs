//! `crm device` command - equipment catalog management

use clap::Subcommand;
use miette::Result;

use crate::cli::entity_cmd::{
    open_store, output_written, required_text, run_delete_generic, run_list_generic,
    run_show_generic, DeleteArgs, ListArgs, ShowArgs,
};
use crate::cli::GlobalOpts;
use crate::core::store::ListFilter;
use crate::core::EntityKind;
use crate::entities::{DevicePatch, NewDevice};

#[derive(Subcommand, Debug)]
pub enum DeviceCommands {
    /// List catalog devices
    List(ListArgs),

    /// Add a device to the catalog
    New(NewArgs),

    /// Show a device
    Show(ShowArgs),

    /// Change a device's fields
    Update(UpdateArgs),

    /// Delete a device (refused while units of it exist)
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Manufacturer name
    #[arg(long, short = 'm')]
    pub manufacturer: Option<String>,

    /// Model name
    #[arg(long)]
    pub model: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Device id
    pub id: i64,

    /// New manufacturer name
    #[arg(long, short = 'm')]
    pub manufacturer: Option<String>,

    /// New model name
    #[arg(long)]
    pub model: Option<String>,
}

/// Run a device subcommand
pub fn run(cmd: DeviceCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        DeviceCommands::List(args) => {
            run_list_generic(EntityKind::Device, &args, ListFilter::default(), None, global)
        }
        DeviceCommands::New(args) => run_new(args, global),
        DeviceCommands::Show(args) => run_show_generic(EntityKind::Device, &args, global),
        DeviceCommands::Update(args) => run_update(args, global),
        DeviceCommands::Delete(args) => run_delete_generic(EntityKind::Device, &args, global),
    }
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let manufacturer = required_text(args.manufacturer, "manufacturer", "Manufacturer")?;
    let model = required_text(args.model, "model", "Model")?;

    let mut store = open_store(global)?;
    let device = store.create_device(&NewDevice::new(manufacturer, model))?;
    output_written(&store, &device.into(), "Created", global)
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let patch = DevicePatch {
        manufacturer: args.manufacturer,
        model: args.model,
    };
    if patch.is_empty() {
        return Err(miette::miette!("nothing to update; pass at least one field flag"));
    }

    let mut store = open_store(global)?;
    let device = store.update_device(args.id, &patch)?;
    output_written(&store, &device.into(), "Updated", global)
}
