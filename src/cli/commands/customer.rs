//! `crm customer` command - customer management

use clap::Subcommand;
use miette::Result;

use crate::cli::entity_cmd::{
    open_store, output_written, required_text, run_delete_generic, run_list_generic,
    run_show_generic, DeleteArgs, ListArgs, ShowArgs,
};
use crate::cli::GlobalOpts;
use crate::core::store::ListFilter;
use crate::core::EntityKind;
use crate::entities::{CustomerPatch, NewCustomer};

#[derive(Subcommand, Debug)]
pub enum CustomerCommands {
    /// List customers
    List(ListArgs),

    /// Add a customer
    New(NewArgs),

    /// Show a customer
    Show(ShowArgs),

    /// Change a customer's fields
    Update(UpdateArgs),

    /// Delete a customer (refused while units are located there)
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Customer (organization) name
    #[arg(long)]
    pub name: Option<String>,

    /// Street address
    #[arg(long)]
    pub address: Option<String>,

    /// City
    #[arg(long)]
    pub city: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Customer id
    pub id: i64,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub city: Option<String>,
}

/// Run a customer subcommand
pub fn run(cmd: CustomerCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        CustomerCommands::List(args) => {
            run_list_generic(EntityKind::Customer, &args, ListFilter::default(), None, global)
        }
        CustomerCommands::New(args) => run_new(args, global),
        CustomerCommands::Show(args) => run_show_generic(EntityKind::Customer, &args, global),
        CustomerCommands::Update(args) => run_update(args, global),
        CustomerCommands::Delete(args) => run_delete_generic(EntityKind::Customer, &args, global),
    }
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let name = required_text(args.name, "name", "Customer name")?;
    let address = required_text(args.address, "address", "Address")?;
    let city = required_text(args.city, "city", "City")?;

    let mut store = open_store(global)?;
    let customer = store.create_customer(&NewCustomer::new(name, address, city))?;
    output_written(&store, &customer.into(), "Created", global)
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let patch = CustomerPatch {
        customer_name: args.name,
        customer_address: args.address,
        customer_city: args.city,
    };
    if patch.is_empty() {
        return Err(miette::miette!("nothing to update; pass at least one field flag"));
    }

    let mut store = open_store(global)?;
    let customer = store.update_customer(args.id, &patch)?;
    output_written(&store, &customer.into(), "Updated", global)
}
