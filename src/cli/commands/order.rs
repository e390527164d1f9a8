//! `crm order` command - service orders
//!
//! Status values are parsed by the library so an invalid one is reported as
//! a validation error listing the allowed values.

use clap::Subcommand;
use miette::Result;

use crate::cli::entity_cmd::{
    open_store, output_written, required_id, required_text, run_delete_generic,
    run_list_generic, run_show_generic, DeleteArgs, ListArgs, ShowArgs,
};
use crate::cli::filters::StatusFilter;
use crate::cli::GlobalOpts;
use crate::core::store::ListFilter;
use crate::core::{EntityKind, OrderStatus};
use crate::entities::{AnyRecord, NewOrder, OrderPatch};

#[derive(Subcommand, Debug)]
pub enum OrderCommands {
    /// List service orders
    List(OrderListArgs),

    /// Open a service order against a unit
    New(NewArgs),

    /// Show an order
    Show(ShowArgs),

    /// Change an order (always refreshes its last-updated time)
    Update(UpdateArgs),

    /// Delete an order
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct OrderListArgs {
    #[command(flatten)]
    pub common: ListArgs,

    /// Only orders for this unit id
    #[arg(long, short = 'd')]
    pub device: Option<i64>,

    /// Filter by status
    #[arg(long, value_enum, default_value_t = StatusFilter::All)]
    pub status: StatusFilter,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Unit (device in field) id
    #[arg(long, short = 'd')]
    pub device: Option<i64>,

    /// What the order is about
    #[arg(long)]
    pub description: Option<String>,

    /// Initial status: open, closed, "in progress" or "need info"
    #[arg(long, default_value = "open")]
    pub status: String,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Order id
    pub id: i64,

    /// Move the order to another unit id
    #[arg(long, short = 'd')]
    pub device: Option<i64>,

    #[arg(long)]
    pub description: Option<String>,

    /// New status: open, closed, "in progress" or "need info"
    #[arg(long)]
    pub status: Option<String>,
}

/// Run an order subcommand
pub fn run(cmd: OrderCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        OrderCommands::List(args) => run_list(args, global),
        OrderCommands::New(args) => run_new(args, global),
        OrderCommands::Show(args) => run_show_generic(EntityKind::Order, &args, global),
        OrderCommands::Update(args) => run_update(args, global),
        OrderCommands::Delete(args) => run_delete_generic(EntityKind::Order, &args, global),
    }
}

fn run_list(args: OrderListArgs, global: &GlobalOpts) -> Result<()> {
    let filter = ListFilter {
        device: args.device,
        status: args.status.exact(),
        ..Default::default()
    };

    // Multi-status filters cannot be pushed down to the store query
    let status = args.status;
    let keep = move |record: &AnyRecord| match record {
        AnyRecord::Order(order) => status.matches(order.order_status),
        _ => true,
    };
    let post_filter: Option<&dyn Fn(&AnyRecord) -> bool> = match status {
        StatusFilter::Active => Some(&keep),
        _ => None,
    };

    run_list_generic(EntityKind::Order, &args.common, filter, post_filter, global)
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let status: OrderStatus = args.status.parse()?;
    let device = required_id(args.device, "device", "Unit id")?;
    let description = required_text(args.description, "description", "Description")?;

    let mut store = open_store(global)?;
    let order = store.create_order(&NewOrder::new(device, description, status))?;
    output_written(&store, &order.into(), "Created", global)
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let order_status = args
        .status
        .as_deref()
        .map(str::parse::<OrderStatus>)
        .transpose()?;

    let patch = OrderPatch {
        device: args.device,
        order_description: args.description,
        order_status,
    };

    let mut store = open_store(global)?;
    let order = store.update_order(args.id, &patch)?;
    output_written(&store, &order.into(), "Updated", global)
}
