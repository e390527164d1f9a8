//! Shared entity command infrastructure
//!
//! The four entity subcommands differ only in their `new`/`update` flags;
//! listing, showing and deleting go through the generic functions here.

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use miette::{IntoDiagnostic, Result};
use tracing::debug;

use crate::admin::{Admin, AdminConfig};
use crate::cli::helpers::is_interactive;
use crate::cli::output::effective_format;
use crate::cli::table::print_rows;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::store::{ListFilter, Page, Store};
use crate::core::{Config, EntityKind, FieldValue};
use crate::entities::AnyRecord;

// =========================================================================
// Shared Arguments
// =========================================================================

/// Arguments common to every `list` subcommand
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Case-insensitive substring search over the entity's search fields
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Maximum rows to show (defaults to the configured page size)
    #[arg(long, short = 'n')]
    pub limit: Option<u32>,

    /// Rows to skip
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Show all rows, ignoring the page size
    #[arg(long, conflicts_with = "limit")]
    pub all: bool,

    /// Show only the number of matching rows
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Record id
    pub id: i64,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Record id
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

// =========================================================================
// Store Access
// =========================================================================

/// Load layered configuration and apply `--database`
pub fn load_config(global: &GlobalOpts) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(ref path) = global.database {
        config.database = Some(path.clone());
    }
    Ok(config)
}

/// Open the configured database, creating and migrating it as needed
pub fn open_store(global: &GlobalOpts) -> Result<Store> {
    let config = load_config(global)?;
    let path = config.database_path();
    debug!(path = %path.display(), "opening store");
    Ok(Store::open(&path)?)
}

// =========================================================================
// Common List Implementation
// =========================================================================

/// Generic list command
///
/// Without `--search` the typed list query does the narrowing and paging
/// in SQL. With `--search` (or a `post_filter`) every hit is fetched, then
/// narrowed and paged here so pages stay full.
pub fn run_list_generic(
    kind: EntityKind,
    args: &ListArgs,
    mut filter: ListFilter,
    post_filter: Option<&dyn Fn(&AnyRecord) -> bool>,
    global: &GlobalOpts,
) -> Result<()> {
    let config = load_config(global)?;
    let store = Store::open(&config.database_path())?;
    let admin = Admin::new(&store);

    let limit = if args.all || args.count {
        None
    } else {
        Some(args.limit.unwrap_or(config.page_size))
    };
    let page = Page::new(limit, if args.count { 0 } else { args.offset });

    let records = if args.search.is_none() && post_filter.is_none() {
        filter.page = page;
        store.list_any(kind, &filter)?
    } else {
        let query = args.search.as_deref().unwrap_or("");
        let hits = admin.search(kind, query, Page::default())?;
        let narrowed = hits
            .into_iter()
            .filter(|r| filter.matches(r))
            .filter(|r| post_filter.is_none_or(|keep| keep(r)));
        narrowed
            .skip(page.offset as usize)
            .take(page.limit.map_or(usize::MAX, |n| n as usize))
            .collect()
    };

    if args.count {
        println!("{}", records.len());
        return Ok(());
    }

    let format = effective_format(global.format, true);
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&records).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&records).into_diagnostic()?;
            print!("{}", yaml);
        }
        _ => {
            if records.is_empty() && format != OutputFormat::Id {
                print_no_results(kind.name_plural());
                return Ok(());
            }
            let rows = records
                .iter()
                .map(|r| admin.render_list_row(r))
                .collect::<crate::Result<Vec<_>>>()?;
            print_rows(&AdminConfig::for_kind(kind).headers(), &rows, format)?;
        }
    }

    Ok(())
}

/// Print "No X found" message
pub fn print_no_results(name_plural: &str) {
    eprintln!("No {} found.", name_plural);
}

// =========================================================================
// Common Show Implementation
// =========================================================================

/// Generic show command
pub fn run_show_generic(kind: EntityKind, args: &ShowArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let record = store.get_any(kind, args.id)?;
    print_record(&store, &record, global.format)
}

/// Print one record in the requested format
pub fn print_record(store: &Store, record: &AnyRecord, format: OutputFormat) -> Result<()> {
    match effective_format(format, false) {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(record).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(record).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Id => println!("{}", record.id()),
        OutputFormat::Tsv | OutputFormat::Csv => {
            let row = Admin::new(store).render_list_row(record)?;
            print_rows(&AdminConfig::for_kind(record.kind()).headers(), &[row], format)?;
        }
        _ => print_pretty(store, record)?,
    }
    Ok(())
}

/// Key/value view of a record; relations show the referenced record's label
fn print_pretty(store: &Store, record: &AnyRecord) -> Result<()> {
    let kind = record.kind();
    let label = store.label(kind, record.id())?;

    println!("{}", style("─".repeat(60)).dim());
    println!("{}", style(&label).yellow());
    println!("{}", style("─".repeat(60)).dim());

    for field in kind.fields() {
        let value = record.field(field).unwrap_or(FieldValue::Null);
        let shown = match (kind.relation(field), value.as_id()) {
            (Some(relation), Some(id)) => match store.label(relation.target, id) {
                Ok(target) => format!("{} ({})", id, style(target).cyan()),
                Err(_) => format!("{} {}", id, style("(missing)").red()),
            },
            _ => value.to_string(),
        };
        println!("{}: {}", style(field).bold(), shown);
    }
    Ok(())
}

// =========================================================================
// Field Prompts
// =========================================================================

/// A required text value: the flag if given, else a prompt when interactive
pub fn required_text(value: Option<String>, flag: &str, prompt: &str) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    if !is_interactive() {
        return Err(miette::miette!("missing required argument --{}", flag));
    }
    Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()
        .into_diagnostic()
}

/// A required record id: the flag if given, else a prompt when interactive
pub fn required_id(value: Option<i64>, flag: &str, prompt: &str) -> Result<i64> {
    if let Some(value) = value {
        return Ok(value);
    }
    if !is_interactive() {
        return Err(miette::miette!("missing required argument --{}", flag));
    }
    Input::<i64>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()
        .into_diagnostic()
}

// =========================================================================
// Common New / Update Output
// =========================================================================

/// Report a created or updated record
pub fn output_written(
    store: &Store,
    record: &AnyRecord,
    verb: &str,
    global: &GlobalOpts,
) -> Result<()> {
    match global.format {
        OutputFormat::Id => println!("{}", record.id()),
        OutputFormat::Json | OutputFormat::Yaml => print_record(store, record, global.format)?,
        _ => {
            let kind = record.kind();
            println!(
                "{} {} {} {}",
                style("✓").green(),
                verb,
                kind.name(),
                style(format!("#{}", record.id())).cyan()
            );
            println!("   {}", style(store.label(kind, record.id())?).yellow());
        }
    }
    Ok(())
}

// =========================================================================
// Common Delete Implementation
// =========================================================================

/// Generic delete command, confirming first unless `--yes`
pub fn run_delete_generic(kind: EntityKind, args: &DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let mut store = open_store(global)?;
    let label = store.label(kind, args.id)?;

    if !args.yes {
        if !is_interactive() {
            return Err(miette::miette!(
                help = "pass --yes to delete without a prompt",
                "refusing to delete {} #{} without confirmation",
                kind.name(),
                args.id
            ));
        }

        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {} #{} ({})?", kind.name(), args.id, label))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            eprintln!("Aborted.");
            return Ok(());
        }
    }

    store.delete(kind, args.id)?;

    if global.format != OutputFormat::Id {
        println!(
            "{} Deleted {} {} ({})",
            style("✓").green(),
            kind.name(),
            style(format!("#{}", args.id)).cyan(),
            label
        );
    }
    Ok(())
}
