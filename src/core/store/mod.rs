//! SQLite-backed record store
//!
//! Owns the single connection to the database file, applies the embedded
//! migrations on open and exposes typed CRUD per entity. Referential
//! integrity is enforced twice: the schema declares `ON DELETE RESTRICT`
//! foreign keys, and deletes check for referencing rows first so the error
//! can name them.
//!
//! Write operations take `&mut self`; there is exactly one writer per `Store`.

mod customers;
mod devices;
mod devices_in_field;
mod orders;
mod serialize;


use rusqlite::functions::FunctionFlags;
use rusqlite::{params, Connection, OptionalExtension, ToSql};
use rust_embed::Embed;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::error::{CrmError, Result};
use crate::core::schema::EntityKind;
use crate::entities::AnyRecord;

#[derive(Embed)]
#[folder = "migrations/"]
struct EmbeddedMigrations;

/// Name of the case-insensitive substring SQL function registered on open
pub const CONTAINS_FN: &str = "crm_contains";

/// Paging window for list and search queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    /// Maximum rows to return (`None` = unbounded)
    pub limit: Option<u32>,
    /// Rows to skip
    pub offset: u32,
}

impl Page {
    pub fn new(limit: Option<u32>, offset: u32) -> Self {
        Self { limit, offset }
    }

    /// `LIMIT`/`OFFSET` clause; SQLite treats a negative limit as unbounded
    pub(crate) fn sql(&self) -> String {
        let limit = self.limit.map_or(-1, i64::from);
        format!("LIMIT {} OFFSET {}", limit, self.offset)
    }
}

/// Filter for list queries
///
/// Narrowing fields that do not apply to the listed entity are ignored.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub page: Page,
    /// Devices in field located at this customer
    pub customer: Option<i64>,
    /// Devices in field of this catalog device
    pub analyzer: Option<i64>,
    /// Orders raised against this device in field
    pub device: Option<i64>,
    /// Orders with this status
    pub status: Option<crate::core::OrderStatus>,
}

impl ListFilter {
    /// Whether a record passes the narrowing fields (paging is not applied)
    ///
    /// Used when rows come from somewhere other than the typed list queries,
    /// e.g. search results narrowed after the fact.
    pub fn matches(&self, record: &AnyRecord) -> bool {
        let id_matches = |field: &str, wanted: Option<i64>| match (wanted, record.field(field)) {
            (Some(wanted), Some(value)) => value.as_id() == Some(wanted),
            _ => true,
        };
        let status_matches = match (self.status, record.field("order_status")) {
            (Some(status), Some(value)) => value.to_string() == status.as_str(),
            _ => true,
        };

        id_matches("customer", self.customer)
            && id_matches("analyzer", self.analyzer)
            && id_matches("device", self.device)
            && status_matches
    }
}

/// Database statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub schema_version: u32,
    pub devices: usize,
    pub customers: usize,
    pub devices_in_field: usize,
    pub orders: usize,
}

/// The record store
pub struct Store {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Store {
    /// Open (or create) a database file and bring its schema up to date
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        // WAL keeps readers from blocking the writer
        let _mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        let mut store = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        store.prepare()?;
        Ok(store)
    }

    /// Create an in-memory database (useful for tests)
    pub fn open_in_memory() -> Result<Self> {
        let mut store = Self {
            conn: Connection::open_in_memory()?,
            path: None,
        };
        store.prepare()?;
        Ok(store)
    }

    /// Path of the backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn prepare(&mut self) -> Result<()> {
        self.conn.pragma_update(None, "foreign_keys", "ON")?;
        register_functions(&self.conn)?;
        self.migrate()?;
        Ok(())
    }

    /// Current schema version (`PRAGMA user_version`)
    pub fn schema_version(&self) -> Result<u32> {
        let version: u32 = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?;
        Ok(version)
    }

    /// Apply embedded migrations newer than the current schema version
    ///
    /// Returns the number of migrations applied.
    pub fn migrate(&mut self) -> Result<usize> {
        let current = self.schema_version()?;
        let mut applied = 0;

        for (version, name) in migration_files() {
            if version <= current {
                continue;
            }
            let Some(file) = EmbeddedMigrations::get(&name) else {
                continue;
            };
            let sql = String::from_utf8_lossy(&file.data);

            let tx = self.conn.transaction()?;
            tx.execute_batch(&sql)
                .and_then(|_| tx.pragma_update(None, "user_version", version))
                .map_err(|source| CrmError::Migration {
                    name: name.clone(),
                    source,
                })?;
            tx.commit()?;

            info!(migration = %name, version, "applied migration");
            applied += 1;
        }

        Ok(applied)
    }

    /// Row counts per table plus the schema version
    pub fn statistics(&self) -> Result<StoreStats> {
        let count = |kind: EntityKind| -> Result<usize> {
            let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
            let n: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
            Ok(n as usize)
        };

        Ok(StoreStats {
            schema_version: self.schema_version()?,
            devices: count(EntityKind::Device)?,
            customers: count(EntityKind::Customer)?,
            devices_in_field: count(EntityKind::DeviceInField)?,
            orders: count(EntityKind::Order)?,
        })
    }

    // =========================================================================
    // Generic record access
    // =========================================================================

    /// Fetch any record by kind and id
    pub fn get_any(&self, kind: EntityKind, id: i64) -> Result<AnyRecord> {
        Ok(match kind {
            EntityKind::Device => AnyRecord::Device(self.get_device(id)?),
            EntityKind::Customer => AnyRecord::Customer(self.get_customer(id)?),
            EntityKind::DeviceInField => AnyRecord::DeviceInField(self.get_device_in_field(id)?),
            EntityKind::Order => AnyRecord::Order(self.get_order(id)?),
        })
    }

    /// List any entity through its typed list query
    pub fn list_any(&self, kind: EntityKind, filter: &ListFilter) -> Result<Vec<AnyRecord>> {
        Ok(match kind {
            EntityKind::Device => into_any(self.list_devices(filter)?),
            EntityKind::Customer => into_any(self.list_customers(filter)?),
            EntityKind::DeviceInField => into_any(self.list_devices_in_field(filter)?),
            EntityKind::Order => into_any(self.list_orders(filter)?),
        })
    }

    /// Run a SELECT whose first columns are `kind`'s columns on alias `t0`
    ///
    /// `tail` is everything after the column list (FROM, joins, WHERE, ...).
    pub(crate) fn select_any(
        &self,
        kind: EntityKind,
        tail: &str,
        params: &[&dyn ToSql],
    ) -> Result<Vec<AnyRecord>> {
        let columns = kind
            .columns()
            .iter()
            .map(|c| format!("t0.{}", c))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("SELECT {} {}", columns, tail);
        debug!(%sql, "select");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params, |row| map_any(kind, row))?;
        let records = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// Delete a record, refusing while any other row references it
    pub fn delete(&mut self, kind: EntityKind, id: i64) -> Result<()> {
        let tx = self.conn.transaction()?;
        ensure_exists(&tx, kind, id)?;

        for (referrer, relation) in kind.referenced_by() {
            let sql = format!(
                "SELECT COUNT(*) FROM {} WHERE {} = ?1",
                referrer.table(),
                relation.column
            );
            let count: i64 = tx.query_row(&sql, params![id], |row| row.get(0))?;
            if count > 0 {
                debug!(entity = kind.name(), id, referrer = referrer.table(), count, "delete restricted");
                return Err(CrmError::Restricted {
                    entity: kind.name(),
                    id,
                    referenced_by: referrer.table(),
                    count: count as usize,
                });
            }
        }

        let sql = format!("DELETE FROM {} WHERE id = ?1", kind.table());
        tx.execute(&sql, params![id])?;
        tx.commit()?;

        debug!(entity = kind.name(), id, "deleted");
        Ok(())
    }

    /// Human-readable label, following references as needed
    pub fn label(&self, kind: EntityKind, id: i64) -> Result<String> {
        Ok(match kind {
            EntityKind::Device => self.get_device(id)?.to_string(),
            EntityKind::Customer => self.get_customer(id)?.to_string(),
            EntityKind::DeviceInField => {
                let unit = self.get_device_in_field(id)?;
                let analyzer = self.get_device(unit.analyzer)?;
                let customer = self.get_customer(unit.customer)?;
                unit.label(&analyzer, &customer)
            }
            EntityKind::Order => {
                let order = self.get_order(id)?;
                let unit = self.label(EntityKind::DeviceInField, order.device)?;
                order.label(&unit)
            }
        })
    }
}

/// Fail with NotFound unless `kind` has a row with this id
fn ensure_exists(conn: &Connection, kind: EntityKind, id: i64) -> Result<()> {
    let sql = format!("SELECT 1 FROM {} WHERE id = ?1", kind.table());
    conn.query_row(&sql, params![id], |_| Ok(()))
        .optional()?
        .ok_or_else(|| CrmError::not_found(kind, id))
}

fn into_any<R: Into<AnyRecord>>(records: Vec<R>) -> Vec<AnyRecord> {
    records.into_iter().map(Into::into).collect()
}

/// Map a row laid out as `kind.columns()` to a record
fn map_any(kind: EntityKind, row: &rusqlite::Row<'_>) -> rusqlite::Result<AnyRecord> {
    Ok(match kind {
        EntityKind::Device => AnyRecord::Device(devices::from_row(row)?),
        EntityKind::Customer => AnyRecord::Customer(customers::from_row(row)?),
        EntityKind::DeviceInField => AnyRecord::DeviceInField(devices_in_field::from_row(row)?),
        EntityKind::Order => AnyRecord::Order(orders::from_row(row)?),
    })
}

/// Embedded migration files as (version, file name), ascending
fn migration_files() -> Vec<(u32, String)> {
    let mut files: Vec<(u32, String)> = EmbeddedMigrations::iter()
        .filter(|name| name.ends_with(".sql"))
        .filter_map(|name| {
            let version = name.split('_').next()?.parse().ok()?;
            Some((version, name.to_string()))
        })
        .collect();
    files.sort();
    files
}

/// Register `crm_contains(haystack, needle)`: Unicode case-insensitive substring test
fn register_functions(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        CONTAINS_FN,
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let haystack: Option<String> = ctx.get(0)?;
            let needle: Option<String> = ctx.get(1)?;
            Ok(match (haystack, needle) {
                (Some(h), Some(n)) => h.to_lowercase().contains(&n.to_lowercase()),
                _ => false,
            })
        },
    )?;
    Ok(())
}

/// Build a SELECT tail for a plain list with optional equality filters
pub(crate) fn list_tail<'a>(
    kind: EntityKind,
    conditions: &[(&'static str, &'a dyn ToSql)],
    page: Page,
) -> (String, Vec<&'a dyn ToSql>) {
    let mut sql = format!("FROM {} t0", kind.table());
    let mut params: Vec<&'a dyn ToSql> = Vec::new();

    for (i, (column, value)) in conditions.iter().enumerate() {
        sql.push_str(if i == 0 { " WHERE " } else { " AND " });
        sql.push_str(&format!("t0.{} = ?{}", column, i + 1));
        params.push(*value);
    }

    sql.push_str(&format!(" ORDER BY t0.id {}", page.sql()));
    (sql, params)
}
