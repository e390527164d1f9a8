//! Administrative query/search layer
//!
//! Lists and searches records the way an administrative front end shows
//! them: a curated set of columns per entity, some read through foreign
//! keys, and free-text search across configured (possibly joined) fields.

pub mod config;
pub mod joins;

pub use config::{AdminConfig, ListColumn};
pub use joins::JoinPlan;

use rusqlite::ToSql;
use serde::Serialize;
use tracing::{debug, warn};

use crate::core::entity::{FieldValue, Record};
use crate::core::error::{CrmError, Result};
use crate::core::schema::EntityKind;
use crate::core::store::{Page, Store, CONTAINS_FN};
use crate::entities::AnyRecord;

/// One rendered list row: the record id plus one value per list column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRow {
    pub id: i64,
    pub cells: Vec<FieldValue>,
}

impl ListRow {
    /// Cell values as display strings (blank for missing values)
    pub fn texts(&self) -> Vec<String> {
        self.cells.iter().map(|c| c.to_string()).collect()
    }
}

/// Read-only admin view over a store
pub struct Admin<'a> {
    store: &'a Store,
}

impl<'a> Admin<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Records whose configured search fields contain `query`, case-insensitively
    ///
    /// An empty or whitespace-only query matches every row. Results are in
    /// ascending id order.
    pub fn search(&self, kind: EntityKind, query: &str, page: Page) -> Result<Vec<AnyRecord>> {
        let config = AdminConfig::for_kind(kind);
        let mut plan = JoinPlan::new(kind);

        let conditions = if query.trim().is_empty() {
            Vec::new()
        } else {
            config
                .search_fields
                .iter()
                .map(|path| {
                    let column = plan.column(path)?;
                    Ok(format!("{}(CAST({} AS TEXT), ?1)", CONTAINS_FN, column))
                })
                .collect::<Result<Vec<_>>>()?
        };

        let mut tail = plan.from_clause();
        if !conditions.is_empty() {
            tail.push_str(" WHERE ");
            tail.push_str(&conditions.join(" OR "));
        }
        tail.push_str(&format!(" ORDER BY t0.id {}", page.sql()));

        let params: Vec<&dyn ToSql> = if conditions.is_empty() {
            Vec::new()
        } else {
            vec![&query]
        };

        let records = self.store.select_any(kind, &tail, &params)?;
        debug!(entity = kind.name(), query, hits = records.len(), "search");
        Ok(records)
    }

    /// Search and render each hit as a list row
    pub fn search_rows(&self, kind: EntityKind, query: &str, page: Page) -> Result<Vec<ListRow>> {
        self.search(kind, query, page)?
            .iter()
            .map(|record| self.render_list_row(record))
            .collect()
    }

    /// Render a record as its entity's list columns
    ///
    /// Joined columns follow the foreign key and read the target field. A
    /// referenced row that cannot be loaded yields a blank cell.
    pub fn render_list_row(&self, record: &AnyRecord) -> Result<ListRow> {
        let config = AdminConfig::for_kind(record.kind());
        let cells = config
            .list_display
            .iter()
            .map(|column| self.resolve(record, column.path))
            .collect::<Result<Vec<_>>>()?;

        Ok(ListRow {
            id: record.id(),
            cells,
        })
    }

    /// Typed convenience over [`Admin::render_list_row`]
    pub fn render<R: Record + Clone + Into<AnyRecord>>(&self, record: &R) -> Result<ListRow> {
        self.render_list_row(&record.clone().into())
    }

    /// Follow a dotted path from `record` to a value
    fn resolve(&self, record: &AnyRecord, path: &str) -> Result<FieldValue> {
        let unknown = || CrmError::UnknownField {
            entity: record.kind().name(),
            path: path.to_string(),
        };

        let segments: Vec<&str> = path.split('.').collect();
        let (last, hops) = segments.split_last().ok_or_else(unknown)?;

        let mut current = record.clone();
        for hop in hops {
            let relation = current.kind().relation(hop).ok_or_else(unknown)?;
            let Some(target_id) = current.field(hop).and_then(|v| v.as_id()) else {
                return Ok(FieldValue::Null);
            };

            current = match self.store.get_any(relation.target, target_id) {
                Ok(next) => next,
                Err(CrmError::NotFound { .. }) => {
                    warn!(
                        entity = record.kind().name(),
                        id = record.id(),
                        path,
                        "joined row missing; rendering blank"
                    );
                    return Ok(FieldValue::Null);
                }
                Err(e) => return Err(e),
            };
        }

        current.field(last).ok_or_else(unknown)
    }
}
