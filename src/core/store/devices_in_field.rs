//! DeviceInField CRUD
//!
//! Writes check that the referenced customer and catalog device exist
//! inside the same transaction as the insert/update.

use rusqlite::{params, Connection, ToSql};
use tracing::debug;

use super::{ensure_exists, list_tail, ListFilter, Store};
use crate::core::error::{CrmError, Result};
use crate::core::schema::EntityKind;
use crate::entities::{AnyRecord, DeviceInField, DeviceInFieldPatch, NewDeviceInField};

const SELECT: &str = "SELECT id, serial_number, customer_id, analyzer_id, owner_status
                      FROM devices_in_fields WHERE id = ?1";

pub(super) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DeviceInField> {
    Ok(DeviceInField {
        id: row.get(0)?,
        serial_number: row.get(1)?,
        customer: row.get(2)?,
        analyzer: row.get(3)?,
        owner_status: row.get(4)?,
    })
}

fn fetch(conn: &Connection, id: i64) -> Result<DeviceInField> {
    conn.query_row(SELECT, params![id], from_row)
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                CrmError::not_found(EntityKind::DeviceInField, id)
            }
            other => other.into(),
        })
}

fn ensure_references(conn: &Connection, customer: i64, analyzer: i64) -> Result<()> {
    ensure_exists(conn, EntityKind::Customer, customer)?;
    ensure_exists(conn, EntityKind::Device, analyzer)
}

impl Store {
    pub fn create_device_in_field(&mut self, new: &NewDeviceInField) -> Result<DeviceInField> {
        let tx = self.conn.transaction()?;
        ensure_references(&tx, new.customer, new.analyzer)?;

        tx.execute(
            "INSERT INTO devices_in_fields (serial_number, customer_id, analyzer_id, owner_status)
             VALUES (?1, ?2, ?3, ?4)",
            params![new.serial_number, new.customer, new.analyzer, new.owner_status],
        )?;
        let id = tx.last_insert_rowid();
        let unit = fetch(&tx, id)?;
        tx.commit()?;

        debug!(id, serial = %unit.serial_number, "created device in field");
        Ok(unit)
    }

    pub fn get_device_in_field(&self, id: i64) -> Result<DeviceInField> {
        fetch(&self.conn, id)
    }

    /// List units, optionally narrowed to one customer and/or catalog device
    pub fn list_devices_in_field(&self, filter: &ListFilter) -> Result<Vec<DeviceInField>> {
        let mut conditions: Vec<(&'static str, &dyn ToSql)> = Vec::new();
        if let Some(ref customer) = filter.customer {
            conditions.push(("customer_id", customer));
        }
        if let Some(ref analyzer) = filter.analyzer {
            conditions.push(("analyzer_id", analyzer));
        }

        let (tail, params) = list_tail(EntityKind::DeviceInField, &conditions, filter.page);
        Ok(self
            .select_any(EntityKind::DeviceInField, &tail, &params)?
            .into_iter()
            .filter_map(|r| match r {
                AnyRecord::DeviceInField(u) => Some(u),
                _ => None,
            })
            .collect())
    }

    pub fn update_device_in_field(
        &mut self,
        id: i64,
        patch: &DeviceInFieldPatch,
    ) -> Result<DeviceInField> {
        let tx = self.conn.transaction()?;
        let mut unit = fetch(&tx, id)?;
        unit.apply(patch);
        ensure_references(&tx, unit.customer, unit.analyzer)?;

        tx.execute(
            "UPDATE devices_in_fields
             SET serial_number = ?1, customer_id = ?2, analyzer_id = ?3, owner_status = ?4
             WHERE id = ?5",
            params![
                unit.serial_number,
                unit.customer,
                unit.analyzer,
                unit.owner_status,
                id
            ],
        )?;
        tx.commit()?;

        debug!(id, "updated device in field");
        Ok(unit)
    }

    pub fn delete_device_in_field(&mut self, id: i64) -> Result<()> {
        self.delete(EntityKind::DeviceInField, id)
    }
}
