//! Device CRUD

use rusqlite::params;
use tracing::debug;

use super::{list_tail, ListFilter, Store};
use crate::core::error::{CrmError, Result};
use crate::core::schema::EntityKind;
use crate::entities::{AnyRecord, Device, DevicePatch, NewDevice};

pub(super) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Device> {
    Ok(Device {
        id: row.get(0)?,
        manufacturer: row.get(1)?,
        model: row.get(2)?,
    })
}

impl Store {
    pub fn create_device(&mut self, new: &NewDevice) -> Result<Device> {
        self.conn.execute(
            "INSERT INTO devices (manufacturer, model) VALUES (?1, ?2)",
            params![new.manufacturer, new.model],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, "created device");
        self.get_device(id)
    }

    pub fn get_device(&self, id: i64) -> Result<Device> {
        self.conn
            .query_row(
                "SELECT id, manufacturer, model FROM devices WHERE id = ?1",
                params![id],
                from_row,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => CrmError::not_found(EntityKind::Device, id),
                other => other.into(),
            })
    }

    pub fn list_devices(&self, filter: &ListFilter) -> Result<Vec<Device>> {
        let (tail, params) = list_tail(EntityKind::Device, &[], filter.page);
        Ok(self
            .select_any(EntityKind::Device, &tail, &params)?
            .into_iter()
            .filter_map(|r| match r {
                AnyRecord::Device(d) => Some(d),
                _ => None,
            })
            .collect())
    }

    pub fn update_device(&mut self, id: i64, patch: &DevicePatch) -> Result<Device> {
        let mut device = self.get_device(id)?;
        device.apply(patch);

        self.conn.execute(
            "UPDATE devices SET manufacturer = ?1, model = ?2 WHERE id = ?3",
            params![device.manufacturer, device.model, id],
        )?;
        debug!(id, "updated device");
        Ok(device)
    }

    pub fn delete_device(&mut self, id: i64) -> Result<()> {
        self.delete(EntityKind::Device, id)
    }
}
