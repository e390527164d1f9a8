//! Order CRUD
//!
//! Every write stamps `last_updated_at` with the write time; `created_at`
//! is only ever written by the insert.

use chrono::Utc;
use rusqlite::{params, Connection, ToSql};
use tracing::debug;

use super::{ensure_exists, list_tail, ListFilter, Store};
use crate::core::error::{CrmError, Result};
use crate::core::schema::EntityKind;
use crate::entities::{AnyRecord, NewOrder, Order, OrderPatch};

const SELECT: &str = "SELECT id, device_id, order_description, created_at, last_updated_at,
                             order_status
                      FROM orders WHERE id = ?1";

pub(super) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Order> {
    Ok(Order {
        id: row.get(0)?,
        device: row.get(1)?,
        order_description: row.get(2)?,
        created_at: row.get(3)?,
        last_updated_at: row.get(4)?,
        order_status: row.get(5)?,
    })
}

fn fetch(conn: &Connection, id: i64) -> Result<Order> {
    conn.query_row(SELECT, params![id], from_row)
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => CrmError::not_found(EntityKind::Order, id),
            other => other.into(),
        })
}

impl Store {
    pub fn create_order(&mut self, new: &NewOrder) -> Result<Order> {
        let tx = self.conn.transaction()?;
        ensure_exists(&tx, EntityKind::DeviceInField, new.device)?;

        let now = Utc::now();
        tx.execute(
            "INSERT INTO orders (device_id, order_description, created_at, last_updated_at, order_status)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![new.device, new.order_description, now, now, new.order_status],
        )?;
        let id = tx.last_insert_rowid();
        let order = fetch(&tx, id)?;
        tx.commit()?;

        debug!(id, device = new.device, status = %order.order_status, "created order");
        Ok(order)
    }

    pub fn get_order(&self, id: i64) -> Result<Order> {
        fetch(&self.conn, id)
    }

    /// List orders, optionally narrowed to one unit and/or status
    pub fn list_orders(&self, filter: &ListFilter) -> Result<Vec<Order>> {
        let mut conditions: Vec<(&'static str, &dyn ToSql)> = Vec::new();
        if let Some(ref device) = filter.device {
            conditions.push(("device_id", device));
        }
        if let Some(ref status) = filter.status {
            conditions.push(("order_status", status));
        }

        let (tail, params) = list_tail(EntityKind::Order, &conditions, filter.page);
        Ok(self
            .select_any(EntityKind::Order, &tail, &params)?
            .into_iter()
            .filter_map(|r| match r {
                AnyRecord::Order(o) => Some(o),
                _ => None,
            })
            .collect())
    }

    /// Apply a patch and re-stamp `last_updated_at`
    ///
    /// An empty patch still counts as a write.
    pub fn update_order(&mut self, id: i64, patch: &OrderPatch) -> Result<Order> {
        let tx = self.conn.transaction()?;
        let mut order = fetch(&tx, id)?;
        order.apply(patch);
        ensure_exists(&tx, EntityKind::DeviceInField, order.device)?;
        order.last_updated_at = Some(Utc::now());

        tx.execute(
            "UPDATE orders
             SET device_id = ?1, order_description = ?2, last_updated_at = ?3, order_status = ?4
             WHERE id = ?5",
            params![
                order.device,
                order.order_description,
                order.last_updated_at,
                order.order_status,
                id
            ],
        )?;
        tx.commit()?;

        debug!(id, status = %order.order_status, "updated order");
        Ok(order)
    }

    pub fn delete_order(&mut self, id: i64) -> Result<()> {
        self.delete(EntityKind::Order, id)
    }
}
