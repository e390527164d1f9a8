//! Customer CRUD

use rusqlite::params;
use tracing::debug;

use super::{list_tail, ListFilter, Store};
use crate::core::error::{CrmError, Result};
use crate::core::schema::EntityKind;
use crate::entities::{AnyRecord, Customer, CustomerPatch, NewCustomer};

pub(super) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer {
        id: row.get(0)?,
        customer_name: row.get(1)?,
        customer_address: row.get(2)?,
        customer_city: row.get(3)?,
    })
}

impl Store {
    pub fn create_customer(&mut self, new: &NewCustomer) -> Result<Customer> {
        self.conn.execute(
            "INSERT INTO customers (customer_name, customer_address, customer_city)
             VALUES (?1, ?2, ?3)",
            params![new.customer_name, new.customer_address, new.customer_city],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, "created customer");
        self.get_customer(id)
    }

    pub fn get_customer(&self, id: i64) -> Result<Customer> {
        self.conn
            .query_row(
                "SELECT id, customer_name, customer_address, customer_city
                 FROM customers WHERE id = ?1",
                params![id],
                from_row,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    CrmError::not_found(EntityKind::Customer, id)
                }
                other => other.into(),
            })
    }

    pub fn list_customers(&self, filter: &ListFilter) -> Result<Vec<Customer>> {
        let (tail, params) = list_tail(EntityKind::Customer, &[], filter.page);
        Ok(self
            .select_any(EntityKind::Customer, &tail, &params)?
            .into_iter()
            .filter_map(|r| match r {
                AnyRecord::Customer(c) => Some(c),
                _ => None,
            })
            .collect())
    }

    pub fn update_customer(&mut self, id: i64, patch: &CustomerPatch) -> Result<Customer> {
        let mut customer = self.get_customer(id)?;
        customer.apply(patch);

        self.conn.execute(
            "UPDATE customers
             SET customer_name = ?1, customer_address = ?2, customer_city = ?3
             WHERE id = ?4",
            params![
                customer.customer_name,
                customer.customer_address,
                customer.customer_city,
                id
            ],
        )?;
        debug!(id, "updated customer");
        Ok(customer)
    }

    pub fn delete_customer(&mut self, id: i64) -> Result<()> {
        self.delete(EntityKind::Customer, id)
    }
}
