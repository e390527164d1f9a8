//! DeviceInField entity type - physical units deployed at customer sites

use serde::{Deserialize, Serialize};

use crate::core::entity::{FieldValue, Record};
use crate::core::schema::EntityKind;
use crate::entities::{Customer, Device};

/// One serial-numbered unit of a catalog device, located at a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInField {
    pub id: i64,

    /// Manufacturer serial number
    pub serial_number: String,

    /// Customer id
    pub customer: i64,

    /// Catalog device id
    pub analyzer: i64,

    /// Possession state (free text, e.g. "owned", "leased")
    pub owner_status: String,
}

/// Fields for creating a device in field
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewDeviceInField {
    pub serial_number: String,
    pub customer: i64,
    pub analyzer: i64,
    pub owner_status: String,
}

/// Partial update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeviceInFieldPatch {
    pub serial_number: Option<String>,
    pub customer: Option<i64>,
    pub analyzer: Option<i64>,
    pub owner_status: Option<String>,
}

impl DeviceInFieldPatch {
    pub fn is_empty(&self) -> bool {
        self.serial_number.is_none()
            && self.customer.is_none()
            && self.analyzer.is_none()
            && self.owner_status.is_none()
    }
}

impl DeviceInField {
    /// Apply a partial update in place
    pub fn apply(&mut self, patch: &DeviceInFieldPatch) {
        if let Some(ref serial) = patch.serial_number {
            self.serial_number = serial.clone();
        }
        if let Some(customer) = patch.customer {
            self.customer = customer;
        }
        if let Some(analyzer) = patch.analyzer {
            self.analyzer = analyzer;
        }
        if let Some(ref status) = patch.owner_status {
            self.owner_status = status.clone();
        }
    }

    /// Label built from the referenced catalog device and customer
    pub fn label(&self, analyzer: &Device, customer: &Customer) -> String {
        format!("{} s/n {} at {}", analyzer, self.serial_number, customer)
    }
}

impl Record for DeviceInField {
    const KIND: EntityKind = EntityKind::DeviceInField;

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.into()),
            "serial_number" => Some(self.serial_number.as_str().into()),
            "customer" => Some(self.customer.into()),
            "analyzer" => Some(self.analyzer.into()),
            "owner_status" => Some(self.owner_status.as_str().into()),
            _ => None,
        }
    }
}
