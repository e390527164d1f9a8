//! Device entity type - equipment catalog entries
//!
//! A Device is a type/model of equipment, not a physical unit; physical
//! units are [`DeviceInField`](super::DeviceInField) records.

use serde::{Deserialize, Serialize};

use crate::core::entity::{FieldValue, Record};
use crate::core::schema::EntityKind;

/// A catalog device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: i64,

    /// Manufacturer name
    pub manufacturer: String,

    /// Model designation
    pub model: String,
}

/// Fields for creating a device
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewDevice {
    pub manufacturer: String,
    pub model: String,
}

/// Partial update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DevicePatch {
    pub manufacturer: Option<String>,
    pub model: Option<String>,
}

impl NewDevice {
    pub fn new(manufacturer: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            model: model.into(),
        }
    }
}

impl DevicePatch {
    pub fn is_empty(&self) -> bool {
        self.manufacturer.is_none() && self.model.is_none()
    }
}

impl Device {
    /// Apply a partial update in place
    pub fn apply(&mut self, patch: &DevicePatch) {
        if let Some(ref manufacturer) = patch.manufacturer {
            self.manufacturer = manufacturer.clone();
        }
        if let Some(ref model) = patch.model {
            self.model = model.clone();
        }
    }
}

impl Record for Device {
    const KIND: EntityKind = EntityKind::Device;

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.into()),
            "manufacturer" => Some(self.manufacturer.as_str().into()),
            "model" => Some(self.model.as_str().into()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.manufacturer, self.model)
    }
}
