//! Order entity type - service requests against deployed units
//!
//! `created_at` is stamped once when the order is inserted. `last_updated_at`
//! is stamped on every write, creation included; the column stays nullable
//! for rows written by other tools.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{FieldValue, OrderStatus, Record};
use crate::core::schema::EntityKind;

/// A service order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,

    /// Device in field id
    pub device: i64,

    /// What needs doing
    pub order_description: String,

    /// Creation timestamp, never changed afterwards
    pub created_at: DateTime<Utc>,

    /// Timestamp of the latest write
    pub last_updated_at: Option<DateTime<Utc>>,

    pub order_status: OrderStatus,
}

/// Fields for creating an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub device: i64,
    pub order_description: String,
    #[serde(default)]
    pub order_status: OrderStatus,
}

/// Partial update; `None` leaves the field unchanged
///
/// Timestamps are not patchable: the store stamps them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrderPatch {
    pub device: Option<i64>,
    pub order_description: Option<String>,
    pub order_status: Option<OrderStatus>,
}

impl NewOrder {
    pub fn new(device: i64, description: impl Into<String>, status: OrderStatus) -> Self {
        Self {
            device,
            order_description: description.into(),
            order_status: status,
        }
    }
}

impl OrderPatch {
    /// Patch that only changes the status
    pub fn status(status: OrderStatus) -> Self {
        Self {
            order_status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.device.is_none() && self.order_description.is_none() && self.order_status.is_none()
    }
}

impl Order {
    /// Apply a partial update in place (timestamps untouched)
    pub fn apply(&mut self, patch: &OrderPatch) {
        if let Some(device) = patch.device {
            self.device = device;
        }
        if let Some(ref description) = patch.order_description {
            self.order_description = description.clone();
        }
        if let Some(status) = patch.order_status {
            self.order_status = status;
        }
    }

    /// Label built from the referenced unit's label
    pub fn label(&self, device_label: &str) -> String {
        format!("Order #{} for {}", self.id, device_label)
    }
}

impl Record for Order {
    const KIND: EntityKind = EntityKind::Order;

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.into()),
            "device" => Some(self.device.into()),
            "order_description" => Some(self.order_description.as_str().into()),
            "created_at" => Some(FieldValue::Timestamp(self.created_at)),
            "last_updated_at" => Some(self.last_updated_at.into()),
            "order_status" => Some(self.order_status.as_str().into()),
            _ => None,
        }
    }
}
