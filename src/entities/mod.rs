//! Entity type definitions

pub mod customer;
pub mod device;
pub mod device_in_field;
pub mod order;

pub use customer::{Customer, CustomerPatch, NewCustomer};
pub use device::{Device, DevicePatch, NewDevice};
pub use device_in_field::{DeviceInField, DeviceInFieldPatch, NewDeviceInField};
pub use order::{NewOrder, Order, OrderPatch};

use serde::Serialize;

use crate::core::entity::{FieldValue, Record};
use crate::core::schema::EntityKind;

/// A record of any entity type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnyRecord {
    Device(Device),
    Customer(Customer),
    DeviceInField(DeviceInField),
    Order(Order),
}

impl AnyRecord {
    pub fn kind(&self) -> EntityKind {
        match self {
            AnyRecord::Device(_) => EntityKind::Device,
            AnyRecord::Customer(_) => EntityKind::Customer,
            AnyRecord::DeviceInField(_) => EntityKind::DeviceInField,
            AnyRecord::Order(_) => EntityKind::Order,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            AnyRecord::Device(r) => r.id(),
            AnyRecord::Customer(r) => r.id(),
            AnyRecord::DeviceInField(r) => r.id(),
            AnyRecord::Order(r) => r.id(),
        }
    }

    pub fn field(&self, name: &str) -> Option<FieldValue> {
        match self {
            AnyRecord::Device(r) => r.field(name),
            AnyRecord::Customer(r) => r.field(name),
            AnyRecord::DeviceInField(r) => r.field(name),
            AnyRecord::Order(r) => r.field(name),
        }
    }
}

impl From<Device> for AnyRecord {
    fn from(r: Device) -> Self {
        AnyRecord::Device(r)
    }
}

impl From<Customer> for AnyRecord {
    fn from(r: Customer) -> Self {
        AnyRecord::Customer(r)
    }
}

impl From<DeviceInField> for AnyRecord {
    fn from(r: DeviceInField) -> Self {
        AnyRecord::DeviceInField(r)
    }
}

impl From<Order> for AnyRecord {
    fn from(r: Order) -> Self {
        AnyRecord::Order(r)
    }
}
