//! Customer entity type - organizations that operate deployed equipment

use serde::{Deserialize, Serialize};

use crate::core::entity::{FieldValue, Record};
use crate::core::schema::EntityKind;

/// A customer organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,

    /// Organization name
    pub customer_name: String,

    /// Street address
    pub customer_address: String,

    /// City
    pub customer_city: String,
}

/// Fields for creating a customer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCustomer {
    pub customer_name: String,
    pub customer_address: String,
    pub customer_city: String,
}

/// Partial update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CustomerPatch {
    pub customer_name: Option<String>,
    pub customer_address: Option<String>,
    pub customer_city: Option<String>,
}

impl NewCustomer {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            customer_name: name.into(),
            customer_address: address.into(),
            customer_city: city.into(),
        }
    }
}

impl CustomerPatch {
    pub fn is_empty(&self) -> bool {
        self.customer_name.is_none()
            && self.customer_address.is_none()
            && self.customer_city.is_none()
    }
}

impl Customer {
    /// Apply a partial update in place
    pub fn apply(&mut self, patch: &CustomerPatch) {
        if let Some(ref name) = patch.customer_name {
            self.customer_name = name.clone();
        }
        if let Some(ref address) = patch.customer_address {
            self.customer_address = address.clone();
        }
        if let Some(ref city) = patch.customer_city {
            self.customer_city = city.clone();
        }
    }
}

impl Record for Customer {
    const KIND: EntityKind = EntityKind::Customer;

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.into()),
            "customer_name" => Some(self.customer_name.as_str().into()),
            "customer_address" => Some(self.customer_address.as_str().into()),
            "customer_city" => Some(self.customer_city.as_str().into()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Customer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.customer_name, self.customer_address)
    }
}
