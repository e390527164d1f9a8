//! Record trait - common interface for all CRM record types

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::core::error::CrmError;
use crate::core::schema::EntityKind;

/// Common trait for all stored records
pub trait Record: Serialize + DeserializeOwned {
    /// The entity this record belongs to
    const KIND: EntityKind;

    /// Get the record's primary key
    fn id(&self) -> i64;

    /// Read a field by its logical name
    ///
    /// Relation fields (e.g. `customer`) yield the referenced id.
    /// Returns `None` for names the entity does not have.
    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// A single column value, as read from a record or rendered into a list row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// The referenced id, if this value is one
    pub fn as_id(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<Option<DateTime<Utc>>> for FieldValue {
    fn from(ts: Option<DateTime<Utc>>) -> Self {
        ts.map_or(FieldValue::Null, FieldValue::Timestamp)
    }
}

/// Service order status
///
/// The only values an order may carry. Parsing is the single place where
/// free text is checked; everything past it holds a valid status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String")]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "open")]
    Open,
    #[serde(rename = "closed")]
    Closed,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "need info")]
    NeedInfo,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Open,
        OrderStatus::Closed,
        OrderStatus::InProgress,
        OrderStatus::NeedInfo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Open => "open",
            OrderStatus::Closed => "closed",
            OrderStatus::InProgress => "in progress",
            OrderStatus::NeedInfo => "need info",
        }
    }

    /// Comma-separated list of accepted values, for error help
    pub fn allowed() -> String {
        Self::ALL
            .iter()
            .map(|s| format!("'{}'", s.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = CrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CrmError::Validation {
                field: "order_status",
                value: s.to_string(),
                allowed: Self::allowed(),
            })
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = CrmError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
