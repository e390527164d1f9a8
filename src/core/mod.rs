//! Core module - fundamental types and the record store

pub mod config;
pub mod entity;
pub mod error;
pub mod schema;
pub mod store;

pub use config::Config;
pub use entity::{FieldValue, OrderStatus, Record};
pub use error::{ConfigError, CrmError, Result};
pub use schema::{EntityKind, Relation};
pub use store::{ListFilter, Page, Store, StoreStats};
