//! CRM: equipment service record keeper
//!
//! Tracks catalog devices, customer organizations, the physical units
//! deployed at customer sites, and the service orders raised against them.
//! The store enforces the data contract; the admin layer lists and
//! searches records through joined columns.

pub mod admin;
pub mod cli;
pub mod core;
pub mod entities;

pub use crate::core::{CrmError, Result};
