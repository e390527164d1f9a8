//! Per-entity admin configuration
//!
//! Declared once as data; the search and rendering code in this module is
//! generic over it. Paths are dotted field names that follow relations
//! (`device.analyzer.model` reads the model of the order's unit's catalog
//! device).

use crate::core::schema::EntityKind;

/// One list column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListColumn {
    /// Dotted field path
    pub path: &'static str,
    /// Column header
    pub header: &'static str,
}

impl ListColumn {
    pub const fn new(path: &'static str, header: &'static str) -> Self {
        Self { path, header }
    }
}

/// How an entity is listed, searched and edited by an administrative front end
#[derive(Debug, Clone, Copy)]
pub struct AdminConfig {
    pub kind: EntityKind,
    /// Columns in display order
    pub list_display: &'static [ListColumn],
    /// Paths matched by free-text search
    pub search_fields: &'static [&'static str],
    /// Relations entered as a raw id instead of a full selection list
    pub raw_id_fields: &'static [&'static str],
}

pub const DEVICE_ADMIN: AdminConfig = AdminConfig {
    kind: EntityKind::Device,
    list_display: &[
        ListColumn::new("id", "ID"),
        ListColumn::new("manufacturer", "Manufacturer"),
        ListColumn::new("model", "Model"),
    ],
    search_fields: &["manufacturer", "model"],
    raw_id_fields: &[],
};

pub const CUSTOMER_ADMIN: AdminConfig = AdminConfig {
    kind: EntityKind::Customer,
    list_display: &[
        ListColumn::new("id", "ID"),
        ListColumn::new("customer_name", "Name"),
        ListColumn::new("customer_address", "Address"),
        ListColumn::new("customer_city", "City"),
    ],
    search_fields: &["customer_name", "customer_address"],
    raw_id_fields: &[],
};

pub const DEVICE_IN_FIELD_ADMIN: AdminConfig = AdminConfig {
    kind: EntityKind::DeviceInField,
    list_display: &[
        ListColumn::new("id", "ID"),
        ListColumn::new("serial_number", "Serial number"),
        ListColumn::new("analyzer.model", "Model"),
        ListColumn::new("customer.customer_name", "Customer"),
        ListColumn::new("owner_status", "Owner status"),
        ListColumn::new("analyzer.manufacturer", "Manufacturer"),
    ],
    search_fields: &["serial_number"],
    raw_id_fields: &["customer", "analyzer"],
};

pub const ORDER_ADMIN: AdminConfig = AdminConfig {
    kind: EntityKind::Order,
    list_display: &[
        ListColumn::new("id", "ID"),
        ListColumn::new("device.analyzer.manufacturer", "Manufacturer"),
        ListColumn::new("device.analyzer.model", "Model"),
        ListColumn::new("device.serial_number", "Serial number"),
        ListColumn::new("device.customer.customer_name", "Customer"),
        ListColumn::new("order_description", "Description"),
        ListColumn::new("created_at", "Created"),
        ListColumn::new("last_updated_at", "Last updated"),
        ListColumn::new("order_status", "Status"),
    ],
    search_fields: &[
        "device.customer.customer_name",
        "device.id",
        "device.serial_number",
        "device.analyzer.model",
        "device.analyzer.manufacturer",
    ],
    raw_id_fields: &["device"],
};

impl AdminConfig {
    /// The configuration registered for an entity
    pub fn for_kind(kind: EntityKind) -> &'static AdminConfig {
        match kind {
            EntityKind::Device => &DEVICE_ADMIN,
            EntityKind::Customer => &CUSTOMER_ADMIN,
            EntityKind::DeviceInField => &DEVICE_IN_FIELD_ADMIN,
            EntityKind::Order => &ORDER_ADMIN,
        }
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.list_display.iter().map(|c| c.header).collect()
    }

    pub fn is_raw_id(&self, field: &str) -> bool {
        self.raw_id_fields.iter().any(|f| *f == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Walk a dotted path through the schema, returning false on any unknown hop
    fn path_resolves(kind: EntityKind, path: &str) -> bool {
        let segments: Vec<&str> = path.split('.').collect();
        let (last, hops) = segments.split_last().unwrap();
        let mut current = kind;
        for hop in hops {
            match current.relation(hop) {
                Some(relation) => current = relation.target,
                None => return false,
            }
        }
        current.fields().iter().any(|f| f == last)
    }

    #[test]
    fn test_every_configured_path_resolves() {
        for kind in EntityKind::ALL {
            let config = AdminConfig::for_kind(kind);
            assert_eq!(config.kind, kind);

            for column in config.list_display {
                assert!(
                    path_resolves(kind, column.path),
                    "{}: list column {} does not resolve",
                    kind,
                    column.path
                );
            }
            for path in config.search_fields {
                assert!(
                    path_resolves(kind, path),
                    "{}: search field {} does not resolve",
                    kind,
                    path
                );
            }
            for field in config.raw_id_fields {
                assert!(
                    kind.relation(field).is_some(),
                    "{}: raw id field {} is not a relation",
                    kind,
                    field
                );
            }
        }
    }

    #[test]
    fn test_list_columns_start_with_id() {
        for kind in EntityKind::ALL {
            assert_eq!(AdminConfig::for_kind(kind).list_display[0].path, "id");
        }
    }

    #[test]
    fn test_order_headers() {
        assert_eq!(
            ORDER_ADMIN.headers(),
            vec![
                "ID",
                "Manufacturer",
                "Model",
                "Serial number",
                "Customer",
                "Description",
                "Created",
                "Last updated",
                "Status"
            ]
        );
        assert!(ORDER_ADMIN.is_raw_id("device"));
        assert!(!DEVICE_ADMIN.is_raw_id("device"));
    }
}
