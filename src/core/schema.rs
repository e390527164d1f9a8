//! Relational schema metadata
//!
//! Table names, column layout and foreign-key relations for the four
//! entities. The store uses this for restrict-on-delete checks and row
//! mapping; the admin layer walks relations to resolve dotted field paths.

use std::fmt;

/// The four record types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Device,
    Customer,
    DeviceInField,
    Order,
}

/// A foreign key from one entity to another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    /// Logical field name (e.g. `customer`)
    pub field: &'static str,
    /// Storage column (e.g. `customer_id`)
    pub column: &'static str,
    /// Referenced entity
    pub target: EntityKind,
}

const DEVICE_IN_FIELD_RELATIONS: &[Relation] = &[
    Relation {
        field: "customer",
        column: "customer_id",
        target: EntityKind::Customer,
    },
    Relation {
        field: "analyzer",
        column: "analyzer_id",
        target: EntityKind::Device,
    },
];

const ORDER_RELATIONS: &[Relation] = &[Relation {
    field: "device",
    column: "device_id",
    target: EntityKind::DeviceInField,
}];

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Device,
        EntityKind::Customer,
        EntityKind::DeviceInField,
        EntityKind::Order,
    ];

    /// Storage table name
    pub fn table(self) -> &'static str {
        match self {
            EntityKind::Device => "devices",
            EntityKind::Customer => "customers",
            EntityKind::DeviceInField => "devices_in_fields",
            EntityKind::Order => "orders",
        }
    }

    /// Singular name for messages
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Device => "device",
            EntityKind::Customer => "customer",
            EntityKind::DeviceInField => "device in field",
            EntityKind::Order => "order",
        }
    }

    /// Plural name for messages
    pub fn name_plural(self) -> &'static str {
        match self {
            EntityKind::Device => "devices",
            EntityKind::Customer => "customers",
            EntityKind::DeviceInField => "devices in field",
            EntityKind::Order => "orders",
        }
    }

    /// Logical field names, in storage column order
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            EntityKind::Device => &["id", "manufacturer", "model"],
            EntityKind::Customer => &["id", "customer_name", "customer_address", "customer_city"],
            EntityKind::DeviceInField => {
                &["id", "serial_number", "customer", "analyzer", "owner_status"]
            }
            EntityKind::Order => &[
                "id",
                "device",
                "order_description",
                "created_at",
                "last_updated_at",
                "order_status",
            ],
        }
    }

    /// Foreign keys held by this entity
    pub fn relations(self) -> &'static [Relation] {
        match self {
            EntityKind::Device | EntityKind::Customer => &[],
            EntityKind::DeviceInField => DEVICE_IN_FIELD_RELATIONS,
            EntityKind::Order => ORDER_RELATIONS,
        }
    }

    /// Look up a relation by its logical field name
    pub fn relation(self, field: &str) -> Option<&'static Relation> {
        self.relations().iter().find(|r| r.field == field)
    }

    /// Map a logical field to its storage column
    pub fn column(self, field: &str) -> Option<&'static str> {
        if let Some(relation) = self.relation(field) {
            return Some(relation.column);
        }
        self.fields().iter().copied().find(|f| *f == field)
    }

    /// Storage columns in the order row mappers expect them
    pub fn columns(self) -> Vec<&'static str> {
        self.fields()
            .iter()
            .filter_map(|f| self.column(f))
            .collect()
    }

    /// Every (entity, relation) pair whose foreign key points at this entity
    pub fn referenced_by(self) -> Vec<(EntityKind, &'static Relation)> {
        Self::ALL
            .iter()
            .flat_map(|kind| kind.relations().iter().map(move |r| (*kind, r)))
            .filter(|(_, r)| r.target == self)
            .collect()
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_follow_relations() {
        assert_eq!(
            EntityKind::DeviceInField.columns(),
            vec!["id", "serial_number", "customer_id", "analyzer_id", "owner_status"]
        );
        assert_eq!(EntityKind::Order.column("device"), Some("device_id"));
        assert_eq!(EntityKind::Order.column("order_status"), Some("order_status"));
        assert_eq!(EntityKind::Order.column("missing"), None);
    }

    #[test]
    fn test_referenced_by() {
        let customer_refs = EntityKind::Customer.referenced_by();
        assert_eq!(customer_refs.len(), 1);
        assert_eq!(customer_refs[0].0, EntityKind::DeviceInField);
        assert_eq!(customer_refs[0].1.column, "customer_id");

        let device_refs = EntityKind::Device.referenced_by();
        assert_eq!(device_refs.len(), 1);
        assert_eq!(device_refs[0].1.field, "analyzer");

        let unit_refs = EntityKind::DeviceInField.referenced_by();
        assert_eq!(unit_refs.len(), 1);
        assert_eq!(unit_refs[0].0, EntityKind::Order);

        assert!(EntityKind::Order.referenced_by().is_empty());
    }

    #[test]
    fn test_table_names() {
        let tables: Vec<_> = EntityKind::ALL.iter().map(|k| k.table()).collect();
        assert_eq!(
            tables,
            vec!["devices", "customers", "devices_in_fields", "orders"]
        );
    }
}
