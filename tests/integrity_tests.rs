//! Referential integrity: restrict-on-delete and reference checks

mod common;

use common::TestDb;
use predicates::prelude::*;

#[test]
fn test_delete_referenced_customer_is_refused() {
    let db = TestDb::new();
    let (_, customer, _) = db.seed();

    db.crm()
        .args(["customer", "delete", &customer.to_string(), "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("devices_in_fields"));

    db.crm()
        .args(["customer", "list", "--count"])
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn test_delete_referenced_device_is_refused() {
    let db = TestDb::new();
    let (device, _, _) = db.seed();

    db.crm()
        .args(["device", "delete", &device.to_string(), "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot delete device"));
}

#[test]
fn test_delete_referenced_unit_is_refused() {
    let db = TestDb::new();
    let (_, _, unit) = db.seed();
    db.create_order(unit, "calibration");

    db.crm()
        .args(["unit", "delete", &unit.to_string(), "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("orders"));

    db.crm()
        .args(["unit", "show", &unit.to_string()])
        .assert()
        .success();
}

#[test]
fn test_delete_chain_in_dependency_order() {
    let db = TestDb::new();
    let (device, customer, unit) = db.seed();
    let order = db.create_order(unit, "calibration");

    for (entity, id) in [
        ("order", order),
        ("unit", unit),
        ("customer", customer),
        ("device", device),
    ] {
        db.crm()
            .args([entity, "delete", &id.to_string(), "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Deleted"));
    }

    db.crm()
        .args(["device", "list", "--count"])
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn test_delete_requires_confirmation_when_not_interactive() {
    let db = TestDb::new();
    let device = db.create_device("Acme", "X1");

    db.crm()
        .args(["device", "delete", &device.to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    db.crm()
        .args(["device", "show", &device.to_string()])
        .assert()
        .success();
}

#[test]
fn test_delete_missing_is_not_found() {
    let db = TestDb::new();
    db.crm().arg("init").assert().success();

    db.crm()
        .args(["order", "delete", "7", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("order #7 not found"));
}

#[test]
fn test_unit_with_missing_references_is_rejected() {
    let db = TestDb::new();
    let device = db.create_device("Acme", "X1");

    db.crm()
        .args([
            "unit",
            "new",
            "--serial",
            "SN-001",
            "--customer",
            "5",
            "--analyzer",
            &device.to_string(),
            "--owner-status",
            "owned",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("customer #5 not found"));
}

#[test]
fn test_unit_update_to_missing_analyzer_leaves_row() {
    let db = TestDb::new();
    let (device, _, unit) = db.seed();

    db.crm()
        .args(["unit", "update", &unit.to_string(), "--analyzer", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("device #99 not found"));

    let json = db.stdout(&["unit", "show", &unit.to_string(), "--format", "json"]);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["analyzer"], device);
}
