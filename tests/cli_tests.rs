//! CLI and basic command tests

mod common;

use common::{crm, TestDb};
use predicates::prelude::*;

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    crm()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("service orders"));
}

#[test]
fn test_version_displays() {
    crm()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("crm"));
}

#[test]
fn test_unknown_command_fails() {
    crm()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_completions_for_bash() {
    crm()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("crm"));
}

// ============================================================================
// Init Command Tests
// ============================================================================

#[test]
fn test_init_creates_database() {
    let db = TestDb::new();

    db.crm()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"))
        .stdout(predicate::str::contains("schema version 1"));

    assert!(db.path().exists());
}

#[test]
fn test_init_twice_reopens() {
    let db = TestDb::new();
    db.crm().arg("init").assert().success();

    db.crm()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Opened"));
}

#[test]
fn test_database_flag_overrides_env() {
    let db = TestDb::new();
    let other = db.dir.path().join("other.sqlite3");

    db.crm()
        .args(["init", "--quiet", "--database"])
        .arg(&other)
        .assert()
        .success()
        .stdout(predicate::str::contains("other.sqlite3"));

    assert!(other.exists());
    assert!(!db.path().exists());
}

#[test]
fn test_config_file_sets_database() {
    let db = TestDb::new();
    let configured = db.dir.path().join("from-config.sqlite3");
    let config = db.dir.path().join("crm.yaml");
    std::fs::write(&config, format!("database: {}\n", configured.display())).unwrap();

    db.crm()
        .env_remove("CRM_DATABASE")
        .env("CRM_CONFIG", &config)
        .args(["init", "--quiet"])
        .assert()
        .success();

    assert!(configured.exists());
}

#[test]
fn test_invalid_page_size_is_reported() {
    let db = TestDb::new();

    db.crm()
        .env("CRM_PAGE_SIZE", "zero")
        .args(["device", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CRM_PAGE_SIZE"));
}

// ============================================================================
// Device / Customer CRUD
// ============================================================================

#[test]
fn test_device_new_show_update() {
    let db = TestDb::new();

    db.crm()
        .args(["device", "new", "--manufacturer", "Acme", "--model", "X1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created device"))
        .stdout(predicate::str::contains("Acme X1"));

    db.crm()
        .args(["device", "update", "1", "--model", "X2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme X2"));

    db.crm()
        .args(["device", "show", "1", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("manufacturer: Acme"))
        .stdout(predicate::str::contains("model: X2"));
}

#[test]
fn test_new_without_required_flag_fails_when_not_interactive() {
    let db = TestDb::new();

    db.crm()
        .args(["device", "new", "--manufacturer", "Acme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--model"));
}

#[test]
fn test_update_without_fields_fails() {
    let db = TestDb::new();
    db.create_device("Acme", "X1");

    db.crm()
        .args(["device", "update", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to update"));
}

#[test]
fn test_show_missing_is_not_found() {
    let db = TestDb::new();

    db.crm()
        .args(["customer", "show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("customer #42 not found"));
}

#[test]
fn test_customer_pretty_show() {
    let db = TestDb::new();
    let id = db.create_customer("Globex", "1 Main St", "Springfield");

    db.crm()
        .args(["customer", "show", &id.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Globex at 1 Main St"))
        .stdout(predicate::str::contains("customer_city"));
}

// ============================================================================
// List and Search
// ============================================================================

#[test]
fn test_device_list_tsv_has_headers() {
    let db = TestDb::new();
    db.create_device("Acme", "X1");
    db.create_device("Hooli", "H9");

    let out = db.stdout(&["device", "list"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "ID\tMANUFACTURER\tMODEL");
    assert_eq!(lines[1], "1\tAcme\tX1");
    assert_eq!(lines[2], "2\tHooli\tH9");
}

#[test]
fn test_empty_list_reports_nothing_found() {
    let db = TestDb::new();

    db.crm()
        .args(["customer", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No customers found"));
}

#[test]
fn test_customer_search_is_case_insensitive_for_cyrillic() {
    let db = TestDb::new();
    db.create_customer("ООО Ромашка", "ул. Ленина 5", "Москва");
    db.create_customer("Globex", "1 Main St", "Springfield");

    db.crm()
        .args(["customer", "list", "--search", "РОМАШКА", "--count"])
        .assert()
        .success()
        .stdout("1\n");

    // city is not a search field
    db.crm()
        .args(["customer", "list", "--search", "springfield", "--count"])
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn test_unit_list_renders_joined_columns() {
    let db = TestDb::new();
    db.seed();

    let out = db.stdout(&["unit", "list"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines[0],
        "ID\tSERIAL NUMBER\tMODEL\tCUSTOMER\tOWNER STATUS\tMANUFACTURER"
    );
    assert_eq!(lines[1], "1\tSN-001\tX1\tGlobex\towned\tAcme");
}

#[test]
fn test_unit_search_by_serial_substring() {
    let db = TestDb::new();
    let (device, customer, _) = db.seed();
    db.create_unit("sn-002", customer, device);
    db.create_unit("HX-100", customer, device);

    let out = db.stdout(&["unit", "list", "--search", "sn-00", "--format", "id"]);
    assert_eq!(out, "1\n2\n");

    db.crm()
        .args(["unit", "list", "--search", "", "--count"])
        .assert()
        .success()
        .stdout("3\n");
}

#[test]
fn test_unit_list_narrowed_by_customer() {
    let db = TestDb::new();
    let (device, _, _) = db.seed();
    let other = db.create_customer("Initech", "2 Side St", "Austin");
    db.create_unit("SN-900", other, device);

    let out = db.stdout(&["unit", "list", "--customer", &other.to_string(), "--format", "id"]);
    assert_eq!(out, "2\n");
}

#[test]
fn test_list_paging() {
    let db = TestDb::new();
    for model in ["A", "B", "C", "D"] {
        db.create_device("Acme", model);
    }

    let out = db.stdout(&["device", "list", "--limit", "2", "--offset", "1", "--format", "id"]);
    assert_eq!(out, "2\n3\n");

    let out = db.stdout(&["device", "list", "--search", "acme", "--limit", "1", "--offset", "3", "--format", "id"]);
    assert_eq!(out, "4\n");
}

#[test]
fn test_page_size_from_env() {
    let db = TestDb::new();
    for model in ["A", "B", "C"] {
        db.create_device("Acme", model);
    }

    let output = db
        .crm()
        .env("CRM_PAGE_SIZE", "2")
        .args(["device", "list", "--format", "id"])
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1\n2\n");

    let output = db
        .crm()
        .env("CRM_PAGE_SIZE", "2")
        .args(["device", "list", "--all", "--format", "id"])
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1\n2\n3\n");
}

#[test]
fn test_list_csv_and_json() {
    let db = TestDb::new();
    db.create_customer("Hooli, Inc.", "1 Infinite Loop", "Palo Alto");

    db.crm()
        .args(["customer", "list", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ID,Name,Address,City\n"))
        .stdout(predicate::str::contains("\"Hooli, Inc.\""));

    let json = db.stdout(&["customer", "list", "--format", "json"]);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["customer_name"], "Hooli, Inc.");
    assert_eq!(value[0]["id"], 1);
}

#[test]
fn test_table_format() {
    let db = TestDb::new();
    db.create_device("Acme", "X1");

    db.crm()
        .args(["device", "list", "--format", "table"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Manufacturer"))
        .stdout(predicate::str::contains("Acme"));
}
