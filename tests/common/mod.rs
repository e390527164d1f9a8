//! Shared test helpers for integration tests
//!
//! Every test gets its own database file in a temp directory; config
//! lookups are pointed at the same directory so a developer's own
//! `config.yaml` never leaks in.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// An isolated database for one test
pub struct TestDb {
    pub dir: TempDir,
}

impl TestDb {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("crm.sqlite3")
    }

    /// A `crm` command bound to this database
    pub fn crm(&self) -> Command {
        let mut cmd = crm();
        cmd.env("CRM_DATABASE", self.path())
            .env("XDG_CONFIG_HOME", self.dir.path())
            .env("XDG_DATA_HOME", self.dir.path())
            .env_remove("CRM_CONFIG")
            .env_remove("CRM_PAGE_SIZE")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run a command that prints a single id (`--format id`) and return it
    pub fn create(&self, args: &[&str]) -> i64 {
        let output = self
            .crm()
            .args(args)
            .args(["--format", "id"])
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "{:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout)
            .trim()
            .parse()
            .unwrap()
    }

    /// Stdout of a successful command
    pub fn stdout(&self, args: &[&str]) -> String {
        let output = self.crm().args(args).output().unwrap();
        assert!(
            output.status.success(),
            "{:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    pub fn create_device(&self, manufacturer: &str, model: &str) -> i64 {
        self.create(&["device", "new", "--manufacturer", manufacturer, "--model", model])
    }

    pub fn create_customer(&self, name: &str, address: &str, city: &str) -> i64 {
        self.create(&[
            "customer", "new", "--name", name, "--address", address, "--city", city,
        ])
    }

    pub fn create_unit(&self, serial: &str, customer: i64, analyzer: i64) -> i64 {
        self.create(&[
            "unit",
            "new",
            "--serial",
            serial,
            "--customer",
            &customer.to_string(),
            "--analyzer",
            &analyzer.to_string(),
            "--owner-status",
            "owned",
        ])
    }

    pub fn create_order(&self, unit: i64, description: &str) -> i64 {
        self.create(&[
            "order",
            "new",
            "--device",
            &unit.to_string(),
            "--description",
            description,
        ])
    }

    /// Acme X1 at Globex, serial SN-001: (device, customer, unit)
    pub fn seed(&self) -> (i64, i64, i64) {
        let device = self.create_device("Acme", "X1");
        let customer = self.create_customer("Globex", "1 Main St", "Springfield");
        let unit = self.create_unit("SN-001", customer, device);
        (device, customer, unit)
    }
}

/// Helper to get a crm command
pub fn crm() -> Command {
    Command::new(cargo::cargo_bin!("crm"))
}
