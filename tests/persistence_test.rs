#![cfg(feature = "storage-rocksdb")]

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::{NamedTempFile, tempdir};

const TEST_KEY: &str = "0123456789abcdef0123456789abcdef";

const PAYLOAD: &str = r#"{"eventId":"EVT-1","eventType":"DVCA","mandatoryVoluntary":"MAND","underlyingSecurity":{"isin":"US1234567890"},"details":{"dates":{"announcementDate":"2023-01-01","recordDate":"2023-01-15","paymentDate":"2023-01-20"}},"options":[{"optionNumber":"001","optionType":"CASH"}]}"#;

#[test]
fn test_dedup_index_survives_restart() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("records_db");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{PAYLOAD}").unwrap();

    // First run stores the record.
    Command::new(cargo_bin!("ca-intake"))
        .arg(file.path())
        .arg("--db-path")
        .arg(&db_path)
        .arg("--delivery-delay-ms")
        .arg("10")
        .env("ENCRYPTION_KEY", TEST_KEY)
        .assert()
        .success()
        .stdout(predicate::str::contains("records stored: 1"));

    // Second run sees the same id as a duplicate: still one record.
    Command::new(cargo_bin!("ca-intake"))
        .arg(file.path())
        .arg("--db-path")
        .arg(&db_path)
        .arg("--delivery-delay-ms")
        .arg("10")
        .env("ENCRYPTION_KEY", TEST_KEY)
        .assert()
        .success()
        .stdout(predicate::str::contains("records stored: 1"));
}
