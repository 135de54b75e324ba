use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

const TEST_KEY: &str = "0123456789abcdef0123456789abcdef";

fn intake_cmd(input: &NamedTempFile) -> Command {
    let mut cmd = Command::new(cargo_bin!("ca-intake"));
    cmd.arg(input.path())
        .arg("--delivery-delay-ms")
        .arg("10")
        .env("ENCRYPTION_KEY", TEST_KEY);
    cmd
}

#[test]
fn test_valid_submission_is_accepted_and_stored() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{"eventId":"EVT-1","eventType":"DVCA","mandatoryVoluntary":"MAND","underlyingSecurity":{{"isin":"US1234567890"}},"details":{{"dates":{{"announcementDate":"2023-01-01","recordDate":"2023-01-15","paymentDate":"2023-01-20"}}}},"options":[{{"optionNumber":"001","optionType":"CASH"}}]}}"#
    )
    .unwrap();

    intake_cmd(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""statusCode":202"#))
        .stdout(predicate::str::contains("records stored: 1"));
}

#[test]
fn test_duplicate_lines_store_one_record() {
    let payload = r#"{"eventId":"EVT-1","eventType":"DVCA","mandatoryVoluntary":"MAND","underlyingSecurity":{"isin":"US1234567890"},"details":{"dates":{"announcementDate":"2023-01-01","recordDate":"2023-01-15","paymentDate":"2023-01-20"}},"options":[{"optionNumber":"001","optionType":"CASH"}]}"#;
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{payload}").unwrap();
    writeln!(file, "{payload}").unwrap();

    intake_cmd(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("records stored: 1"));
}

#[test]
fn test_invalid_submission_reports_field_paths() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{"eventId":"EVT-1","eventType":"DVCA","mandatoryVoluntary":"MAND","underlyingSecurity":{{"isin":"12INVALID"}},"details":{{"dates":{{"announcementDate":"2023-01-01","recordDate":"2023-01-15","paymentDate":"2023-01-20"}}}},"options":[]}}"#
    )
    .unwrap();

    intake_cmd(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""statusCode":400"#))
        .stdout(predicate::str::contains("underlyingSecurity.isin"))
        .stdout(predicate::str::contains(r#""path":"options""#))
        .stdout(predicate::str::contains("records stored: 0"));
}

#[test]
fn test_unreadable_line_is_a_500() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "this is not json").unwrap();

    intake_cmd(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""statusCode":500"#))
        .stdout(predicate::str::contains("records stored: 0"));
}

#[test]
fn test_missing_key_fails_delivery_but_not_the_request() {
    // The 202 must still come back; the configuration error only surfaces
    // when the deferred encryption runs, and the record is dropped.
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{"eventId":"EVT-1","eventType":"DVCA","mandatoryVoluntary":"MAND","underlyingSecurity":{{"isin":"US1234567890"}},"details":{{"dates":{{"announcementDate":"2023-01-01","recordDate":"2023-01-15","paymentDate":"2023-01-20"}}}},"options":[{{"optionNumber":"001","optionType":"CASH"}}]}}"#
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("ca-intake"));
    cmd.arg(file.path())
        .arg("--delivery-delay-ms")
        .arg("10")
        .env_remove("ENCRYPTION_KEY");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""statusCode":202"#))
        .stdout(predicate::str::contains("records stored: 0"));
}
