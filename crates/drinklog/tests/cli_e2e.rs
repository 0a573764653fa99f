#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A `drinklog` invocation isolated from the user's config and data.
fn drinklog(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("drinklog"));
    cmd.env("DRINKLOG_DATA_DIR", temp.path().join("data"))
        .env("NO_COLOR", "1")
        .env_remove("DRINKLOG_DEFAULT_UNIT")
        .env_remove("DRINKLOG_LOG")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(temp.path().join("drinklog.toml"));
    cmd
}

#[test]
fn empty_log_shows_nothing_today() {
    let temp = TempDir::new().unwrap();

    drinklog(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("No drinks logged on"));
}

#[test]
fn logged_drinks_add_up_today() {
    let temp = TempDir::new().unwrap();

    drinklog(&temp)
        .args(["add", "Beer", "500", "ml", "--abv", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged: Beer"));
    drinklog(&temp)
        .args(["add", "Wine", "20", "cl", "--abv", "12"])
        .assert()
        .success();

    drinklog(&temp)
        .arg("today")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 49.00 ml pure alcohol"));

    assert!(temp.path().join("data").join("drinks.json").exists());
}

#[test]
fn unknown_unit_logs_nothing() {
    let temp = TempDir::new().unwrap();

    drinklog(&temp)
        .args(["add", "Beer", "1", "barrel", "--abv", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing logged"));

    drinklog(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("No drinks logged on"));
}

#[test]
fn configured_default_unit_applies_without_unit_argument() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("drinklog.toml"), "default_unit = \"cl\"\n").unwrap();

    drinklog(&temp)
        .args(["add", "Beer", "50", "--abv", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("500.00 ml"));
}

#[test]
fn mixed_drink_is_logged_with_derived_abv() {
    let temp = TempDir::new().unwrap();

    drinklog(&temp)
        .args([
            "mix", "Gin Tonic", "--base", "50", "--base-abv", "40", "--total", "200",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gin Tonic 200.00 ml @ 10%"));
}

#[test]
fn infinite_mixed_abv_logs_nothing_and_log_stays_readable() {
    let temp = TempDir::new().unwrap();

    drinklog(&temp)
        .args([
            "mix", "X", "--base", "50", "--base-abv", "inf", "--total", "200",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing logged"));
    drinklog(&temp)
        .args(["add", "Beer", "500", "ml", "--abv", "5"])
        .assert()
        .success();

    drinklog(&temp)
        .arg("today")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 25.00 ml pure alcohol"));
}

#[test]
fn export_csv_starts_with_header() {
    let temp = TempDir::new().unwrap();
    drinklog(&temp)
        .args(["add", "Beer", "330", "ml", "--abv", "5"])
        .assert()
        .success();

    drinklog(&temp)
        .args(["export", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("id,name,volume(ml),abv,date"))
        .stdout(predicate::str::contains(",Beer,330,5,"));
}

#[test]
fn export_then_import_restores_the_log() {
    let temp = TempDir::new().unwrap();
    let backup = temp.path().join("backup.json");

    drinklog(&temp)
        .args(["add", "Cider", "500", "ml", "--abv", "4.5"])
        .assert()
        .success();
    drinklog(&temp)
        .arg("export")
        .arg("--output")
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 drinks"));

    let exported = fs::read_to_string(&backup).unwrap();
    assert!(exported.contains("\"name\": \"Cider\""));

    let empty = temp.path().join("empty.json");
    fs::write(&empty, "[]").unwrap();
    drinklog(&temp).arg("import").arg(&empty).assert().success();
    drinklog(&temp)
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("No drinks in this range"));

    drinklog(&temp)
        .arg("import")
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 drinks (replaced 0)"));
    drinklog(&temp)
        .arg("today")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cider"));
}

#[test]
fn malformed_import_keeps_the_log() {
    let temp = TempDir::new().unwrap();
    drinklog(&temp)
        .args(["add", "Beer", "500", "ml", "--abv", "5"])
        .assert()
        .success();

    let broken = temp.path().join("broken.json");
    fs::write(&broken, "{ not json").unwrap();

    drinklog(&temp)
        .arg("import")
        .arg(&broken)
        .assert()
        .success()
        .stdout(predicate::str::contains("log left unchanged"));
    drinklog(&temp)
        .arg("today")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 25.00 ml pure alcohol"));
}

#[test]
fn import_without_known_extension_needs_format() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("drinks.txt");
    fs::write(&file, "id,name,volume(ml),abv,date\n").unwrap();

    drinklog(&temp)
        .arg("import")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    drinklog(&temp)
        .arg("import")
        .arg(&file)
        .args(["--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 0 drinks"));
}

#[test]
fn delete_removes_only_the_named_drink() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(
        data.join("drinks.json"),
        r#"[
  {"id": 1, "name": "Beer", "volume": 500.0, "abv": 5.0, "date": "2025-01-01T18:00:00.000Z"},
  {"id": 2, "name": "Wine", "volume": 200.0, "abv": 12.0, "date": "2025-01-01T19:00:00.000Z"}
]"#,
    )
    .unwrap();

    drinklog(&temp)
        .args(["delete", "1", "99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted (1): Beer"))
        .stdout(predicate::str::contains("No drink with id 99"));

    drinklog(&temp)
        .args(["log", "--from", "2024-12-30", "--to", "2025-01-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wine"))
        .stdout(predicate::str::contains("Beer").not());
}

#[test]
fn favorites_can_be_saved_and_logged() {
    let temp = TempDir::new().unwrap();

    drinklog(&temp)
        .args(["fav", "save", "IPA", "33", "cl", "--abv", "6.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved favorite: IPA"));
    drinklog(&temp)
        .args(["fav", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("IPA"));
    drinklog(&temp)
        .args(["fav", "log", "ipa"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged: IPA 330.00 ml"));

    drinklog(&temp)
        .args(["fav", "log", "Stout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No favorite named 'Stout'"));
}

#[test]
fn summary_and_chart_cover_imported_history() {
    let temp = TempDir::new().unwrap();
    let history = temp.path().join("history.csv");
    fs::write(
        &history,
        "id,name,volume(ml),abv,date\n\
         1,Beer,500,5,2025-01-01T12:00:00.000Z\n\
         2,Beer,500,5,2025-01-02T12:00:00.000Z\n",
    )
    .unwrap();
    drinklog(&temp).arg("import").arg(&history).assert().success();

    drinklog(&temp)
        .args(["summary", "--by", "month"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-01"))
        .stdout(predicate::str::contains("50.00 ml"));

    drinklog(&temp)
        .args(["chart", "--json", "--from", "2025-01-02", "--to", "2025-01-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Beer\": 25.0"))
        .stdout(predicate::str::contains("2025-01-01").not());
}

#[test]
fn units_lists_the_catalogue() {
    let temp = TempDir::new().unwrap();

    drinklog(&temp)
        .arg("units")
        .assert()
        .success()
        .stdout(predicate::str::contains("fl-oz"))
        .stdout(predicate::str::contains("ml"));
}

#[test]
fn invalid_configured_unit_is_an_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("drinklog.toml"), "default_unit = \"barrel\"\n").unwrap();

    drinklog(&temp)
        .arg("today")
        .assert()
        .failure()
        .stderr(predicate::str::contains("default_unit"));
}
