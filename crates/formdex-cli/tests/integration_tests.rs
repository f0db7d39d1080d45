//! Integration tests for the `formdex` binary.

use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn formdex() -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("formdex");
    cmd.env_remove("NO_COLOR")
        .env_remove("FORMDEX__TENANT__ID")
        .env_remove("RUST_LOG");
    cmd
}

fn write(dir: &TempDir, name: &str, raw: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, raw).unwrap();
    path
}

const VALID_MEMBERSHIP: &str = r#"{
    "memberKey": "m-1",
    "memberName": "Jane Doe",
    "orgKey": "o-1",
    "orgName": "Rowing Club",
    "category": 0,
    "dateOfEntry": "20230101",
    "dateOfExit": "99999999"
}"#;

const BOAT: &str = r#"
[entity]
name = "boat"
description = "Boats of the club fleet"

[[categories]]
name = "boat_type"
default = 0
entries = [
  { id = 0, abbreviation = "ROW", name = "boatType.rowing" },
  { id = 1, abbreviation = "SAI", name = "boatType.sailing" },
]

[[fields]]
name = "name"
kind = "string"
required = true
max = 30

[[fields]]
name = "type"
kind = "category"
category = "boat_type"

[index]
tokens = [
  { token = "n", field = "name" },
  { token = "bt", field = "type", table = "boat_type" },
]
"#;

// ── help / version ────────────────────────────────────────────────────────────

#[test]
fn help_lists_the_commands() {
    formdex()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("index"))
        .stdout(predicate::str::contains("categories"));
}

#[test]
fn version_flag() {
    formdex()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    formdex().arg("frobnicate").assert().code(2);
}

// ── validate ──────────────────────────────────────────────────────────────────

#[test]
fn valid_membership_passes() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "jane.json", VALID_MEMBERSHIP);
    formdex()
        .args(["--output-format", "plain", "validate", "membership"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("jane.json"));
}

#[test]
fn exit_before_entry_fails_with_date_order() {
    let dir = TempDir::new().unwrap();
    let raw = VALID_MEMBERSHIP.replace("99999999", "20220101");
    let path = write(&dir, "late.json", &raw);
    formdex()
        .args(["--output-format", "plain", "validate", "membership"])
        .arg(&path)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("dateOfExit"))
        .stderr(predicate::str::contains("failed validation"));
}

#[test]
fn json_output_reports_every_file() {
    let dir = TempDir::new().unwrap();
    let good = write(&dir, "good.json", VALID_MEMBERSHIP);
    let bad = write(&dir, "bad.json", "{}");
    let assert = formdex()
        .args(["--output-format", "json", "validate", "membership"])
        .arg(&good)
        .arg(&bad)
        .assert()
        .code(2);

    let reports: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(reports.as_array().unwrap().len(), 2);
    assert_eq!(reports[0]["valid"], true);
    assert_eq!(reports[1]["valid"], false);
    assert!(reports[1]["violations"]["memberName"].is_array());
}

#[test]
fn missing_document_is_not_found() {
    formdex()
        .args(["validate", "membership", "/no/such/file.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Document not found"));
}

#[test]
fn unknown_entity_is_not_found() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "x.json", "{}");
    formdex()
        .args(["validate", "spaceship"])
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("spaceship"));
}

#[test]
fn non_object_document_is_a_user_error() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "list.json", "[1, 2]");
    formdex()
        .args(["validate", "membership"])
        .arg(&path)
        .assert()
        .code(2);
}

// ── index ─────────────────────────────────────────────────────────────────────

#[test]
fn index_prints_the_search_string() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "meeting.json",
        r#"{"name": "Board Meeting", "startDate": "20250615", "type": 1}"#,
    );
    formdex()
        .args(["index", "calendar_event"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("n:Board Meeting sd:20250615 et:BRD"));
}

#[test]
fn invitation_index_joins_names() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "invite.json",
        r#"{
            "date": "20251201",
            "inviterFirstName": "John",
            "inviterLastName": "Smith",
            "inviteeFirstName": "Jane",
            "inviteeLastName": "Doe"
        }"#,
    );
    formdex()
        .args(["index", "invitation"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("d:20251201 ir:John Smith ie:Jane Doe"));
}

#[test]
fn index_write_refuses_an_invalid_document() {
    let dir = TempDir::new().unwrap();
    let raw = VALID_MEMBERSHIP.replace("99999999", "20220101");
    let path = write(&dir, "late.json", &raw);
    formdex()
        .args(["--output-format", "plain", "index", "membership", "--write"])
        .arg(&path)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("dateOfExit"));
    assert_eq!(fs::read_to_string(&path).unwrap(), raw);
}

// ── listings ──────────────────────────────────────────────────────────────────

#[test]
fn entities_list_names_every_builtin() {
    formdex()
        .args(["entities", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("calendar_event"))
        .stdout(predicate::str::contains("membership"))
        .stdout(predicate::str::contains("work_relationship"));
}

#[test]
fn categories_shows_one_table() {
    formdex()
        .args(["categories", "task_state", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("initial,INI,taskState.initial"));
}

#[test]
fn unknown_category_table() {
    formdex()
        .args(["categories", "colour"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("formdex categories"));
}

// ── schema manifests ──────────────────────────────────────────────────────────

#[test]
fn schemas_dir_adds_entities() {
    let dir = TempDir::new().unwrap();
    let schemas = dir.path().join("schemas");
    fs::create_dir(&schemas).unwrap();
    fs::write(schemas.join("boat.toml"), BOAT).unwrap();
    let doc = write(&dir, "boat.json", r#"{"name": "Swift", "type": 1}"#);

    formdex()
        .arg("--schemas")
        .arg(&schemas)
        .args(["index", "boat"])
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("n:Swift bt:SAI"));

    formdex()
        .arg("--schemas")
        .arg(&schemas)
        .args(["form", "boat"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no built-in form"));
}

#[test]
fn broken_manifest_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.toml"), "[entity\nname = ").unwrap();
    formdex()
        .arg("--schemas")
        .arg(dir.path())
        .arg("entities")
        .assert()
        .code(4);
}

#[test]
fn misspelled_manifest_key_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    let raw = BOAT.replace("required = true", "requried = true");
    fs::write(dir.path().join("boat.toml"), raw).unwrap();
    formdex()
        .arg("--schemas")
        .arg(dir.path())
        .arg("entities")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("requried"));
}

// ── form ──────────────────────────────────────────────────────────────────────

#[test]
fn form_fills_in_defaults() {
    let assert = formdex()
        .args(["--today", "2025-03-01", "--tenant", "club-1", "form", "membership"])
        .assert()
        .success();

    let form: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(form["dateOfEntry"], "20250301");
    assert_eq!(form["dateOfExit"], "99999999");
}

#[test]
fn form_rejects_a_bad_date() {
    formdex()
        .args(["--today", "yesterday", "form", "membership"])
        .assert()
        .code(2);
}

// ── completions / config ──────────────────────────────────────────────────────

#[test]
fn bash_completions_mention_the_binary() {
    formdex()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("formdex"));
}

#[test]
fn config_get_reads_the_tenant_flag() {
    formdex()
        .args(["--tenant", "club-7", "config", "get", "tenant.id"])
        .assert()
        .success()
        .stdout(predicate::str::contains("club-7"));
}

#[test]
fn missing_explicit_config_file_exits_4() {
    formdex()
        .args(["--config", "/no/such/config.toml", "entities"])
        .assert()
        .code(4);
}
