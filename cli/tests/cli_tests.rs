use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Command running in an empty directory with no configuration leaking
/// in from the test environment
fn permref(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("permref").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("PERMREF_FORMAT")
        .env_remove("PERMREF_LOG_DIR")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    permref(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("permref"))
        .stdout(predicate::str::contains("Convert permissions"));
}

#[test]
fn test_cli_version() {
    let dir = TempDir::new().unwrap();
    permref(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("permref"));
}

// ============================================================================
// encode / decode
// ============================================================================

#[test]
fn test_encode_text() {
    let dir = TempDir::new().unwrap();
    permref(&dir)
        .args(["encode", "can_view", "instance", "-a", "name=c1", "-a", "project=default"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/1.0/instances/c1?project=default"));
}

#[test]
fn test_encode_json() {
    let dir = TempDir::new().unwrap();
    permref(&dir)
        .args([
            "encode",
            "can_view",
            "storage_volume",
            "--arg",
            "pool=pool1",
            "--arg",
            "type=custom",
            "--arg",
            "name=vol1",
            "--arg",
            "project=default",
            "--arg",
            "location=loc1",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#""entity_reference": "/1.0/storage-pools/pool1/volumes/custom/vol1?project=default&target=loc1""#,
        ))
        .stdout(predicate::str::contains(r#""entitlement": "can_view""#));
}

#[test]
fn test_encode_server_without_arguments() {
    let dir = TempDir::new().unwrap();
    permref(&dir)
        .args(["encode", "admin", "server", "-f", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("entity_reference: /1.0"));
}

#[test]
fn test_encode_missing_project_fails() {
    let dir = TempDir::new().unwrap();
    permref(&dir)
        .args(["encode", "can_view", "instance", "-a", "name=c1"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains(
            r#"Permission argument "project" is required for permission with entity type "instance""#,
        ));
}

#[test]
fn test_encode_unknown_entity_type_fails() {
    let dir = TempDir::new().unwrap();
    permref(&dir)
        .args(["encode", "can_view", "widget"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(r#"Unknown entity type "widget""#));
}

#[test]
fn test_encode_malformed_argument_is_usage_error() {
    let dir = TempDir::new().unwrap();
    permref(&dir)
        .args(["encode", "can_view", "instance", "-a", "name"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("KEY=VALUE"));
}

#[test]
fn test_decode_yaml() {
    let dir = TempDir::new().unwrap();
    permref(&dir)
        .args([
            "decode",
            "can_view",
            "storage_volume",
            "/1.0/storage-pools/pool1/volumes/custom/vol1?project=default&target=loc1",
            "--format",
            "yaml",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("pool: pool1"))
        .stdout(predicate::str::contains("location: loc1"))
        .stdout(predicate::str::contains("project: default"));
}

#[test]
fn test_decode_project_entity_has_no_project_argument() {
    let dir = TempDir::new().unwrap();
    permref(&dir)
        .args(["decode", "can_view", "project", "/1.0/projects/web", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name": "web""#))
        .stdout(predicate::str::contains(r#""project":"#).not());
}

#[test]
fn test_decode_mismatched_type_fails() {
    let dir = TempDir::new().unwrap();
    permref(&dir)
        .args(["decode", "can_view", "instance", "/1.0/profiles/default?project=p"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid entity reference"));
}

// ============================================================================
// configuration
// ============================================================================

#[test]
fn test_format_from_environment() {
    let dir = TempDir::new().unwrap();
    permref(&dir)
        .env("PERMREF_FORMAT", "json")
        .args(["encode", "admin", "server"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""entity_reference": "/1.0""#));
}

#[test]
fn test_format_flag_overrides_environment() {
    let dir = TempDir::new().unwrap();
    permref(&dir)
        .env("PERMREF_FORMAT", "json")
        .args(["encode", "admin", "server", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("entity_reference: /1.0"));
}

#[test]
fn test_format_from_dotenv_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), "PERMREF_FORMAT=yaml\n").unwrap();

    permref(&dir)
        .args(["encode", "admin", "server"])
        .assert()
        .success()
        .stdout(predicate::str::contains("entitlement: admin"));
}

#[test]
fn test_unknown_format_falls_back_to_text() {
    let dir = TempDir::new().unwrap();
    permref(&dir)
        .args(["encode", "admin", "server", "--format", "xml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("admin server /1.0"));
}

#[test]
fn test_log_directory_is_created() {
    let dir = TempDir::new().unwrap();
    permref(&dir)
        .env("PERMREF_LOG_DIR", "logs")
        .args(["--verbose", "encode", "admin", "server"])
        .assert()
        .success();

    let logs = dir.path().join("logs");
    assert!(logs.is_dir());
    let has_log_file = fs::read_dir(&logs)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .any(|entry| entry.file_name().to_string_lossy().starts_with("permref"));
    assert!(has_log_file);
}

// ============================================================================
// groups
// ============================================================================

#[test]
fn test_group_to_record_yaml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("operators.yaml");
    fs::write(
        &path,
        r#"name: operators
description: Day to day operations
permissions:
  - entitlement: admin
    entity_type: server
  - entitlement: can_view
    entity_type: instance
    entity_args:
      name: c1
      project: default
"#,
    )
    .unwrap();

    permref(&dir)
        .args(["group", "to-record"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Group operators ==="))
        .stdout(predicate::str::contains("/1.0/instances/c1?project=default"));
}

#[test]
fn test_group_from_record_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("operators.json");
    fs::write(
        &path,
        r#"{
  "name": "operators",
  "permissions": [
    {"entitlement": "can_view", "entity_type": "network", "entity_reference": "/1.0/networks/br0?project=default"}
  ]
}"#,
    )
    .unwrap();

    permref(&dir)
        .args(["group", "from-record", "--format", "json"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name": "br0""#))
        .stdout(predicate::str::contains(r#""project": "default""#));
}

#[test]
fn test_group_fails_on_first_bad_permission() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.yaml");
    fs::write(
        &path,
        r#"name: broken
permissions:
  - entitlement: can_view
    entity_type: network
    entity_args:
      name: br0
  - entitlement: admin
    entity_type: widget
"#,
    )
    .unwrap();

    permref(&dir)
        .args(["group", "to-record"])
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(r#"Failed to encode permissions of group "broken""#))
        .stderr(predicate::str::contains(r#"entity type "network""#));
}

#[test]
fn test_group_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    permref(&dir)
        .args(["group", "from-record", "nowhere.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

// ============================================================================
// types
// ============================================================================

#[test]
fn test_types_text() {
    let dir = TempDir::new().unwrap();
    permref(&dir)
        .arg("types")
        .assert()
        .success()
        .stdout(predicate::str::contains("Entity Types"))
        .stdout(predicate::str::contains(
            "/1.0/storage-pools/{pool}/volumes/{type}/{name}",
        ))
        .stdout(predicate::str::contains("Total entity types: 25"));
}

#[test]
fn test_types_json() {
    let dir = TempDir::new().unwrap();
    permref(&dir)
        .args(["types", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""entity_type": "storage_bucket""#))
        .stdout(predicate::str::contains(r#""project": "required_in_query""#));
}
