//! Snapshot integrity: corrupt files, version checks, on-disk format

use crate::common::{assert_contains, listed_items, TestRepo};

// ============================================================================
// Load failures
// ============================================================================

#[test]
fn test_corrupt_snapshot_exits_with_database_code() {
    let repo = TestRepo::new();
    repo.add_file("readme.md", "hi");
    repo.write_db("{ this is not json");

    assert_eq!(repo.exit_code(&["--list"]), 2);

    let (_, stderr) = repo.run_cli_failure(&["--add", "readme.md", "red"]);
    assert_contains(&stderr, "Corrupt database");
    assert_eq!(repo.read_db(), "{ this is not json");
}

#[test]
fn test_other_schema_version_is_rejected() {
    let repo = TestRepo::new();
    repo.write_db(r#"{"v":[2,0,0],"t":{"1":"red"},"l":1}"#);

    let (_, stderr) = repo.run_cli_failure(&["--list"]);
    assert_contains(&stderr, "2.0.0");
    assert_eq!(repo.exit_code(&["--find", "red"]), 2);
}

#[test]
fn test_other_schema_version_is_never_rewritten() {
    let repo = TestRepo::new();
    repo.add_file("readme.md", "hi");
    let original = r#"{"v":[2,0,0],"t":{"1":"red"},"l":1}"#;
    repo.write_db(original);

    assert_eq!(repo.exit_code(&["--add", "readme.md", "red"]), 2);
    assert_eq!(repo.exit_code(&["--tag", "blue", "readme.md"]), 2);
    assert_eq!(repo.read_db(), original);
}

#[test]
fn test_exhausted_tag_ids_are_reported_not_wrapped() {
    let repo = TestRepo::new();
    repo.add_file("readme.md", "hi");
    let original = r#"{"v":[1,0,0],"t":{"1":"red"},"l":4294967295}"#;
    repo.write_db(original);

    let (_, stderr) = repo.run_cli_failure(&["--add", "readme.md", "green"]);
    assert_contains(&stderr, "No tag ids left");
    assert_eq!(repo.exit_code(&["--add", "readme.md", "green"]), 2);
    assert_eq!(repo.read_db(), original);

    // Existing tags can still be applied.
    repo.run_cli_success(&["--add", "readme.md", "red"]);
}

#[test]
fn test_zero_tag_id_is_corrupt() {
    let repo = TestRepo::new();
    repo.write_db(r#"{"v":[1,0,0],"t":{"0":"red"},"l":1}"#);

    assert_eq!(repo.exit_code(&["--list"]), 2);
}

#[test]
fn test_unreadable_config_exits_with_config_code() {
    let repo = TestRepo::new();
    repo.with_config("[logging]\nlevel = \"loud\"\n");

    let (_, stderr) = repo.run_cli_failure(&["--list"]);
    assert_contains(&stderr, "Invalid log level");
    assert_eq!(repo.exit_code(&["--list"]), 4);
}

// ============================================================================
// On-disk format
// ============================================================================

#[test]
fn test_snapshot_uses_compact_short_keys() {
    let repo = TestRepo::new();
    repo.add_file("readme.md", "hi");

    repo.run_cli_success(&["--add", "readme.md", "red"]);

    assert_eq!(
        repo.read_db(),
        r#"{"v":[1,0,0],"e":{"/readme.md":{"t":[1]}},"t":{"1":"red"},"l":1}"#
    );
}

#[test]
fn test_snapshot_with_long_key_names_is_readable() {
    let repo = TestRepo::new();
    repo.add_file("readme.md", "hi");
    repo.write_db(
        r#"{"version":[1,0,0],"entries":{"/readme.md":{"hash":"","tags":[2,1]}},"tags":{"1":"red","2":"blue"},"lastTag":2}"#,
    );

    let output = repo.run_cli_success(&["--status", "readme.md"]);
    assert_eq!(output, "Existing tags for '/readme.md':\n  blue\n  red\n");
}

#[test]
fn test_snapshot_without_version_is_current() {
    let repo = TestRepo::new();
    repo.write_db(r#"{"t":{"1":"red"},"l":1}"#);

    let output = repo.run_cli_success(&["--list"]);
    assert_eq!(listed_items(&output), vec!["red"]);
}

#[test]
fn test_unknown_tag_id_is_shown_numerically() {
    let repo = TestRepo::new();
    repo.add_file("readme.md", "hi");
    repo.write_db(r#"{"v":[1,0,0],"e":{"/readme.md":{"t":[1,7]}},"t":{"1":"red"},"l":1}"#);

    let output = repo.run_cli_success(&["--status", "readme.md"]);
    assert_eq!(output, "Existing tags for '/readme.md':\n  red\n  7\n");
}

#[test]
fn test_ids_are_never_reused_after_stale_last_tag() {
    let repo = TestRepo::new();
    repo.add_file("readme.md", "hi");
    repo.write_db(r#"{"v":[1,0,0],"t":{"1":"red","5":"blue"},"l":2}"#);

    repo.run_cli_success(&["--add", "readme.md", "green"]);

    let db = repo.read_db_json();
    assert_eq!(db["t"]["6"], "green");
    assert_eq!(db["l"], 6);
}

#[test]
fn test_no_temporary_file_left_behind() {
    let repo = TestRepo::new();
    repo.add_file("readme.md", "hi");

    repo.run_cli_success(&["--add", "readme.md", "red"]);
    repo.run_cli_success(&["--add", "readme.md", "blue"]);

    let leftovers: Vec<String> = std::fs::read_dir(repo.path())
        .expect("Failed to read root")
        .map(|entry| entry.expect("Failed to read entry").file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "leftover temp files: {:?}", leftovers);
}

#[test]
fn test_read_only_commands_do_not_create_snapshot() {
    let repo = TestRepo::new();
    repo.add_file("readme.md", "hi");

    repo.run_cli_success(&["--list"]);
    repo.run_cli_success(&["--status", "readme.md"]);
    repo.run_cli_success(&["--find", "red"]);

    assert!(!repo.db_path().exists());
}
