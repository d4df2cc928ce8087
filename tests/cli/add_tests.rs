//! Tests for `--add <PATH> <TAG>...`

use crate::common::{assert_contains, assert_json_type, assert_valid_json, TestRepo};

#[test]
fn test_add_reports_success_and_persists() {
    let repo = TestRepo::new();
    repo.with_photo_layout();

    let output = repo.run_cli_success(&["--add", "readme.md", "red", "blue"]);
    assert_eq!(output, "File tags added successfully\n");

    let db = repo.read_db_json();
    assert_eq!(db["v"], serde_json::json!([1, 0, 0]));
    assert_eq!(db["e"]["/readme.md"]["t"], serde_json::json!([1, 2]));
    assert_eq!(db["t"]["1"], "red");
    assert_eq!(db["t"]["2"], "blue");
    assert_eq!(db["l"], 2);
}

#[test]
fn test_add_nested_path_uses_slash_key() {
    let repo = TestRepo::new();
    repo.with_photo_layout();

    repo.run_cli_success(&["--add", "photos/2023/beach.jpg", "sea"]);

    let db = repo.read_db_json();
    assert!(db["e"]["/photos/2023/beach.jpg"].is_object(), "db: {}", db);
}

#[test]
fn test_add_reuses_existing_tag_ids() {
    let repo = TestRepo::new();
    repo.with_photo_layout();

    repo.run_cli_success(&["--add", "readme.md", "red"]);
    repo.run_cli_success(&["--add", "docs/notes.txt", "blue", "red"]);

    let db = repo.read_db_json();
    assert_eq!(db["e"]["/docs/notes.txt"]["t"], serde_json::json!([2, 1]));
    assert_eq!(db["l"], 2);
}

#[test]
fn test_add_missing_file_fails_without_writing() {
    let repo = TestRepo::new();

    let (_, stderr) = repo.run_cli_failure(&["--add", "ghost.txt", "red"]);
    assert_contains(&stderr, "File not found");
    assert!(!repo.db_path().exists());
}

#[test]
fn test_add_requires_a_tag() {
    let repo = TestRepo::new();
    repo.add_file("readme.md", "hi");

    repo.run_cli_failure(&["--add", "readme.md"]);
    assert!(!repo.db_path().exists());
}

#[test]
fn test_add_rejects_empty_tag_name() {
    let repo = TestRepo::new();
    repo.add_file("readme.md", "hi");

    let (_, stderr) = repo.run_cli_failure(&["--add", "readme.md", "red", ""]);
    assert_contains(&stderr, "Invalid tag name");
    assert!(!repo.db_path().exists());
}

#[test]
fn test_repeated_tag_is_kept_by_default() {
    let repo = TestRepo::new();
    repo.add_file("readme.md", "hi");

    repo.run_cli_success(&["--add", "readme.md", "red"]);
    repo.run_cli_success(&["--add", "readme.md", "red"]);

    let db = repo.read_db_json();
    assert_eq!(db["e"]["/readme.md"]["t"], serde_json::json!([1, 1]));
}

#[test]
fn test_skip_duplicates_flag() {
    let repo = TestRepo::new();
    repo.add_file("readme.md", "hi");

    repo.run_cli_success(&["--add", "readme.md", "red"]);
    repo.run_cli_success(&["--skip-duplicates", "--add", "readme.md", "red", "blue"]);

    let db = repo.read_db_json();
    assert_eq!(db["e"]["/readme.md"]["t"], serde_json::json!([1, 2]));
}

#[test]
fn test_skip_duplicates_from_config() {
    let repo = TestRepo::new();
    repo.add_file("readme.md", "hi");
    repo.with_config("[index]\nduplicates = \"skip\"\n");

    repo.run_cli_success(&["--add", "readme.md", "red"]);
    repo.run_cli_success(&["--add", "readme.md", "red"]);

    let db = repo.read_db_json();
    assert_eq!(db["e"]["/readme.md"]["t"], serde_json::json!([1]));
}

#[test]
fn test_allow_duplicates_flag_overrides_config() {
    let repo = TestRepo::new();
    repo.add_file("readme.md", "hi");
    repo.with_config("[index]\nduplicates = \"skip\"\n");

    repo.run_cli_success(&["--add", "readme.md", "red"]);
    repo.run_cli_success(&["--allow-duplicates", "--add", "readme.md", "red"]);

    let db = repo.read_db_json();
    assert_eq!(db["e"]["/readme.md"]["t"], serde_json::json!([1, 1]));
}

#[test]
fn test_add_json_output() {
    let repo = TestRepo::new();
    repo.add_file("readme.md", "hi");

    let output = repo.run_cli_success(&["--format", "json", "--add", "readme.md", "red", "blue"]);
    let json = assert_valid_json(&output, "add --format json");
    assert_json_type(&json, "add");
    assert_eq!(json["path"], "/readme.md");
    assert_eq!(json["ids"], serde_json::json!([1, 2]));
}

#[test]
fn test_custom_index_file_name() {
    let repo = TestRepo::new();
    repo.add_file("readme.md", "hi");
    repo.with_config("[index]\nfile = \"tags.json\"\n");

    repo.run_cli_success(&["--add", "readme.md", "red"]);

    assert!(repo.path().join("tags.json").exists());
    assert!(!repo.db_path().exists());
}
