//! Tests for `--find <TAG>`

use crate::common::{assert_json_type, assert_valid_json, listed_items, TestRepo};

#[test]
fn test_find_lists_absolute_paths_in_key_order() {
    let repo = TestRepo::new();
    repo.with_photo_layout();
    repo.run_cli_success(&[
        "--tag",
        "red",
        "readme.md",
        "photos/2024/forest.jpg",
        "photos/2023/beach.jpg",
    ]);

    let output = repo.run_cli_success(&["--find", "red"]);
    assert!(output.starts_with("Files with tag 'red':\n"), "{}", output);

    let root = repo.path();
    let expected: Vec<String> = ["photos/2023/beach.jpg", "photos/2024/forest.jpg", "readme.md"]
        .iter()
        .map(|rel| root.join(rel).display().to_string())
        .collect();
    assert_eq!(listed_items(&output), expected);
}

#[test]
fn test_find_only_returns_files_with_that_tag() {
    let repo = TestRepo::new();
    repo.with_photo_layout();
    repo.run_cli_success(&["--add", "readme.md", "red", "blue"]);
    repo.run_cli_success(&["--add", "docs/notes.txt", "blue"]);

    let output = repo.run_cli_success(&["--find", "red"]);
    assert_eq!(
        listed_items(&output),
        vec![repo.path().join("readme.md").display().to_string()]
    );
}

#[test]
fn test_find_unknown_tag_is_not_an_error() {
    let repo = TestRepo::new();
    repo.add_file("readme.md", "hi");
    repo.run_cli_success(&["--add", "readme.md", "red"]);

    let output = repo.run_cli_success(&["--find", "green"]);
    assert_eq!(output, "No files found with tag: green\n");
}

#[test]
fn test_find_without_snapshot() {
    let repo = TestRepo::new();

    let output = repo.run_cli_success(&["--find", "red"]);
    assert_eq!(output, "No files found with tag: red\n");
    assert!(!repo.db_path().exists());
}

#[test]
fn test_find_json_output() {
    let repo = TestRepo::new();
    repo.with_photo_layout();
    repo.run_cli_success(&["--tag", "red", "readme.md", "docs/notes.txt"]);

    let output = repo.run_cli_success(&["--format", "json", "--find", "red"]);
    let json = assert_valid_json(&output, "find --format json");
    assert_json_type(&json, "find");
    assert_eq!(json["count"], 2);
    assert_eq!(json["files"][0]["path"], "/docs/notes.txt");
    assert_eq!(json["files"][1]["path"], "/readme.md");
}
