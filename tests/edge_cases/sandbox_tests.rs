//! Path confinement and root selection through the CLI

use crate::common::{assert_contains, TestRepo};

#[test]
fn test_sibling_sharing_root_prefix_is_rejected() {
    let repo = TestRepo::new();
    repo.add_file("site/a.txt", "a");
    repo.add_file("site2/secret.txt", "no");
    let root = repo.path().join("site");

    let output = repo
        .run_cli_in(&root, &["--add", "../site2/secret.txt", "red"])
        .expect("Failed to run CLI");
    assert_eq!(output.status.code(), Some(1));
    assert_contains(&String::from_utf8_lossy(&output.stderr), "is not inside");
    assert!(!root.join(".tagger").exists());
}

#[test]
fn test_absolute_path_outside_root_is_rejected() {
    let repo = TestRepo::new();
    repo.add_file("site/a.txt", "a");
    repo.add_file("other/b.txt", "b");
    let root = repo.path().join("site");
    let outside = repo.path().join("other/b.txt");

    let output = repo
        .run_cli_in(&root, &["--add", outside.to_str().unwrap(), "red"])
        .expect("Failed to run CLI");
    assert!(!output.status.success());
}

#[test]
fn test_absolute_path_inside_root_is_accepted() {
    let repo = TestRepo::new();
    repo.add_file("readme.md", "hi");
    let absolute = repo.path().join("readme.md");

    repo.run_cli_success(&["--add", absolute.to_str().unwrap(), "red"]);

    let db = repo.read_db_json();
    assert!(db["e"]["/readme.md"].is_object());
}

#[test]
fn test_dotdot_that_stays_inside_root_is_normalized() {
    let repo = TestRepo::new();
    repo.with_photo_layout();

    repo.run_cli_success(&["--add", "docs/../readme.md", "red"]);
    repo.run_cli_success(&["--add", "./photos/2023/../2024/forest.jpg", "green"]);

    let db = repo.read_db_json();
    assert!(db["e"]["/readme.md"].is_object());
    assert!(db["e"]["/photos/2024/forest.jpg"].is_object());
}

#[test]
fn test_root_option_selects_snapshot_location() {
    let repo = TestRepo::new();
    repo.add_file("library/book.pdf", "pdf");

    repo.run_cli_success(&["--root", "library", "--add", "library/book.pdf", "read"]);

    let root = repo.path().join("library");
    assert!(root.join(".tagger").exists());
    assert!(!repo.db_path().exists());

    let output = repo
        .run_cli_in(&root, &["--find", "read"])
        .expect("Failed to run CLI");
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        format!("Files with tag 'read':\n  {}\n", root.join("book.pdf").display())
    );
}

#[test]
fn test_missing_root_is_a_config_error() {
    let repo = TestRepo::new();

    let (_, stderr) = repo.run_cli_failure(&["--root", "nowhere", "--list"]);
    assert_contains(&stderr, "nowhere");
    assert_eq!(repo.exit_code(&["--root", "nowhere", "--list"]), 4);
}

#[test]
fn test_operation_is_required() {
    let repo = TestRepo::new();
    repo.run_cli_failure(&[]);
}

#[test]
fn test_only_one_operation_per_invocation() {
    let repo = TestRepo::new();
    repo.run_cli_failure(&["--list", "--find", "red"]);
}
