//! Edge case and error handling tests for hogs


use harness::{TestTree, run_hogs};

fn run_json(tree: &TestTree, args: &[&str]) -> serde_json::Value {
    let mut full_args = vec!["--json"];
    full_args.extend_from_slice(args);
    let (stdout, stderr, success) = run_hogs(tree.path(), &full_args);
    assert!(success, "hogs --json should succeed: {stderr}");
    serde_json::from_str(&stdout).expect("output should be valid JSON")
}

#[test]
fn test_empty_directory() {
    let tree = TestTree::new();

    let json = run_json(&tree, &["--largest", "--dirs-usage"]);
    assert_eq!(json["file_count"], 0);
    assert_eq!(json["dir_count"], 1, "the root itself");
    assert_eq!(json["largest"].as_array().unwrap().len(), 0);
    assert_eq!(json["directories"].as_array().unwrap().len(), 0);
    assert!(
        json["total_bytes"].as_u64().unwrap() > 0,
        "the root inode still has a size"
    );
}

#[test]
fn test_single_file_tree() {
    let tree = TestTree::new();
    tree.add_file("only.txt", "0123456789");

    let json = run_json(&tree, &["--largest", "--smallest"]);
    assert_eq!(json["file_count"], 1);

    let largest = json["largest"].as_array().unwrap();
    let smallest = json["smallest"].as_array().unwrap();
    assert_eq!(largest.len(), 1);
    assert_eq!(smallest.len(), 1);
    assert_eq!(largest[0]["size"], 10);
    assert_eq!(largest[0], smallest[0]);
}

#[test]
fn test_capacity_one_keeps_single_best() {
    let tree = TestTree::new();
    tree.add_file("small.dat", &"x".repeat(10));
    tree.add_file("large.dat", &"x".repeat(90));

    let json = run_json(&tree, &["--largest", "--top", "1"]);
    let largest = json["largest"].as_array().unwrap();
    assert_eq!(largest.len(), 1);
    assert!(largest[0]["path"].as_str().unwrap().ends_with("large.dat"));
}

#[test]
fn test_capacity_bounds_inclusive() {
    let tree = TestTree::new();
    tree.add_file("a.txt", "1");

    let (_stdout, _stderr, success) = run_hogs(tree.path(), &["--top", "1000", "--largest"]);
    assert!(success, "1000 is the last valid capacity");

    let (_stdout, stderr, success) = run_hogs(tree.path(), &["--top", "1001", "--largest"]);
    assert!(!success);
    assert!(stderr.contains("invalid value"), "{stderr}");
}

#[test]
fn test_equal_sizes_keep_discovery_order() {
    let tree = TestTree::new();
    // Sorted discovery: a.dat, b.dat, c.dat — all the same size.
    tree.add_file("c.dat", &"x".repeat(64));
    tree.add_file("a.dat", &"x".repeat(64));
    tree.add_file("b.dat", &"x".repeat(64));

    let json = run_json(&tree, &["--largest", "--top-largest", "2"]);
    let paths: Vec<&str> = json["largest"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["path"].as_str().unwrap())
        .collect();

    assert_eq!(paths.len(), 2);
    assert!(paths[0].ends_with("a.dat"), "{paths:?}");
    assert!(paths[1].ends_with("b.dat"), "{paths:?}");
}

#[test]
fn test_deeply_nested_tree() {
    let tree = TestTree::new();
    let mut path = String::new();
    for level in 0..10 {
        path.push_str(&format!("level{level}/"));
    }
    path.push_str("leaf.txt");
    tree.add_file(&path, "deep");

    let json = run_json(&tree, &["--dirs-usage"]);
    assert_eq!(json["file_count"], 1);
    assert_eq!(json["dir_count"], 11, "root plus ten levels");

    let rows = json["directories"].as_array().unwrap();
    assert_eq!(rows.len(), 1, "only the deepest directory is a leaf");
    assert!(rows[0]["path"].as_str().unwrap().contains("level9"));
}

#[test]
fn test_ignore_glob_prunes_whole_subtree() {
    let tree = TestTree::new();
    tree.add_file("src/lib.rs", "pub fn f() {}");
    tree.add_file("target/debug/build/out.o", &"x".repeat(5000));

    let json = run_json(&tree, &["--ignore", "target"]);
    assert_eq!(json["file_count"], 1);
    assert_eq!(json["dir_count"], 2, "root and src");
}

#[test]
fn test_type_filter_counts_matching_files_only() {
    let tree = TestTree::new();
    tree.add_file("photo.png", &"x".repeat(100));
    tree.add_file("notes.txt", &"x".repeat(100));

    let json = run_json(&tree, &["--type", "image"]);
    assert_eq!(json["file_count"], 1);

    let json = run_json(&tree, &["--type", "core"]);
    assert_eq!(json["file_count"], 0);
}

#[test]
fn test_short_form_headers() {
    let tree = TestTree::new();
    tree.add_file("a.txt", &"x".repeat(32));

    let (stdout, _stderr, success) = run_hogs(tree.path(), &["--largest", "--short"]);
    assert!(success);
    assert!(stdout.contains("Largest 1"), "{stdout}");
    assert!(stdout.contains("Total"), "{stdout}");
    assert!(!stdout.contains("List of Top"), "{stdout}");
    assert!(!stdout.contains("Gigabytes"), "suffixed units only: {stdout}");
    assert!(stdout.contains("Gb"), "{stdout}");
}

#[test]
fn test_short_line_form_stays_on_one_line() {
    let tree = TestTree::new();
    tree.add_file("a.txt", &"x".repeat(32));

    let (stdout, _stderr, success) = run_hogs(tree.path(), &["--short-line", "--bytes"]);
    assert!(success);
    assert_eq!(stdout.lines().count(), 1, "{stdout:?}");

    let total: u64 = stdout.trim().parse().expect("a bare byte count");
    assert!(total >= 32);
}

#[test]
fn test_default_directory_is_current() {
    let tree = TestTree::new();
    tree.add_file("here.txt", "data");

    let (stdout, _stderr, success) = run_hogs(tree.path(), &["--color", "never"]);
    assert!(success);
    assert!(stdout.contains("Bytes"), "{stdout}");
}

#[test]
fn test_hidden_root_contents_excluded_when_skipping_hidden() {
    let tree = TestTree::new();
    tree.add_file(".cache/blob.bin", &"x".repeat(2048));
    tree.add_file("real.txt", "ok");

    let json = run_json(&tree, &["--skip-hidden"]);
    assert_eq!(json["file_count"], 1);
}

#[test]
fn test_conflicting_forms_rejected() {
    let tree = TestTree::new();
    let (_stdout, _stderr, success) = run_hogs(tree.path(), &["--short", "--stream"]);
    assert!(!success, "--short conflicts with --stream");

    let (_stdout, _stderr, success) = run_hogs(tree.path(), &["--json", "--short"]);
    assert!(!success, "--json conflicts with the text forms");
}

#[test]
fn test_help_documents_the_rankings() {
    use assert_cmd::Command;
    use predicates::prelude::*;

    Command::cargo_bin("hogs")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--largest"))
        .stdout(predicate::str::contains("--max-age"));
}

#[test]
fn test_version_flag() {
    use assert_cmd::Command;
    use predicates::prelude::*;

    Command::cargo_bin("hogs")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hogs"));
}

#[test]
fn test_broken_symlink_is_still_counted() {
    let tree = TestTree::new();
    tree.add_symlink("missing-target", "dangling");
    tree.add_file("real.txt", "ok");

    let json = run_json(&tree, &[]);
    assert_eq!(json["file_count"], 2, "dangling link still counts");
}

#[test]
fn test_follow_links_descends_into_directory_links() {
    let tree = TestTree::new();
    tree.add_file("actual/data.bin", &"x".repeat(128));
    tree.add_symlink("actual", "mirror");

    let without = run_json(&tree, &[]);
    let with = run_json(&tree, &["--follow-links"]);

    // Following the link walks the target subtree a second time.
    assert_eq!(without["file_count"], 1);
    assert_eq!(with["file_count"], 2);
    assert!(
        with["total_bytes"].as_u64().unwrap() > without["total_bytes"].as_u64().unwrap(),
        "followed link adds the target's bytes"
    );
}
