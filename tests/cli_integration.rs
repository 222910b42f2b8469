//! Integration tests for the `taxon` CLI.
//!
//! Each test writes a catalog into a temp directory, runs `taxon` as a
//! subprocess, and verifies stdout, stderr, and/or file contents.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Get the path to the built `taxon` binary.
fn taxon_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("taxon");
    path
}

const CATALOG: &str = r#"{
  "categories": [
    { "id": "21", "path": "2.1", "parent_path": "2", "level": 2, "display_order": 1,
      "localized_name": { "en": "Lips" } },
    { "id": "10", "path": "1", "level": 1, "display_order": 1,
      "localized_name": { "en": "Skincare", "fr": "Soins" } },
    { "id": "11", "path": "1.1", "parent_path": "1", "level": 2, "display_order": 1,
      "localized_name": { "en": "Cleansers" } },
    { "id": "12", "path": "1.2", "parent_path": "1", "level": 2, "display_order": 2,
      "localized_name": { "en": "Serums" } },
    { "id": "20", "path": "2", "level": 1, "display_order": 2,
      "localized_name": { "en": "Makeup" } }
  ]
}
"#;

/// Roots numbered 1 and 3: fails the integrity check until tidied.
const GAPPY: &str = r#"{
  "categories": [
    { "id": "1", "path": "1", "level": 1, "display_order": 1, "localized_name": { "en": "Hair" } },
    { "id": "2", "path": "2", "level": 1, "display_order": 3, "localized_name": { "en": "Nails" } }
  ]
}
"#;

/// A level-2 category with nowhere sensible to land at the end of the list.
const AMBIGUOUS: &str = r#"{
  "categories": [
    { "id": "a", "path": "1", "level": 1, "display_order": 1, "localized_name": { "en": "A" } },
    { "id": "c", "path": "1.9.1", "parent_path": "1.9", "level": 3, "display_order": 1,
      "localized_name": { "en": "C" } },
    { "id": "z", "path": "3.1", "parent_path": "3", "level": 2, "display_order": 1,
      "localized_name": { "en": "Z" } }
  ]
}
"#;

fn write_catalog(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("catalog.json");
    fs::write(&path, content).unwrap();
    path
}

/// Run `taxon` in `dir`, return (stdout, stderr, success).
fn run_taxon(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(taxon_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run taxon");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `taxon` expecting success, return stdout.
fn run_taxon_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_taxon(dir, args);
    if !success {
        panic!(
            "taxon {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

// ---------------------------------------------------------------------------
// Read command tests
// ---------------------------------------------------------------------------

#[test]
fn test_tree_sorts_into_display_order() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_catalog(tmp.path(), CATALOG);

    let out = run_taxon_ok(tmp.path(), &["tree", "catalog.json"]);
    assert_eq!(
        out,
        "1. Skincare [1]\n  1. Cleansers [1.1]\n  2. Serums [1.2]\n2. Makeup [2]\n  1. Lips [2.1]\n"
    );
}

#[test]
fn test_tree_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_catalog(tmp.path(), CATALOG);

    let out = run_taxon_ok(tmp.path(), &["--json", "tree", "catalog.json"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    let ids: Vec<&str> = json["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["10", "11", "12", "20", "21"]);
}

#[test]
fn test_check_valid_catalog() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_catalog(tmp.path(), CATALOG);

    let out = run_taxon_ok(tmp.path(), &["check", "catalog.json"]);
    assert_eq!(out.trim(), "catalog is valid");
}

#[test]
fn test_check_reports_gaps_and_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_catalog(tmp.path(), GAPPY);

    let (stdout, stderr, success) = run_taxon(tmp.path(), &["check", "catalog.json"]);
    assert!(!success);
    assert!(stdout.contains("root categories are ordered 1, 3"));
    assert!(stderr.contains("1 integrity error(s) found"));
}

#[test]
fn test_names_uses_configured_locale() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_catalog(tmp.path(), CATALOG);
    fs::write(tmp.path().join("taxon.toml"), "[names]\nlocale = \"fr\"\n").unwrap();

    let out = run_taxon_ok(tmp.path(), &["tree", "catalog.json"]);
    assert!(out.starts_with("1. Soins [1]\n"));
    // No French name: falls back to English
    assert!(out.contains("2. Makeup [2]"));

    let out = run_taxon_ok(tmp.path(), &["names", "catalog.json"]);
    assert_eq!(out.trim(), "no duplicate names");
}

#[test]
fn test_missing_file_is_an_error() {
    let tmp = tempfile::TempDir::new().unwrap();

    let (_, stderr, success) = run_taxon(tmp.path(), &["tree", "nope.json"]);
    assert!(!success);
    assert!(stderr.contains("error: could not read nope.json"));
}

// ---------------------------------------------------------------------------
// Move tests
// ---------------------------------------------------------------------------

#[test]
fn test_validate_accepts_and_rejects() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_catalog(tmp.path(), CATALOG);

    let out = run_taxon_ok(tmp.path(), &["validate", "catalog.json", "21", "2"]);
    assert_eq!(out.trim(), "valid: Lips would move under Skincare [1]");

    let out = run_taxon_ok(tmp.path(), &["validate", "catalog.json", "20", "0"]);
    assert_eq!(out.trim(), "valid: Makeup would move to root level");

    let (_, stderr, success) = run_taxon(tmp.path(), &["validate", "catalog.json", "21", "0"]);
    assert!(!success);
    assert!(stderr.contains("only level-1 categories may be placed at the beginning"));
}

#[test]
fn test_validate_json_reports_reason() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_catalog(tmp.path(), CATALOG);

    let (stdout, _, success) =
        run_taxon(tmp.path(), &["--json", "validate", "catalog.json", "11", "0"]);
    assert!(!success);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["valid"], false);
    assert_eq!(
        json["reason"],
        "only level-1 categories may be placed at the beginning"
    );
}

#[test]
fn test_validate_unknown_key() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_catalog(tmp.path(), CATALOG);

    let (_, stderr, success) = run_taxon(tmp.path(), &["validate", "catalog.json", "99", "1"]);
    assert!(!success);
    assert!(stderr.contains("category not found: 99"));
}

#[test]
fn test_mv_dry_run_leaves_file_alone() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = write_catalog(tmp.path(), CATALOG);

    let out = run_taxon_ok(tmp.path(), &["mv", "catalog.json", "21", "2"]);
    assert!(out.contains("  3. Lips [1.3] *"));
    assert_eq!(fs::read_to_string(&path).unwrap(), CATALOG);
}

#[test]
fn test_mv_write_reparents() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_catalog(tmp.path(), CATALOG);

    run_taxon_ok(tmp.path(), &["mv", "catalog.json", "21", "2", "--write"]);
    let out = run_taxon_ok(tmp.path(), &["tree", "catalog.json"]);
    assert_eq!(
        out,
        "1. Skincare [1]\n  1. Cleansers [1.1]\n  2. Serums [1.2]\n  3. Lips [1.3] *\n2. Makeup [2]\n"
    );
    run_taxon_ok(tmp.path(), &["check", "catalog.json"]);
}

#[test]
fn test_mv_reorders_roots() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_catalog(tmp.path(), CATALOG);

    let out = run_taxon_ok(tmp.path(), &["--json", "mv", "catalog.json", "20", "0"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["parent_changed"], false);
    assert_eq!(json["category_index"], 0);
    assert_eq!(json["categories"][0]["id"], "20");
    assert_eq!(json["categories"][1]["id"], "21");
    assert!(json.get("parent_path").is_some());
}

#[test]
fn test_ambiguous_parent_policy_from_config() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_catalog(tmp.path(), AMBIGUOUS);

    let (_, stderr, success) = run_taxon(tmp.path(), &["mv", "catalog.json", "z", "2"]);
    assert!(!success);
    assert!(stderr.contains("level-2 category requires a parent"));

    let config = tmp.path().join("strict.toml");
    fs::write(&config, "[placement]\nambiguous_parent = \"reject\"\n").unwrap();
    let (_, stderr, success) = run_taxon(
        tmp.path(),
        &["-c", "strict.toml", "mv", "catalog.json", "z", "2"],
    );
    assert!(!success);
    assert!(stderr.contains("no parent could be inferred for this position"));
}

// ---------------------------------------------------------------------------
// Tidy tests
// ---------------------------------------------------------------------------

#[test]
fn test_tidy_closes_gaps() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_catalog(tmp.path(), GAPPY);

    let out = run_taxon_ok(tmp.path(), &["--json", "tidy", "catalog.json"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["renumbered"], 1);

    run_taxon_ok(tmp.path(), &["tidy", "catalog.json", "--write"]);
    let out = run_taxon_ok(tmp.path(), &["tree", "catalog.json"]);
    assert_eq!(out, "1. Hair [1]\n2. Nails [2] *\n");
    run_taxon_ok(tmp.path(), &["check", "catalog.json"]);
}
