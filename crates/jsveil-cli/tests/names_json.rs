//! Integration tests for `jsveil names` and `jsveil generators`.
//!
//! These tests verify:
//! - `--json` output is valid JSON with a schema version
//! - A seed makes output reproducible
//! - Unknown generator tokens and out-of-range lengths fail with a non-zero exit

use serial_test::serial;
use std::collections::HashSet;
use std::process::Command;

fn cargo_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO"));
    cmd.args(["run", "-q", "-p", "jsveil-cli", "--bin", "jsveil", "--"]);
    cmd
}

fn names_json(args: &[&str]) -> serde_json::Value {
    let output = cargo_bin()
        .args(["names", "--json"])
        .args(args)
        .output()
        .expect("Failed to run names command");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Output should be valid JSON")
}

#[test]
#[serial]
fn test_generators_lists_every_token() {
    let output = cargo_bin()
        .args(["generators", "--json"])
        .output()
        .expect("Failed to run generators command");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let tokens: Vec<&str> = json["generators"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["token"].as_str().unwrap())
        .collect();
    assert_eq!(
        tokens,
        vec!["dictionary", "hexadecimal", "keep-original", "mangled", "mangled-shuffled"]
    );
}

#[test]
#[serial]
fn test_names_json_shape() {
    let json = names_json(&["--generator", "mangled", "--count", "60"]);

    assert_eq!(json["schema_version"], 1);
    assert_eq!(json["generator"], "mangled");
    assert_eq!(json["kind"], "lexical");

    let names: Vec<&str> = json["names"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n.as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 60);
    assert_eq!(&names[..3], &["a", "b", "c"]);
    assert_eq!(names[52], "aa");
}

#[test]
#[serial]
fn test_seed_makes_output_reproducible() {
    let args = ["--generator", "hexadecimal", "--count", "20", "--seed", "release-42"];
    let first = names_json(&args);
    let second = names_json(&args);
    assert_eq!(first["names"], second["names"]);

    let unique: HashSet<&str> = first["names"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n.as_str().unwrap())
        .collect();
    assert_eq!(unique.len(), 20);
    assert!(unique.iter().all(|n| n.starts_with("_0x") && n.len() == 9));
}

#[test]
#[serial]
fn test_global_names_carry_prefix() {
    let json = names_json(&[
        "--generator",
        "dictionary",
        "--dictionary",
        "alpha,beta",
        "--kind",
        "global",
        "--prefix",
        "lib_",
        "--count",
        "3",
    ]);
    assert_eq!(json["kind"], "global");
    assert_eq!(
        json["names"],
        serde_json::json!(["lib_alpha", "lib_beta", "lib_alpha1"])
    );
}

#[test]
#[serial]
fn test_keep_original_labels_unchanged() {
    let json = names_json(&[
        "--generator",
        "keep-original",
        "--kind",
        "label",
        "--label",
        "outer",
        "--count",
        "2",
    ]);
    assert_eq!(json["names"], serde_json::json!(["outer", "outer"]));
}

#[test]
#[serial]
fn test_one_digit_length_outgrows_fifteen_names() {
    let json = names_json(&["--generator", "hexadecimal", "--length", "1", "--count", "30", "--seed", "3"]);

    let names: Vec<&str> = json["names"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n.as_str().unwrap())
        .collect();
    let unique: HashSet<&str> = names.iter().copied().collect();
    assert_eq!(unique.len(), 30);
    assert!(names.iter().filter(|n| n.len() == 4).count() <= 15);
}

#[test]
#[serial]
fn test_out_of_range_length_fails() {
    let output = cargo_bin()
        .args(["names", "--length", "1000000"])
        .output()
        .expect("Failed to run names command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nameLength"), "stderr: {stderr}");
}

#[test]
#[serial]
fn test_unknown_generator_fails() {
    let output = cargo_bin()
        .args(["names", "--generator", "base64"])
        .output()
        .expect("Failed to run names command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("base64"), "stderr: {stderr}");
}
