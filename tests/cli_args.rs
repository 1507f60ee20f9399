//! Tests for CLI argument parsing and `--print` mode, run against the
//! actual binary.

mod common;

use common::{temp_catalog, temp_config};
use std::process::Command;

const CATALOG: &str = r#"[
    {"id": 1, "title": "Metropolis", "year": 1927, "rating": 8.3, "poster": "https://img.example/metropolis.jpg"},
    {"id": 2, "title": "Nosferatu", "year": 1922, "rating": 7.9, "poster": "/nosferatu.jpg"},
    {"id": 3, "title": "The General", "year": 1926, "rating": 8.1},
    {"id": 4, "title": "Sherlock Jr.", "year": 1924, "rating": 8.2, "poster": "/sherlock.jpg"}
]"#;

fn moviedeck_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_moviedeck"));
    // Keep the developer's key and config out of the test run.
    cmd.env_remove("TMDB_API_KEY");
    cmd.env_remove("MOVIEDECK_LOG");
    cmd
}

#[test]
fn test_help_lists_options() {
    let output = moviedeck_cmd()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--query"));
    assert!(stdout.contains("--page"));
    assert!(stdout.contains("--print"));
    assert!(stdout.contains("--catalog"));
    assert!(stdout.contains("--config"));
}

#[test]
fn test_page_zero_is_rejected() {
    let output = moviedeck_cmd()
        .args(["--page", "0", "--print"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}

#[test]
fn test_print_listing_from_catalog() {
    let (_dir, catalog) = temp_catalog(CATALOG);
    let output = moviedeck_cmd()
        .arg("--print")
        .arg("--catalog")
        .arg(&catalog)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Page 1 of 1");
    assert_eq!(
        lines[1],
        "Metropolis\t1927\t8.3\thttps://img.example/metropolis.jpg"
    );
    assert!(lines[2].starts_with("Nosferatu\t1922\t7.9\thttps://image.tmdb.org/t/p/w500"));
    // No poster, so not listed.
    assert!(!stdout.contains("The General"));
    assert!(lines[3].starts_with("Sherlock Jr.\t"));
}

#[test]
fn test_print_page_past_end_shows_last_page() {
    let (_dir, catalog) = temp_catalog(CATALOG);
    let output = moviedeck_cmd()
        .args(["--print", "--page", "40"])
        .arg("--catalog")
        .arg(&catalog)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Page 1 of 1"));
    assert!(stdout.contains("Metropolis"));
}

#[test]
fn test_print_search_from_catalog() {
    let (_dir, catalog) = temp_catalog(CATALOG);
    let output = moviedeck_cmd()
        .args(["--print", "--query", "  nosf "])
        .arg("--catalog")
        .arg(&catalog)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Search \"nosf\": page 1 of 1"));
    assert!(stdout.contains("Nosferatu"));
    assert!(!stdout.contains("Metropolis"));
}

#[test]
fn test_print_empty_search_exits_zero() {
    let (_dir, catalog) = temp_catalog(CATALOG);
    let output = moviedeck_cmd()
        .args(["--print", "--query", "zzz"])
        .arg("--catalog")
        .arg(&catalog)
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("No results found."));
}

#[test]
fn test_print_broken_catalog_exits_one() {
    let (_dir, catalog) = temp_catalog("{ not json");
    let output = moviedeck_cmd()
        .arg("--print")
        .arg("--catalog")
        .arg(&catalog)
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unable to load the local catalog"));
}

#[test]
fn test_missing_api_key_names_env_var() {
    let (_dir, config) = temp_config("[metadata]\napi_key_env = \"MOVIEDECK_CLI_TEST_UNSET_KEY\"\n");
    let output = moviedeck_cmd()
        .arg("--print")
        .arg("--config")
        .arg(&config)
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error:"));
    assert!(stderr.contains("MOVIEDECK_CLI_TEST_UNSET_KEY"));
}

#[test]
fn test_invalid_config_exits_with_error() {
    let (_dir, config) = temp_config("[archive]\nrows = 0\n");
    let output = moviedeck_cmd()
        .arg("--print")
        .arg("--config")
        .arg(&config)
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load config"));
    assert!(stderr.contains("archive.rows"));
}
