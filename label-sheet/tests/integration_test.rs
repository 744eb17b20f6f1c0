use std::fs;
use std::path::Path;
use std::process::Command;

fn cargo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_label-sheet"))
}

fn output_dir() -> &'static Path {
    Path::new("tests/output")
}

fn setup() {
    fs::create_dir_all(output_dir()).expect("Failed to create output directory");
}

fn cleanup_file(name: &str) {
    let path = output_dir().join(name);
    if path.exists() {
        fs::remove_file(&path).ok();
    }
}

#[test]
fn test_basic_sheet() {
    setup();
    let output_file = "test-basic.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-i", "tests/fixtures/products.json",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let path = output_dir().join(output_file);
    assert!(path.exists(), "PDF file was not created");

    let metadata = fs::metadata(&path).expect("Failed to get file metadata");
    assert!(metadata.len() > 1000, "PDF file is too small, likely empty or corrupt");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Labels: 30"), "Unexpected summary: {}", stdout);
    assert!(stdout.contains("Pages: 2"), "Unexpected summary: {}", stdout);
}

#[test]
fn test_config_file_and_expiry() {
    setup();
    let output_file = "test-config.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-i", "tests/fixtures/products.json",
            "-c", "tests/fixtures/sheet-2x2.json",
            "--expiry",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Pages: 8"), "Unexpected summary: {}", stdout);
    assert!(output_dir().join(output_file).exists(), "PDF file was not created");
}

#[test]
fn test_grid_overrides_without_highlight() {
    setup();
    let output_file = "test-overrides.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-i", "tests/fixtures/products.json",
            "--labels-per-row", "2",
            "--labels-per-column", "5",
            "--no-highlight",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Pages: 3"), "Unexpected summary: {}", stdout);
}

#[test]
fn test_malformed_records_use_defaults() {
    setup();
    let output_file = "test-malformed.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-i", "tests/fixtures/malformed.json",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Labels: 5"), "Unexpected summary: {}", stdout);
    assert!(stdout.contains("Defaults substituted: 7"), "Unexpected summary: {}", stdout);
}

#[test]
fn test_strict_mode_rejects_malformed_records() {
    let output = cargo_bin()
        .args([
            "-i", "tests/fixtures/malformed.json",
            "--strict",
            "--dry-run",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed in strict mode");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Record 0"), "Unexpected error: {}", stderr);
}

#[test]
fn test_empty_catalog() {
    setup();
    let output_file = "test-empty.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-i", "tests/fixtures/empty.json",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(output_dir().join(output_file).exists(), "PDF file was not created");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Pages: 0"), "Unexpected summary: {}", stdout);
}

#[test]
fn test_dry_run_writes_nothing() {
    setup();
    let output_file = "test-dry-run.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-i", "tests/fixtures/products.json",
            "--dry-run",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(!output_dir().join(output_file).exists(), "Dry run should not write a PDF");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Drawing operations:"), "Unexpected summary: {}", stdout);
}

#[test]
fn test_invalid_catalog_file() {
    let output = cargo_bin()
        .args([
            "-i", "nonexistent.json",
            "-o", "tests/output/should-not-exist.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for missing catalog");
}

#[test]
fn test_invalid_grid() {
    let output = cargo_bin()
        .args([
            "-i", "tests/fixtures/products.json",
            "--labels-per-row", "0",
            "-o", "tests/output/should-not-exist.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for an empty grid");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid sheet configuration"), "Unexpected error: {}", stderr);
}
