//! Shared helpers for integration tests

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Directory holding the playlist fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Absolute path of a fixture as a string argument.
pub fn fixture(name: &str) -> String {
    fixtures_dir().join(name).display().to_string()
}

/// Run wallsync with an isolated config file inside `home`.
pub fn run_wallsync_in(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_wallsync"))
        .args(args)
        .env("WALLSYNC_CONFIG", home.join("config.toml"))
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute wallsync");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

/// Run wallsync with a throwaway config location.
pub fn run_wallsync(args: &[&str]) -> (String, String, i32) {
    let home = TempDir::new().expect("Failed to create temp dir");
    run_wallsync_in(home.path(), args)
}
