//! Shared test helpers.

#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temp directory for use as BLOQUEO_HOME.
pub fn temp_home() -> TempDir {
    tempfile::Builder::new()
        .prefix("bloqueo_test_")
        .tempdir()
        .expect("temp dir")
}

/// Write a hosts file with `content` inside `dir` and return its path.
pub fn hosts_file(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("hosts");
    std::fs::write(&path, content).expect("write hosts");
    path
}

/// `bloqueo` binary isolated to `dir`: config under it, hosts file at `hosts`.
pub fn bloqueo_cmd(dir: &TempDir, hosts: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("bloqueo").expect("binary");
    cmd.env("BLOQUEO_HOME", dir.path())
        .env("BLOQUEO_HOSTS_FILE", hosts)
        .env_remove("RUST_LOG");
    cmd
}
