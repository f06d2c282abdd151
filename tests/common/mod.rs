//! Common test utilities for mylime integration tests.
//!
//! Provides `TestEnv` for isolated test environments that never read the
//! user's real `~/.mylime.yaml` or inherit stray setting variables.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
pub use tempfile::TempDir;

/// Environment variables the resolver consults.
pub const SETTING_VARS: [&str; 4] = ["VERBOSE", "LOG-FORMAT", "LOG_FORMAT", "SENTINEL"];

/// A test environment with an isolated home directory.
///
/// The `mylime()` method returns a `Command` with `HOME` pointed at the
/// temporary directory, making tests parallel-safe.
pub struct TestEnv {
    pub home_dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment with an empty home directory.
    pub fn new() -> Self {
        Self {
            home_dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the mylime binary with isolated home and environment.
    pub fn mylime(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_mylime"));
        cmd.current_dir(self.home_dir.path());
        cmd.env("HOME", self.home_dir.path());
        for var in SETTING_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get the path to the home directory.
    pub fn home_path(&self) -> &Path {
        self.home_dir.path()
    }

    /// Write `~/.mylime.yaml` and return its path.
    pub fn write_home_config(&self, content: &str) -> PathBuf {
        self.write_file(".mylime.yaml", content)
    }

    /// Write a file relative to the home directory and return its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.home_dir.path().join(name);
        fs::write(&path, content).expect("Failed to write config file");
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
