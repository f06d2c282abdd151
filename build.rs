//! Build script that stamps the long version string.
//!
//! Exposes two compile-time variables to `mylime --version`:
//! - `MYLIME_GIT_COMMIT`: `git describe --always --dirty` of the source tree,
//!   or "unknown" outside a git checkout
//! - `MYLIME_BUILD_TIMESTAMP`: UTC build time in RFC 3339 form. Taken from
//!   `SOURCE_DATE_EPOCH` when set, so packaged builds are reproducible.

use std::env;
use std::process::Command;

use chrono::{DateTime, Utc};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    let built = build_time().format(TIMESTAMP_FORMAT);
    println!("cargo:rustc-env=MYLIME_BUILD_TIMESTAMP={}", built);

    let commit = describe_source().unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=MYLIME_GIT_COMMIT={}", commit);
}

fn build_time() -> DateTime<Utc> {
    env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now)
}

fn describe_source() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();
    (!described.is_empty()).then(|| described.to_string())
}
