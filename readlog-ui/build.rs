//! Build identification for readlog-ui
//!
//! Exposes `GIT_HASH`, `BUILD_TIMESTAMP` and `BUILD_PROFILE` to the crate.
//! The page header and `/api/buildinfo` show them; `main` logs them.

use std::env;
use std::process::Command;

/// Set when building from a source archive without a git checkout
const GIT_HASH_OVERRIDE: &str = "READLOG_GIT_HASH";

fn git_short_hash() -> Option<String> {
    if let Ok(hash) = env::var(GIT_HASH_OVERRIDE) {
        let hash = hash.trim();
        if !hash.is_empty() {
            return Some(hash.to_string());
        }
    }

    let output = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let hash = String::from_utf8(output.stdout).ok()?;
    let hash = hash.trim();
    (!hash.is_empty()).then(|| hash.to_string())
}

fn main() {
    let git_hash = git_short_hash().unwrap_or_else(|| "unknown".to_string());

    // RFC 3339 local time, seconds precision
    let built_at = chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, false);

    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=GIT_HASH={git_hash}");
    println!("cargo:rustc-env=BUILD_TIMESTAMP={built_at}");
    println!("cargo:rustc-env=BUILD_PROFILE={profile}");

    println!("cargo:rerun-if-env-changed={GIT_HASH_OVERRIDE}");
    // Track HEAD so a new commit refreshes the hash
    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-changed=../.git/refs/heads");
}
