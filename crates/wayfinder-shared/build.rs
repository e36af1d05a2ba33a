//! Build script for wayfinder-shared.
//!
//! This script sets:
//! - WAYFINDER_GIT_SHA: Short git commit hash
//! - WAYFINDER_BUILD_DATE: UTC ISO date

use std::process::Command;

fn main() {
    let git_sha = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout).ok()
            } else {
                None
            }
        })
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let build_date = chrono::Utc::now().format("%Y-%m-%d").to_string();

    println!("cargo:rustc-env=WAYFINDER_GIT_SHA={}", git_sha);
    println!("cargo:rustc-env=WAYFINDER_BUILD_DATE={}", build_date);

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/");
}
