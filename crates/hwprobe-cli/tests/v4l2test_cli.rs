// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies
//
// v4l2test CLI Tests
//
// TESTING LAYERS:
//
// Layer 1 (No hardware required):
//   - Usage output and exit status
//   - Missing and non-V4L2 device nodes
//   - Result formats and logging switch
//
// Layer 3 (Hardware Integration - Requires a V4L2 M2M decoder):
//   - Successful probe of HWPROBE_TEST_DEVICE (default /dev/video10)
//
// RUN LAYER 1:
//   cargo test --test v4l2test_cli
//
// RUN LAYER 3 (on hardware):
//   cargo test --test v4l2test_cli -- --ignored --nocapture

use assert_cmd::Command;
use predicates::prelude::*;
use std::env;

/// Helper to create a Command for the v4l2test binary with logging off
fn v4l2test_cmd() -> Command {
    let mut cmd = Command::cargo_bin("v4l2test").expect("v4l2test binary");
    cmd.env_remove("MOZ_GFX_DEBUG").env_remove("RUST_LOG");
    cmd
}

// =============================================================================
// Layer 1: Basic Command Tests (No Hardware Required)
// =============================================================================

#[test]
fn test_usage_without_device() {
    v4l2test_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("--device"));
}

#[test]
fn test_help() {
    v4l2test_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("V4L2"))
        .stdout(predicate::str::contains("-d, --device"));
}

#[test]
fn test_missing_device() {
    v4l2test_cmd()
        .args(["-d", "/dev/hwprobe-missing-video"])
        .assert()
        .code(3)
        .stdout(predicate::str::starts_with(
            "ERROR\nV4L2 failed to open device /dev/hwprobe-missing-video",
        ))
        .stdout(predicate::str::contains("SUPPORTED").not())
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_non_v4l2_device() {
    v4l2test_cmd()
        .args(["--device", "/dev/null"])
        .assert()
        .code(3)
        .stdout(predicate::str::starts_with(
            "ERROR\nV4L2 device /dev/null failed to query capabilities",
        ));
}

#[test]
fn test_json_error() {
    let output = v4l2test_cmd()
        .args(["-d", "/dev/null", "--json"])
        .output()
        .expect("run v4l2test");
    assert_eq!(output.status.code(), Some(3));

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is one JSON object");
    let message = value["ERROR"].as_str().expect("ERROR entry");
    assert!(message.contains("/dev/null"));
    assert!(value.get("SUPPORTED").is_none());
}

#[test]
fn test_debug_logging_to_stderr() {
    v4l2test_cmd()
        .env("MOZ_GFX_DEBUG", "1")
        .args(["-d", "/dev/null"])
        .assert()
        .code(3)
        .stdout(predicate::str::starts_with("ERROR\n"))
        .stderr(predicate::str::contains("probing device '/dev/null'"));
}

#[test]
fn test_debug_flag_must_start_with_one() {
    v4l2test_cmd()
        .env("MOZ_GFX_DEBUG", "0")
        .args(["-d", "/dev/null"])
        .assert()
        .code(3)
        .stderr(predicate::str::is_empty());
}

// =============================================================================
// Layer 3: Hardware Integration Tests
// =============================================================================

#[test]
#[ignore = "requires a V4L2 M2M decoder"]
fn test_probe_decoder() {
    let device = env::var("HWPROBE_TEST_DEVICE").unwrap_or_else(|_| "/dev/video10".to_string());
    v4l2test_cmd()
        .args(["-d", &device])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("SUPPORTED\nTRUE\nHWCODECS\n"));
}
