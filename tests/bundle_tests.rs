//! End-to-end tests for the bundle tool.
//!
//! These run the real binary against a temporary working directory and the
//! system `tar`, checking the archive name, the staged layout and the
//! executable permission bit.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn bundle_cmd(dir: &Path, output: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bundle").expect("bundle binary");
    cmd.current_dir(dir).env("GITHUB_OUTPUT", output);
    cmd
}

#[test]
fn bundles_binary_into_platform_archive() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("github-output");

    let binary = dir.path().join("kprobe");
    std::fs::write(&binary, b"#!/bin/sh\nexit 0\n").expect("write binary");

    bundle_cmd(dir.path(), &output)
        .env("BINARY", &binary)
        .env("NAME", "tool")
        .env("TARGET", "aarch64-unknown-linux")
        .env("VERSION", "1.2.3")
        .assert()
        .success();

    assert!(dir.path().join("tool_1.2.3_linux_arm64.tgz").is_file());

    let staged = dir.path().join("tool-1.2.3/bin/kprobe");
    assert!(staged.is_file());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&staged).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    let outputs = std::fs::read_to_string(&output).expect("outputs");
    assert!(outputs.contains("bundle=tool_1.2.3_linux_arm64.tgz\n"));
}

#[test]
fn unknown_arch_passes_through_verbatim() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("github-output");

    let binary = dir.path().join("tool");
    std::fs::write(&binary, b"\x7fELF").expect("write binary");

    bundle_cmd(dir.path(), &output)
        .env("BINARY", &binary)
        .env("NAME", "tool")
        .env("TARGET", "riscv64gc-unknown-linux")
        .env("VERSION", "0.1.0")
        .assert()
        .success();

    assert!(dir.path().join("tool_0.1.0_linux_riscv64gc.tgz").is_file());
}

#[test]
fn missing_input_names_the_key() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("github-output");

    bundle_cmd(dir.path(), &output)
        .env("NAME", "tool")
        .env("TARGET", "x86_64-unknown-linux")
        .env("VERSION", "1.0.0")
        .env_remove("BINARY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--binary"));
}

#[test]
fn missing_binary_file_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("github-output");

    bundle_cmd(dir.path(), &output)
        .env("BINARY", dir.path().join("does-not-exist"))
        .env("NAME", "tool")
        .env("TARGET", "x86_64-unknown-linux")
        .env("VERSION", "1.0.0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Binary not found"));
}

#[test]
fn short_target_triple_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("github-output");

    let binary = dir.path().join("tool");
    std::fs::write(&binary, b"\x7fELF").expect("write binary");

    bundle_cmd(dir.path(), &output)
        .env("BINARY", &binary)
        .env("NAME", "tool")
        .env("TARGET", "x86_64-linux")
        .env("VERSION", "1.0.0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TARGET"));
}
