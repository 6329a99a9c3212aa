//! Minimal GitHub Actions runtime surface.
//!
//! Covers the two pieces of the Actions toolkit these tools need: workflow
//! command annotations and step outputs. Outputs go to the file named by
//! `GITHUB_OUTPUT`; when that variable is unset (local runs, tests) they are
//! printed as `name=value` lines on stdout instead.

use std::fs::OpenOptions;
use std::io::Write;

use crate::error::Result;

/// Emit a notice-level workflow annotation.
///
/// Rendered by the Actions log viewer as a highlighted notice line.
pub fn notice(message: &str) {
    println!("::notice::{message}");
}

/// Emit an error-level workflow annotation.
///
/// Shown in the run summary; does not by itself fail the step — callers
/// still exit non-zero.
pub fn error(message: &str) {
    println!("::error::{message}");
}

/// Append a step output visible to later workflow steps.
///
/// Values must be single-line; neither tool produces multi-line outputs.
pub fn set_output(name: &str, value: &str) -> Result<()> {
    match std::env::var_os("GITHUB_OUTPUT") {
        Some(path) => {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            writeln!(file, "{name}={value}")?;
        }
        None => {
            println!("{name}={value}");
        }
    }
    Ok(())
}
