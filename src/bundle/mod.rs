//! Bundle creation for release binaries.
//!
//! Stages a compiled binary under a versioned prefix and wraps it in a
//! gzip-compressed tarball named `{name}_{version}_{os}_{arch}.tgz`, where
//! `os` and `arch` come from the build's target triple. The archive name is
//! reported as the `bundle` step output so later workflow steps can upload it.

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::process::Command;

use crate::error::{BundleError, ConfigError, Result};

/// Platform half of a target triple, with the vendor segment discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPlatform {
    /// Normalized CPU architecture (`arm64`, `arm`, `amd64`, or verbatim)
    pub arch: String,
    /// Operating system segment of the triple
    pub os: String,
}

/// Parse a `<arch>-<vendor>-<os>` target triple.
///
/// The vendor segment is discarded. Triples with additional segments
/// (`aarch64-unknown-linux-gnu`) keep only the third segment as the OS,
/// matching how the workflow names its targets.
pub fn parse_target(target: &str) -> Result<TargetPlatform> {
    let mut parts = target.split('-');
    let (arch, vendor, os) = (parts.next(), parts.next(), parts.next());
    match (arch, vendor, os) {
        (Some(arch), Some(_), Some(os)) if !arch.is_empty() && !os.is_empty() => {
            Ok(TargetPlatform {
                arch: normalize_arch(arch).to_string(),
                os: os.to_string(),
            })
        }
        _ => Err(ConfigError::InvalidInput {
            key: "TARGET".to_string(),
            reason: format!("expected <arch>-<vendor>-<os> triple, got '{target}'"),
        }
        .into()),
    }
}

/// Map a triple's CPU token to the name used in published archives.
///
/// Unknown architectures pass through verbatim so new targets can be added
/// to the build matrix without touching this tool.
pub fn normalize_arch(arch: &str) -> &str {
    match arch {
        "aarch64" => "arm64",
        "armv7" => "arm",
        "x86_64" => "amd64",
        other => other,
    }
}

/// Validated inputs for a single bundle run.
#[derive(Debug, Clone)]
pub struct BundleInputs {
    /// Path to the compiled binary to package
    pub binary: PathBuf,
    /// Product name used in the archive and staging prefix
    pub name: String,
    /// Target triple the binary was built for
    pub target: String,
    /// Version string, normally the `version` output of the version tool
    pub version: String,
}

impl BundleInputs {
    /// Archive filename: `{name}_{version}_{os}_{arch}.tgz`
    pub fn bundle_name(&self, platform: &TargetPlatform) -> String {
        format!(
            "{}_{}_{}_{}.tgz",
            self.name, self.version, platform.os, platform.arch
        )
    }

    /// Staging directory prefix: `{name}-{version}`
    pub fn staging_prefix(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }

    /// Stage the binary and produce the archive in the working directory.
    ///
    /// Returns the archive filename on success. The archiver is an external
    /// `tar` invocation; a non-zero exit aborts the run with the archiver's
    /// stderr attached.
    pub async fn run(&self) -> Result<String> {
        let platform = parse_target(&self.target)?;
        let bundle = self.bundle_name(&platform);
        let prefix = self.staging_prefix();

        if !self.binary.is_file() {
            return Err(BundleError::BinaryNotFound {
                path: self.binary.clone(),
            }
            .into());
        }

        let basename = self.binary.file_name().ok_or_else(|| ConfigError::InvalidInput {
            key: "BINARY".to_string(),
            reason: format!("path '{}' has no filename", self.binary.display()),
        })?;

        let bin_dir = Path::new(&prefix).join("bin");
        fs::create_dir_all(&bin_dir).await?;

        let staged = bin_dir.join(basename);
        stage_binary(&self.binary, &staged).await?;

        log::info!("staged {} -> {}", self.binary.display(), staged.display());

        run_archiver(&bundle, &prefix).await?;
        Ok(bundle)
    }
}

/// Copy the binary into the staging tree and mark it executable (0755).
async fn stage_binary(src: &Path, dest: &Path) -> Result<()> {
    let staged = |source| BundleError::StagingFailed {
        path: dest.to_path_buf(),
        source,
    };

    fs::copy(src, dest).await.map_err(&staged)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dest, std::fs::Permissions::from_mode(0o755))
            .await
            .map_err(&staged)?;
    }

    Ok(())
}

/// Invoke `tar -czvf {bundle} {prefix}` and wait for it to finish.
async fn run_archiver(bundle: &str, prefix: &str) -> Result<()> {
    let tar = which::which("tar").map_err(|_| ConfigError::ArchiverNotFound {
        name: "tar".to_string(),
    })?;

    let output = Command::new(tar)
        .args(["-czvf", bundle, prefix])
        .output()
        .await?;

    // tar -v lists archived paths on stdout; keep them in the debug log
    for line in String::from_utf8_lossy(&output.stdout).lines() {
        log::debug!("tar: {line}");
    }

    if !output.status.success() {
        return Err(BundleError::ArchiverFailed {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into());
    }

    Ok(())
}
