//! Version classification for CI triggers.
//!
//! Decides whether the current run is a tag-triggered release or a
//! branch-triggered prerelease build, and derives the version string to
//! stamp on artifacts:
//!
//! - **Tag ref** (`refs/tags/<tag>`): the tag itself is the version.
//!   Publishes both the bundle and the package, and flags a release.
//! - **Branch ref** (anything else): the most recent repository tag is the
//!   base, extended with a `<branch>.<build>` prerelease identifier so every
//!   branch build gets a unique, ordered version. Publishes the bundle only.
//!
//! A tag that does not parse as a semantic version is NOT an error: the
//! result stays at its INVALID default and the tool exits cleanly. Downstream
//! steps gate on the `release`/`publish` outputs, so an unparseable tag
//! simply publishes nothing. Infrastructure failures (the tag-list API being
//! unreachable) are hard errors by contrast.

use semver::{BuildMetadata, Prerelease, Version};
use serde::Serialize;

use crate::error::{ConfigError, Result};
use crate::github::GitHubClient;

/// Ref prefix identifying a tag-triggered run
pub const TAG_REF_PREFIX: &str = "refs/tags/";
/// Ref prefix identifying a branch-triggered run
pub const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// The version tool's result record.
///
/// This is the sole output artifact; it is reported as step outputs and
/// dumped once to the log, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Derived version string, or `"INVALID"` when no version could be derived
    pub version: String,
    /// Whether the version carries a prerelease component
    pub prerelease: bool,
    /// Artifact kinds later workflow steps should publish
    pub publish: Vec<String>,
    /// Whether this run should cut a release
    pub release: bool,
}

impl Default for Classification {
    fn default() -> Self {
        Self {
            version: "INVALID".to_string(),
            prerelease: false,
            publish: Vec::new(),
            release: false,
        }
    }
}

/// Validated inputs for a single version run.
#[derive(Debug, Clone)]
pub struct VersionInputs {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Fully-qualified git ref that triggered the run
    pub ref_name: String,
    /// CI build counter, `0` when absent
    pub build: u64,
}

impl VersionInputs {
    /// Split a combined `owner/repo` identifier.
    pub fn parse_repository(repository: &str) -> Result<(String, String)> {
        match repository.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => {
                Ok((owner.to_string(), repo.to_string()))
            }
            _ => Err(ConfigError::InvalidInput {
                key: "GITHUB_REPOSITORY".to_string(),
                reason: format!("expected owner/repo, got '{repository}'"),
            }
            .into()),
        }
    }

    /// Classify the triggering ref into a result record.
    ///
    /// Tag detection runs first; only the branch path touches the network
    /// (one tag-list call).
    pub async fn run(&self, client: &GitHubClient) -> Result<Classification> {
        if self.ref_name.starts_with(TAG_REF_PREFIX) {
            return Ok(classify_tag_ref(&self.ref_name));
        }

        let tags = client.list_tags(&self.owner, &self.repo).await?;
        let base = tags
            .first()
            .map(|tag| tag.name.as_str())
            .unwrap_or("0.0.0");

        log::debug!("base tag '{base}' for {}/{}", self.owner, self.repo);

        Ok(classify_branch_ref(&self.ref_name, base, self.build))
    }
}

/// Classify a tag-triggered run.
///
/// The tag name is the third `/`-delimited segment of the ref. An
/// unparseable tag yields the INVALID default.
pub fn classify_tag_ref(ref_name: &str) -> Classification {
    let tag = ref_name.split('/').nth(2).unwrap_or_default();

    match parse_version(tag) {
        Some(version) => Classification {
            prerelease: !version.pre.is_empty(),
            version: version.to_string(),
            publish: vec!["bundle".to_string(), "package".to_string()],
            release: true,
        },
        None => {
            log::warn!("tag '{tag}' is not a semantic version");
            Classification::default()
        }
    }
}

/// Classify a branch-triggered run against the repository's base tag.
///
/// An unparseable base tag, or a branch name that is not a legal prerelease
/// identifier, yields the INVALID default.
pub fn classify_branch_ref(ref_name: &str, base_tag: &str, build: u64) -> Classification {
    let branch = branch_name(ref_name);

    match next_prerelease(base_tag, branch, build) {
        Some(version) => Classification {
            version: version.to_string(),
            prerelease: true,
            publish: vec!["bundle".to_string()],
            release: false,
        },
        None => {
            log::warn!("cannot derive prerelease from tag '{base_tag}' on branch '{branch}'");
            Classification::default()
        }
    }
}

/// Branch segment of a `refs/heads/…` ref, `"unknown"` for anything else.
///
/// Only the first segment after the prefix is kept, so `refs/heads/feat/x`
/// becomes `feat`.
pub fn branch_name(ref_name: &str) -> &str {
    if ref_name.starts_with(BRANCH_REF_PREFIX) {
        ref_name.split('/').nth(2).unwrap_or("unknown")
    } else {
        "unknown"
    }
}

/// Next prerelease of `base_tag` for the given branch and build counter.
///
/// The numeric core is kept as-is; the prerelease component becomes
/// `{branch}.{build}` and any build metadata on the base tag is dropped.
pub fn next_prerelease(base_tag: &str, branch: &str, build: u64) -> Option<Version> {
    let mut version = parse_version(base_tag)?;
    version.pre = Prerelease::new(&format!("{branch}.{build}")).ok()?;
    version.build = BuildMetadata::EMPTY;
    Some(version)
}

/// Parse a tag as a semantic version, tolerating a leading `v`.
fn parse_version(tag: &str) -> Option<Version> {
    Version::parse(tag.strip_prefix('v').unwrap_or(tag)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_ref_classifies_as_release() {
        let result = classify_tag_ref("refs/tags/2.0.0");
        assert_eq!(result.version, "2.0.0");
        assert!(!result.prerelease);
        assert_eq!(result.publish, vec!["bundle", "package"]);
        assert!(result.release);
    }

    #[test]
    fn tag_ref_with_prerelease_component() {
        let result = classify_tag_ref("refs/tags/2.0.0-beta.1");
        assert_eq!(result.version, "2.0.0-beta.1");
        assert!(result.prerelease);
        assert_eq!(result.publish, vec!["bundle", "package"]);
        assert!(result.release);
    }

    #[test]
    fn tag_ref_tolerates_v_prefix() {
        let result = classify_tag_ref("refs/tags/v1.4.0");
        assert_eq!(result.version, "1.4.0");
        assert!(result.release);
    }

    #[test]
    fn malformed_tag_falls_back_to_invalid() {
        let result = classify_tag_ref("refs/tags/nightly");
        assert_eq!(result, Classification::default());
        assert_eq!(result.version, "INVALID");
        assert!(result.publish.is_empty());
        assert!(!result.release);
    }

    #[test]
    fn branch_ref_appends_branch_and_build() {
        let result = classify_branch_ref("refs/heads/main", "1.0.0", 42);
        assert_eq!(result.version, "1.0.0-main.42");
        assert!(result.prerelease);
        assert_eq!(result.publish, vec!["bundle"]);
        assert!(!result.release);
    }

    #[test]
    fn branch_ref_with_empty_tag_list_uses_zero_base() {
        let result = classify_branch_ref("refs/heads/main", "0.0.0", 7);
        assert_eq!(result.version, "0.0.0-main.7");
    }

    #[test]
    fn branch_ref_replaces_existing_prerelease() {
        let result = classify_branch_ref("refs/heads/dev", "v1.2.0-rc.3", 9);
        assert_eq!(result.version, "1.2.0-dev.9");
    }

    #[test]
    fn non_branch_ref_uses_unknown() {
        let result = classify_branch_ref("refs/pull/17/merge", "1.0.0", 3);
        assert_eq!(result.version, "1.0.0-unknown.3");
    }

    #[test]
    fn nested_branch_keeps_first_segment() {
        assert_eq!(branch_name("refs/heads/feat/fast-path"), "feat");
        assert_eq!(branch_name("refs/heads/main"), "main");
        assert_eq!(branch_name("HEAD"), "unknown");
    }

    #[test]
    fn malformed_base_tag_falls_back_to_invalid() {
        let result = classify_branch_ref("refs/heads/main", "not-a-version", 1);
        assert_eq!(result, Classification::default());
    }

    #[test]
    fn illegal_branch_identifier_falls_back_to_invalid() {
        // underscores are not valid semver prerelease characters
        let result = classify_branch_ref("refs/heads/my_branch", "1.0.0", 1);
        assert_eq!(result, Classification::default());
    }

    #[test]
    fn repository_splitting() {
        let (owner, repo) = VersionInputs::parse_repository("kentik/kprobe").expect("valid");
        assert_eq!(owner, "kentik");
        assert_eq!(repo, "kprobe");
        assert!(VersionInputs::parse_repository("kentik").is_err());
        assert!(VersionInputs::parse_repository("/repo").is_err());
    }
}
