//! # release_actions
//!
//! CI helper tools for release pipelines.
//!
//! Two independent binaries are built from this crate:
//!
//! - **`bundle`** — packages a compiled binary into a versioned,
//!   platform-named `.tgz` archive and reports the archive name as a
//!   step output.
//! - **`version`** — derives a semantic version (plus prerelease,
//!   publish-list and release flags) from the triggering git ref and the
//!   repository's most recent tag.
//!
//! The binaries share no domain logic; they compose only at the workflow
//! level, where `version`'s `version` output feeds `bundle`'s `VERSION`
//! input. Each runs once, synchronously, to completion or failure — CI
//! re-runs are the retry mechanism.
//!
//! ## Usage
//!
//! ```bash
//! version                      # emits version/prerelease/publish/release
//! bundle                       # emits bundle=<name>_<version>_<os>_<arch>.tgz
//! ```
//!
//! All inputs arrive as environment variables (`BINARY`, `NAME`, `TARGET`,
//! `VERSION`, `GITHUB_TOKEN`, `GITHUB_REPOSITORY`, `GITHUB_REF`,
//! `GITHUB_RUN_NUMBER`); each is also exposed as a long flag for local runs.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod actions;
pub mod bundle;
pub mod error;
pub mod github;
pub mod release;

pub use bundle::{BundleInputs, TargetPlatform};
pub use error::{ActionError, BundleError, ConfigError, GitHubError, Result};
pub use github::{GitHubClient, Tag};
pub use release::{Classification, VersionInputs};
