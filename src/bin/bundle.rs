//! Bundle tool - package a compiled binary into a release archive.
//!
//! Stages the binary under `{name}-{version}/bin/`, marks it executable and
//! wraps the prefix in `{name}_{version}_{os}_{arch}.tgz`, reporting the
//! archive name as the `bundle` step output.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use release_actions::error::ActionError;
use release_actions::{BundleInputs, actions};

/// Package a compiled binary into a versioned, platform-named archive
#[derive(Parser, Debug)]
#[command(name = "bundle", about, disable_version_flag = true)]
struct Args {
    /// Path to the compiled binary to package
    #[arg(long, env = "BINARY")]
    binary: PathBuf,

    /// Product name used in the archive filename
    #[arg(long, env = "NAME")]
    name: String,

    /// Target triple the binary was built for (<arch>-<vendor>-<os>)
    #[arg(long, env = "TARGET")]
    target: String,

    /// Version to stamp on the archive, normally the version tool's output
    #[arg(long, env = "VERSION")]
    version: String,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args = Args::parse();
    let inputs = BundleInputs {
        binary: args.binary,
        name: args.name,
        target: args.target,
        version: args.version,
    };

    let bundle = match inputs.run().await {
        Ok(bundle) => bundle,
        Err(e) => fail(e),
    };

    log::info!("created {bundle}");

    if let Err(e) = actions::set_output("bundle", &bundle) {
        fail(e);
    }
}

fn fail(error: ActionError) -> ! {
    actions::error(&error.to_string());
    eprintln!("error: {error}");
    for suggestion in error.recovery_suggestions() {
        eprintln!("    {suggestion}");
    }
    process::exit(1);
}
