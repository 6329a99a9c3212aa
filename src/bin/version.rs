//! Version tool - derive a semantic version from the triggering git ref.
//!
//! Tag refs become releases; branch refs become prerelease builds versioned
//! against the repository's most recent tag. Emits `version`, `prerelease`,
//! `publish` and `release` step outputs for later workflow steps to gate on.

use std::process;

use clap::Parser;

use release_actions::error::ActionError;
use release_actions::{Classification, GitHubClient, VersionInputs, actions};

/// Derive version and publish/release flags from git tag and branch state
#[derive(Parser, Debug)]
#[command(name = "version", version, about)]
struct Args {
    /// API token used for the tag-list query
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: String,

    /// Repository in owner/repo form
    #[arg(long, env = "GITHUB_REPOSITORY", value_name = "OWNER/REPO")]
    github_repository: String,

    /// Fully-qualified ref that triggered the run
    #[arg(long = "ref", env = "GITHUB_REF")]
    github_ref: String,

    /// CI build counter, used to disambiguate branch builds
    #[arg(long, env = "GITHUB_RUN_NUMBER", default_value_t = 0)]
    build: u64,

    /// API base URL; GitHub Actions sets this itself
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com", hide = true)]
    api_url: String,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args = Args::parse();

    let result = match run(&args).await {
        Ok(result) => result,
        Err(e) => fail(e),
    };

    actions::notice(&format!("version {}", result.version));

    match serde_json::to_string(&result) {
        Ok(record) => println!("{record}"),
        Err(e) => fail(e.into()),
    }

    if let Err(e) = emit_outputs(&result) {
        fail(e);
    }
}

async fn run(args: &Args) -> Result<Classification, ActionError> {
    let (owner, repo) = VersionInputs::parse_repository(&args.github_repository)?;
    let client = GitHubClient::with_base_url(&args.github_token, &args.api_url)?;

    let inputs = VersionInputs {
        owner,
        repo,
        ref_name: args.github_ref.clone(),
        build: args.build,
    };

    inputs.run(&client).await
}

fn emit_outputs(result: &Classification) -> Result<(), ActionError> {
    actions::set_output("version", &result.version)?;
    actions::set_output("prerelease", &result.prerelease.to_string())?;
    actions::set_output("publish", &result.publish.join(","))?;
    actions::set_output("release", &result.release.to_string())?;
    Ok(())
}

fn fail(error: ActionError) -> ! {
    actions::error(&error.to_string());
    eprintln!("error: {error}");
    for suggestion in error.recovery_suggestions() {
        eprintln!("    {suggestion}");
    }
    process::exit(1);
}
