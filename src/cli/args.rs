//! Command line argument parsing.
//!
//! Every flag falls back to the environment variable a CI runner sets for
//! the input of the same name, so the tool runs unchanged as a CI step or
//! from a shell.

use clap::Parser;
use clap::builder::BoolishValueParser;
use std::path::PathBuf;

/// Default REST API base
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Create or update a GitHub release and upload its artifacts
#[derive(Parser, Debug, Clone)]
#[command(
    name = "release_publisher",
    version,
    about = "Create or update a GitHub release and upload its artifacts",
    long_about = "Create or update a GitHub release for a tag and upload artifacts to it.

Every option can also be provided through the INPUT_* environment variable
shown in its help, which is how CI runners pass step inputs.

Usage:
  release_publisher --tag v1.0.0 --artifacts 'dist/*.tar.gz' --token $TOKEN
  release_publisher --allow-updates --draft --body-file CHANGELOG.md"
)]
pub struct Args {
    /// Update the release for the tag if one already exists
    #[arg(long, env = "INPUT_ALLOWUPDATES", value_parser = BoolishValueParser::new())]
    pub allow_updates: bool,

    /// Comma separated glob patterns of files to upload
    #[arg(long, env = "INPUT_ARTIFACTS", value_name = "PATTERNS")]
    pub artifacts: Option<String>,

    /// Single artifact pattern, used when --artifacts is empty
    #[arg(long, env = "INPUT_ARTIFACT", value_name = "PATTERN", hide = true)]
    pub artifact: Option<String>,

    /// Content type of every artifact (guessed from the extension when unset)
    #[arg(long, env = "INPUT_ARTIFACTCONTENTTYPE")]
    pub artifact_content_type: Option<String>,

    /// Release body
    #[arg(long, env = "INPUT_BODY")]
    pub body: Option<String>,

    /// File whose contents become the release body
    #[arg(long, env = "INPUT_BODYFILE", value_name = "PATH")]
    pub body_file: Option<PathBuf>,

    /// Leave the body out of create and update requests
    #[arg(long, env = "INPUT_OMITBODY", value_parser = BoolishValueParser::new())]
    pub omit_body: bool,

    /// Leave the body out of update requests
    #[arg(long, env = "INPUT_OMITBODYDURINGUPDATE", value_parser = BoolishValueParser::new())]
    pub omit_body_during_update: bool,

    /// Commitish the tag is created from if it does not exist
    #[arg(long, env = "INPUT_COMMIT")]
    pub commit: Option<String>,

    /// Release name (defaults to the tag)
    #[arg(long, env = "INPUT_NAME")]
    pub name: Option<String>,

    /// Leave the name out of create and update requests
    #[arg(long, env = "INPUT_OMITNAME", value_parser = BoolishValueParser::new())]
    pub omit_name: bool,

    /// Leave the name out of update requests
    #[arg(long, env = "INPUT_OMITNAMEDURINGUPDATE", value_parser = BoolishValueParser::new())]
    pub omit_name_during_update: bool,

    /// Mark the release as a draft
    #[arg(long, env = "INPUT_DRAFT", value_parser = BoolishValueParser::new())]
    pub draft: bool,

    /// Mark the release as a prerelease
    #[arg(long, env = "INPUT_PRERELEASE", value_parser = BoolishValueParser::new())]
    pub prerelease: bool,

    /// Delete assets with the same name before uploading
    #[arg(long, env = "INPUT_REPLACESARTIFACTS", value_parser = BoolishValueParser::new())]
    pub replaces_artifacts: bool,

    /// Release tag (defaults to the tag of GITHUB_REF)
    #[arg(long, env = "INPUT_TAG")]
    pub tag: Option<String>,

    /// API token
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Repository owner (defaults to the owner in GITHUB_REPOSITORY)
    #[arg(long, env = "INPUT_OWNER")]
    pub owner: Option<String>,

    /// Repository name (defaults to the name in GITHUB_REPOSITORY)
    #[arg(long, env = "INPUT_REPO")]
    pub repo: Option<String>,

    /// Repository in owner/repo form
    #[arg(long, env = "GITHUB_REPOSITORY", hide = true)]
    pub github_repository: Option<String>,

    /// Git ref that triggered the run
    #[arg(long, env = "GITHUB_REF", hide = true)]
    pub github_ref: Option<String>,

    /// REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Only print errors
    #[arg(long, short)]
    pub quiet: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            allow_updates: false,
            artifacts: None,
            artifact: None,
            artifact_content_type: None,
            body: None,
            body_file: None,
            omit_body: false,
            omit_body_during_update: false,
            commit: None,
            name: None,
            omit_name: false,
            omit_name_during_update: false,
            draft: false,
            prerelease: false,
            replaces_artifacts: false,
            tag: None,
            token: String::new(),
            owner: None,
            repo: None,
            github_repository: None,
            github_ref: None,
            api_url: DEFAULT_API_URL.to_string(),
            quiet: false,
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
