//! Publish command: resolve inputs, publish the release, report it.

use crate::action::Action;
use crate::cli::{Args, OutputManager};
use crate::error::Result;
use crate::github::{GitHubArtifactUploader, GitHubReleases};
use crate::inputs::{CoreInputs, Inputs};

/// Resolve inputs and publish the release they describe
pub(super) async fn execute_publish(args: &Args, output: &OutputManager) -> Result<()> {
    // Every configuration error surfaces here, before any request is sent
    let inputs = CoreInputs::resolve(args)?;
    let repository = inputs.repository().clone();
    let tag = inputs.tag().to_string();

    output.info(&format!(
        "Publishing release {} to {}/{}",
        tag, repository.owner, repository.repo
    ));
    if inputs.allow_updates() {
        output.indent("Existing release for the tag will be updated");
    }
    for artifact in inputs.artifacts() {
        output.indent(&format!("Artifact: {}", artifact.path().display()));
    }

    let releases = GitHubReleases::new(inputs.token(), inputs.api_url().clone(), repository)?;
    let uploader = GitHubArtifactUploader::new(releases.clone(), inputs.replaces_artifacts());
    let artifact_count = inputs.artifacts().len();

    let action = Action::new(inputs, releases, uploader);
    let release = action.perform().await?;

    output.success(&format!("Release {} ready for {}", release.id, tag));
    if !release.html_url.is_empty() {
        output.indent(&release.html_url);
    }
    if artifact_count > 0 {
        output.success(&format!("Uploaded {} artifact(s)", artifact_count));
    }

    Ok(())
}
