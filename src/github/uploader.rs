//! Batch upload of artifacts to a release

use super::releases::Releases;
use crate::artifact::Artifact;
use crate::error::Result;

/// Uploads a batch of artifacts to a release
#[allow(async_fn_in_trait)]
pub trait ArtifactUploader {
    /// Upload every artifact, stopping at the first failure
    async fn upload_artifacts(
        &self,
        artifacts: &[Artifact],
        release_id: u64,
        upload_url: &str,
    ) -> Result<()>;
}

/// [`ArtifactUploader`] backed by a [`Releases`] client
#[derive(Debug, Clone)]
pub struct GitHubArtifactUploader<R> {
    releases: R,
    replaces_existing_artifacts: bool,
}

impl<R: Releases> GitHubArtifactUploader<R> {
    /// Create an uploader; with `replaces_existing_artifacts` same-named assets are deleted first
    pub fn new(releases: R, replaces_existing_artifacts: bool) -> Self {
        Self {
            releases,
            replaces_existing_artifacts,
        }
    }

    async fn delete_existing_artifacts(&self, artifacts: &[Artifact], release_id: u64) -> Result<()> {
        let existing = self.releases.list_artifacts(release_id).await?;
        for asset in existing
            .iter()
            .filter(|asset| artifacts.iter().any(|a| a.name() == asset.name))
        {
            log::info!("Replacing existing asset {}", asset.name);
            self.releases.delete_artifact(asset.id).await?;
        }
        Ok(())
    }
}

impl<R: Releases> ArtifactUploader for GitHubArtifactUploader<R> {
    async fn upload_artifacts(
        &self,
        artifacts: &[Artifact],
        release_id: u64,
        upload_url: &str,
    ) -> Result<()> {
        if self.replaces_existing_artifacts {
            self.delete_existing_artifacts(artifacts, release_id).await?;
        }

        for artifact in artifacts {
            let content = artifact.read().await?;
            self.releases
                .upload_artifact(upload_url, artifact, content)
                .await?;
        }

        Ok(())
    }
}
