//! Create-or-update decision for a tag's release.
//!
//! [`Action`] is the only place release policy lives. It looks up, creates
//! or updates exactly one release and then hands the artifacts to the
//! uploader. Every step is awaited before the next starts, and every failure
//! except a 404 from the tag lookup is returned exactly as received.

mod error_message;

pub use error_message::{ErrorMessage, LookupFailure};

use crate::error::Result;
use crate::github::{ArtifactUploader, ReleaseHandle, ReleaseRequest, Releases};
use crate::inputs::Inputs;

/// Publishes the release for one tag
#[derive(Debug)]
pub struct Action<I, R, U> {
    inputs: I,
    releases: R,
    uploader: U,
}

impl<I, R, U> Action<I, R, U>
where
    I: Inputs,
    R: Releases,
    U: ArtifactUploader,
{
    /// Create an action over its collaborators
    pub fn new(inputs: I, releases: R, uploader: U) -> Self {
        Self {
            inputs,
            releases,
            uploader,
        }
    }

    /// Create or update the release, then upload the artifacts to it
    pub async fn perform(&self) -> Result<ReleaseHandle> {
        let release = self.create_or_update_release().await?;

        let artifacts = self.inputs.artifacts();
        if !artifacts.is_empty() {
            self.uploader
                .upload_artifacts(artifacts, release.id, &release.upload_url)
                .await?;
        }

        Ok(release)
    }

    async fn create_or_update_release(&self) -> Result<ReleaseHandle> {
        if !self.inputs.allow_updates() {
            return self.create_release().await;
        }

        match self.releases.get_by_tag(self.inputs.tag()).await {
            Ok(existing) => self.update_release(existing.id).await,
            Err(error) => match ErrorMessage::classify(error) {
                LookupFailure::NotFound => self.update_draft_or_create_release().await,
                LookupFailure::Other(error) => Err(error),
            },
        }
    }

    async fn update_draft_or_create_release(&self) -> Result<ReleaseHandle> {
        match self.find_matching_draft_release_id().await? {
            Some(id) => self.update_release(id).await,
            None => self.create_release().await,
        }
    }

    async fn find_matching_draft_release_id(&self) -> Result<Option<u64>> {
        let tag = self.inputs.tag();
        let releases = self.releases.list_releases().await?;

        Ok(releases
            .into_iter()
            .find(|release| release.draft && release.tag_name == tag)
            .map(|release| release.id))
    }

    async fn update_release(&self, id: u64) -> Result<ReleaseHandle> {
        self.releases
            .update(id, &ReleaseRequest::for_update(&self.inputs))
            .await
    }

    async fn create_release(&self) -> Result<ReleaseHandle> {
        self.releases
            .create(&ReleaseRequest::for_create(&self.inputs))
            .await
    }
}
