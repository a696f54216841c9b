//! GitHub integration for release operations

mod releases;
mod types;
mod uploader;

pub use releases::{GitHubReleases, Releases};
pub use types::{
    ExistingRelease, ReleaseAsset, ReleaseBody, ReleaseHandle, ReleaseRequest, ReleaseSummary,
};
pub use uploader::{ArtifactUploader, GitHubArtifactUploader};
