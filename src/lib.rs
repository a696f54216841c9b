//! # Release Publisher
//!
//! Publishes a GitHub release for a tag from CI.
//!
//! Given a tag and a set of local artifact files, the crate decides whether
//! to create a new release or update an existing one, promotes a matching
//! draft release when there is one, and uploads the artifacts to the
//! resulting release.
//!
//! ## Usage
//!
//! ```bash
//! release_publisher --tag v1.0.0 --artifacts 'dist/*.tar.gz'
//! release_publisher --allow-updates --replaces-artifacts --artifacts 'dist/*'
//! ```
//!
//! Inside a CI step every flag can instead be set through its `INPUT_*`
//! environment variable, and the tag defaults to the one in `GITHUB_REF`.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod action;
pub mod artifact;
pub mod cli;
pub mod error;
pub mod github;
pub mod inputs;

// Re-export main types for public API
pub use action::{Action, ErrorMessage, LookupFailure};
pub use artifact::{Artifact, ArtifactGlobber};
pub use cli::Args;
pub use error::{ArtifactError, GitHubError, InputError, ReleaseError, Result};
pub use github::{
    ArtifactUploader, GitHubArtifactUploader, GitHubReleases, ReleaseBody, ReleaseHandle,
    ReleaseRequest, Releases,
};
pub use inputs::{CoreInputs, Inputs, Repository};
