//! Local files attached to a release.

mod globber;

pub use globber::ArtifactGlobber;

use crate::error::{ArtifactError, Result};
use bytes::Bytes;
use std::path::{Path, PathBuf};

/// A local file to be uploaded to a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    path: PathBuf,
    name: String,
    content_type: String,
}

impl Artifact {
    /// Create an artifact for `path`.
    ///
    /// The asset name is the file name. Without an explicit `content_type`
    /// one is guessed from the extension. The file itself is not touched.
    pub fn new(path: impl Into<PathBuf>, content_type: Option<&str>) -> Result<Self> {
        let path = path.into();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ArtifactError::InvalidName { path: path.clone() })?
            .to_string();
        let content_type = content_type
            .map(str::to_string)
            .unwrap_or_else(|| detect_content_type(&path).to_string());

        Ok(Self {
            path,
            name,
            content_type,
        })
    }

    /// Path on disk
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Asset name used on the release
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Content type sent with the upload
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Read the file content
    pub async fn read(&self) -> Result<Bytes> {
        let content = tokio::fs::read(&self.path)
            .await
            .map_err(|source| ArtifactError::Read {
                path: self.path.clone(),
                source,
            })?;
        Ok(Bytes::from(content))
    }
}

/// Detect MIME type for an artifact from its extension
fn detect_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("deb") => "application/vnd.debian.binary-package",
        Some("rpm") => "application/x-rpm",
        Some("exe") | Some("msi") => "application/x-msdownload",
        Some("dmg") => "application/x-apple-diskimage",
        Some("AppImage") => "application/x-executable",
        Some("zip") => "application/zip",
        Some("tar") => "application/x-tar",
        Some("gz") | Some("tgz") => "application/gzip",
        Some("json") => "application/json",
        Some("txt") | Some("md") | Some("sha256") => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_file_name() {
        let artifact = Artifact::new("dist/tool-x86_64.tar.gz", None).unwrap();
        assert_eq!(artifact.name(), "tool-x86_64.tar.gz");
        assert_eq!(artifact.path(), Path::new("dist/tool-x86_64.tar.gz"));
    }

    #[test]
    fn test_content_type_guessed() {
        assert_eq!(Artifact::new("a.zip", None).unwrap().content_type(), "application/zip");
        assert_eq!(Artifact::new("a.tgz", None).unwrap().content_type(), "application/gzip");
        assert_eq!(
            Artifact::new("tool", None).unwrap().content_type(),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_explicit_content_type_wins() {
        let artifact = Artifact::new("a.zip", Some("raw")).unwrap();
        assert_eq!(artifact.content_type(), "raw");
    }

    #[test]
    fn test_path_without_file_name() {
        assert!(Artifact::new("..", None).is_err());
    }

    #[tokio::test]
    async fn test_read_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, b"blob").unwrap();

        let artifact = Artifact::new(&path, None).unwrap();
        assert_eq!(artifact.read().await.unwrap(), Bytes::from_static(b"blob"));
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let artifact = Artifact::new("does/not/exist.bin", None).unwrap();
        assert!(matches!(
            artifact.read().await,
            Err(crate::error::ReleaseError::Artifact(ArtifactError::Read { .. }))
        ));
    }
}
