//! Expansion of artifact patterns into files.

use super::Artifact;
use crate::error::{ArtifactError, Result};

/// Expands comma separated glob patterns into artifacts
#[derive(Debug, Clone, Default)]
pub struct ArtifactGlobber;

impl ArtifactGlobber {
    /// Create a globber
    pub fn new() -> Self {
        Self
    }

    /// Expand `patterns` (e.g. `"dist/*.tar.gz, README.md"`) into artifacts.
    ///
    /// Matches keep pattern order, directories are skipped, and a pattern
    /// that matches nothing is reported and ignored.
    pub fn glob_artifact_string(
        &self,
        patterns: &str,
        content_type: Option<&str>,
    ) -> Result<Vec<Artifact>> {
        let mut artifacts = Vec::new();

        for pattern in patterns.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let paths = glob::glob(pattern).map_err(|source| ArtifactError::Pattern {
                pattern: pattern.to_string(),
                source,
            })?;

            let mut matched = 0usize;
            for entry in paths {
                let path = entry.map_err(ArtifactError::from)?;
                if !path.is_file() {
                    log::debug!("Skipping non-file match: {}", path.display());
                    continue;
                }
                artifacts.push(Artifact::new(path, content_type)?);
                matched += 1;
            }

            if matched == 0 {
                log::warn!("Artifact pattern '{}' did not match any files", pattern);
            }
        }

        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("dist")).unwrap();
        fs::create_dir(dir.path().join("dist/nested.zip")).unwrap();
        fs::write(dir.path().join("dist/a.zip"), b"a").unwrap();
        fs::write(dir.path().join("dist/b.zip"), b"b").unwrap();
        fs::write(dir.path().join("notes.txt"), b"n").unwrap();
        dir
    }

    fn names(artifacts: &[Artifact]) -> Vec<&str> {
        artifacts.iter().map(Artifact::name).collect()
    }

    #[test]
    fn test_multiple_patterns() {
        let dir = fixture();
        let root = dir.path().display();
        let patterns = format!("{root}/dist/*.zip , {root}/notes.txt");

        let artifacts = ArtifactGlobber::new()
            .glob_artifact_string(&patterns, None)
            .unwrap();

        assert_eq!(names(&artifacts), vec!["a.zip", "b.zip", "notes.txt"]);
        assert_eq!(artifacts[2].content_type(), "text/plain");
    }

    #[test]
    fn test_unmatched_pattern_is_skipped() {
        let dir = fixture();
        let patterns = format!("{0}/missing/*, {0}/notes.txt,", dir.path().display());

        let artifacts = ArtifactGlobber::new()
            .glob_artifact_string(&patterns, Some("raw"))
            .unwrap();

        assert_eq!(names(&artifacts), vec!["notes.txt"]);
        assert_eq!(artifacts[0].content_type(), "raw");
    }

    #[test]
    fn test_invalid_pattern() {
        let result = ArtifactGlobber::new().glob_artifact_string("dist/[", None);
        assert!(matches!(
            result,
            Err(crate::error::ReleaseError::Artifact(ArtifactError::Pattern { .. }))
        ));
    }

    #[test]
    fn test_empty_string() {
        let artifacts = ArtifactGlobber::new().glob_artifact_string(" , ", None).unwrap();
        assert!(artifacts.is_empty());
    }
}
