//! Error types for release publishing.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.

use std::path::PathBuf;
use thiserror::Error;

use crate::action::ErrorMessage;

/// Result type alias for release publishing operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all release publishing operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Input resolution errors
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// GitHub API errors
    #[error("GitHub error: {0}")]
    GitHub(#[from] GitHubError),

    /// Artifact discovery and reading errors
    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),
}

/// Configuration errors raised while resolving inputs
#[derive(Error, Debug)]
pub enum InputError {
    /// Neither the tag input nor the git ref named a tag
    #[error("No tag found in ref or input!")]
    MissingTag,

    /// Target repository could not be determined
    #[error("Repository not set. Provide --owner and --repo or set GITHUB_REPOSITORY=owner/repo")]
    MissingRepository,

    /// Repository string is not `owner/repo`
    #[error("Invalid repository '{value}'. Expected: owner/repo")]
    InvalidRepository {
        /// Offending value
        value: String,
    },

    /// Body file could not be read
    #[error("Failed to read body file {path}: {source}")]
    BodyFile {
        /// Path of the body file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Token cannot be sent as a header value
    #[error("Token contains characters that are not valid in an HTTP header")]
    InvalidToken,

    /// API base URL is not a valid URL
    #[error("Invalid API url '{value}': {source}")]
    InvalidApiUrl {
        /// Offending value
        value: String,
        /// Parse error
        #[source]
        source: url::ParseError,
    },
}

/// A single entry of the `errors` array in a GitHub error response
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct ApiErrorDetail {
    /// Resource the error refers to (e.g. `Release`)
    #[serde(default)]
    pub resource: Option<String>,
    /// Field the error refers to (e.g. `tag_name`)
    #[serde(default)]
    pub field: Option<String>,
    /// Machine readable code (e.g. `already_exists`)
    #[serde(default)]
    pub code: Option<String>,
}

/// GitHub API errors
#[derive(Error, Debug)]
pub enum GitHubError {
    /// The API answered with a non-success status
    #[error("{method} {url} returned {status}: {message}")]
    Api {
        /// HTTP method of the failed request
        method: String,
        /// Request URL
        url: String,
        /// HTTP status code
        status: u16,
        /// Message from the response body, or the status text
        message: String,
        /// Structured error entries from the response body
        errors: Vec<ApiErrorDetail>,
    },

    /// The request never produced a usable response
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A request URL could not be built
    #[error("Invalid url '{url}': {reason}")]
    InvalidUrl {
        /// URL or URL template the request was built from
        url: String,
        /// Reason for the error
        reason: String,
    },
}

/// Artifact errors
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// Invalid glob pattern
    #[error("Invalid artifact pattern '{pattern}': {source}")]
    Pattern {
        /// Pattern as given
        pattern: String,
        /// Pattern error
        #[source]
        source: glob::PatternError,
    },

    /// A matched path could not be inspected
    #[error("Failed to inspect artifact match: {0}")]
    Glob(#[from] glob::GlobError),

    /// Path has no usable file name
    #[error("Invalid artifact filename: {path}")]
    InvalidName {
        /// Path of the artifact
        path: PathBuf,
    },

    /// Artifact content could not be read
    #[error("Failed to read artifact {path}: {source}")]
    Read {
        /// Path of the artifact
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        let message = ErrorMessage::new(self);
        match self {
            ReleaseError::Input(InputError::MissingTag) => vec![
                "Pass --tag or set INPUT_TAG".to_string(),
                "Run on a tag push so GITHUB_REF starts with refs/tags/".to_string(),
            ],
            ReleaseError::Input(InputError::MissingRepository)
            | ReleaseError::Input(InputError::InvalidRepository { .. }) => vec![
                "Pass --owner and --repo".to_string(),
                "Set GITHUB_REPOSITORY in owner/repo form".to_string(),
            ],
            ReleaseError::GitHub(_) if message.status == Some(401) => vec![
                "Verify the token is valid and not expired".to_string(),
            ],
            ReleaseError::GitHub(_) if message.status == Some(403) => vec![
                "Verify the token has contents: write permission on the repository".to_string(),
            ],
            ReleaseError::GitHub(_) if message.has_error_with_code("already_exists") => vec![
                "A release for this tag already exists".to_string(),
                "Pass --allow-updates to update it instead of creating a new one".to_string(),
            ],
            ReleaseError::Artifact(ArtifactError::Pattern { .. }) => vec![
                "Check the artifact patterns; separate multiple patterns with commas".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16, code: Option<&str>) -> ReleaseError {
        GitHubError::Api {
            method: "POST".to_string(),
            url: "https://api.github.com/repos/octo/hello/releases".to_string(),
            status,
            message: "Validation Failed".to_string(),
            errors: vec![ApiErrorDetail {
                resource: Some("Release".to_string()),
                field: Some("tag_name".to_string()),
                code: code.map(str::to_string),
            }],
        }
        .into()
    }

    #[test]
    fn test_missing_tag_message() {
        let err: ReleaseError = InputError::MissingTag.into();
        assert_eq!(InputError::MissingTag.to_string(), "No tag found in ref or input!");
        assert!(err.to_string().contains("No tag found in ref or input!"));
        assert!(err.recovery_suggestions()[0].contains("--tag"));
    }

    #[test]
    fn test_already_exists_suggests_updates() {
        let suggestions = api_error(422, Some("already_exists")).recovery_suggestions();
        assert!(suggestions.iter().any(|s| s.contains("--allow-updates")));
    }

    #[test]
    fn test_forbidden_suggests_permissions() {
        let suggestions = api_error(403, None).recovery_suggestions();
        assert!(suggestions[0].contains("contents: write"));
    }

    #[test]
    fn test_unknown_error_gets_generic_suggestion() {
        let suggestions = api_error(500, None).recovery_suggestions();
        assert_eq!(suggestions.len(), 1);
    }
}
