//! Classification of release API failures.

use crate::error::{GitHubError, ReleaseError};

/// Status and code projected out of an arbitrary release error.
///
/// Fields are `None` whenever the error does not carry them. `None` means
/// "not this specific condition", never an error in itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMessage {
    /// HTTP status of the failed request, if any
    pub status: Option<u16>,
    /// `code` of the first entry of the response's `errors` array, if any
    pub code: Option<String>,
    codes: Vec<String>,
}

/// Outcome of classifying a failed release lookup
#[derive(Debug)]
pub enum LookupFailure {
    /// No published release exists for the tag
    NotFound,
    /// Anything else, returned as it was received
    Other(ReleaseError),
}

impl ErrorMessage {
    /// Project `status` and `code` out of `error`
    pub fn new(error: &ReleaseError) -> Self {
        match error {
            ReleaseError::GitHub(GitHubError::Api { status, errors, .. }) => {
                let codes: Vec<String> = errors.iter().filter_map(|e| e.code.clone()).collect();
                Self {
                    status: Some(*status),
                    code: errors.first().and_then(|e| e.code.clone()),
                    codes,
                }
            }
            ReleaseError::GitHub(GitHubError::Transport(e)) => Self {
                status: e.status().map(|s| s.as_u16()),
                ..Self::default()
            },
            _ => Self::default(),
        }
    }

    /// Split a lookup failure into "no such published release" and everything else
    pub fn classify(error: ReleaseError) -> LookupFailure {
        if Self::new(&error).status == Some(404) {
            LookupFailure::NotFound
        } else {
            LookupFailure::Other(error)
        }
    }

    /// Whether any entry of the `errors` array carries `code`
    pub fn has_error_with_code(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }
}
