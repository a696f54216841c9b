//! Release payloads exchanged with the GitHub releases API

use serde::{Deserialize, Serialize, Serializer};

use crate::inputs::Inputs;

/// Release body as sent to the API.
///
/// `Empty` and `Omitted` differ on the wire: an empty body clears the remote
/// text, an omitted one leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReleaseBody {
    /// Explicit body text
    Text(String),
    /// Explicitly empty body
    #[default]
    Empty,
    /// Field left out of the request
    Omitted,
}

impl ReleaseBody {
    /// Build from resolved text, mapping `""` to `Empty`
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Self::Empty
        } else {
            Self::Text(text)
        }
    }

    /// Whether the field is left out of the request
    pub fn is_omitted(&self) -> bool {
        matches!(self, Self::Omitted)
    }

    /// Text to send, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Empty => Some(""),
            Self::Omitted => None,
        }
    }
}

impl Serialize for ReleaseBody {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_str() {
            Some(text) => serializer.serialize_str(text),
            None => serializer.serialize_none(),
        }
    }
}

/// Parameters of a create or update call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseRequest {
    /// Tag the release is attached to
    #[serde(rename = "tag_name")]
    pub tag: String,
    /// Release body
    #[serde(skip_serializing_if = "ReleaseBody::is_omitted")]
    pub body: ReleaseBody,
    /// Commitish the tag is created from when it does not exist yet
    #[serde(rename = "target_commitish", skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    /// Whether the release is a draft
    pub draft: bool,
    /// Release title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the release is a prerelease
    pub prerelease: bool,
}

impl ReleaseRequest {
    /// Request used when a new release is created
    pub fn for_create(inputs: &impl Inputs) -> Self {
        Self {
            tag: inputs.tag().to_string(),
            body: inputs.created_release_body().clone(),
            commit: inputs.commit().map(str::to_string),
            draft: inputs.draft(),
            name: inputs.created_release_name().map(str::to_string),
            prerelease: inputs.prerelease(),
        }
    }

    /// Request used when an existing or draft release is updated.
    ///
    /// Carries the updated body and name rather than the created ones, so
    /// `--omit-body-during-update` and `--omit-name-during-update` only
    /// affect updates.
    pub fn for_update(inputs: &impl Inputs) -> Self {
        Self {
            body: inputs.updated_release_body().clone(),
            name: inputs.updated_release_name().map(str::to_string),
            ..Self::for_create(inputs)
        }
    }
}

/// Release produced by a create or update call
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseHandle {
    /// Release ID
    pub id: u64,
    /// Templated upload endpoint, e.g. `https://uploads.github.com/repos/o/r/releases/1/assets{?name,label}`
    pub upload_url: String,
    /// Release page
    #[serde(default)]
    pub html_url: String,
}

/// Published release found by tag lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ExistingRelease {
    /// Release ID
    pub id: u64,
}

/// Entry of the release list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseSummary {
    /// Release ID
    pub id: u64,
    /// Whether the release is a draft
    pub draft: bool,
    /// Tag the release points at
    pub tag_name: String,
}

/// Asset already attached to a release
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseAsset {
    /// Asset ID
    pub id: u64,
    /// File name of the asset
    pub name: String,
}
