//! Resolved configuration for a release run.
//!
//! [`Inputs`] is the read-only view the release logic works against.
//! [`CoreInputs`] resolves it from command line arguments and their
//! environment fallbacks, failing before any network call when a required
//! value is missing.

use url::Url;

use crate::artifact::{Artifact, ArtifactGlobber};
use crate::cli::Args;
use crate::error::{InputError, ReleaseError, Result};
use crate::github::ReleaseBody;

const TAG_REF_PREFIX: &str = "refs/tags/";

/// Read-only configuration of a release run
pub trait Inputs {
    /// Look up and update an existing release instead of always creating one
    fn allow_updates(&self) -> bool;
    /// Files to attach to the release
    fn artifacts(&self) -> &[Artifact];
    /// Commitish the tag is created from, if set
    fn commit(&self) -> Option<&str>;
    /// Body sent when creating a release
    fn created_release_body(&self) -> &ReleaseBody;
    /// Name sent when creating a release
    fn created_release_name(&self) -> Option<&str>;
    /// Whether the release is a draft
    fn draft(&self) -> bool;
    /// Whether the release is a prerelease
    fn prerelease(&self) -> bool;
    /// Delete same-named assets before uploading
    fn replaces_artifacts(&self) -> bool;
    /// Tag of the release, never empty
    fn tag(&self) -> &str;
    /// API token
    fn token(&self) -> &str;
    /// Body sent when updating a release
    fn updated_release_body(&self) -> &ReleaseBody;
    /// Name sent when updating a release
    fn updated_release_name(&self) -> Option<&str>;
}

/// Repository releases are published to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl Repository {
    /// Resolve from explicit owner/repo values, falling back to `owner/repo` in `default`
    pub fn resolve(owner: Option<&str>, repo: Option<&str>, default: Option<&str>) -> Result<Self> {
        let (default_owner, default_repo) = match non_empty(default) {
            Some(value) => match value.split_once('/') {
                Some((o, r)) if !o.is_empty() && !r.is_empty() && !r.contains('/') => {
                    (Some(o), Some(r))
                }
                _ => {
                    return Err(InputError::InvalidRepository {
                        value: value.to_string(),
                    }
                    .into());
                }
            },
            None => (None, None),
        };

        match (
            non_empty(owner).or(default_owner),
            non_empty(repo).or(default_repo),
        ) {
            (Some(owner), Some(repo)) => Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(InputError::MissingRepository.into()),
        }
    }
}

/// Inputs resolved from [`Args`]
#[derive(Debug, Clone)]
pub struct CoreInputs {
    allow_updates: bool,
    artifacts: Vec<Artifact>,
    commit: Option<String>,
    created_release_body: ReleaseBody,
    created_release_name: Option<String>,
    draft: bool,
    prerelease: bool,
    replaces_artifacts: bool,
    tag: String,
    token: String,
    updated_release_body: ReleaseBody,
    updated_release_name: Option<String>,
    repository: Repository,
    api_url: Url,
}

impl CoreInputs {
    /// Resolve every input up front
    pub fn resolve(args: &Args) -> Result<Self> {
        Self::resolve_with(args, &ArtifactGlobber::new())
    }

    /// Resolve every input, expanding artifact patterns with `globber`
    pub fn resolve_with(args: &Args, globber: &ArtifactGlobber) -> Result<Self> {
        let tag = resolve_tag(args.tag.as_deref(), args.github_ref.as_deref())?;
        let repository = Repository::resolve(
            args.owner.as_deref(),
            args.repo.as_deref(),
            args.github_repository.as_deref(),
        )?;
        let api_url = Url::parse(&args.api_url).map_err(|source| InputError::InvalidApiUrl {
            value: args.api_url.clone(),
            source,
        })?;

        let body = resolve_body(args)?;
        let name = non_empty(args.name.as_deref()).unwrap_or(&tag).to_string();

        let created_release_body = if args.omit_body {
            ReleaseBody::Omitted
        } else {
            body.clone()
        };
        let updated_release_body = if args.omit_body || args.omit_body_during_update {
            ReleaseBody::Omitted
        } else {
            body
        };
        let created_release_name = (!args.omit_name).then(|| name.clone());
        let updated_release_name =
            (!args.omit_name && !args.omit_name_during_update).then_some(name);

        let artifacts = match non_empty(args.artifacts.as_deref())
            .or(non_empty(args.artifact.as_deref()))
        {
            Some(patterns) => globber
                .glob_artifact_string(patterns, non_empty(args.artifact_content_type.as_deref()))?,
            None => Vec::new(),
        };

        Ok(Self {
            allow_updates: args.allow_updates,
            artifacts,
            commit: non_empty(args.commit.as_deref()).map(str::to_string),
            created_release_body,
            created_release_name,
            draft: args.draft,
            prerelease: args.prerelease,
            replaces_artifacts: args.replaces_artifacts,
            tag,
            token: args.token.clone(),
            updated_release_body,
            updated_release_name,
            repository,
            api_url,
        })
    }

    /// Repository releases are published to
    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// Base URL of the REST API
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }
}

impl Inputs for CoreInputs {
    fn allow_updates(&self) -> bool {
        self.allow_updates
    }

    fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    fn commit(&self) -> Option<&str> {
        self.commit.as_deref()
    }

    fn created_release_body(&self) -> &ReleaseBody {
        &self.created_release_body
    }

    fn created_release_name(&self) -> Option<&str> {
        self.created_release_name.as_deref()
    }

    fn draft(&self) -> bool {
        self.draft
    }

    fn prerelease(&self) -> bool {
        self.prerelease
    }

    fn replaces_artifacts(&self) -> bool {
        self.replaces_artifacts
    }

    fn tag(&self) -> &str {
        &self.tag
    }

    fn token(&self) -> &str {
        &self.token
    }

    fn updated_release_body(&self) -> &ReleaseBody {
        &self.updated_release_body
    }

    fn updated_release_name(&self) -> Option<&str> {
        self.updated_release_name.as_deref()
    }
}

/// Tag input, else the tag named by a `refs/tags/...` git ref
fn resolve_tag(tag: Option<&str>, git_ref: Option<&str>) -> Result<String> {
    if let Some(tag) = non_empty(tag) {
        return Ok(tag.to_string());
    }

    git_ref
        .and_then(|r| r.strip_prefix(TAG_REF_PREFIX))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or(ReleaseError::Input(InputError::MissingTag))
}

/// Body input, else the body file, else an empty body
fn resolve_body(args: &Args) -> Result<ReleaseBody> {
    if let Some(body) = non_empty(args.body.as_deref()) {
        return Ok(ReleaseBody::Text(body.to_string()));
    }

    match &args.body_file {
        Some(path) if !path.as_os_str().is_empty() => {
            let text = std::fs::read_to_string(path).map_err(|source| InputError::BodyFile {
                path: path.clone(),
                source,
            })?;
            Ok(ReleaseBody::from_text(text))
        }
        _ => Ok(ReleaseBody::Empty),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            tag: Some("v1.2.3".to_string()),
            token: "token".to_string(),
            github_repository: Some("octo/widgets".to_string()),
            ..Args::default()
        }
    }

    #[test]
    fn test_tag_input_wins_over_ref() {
        let args = Args {
            github_ref: Some("refs/tags/v9".to_string()),
            ..args()
        };
        assert_eq!(CoreInputs::resolve(&args).unwrap().tag(), "v1.2.3");
    }

    #[test]
    fn test_tag_from_ref() {
        let args = Args {
            tag: None,
            github_ref: Some("refs/tags/v2.0.0".to_string()),
            ..args()
        };
        assert_eq!(CoreInputs::resolve(&args).unwrap().tag(), "v2.0.0");
    }

    #[test]
    fn test_branch_ref_is_not_a_tag() {
        let args = Args {
            tag: Some(String::new()),
            github_ref: Some("refs/heads/main".to_string()),
            ..args()
        };
        assert!(matches!(
            CoreInputs::resolve(&args),
            Err(ReleaseError::Input(InputError::MissingTag))
        ));
    }

    #[test]
    fn test_defaults() {
        let inputs = CoreInputs::resolve(&args()).unwrap();
        assert!(!inputs.allow_updates());
        assert!(inputs.artifacts().is_empty());
        assert_eq!(inputs.commit(), None);
        assert_eq!(inputs.created_release_body(), &ReleaseBody::Empty);
        assert_eq!(inputs.updated_release_body(), &ReleaseBody::Empty);
        assert_eq!(inputs.created_release_name(), Some("v1.2.3"));
        assert_eq!(inputs.updated_release_name(), Some("v1.2.3"));
        assert_eq!(inputs.api_url().as_str(), "https://api.github.com/");
        assert_eq!(
            inputs.repository(),
            &Repository {
                owner: "octo".to_string(),
                repo: "widgets".to_string()
            }
        );
    }

    #[test]
    fn test_body_and_name() {
        let args = Args {
            body: Some("notes".to_string()),
            name: Some("Widgets 1.2.3".to_string()),
            commit: Some("abc123".to_string()),
            ..args()
        };
        let inputs = CoreInputs::resolve(&args).unwrap();
        assert_eq!(
            inputs.created_release_body(),
            &ReleaseBody::Text("notes".to_string())
        );
        assert_eq!(inputs.created_release_name(), Some("Widgets 1.2.3"));
        assert_eq!(inputs.commit(), Some("abc123"));
    }

    #[test]
    fn test_omit_during_update_only() {
        let args = Args {
            body: Some("notes".to_string()),
            omit_body_during_update: true,
            omit_name_during_update: true,
            ..args()
        };
        let inputs = CoreInputs::resolve(&args).unwrap();
        assert_eq!(
            inputs.created_release_body(),
            &ReleaseBody::Text("notes".to_string())
        );
        assert_eq!(inputs.updated_release_body(), &ReleaseBody::Omitted);
        assert_eq!(inputs.created_release_name(), Some("v1.2.3"));
        assert_eq!(inputs.updated_release_name(), None);
    }

    #[test]
    fn test_omit_everywhere() {
        let args = Args {
            body: Some("notes".to_string()),
            omit_body: true,
            omit_name: true,
            ..args()
        };
        let inputs = CoreInputs::resolve(&args).unwrap();
        assert_eq!(inputs.created_release_body(), &ReleaseBody::Omitted);
        assert_eq!(inputs.updated_release_body(), &ReleaseBody::Omitted);
        assert_eq!(inputs.created_release_name(), None);
        assert_eq!(inputs.updated_release_name(), None);
    }

    #[test]
    fn test_body_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CHANGELOG.md");
        std::fs::write(&path, "## Changes\n").unwrap();

        let args = Args {
            body_file: Some(path),
            ..args()
        };
        let inputs = CoreInputs::resolve(&args).unwrap();
        assert_eq!(
            inputs.created_release_body(),
            &ReleaseBody::Text("## Changes\n".to_string())
        );
    }

    #[test]
    fn test_missing_body_file() {
        let args = Args {
            body_file: Some("does/not/exist.md".into()),
            ..args()
        };
        assert!(matches!(
            CoreInputs::resolve(&args),
            Err(ReleaseError::Input(InputError::BodyFile { .. }))
        ));
    }

    #[test]
    fn test_artifact_fallback_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tool.zip");
        std::fs::write(&path, b"zip").unwrap();

        let args = Args {
            artifact: Some(path.display().to_string()),
            artifact_content_type: Some("application/x-custom".to_string()),
            ..args()
        };
        let inputs = CoreInputs::resolve(&args).unwrap();
        assert_eq!(inputs.artifacts().len(), 1);
        assert_eq!(inputs.artifacts()[0].name(), "tool.zip");
        assert_eq!(inputs.artifacts()[0].content_type(), "application/x-custom");
    }

    #[test]
    fn test_repository_overrides() {
        let repository =
            Repository::resolve(Some("other"), None, Some("octo/widgets")).unwrap();
        assert_eq!(repository.owner, "other");
        assert_eq!(repository.repo, "widgets");

        assert!(Repository::resolve(Some("o"), Some("r"), None).is_ok());
        assert!(matches!(
            Repository::resolve(None, None, None),
            Err(ReleaseError::Input(InputError::MissingRepository))
        ));
        assert!(matches!(
            Repository::resolve(None, None, Some("no-slash")),
            Err(ReleaseError::Input(InputError::InvalidRepository { .. }))
        ));
    }
}
