use crate::types::{PullRequestNumber, StoryId};
use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by the source-control host, already classified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("not found: {what}")]
    NotFound { what: String },
    #[error("operation not supported by this host: {operation}")]
    Unsupported { operation: &'static str },
    #[error("unauthorized")]
    Unauthorized,
    #[error("rate limited")]
    RateLimited,
    #[error("transport error: {reason}")]
    Transport { reason: String },
}

/// Failures reported by the work-item tracker, already classified.
///
/// Only `NotFound` is recoverable for the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("story not found: {id}")]
    NotFound { id: StoryId },
    #[error("unauthorized")]
    Unauthorized,
    #[error("rate limited")]
    RateLimited,
    #[error("transport error: {reason}")]
    Transport { reason: String },
    #[error("invalid response: {reason}")]
    InvalidResponse { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("template error: {message}")]
    Template { message: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid story pattern: {message}")]
    InvalidPattern { message: String },
    #[error("repository owner and name are not configured")]
    MissingRepository,
    #[error("template not configured: {name}")]
    Template { name: &'static str },
}

#[derive(Debug, Error)]
pub enum ReleaseNotesError {
    #[error("could not find diff between {head} and {base}")]
    Range {
        base: String,
        head: String,
        #[source]
        source: HostError,
    },
    #[error("could not look up story {id}")]
    Lookup {
        id: StoryId,
        #[source]
        source: TrackerError,
    },
    #[error("could not list comments of pull request #{number}")]
    PullRequestComments {
        number: PullRequestNumber,
        #[source]
        source: HostError,
    },
    #[error("could not add version label to stories")]
    BulkLabel,
    #[error("could not find version label {name}")]
    MissingVersionLabel { name: String },
    #[error("no release body available, unable to generate release notes")]
    MissingReleaseBody,
    #[error("failed to update release")]
    ReleaseUpdate,
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ReleaseNotesError {
    /// Whether the run can continue past this error. Only a missing story is.
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            Self::Lookup {
                source: TrackerError::NotFound { .. },
                ..
            }
        )
    }
}
