use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A commit reachable from the head ref but not from the base ref.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeCommit {
    pub id: String,
    pub message: String,
    pub parent_count: usize,
}

impl RangeCommit {
    pub fn is_merge(&self) -> bool {
        self.parent_count >= 2
    }
}

#[derive(Debug, Error)]
pub enum VcsError {
    #[error("repo not found")]
    RepoNotFound,
    #[error("ref not found: {name}")]
    RefNotFound { name: String },
    #[error("backend error: {reason}")]
    BackendError { reason: String },
}
