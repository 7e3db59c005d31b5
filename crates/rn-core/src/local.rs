use crate::error::HostError;
use crate::host::SourceHost;
use crate::types::{CommentPage, CommitPage, CommitRef, PullRequestNumber, PullRequestRef, ReleaseId};
use rn_vcs::{GitHistory, RangeCommit, VcsError};

impl From<VcsError> for HostError {
    fn from(value: VcsError) -> Self {
        match value {
            VcsError::RepoNotFound => Self::NotFound {
                what: "repository".to_string(),
            },
            VcsError::RefNotFound { name } => Self::NotFound { what: name },
            VcsError::BackendError { reason } => Self::Transport { reason },
        }
    }
}

impl From<RangeCommit> for CommitRef {
    fn from(value: RangeCommit) -> Self {
        Self::new(value.id, value.message, value.parent_count)
    }
}

/// A source host backed by a local clone. Only commit ranges are available;
/// pull requests and releases live on the hosting platform.
pub struct LocalSourceHost {
    history: GitHistory,
}

impl LocalSourceHost {
    pub fn new(history: GitHistory) -> Self {
        Self { history }
    }

    pub fn history(&self) -> &GitHistory {
        &self.history
    }
}

impl SourceHost for LocalSourceHost {
    /// The whole range comes back as page 1.
    async fn compare_commits(
        &self,
        base: &str,
        head: &str,
        page: u32,
    ) -> Result<CommitPage, HostError> {
        if page > 1 {
            return Ok(CommitPage::default());
        }
        let commits = self
            .history
            .commit_range(base, head)?
            .into_iter()
            .map(CommitRef::from)
            .collect();
        Ok(CommitPage {
            commits,
            next_page: None,
        })
    }

    async fn associated_pull_requests(
        &self,
        _sha: &str,
    ) -> Result<Vec<PullRequestNumber>, HostError> {
        Err(HostError::Unsupported {
            operation: "associated pull requests",
        })
    }

    async fn pull_request(&self, _number: PullRequestNumber) -> Result<PullRequestRef, HostError> {
        Err(HostError::Unsupported {
            operation: "pull request lookup",
        })
    }

    async fn pull_request_comments(
        &self,
        _number: PullRequestNumber,
        _page: u32,
    ) -> Result<CommentPage, HostError> {
        Err(HostError::Unsupported {
            operation: "pull request comments",
        })
    }

    async fn update_release(&self, _release: ReleaseId, _body: &str) -> Result<(), HostError> {
        Err(HostError::Unsupported {
            operation: "release update",
        })
    }
}
