use crate::error::HostError;
use crate::types::{CommentPage, CommitPage, PullRequestNumber, PullRequestRef, ReleaseId};

/// The source-control hosting platform (commit ranges, pull requests,
/// releases). Implementations classify their failures before returning.
///
/// Pages are 1-based.
#[allow(async_fn_in_trait)]
pub trait SourceHost {
    async fn compare_commits(
        &self,
        base: &str,
        head: &str,
        page: u32,
    ) -> Result<CommitPage, HostError>;

    async fn associated_pull_requests(
        &self,
        sha: &str,
    ) -> Result<Vec<PullRequestNumber>, HostError>;

    async fn pull_request(&self, number: PullRequestNumber) -> Result<PullRequestRef, HostError>;

    async fn pull_request_comments(
        &self,
        number: PullRequestNumber,
        page: u32,
    ) -> Result<CommentPage, HostError>;

    async fn update_release(&self, release: ReleaseId, body: &str) -> Result<(), HostError>;
}
