use crate::error::ReleaseNotesError;
use crate::host::SourceHost;
use crate::types::{CommentPage, CommitRef, PullRequestNumber, PullRequestRef};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::LazyLock;

static MERGE_PULL_REQUEST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)pull request #(\d+)").expect("merge pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PullRequestDiscovery {
    Associated,
    #[default]
    MergeMessage,
    Disabled,
}

/// Optional caps on per-commit fan-out. `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Limits {
    #[serde(default)]
    pub max_pull_requests_per_commit: Option<usize>,
    #[serde(default)]
    pub max_comment_pages: Option<u32>,
}

pub struct HistoryWalker<'a, H> {
    host: &'a H,
    base: String,
    head: String,
    discovery: PullRequestDiscovery,
    limits: Limits,
    buffered: VecDeque<CommitRef>,
    next_page: Option<u32>,
}

impl<'a, H: SourceHost> HistoryWalker<'a, H> {
    pub fn new(host: &'a H, base: &str, head: &str) -> Self {
        Self {
            host,
            base: base.to_string(),
            head: head.to_string(),
            discovery: PullRequestDiscovery::default(),
            limits: Limits::default(),
            buffered: VecDeque::new(),
            next_page: Some(1),
        }
    }

    pub fn with_discovery(mut self, discovery: PullRequestDiscovery) -> Self {
        self.discovery = discovery;
        self
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// A failing page aborts with a range error.
    pub async fn next_commit(&mut self) -> Result<Option<CommitRef>, ReleaseNotesError> {
        loop {
            if let Some(commit) = self.buffered.pop_front() {
                return Ok(Some(commit));
            }
            let Some(page) = self.next_page else {
                return Ok(None);
            };
            tracing::debug!(base = %self.base, head = %self.head, page, "comparing commits");
            let result = self
                .host
                .compare_commits(&self.base, &self.head, page)
                .await
                .map_err(|source| ReleaseNotesError::Range {
                    base: self.base.clone(),
                    head: self.head.clone(),
                    source,
                })?;
            self.next_page = result.next_page.filter(|next| *next > page);
            self.buffered.extend(result.commits);
        }
    }

    pub async fn collect_commits(mut self) -> Result<Vec<CommitRef>, ReleaseNotesError> {
        let mut commits = Vec::new();
        while let Some(commit) = self.next_commit().await? {
            commits.push(commit);
        }
        Ok(commits)
    }

    pub async fn pull_requests(&self, commit: &CommitRef) -> Vec<PullRequestNumber> {
        let mut numbers = match self.discovery {
            PullRequestDiscovery::Disabled => Vec::new(),
            PullRequestDiscovery::MergeMessage => merge_pull_request(commit).into_iter().collect(),
            PullRequestDiscovery::Associated => match &commit.pull_requests {
                Some(numbers) => numbers.clone(),
                None => {
                    tracing::debug!(sha = %commit.sha, "getting associated pull requests");
                    match self.host.associated_pull_requests(&commit.sha).await {
                        Ok(numbers) => numbers,
                        Err(err) => {
                            tracing::warn!(sha = %commit.sha, %err, "could not get associated pull requests");
                            Vec::new()
                        }
                    }
                }
            },
        };
        if let Some(max) = self.limits.max_pull_requests_per_commit
            && numbers.len() > max
        {
            tracing::warn!(sha = %commit.sha, found = numbers.len(), max, "truncating pull requests");
            numbers.truncate(max);
        }
        numbers
    }

    /// Fetches one pull request. A failed lookup is skipped, not fatal.
    pub async fn pull_request(&self, number: PullRequestNumber) -> Option<PullRequestRef> {
        tracing::debug!(%number, "getting pull request");
        match self.host.pull_request(number).await {
            Ok(pull_request) => Some(pull_request),
            Err(err) => {
                tracing::info!(%number, %err, "could not get pull request");
                None
            }
        }
    }

    pub async fn comments(
        &self,
        number: PullRequestNumber,
        page: u32,
    ) -> Result<CommentPage, ReleaseNotesError> {
        tracing::debug!(%number, page, "getting pull request comments");
        self.host
            .pull_request_comments(number, page)
            .await
            .map_err(|source| ReleaseNotesError::PullRequestComments { number, source })
    }

    pub fn comment_page_allowed(&self, page: u32) -> bool {
        self.limits.max_comment_pages.is_none_or(|max| page <= max)
    }
}

pub fn merge_pull_request(commit: &CommitRef) -> Option<PullRequestNumber> {
    if !commit.is_merge() {
        return None;
    }
    let captures = MERGE_PULL_REQUEST.captures(&commit.message)?;
    let number = captures.get(1)?.as_str().parse().ok()?;
    tracing::debug!(sha = %commit.sha, %number, "commit matched pull request pattern");
    Some(number)
}
