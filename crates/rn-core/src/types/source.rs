use crate::types::ids::{PullRequestNumber, ReleaseId};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl RepositoryRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// One commit of a range. `pull_requests` is set when the range query
/// already carries the hosting platform's PR association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRef {
    pub sha: String,
    pub message: String,
    pub parent_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_requests: Option<Vec<PullRequestNumber>>,
}

impl CommitRef {
    pub fn new(sha: impl Into<String>, message: impl Into<String>, parent_count: usize) -> Self {
        Self {
            sha: sha.into(),
            message: message.into(),
            parent_count,
            pull_requests: None,
        }
    }

    pub fn with_pull_requests(mut self, numbers: Vec<PullRequestNumber>) -> Self {
        self.pull_requests = Some(numbers);
        self
    }

    pub fn is_merge(&self) -> bool {
        self.parent_count >= 2
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRef {
    pub number: PullRequestNumber,
    pub title: String,
    pub body: Option<String>,
    pub comments: u32,
}

impl PullRequestRef {
    pub fn has_comments(&self) -> bool {
        self.comments > 0
    }

    /// Title and body joined the way references are searched.
    pub fn searchable_text(&self) -> String {
        format!("{}\n{}", self.title, self.body.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRef {
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommitPage {
    pub commits: Vec<CommitRef>,
    pub next_page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommentPage {
    pub comments: Vec<CommentRef>,
    pub next_page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub id: ReleaseId,
    pub tag_name: String,
    pub body: Option<String>,
}
