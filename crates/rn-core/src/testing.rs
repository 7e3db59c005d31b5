use crate::error::{HostError, RenderError, TrackerError};
use crate::host::SourceHost;
use crate::tracker::Tracker;
use crate::types::{
    CommentPage, CommentRef, CommitPage, CommitRef, Label, NotesPayload, PullRequestNumber,
    PullRequestRef, ReleaseId, Story, StoryId, StorySlim,
};
use chrono::{DateTime, TimeZone, Utc};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Compare { page: u32 },
    Associated { sha: String },
    PullRequest { number: u64 },
    Comments { number: u64, page: u32 },
    UpdateRelease { id: u64, body: String },
}

#[derive(Debug, Default)]
pub struct FakeHost {
    commit_pages: Vec<Vec<CommitRef>>,
    compare_error: Option<HostError>,
    associated: HashMap<String, Vec<PullRequestNumber>>,
    pull_requests: HashMap<u64, PullRequestRef>,
    comments: HashMap<u64, Vec<CommentPage>>,
    comment_errors: HashMap<u64, HostError>,
    update_error: Option<HostError>,
    calls: RefCell<Vec<HostCall>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_commits(self, commits: Vec<CommitRef>) -> Self {
        self.with_commit_pages(vec![commits])
    }

    pub fn with_commit_pages(mut self, pages: Vec<Vec<CommitRef>>) -> Self {
        self.commit_pages = pages;
        self
    }

    pub fn with_compare_error(mut self, err: HostError) -> Self {
        self.compare_error = Some(err);
        self
    }

    pub fn with_associated(mut self, sha: &str, numbers: Vec<PullRequestNumber>) -> Self {
        self.associated.insert(sha.to_string(), numbers);
        self
    }

    pub fn with_pull_request(mut self, pull_request: PullRequestRef) -> Self {
        self.pull_requests
            .insert(pull_request.number.get(), pull_request);
        self
    }

    pub fn with_comments(mut self, number: u64, pages: Vec<CommentPage>) -> Self {
        self.comments.insert(number, pages);
        self
    }

    pub fn with_comments_error(mut self, number: u64, err: HostError) -> Self {
        self.comment_errors.insert(number, err);
        self
    }

    pub fn with_update_error(mut self, err: HostError) -> Self {
        self.update_error = Some(err);
        self
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: HostCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl SourceHost for FakeHost {
    async fn compare_commits(
        &self,
        _base: &str,
        _head: &str,
        page: u32,
    ) -> Result<CommitPage, HostError> {
        self.record(HostCall::Compare { page });
        if let Some(err) = &self.compare_error {
            return Err(err.clone());
        }
        let index = page.saturating_sub(1) as usize;
        let commits = self.commit_pages.get(index).cloned().unwrap_or_default();
        let next_page = (index + 1 < self.commit_pages.len()).then_some(page + 1);
        Ok(CommitPage { commits, next_page })
    }

    async fn associated_pull_requests(
        &self,
        sha: &str,
    ) -> Result<Vec<PullRequestNumber>, HostError> {
        self.record(HostCall::Associated {
            sha: sha.to_string(),
        });
        self.associated
            .get(sha)
            .cloned()
            .ok_or_else(|| HostError::NotFound {
                what: sha.to_string(),
            })
    }

    async fn pull_request(&self, number: PullRequestNumber) -> Result<PullRequestRef, HostError> {
        self.record(HostCall::PullRequest {
            number: number.get(),
        });
        self.pull_requests
            .get(&number.get())
            .cloned()
            .ok_or_else(|| HostError::NotFound {
                what: format!("pull request #{number}"),
            })
    }

    async fn pull_request_comments(
        &self,
        number: PullRequestNumber,
        page: u32,
    ) -> Result<CommentPage, HostError> {
        self.record(HostCall::Comments {
            number: number.get(),
            page,
        });
        if let Some(err) = self.comment_errors.get(&number.get()) {
            return Err(err.clone());
        }
        let index = page.saturating_sub(1) as usize;
        Ok(self
            .comments
            .get(&number.get())
            .and_then(|pages| pages.get(index))
            .cloned()
            .unwrap_or_default())
    }

    async fn update_release(&self, release: ReleaseId, body: &str) -> Result<(), HostError> {
        self.record(HostCall::UpdateRelease {
            id: release.get(),
            body: body.to_string(),
        });
        match &self.update_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerCall {
    Story { id: i64 },
    AddLabel { ids: Vec<i64>, label: String },
}

#[derive(Debug, Default)]
pub struct FakeTracker {
    stories: RefCell<HashMap<StoryId, Story>>,
    story_errors: HashMap<i64, TrackerError>,
    label_error: Option<TrackerError>,
    extra_label_results: Vec<Story>,
    label_ids: RefCell<HashMap<String, i64>>,
    calls: RefCell<Vec<TrackerCall>>,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_story(self, story: Story) -> Self {
        self.stories.borrow_mut().insert(story.id(), story);
        self
    }

    pub fn with_story_error(mut self, id: i64, err: TrackerError) -> Self {
        self.story_errors.insert(id, err);
        self
    }

    pub fn with_label_error(mut self, err: TrackerError) -> Self {
        self.label_error = Some(err);
        self
    }

    pub fn with_extra_label_result(mut self, story: Story) -> Self {
        self.extra_label_results.push(story);
        self
    }

    pub fn calls(&self) -> Vec<TrackerCall> {
        self.calls.borrow().clone()
    }

    fn label(&self, name: &str) -> Label {
        let mut ids = self.label_ids.borrow_mut();
        let next = 1000 + ids.len() as i64;
        let id = *ids.entry(name.to_string()).or_insert(next);
        Label::new(id, name)
    }
}

impl Tracker for FakeTracker {
    async fn story(&self, id: StoryId) -> Result<Story, TrackerError> {
        self.calls
            .borrow_mut()
            .push(TrackerCall::Story { id: id.get() });
        if let Some(err) = self.story_errors.get(&id.get()) {
            return Err(err.clone());
        }
        self.stories
            .borrow()
            .get(&id)
            .cloned()
            .ok_or(TrackerError::NotFound { id })
    }

    async fn add_label(&self, ids: &[StoryId], label: &str) -> Result<Vec<Story>, TrackerError> {
        self.calls.borrow_mut().push(TrackerCall::AddLabel {
            ids: ids.iter().map(|id| id.get()).collect(),
            label: label.to_string(),
        });
        if let Some(err) = &self.label_error {
            return Err(err.clone());
        }

        let label = self.label(label);
        let mut stories = self.stories.borrow_mut();
        let mut updated = Vec::new();
        for id in ids {
            let Some(story) = stories.get_mut(id) else {
                continue;
            };
            let labels = match story {
                Story::Full(inner) => &mut inner.labels,
                Story::Slim(inner) => &mut inner.labels,
            };
            if !labels.iter().any(|existing| existing.name == label.name) {
                labels.push(label.clone());
            }
            updated.push(story.clone());
        }
        updated.extend(self.extra_label_results.iter().cloned());
        Ok(updated)
    }
}

// `notes:3,1`
pub fn render_ids(template: &str, payload: &NotesPayload) -> Result<String, RenderError> {
    let ids: Vec<String> = payload
        .stories()
        .iter()
        .map(|story| story.id().to_string())
        .collect();
    Ok(format!("{template}:{}", ids.join(",")))
}

pub fn timestamp(hours: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + hours * 3600, 0)
        .single()
        .unwrap()
}

pub fn slim_story(id: i64, completed: bool) -> Story {
    Story::Slim(StorySlim {
        id: StoryId::new(id),
        name: format!("Story {id}"),
        story_type: "feature".to_string(),
        completed,
        completed_at: None,
        updated_at: None,
        created_at: None,
        labels: Vec::new(),
        app_url: Some(format!("https://tracker.example/story/{id}")),
    })
}

pub fn story_with_type(id: i64, story_type: &str) -> Story {
    let mut story = slim_story(id, true);
    if let Story::Slim(inner) = &mut story {
        inner.story_type = story_type.to_string();
    }
    story
}

pub fn labeled_story(id: i64, labels: &[(i64, &str)]) -> Story {
    let mut story = slim_story(id, true);
    if let Story::Slim(inner) = &mut story {
        inner.labels = labels
            .iter()
            .map(|(label_id, name)| Label::new(*label_id, *name))
            .collect();
    }
    story
}

pub fn story_at(
    id: i64,
    completed_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    created_at: Option<DateTime<Utc>>,
) -> Story {
    let mut story = slim_story(id, true);
    if let Story::Slim(inner) = &mut story {
        inner.completed_at = completed_at;
        inner.updated_at = updated_at;
        inner.created_at = created_at;
    }
    story
}

pub fn pull_request(number: u64, title: &str, body: Option<&str>, comments: u32) -> PullRequestRef {
    PullRequestRef {
        number: PullRequestNumber::new(number),
        title: title.to_string(),
        body: body.map(str::to_string),
        comments,
    }
}

pub fn comment_page(bodies: &[&str], next_page: Option<u32>) -> CommentPage {
    CommentPage {
        comments: bodies
            .iter()
            .map(|body| CommentRef {
                body: (*body).to_string(),
            })
            .collect(),
        next_page,
    }
}
