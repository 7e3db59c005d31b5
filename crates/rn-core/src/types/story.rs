use crate::types::ids::{LabelId, PullRequestNumber, StoryId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    pub id: LabelId,
    pub name: String,
}

impl Label {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: LabelId::new(id),
            name: name.into(),
        }
    }
}

/// The reduced record returned by bulk tracker endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorySlim {
    pub id: StoryId,
    pub name: String,
    pub story_type: String,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub app_url: Option<String>,
}

/// The complete record returned by single-item tracker lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryFull {
    pub id: StoryId,
    pub name: String,
    pub description: String,
    pub story_type: String,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub app_url: Option<String>,
    pub estimate: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Story {
    Full(StoryFull),
    Slim(StorySlim),
}

macro_rules! story_field {
    ($self:ident, $field:ident) => {
        match $self {
            Story::Full(story) => &story.$field,
            Story::Slim(story) => &story.$field,
        }
    };
}

impl Story {
    pub fn id(&self) -> StoryId {
        *story_field!(self, id)
    }

    pub fn name(&self) -> &str {
        story_field!(self, name)
    }

    pub fn story_type(&self) -> &str {
        story_field!(self, story_type)
    }

    pub fn completed(&self) -> bool {
        *story_field!(self, completed)
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        *story_field!(self, completed_at)
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        *story_field!(self, updated_at)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        *story_field!(self, created_at)
    }

    pub fn labels(&self) -> &[Label] {
        story_field!(self, labels)
    }

    pub fn app_url(&self) -> Option<&str> {
        story_field!(self, app_url).as_deref()
    }

    /// Completion time, falling back to the last update, then creation.
    pub fn effective_timestamp(&self) -> Option<DateTime<Utc>> {
        self.completed_at()
            .or_else(|| self.updated_at())
            .or_else(|| self.created_at())
    }

    pub fn label_named(&self, name: &str) -> Option<&Label> {
        self.labels().iter().find(|label| label.name == name)
    }

    pub fn has_label(&self, name: &str) -> bool {
        self.label_named(name).is_some()
    }
}

impl From<StorySlim> for Story {
    fn from(value: StorySlim) -> Self {
        Self::Slim(value)
    }
}

impl From<StoryFull> for Story {
    fn from(value: StoryFull) -> Self {
        Self::Full(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReferenceSource {
    Commit { sha: String },
    PullRequest { number: PullRequestNumber },
    Comment { number: PullRequestNumber },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryReference {
    pub id: StoryId,
    pub source: ReferenceSource,
}

/// Iterates in first-insertion order; replacing keeps the position.
#[derive(Debug, Clone, Default)]
pub struct StoryMap {
    order: Vec<StoryId>,
    stories: HashMap<StoryId, Story>,
}

impl StoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, story: Story) -> Option<Story> {
        let id = story.id();
        let previous = self.stories.insert(id, story);
        if previous.is_none() {
            self.order.push(id);
        }
        previous
    }

    /// Overwrites an entry only if its id is already present.
    pub fn replace_existing(&mut self, story: Story) -> bool {
        match self.stories.get_mut(&story.id()) {
            Some(slot) => {
                *slot = story;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: StoryId) -> bool {
        self.stories.contains_key(&id)
    }

    pub fn get(&self, id: StoryId) -> Option<&Story> {
        self.stories.get(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn ids(&self) -> Vec<StoryId> {
        self.order.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Story> {
        self.order.iter().filter_map(|id| self.stories.get(id))
    }

    pub fn into_stories(mut self) -> Vec<Story> {
        self.order
            .iter()
            .filter_map(|id| self.stories.remove(id))
            .collect()
    }
}
