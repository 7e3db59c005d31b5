use crate::labels::VERSION_LABEL_PREFIX;
use crate::types::source::RepositoryRef;
use crate::types::story::{Label, Story};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoriesPayload {
    pub head: String,
    pub base: String,
    pub repository: RepositoryRef,
    /// Most recently completed first.
    pub stories: Vec<Story>,
    pub version: Label,
}

impl StoriesPayload {
    /// Version labels from earlier releases among `labels`.
    pub fn other_version_labels<'l>(&self, labels: &'l [Label]) -> Vec<&'l Label> {
        labels
            .iter()
            .filter(|label| {
                label.id != self.version.id && label.name.starts_with(VERSION_LABEL_PREFIX)
            })
            .collect()
    }

    /// Predicate matching stories of one category, e.g. `"bug"`.
    pub fn story_type_filter(story_type: &str) -> impl Fn(&Story) -> bool + use<> {
        let story_type = story_type.to_string();
        move |story| story.story_type() == story_type
    }

    pub fn stories_of_type(&self, story_type: &str) -> Vec<&Story> {
        let matches = Self::story_type_filter(story_type);
        self.stories.iter().filter(|story| matches(story)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyPayload {
    pub head: String,
    pub base: String,
    pub repository: RepositoryRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NotesPayload {
    Stories(StoriesPayload),
    Empty(EmptyPayload),
}

impl NotesPayload {
    pub fn stories(&self) -> &[Story] {
        match self {
            Self::Stories(payload) => &payload.stories,
            Self::Empty(_) => &[],
        }
    }

    pub fn version(&self) -> Option<&Label> {
        match self {
            Self::Stories(payload) => Some(&payload.version),
            Self::Empty(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }
}
