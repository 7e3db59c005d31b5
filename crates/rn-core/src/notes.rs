use crate::error::ReleaseNotesError;
use crate::types::{EmptyPayload, Label, NotesPayload, RepositoryRef, StoriesPayload, Story, StoryMap};

/// The range one generation run covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeContext {
    pub repository: RepositoryRef,
    pub head: String,
    pub base: String,
}

/// The label named `name` carried by any of `stories`.
pub fn find_version_label(stories: &StoryMap, name: &str) -> Result<Label, ReleaseNotesError> {
    stories
        .iter()
        .find_map(|story| story.label_named(name))
        .cloned()
        .ok_or_else(|| ReleaseNotesError::MissingVersionLabel {
            name: name.to_string(),
        })
}

/// Most recent first by effective timestamp. Stable: equal timestamps keep
/// their relative order, stories without any timestamp go last.
pub fn sort_by_recency(stories: &mut [Story]) {
    stories.sort_by(|a, b| b.effective_timestamp().cmp(&a.effective_timestamp()));
}

/// Builds the renderer payload from the labeled release-notes stories.
pub fn assemble(
    context: &RangeContext,
    stories: StoryMap,
    label_name: &str,
) -> Result<NotesPayload, ReleaseNotesError> {
    if stories.is_empty() {
        tracing::info!("no stories, rendering no-stories template");
        return Ok(NotesPayload::Empty(EmptyPayload {
            head: context.head.clone(),
            base: context.base.clone(),
            repository: context.repository.clone(),
        }));
    }

    tracing::info!(count = stories.len(), "rendering release notes");
    let version = find_version_label(&stories, label_name)?;
    let mut ordered = stories.into_stories();
    sort_by_recency(&mut ordered);

    Ok(NotesPayload::Stories(StoriesPayload {
        head: context.head.clone(),
        base: context.base.clone(),
        repository: context.repository.clone(),
        stories: ordered,
        version,
    }))
}
