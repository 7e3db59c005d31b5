use crate::error::ReleaseNotesError;
use crate::tracker::Tracker;
use crate::types::{StoryId, StoryMap, StoryReference};
use futures::{Stream, TryStreamExt as _};
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct Resolution {
    pub found: StoryMap,
    /// The completed subset; these go into the release notes.
    pub release_notes: StoryMap,
    pub missing: Vec<StoryId>,
}

pub struct StoryResolver<'a, T> {
    tracker: &'a T,
    seen: HashSet<StoryId>,
    resolution: Resolution,
}

impl<'a, T: Tracker> StoryResolver<'a, T> {
    pub fn new(tracker: &'a T) -> Self {
        Self {
            tracker,
            seen: HashSet::new(),
            resolution: Resolution::default(),
        }
    }

    /// Resolves `id` unless it was already attempted. A missing story is
    /// recorded and skipped; any other tracker failure aborts.
    pub async fn resolve(&mut self, id: StoryId) -> Result<(), ReleaseNotesError> {
        if !self.seen.insert(id) {
            return Ok(());
        }

        tracing::debug!(%id, "getting story");
        let story = match self.tracker.story(id).await {
            Ok(story) => story,
            Err(source) => {
                let err = ReleaseNotesError::Lookup { id, source };
                if err.is_soft() {
                    tracing::info!(%id, "could not find story");
                    self.resolution.missing.push(id);
                    return Ok(());
                }
                return Err(err);
            }
        };

        if story.completed() {
            tracing::info!(%id, name = story.name(), "story found");
            self.resolution.release_notes.insert(story.clone());
        } else {
            tracing::info!(%id, name = story.name(), "story found but not completed, ignoring");
        }
        self.resolution.found.insert(story);
        Ok(())
    }

    pub async fn resolve_all<S>(mut self, references: S) -> Result<Resolution, ReleaseNotesError>
    where
        S: Stream<Item = Result<StoryReference, ReleaseNotesError>>,
    {
        let mut references = std::pin::pin!(references);
        while let Some(reference) = references.try_next().await? {
            self.resolve(reference.id).await?;
        }
        Ok(self.finish())
    }

    pub fn finish(self) -> Resolution {
        self.resolution
    }
}
