use crate::error::ReleaseNotesError;
use crate::tracker::Tracker;
use crate::types::StoryMap;

pub const VERSION_LABEL_PREFIX: &str = "Version: ";

/// Name of the label marking stories shipped in `tag`.
pub fn version_label_name(tag: &str) -> String {
    format!("{VERSION_LABEL_PREFIX}{tag}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelOutcome {
    Applied { stories: usize },
    Skipped,
}

/// Tags every story in `stories` with `label` through one bulk tracker call
/// and replaces each entry with the record the tracker returned.
///
/// An empty map makes no call. A failed call aborts without partial updates.
pub async fn apply_version_label<T: Tracker>(
    tracker: &T,
    stories: &mut StoryMap,
    label: &str,
) -> Result<LabelOutcome, ReleaseNotesError> {
    if stories.is_empty() {
        tracing::info!("no stories to add version label to");
        return Ok(LabelOutcome::Skipped);
    }

    let ids = stories.ids();
    tracing::debug!(label, count = ids.len(), "bulk adding version label");
    let updated = tracker.add_label(&ids, label).await.map_err(|err| {
        tracing::error!(%err, label, "bulk label update failed");
        ReleaseNotesError::BulkLabel
    })?;

    for story in updated {
        let id = story.id();
        if !stories.replace_existing(story) {
            tracing::debug!(%id, "tracker returned a story outside the release, ignoring");
        }
    }
    tracing::info!(label, count = ids.len(), "version label applied");
    Ok(LabelOutcome::Applied { stories: ids.len() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;
    use crate::testing::{FakeTracker, TrackerCall, slim_story};
    use crate::types::StoryId;

    fn map_of(stories: &[i64]) -> StoryMap {
        let mut map = StoryMap::new();
        for id in stories {
            map.insert(slim_story(*id, true));
        }
        map
    }

    #[test]
    fn test_version_label_name() {
        assert_eq!(version_label_name("v1.2.3"), "Version: v1.2.3");
    }

    #[tokio::test]
    async fn test_single_bulk_call_with_all_ids() {
        let tracker = FakeTracker::new()
            .with_story(slim_story(123, true))
            .with_story(slim_story(7, true));
        let mut stories = map_of(&[123, 7]);

        let outcome = apply_version_label(&tracker, &mut stories, "Version: v2")
            .await
            .unwrap();

        assert_eq!(outcome, LabelOutcome::Applied { stories: 2 });
        assert_eq!(
            tracker.calls(),
            vec![TrackerCall::AddLabel {
                ids: vec![123, 7],
                label: "Version: v2".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_returned_records_replace_stale_ones() {
        let tracker = FakeTracker::new().with_story(slim_story(1, true));
        let mut stories = map_of(&[1]);
        assert!(!stories.get(StoryId::new(1)).unwrap().has_label("Version: v2"));

        apply_version_label(&tracker, &mut stories, "Version: v2")
            .await
            .unwrap();

        assert!(stories.get(StoryId::new(1)).unwrap().has_label("Version: v2"));
    }

    #[tokio::test]
    async fn test_relabeling_is_idempotent() {
        let tracker = FakeTracker::new().with_story(slim_story(1, true));
        let mut stories = map_of(&[1]);

        apply_version_label(&tracker, &mut stories, "Version: v2")
            .await
            .unwrap();
        apply_version_label(&tracker, &mut stories, "Version: v2")
            .await
            .unwrap();

        let story = stories.get(StoryId::new(1)).unwrap();
        let count = story
            .labels()
            .iter()
            .filter(|label| label.name == "Version: v2")
            .count();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_empty_map_skips_call() {
        let tracker = FakeTracker::new();
        let mut stories = StoryMap::new();
        let outcome = apply_version_label(&tracker, &mut stories, "Version: v2")
            .await
            .unwrap();
        assert_eq!(outcome, LabelOutcome::Skipped);
        assert!(tracker.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failure_is_translated() {
        let tracker = FakeTracker::new()
            .with_story(slim_story(1, true))
            .with_label_error(TrackerError::RateLimited);
        let mut stories = map_of(&[1]);
        let err = apply_version_label(&tracker, &mut stories, "Version: v2")
            .await
            .unwrap_err();
        assert!(matches!(err, ReleaseNotesError::BulkLabel));
        assert_eq!(err.to_string(), "could not add version label to stories");
        assert!(!stories.get(StoryId::new(1)).unwrap().has_label("Version: v2"));
    }

    #[tokio::test]
    async fn test_unknown_returned_story_is_ignored() {
        let tracker = FakeTracker::new()
            .with_story(slim_story(1, true))
            .with_extra_label_result(slim_story(99, true));
        let mut stories = map_of(&[1]);
        apply_version_label(&tracker, &mut stories, "Version: v2")
            .await
            .unwrap();
        assert_eq!(stories.len(), 1);
        assert!(!stories.contains(StoryId::new(99)));
    }
}
