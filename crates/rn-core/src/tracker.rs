use crate::error::TrackerError;
use crate::types::{Story, StoryId};

/// The external work-item tracker.
#[allow(async_fn_in_trait)]
pub trait Tracker {
    async fn story(&self, id: StoryId) -> Result<Story, TrackerError>;

    /// Adds the label named `label` to every story in `ids` with one request
    /// and returns the updated records. Adding a label a story already
    /// carries is a no-op for that story.
    async fn add_label(&self, ids: &[StoryId], label: &str) -> Result<Vec<Story>, TrackerError>;
}
