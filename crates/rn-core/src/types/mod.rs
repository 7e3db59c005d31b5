pub mod ids;
pub mod payload;
pub mod source;
pub mod story;

pub use ids::{IdError, LabelId, PullRequestNumber, ReleaseId, StoryId};
pub use payload::{EmptyPayload, NotesPayload, StoriesPayload};
pub use source::{
    CommentPage, CommentRef, CommitPage, CommitRef, PullRequestRef, Release, RepositoryRef,
};
pub use story::{Label, ReferenceSource, Story, StoryFull, StoryMap, StoryReference, StorySlim};
