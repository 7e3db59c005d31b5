use crate::error::ReleaseNotesError;
use crate::extract::StoryPattern;
use crate::host::SourceHost;
use crate::types::{PullRequestNumber, ReferenceSource, StoryReference};
use crate::walker::HistoryWalker;
use futures::Stream;
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Clone, Copy)]
struct CommentCursor {
    number: PullRequestNumber,
    page: u32,
}

/// Streams every story reference in a commit range: commit message first,
/// then each associated PR's title and body, then that PR's comments.
///
/// Each external fetch happens only when the caller asks for more and the
/// already-extracted references are drained. A PR reached from several
/// commits is read once. Duplicate ids are passed through.
pub struct ReferenceCollector<'a, H> {
    walker: HistoryWalker<'a, H>,
    pattern: &'a StoryPattern,
    pending: VecDeque<StoryReference>,
    pull_requests: VecDeque<PullRequestNumber>,
    comments: Option<CommentCursor>,
    visited: HashSet<PullRequestNumber>,
}

impl<'a, H: SourceHost> ReferenceCollector<'a, H> {
    pub fn new(walker: HistoryWalker<'a, H>, pattern: &'a StoryPattern) -> Self {
        Self {
            walker,
            pattern,
            pending: VecDeque::new(),
            pull_requests: VecDeque::new(),
            comments: None,
            visited: HashSet::new(),
        }
    }

    pub async fn next_reference(&mut self) -> Result<Option<StoryReference>, ReleaseNotesError> {
        loop {
            if let Some(reference) = self.pending.pop_front() {
                return Ok(Some(reference));
            }

            if let Some(cursor) = self.comments.take() {
                let page = self.walker.comments(cursor.number, cursor.page).await?;
                for comment in &page.comments {
                    self.extract(&comment.body, &ReferenceSource::Comment {
                        number: cursor.number,
                    });
                }
                if let Some(next) = page.next_page.filter(|next| *next > cursor.page) {
                    if self.walker.comment_page_allowed(next) {
                        self.comments = Some(CommentCursor {
                            number: cursor.number,
                            page: next,
                        });
                    } else {
                        tracing::warn!(number = %cursor.number, "comment page limit reached");
                    }
                }
                continue;
            }

            if let Some(number) = self.pull_requests.pop_front() {
                if let Some(pull_request) = self.walker.pull_request(number).await {
                    self.extract(
                        &pull_request.searchable_text(),
                        &ReferenceSource::PullRequest { number },
                    );
                    if pull_request.has_comments() && self.walker.comment_page_allowed(1) {
                        self.comments = Some(CommentCursor { number, page: 1 });
                    }
                }
                continue;
            }

            let Some(commit) = self.walker.next_commit().await? else {
                return Ok(None);
            };
            self.extract(&commit.message, &ReferenceSource::Commit {
                sha: commit.sha.clone(),
            });
            self.pull_requests = self
                .walker
                .pull_requests(&commit)
                .await
                .into_iter()
                .filter(|number| self.visited.insert(*number))
                .collect();
        }
    }

    /// The collector as a fallible stream of references.
    pub fn into_stream(
        self,
    ) -> impl Stream<Item = Result<StoryReference, ReleaseNotesError>> + use<'a, H> {
        futures::stream::try_unfold(self, |mut collector| async move {
            let next = collector.next_reference().await?;
            Ok::<_, ReleaseNotesError>(next.map(|reference| (reference, collector)))
        })
    }

    fn extract(&mut self, text: &str, source: &ReferenceSource) {
        for id in self.pattern.story_ids(text) {
            self.pending.push_back(StoryReference {
                id,
                source: source.clone(),
            });
        }
    }
}
