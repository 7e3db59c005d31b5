use crate::collector::ReferenceCollector;
use crate::config::GenerationSettings;
use crate::error::ReleaseNotesError;
use crate::host::SourceHost;
use crate::labels::{apply_version_label, version_label_name};
use crate::notes::{RangeContext, assemble};
use crate::render::NotesRenderer;
use crate::resolver::StoryResolver;
use crate::tracker::Tracker;
use crate::types::NotesPayload;
use crate::walker::HistoryWalker;

pub struct ReleaseNotesGenerator<'a, H, T, R> {
    host: &'a H,
    tracker: &'a T,
    renderer: &'a R,
    settings: &'a GenerationSettings,
}

impl<'a, H, T, R> ReleaseNotesGenerator<'a, H, T, R>
where
    H: SourceHost,
    T: Tracker,
    R: NotesRenderer,
{
    pub fn new(host: &'a H, tracker: &'a T, renderer: &'a R, settings: &'a GenerationSettings) -> Self {
        Self {
            host,
            tracker,
            renderer,
            settings,
        }
    }

    // Labeling happens only after every lookup succeeded.
    pub async fn build_payload(
        &self,
        head: &str,
        base: &str,
    ) -> Result<NotesPayload, ReleaseNotesError> {
        tracing::info!(
            repository = %self.settings.repository,
            head,
            base,
            "generating release notes"
        );

        let walker = HistoryWalker::new(self.host, base, head)
            .with_discovery(self.settings.discovery)
            .with_limits(self.settings.limits);
        let references = ReferenceCollector::new(walker, &self.settings.pattern).into_stream();
        let resolution = StoryResolver::new(self.tracker)
            .resolve_all(references)
            .await?;
        tracing::debug!(
            found = resolution.found.len(),
            completed = resolution.release_notes.len(),
            missing = resolution.missing.len(),
            "stories resolved"
        );

        let label = version_label_name(head);
        let mut stories = resolution.release_notes;
        apply_version_label(self.tracker, &mut stories, &label).await?;

        let context = RangeContext {
            repository: self.settings.repository.clone(),
            head: head.to_string(),
            base: base.to_string(),
        };
        assemble(&context, stories, &label)
    }

    pub async fn generate(&self, head: &str, base: &str) -> Result<String, ReleaseNotesError> {
        let payload = self.build_payload(head, base).await?;
        let template = self.settings.templates.for_payload(&payload);
        Ok(self.renderer.render(template, &payload)?)
    }
}
