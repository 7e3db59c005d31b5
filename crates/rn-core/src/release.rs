use crate::config::GenerationSettings;
use crate::error::ReleaseNotesError;
use crate::generator::ReleaseNotesGenerator;
use crate::host::SourceHost;
use crate::render::NotesRenderer;
use crate::tracker::Tracker;
use crate::types::Release;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

/// `[rn > v1.2.0]` in a release body asks for the notes of `v1.2.0..tag`.
static RELEASE_NOTES_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[rn > ([-._\w]*?)\]").expect("release notes marker compiles")
});

pub fn marker_bases(body: &str) -> Vec<String> {
    let mut bases: Vec<String> = Vec::new();
    for captures in RELEASE_NOTES_MARKER.captures_iter(body) {
        let base = &captures[1];
        if !bases.iter().any(|seen| seen == base) {
            bases.push(base.to_string());
        }
    }
    bases
}

pub struct ReleaseUpdater<'a, H, T, R> {
    host: &'a H,
    generator: ReleaseNotesGenerator<'a, H, T, R>,
}

impl<'a, H, T, R> ReleaseUpdater<'a, H, T, R>
where
    H: SourceHost,
    T: Tracker,
    R: NotesRenderer,
{
    pub fn new(host: &'a H, tracker: &'a T, renderer: &'a R, settings: &'a GenerationSettings) -> Self {
        Self {
            host,
            generator: ReleaseNotesGenerator::new(host, tracker, renderer, settings),
        }
    }

    /// Returns the body that was written. Nothing is written unless every
    /// marker generated successfully.
    pub async fn run(&self, release: &Release) -> Result<String, ReleaseNotesError> {
        let body = release
            .body
            .as_deref()
            .ok_or(ReleaseNotesError::MissingReleaseBody)?;
        let head = release.tag_name.as_str();

        let mut rendered: HashMap<String, String> = HashMap::new();
        for base in marker_bases(body) {
            let notes = self.generator.generate(head, &base).await.inspect_err(|err| {
                tracing::error!(%err, head, base = %base, "release notes generation failed");
            })?;
            rendered.insert(base, notes);
        }

        let replaced = RELEASE_NOTES_MARKER
            .replace_all(body, |captures: &Captures| {
                rendered
                    .get(&captures[1])
                    .cloned()
                    .unwrap_or_else(|| captures[0].to_string())
            })
            .into_owned();
        tracing::debug!(release = %release.id, body = %replaced, "replaced release body");

        self.host
            .update_release(release.id, &replaced)
            .await
            .map_err(|err| {
                tracing::error!(%err, release = %release.id, "release update failed");
                ReleaseNotesError::ReleaseUpdate
            })?;
        tracing::info!(release = %release.id, markers = rendered.len(), "updated release notes");
        Ok(replaced)
    }
}
