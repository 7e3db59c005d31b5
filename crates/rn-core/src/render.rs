use crate::error::RenderError;
use crate::types::NotesPayload;

pub trait NotesRenderer {
    fn render(&self, template: &str, payload: &NotesPayload) -> Result<String, RenderError>;
}

impl<F> NotesRenderer for F
where
    F: Fn(&str, &NotesPayload) -> Result<String, RenderError>,
{
    fn render(&self, template: &str, payload: &NotesPayload) -> Result<String, RenderError> {
        self(template, payload)
    }
}

/// Template pair: one for a release with stories, one for an empty range.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Templates {
    pub release_notes: String,
    pub no_stories: String,
}

impl Templates {
    pub fn for_payload(&self, payload: &NotesPayload) -> &str {
        match payload {
            NotesPayload::Stories(_) => &self.release_notes,
            NotesPayload::Empty(_) => &self.no_stories,
        }
    }
}
