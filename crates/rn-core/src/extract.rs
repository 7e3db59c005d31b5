use crate::error::ConfigError;
use crate::types::StoryId;
use regex::{CaptureMatches, Regex};
use std::sync::LazyLock;

/// Matches `ch123`, `sc-123`, `[sc-123]`, optionally preceded by a closing
/// keyword such as `fixes` or `closes`. Group 1 is the numeric id.
pub const DEFAULT_STORY_PATTERN: &str =
    r"(?i)(?:\b(?:fixes|fix|closes|closed|finish|finishes)\s+)?\[?\b(?:ch|sc)-?(\d+)\]?";

static DEFAULT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_STORY_PATTERN).expect("default story pattern compiles"));

/// Pulls story ids out of free text.
#[derive(Debug, Clone)]
pub struct StoryPattern {
    regex: Regex,
}

impl StoryPattern {
    /// Compiles a custom pattern. The first capture group must hold the
    /// numeric id.
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(pattern).map_err(|err| ConfigError::InvalidPattern {
            message: err.to_string(),
        })?;
        if regex.captures_len() < 2 {
            return Err(ConfigError::InvalidPattern {
                message: format!("pattern has no capture group: {pattern}"),
            });
        }
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Every id in `text`, left to right, one per non-overlapping match.
    /// Duplicates are kept.
    pub fn story_ids<'p, 't>(&'p self, text: &'t str) -> StoryIds<'p, 't> {
        StoryIds {
            captures: self.regex.captures_iter(text),
        }
    }
}

impl Default for StoryPattern {
    fn default() -> Self {
        Self {
            regex: DEFAULT_REGEX.clone(),
        }
    }
}

pub struct StoryIds<'p, 't> {
    captures: CaptureMatches<'p, 't>,
}

impl Iterator for StoryIds<'_, '_> {
    type Item = StoryId;

    fn next(&mut self) -> Option<StoryId> {
        for captures in self.captures.by_ref() {
            let Some(digits) = captures.get(1) else {
                continue;
            };
            match digits.as_str().parse::<StoryId>() {
                Ok(id) => return Some(id),
                Err(err) => tracing::debug!(%err, "ignoring unparseable story reference"),
            }
        }
        None
    }
}
