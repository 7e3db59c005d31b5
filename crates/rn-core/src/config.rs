use crate::error::ConfigError;
use crate::extract::StoryPattern;
use crate::render::Templates;
use crate::types::RepositoryRef;
use crate::walker::{Limits, PullRequestDiscovery};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".relnotes.toml";

const ENV_OWNER: &str = "RELNOTES_REPOSITORY_OWNER";
const ENV_NAME: &str = "RELNOTES_REPOSITORY_NAME";
const ENV_GITHUB_REPOSITORY: &str = "GITHUB_REPOSITORY";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySettings {
    pub owner: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorySettings {
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoverySettings {
    #[serde(default)]
    pub strategy: PullRequestDiscovery,
    #[serde(flatten)]
    pub limits: Limits,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSettings {
    pub release_notes: Option<PathBuf>,
    pub no_stories: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub stories: StorySettings,
    #[serde(default)]
    pub discovery: DiscoverySettings,
    #[serde(default)]
    pub templates: TemplateSettings,
}

#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub repository: RepositoryRef,
    pub pattern: StoryPattern,
    pub discovery: PullRequestDiscovery,
    pub limits: Limits,
    pub templates: Templates,
}

impl Settings {
    pub fn load(repo_root: &Path) -> Result<Self, ConfigError> {
        let mut settings = Self::from_file(&repo_root.join(CONFIG_FILE_NAME))?;
        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Template paths are resolved against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let mut settings: Self = toml::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        if let Some(dir) = path.parent() {
            settings.templates.release_notes =
                settings.templates.release_notes.map(|p| dir.join(p));
            settings.templates.no_stories = settings.templates.no_stories.map(|p| dir.join(p));
        }
        Ok(settings)
    }

    /// `GITHUB_REPOSITORY` only fills parts still unset.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(owner) = lookup(ENV_OWNER).filter(|v| !v.is_empty()) {
            self.repository.owner = Some(owner);
        }
        if let Some(name) = lookup(ENV_NAME).filter(|v| !v.is_empty()) {
            self.repository.name = Some(name);
        }
        if let Some(full) = lookup(ENV_GITHUB_REPOSITORY)
            && let Some((owner, name)) = full.split_once('/')
        {
            self.repository.owner.get_or_insert_with(|| owner.to_string());
            self.repository.name.get_or_insert_with(|| name.to_string());
        }
    }

    pub fn repository(&self) -> Result<RepositoryRef, ConfigError> {
        match (&self.repository.owner, &self.repository.name) {
            (Some(owner), Some(name)) => Ok(RepositoryRef::new(owner, name)),
            _ => Err(ConfigError::MissingRepository),
        }
    }

    pub fn story_pattern(&self) -> Result<StoryPattern, ConfigError> {
        match &self.stories.pattern {
            Some(pattern) => StoryPattern::new(pattern),
            None => Ok(StoryPattern::default()),
        }
    }

    pub fn generation(&self) -> Result<GenerationSettings, ConfigError> {
        let repository = self.repository()?;
        let pattern = self.story_pattern()?;
        let templates = Templates {
            release_notes: read_template(self.templates.release_notes.as_deref(), "release_notes")?,
            no_stories: read_template(self.templates.no_stories.as_deref(), "no_stories")?,
        };
        Ok(GenerationSettings {
            repository,
            pattern,
            discovery: self.discovery.strategy,
            limits: self.discovery.limits,
            templates,
        })
    }
}

fn read_template(path: Option<&Path>, name: &'static str) -> Result<String, ConfigError> {
    let path = path.ok_or(ConfigError::Template { name })?;
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
