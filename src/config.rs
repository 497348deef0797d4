use crate::prompt;
use anyhow::Context;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration keys enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Model,
    PromptTemplate,
}

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::Model => "model",
            ConfigKey::PromptTemplate => "promptTemplate",
        }
    }

    /// Environment variable that overrides the value from the config file
    pub fn env_var(&self) -> &'static str {
        match self {
            ConfigKey::Model => env_vars::MODEL,
            ConfigKey::PromptTemplate => env_vars::PROMPT_TEMPLATE,
        }
    }

    /// Get all config keys
    pub fn all() -> &'static [ConfigKey] {
        &[ConfigKey::Model, ConfigKey::PromptTemplate]
    }
}

/// Names of the environment variables read at startup
pub mod env_vars {
    pub const REPO_OWNER: &str = "REPO_OWNER";
    pub const REPO_NAME: &str = "REPO_NAME";
    pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
    pub const AI_API_KEY: &str = "GOOGLE_AI_API_KEY";
    pub const MODEL: &str = "FOLLOWUP_MODEL";
    pub const PROMPT_TEMPLATE: &str = "FOLLOWUP_PROMPT_TEMPLATE";
    pub const GITHUB_API_URL: &str = "GITHUB_API_URL";
    pub const AI_API_URL: &str = "GOOGLE_AI_API_URL";
}

/// Filename for the project-specific configuration within the .issue-followup directory.
pub const PROJECT_CONFIG_FILENAME: &str = "config.json";
/// Directory name for project-specific configuration.
pub const PROJECT_CONFIG_DIR: &str = ".issue-followup";

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_AI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("REPO_OWNER and REPO_NAME environment variables are required")]
    MissingRepository,

    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Config must be a JSON object")]
    NotAnObject,

    #[error("Config value for `{0}` must be a string")]
    NotAString(&'static str),

    #[error("Prompt template must contain the {{body}} placeholder")]
    MissingBodyPlaceholder,
}

/// Parses a JSON configuration file content into a map of configuration values.
///
/// - Returns `Ok(HashMap<ConfigKey, Value>)` with every recognized key found in the object.
/// - Returns an empty HashMap if `content` is empty or contains only whitespace.
/// - Returns an `Err` if the JSON is invalid or the top level is not an object.
pub fn parse_config(content: &[u8]) -> Result<HashMap<ConfigKey, Value>, ConfigError> {
    if content.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(HashMap::new());
    }

    let value: Value = serde_json::from_slice(content)?;

    let Value::Object(map) = &value else {
        return Err(ConfigError::NotAnObject);
    };

    Ok(ConfigKey::all()
        .iter()
        .filter_map(|key| map.get(key.as_str()).map(|val| (*key, val.clone())))
        .collect())
}

/// Merges `updates` into `base_config` and returns a new configuration map.
///
/// If a key exists in both, the value from `updates` wins.
pub fn update_config(
    base_config: &HashMap<ConfigKey, Value>,
    updates: &HashMap<ConfigKey, Value>,
) -> HashMap<ConfigKey, Value> {
    let mut new_config = base_config.clone();
    for (key, value) in updates {
        new_config.insert(*key, value.clone());
    }
    new_config
}

/// Collects the config keys that are overridden through environment variables.
pub fn env_overrides<F>(lookup: F) -> HashMap<ConfigKey, Value>
where
    F: Fn(&str) -> Option<String>,
{
    ConfigKey::all()
        .iter()
        .filter_map(|key| non_empty(&lookup, key.env_var()).map(|val| (*key, Value::String(val))))
        .collect()
}

/// Reads `<dir>/.issue-followup/config.json`. A missing file yields an empty map.
pub fn load_project_config(dir: &Path) -> Result<HashMap<ConfigKey, Value>, ConfigError> {
    let path = dir.join(PROJECT_CONFIG_DIR).join(PROJECT_CONFIG_FILENAME);
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    parse_config(&content)
}

/// Settings resolved for a single run
#[derive(Clone, PartialEq)]
pub struct Settings {
    pub owner: String,
    pub repo: String,
    pub github_token: Option<String>,
    pub ai_api_key: Option<String>,
    pub model: String,
    pub prompt_template: String,
    pub github_api_url: String,
    pub ai_api_url: String,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |secret: &Option<String>| secret.as_ref().map(|_| "<redacted>");
        f.debug_struct("Settings")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("github_token", &redact(&self.github_token))
            .field("ai_api_key", &redact(&self.ai_api_key))
            .field("model", &self.model)
            .field("prompt_template", &self.prompt_template)
            .field("github_api_url", &self.github_api_url)
            .field("ai_api_url", &self.ai_api_url)
            .finish()
    }
}

impl Settings {
    /// Resolves settings from an environment lookup and the project config file.
    ///
    /// Precedence is environment variable, then config file, then built-in default.
    /// Empty environment values count as unset.
    pub fn resolve<F>(
        lookup: F,
        file_config: &HashMap<ConfigKey, Value>,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (Some(owner), Some(repo)) = (
            non_empty(&lookup, env_vars::REPO_OWNER),
            non_empty(&lookup, env_vars::REPO_NAME),
        ) else {
            return Err(ConfigError::MissingRepository);
        };

        let merged = update_config(file_config, &env_overrides(&lookup));
        let model = string_setting(&merged, ConfigKey::Model, DEFAULT_MODEL)?;
        let prompt_template = string_setting(
            &merged,
            ConfigKey::PromptTemplate,
            prompt::DEFAULT_PROMPT_TEMPLATE,
        )?;
        if !prompt_template.contains(prompt::BODY_PLACEHOLDER) {
            return Err(ConfigError::MissingBodyPlaceholder);
        }

        Ok(Settings {
            owner,
            repo,
            github_token: non_empty(&lookup, env_vars::GITHUB_TOKEN),
            ai_api_key: non_empty(&lookup, env_vars::AI_API_KEY),
            model,
            prompt_template,
            github_api_url: base_url(&lookup, env_vars::GITHUB_API_URL, DEFAULT_GITHUB_API_URL),
            ai_api_url: base_url(&lookup, env_vars::AI_API_URL, DEFAULT_AI_API_URL),
        })
    }

    /// Loads settings from the process environment and the config file in the
    /// current directory.
    pub fn load() -> anyhow::Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        let file_config = load_project_config(&current_dir)?;
        let settings = Settings::resolve(|name| std::env::var(name).ok(), &file_config)?;
        Ok(settings)
    }
}

fn non_empty<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|value| !value.trim().is_empty())
}

fn base_url<F>(lookup: &F, name: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, name)
        .unwrap_or_else(|| default.to_string())
        .trim_end_matches('/')
        .to_string()
}

fn string_setting(
    config: &HashMap<ConfigKey, Value>,
    key: ConfigKey,
    default: &str,
) -> Result<String, ConfigError> {
    match config.get(&key) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(ConfigError::NotAString(key.as_str())),
        None => Ok(default.to_string()),
    }
}
