use crate::error::{BotError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TWEET_TEXT: &str = "Well this got triggered somehow.. suspicious ?";
pub const DEFAULT_PROMPT_TEMPLATE: &str = "Generate a tweet about {topic} in a {tone} tone";

/// Settings for a single run. Built once, read-only afterwards.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Text posted when generation is not requested
    pub tweet_text: Option<String>,
    #[serde(rename = "ai")]
    pub ai_config: AiConfig,
    pub log_level: String,
    /// Log destination, stderr when unset
    pub log_file: Option<PathBuf>,
    pub env_file: PathBuf,
    /// Local upper bound on tweet length, in characters
    pub max_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tweet_text: Some(DEFAULT_TWEET_TEXT.to_string()),
            ai_config: AiConfig::default(),
            log_level: "debug".to_string(),
            log_file: None,
            env_file: PathBuf::from(".env"),
            max_length: 255,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AiConfig {
    /// May reference `{topic}` and `{tone}` only
    pub prompt_template: String,
    pub temperature: f32,
    /// Generated text is cut to this many characters
    pub max_tokens: usize,
    pub topics: Vec<String>,
    pub tones: Vec<String>,
    /// Backend specific model name
    pub model: Option<String>,
    /// Completion length requested from the provider
    pub max_completion_tokens: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
            temperature: 0.7,
            max_tokens: 255,
            topics: vec!["technology".to_string()],
            tones: vec!["professional but catchy".to_string()],
            model: None,
            max_completion_tokens: 1024,
        }
    }
}

impl Config {
    /// Loads a TOML settings file; absent keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            BotError::Config(format!("Unable to read settings file {}: {}", path.display(), e))
        })?;
        Self::parse(&contents)
            .map_err(|e| BotError::Config(format!("Invalid settings file {}: {}", path.display(), e)))
    }

    pub fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// The text to post when no generation is requested
    pub fn static_text(&self) -> Result<&str> {
        self.tweet_text
            .as_deref()
            .ok_or_else(|| BotError::Config("No tweet text configured".to_string()))
    }
}

/// Reads `KEY=VALUE` lines from an env file.
///
/// Returns an empty map when the file does not exist.
pub fn load_env_file(path: &Path) -> Result<HashMap<String, String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(parse_env(&contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No env file at {}", path.display());
            Ok(HashMap::new())
        }
        Err(e) => Err(BotError::Config(format!(
            "Unable to read env file {}: {}",
            path.display(),
            e
        ))),
    }
}

fn parse_env(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .filter_map(|l| {
            let l = l.strip_prefix("export ").unwrap_or(l);
            let (key, value) = l.split_once('=')?;
            Some((key.trim().to_string(), unquote(value.trim()).to_string()))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
