//! Tweet text generation on top of swappable language model backends.
//!
//! Backends are looked up by name in a [`BackendRegistry`]. The prompt is
//! built from [`AiConfig::prompt_template`], sent to the backend once, and the
//! reply is cut to [`AiConfig::max_tokens`] characters before trimming. The cut
//! is a hard one and may land in the middle of a word.

pub mod groq;
mod prompt;

#[cfg(test)]
pub mod mock;

use crate::config::AiConfig;
use crate::error::{BotError, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};

pub use prompt::format_prompt;

/// A language model that turns a prompt into text
#[async_trait]
pub trait ContentBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Builds a backend from the generation settings and the environment
pub type BackendFactory = Box<
    dyn Fn(&AiConfig, &HashMap<String, String>) -> Result<Box<dyn ContentBackend>> + Send + Sync,
>;

/// Placeholder for an OpenAI backend, accepted as a name but not wired up
pub struct GptBackend;

#[async_trait]
impl ContentBackend for GptBackend {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(BotError::NotImplemented("gpt".to_string()))
    }
}

pub struct BackendRegistry {
    factories: BTreeMap<String, BackendFactory>,
}

impl BackendRegistry {
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register("groq", |config, env| {
            Ok(Box::new(groq::GroqBackend::from_env(config, env)?))
        });
        registry.register("gpt", |_, _| Ok(Box::new(GptBackend)));
        registry
    }

    /// Adds or replaces a backend. Names are case-insensitive.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&AiConfig, &HashMap<String, String>) -> Result<Box<dyn ContentBackend>>
            + Send
            + Sync
            + 'static,
    {
        self.factories.insert(name.to_lowercase(), Box::new(factory));
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn create(
        &self,
        name: &str,
        config: &AiConfig,
        env: &HashMap<String, String>,
    ) -> Result<Box<dyn ContentBackend>> {
        let factory = self
            .factories
            .get(&name.to_lowercase())
            .ok_or_else(|| BotError::UnsupportedBackend(name.to_string()))?;
        factory(config, env)
    }
}

pub struct TweetGenerator {
    config: AiConfig,
    backend: Box<dyn ContentBackend>,
}

impl TweetGenerator {
    /// Looks up `backend` in the registry. Fails before any network access if
    /// the name is unknown or the prompt template is malformed.
    pub fn new(
        config: AiConfig,
        backend: &str,
        registry: &BackendRegistry,
        env: &HashMap<String, String>,
    ) -> Result<Self> {
        let backend = registry.create(backend, &config, env)?;
        Self::with_backend(config, backend)
    }

    pub fn with_backend(config: AiConfig, backend: Box<dyn ContentBackend>) -> Result<Self> {
        let generator = Self { config, backend };
        generator.prompt()?;
        Ok(generator)
    }

    /// The template with every topic and every tone filled in
    pub fn prompt(&self) -> Result<String> {
        let topic = self.config.topics.join(", ");
        let tone = self.config.tones.join(", ");
        format_prompt(
            &self.config.prompt_template,
            &[("topic", &topic), ("tone", &tone)],
        )
    }

    pub async fn generate_tweet(&self) -> Result<String> {
        let prompt = self.prompt()?;
        log::debug!("Generating tweet from prompt: {}", prompt);
        let tweet = self.backend.generate(&prompt).await?;
        Ok(truncate(&tweet, self.config.max_tokens).trim().to_string())
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
