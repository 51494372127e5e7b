use crate::config::Config;
use crate::credentials::{self, Credentials};
use crate::error::Result;
use crate::generator::TweetGenerator;
use crate::poster::Poster;
use crate::twitter::{PostedTweet, TwitterClient};
use std::collections::HashMap;

/// Builds the generator once the credentials are known to be complete
pub type GeneratorFactory<'a> = Box<dyn FnOnce() -> Result<TweetGenerator> + 'a>;

/// One complete run: validate the credentials, connect, authenticate,
/// produce the text and post it.
///
/// Nothing else is built until the credentials are validated. The generator
/// comes next, so an unknown backend is reported before `connect` is called.
/// Without a generator the configured static text is posted. A generation
/// failure ends the run; it never falls back to the static text.
pub async fn run<C, F>(
    config: &Config,
    credential_values: &HashMap<String, String>,
    connect: F,
    generator: Option<GeneratorFactory<'_>>,
) -> Result<PostedTweet>
where
    C: TwitterClient,
    F: FnOnce(&Credentials) -> Result<C>,
{
    let credentials = credentials::validate(credential_values)?;
    let generator = generator.map(|build| build()).transpose()?;
    log::info!("Initializing Twitter client...");
    let mut poster = Poster::new(connect(&credentials)?, config.max_length);
    poster.authenticate().await?;

    let text = match &generator {
        Some(generator) => generator.generate_tweet().await?,
        None => config.static_text()?.to_string(),
    };
    let tweet = poster.post(&text).await?;
    log::info!("Tweet posted successfully. ID: {}", tweet.id);
    Ok(tweet)
}

/// Exit status for the outcome of [`run`]
pub fn exit_code(result: &Result<PostedTweet>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => e.exit_code(),
    }
}
