use crate::error::{BotError, Result};
use crate::twitter::{Account, PostedTweet, TwitterClient};

/// Authenticated posting session for a single account.
///
/// Starts out uninitialized; `post` is only accepted after `authenticate`
/// has confirmed the credentials.
pub struct Poster<C> {
    client: C,
    max_length: usize,
    account: Option<Account>,
}

impl<C: TwitterClient> Poster<C> {
    pub fn new(client: C, max_length: usize) -> Self {
        Self {
            client,
            max_length,
            account: None,
        }
    }

    pub async fn authenticate(&mut self) -> Result<&Account> {
        let account = self
            .client
            .verify_credentials()
            .await
            .map_err(|e| BotError::Authentication(e.into()))?;
        log::info!(
            "Logged in as: {} (@{}, id {})",
            account.name,
            account.screen_name,
            account.id
        );
        Ok(self.account.insert(account))
    }

    pub async fn post(&self, text: &str) -> Result<PostedTweet> {
        if self.account.is_none() {
            return Err(BotError::NotInitialized);
        }
        let length = text.chars().count();
        if length == 0 || length > self.max_length {
            return Err(BotError::InvalidContent(format!(
                "Tweet must be between 1 and {} characters, got {}",
                self.max_length, length
            )));
        }
        match self.client.create_tweet(text).await {
            Ok(tweet) => {
                log::info!("Tweet successfully posted: {}", tweet.text);
                Ok(tweet)
            }
            Err(e) => {
                log::error!("Failed to post tweet: {:#}", e);
                Err(BotError::PostingFailed(e.into()))
            }
        }
    }
}
