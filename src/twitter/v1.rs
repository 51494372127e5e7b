use crate::credentials::Credentials;
use crate::twitter::{Account, PostedTweet, TwitterClient};
use anyhow::Context;
use async_trait::async_trait;
use egg_mode::tweet::DraftTweet;
use egg_mode::{KeyPair, Token};

pub struct TwitterClientV1 {
    token: Token,
}

impl TwitterClientV1 {
    pub fn new(credentials: &Credentials) -> Self {
        Self {
            token: Token::Access {
                consumer: KeyPair::new(
                    credentials.api_key.clone(),
                    credentials.api_secret.clone(),
                ),
                access: KeyPair::new(
                    credentials.access_token.clone(),
                    credentials.access_secret.clone(),
                ),
            },
        }
    }
}

#[async_trait]
impl TwitterClient for TwitterClientV1 {
    async fn verify_credentials(&self) -> anyhow::Result<Account> {
        let user = egg_mode::auth::verify_tokens(&self.token)
            .await
            .context("Unable to verify credentials")?;
        Ok(Account::from(user.response))
    }

    async fn create_tweet(&self, text: &str) -> anyhow::Result<PostedTweet> {
        let tweet = DraftTweet::new(text.to_string())
            .send(&self.token)
            .await
            .context("Unable to create tweet")?;
        Ok(PostedTweet::from(tweet.response))
    }
}

impl From<egg_mode::user::TwitterUser> for Account {
    fn from(user: egg_mode::user::TwitterUser) -> Self {
        Account {
            id: user.id,
            name: user.name,
            screen_name: user.screen_name,
        }
    }
}

impl From<egg_mode::tweet::Tweet> for PostedTweet {
    fn from(tweet: egg_mode::tweet::Tweet) -> Self {
        PostedTweet {
            id: tweet.id,
            text: tweet.text,
        }
    }
}
