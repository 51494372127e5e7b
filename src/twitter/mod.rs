pub mod oauth;
pub mod v1;
pub mod v2;

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;

/// The account a set of credentials acts on behalf of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: u64,
    pub name: String,
    pub screen_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedTweet {
    pub id: u64,
    pub text: String,
}

/// Transport to the Twitter API
#[async_trait]
pub trait TwitterClient: Send + Sync {
    /// Round trip confirming the credentials, returns the account they belong to
    async fn verify_credentials(&self) -> anyhow::Result<Account>;

    async fn create_tweet(&self, text: &str) -> anyhow::Result<PostedTweet>;
}

#[async_trait]
impl<T: TwitterClient + ?Sized> TwitterClient for Box<T> {
    async fn verify_credentials(&self) -> anyhow::Result<Account> {
        (**self).verify_credentials().await
    }

    async fn create_tweet(&self, text: &str) -> anyhow::Result<PostedTweet> {
        (**self).create_tweet(text).await
    }
}
