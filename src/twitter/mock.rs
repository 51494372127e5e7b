//! In-process transport that records calls instead of touching the network

use crate::twitter::{Account, PostedTweet, TwitterClient};
use anyhow::bail;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct MockTwitter {
    pub auth_error: Option<String>,
    pub post_error: Option<String>,
    pub auth_calls: Arc<Mutex<usize>>,
    pub posted: Arc<Mutex<Vec<String>>>,
}

impl MockTwitter {
    pub fn auth_failure(error: &str) -> Self {
        Self {
            auth_error: Some(error.to_string()),
            ..Default::default()
        }
    }

    pub fn post_failure(error: &str) -> Self {
        Self {
            post_error: Some(error.to_string()),
            ..Default::default()
        }
    }

    pub fn auth_call_count(&self) -> usize {
        *self.auth_calls.lock().unwrap()
    }

    pub fn post_call_count(&self) -> usize {
        self.posted.lock().unwrap().len()
    }

    pub fn posted_content(&self) -> Vec<String> {
        self.posted.lock().unwrap().clone()
    }
}

#[async_trait]
impl TwitterClient for MockTwitter {
    async fn verify_credentials(&self) -> anyhow::Result<Account> {
        *self.auth_calls.lock().unwrap() += 1;
        if let Some(error) = &self.auth_error {
            bail!(error.clone());
        }
        Ok(Account {
            id: 42,
            name: "Mock Bot".to_string(),
            screen_name: "mock_bot".to_string(),
        })
    }

    async fn create_tweet(&self, text: &str) -> anyhow::Result<PostedTweet> {
        let mut posted = self.posted.lock().unwrap();
        posted.push(text.to_string());
        if let Some(error) = &self.post_error {
            bail!(error.clone());
        }
        Ok(PostedTweet {
            id: 1000 + posted.len() as u64,
            text: text.to_string(),
        })
    }
}
