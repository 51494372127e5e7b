//! Twitter API v2, signed with the account's OAuth 1.0a user context

use crate::credentials::Credentials;
use crate::twitter::oauth::OAuthSigner;
use crate::twitter::{Account, PostedTweet, TwitterClient};
use anyhow::{bail, Context};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

const TIMEOUT_SEC: u64 = 10;
const DEFAULT_BASE_URL: &str = "https://api.twitter.com";

#[derive(Clone)]
pub struct TwitterClientV2 {
    client: Client,
    signer: OAuthSigner,
    base_url: Url,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TwitterResponse<T> {
    // Detect the case where the API returns 200, but contains errors
    #[allow(unused)]
    Error { errors: serde_json::Value },
    Ok(T),
}

#[derive(Deserialize)]
struct MeResponse {
    data: Option<MeData>,
}

#[derive(Deserialize)]
struct MeData {
    id: String,
    name: String,
    username: String,
}

#[derive(Serialize)]
struct CreateTweetRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct CreateTweetResponse {
    data: CreateTweetData,
}

#[derive(Deserialize)]
struct CreateTweetData {
    id: String,
    text: String,
}

async fn deserialize_response<T: DeserializeOwned>(response: Response) -> anyhow::Result<T> {
    let status = response.status();
    let text = response.text().await.context("Bad response text")?;
    if !status.is_success() {
        let code = status.as_u16();
        bail!(format!("Response was not successful: {code}\n{text}"))
    }
    let twitter = match serde_json::from_str::<TwitterResponse<T>>(&text) {
        Ok(ok) => ok,
        Err(e) => match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(pretty) => {
                let pretty =
                    serde_json::to_string_pretty(&pretty).unwrap_or_else(|_| text.clone());
                bail!(format!(
                    "Unable to deserialize due to: {e}\nContents:\n{pretty}"
                ))
            }
            Err(_) => bail!("Invalid JSON"),
        },
    };
    Ok(match twitter {
        TwitterResponse::Ok(ok) => ok,
        TwitterResponse::Error { .. } => bail!(text),
    })
}

impl TwitterClientV2 {
    pub fn new(credentials: &Credentials) -> anyhow::Result<Self> {
        Self::with_base_url(credentials, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(credentials: &Credentials, base_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(TIMEOUT_SEC))
                .build()?,
            signer: OAuthSigner::new(credentials),
            base_url: Url::from_str(base_url).context("Invalid API base URL")?,
        })
    }

    fn signed(&self, method: Method, path: &str) -> anyhow::Result<reqwest::RequestBuilder> {
        let url = self.base_url.join(path).context("Invalid API path")?;
        let authorization = self.signer.authorization(method.as_str(), url.as_str(), &[])?;
        Ok(self
            .client
            .request(method, url)
            .header(AUTHORIZATION, authorization))
    }
}

#[async_trait]
impl TwitterClient for TwitterClientV2 {
    // https://developer.twitter.com/en/docs/twitter-api/users/lookup/api-reference/get-users-me
    async fn verify_credentials(&self) -> anyhow::Result<Account> {
        let response = self.signed(Method::GET, "/2/users/me")?.send().await?;
        let response = deserialize_response::<MeResponse>(response).await?;
        let data = response
            .data
            .context("Response did not include the authenticated account")?;
        Ok(Account {
            id: data.id.parse().context("Couldn't parse user id")?,
            name: data.name,
            screen_name: data.username,
        })
    }

    // https://developer.twitter.com/en/docs/twitter-api/tweets/manage-tweets/api-reference/post-tweets
    async fn create_tweet(&self, text: &str) -> anyhow::Result<PostedTweet> {
        let response = self
            .signed(Method::POST, "/2/tweets")?
            .json(&CreateTweetRequest { text })
            .send()
            .await?;
        let response = deserialize_response::<CreateTweetResponse>(response).await?;
        Ok(PostedTweet {
            id: response.data.id.parse().context("Couldn't parse tweet id")?,
            text: response.data.text,
        })
    }
}
