mod app;
mod config;
mod credentials;
mod error;
mod generator;
mod logging;
mod poster;
mod twitter;

use crate::config::Config;
use crate::error::Result;
use crate::generator::{BackendRegistry, TweetGenerator};
use crate::twitter::v1::TwitterClientV1;
use crate::twitter::v2::TwitterClientV2;
use crate::twitter::TwitterClient;
use clap::Parser;
use error::BotError;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(version, about)]
struct Args {
    /// Path to a TOML settings file
    #[clap(short, long)]
    config: Option<PathBuf>,
    /// File with KEY=VALUE credentials, overrides the settings file
    #[clap(long)]
    env_file: Option<PathBuf>,
    /// Text to post, overrides the settings file
    #[clap(short, long)]
    text: Option<String>,
    /// Generate the tweet with a language model instead of posting fixed text
    #[clap(short, long)]
    generate: bool,
    /// Language model backend to generate with
    #[clap(long, default_value = "groq")]
    backend: String,
    /// Use Twitter API 2 instead of API 1.1
    #[clap(long)]
    api_v2: bool,
    /// Log filter, e.g. `info` or `tweet_bot=debug`
    #[clap(long)]
    log_level: Option<String>,
    /// Append logs to this file instead of stderr
    #[clap(long)]
    log_file: Option<PathBuf>,
    /// Longest tweet accepted, in characters
    #[clap(long)]
    max_length: Option<usize>,
    #[clap(long)]
    api_key: Option<String>,
    #[clap(long)]
    api_secret: Option<String>,
    #[clap(long)]
    access_token: Option<String>,
    #[clap(long)]
    access_secret: Option<String>,
    #[clap(long)]
    bearer_token: Option<String>,
}

impl Args {
    /// Settings file (or defaults) with command line overrides applied
    fn settings(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(text) = &self.text {
            config.tweet_text = Some(text.clone());
        }
        if let Some(env_file) = &self.env_file {
            config.env_file = env_file.clone();
        }
        if let Some(log_level) = &self.log_level {
            config.log_level = log_level.clone();
        }
        if let Some(log_file) = &self.log_file {
            config.log_file = Some(log_file.clone());
        }
        if let Some(max_length) = self.max_length {
            config.max_length = max_length;
        }
        Ok(config)
    }

    fn credential_overrides(&self) -> HashMap<String, String> {
        maplit::hashmap! {
            credentials::API_KEY => &self.api_key,
            credentials::API_SECRET => &self.api_secret,
            credentials::ACCESS_TOKEN => &self.access_token,
            credentials::ACCESS_SECRET => &self.access_secret,
            credentials::BEARER_TOKEN => &self.bearer_token,
        }
        .into_iter()
        .filter_map(|(name, value)| value.clone().map(|v| (name.to_string(), v)))
        .collect()
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args: Args = Args::parse();
    let config = match args.settings() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:#}", anyhow::Error::from(e));
            std::process::exit(2);
        }
    };
    if let Err(e) = logging::init(&config.log_level, config.log_file.as_deref()) {
        eprintln!("{:#}", anyhow::Error::from(e));
        std::process::exit(2);
    }

    let result = main2(&args, &config).await;
    let code = app::exit_code(&result);
    if let Err(e) = result {
        log::error!("Application failed: {:#}", anyhow::Error::from(e));
    }
    std::process::exit(code);
}

async fn main2(args: &Args, config: &Config) -> Result<twitter::PostedTweet> {
    log::info!("Loading environment variables...");
    // The process environment wins over the env file
    let mut env = config::load_env_file(&config.env_file)?;
    env.extend(std::env::vars());
    let credential_values = credentials::collect([&env, &args.credential_overrides()]);

    let generator: Option<app::GeneratorFactory<'_>> = if args.generate {
        Some(Box::new(|| {
            let registry = BackendRegistry::with_defaults();
            log::debug!(
                "Available backends: {}",
                registry.names().collect::<Vec<_>>().join(", ")
            );
            log::info!("Generating tweet with the {} backend", args.backend);
            TweetGenerator::new(config.ai_config.clone(), &args.backend, &registry, &env)
        }))
    } else {
        None
    };

    let api_v2 = args.api_v2;
    app::run(
        config,
        &credential_values,
        |credentials| connect(credentials, api_v2),
        generator,
    )
    .await
}

fn connect(
    credentials: &credentials::Credentials,
    api_v2: bool,
) -> Result<Box<dyn TwitterClient>> {
    let client: Box<dyn TwitterClient> = if api_v2 {
        log::info!("Using Twitter API v2");
        Box::new(
            TwitterClientV2::new(credentials)
                .map_err(|e| BotError::Config(format!("Unable to build Twitter client: {e:#}")))?,
        )
    } else {
        log::info!("Using Twitter API v1.1");
        Box::new(TwitterClientV1::new(credentials))
    };
    Ok(client)
}
