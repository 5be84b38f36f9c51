//! esa.io API client with rate limiting and retries
//!
//! Walks every page of a category's posts and regroups them by author into a
//! [`PostCollection`].

use crate::error::{RankingError, Result};
use crate::types::{Author, Post, PostCollection};
use crate::utils::normalize_team_name;
use chrono::{DateTime, FixedOffset};
use governor::{DefaultDirectRateLimiter, Quota};
use indexmap::IndexMap;
use reqwest::Client;
use serde::Deserialize;
use std::{num::NonZeroU32, sync::Arc, time::Duration};
use tokio_retry::{strategy::ExponentialBackoff, RetryIf};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Author name used when a post carries no creator.
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// Configuration for the esa.io API client
#[derive(Debug, Clone)]
pub struct EsaConfig {
    /// API root (e.g., `https://api.esa.io`)
    pub base_url: String,
    /// Personal access token
    pub access_token: String,
    /// Team name without the `.esa.io` suffix
    pub team_name: String,
    /// Category whose posts are fetched
    pub category: String,
    /// Page size requested from the API (esa caps this at 100)
    pub per_page: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Rate limit: requests per second
    pub rate_limit_per_sec: u32,
    /// Maximum number of retry attempts per page
    pub max_retries: usize,
}

impl Default for EsaConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.esa.io".to_string(),
            access_token: String::new(),
            team_name: String::new(),
            category: "Survey".to_string(),
            per_page: 100,
            timeout_secs: 30,
            rate_limit_per_sec: 5,
            max_retries: 3,
        }
    }
}

impl EsaConfig {
    /// Create a new configuration with the minimum required parameters
    pub fn new(team_name: &str, access_token: impl Into<String>) -> Self {
        Self {
            team_name: normalize_team_name(team_name),
            access_token: access_token.into(),
            ..Default::default()
        }
    }

    /// Set the category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the API root
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the maximum retry attempts
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// One page of `GET /v1/teams/{team}/posts`
#[derive(Debug, Clone, Deserialize)]
pub struct EsaPostsPage {
    /// Posts on this page
    #[serde(default)]
    pub posts: Vec<EsaPost>,
    /// Next page number, absent on the last page
    #[serde(default)]
    pub next_page: Option<u32>,
    /// Total number of matching posts
    #[serde(default)]
    pub total_count: u64,
}

/// A post as returned by the esa.io API
#[derive(Debug, Clone, Deserialize)]
pub struct EsaPost {
    /// Post title
    pub name: String,
    /// Creation instant
    pub created_at: DateTime<FixedOffset>,
    /// Post URL
    pub url: String,
    /// Post number within the team
    pub number: u64,
    /// Creator, when the API reports one
    #[serde(default)]
    pub created_by: Option<EsaUser>,
}

/// Creator of a post
#[derive(Debug, Clone, Deserialize)]
pub struct EsaUser {
    /// Screen name
    pub screen_name: String,
}

impl EsaPost {
    fn author_name(&self) -> &str {
        self.created_by
            .as_ref()
            .map_or(UNKNOWN_AUTHOR, |user| user.screen_name.as_str())
    }

    fn into_post(self) -> Post {
        Post {
            title: self.name,
            created_at: self.created_at,
            url: self.url,
            post_number: self.number,
        }
    }
}

/// esa.io API client
#[derive(Debug, Clone)]
pub struct EsaClient {
    client: Client,
    config: EsaConfig,
    posts_url: Url,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
}

impl EsaClient {
    /// Create a new client with the given configuration
    pub fn new(config: EsaConfig) -> Result<Self> {
        if config.access_token.is_empty() || config.team_name.is_empty() {
            return Err(RankingError::config(
                "ESA_ACCESS_TOKEN and ESA_TEAM_NAME must both be set",
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RankingError::network_with_source("Failed to create HTTP client", e))?;

        let posts_url = Url::parse(&config.base_url)
            .and_then(|base| base.join(&format!("v1/teams/{}/posts", config.team_name)))
            .map_err(|e| RankingError::config_with_source("Invalid esa API base URL", e))?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.rate_limit_per_sec)
                .ok_or_else(|| RankingError::config("Rate limit must be greater than 0"))?,
        );
        let rate_limiter = Arc::new(DefaultDirectRateLimiter::direct(quota));

        Ok(Self {
            client,
            config,
            posts_url,
            rate_limiter,
        })
    }

    /// The configuration this client was built with
    #[must_use]
    pub const fn config(&self) -> &EsaConfig {
        &self.config
    }

    /// Send one page request, classifying the HTTP status.
    async fn request_page(&self, page: u32) -> Result<EsaPostsPage> {
        self.rate_limiter.until_ready().await;

        let query = [
            ("q", format!("in:{}", self.config.category)),
            ("page", page.to_string()),
            ("per_page", self.config.per_page.to_string()),
            ("sort", "created".to_string()),
            ("order", "desc".to_string()),
        ];

        let response = self
            .client
            .get(self.posts_url.clone())
            .bearer_auth(&self.config.access_token)
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json::<EsaPostsPage>().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            if status.is_server_error() {
                warn!(%status, "Server error, will retry");
            }
            Err(RankingError::esa_with_status(
                format!("API returned {status}: {body}"),
                status.as_u16(),
            ))
        }
    }

    /// Fetch one page of the configured category, retrying transient failures.
    #[instrument(skip(self), fields(category = %self.config.category))]
    pub async fn get_posts_page(&self, page: u32) -> Result<EsaPostsPage> {
        let strategy = ExponentialBackoff::from_millis(10)
            .max_delay(Duration::from_secs(10))
            .take(self.config.max_retries);

        debug!(page, "Fetching page");
        RetryIf::spawn(strategy, || self.request_page(page), RankingError::is_retryable).await
    }

    /// Fetch every post of the configured category and group them by author.
    ///
    /// Pages are walked until one comes back empty or has no `next_page`.
    #[instrument(skip(self), fields(team = %self.config.team_name))]
    pub async fn fetch_collection(&self) -> Result<PostCollection> {
        let mut by_author: IndexMap<String, Vec<Post>> = IndexMap::new();
        let mut total_count = None;
        let mut collected = 0usize;
        let mut page = 1;

        loop {
            let response = self.get_posts_page(page).await?;
            let total = *total_count.get_or_insert_with(|| {
                info!(total = response.total_count, "Total posts to fetch");
                response.total_count
            });

            if response.posts.is_empty() {
                debug!("No more posts found in this response");
                break;
            }

            collected += response.posts.len();
            for post in response.posts {
                by_author
                    .entry(post.author_name().to_string())
                    .or_default()
                    .push(post.into_post());
            }
            info!("Progress: {collected}/{total} posts collected");

            match response.next_page {
                Some(next) => page = next,
                None => {
                    debug!("No next page available");
                    break;
                }
            }
        }

        let collection = PostCollection::from_authors(
            by_author
                .into_iter()
                .map(|(name, posts)| Author::from_posts(name, posts)),
        );
        info!(
            authors = collection.total_authors,
            posts = collected,
            "Fetched posts from esa"
        );
        Ok(collection)
    }
}
