//! Caching and retrying wrapper around the GraphQL client.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use spacelaunch_api::types::{GraphQlResponse, Launch, LaunchListData};
use spacelaunch_api::{Client, LaunchListQuery};

use crate::cache::MemoryCache;
use crate::error::SpaceLaunchError;
use crate::pagination::{Page, PageRequest, PageSource};

/// GraphQL client wrapper that adds an in-memory response cache and
/// retry with exponential backoff for transport failures.
///
/// Cache hits bypass the network entirely. Only responses without GraphQL
/// errors are cached.
pub struct CachedClient {
    inner: Client,
    cache: MemoryCache,
    retry: RetryConfig,
}

/// Backoff settings for transport retries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryConfig {
    pub max_retries: usize,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 500,
            max_delay_ms: 8000,
        }
    }
}

impl RetryConfig {
    /// Reads `SPACELAUNCH_RETRY_MAX`, `SPACELAUNCH_RETRY_BASE_MS` and
    /// `SPACELAUNCH_RETRY_MAX_MS`, falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_retries: env_usize("SPACELAUNCH_RETRY_MAX", defaults.max_retries),
            base_delay_ms: env_u64("SPACELAUNCH_RETRY_BASE_MS", defaults.base_delay_ms),
            max_delay_ms: env_u64("SPACELAUNCH_RETRY_MAX_MS", defaults.max_delay_ms),
        }
    }

    fn delay_for_attempt(&self, attempt: usize) -> Duration {
        let shift = (attempt.saturating_sub(1)).min(30) as u32;
        let exp = 1u64 << shift;
        let base = self
            .base_delay_ms
            .saturating_mul(exp)
            .min(self.max_delay_ms);
        let jitter = rand::thread_rng().gen_range(0.8..1.2);
        Duration::from_millis((base as f64 * jitter) as u64)
    }
}

impl CachedClient {
    /// Creates a new cached client using the public tutorial endpoint.
    pub fn new(cache: MemoryCache) -> Self {
        Self {
            inner: Client::new(),
            cache,
            retry: RetryConfig::from_env(),
        }
    }

    /// Creates a new cached client with a custom endpoint.
    pub fn with_base_url(base_url: &str, cache: MemoryCache) -> Self {
        Self {
            inner: Client::with_base_url(base_url),
            cache,
            retry: RetryConfig::from_env(),
        }
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }

    async fn with_retry<T, F, Fut>(&self, label: &str, mut f: F) -> Result<T, SpaceLaunchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, SpaceLaunchError>>,
    {
        let mut attempt = 0usize;
        loop {
            match f().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    attempt += 1;
                    if attempt > self.retry.max_retries || !is_retryable(&err) {
                        return Err(err);
                    }
                    let delay = self.retry.delay_for_attempt(attempt);
                    tracing::warn!(
                        "{} request failed (attempt {}/{}), retrying in {:.1}s",
                        label,
                        attempt,
                        self.retry.max_retries,
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Executes `LaunchList`, returning cached results when available.
    pub async fn get_launches(
        &self,
        query: &LaunchListQuery,
    ) -> Result<GraphQlResponse<LaunchListData>, SpaceLaunchError> {
        let cache_key = query_to_cache_key(query);

        if let Some(cached) = self.cache.get(&cache_key) {
            tracing::debug!("cache hit for {}", cache_key);
            let resp: GraphQlResponse<LaunchListData> = serde_json::from_str(&cached)
                .map_err(|e| SpaceLaunchError::Cache(format!("{}: {}", cache_key, e)))?;
            return Ok(resp);
        }

        let resp = self
            .with_retry("launches", || async {
                Ok(self.inner.get_launches(query).await?)
            })
            .await?;
        if resp.errors.is_none() {
            if let Ok(json) = serde_json::to_string(&resp) {
                self.cache.set(cache_key, json);
            }
        }
        Ok(resp)
    }

    /// Removes all entries from the cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl PageSource for CachedClient {
    type Item = Launch;
    type Error = SpaceLaunchError;

    fn fetch_page(
        &self,
        request: PageRequest,
    ) -> impl Future<Output = Result<Page<Launch>, SpaceLaunchError>> + Send {
        async move {
            let mut query = LaunchListQuery::default().with_cursor(request.cursor.as_deref());
            if let Some(page_size) = request.page_size {
                query = query.with_page_size(page_size);
            }
            let resp = self.get_launches(&query).await?;
            into_page(resp)
        }
    }
}

/// Turns a response envelope into a page. Field errors ride along with the
/// data; a response without data is a failed fetch.
fn into_page(resp: GraphQlResponse<LaunchListData>) -> Result<Page<Launch>, SpaceLaunchError> {
    let message = resp.error_message();
    let errors = resp
        .errors
        .unwrap_or_default()
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>();
    match resp.data {
        Some(data) => {
            let connection = data.launches;
            let cursor = connection.cursor.clone();
            let has_more = connection.has_more;
            Ok(Page::new(connection.into_launches(), cursor, has_more).with_errors(errors))
        }
        None => Err(SpaceLaunchError::Api(spacelaunch_api::Error::GraphQl(
            message.unwrap_or_else(|| "response carried no data".to_string()),
        ))),
    }
}

fn is_retryable(err: &SpaceLaunchError) -> bool {
    match err {
        SpaceLaunchError::Api(api_err) => match api_err {
            spacelaunch_api::Error::RequestFailed => true,
            spacelaunch_api::Error::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            spacelaunch_api::Error::GraphQl(_) => false,
        },
        _ => false,
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .unwrap_or(default)
}

fn query_to_cache_key(query: &LaunchListQuery) -> String {
    format!("launches:{:?}:{:?}", query.cursor, query.page_size)
}
