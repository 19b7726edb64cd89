//! Content fetching from listing URLs, files, and stdin.
//!
//! The [`Fetcher`] issues blocking GET requests with a bounded number of
//! attempts. Transport errors, timeouts, and non-success statuses are all
//! retried; once the bound is reached the caller gets
//! [`SiftError::RetriesExhausted`] carrying the last failure reason, which
//! keeps "nothing could be fetched" distinct from "an empty page was fetched".
//!
//! Paginated listings are fetched with [`Fetcher::fetch_pages`], one page at
//! a time with a fixed delay between requests. A page that cannot be fetched
//! is recorded in the [`FetchReport`] and left out of its pages.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::{Result, SiftError};

/// Listing fetched when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://news.ycombinator.com/news";

/// HTTP client configuration for fetching listing pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Listing URL that page indices are appended to.
    pub base_url: String,
    /// Query parameter carrying the page index.
    pub page_param: String,
    /// Total attempts per page before giving up (0 is treated as 1).
    pub max_attempts: u32,
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Pause between successive pages of a multi-page fetch.
    pub page_delay: Duration,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_param: "p".to_string(),
            max_attempts: 6,
            timeout: 3,
            page_delay: Duration::from_millis(75),
            user_agent: "Mozilla/5.0 (compatible; hnsift/0.1)".to_string(),
        }
    }
}

impl FetchConfig {
    /// Attempt bound with the zero case normalized.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Raw markup of one listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Zero-based page index within the fetch.
    pub index: usize,
    /// URL the page was retrieved from.
    pub url: String,
    /// Response body as text.
    pub body: String,
}

impl Page {
    /// Whether the server returned an empty body.
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}

/// A page of a multi-page fetch that could not be retrieved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageFailure {
    pub index: usize,
    pub url: String,
    pub attempts: u32,
    pub reason: String,
}

/// Outcome of a multi-page fetch.
///
/// `pages` holds the successful pages in index order; every page that failed
/// after exhausting its attempts appears in `failures` instead.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FetchReport {
    pub pages: Vec<Page>,
    pub failures: Vec<PageFailure>,
}

impl FetchReport {
    /// Whether every requested page failed.
    pub fn is_total_failure(&self) -> bool {
        self.pages.is_empty() && !self.failures.is_empty()
    }
}

/// A single GET against a URL.
///
/// Implementations report transport problems as retryable [`SiftError`]
/// variants (`HttpError`, `Timeout`, `Status`).
pub trait Transport {
    fn get(&self, url: &Url) -> Result<String>;
}

/// Blocking reqwest transport.
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    timeout: u64,
}

#[cfg(feature = "fetch")]
impl HttpTransport {
    /// Builds a client with the configured timeout and User-Agent.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let timeout = config.timeout.max(1);
        let client = reqwest::blocking::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(timeout))
            .build()?;

        Ok(Self { client, timeout })
    }

    /// Wraps an existing client; `timeout` is only used for error reporting.
    pub fn from_client(client: reqwest::blocking::Client, timeout: u64) -> Self {
        Self { client, timeout }
    }

    fn classify(&self, err: reqwest::Error) -> SiftError {
        if err.is_timeout() { SiftError::Timeout { timeout: self.timeout } } else { SiftError::HttpError(err) }
    }
}

#[cfg(feature = "fetch")]
impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.clone())
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SiftError::Status { status: status.as_u16() });
        }

        response.text().map_err(|e| self.classify(e))
    }
}

/// Retrying page fetcher.
///
/// The transport (and with it any pooled connections) lives exactly as long
/// as the Fetcher, so dropping it releases every socket on every exit path.
pub struct Fetcher<T: Transport> {
    config: FetchConfig,
    transport: T,
}

#[cfg(feature = "fetch")]
impl Fetcher<HttpTransport> {
    /// Creates a fetcher backed by a blocking reqwest client.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> Fetcher<T> {
    /// Creates a fetcher with a custom transport.
    pub fn with_transport(config: FetchConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches a single URL, retrying up to the attempt bound.
    ///
    /// # Errors
    ///
    /// - [`SiftError::InvalidUrl`] if `url` is not an absolute http(s) URL.
    /// - [`SiftError::RetriesExhausted`] once every attempt has failed.
    pub fn fetch(&self, url: &str) -> Result<Page> {
        let parsed = parse_http_url(url)?;
        let body = self.fetch_with_retry(&parsed)?;
        Ok(Page { index: 0, url: parsed.to_string(), body })
    }

    /// Fetches page `index` of the configured listing.
    pub fn fetch_page(&self, index: usize) -> Result<Page> {
        let url = page_url(&self.config.base_url, &self.config.page_param, index)?;
        let body = self.fetch_with_retry(&url)?;
        Ok(Page { index, url: url.to_string(), body })
    }

    /// Fetches pages `0..count` in order.
    ///
    /// Counts of zero or below are treated as one page. The configured
    /// `page_delay` separates successive requests.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::InvalidUrl`] up front if the base URL is unusable.
    /// Per-page failures never abort the run; they land in
    /// [`FetchReport::failures`].
    pub fn fetch_pages(&self, count: i64) -> Result<FetchReport> {
        parse_http_url(&self.config.base_url)?;
        let count = normalize_page_count(count);
        let mut report = FetchReport::default();

        for index in 0..count {
            if index > 0 && !self.config.page_delay.is_zero() {
                std::thread::sleep(self.config.page_delay);
            }

            match self.fetch_page(index) {
                Ok(page) => {
                    info!(page = index, bytes = page.body.len(), "fetched page");
                    report.pages.push(page);
                }
                Err(err) => {
                    warn!(page = index, error = %err, "skipping page");
                    report.failures.push(self.page_failure(index, &err));
                }
            }
        }

        Ok(report)
    }

    fn fetch_with_retry(&self, url: &Url) -> Result<String> {
        let attempts = self.config.attempts();
        let mut last_error: Option<SiftError> = None;

        for attempt in 1..=attempts {
            match self.transport.get(url) {
                Ok(body) => {
                    debug!(%url, attempt, "fetch succeeded");
                    return Ok(body);
                }
                Err(err) if err.is_retryable() => {
                    warn!(%url, attempt, max_attempts = attempts, error = %err, "fetch attempt failed");
                    last_error = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        Err(SiftError::RetriesExhausted {
            url: url.to_string(),
            attempts,
            reason: last_error.map(|e| e.to_string()).unwrap_or_default(),
        })
    }

    fn page_failure(&self, index: usize, err: &SiftError) -> PageFailure {
        match err {
            SiftError::RetriesExhausted { url, attempts, reason } => {
                PageFailure { index, url: url.clone(), attempts: *attempts, reason: reason.clone() }
            }
            other => PageFailure {
                index,
                url: page_url(&self.config.base_url, &self.config.page_param, index)
                    .map(|u| u.to_string())
                    .unwrap_or_else(|_| self.config.base_url.clone()),
                attempts: 1,
                reason: other.to_string(),
            },
        }
    }
}

/// Fetches a URL with a fresh client that is dropped before returning.
///
/// # Example
///
/// ```rust,no_run
/// use hnsift_core::{FetchConfig, fetch_url};
///
/// let page = fetch_url("https://news.ycombinator.com/news?p=1", &FetchConfig::default())?;
/// println!("{} bytes", page.body.len());
/// # Ok::<(), hnsift_core::SiftError>(())
/// ```
#[cfg(feature = "fetch")]
pub fn fetch_url(url: &str, config: &FetchConfig) -> Result<Page> {
    Fetcher::new(config.clone())?.fetch(url)
}

/// Builds the URL of page `index`: `param` is replaced or appended in the query.
///
/// # Example
///
/// ```rust
/// use hnsift_core::fetch::page_url;
///
/// let url = page_url("https://news.ycombinator.com/news?p=0", "p", 2).unwrap();
/// assert_eq!(url.as_str(), "https://news.ycombinator.com/news?p=2");
/// ```
pub fn page_url(base: &str, param: &str, index: usize) -> Result<Url> {
    let mut url = parse_http_url(base)?;

    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != param)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut().clear().extend_pairs(retained).append_pair(param, &index.to_string());

    Ok(url)
}

/// Clamps a requested page count to at least one.
pub fn normalize_page_count(count: i64) -> usize {
    if count <= 0 { 1 } else { count as usize }
}

fn parse_http_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| SiftError::InvalidUrl(format!("{}: {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(SiftError::InvalidUrl(format!("unsupported scheme '{}' in {}", scheme, url))),
    }
}

/// Reads listing markup from a local file.
///
/// Callers should validate and sanitize the path when accepting user input.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(SiftError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(SiftError::from)
    }
}

/// Reads listing markup from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(SiftError::from)?;

    Ok(buffer)
}
