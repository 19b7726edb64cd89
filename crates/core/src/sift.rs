//! End-to-end pipeline: fetch → parse → select.
//!
//! The main entry point is [`Sifter`], along with the convenience functions
//! [`sift`] and [`fetch_and_sift`].
//!
//! # Example
//!
//! ```rust,no_run
//! use hnsift_core::{SelectConfig, SiftConfig, Sifter};
//!
//! let config = SiftConfig { select: SelectConfig::builder().threshold(200).build(), ..Default::default() };
//! let report = Sifter::with_config(config).fetch_and_sift(3)?;
//! for entry in &report.entries {
//!     println!("{:>5} {}", entry.score, entry.title);
//! }
//! # Ok::<(), hnsift_core::SiftError>(())
//! ```

use serde::Serialize;
use tracing::{debug, warn};

use crate::entry::Entry;
use crate::fetch::{FetchConfig, Page, PageFailure, Transport};
use crate::parse::Document;
use crate::select::{SelectConfig, Selectors, extract_with, filter_entries, order_entries};
use crate::{Fetcher, Result, SiftError};

/// Configuration for the whole pipeline.
#[derive(Debug, Clone, Default)]
pub struct SiftConfig {
    pub fetch: FetchConfig,
    pub select: SelectConfig,
}

/// Result of a fetch-and-sift run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SiftReport {
    /// Selected entries across every fetched page.
    pub entries: Vec<Entry>,
    /// Number of pages retrieved successfully.
    pub pages_fetched: usize,
    /// Pages that were skipped after exhausting their attempts.
    pub failures: Vec<PageFailure>,
}

impl SiftReport {
    /// Whether some, but not all, pages failed.
    pub fn is_partial(&self) -> bool {
        self.pages_fetched > 0 && !self.failures.is_empty()
    }
}

/// Runs listing markup through extraction and selection.
///
/// # Example
///
/// ```rust
/// use hnsift_core::Sifter;
///
/// let sifter = Sifter::new();
/// let entries = sifter.sift_html("").unwrap();
/// assert!(entries.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Sifter {
    config: SiftConfig,
}

impl Sifter {
    /// Creates a Sifter with default settings.
    pub fn new() -> Self {
        Self { config: SiftConfig::default() }
    }

    /// Creates a Sifter with a custom configuration.
    pub fn with_config(config: SiftConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SiftConfig {
        &self.config
    }

    /// Selects entries from one page of markup.
    pub fn sift_html(&self, markup: &str) -> Result<Vec<Entry>> {
        let doc = Document::parse(markup);
        crate::select::select_entries(&doc, &self.config.select)
    }

    /// Selects entries from several pages.
    ///
    /// Each page is filtered on its own, the results are concatenated in page
    /// order, and the combined list is ordered once. Ties across pages keep
    /// page order.
    pub fn sift_pages(&self, pages: &[Page]) -> Result<Vec<Entry>> {
        let select = &self.config.select;
        let selectors = Selectors::compile(select)?;
        let mut entries = Vec::new();

        for page in pages {
            let doc = Document::parse(&page.body);
            if doc.is_empty() {
                debug!(page = page.index, "page has no content");
                continue;
            }
            let kept = filter_entries(extract_with(&doc, &selectors), select.threshold);
            debug!(page = page.index, kept = kept.len(), "sifted page");
            entries.extend(kept);
        }

        Ok(if select.ordered { order_entries(entries, select.order) } else { entries })
    }

    /// Fetches `pages` listing pages over HTTP and sifts them.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::NoPagesFetched`] if no page could be retrieved.
    #[cfg(feature = "fetch")]
    pub fn fetch_and_sift(&self, pages: i64) -> Result<SiftReport> {
        let fetcher = Fetcher::new(self.config.fetch.clone())?;
        self.fetch_and_sift_with(&fetcher, pages)
    }

    /// Like [`Sifter::fetch_and_sift`], with a caller-supplied fetcher.
    ///
    /// The fetcher's own configuration governs the fetch.
    pub fn fetch_and_sift_with<T: Transport>(&self, fetcher: &Fetcher<T>, pages: i64) -> Result<SiftReport> {
        let report = fetcher.fetch_pages(pages)?;

        if report.is_total_failure() {
            let reason = report.failures.last().map(|f| f.reason.clone()).unwrap_or_default();
            return Err(SiftError::NoPagesFetched { failures: report.failures.len(), reason });
        }
        if !report.failures.is_empty() {
            warn!(failed = report.failures.len(), fetched = report.pages.len(), "partial fetch");
        }

        let entries = self.sift_pages(&report.pages)?;
        Ok(SiftReport { entries, pages_fetched: report.pages.len(), failures: report.failures })
    }
}

/// Sifts markup with the default configuration.
///
/// # Example
///
/// ```rust
/// let html = r#"<table>
///   <tr class="athing"><td class="title"><span class="titleline"><a href="https://a.example">A</a></span></td></tr>
///   <tr><td class="subtext"><span class="score">150 points</span></td></tr>
/// </table>"#;
/// let entries = hnsift_core::sift(html).unwrap();
/// assert_eq!(entries[0].title, "A");
/// ```
pub fn sift(markup: &str) -> Result<Vec<Entry>> {
    Sifter::new().sift_html(markup)
}

/// Fetches and sifts `pages` pages with the default configuration.
#[cfg(feature = "fetch")]
pub fn fetch_and_sift(pages: i64) -> Result<SiftReport> {
    Sifter::new().fetch_and_sift(pages)
}
