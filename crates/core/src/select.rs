//! Story selection: locate entries, apply the score threshold, order them.
//!
//! Entries are found structurally. Every title anchor opens a pending story,
//! and the next subtext container in document order closes it. A title whose
//! subtext never shows up is dropped instead of borrowing the following
//! story's score. Inside the subtext the score indicator is optional, and a
//! story without one is left out entirely rather than scored as zero.
//!
//! # Example
//!
//! ```rust
//! use hnsift_core::{Document, SelectConfig, select_entries};
//!
//! let html = r#"<table>
//!   <tr class="athing"><td class="title"><a class="titlelink" href="https://a.example">A</a></td></tr>
//!   <tr><td class="subtext"><span class="score">120 points</span></td></tr>
//!   <tr class="athing"><td class="title"><a class="titlelink" href="https://b.example">B</a></td></tr>
//!   <tr><td class="subtext"><span class="score">80 points</span></td></tr>
//! </table>"#;
//!
//! let doc = Document::parse(html);
//! let entries = select_entries(&doc, &SelectConfig::default()).unwrap();
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].score, 120);
//! ```

use std::sync::LazyLock;

use regex::Regex;
use scraper::Selector;
use tracing::debug;

use crate::Result;
use crate::entry::Entry;
use crate::parse::{Document, Element, compile_selector};

/// Story title anchors, old (`a.titlelink`) and current (`span.titleline > a`) markup.
pub const DEFAULT_TITLE_SELECTOR: &str = "a.titlelink, span.titleline > a";

/// Metadata row following each title.
pub const DEFAULT_SUBTEXT_SELECTOR: &str = "td.subtext";

/// Score indicator inside the subtext, e.g. `<span class="score">83 points</span>`.
pub const DEFAULT_SCORE_SELECTOR: &str = ".score";

static SCORE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\b").expect("score token pattern is valid"));

/// Direction of the score sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Highest score first.
    #[default]
    Descending,
    /// Lowest score first.
    Ascending,
}

/// Configuration for entry selection.
///
/// # Example
///
/// ```rust
/// use hnsift_core::{SelectConfig, SortOrder};
///
/// let config = SelectConfig::builder()
///     .threshold(250)
///     .order(SortOrder::Ascending)
///     .build();
/// assert_eq!(config.threshold, 250);
/// assert!(config.ordered);
/// ```
#[derive(Debug, Clone)]
pub struct SelectConfig {
    /// Minimum score kept; entries strictly below are dropped (default: 100).
    pub threshold: u32,

    /// Sort by score; otherwise keep document order (default: true).
    pub ordered: bool,

    /// Sort direction when `ordered` is set (default: descending).
    pub order: SortOrder,

    /// Selector for story title anchors.
    pub title_selector: String,

    /// Selector for the metadata container after each title.
    pub subtext_selector: String,

    /// Selector for the score indicator within the subtext.
    pub score_selector: String,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            threshold: 100,
            ordered: true,
            order: SortOrder::Descending,
            title_selector: DEFAULT_TITLE_SELECTOR.to_string(),
            subtext_selector: DEFAULT_SUBTEXT_SELECTOR.to_string(),
            score_selector: DEFAULT_SCORE_SELECTOR.to_string(),
        }
    }
}

impl SelectConfig {
    /// Creates a new builder for SelectConfig.
    pub fn builder() -> SelectConfigBuilder {
        SelectConfigBuilder::new()
    }
}

/// Builder for SelectConfig.
pub struct SelectConfigBuilder {
    config: SelectConfig,
}

impl SelectConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: SelectConfig::default() }
    }

    /// Sets the minimum score threshold.
    pub fn threshold(mut self, value: u32) -> Self {
        self.config.threshold = value;
        self
    }

    /// Sets whether output is sorted by score.
    pub fn ordered(mut self, value: bool) -> Self {
        self.config.ordered = value;
        self
    }

    /// Sets the sort direction.
    pub fn order(mut self, value: SortOrder) -> Self {
        self.config.order = value;
        self
    }

    /// Sets the title anchor selector.
    pub fn title_selector(mut self, value: impl Into<String>) -> Self {
        self.config.title_selector = value.into();
        self
    }

    /// Sets the subtext container selector.
    pub fn subtext_selector(mut self, value: impl Into<String>) -> Self {
        self.config.subtext_selector = value.into();
        self
    }

    /// Sets the score indicator selector.
    pub fn score_selector(mut self, value: impl Into<String>) -> Self {
        self.config.score_selector = value.into();
        self
    }

    /// Builds the config.
    pub fn build(self) -> SelectConfig {
        self.config
    }
}

impl Default for SelectConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) struct Selectors {
    title: Selector,
    score: Selector,
    title_or_subtext: Selector,
}

impl Selectors {
    pub(crate) fn compile(config: &SelectConfig) -> Result<Self> {
        // validate each part on its own so errors name the offending selector
        let title = compile_selector(&config.title_selector)?;
        compile_selector(&config.subtext_selector)?;
        let score = compile_selector(&config.score_selector)?;
        let title_or_subtext = compile_selector(&format!("{}, {}", config.title_selector, config.subtext_selector))?;

        Ok(Self { title, score, title_or_subtext })
    }
}

/// Extracts, filters, and orders entries in one pass.
///
/// Returns an empty list for [`Document::Empty`].
///
/// # Errors
///
/// Returns [`SiftError::HtmlParseError`](crate::SiftError::HtmlParseError)
/// if a configured selector is invalid.
pub fn select_entries(doc: &Document, config: &SelectConfig) -> Result<Vec<Entry>> {
    let entries = extract_entries(doc, config)?;
    let entries = filter_entries(entries, config.threshold);

    Ok(if config.ordered { order_entries(entries, config.order) } else { entries })
}

/// Extracts every scored entry in document order, without a threshold.
pub fn extract_entries(doc: &Document, config: &SelectConfig) -> Result<Vec<Entry>> {
    let selectors = Selectors::compile(config)?;
    Ok(extract_with(doc, &selectors))
}

pub(crate) fn extract_with(doc: &Document, selectors: &Selectors) -> Vec<Entry> {
    if doc.is_empty() {
        return Vec::new();
    }

    let mut entries = Vec::new();
    let mut pending: Option<Element<'_>> = None;

    for element in doc.select_with(&selectors.title_or_subtext) {
        if element.is(&selectors.title) {
            if let Some(orphan) = pending.replace(element) {
                debug!(title = orphan.text().trim(), "title without subtext, skipping");
            }
        } else if let Some(title) = pending.take()
            && let Some(entry) = build_entry(&title, &element, &selectors.score)
        {
            entries.push(entry);
        }
    }

    entries
}

/// Keeps entries whose score is at least `threshold`.
pub fn filter_entries(entries: Vec<Entry>, threshold: u32) -> Vec<Entry> {
    entries.into_iter().filter(|entry| entry.score >= threshold).collect()
}

/// Sorts entries by score. The sort is stable: equal scores keep their order.
pub fn order_entries(mut entries: Vec<Entry>, order: SortOrder) -> Vec<Entry> {
    match order {
        SortOrder::Descending => entries.sort_by(|a, b| b.score.cmp(&a.score)),
        SortOrder::Ascending => entries.sort_by(|a, b| a.score.cmp(&b.score)),
    }
    entries
}

/// Parses the leading integer of a score indicator (`"83 points"` → 83).
///
/// Returns `None` when there is no leading number or it does not fit a `u32`.
pub fn parse_score(text: &str) -> Option<u32> {
    SCORE_TOKEN.captures(text).and_then(|caps| caps[1].parse().ok())
}

fn build_entry(title: &Element<'_>, subtext: &Element<'_>, score_selector: &Selector) -> Option<Entry> {
    let title_text = title.text();
    let title_text = title_text.trim();

    let Some(indicator) = subtext.select_first(score_selector) else {
        debug!(title = title_text, "no score indicator, skipping");
        return None;
    };

    let Some(score) = parse_score(&indicator.text()) else {
        debug!(title = title_text, indicator = indicator.text().trim(), "unparseable score, skipping");
        return None;
    };

    let link = title.attr("href").map(str::trim).unwrap_or_default();
    if title_text.is_empty() || link.is_empty() {
        debug!(title = title_text, "missing title or link, skipping");
        return None;
    }

    Some(Entry::new(title_text, score, link))
}
