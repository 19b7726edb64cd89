//! HTML parsing and DOM querying.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing
//! listing markup and navigating it with CSS selectors.
//!
//! Parsing never fails. Empty or whitespace-only input yields
//! [`Document::Empty`], an explicit marker a caller can inspect. Everything
//! else is handed to the HTML5 parser, which recovers from malformed markup on
//! its own, so a real page without stories is still [`Document::Parsed`].
//!
//! # Example
//!
//! ```rust
//! use hnsift_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <a class="titlelink" href="https://example.com">Title</a>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html);
//! assert!(!doc.is_empty());
//! let links = doc.select("a.titlelink").unwrap();
//! assert_eq!(links.len(), 1);
//!
//! assert!(Document::parse("").is_empty());
//! ```

use scraper::{Html, Selector};

use crate::{Result, SiftError};

/// A parsed listing page, or the explicit empty-document marker.
#[derive(Debug, Clone)]
pub enum Document {
    /// No parseable content was supplied.
    Empty,
    /// Markup parsed into a queryable tree.
    Parsed(Html),
}

impl Document {
    /// Parses markup into a Document.
    ///
    /// Returns [`Document::Empty`] only for empty or whitespace-only input.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hnsift_core::parse::Document;
    ///
    /// assert!(Document::parse("   \n").is_empty());
    /// assert!(!Document::parse("<p>hello</p>").is_empty());
    /// ```
    pub fn parse(markup: &str) -> Self {
        if markup.trim().is_empty() {
            tracing::debug!("empty markup, using empty document");
            return Document::Empty;
        }

        let html = Html::parse_document(markup);
        if !html.errors.is_empty() {
            tracing::debug!(errors = html.errors.len(), "recovered from malformed markup");
        }

        Document::Parsed(html)
    }

    /// Whether this is the empty-document marker.
    pub fn is_empty(&self) -> bool {
        matches!(self, Document::Empty)
    }

    /// Gets the underlying `scraper::Html`, if any.
    pub fn html(&self) -> Option<&Html> {
        match self {
            Document::Empty => None,
            Document::Parsed(html) => Some(html),
        }
    }

    /// Number of parse errors the HTML parser recovered from.
    pub fn parse_error_count(&self) -> usize {
        self.html().map_or(0, |html| html.errors.len())
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hnsift_core::parse::Document;
    ///
    /// let html = r#"<span class="score">120 points</span><span class="score">80 points</span>"#;
    /// let doc = Document::parse(html);
    /// let scores = doc.select(".score").unwrap();
    /// assert_eq!(scores.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile_selector(selector)?;
        Ok(self.select_with(&sel))
    }

    /// Selects elements with a precompiled selector, in document order.
    pub fn select_with(&'_ self, selector: &Selector) -> Vec<Element<'_>> {
        match self {
            Document::Empty => Vec::new(),
            Document::Parsed(html) => html.select(selector).map(|el| Element { element: el }).collect(),
        }
    }

    /// Gets the title of the document.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.select_with(&selector).first().map(|el| el.text())
    }

    /// Gets all text content from the document.
    pub fn text_content(&self) -> String {
        match self {
            Document::Empty => String::new(),
            Document::Parsed(html) => html.root_element().text().collect(),
        }
    }
}

/// Compiles a CSS selector, mapping failures to [`SiftError::HtmlParseError`].
pub fn compile_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| SiftError::HtmlParseError(format!("Invalid selector '{}': {}", selector, e)))
}

/// A wrapper around scraper's ElementRef.
///
/// # Example
///
/// ```rust
/// use hnsift_core::parse::Document;
///
/// let html = r#"<a href="https://example.com">Link text</a>"#;
/// let doc = Document::parse(html);
/// let link = &doc.select("a").unwrap()[0];
///
/// assert_eq!(link.text(), "Link text");
/// assert_eq!(link.attr("href"), Some("https://example.com"));
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element.
    ///
    /// Returns the concatenation of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute.
    ///
    /// Returns `None` if the attribute is not present.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name of this element.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Whether this element matches a precompiled selector.
    pub fn is(&self, selector: &Selector) -> bool {
        selector.matches(&self.element)
    }

    /// Selects descendant elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::HtmlParseError`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = compile_selector(selector)?;
        Ok(self.element.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Returns the first descendant matching a precompiled selector.
    pub fn select_first(&self, selector: &Selector) -> Option<Element<'a>> {
        self.element.select(selector).next().map(|el| Element { element: el })
    }
}
