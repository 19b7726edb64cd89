//! Story entry type and collection conversions.
//!
//! An [`Entry`] is one story pulled out of a listing page: its title, its
//! score, and the link the title points at. The canonical collection is an
//! ordered `Vec<Entry>`; [`keyed_entries`] converts it into the associative
//! shape when a caller needs one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One extracted story record.
///
/// A retained entry always has a non-empty `title` and `link`. `link` is the
/// raw `href` attribute and may be relative (`item?id=...`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    /// Title text, trimmed.
    pub title: String,

    /// Points parsed from the score indicator.
    pub score: u32,

    /// Link target of the title anchor.
    pub link: String,
}

impl Entry {
    /// Creates a new Entry from its components.
    pub fn new(title: impl Into<String>, score: u32, link: impl Into<String>) -> Self {
        Self { title: title.into(), score, link: link.into() }
    }

    /// Whether the link points off-site rather than at a local path.
    pub fn is_external(&self) -> bool {
        self.link.starts_with("http://") || self.link.starts_with("https://")
    }
}

/// Converts the canonical list into a map keyed by list position.
///
/// Keys are unique within one run and carry no meaning across runs. The map
/// iterates in list order, so an ordered list stays ordered.
pub fn keyed_entries(entries: Vec<Entry>) -> BTreeMap<usize, Entry> {
    entries.into_iter().enumerate().collect()
}
