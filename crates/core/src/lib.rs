pub mod entry;
pub mod error;
pub mod fetch;
pub mod formatters;
pub mod parse;
pub mod select;
pub mod sift;

pub use entry::{Entry, keyed_entries};
pub use error::{Result, SiftError};
#[cfg(feature = "fetch")]
pub use fetch::{HttpTransport, fetch_url};
pub use fetch::{DEFAULT_BASE_URL, FetchConfig, FetchReport, Fetcher, Page, PageFailure, Transport};
pub use fetch::{fetch_file, fetch_stdin, normalize_page_count, page_url};
pub use formatters::{JsonConfig, JsonFormatter, MarkdownConfig, MarkdownFormatter, TextConfig, TextFormatter};
pub use formatters::{convert_to_markdown, convert_to_text, entries_to_json, keyed_entries_to_json};
pub use parse::{Document, Element};
pub use select::{SelectConfig, SelectConfigBuilder, SortOrder};
pub use select::{extract_entries, filter_entries, order_entries, parse_score, select_entries};
#[cfg(feature = "fetch")]
pub use sift::fetch_and_sift;
pub use sift::{SiftConfig, SiftReport, Sifter, sift};
