use crate::entry::Entry;
use url::Url;

/// Configuration for Markdown conversion
#[derive(Debug, Clone, Default)]
pub struct MarkdownConfig {
    /// Heading placed above the list
    pub heading: Option<String>,
    /// Base URL used to resolve relative links (`item?id=...`)
    pub base_url: Option<Url>,
}

/// Convert entries to a Markdown bullet list: `- [title](link) (N points)`
pub fn convert_to_markdown(entries: &[Entry], config: &MarkdownConfig) -> String {
    let mut output = String::new();

    if let Some(heading) = &config.heading {
        output.push_str(&format!("# {}\n\n", heading));
    }

    for entry in entries {
        let link = resolve_link(&entry.link, config.base_url.as_ref());
        output.push_str(&format!(
            "- [{}]({}) ({} {})\n",
            escape_markdown(&entry.title),
            link,
            entry.score,
            if entry.score == 1 { "point" } else { "points" }
        ));
    }

    output
}

/// Resolve a possibly relative link against the base URL
fn resolve_link(link: &str, base_url: Option<&Url>) -> String {
    match base_url {
        Some(base) => base.join(link).map(|u| u.to_string()).unwrap_or_else(|_| link.to_string()),
        None => link.to_string(),
    }
}

/// Escape characters that would break link text
fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '[' | ']' | '\\' | '*' | '_' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Markdown formatter for entry listings
pub struct MarkdownFormatter {
    config: MarkdownConfig,
}

impl MarkdownFormatter {
    pub fn new(config: MarkdownConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, entries: &[Entry]) -> String {
        convert_to_markdown(entries, &self.config)
    }
}
