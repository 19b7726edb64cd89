use crate::entry::Entry;

const HEADER: &str = "Title | Points | Link";

/// Configuration for plain text output
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// Prefix each row with its 1-based rank
    pub numbered: bool,

    /// Include the column header line
    pub include_header: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { numbered: false, include_header: true }
    }
}

/// Plain text formatter for entry listings
pub struct TextFormatter {
    config: TextConfig,
}

impl TextFormatter {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    /// Convert entries to plain text
    pub fn convert(&self, entries: &[Entry]) -> String {
        convert_to_text(entries, &self.config)
    }
}

/// Convert entries to plain text, one `title | score | link` row per entry
pub fn convert_to_text(entries: &[Entry], config: &TextConfig) -> String {
    let mut output = String::new();

    if config.include_header {
        output.push_str(HEADER);
        output.push('\n');
    }

    let width = entries.len().to_string().len();
    for (index, entry) in entries.iter().enumerate() {
        if config.numbered {
            output.push_str(&format!("{:>width$}. ", index + 1, width = width));
        }
        output.push_str(&format!("{} | {} | {}\n", single_line(&entry.title), entry.score, entry.link));
    }

    output
}

/// Collapse internal whitespace so a title never spans rows
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Entry> {
        vec![Entry::new("First story", 300, "https://first.example"), Entry::new("Second story", 150, "item?id=2")]
    }

    #[test]
    fn test_header_and_rows() {
        let text = convert_to_text(&sample(), &TextConfig::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Title | Points | Link");
        assert_eq!(lines[1], "First story | 300 | https://first.example");
        assert_eq!(lines[2], "Second story | 150 | item?id=2");
    }

    #[test]
    fn test_without_header() {
        let config = TextConfig { include_header: false, ..Default::default() };
        let text = convert_to_text(&sample(), &config);
        assert!(text.starts_with("First story"));
    }

    #[test]
    fn test_numbered_rows() {
        let config = TextConfig { numbered: true, include_header: false };
        let text = TextFormatter::new(config).convert(&sample());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "1. First story | 300 | https://first.example");
        assert_eq!(lines[1], "2. Second story | 150 | item?id=2");
    }

    #[test]
    fn test_multiline_title_is_collapsed() {
        let entries = vec![Entry::new("Broken\n   across   lines", 120, "x")];
        let config = TextConfig { include_header: false, ..Default::default() };
        assert_eq!(convert_to_text(&entries, &config), "Broken across lines | 120 | x\n");
    }

    #[test]
    fn test_empty_entries_only_header() {
        assert_eq!(convert_to_text(&[], &TextConfig::default()), "Title | Points | Link\n");
    }
}
