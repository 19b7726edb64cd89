use crate::Result;
use crate::entry::{Entry, keyed_entries};
use serde::Serialize;

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Emit an object keyed by position instead of an array
    pub keyed: bool,
    /// Pretty print JSON output
    pub pretty: bool,
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    if pretty { Ok(serde_json::to_string_pretty(value)?) } else { Ok(serde_json::to_string(value)?) }
}

/// Convert entries to a JSON array of `{title, score, link}` objects
pub fn entries_to_json(entries: &[Entry], pretty: bool) -> Result<String> {
    to_json(entries, pretty)
}

/// Convert entries to a JSON object keyed by list position
pub fn keyed_entries_to_json(entries: &[Entry], pretty: bool) -> Result<String> {
    to_json(&keyed_entries(entries.to_vec()), pretty)
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, entries: &[Entry]) -> Result<String> {
        if self.config.keyed {
            keyed_entries_to_json(entries, self.config.pretty)
        } else {
            entries_to_json(entries, self.config.pretty)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Entry> {
        vec![
            Entry::new("Rust 2024 is out", 512, "https://blog.rust-lang.org"),
            Entry::new("Ask HN: \"Quotes\" in titles?", 130, "item?id=7"),
        ]
    }

    #[test]
    fn test_entries_to_json_array() {
        let json = entries_to_json(&sample(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["title"], "Rust 2024 is out");
        assert_eq!(array[0]["score"], 512);
        assert_eq!(array[1]["link"], "item?id=7");
    }

    #[test]
    fn test_entries_round_trip_through_json() {
        let json = entries_to_json(&sample(), true).unwrap();
        let parsed: Vec<Entry> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_keyed_json_object() {
        let json = keyed_entries_to_json(&sample(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["0"]["score"], 512);
        assert_eq!(object["1"]["title"], "Ask HN: \"Quotes\" in titles?");
    }

    #[test]
    fn test_empty_entries() {
        assert_eq!(entries_to_json(&[], false).unwrap(), "[]");
        assert_eq!(keyed_entries_to_json(&[], false).unwrap(), "{}");
    }

    #[test]
    fn test_pretty_output() {
        let formatter = JsonFormatter::new(JsonConfig { pretty: true, ..Default::default() });
        let json = formatter.convert(&sample()).unwrap();
        assert!(json.contains('\n'));
        assert!(json.starts_with('['));
    }

    #[test]
    fn test_formatter_keyed() {
        let formatter = JsonFormatter::new(JsonConfig { keyed: true, pretty: false });
        let json = formatter.convert(&sample()).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.contains("\"0\":"));
    }
}
