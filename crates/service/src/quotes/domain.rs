use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A single quote as stored on disk and returned over HTTP.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Quote {
    pub id: String,
    pub quote: String,
}

impl Quote {
    pub fn new(id: impl Into<String>, quote: impl Into<String>) -> Self {
        Self { id: id.into(), quote: quote.into() }
    }
}

/// Creation input: only the text, the id is assigned by the store.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NewQuote {
    pub quote: String,
}

/// Result of one step through the collection.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct NextQuote {
    #[serde(rename = "nextIndex")]
    pub next_index: usize,
    pub id: String,
    pub quote: String,
}

/// Next identifier: `count + 1`, bumped past any larger numeric id already present
/// so that ids stay unique after external edits of the data file.
/// When the largest id is already `u64::MAX`, the first free number above the
/// count is used instead.
pub fn next_id(existing: &[Quote]) -> String {
    let max_numeric = existing
        .iter()
        .filter_map(|q| q.id.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    let count = existing.len() as u64;
    match count.max(max_numeric).checked_add(1) {
        Some(id) => id.to_string(),
        None => {
            let taken: HashSet<&str> = existing.iter().map(|q| q.id.as_str()).collect();
            (count + 1..)
                .map(|n| n.to_string())
                .find(|id| !taken.contains(id.as_str()))
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_wire_format() {
        let q = Quote::new("1", "Ça va ✓");
        let json = serde_json::to_string(&q).unwrap();
        assert_eq!(json, r#"{"id":"1","quote":"Ça va ✓"}"#);
    }

    #[test]
    fn next_quote_uses_camel_case_index() {
        let n = NextQuote { next_index: 2, id: "2".into(), quote: "b".into() };
        let v = serde_json::to_value(&n).unwrap();
        assert_eq!(v, serde_json::json!({"nextIndex": 2, "id": "2", "quote": "b"}));
    }

    #[test]
    fn new_quote_requires_string_text() {
        assert!(serde_json::from_str::<NewQuote>(r#"{"quote":"hi"}"#).is_ok());
        assert!(serde_json::from_str::<NewQuote>(r#"{"quote":42}"#).is_err());
        assert!(serde_json::from_str::<NewQuote>(r#"{}"#).is_err());
    }

    #[test]
    fn next_id_is_sequential() {
        assert_eq!(next_id(&[]), "1");
        let two = vec![Quote::new("1", "a"), Quote::new("2", "b")];
        assert_eq!(next_id(&two), "3");
    }

    #[test]
    fn next_id_skips_past_gaps_and_ignores_non_numeric() {
        let gappy = vec![Quote::new("1", "a"), Quote::new("7", "b")];
        assert_eq!(next_id(&gappy), "8");
        let named = vec![Quote::new("alpha", "a"), Quote::new("beta", "b")];
        assert_eq!(next_id(&named), "3");
    }

    #[test]
    fn next_id_at_u64_max_picks_a_free_id() {
        let edge = vec![Quote::new(u64::MAX.to_string(), "edge")];
        assert_eq!(next_id(&edge), "2");

        let crowded = vec![
            Quote::new(u64::MAX.to_string(), "edge"),
            Quote::new("3", "a"),
            Quote::new("4", "b"),
        ];
        let id = next_id(&crowded);
        assert_eq!(id, "5");
        assert!(crowded.iter().all(|q| q.id != id));
    }
}
