//! Blackboard shared by the steps of one pipeline run.
//!
//! Plain string slots keyed by name. The last writer of a key wins; every
//! entry remembers which agent wrote it and when.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// A single blackboard slot with metadata
#[derive(Debug, Clone)]
pub struct BlackboardEntry {
    pub value: String,
    /// Agent (or "user") that wrote the value
    pub writer: String,
    pub written_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct Blackboard {
    entries: HashMap<String, BlackboardEntry>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a value, returning the entry it replaced
    pub fn set(
        &mut self,
        key: &str,
        value: impl Into<String>,
        writer: &str,
    ) -> Option<BlackboardEntry> {
        let value = value.into();
        let previous = self.entries.insert(
            key.to_string(),
            BlackboardEntry {
                value,
                writer: writer.to_string(),
                written_at: Utc::now(),
            },
        );
        match &previous {
            Some(old) => log::info!(
                "[BLACKBOARD] '{}' overwritten by '{}' (previous writer '{}')",
                key,
                writer,
                old.writer
            ),
            None => log::info!("[BLACKBOARD] '{}' written by '{}'", key, writer),
        }
        previous
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|e| e.value.as_str())
    }

    pub fn get_entry(&self, key: &str) -> Option<&BlackboardEntry> {
        self.entries.get(key)
    }

    /// All keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get() {
        let mut board = Blackboard::new();
        assert_eq!(board.len(), 0);

        board.set("destination_research", "Lisbon notes", "destination_research_agent");

        assert_eq!(board.get("destination_research"), Some("Lisbon notes"));
        assert!(board.get_entry("destination_research").is_some());
        assert_eq!(board.get("travel_itinerary"), None);
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_last_writer_wins() {
        let mut board = Blackboard::new();
        board.set("travel_itinerary", "draft", "itinerary_builder_agent");

        let previous = board
            .set("travel_itinerary", "final", "travel_optimizer_agent")
            .unwrap();

        assert_eq!(previous.value, "draft");
        assert_eq!(previous.writer, "itinerary_builder_agent");
        assert_eq!(board.get("travel_itinerary"), Some("final"));
        assert_eq!(
            board.get_entry("travel_itinerary").unwrap().writer,
            "travel_optimizer_agent"
        );
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_keys_sorted() {
        let mut board = Blackboard::new();
        board.set("b", "2", "x");
        board.set("a", "1", "x");
        assert_eq!(board.keys(), vec!["a".to_string(), "b".to_string()]);
    }
}
