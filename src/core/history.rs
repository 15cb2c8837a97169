/// Session history: an append-only, insertion-ordered list of generated
/// records, alive for the session and nothing longer.
use crate::schema::record::{GeneratedRecord, RecordId};

/// Append-only store of records generated this session, oldest first.
///
/// There is no update or delete; records leave only when the session
/// ends. `&mut self` on `push` gives the single-writer discipline a
/// multi-threaded port would need a lock for.
#[derive(Debug, Clone, Default)]
pub struct SessionHistory {
    records: Vec<GeneratedRecord>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Duplicates are kept as distinct entries; the
    /// store never deduplicates.
    pub fn push(&mut self, record: GeneratedRecord) {
        self.records.push(record);
    }

    /// All records in insertion order, oldest first.
    pub fn list(&self) -> &[GeneratedRecord] {
        &self.records
    }

    /// Look up a record by id. Returns the oldest match if ids collide.
    pub fn find(&self, id: &RecordId) -> Option<&GeneratedRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::character::Character;
    use serde_json::json;

    fn record(id: &str, race: &str) -> GeneratedRecord {
        GeneratedRecord {
            id: RecordId(id.to_string()),
            character: Character::from_value(json!({
                "description": { "race": race },
            }))
            .unwrap(),
            created_at: None,
        }
    }

    #[test]
    fn list_preserves_insertion_order() {
        let mut history = SessionHistory::new();
        let a = record("a", "human");
        let b = record("b", "elf");
        history.push(a.clone());
        history.push(b.clone());
        assert_eq!(history.list(), &[a, b]);
    }

    #[test]
    fn list_is_stable_across_reads() {
        let mut history = SessionHistory::new();
        history.push(record("a", "human"));
        let first = history.list().to_vec();
        let second = history.list().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn find_by_id() {
        let mut history = SessionHistory::new();
        history.push(record("a", "human"));
        history.push(record("b", "elf"));
        let found = history.find(&RecordId("b".to_string())).unwrap();
        assert_eq!(found.character.race(), Some("elf"));
        assert!(history.find(&RecordId("missing".to_string())).is_none());
    }

    #[test]
    fn duplicate_ids_stay_distinct() {
        let mut history = SessionHistory::new();
        history.push(record("same", "human"));
        history.push(record("same", "elf"));
        assert_eq!(history.len(), 2);
        // find returns the oldest entry
        let found = history.find(&RecordId("same".to_string())).unwrap();
        assert_eq!(found.character.race(), Some("human"));
    }

    #[test]
    fn empty_history() {
        let history = SessionHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert!(history.list().is_empty());
    }
}
