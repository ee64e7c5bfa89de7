// 🗃️ Record Store - In-memory ordered collection owned by one panel
//
// Order is insertion order, except that user-created records go to the
// front. Nothing else reorders the store.

use super::record::EntityRecord;

/// Category filter sentinel meaning "no category restriction"
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<EntityRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        RecordStore {
            records: Vec::new(),
        }
    }

    /// Build a store from seed records, keeping their order
    pub fn from_records(records: Vec<EntityRecord>) -> Self {
        RecordStore { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityRecord> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut EntityRecord> {
        self.records.iter_mut()
    }

    pub fn first(&self) -> Option<&EntityRecord> {
        self.records.first()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&EntityRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut EntityRecord> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    pub fn insert_front(&mut self, record: EntityRecord) -> &mut EntityRecord {
        self.records.insert(0, record);
        &mut self.records[0]
    }

    /// Remove by identity. No tombstone is kept.
    pub fn remove(&mut self, id: &str) -> Option<EntityRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    /// Full scan: text matches id or title (case-insensitive), AND the
    /// category matches exactly unless it is `ALL_CATEGORIES`.
    pub fn filter(&self, text: &str, category: &str) -> Vec<&EntityRecord> {
        let needle = text.trim().to_lowercase();
        self.records
            .iter()
            .filter(|r| r.matches_text(&needle))
            .filter(|r| category == ALL_CATEGORIES || r.category == category)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str, category: &str, score: f64) -> EntityRecord {
        let mut r = EntityRecord::new(id.to_string(), title, category);
        r.score = score;
        r
    }

    fn ids(records: &[&EntityRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_empty_filter_returns_everything_in_order() {
        let store = RecordStore::from_records(vec![
            record("A", "Alpha", "x", 1.0),
            record("B", "Beta", "y", 2.0),
            record("C", "Gamma", "x", 3.0),
        ]);

        assert_eq!(ids(&store.filter("", ALL_CATEGORIES)), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_category_filter_is_exact() {
        let store = RecordStore::from_records(vec![
            record("A", "Alpha", "categoryX", 92.0),
            record("B", "Beta", "categoryY", 40.0),
        ]);

        let result = store.filter("", "categoryX");
        assert_eq!(ids(&result), vec!["A"]);
        assert_eq!(result[0].score, 92.0);

        assert!(store.filter("", "category").is_empty());
    }

    #[test]
    fn test_text_and_category_are_anded() {
        let store = RecordStore::from_records(vec![
            record("A-1", "Forbidden City", "vr", 0.0),
            record("A-2", "Forbidden City Album", "print", 0.0),
            record("A-3", "Sanxingdui", "vr", 0.0),
        ]);

        assert_eq!(ids(&store.filter("FORBIDDEN", "vr")), vec!["A-1"]);
        assert_eq!(ids(&store.filter("a-3", ALL_CATEGORIES)), vec!["A-3"]);
        assert!(store.filter("nothing", ALL_CATEGORIES).is_empty());
    }

    #[test]
    fn test_insert_front_and_remove() {
        let mut store = RecordStore::from_records(vec![record("A", "a", "x", 0.0)]);
        store.insert_front(record("N", "new", "x", 0.0));

        assert_eq!(store.first().unwrap().id, "N");
        assert_eq!(store.len(), 2);

        let removed = store.remove("A").unwrap();
        assert_eq!(removed.id, "A");
        assert!(!store.contains("A"));
        assert!(store.remove("A").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_filter_does_not_mutate() {
        let store = RecordStore::from_records(vec![record("A", "a", "x", 0.0), record("B", "b", "y", 0.0)]);
        for _ in 0..3 {
            store.filter("a", "x");
        }
        assert_eq!(ids(&store.filter("", ALL_CATEGORIES)), vec!["A", "B"]);
    }
}
