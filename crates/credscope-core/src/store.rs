//! In-memory copy of the currently loaded page.

use credscope_models::{Record, Severity};

/// Records of the current page, in server order. Mutations target a
/// single record by id and are applied only after the backend has
/// confirmed the corresponding call.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Swap in a freshly fetched page.
    pub fn replace(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    pub fn get(&self, id: i64) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn set_validity(&mut self, id: i64, valid: bool) {
        if let Some(record) = self.records.iter_mut().find(|record| record.id == id) {
            record.valid = valid;
        }
    }

    pub fn set_severity(&mut self, id: i64, severity: Severity) {
        if let Some(record) = self.records.iter_mut().find(|record| record.id == id) {
            record.severity = Some(severity);
        }
    }

    pub fn remove(&mut self, id: i64) {
        self.records.retain(|record| record.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64) -> Record {
        Record {
            id,
            url: "https://example.com".to_string(),
            email: format!("user{id}@mail.com"),
            password: "pw".to_string(),
            valid: false,
            severity: None,
        }
    }

    #[test]
    fn test_mutations_target_one_record() {
        let mut store = RecordStore::default();
        store.replace(vec![record(1), record(2), record(3)]);

        store.set_validity(2, true);
        store.set_severity(3, Severity::Grave);
        store.remove(1);

        assert_eq!(store.len(), 2);
        assert!(store.get(1).is_none());
        assert!(store.get(2).unwrap().valid);
        assert_eq!(store.get(3).unwrap().severity, Some(Severity::Grave));
        assert!(!store.get(3).unwrap().valid);
    }

    #[test]
    fn test_mutating_an_absent_id_is_a_noop() {
        let mut store = RecordStore::default();
        store.replace(vec![record(1)]);
        store.set_validity(99, true);
        store.remove(99);
        assert_eq!(store.len(), 1);
    }
}
