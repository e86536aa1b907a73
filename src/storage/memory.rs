//! DashMap-backed record store

use dashmap::DashMap;
use uuid::Uuid;

/// A concurrent in-memory store of records keyed by UUID.
pub struct MemoryStore<T> {
    records: DashMap<Uuid, T>,
}

impl<T: Clone> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Insert or replace a record.
    pub fn insert(&self, id: Uuid, record: T) {
        self.records.insert(id, record);
    }

    /// Find a record by ID.
    pub fn get(&self, id: &Uuid) -> Option<T> {
        self.records.get(id).map(|r| r.clone())
    }

    /// Apply a mutation to a record in place. Returns the updated record,
    /// or `None` when the ID is absent.
    pub fn update<F>(&self, id: &Uuid, mutate: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        self.records.get_mut(id).map(|mut r| {
            mutate(&mut r);
            r.clone()
        })
    }

    /// Remove a record by ID, returning it if present.
    pub fn remove(&self, id: &Uuid) -> Option<T> {
        self.records.remove(id).map(|(_, r)| r)
    }

    /// All records matching a predicate (foreign-key style lookup).
    pub fn filter<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.records
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: Clone> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        doc_id: Uuid,
        text: String,
    }

    #[test]
    fn insert_get_remove_roundtrip() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        let note = Note {
            doc_id: Uuid::new_v4(),
            text: "hello".into(),
        };

        store.insert(id, note.clone());
        assert_eq!(store.get(&id), Some(note.clone()));
        assert_eq!(store.len(), 1);

        assert_eq!(store.remove(&id), Some(note));
        assert!(store.get(&id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn update_mutates_in_place() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        store.insert(
            id,
            Note {
                doc_id: Uuid::new_v4(),
                text: "before".into(),
            },
        );

        let updated = store.update(&id, |n| n.text = "after".into()).unwrap();
        assert_eq!(updated.text, "after");
        assert_eq!(store.get(&id).unwrap().text, "after");

        assert!(store.update(&Uuid::new_v4(), |n| n.text.clear()).is_none());
    }

    #[test]
    fn filter_matches_foreign_key() {
        let store = MemoryStore::new();
        let doc_a = Uuid::new_v4();
        let doc_b = Uuid::new_v4();

        for i in 0..3 {
            store.insert(
                Uuid::new_v4(),
                Note {
                    doc_id: doc_a,
                    text: format!("a{}", i),
                },
            );
        }
        store.insert(
            Uuid::new_v4(),
            Note {
                doc_id: doc_b,
                text: "b0".into(),
            },
        );

        let matches = store.filter(|n| n.doc_id == doc_a);
        assert_eq!(matches.len(), 3);
        assert!(matches.iter().all(|n| n.doc_id == doc_a));
    }
}
