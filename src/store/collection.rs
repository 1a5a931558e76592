use crate::core::Document;
use std::collections::HashMap;

/// Records of one entity type, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    order: Vec<String>,
    records: HashMap<String, Document>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.records.get(id)
    }

    /// Insert a new record at the end, or replace an existing one in place.
    pub fn put(&mut self, id: String, doc: Document) {
        if !self.records.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.records.insert(id, doc);
    }

    pub fn remove(&mut self, id: &str) -> Option<Document> {
        let removed = self.records.remove(id)?;
        self.order.retain(|existing| existing != id);
        Some(removed)
    }

    /// Move a record to a new key, keeping its position.
    ///
    /// Returns false when `old` is missing or `new` is taken.
    pub fn relocate(&mut self, old: &str, new: &str, doc: Document) -> bool {
        if !self.records.contains_key(old) || self.records.contains_key(new) {
            return false;
        }
        self.records.remove(old);
        if let Some(slot) = self.order.iter_mut().find(|existing| *existing == old) {
            *slot = new.to_string();
        }
        self.records.insert(new.to_string(), doc);
        true
    }

    /// Records in insertion order, archived ones included.
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    pub fn ids(&self) -> &[String] {
        &self.order
    }
}
