//! Session-scoped document store.
//!
//! A [`Store`] is built at the start of a request from the session's data,
//! used synchronously, then dehydrated back with [`Store::to_json`]. Side
//! effects of every operation are confined to the one collection it names;
//! cleaning up references held elsewhere is the caller's job.

pub mod collection;
pub mod config;
pub mod patch;
pub mod repository;

pub use collection::Collection;
pub use config::StoreConfig;
pub use patch::Patch;
pub use repository::{Repository, RepositoryExt, decode};

use crate::core::types::{
    ARCHIVED_AT_FIELD, CREATED_AT_FIELD, CREATED_BY_FIELD, ID_FIELD, PROTECTED_FIELDS,
    UPDATED_AT_FIELD, UPDATED_BY_FIELD,
};
use crate::core::{Document, Result, StoreError, new_token};
use crate::model::{DeletePolicy, Entity};
use chrono::Utc;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Listing options for [`Store::find_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub include_archived: bool,
}

impl FindOptions {
    pub fn with_archived() -> Self {
        Self {
            include_archived: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Store {
    config: StoreConfig,
    collections: BTreeMap<String, Collection>,
}

impl Store {
    pub fn new(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            collections: BTreeMap::new(),
        })
    }

    /// Rehydrate a store from `{ collection: { id: record } }` session data.
    ///
    /// A collection may also be given as an array of records. Object order
    /// becomes insertion order. Records without an `id` take their key, or a
    /// generated ID when they came from an array.
    pub fn from_json(data: Value, config: StoreConfig) -> Result<Self> {
        let mut store = Self::new(config)?;
        let Value::Object(collections) = data else {
            return Err(StoreError::Serialization(
                "store data must be a JSON object".to_string(),
            ));
        };

        for (name, records) in collections {
            let entries: Vec<(Option<String>, Value)> = match records {
                Value::Object(map) => map.into_iter().map(|(k, v)| (Some(k), v)).collect(),
                Value::Array(items) => items.into_iter().map(|v| (None, v)).collect(),
                other => {
                    return Err(StoreError::Serialization(format!(
                        "collection '{}' must be an object or array, got {}",
                        name,
                        patch::json_type_name(&other)
                    )));
                }
            };

            for (key, record) in entries {
                let Value::Object(mut doc) = record else {
                    return Err(StoreError::Serialization(format!(
                        "record in collection '{}' must be an object",
                        name
                    )));
                };
                let id = store.resolve_seed_id(&name, key, &doc);
                doc.insert(ID_FIELD.to_string(), Value::String(id.clone()));
                store.insert_new(&name, id, doc)?;
            }
        }

        Ok(store)
    }

    /// Dehydrate to `{ collection: { id: record } }`, preserving insertion order.
    pub fn to_json(&self) -> Value {
        let mut data = serde_json::Map::new();
        for (name, collection) in &self.collections {
            let mut records = serde_json::Map::new();
            for id in collection.ids() {
                if let Some(doc) = collection.get(id) {
                    records.insert(id.clone(), Value::Object(doc.clone()));
                }
            }
            data.insert(name.clone(), Value::Object(records));
        }
        Value::Object(data)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn collection_names(&self) -> Vec<&str> {
        self.collections.keys().map(String::as_str).collect()
    }

    /// Number of records in a collection, archived ones included.
    pub fn len(&self, collection: &str) -> usize {
        self.collections.get(collection).map_or(0, Collection::len)
    }

    pub fn is_empty(&self) -> bool {
        self.collections.values().all(Collection::is_empty)
    }

    /// Exact ID lookup. A missing record is `None`, never an error.
    pub fn find_one<E: Entity>(&self, id: &str) -> Option<E> {
        self.find::<E>(id)
    }

    pub fn find_all<E: Entity>(&self, options: FindOptions) -> Vec<E> {
        self.find_all_where(options, |_: &E| true)
    }

    pub fn find_all_where<E: Entity>(
        &self,
        options: FindOptions,
        predicate: impl Fn(&E) -> bool,
    ) -> Vec<E> {
        if !options.include_archived {
            return self.all_where(predicate);
        }
        self.documents(E::COLLECTION)
            .into_iter()
            .filter_map(|doc| decode::<E>(doc))
            .filter(|entity| predicate(entity))
            .collect()
    }

    pub fn count<E: Entity>(&self, options: FindOptions) -> usize {
        self.find_all::<E>(options).len()
    }

    /// Insert a new entity, assigning its ID (when empty) and creation audit pair.
    pub fn create<E: Entity>(&mut self, draft: E) -> Result<E> {
        let mut doc = encode(&draft)?;
        let id = match draft.id() {
            "" => self.generate_id(E::COLLECTION),
            id => id.to_string(),
        };

        let now = serde_json::to_value(Utc::now())?;
        doc.insert(ID_FIELD.to_string(), Value::String(id.clone()));
        doc.insert(CREATED_AT_FIELD.to_string(), now);
        self.write_actor(&mut doc, CREATED_BY_FIELD);
        doc.remove(UPDATED_AT_FIELD);
        doc.remove(UPDATED_BY_FIELD);

        let created = decode_strict::<E>(&doc)?;
        self.insert_new(E::COLLECTION, id.clone(), doc)?;
        debug!(collection = E::COLLECTION, id = %id, "created entity");
        Ok(created)
    }

    /// Insert pre-built records as they are, without audit stamping.
    ///
    /// Records with an empty ID are given a generated one.
    pub fn seed<E: Entity>(&mut self, records: impl IntoIterator<Item = E>) -> Result<usize> {
        let mut inserted = 0;
        for record in records {
            let mut doc = encode(&record)?;
            let id = match record.id() {
                "" => self.generate_id(E::COLLECTION),
                id => id.to_string(),
            };
            doc.insert(ID_FIELD.to_string(), Value::String(id.clone()));
            self.insert_new(E::COLLECTION, id, doc)?;
            inserted += 1;
        }
        Ok(inserted)
    }

    /// Shallow-merge `patch` over the stored record and refresh the update audit pair.
    ///
    /// The patch may not touch `id` or the creation audit pair; use
    /// [`Store::rekey`] to move a record to a new ID.
    pub fn update<E: Entity>(&mut self, id: &str, patch: Patch) -> Result<E> {
        if let Some(field) = PROTECTED_FIELDS.iter().find(|field| patch.contains(field)) {
            return Err(StoreError::ProtectedField {
                field: field.to_string(),
            });
        }

        let mut doc = self.existing(E::COLLECTION, id)?.clone();
        for (field, value) in patch.fields() {
            doc.insert(field.clone(), value.clone());
        }
        self.stamp_update(&mut doc)?;

        let updated = decode_strict::<E>(&doc)?;
        self.collection_mut(E::COLLECTION).put(id.to_string(), doc);
        debug!(collection = E::COLLECTION, id = %id, "updated entity");
        Ok(updated)
    }

    /// Relocate a record from `old_id` to `new_id`.
    ///
    /// The record keeps its position in the collection. Foreign keys held by
    /// other records still point at `old_id` until the caller rewrites them.
    /// Rekeying a record onto its own ID changes nothing.
    pub fn rekey<E: Entity>(&mut self, old_id: &str, new_id: &str) -> Result<E> {
        if new_id.is_empty() {
            return Err(StoreError::ProtectedField {
                field: ID_FIELD.to_string(),
            });
        }
        let mut doc = self.existing(E::COLLECTION, old_id)?.clone();
        if old_id == new_id {
            return decode_strict::<E>(&doc);
        }
        if self.find_document(E::COLLECTION, new_id).is_some() {
            return Err(StoreError::IdCollision {
                collection: E::COLLECTION.to_string(),
                id: new_id.to_string(),
            });
        }

        doc.insert(ID_FIELD.to_string(), Value::String(new_id.to_string()));
        self.stamp_update(&mut doc)?;
        let moved = decode_strict::<E>(&doc)?;
        self.collection_mut(E::COLLECTION).relocate(old_id, new_id, doc);
        debug!(collection = E::COLLECTION, from = %old_id, to = %new_id, "rekeyed entity");
        Ok(moved)
    }

    /// Soft delete: mark the record archived, keeping it retrievable by ID.
    pub fn archive<E: Entity>(&mut self, id: &str) -> Result<E> {
        check_policy::<E>(DeletePolicy::Archive)?;
        let mut doc = self.existing(E::COLLECTION, id)?.clone();
        if !crate::core::document_is_archived(&doc) {
            doc.insert(ARCHIVED_AT_FIELD.to_string(), serde_json::to_value(Utc::now())?);
        }
        self.stamp_update(&mut doc)?;

        let archived = decode_strict::<E>(&doc)?;
        self.collection_mut(E::COLLECTION).put(id.to_string(), doc);
        debug!(collection = E::COLLECTION, id = %id, "archived entity");
        Ok(archived)
    }

    /// Hard delete, for join records whose type uses [`DeletePolicy::Remove`].
    pub fn delete<E: Entity>(&mut self, id: &str) -> Result<()> {
        check_policy::<E>(DeletePolicy::Remove)?;
        self.existing(E::COLLECTION, id)?;
        self.collection_mut(E::COLLECTION).remove(id);
        debug!(collection = E::COLLECTION, id = %id, "deleted entity");
        Ok(())
    }

    fn existing(&self, collection: &str, id: &str) -> Result<&Document> {
        self.find_document(collection, id)
            .ok_or_else(|| StoreError::not_found(collection, id))
    }

    fn collection_mut(&mut self, name: &str) -> &mut Collection {
        self.collections.entry(name.to_string()).or_default()
    }

    fn insert_new(&mut self, collection: &str, id: String, doc: Document) -> Result<()> {
        let target = self.collection_mut(collection);
        if target.contains(&id) {
            return Err(StoreError::IdCollision {
                collection: collection.to_string(),
                id,
            });
        }
        target.put(id, doc);
        Ok(())
    }

    fn generate_id(&self, collection: &str) -> String {
        loop {
            let id = new_token(self.config.id_length);
            if self.find_document(collection, &id).is_none() {
                return id;
            }
        }
    }

    fn resolve_seed_id(&self, collection: &str, key: Option<String>, doc: &Document) -> String {
        let own_id = doc
            .get(ID_FIELD)
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty());
        match (key, own_id) {
            (Some(key), Some(own)) if key != own => {
                warn!(collection, key = %key, id = %own, "record id differs from its key, using key");
                key
            }
            (Some(key), _) => key,
            (None, Some(own)) => own.to_string(),
            (None, None) => self.generate_id(collection),
        }
    }

    fn stamp_update(&self, doc: &mut Document) -> Result<()> {
        doc.insert(UPDATED_AT_FIELD.to_string(), serde_json::to_value(Utc::now())?);
        self.write_actor(doc, UPDATED_BY_FIELD);
        Ok(())
    }

    fn write_actor(&self, doc: &mut Document, field: &str) {
        match &self.config.actor_uid {
            Some(uid) => {
                doc.insert(field.to_string(), Value::String(uid.clone()));
            }
            None => {
                doc.remove(field);
            }
        }
    }
}

impl Repository for Store {
    fn find_document(&self, collection: &str, id: &str) -> Option<&Document> {
        self.collections.get(collection)?.get(id)
    }

    fn documents(&self, collection: &str) -> Vec<&Document> {
        self.collections
            .get(collection)
            .map(|records| records.iter().collect())
            .unwrap_or_default()
    }
}

fn encode<E: Entity>(entity: &E) -> Result<Document> {
    match serde_json::to_value(entity)? {
        Value::Object(doc) => Ok(doc),
        other => Err(StoreError::Serialization(format!(
            "entity in '{}' encoded as {}, expected object",
            E::COLLECTION,
            patch::json_type_name(&other)
        ))),
    }
}

fn decode_strict<E: Entity>(doc: &Document) -> Result<E> {
    Ok(serde_json::from_value(Value::Object(doc.clone()))?)
}

fn check_policy<E: Entity>(required: DeletePolicy) -> Result<()> {
    if E::DELETE_POLICY == required {
        return Ok(());
    }
    Err(StoreError::DeletePolicy {
        collection: E::COLLECTION.to_string(),
        operation: required.operation_name().to_string(),
    })
}
