//! # In-Memory Document Store
//!
//! Reference [`DocumentStore`] implementation backed by a `RwLock`ed map
//! of collection name to document list. Seedable from a JSON file
//! mapping collection names to arrays of documents.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::RwLock;

use serde_json::Value;
use uuid::Uuid;

use super::filter::{compare_values, Filter, Sort, SortDirection};
use super::{DocumentStore, InsertAck, StoreError, StoreResult};

/// Field holding the store-generated identifier
pub const ID_FIELD: &str = "_id";

#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a seed file: a JSON object mapping collection
    /// names to arrays of documents. Fails fast on unreadable files or
    /// the wrong shape.
    pub fn from_seed_file(path: &Path) -> StoreResult<Self> {
        let raw = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&raw)
            .map_err(|e| StoreError::InvalidSeed(e.to_string()))?;

        let Value::Object(map) = value else {
            return Err(StoreError::InvalidSeed(
                "seed root must be an object of collection arrays".to_string(),
            ));
        };

        let store = Self::new();
        for (collection, documents) in map {
            let Value::Array(documents) = documents else {
                return Err(StoreError::InvalidSeed(format!(
                    "collection {} is not an array",
                    collection
                )));
            };
            store.load_collection(&collection, documents)?;
        }
        Ok(store)
    }

    /// Replace the contents of a collection. Every document must be a
    /// JSON object; missing `_id`s are assigned.
    pub fn load_collection(&self, collection: &str, documents: Vec<Value>) -> StoreResult<()> {
        let mut prepared = Vec::with_capacity(documents.len());
        for mut doc in documents {
            ensure_id(&mut doc)?;
            prepared.push(doc);
        }

        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;
        data.insert(collection.to_string(), prepared);
        Ok(())
    }

    /// Number of documents currently held in a collection.
    pub fn count(&self, collection: &str) -> StoreResult<usize> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(data.get(collection).map_or(0, Vec::len))
    }
}

/// Assign a store-generated `_id` when the document does not carry one.
fn ensure_id(doc: &mut Value) -> StoreResult<String> {
    let obj = doc.as_object_mut().ok_or(StoreError::NotAnObject)?;

    match obj.get(ID_FIELD) {
        Some(Value::String(existing)) => Ok(existing.clone()),
        Some(other) => Ok(other.to_string()),
        None => {
            let id = Uuid::new_v4().to_string();
            obj.insert(ID_FIELD.to_string(), Value::String(id.clone()));
            Ok(id)
        }
    }
}

impl DocumentStore for MemoryStore {
    fn find(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<Value>> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;

        let documents = match data.get(collection) {
            Some(documents) => documents,
            None => return Ok(Vec::new()),
        };

        Ok(documents
            .iter()
            .filter(|doc| filter.matches(doc))
            .cloned()
            .collect())
    }

    fn find_sorted(
        &self,
        collection: &str,
        filter: &Filter,
        sort: &Sort,
    ) -> StoreResult<Vec<Value>> {
        let mut documents = self.find(collection, filter)?;

        documents.sort_by(|a, b| {
            let ordering = compare_values(a.get(&sort.field), b.get(&sort.field));
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });

        Ok(documents)
    }

    fn insert(&self, collection: &str, mut document: Value) -> StoreResult<InsertAck> {
        let inserted_id = ensure_id(&mut document)?;

        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;
        data.entry(collection.to_string()).or_default().push(document);

        Ok(InsertAck { inserted_id })
    }

    fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        changes: &serde_json::Map<String, Value>,
    ) -> StoreResult<u64> {
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;

        let documents = match data.get_mut(collection) {
            Some(documents) => documents,
            None => return Ok(0),
        };

        let Some(target) = documents.iter_mut().find(|doc| filter.matches(doc)) else {
            return Ok(0);
        };

        if let Some(obj) = target.as_object_mut() {
            for (key, value) in changes {
                obj.insert(key.clone(), value.clone());
            }
        }

        Ok(1)
    }

    fn delete_one(&self, collection: &str, filter: &Filter) -> StoreResult<u64> {
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;

        let documents = match data.get_mut(collection) {
            Some(documents) => documents,
            None => return Ok(0),
        };

        match documents.iter().position(|doc| filter.matches(doc)) {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
