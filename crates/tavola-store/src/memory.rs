//! In-memory document store for tests and demos.

use crate::document::{Document, Filter};
use crate::error::{Error, Result};
use crate::DocumentStore;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Default)]
struct Inner {
    collections: HashMap<String, BTreeMap<String, Map<String, Value>>>,
    next_id: u64,
    fail: bool,
    ops: u64,
}

/// An in-process store with the same contract as the remote one.
///
/// Auto-assigned ids are zero-padded and monotonic, so unfiltered queries
/// return store-assigned documents in creation order. The store can be told
/// to fail every request, which tests use to exercise failure paths.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// When `fail` is set, every subsequent operation returns a transport
    /// error without touching any data.
    pub async fn fail_requests(&self, fail: bool) {
        self.inner.lock().await.fail = fail;
    }

    /// Number of operations attempted so far (including failed ones).
    pub async fn op_count(&self) -> u64 {
        self.inner.lock().await.ops
    }

    /// Number of documents currently in a collection.
    pub async fn len(&self, collection: &str) -> usize {
        self.inner
            .lock()
            .await
            .collections
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    /// Whether a collection is empty (or absent).
    pub async fn is_empty(&self, collection: &str) -> bool {
        self.len(collection).await == 0
    }
}

impl Inner {
    fn check(&mut self) -> Result<()> {
        self.ops += 1;
        if self.fail {
            return Err(Error::Transport("injected store failure".to_string()));
        }
        Ok(())
    }
}

impl DocumentStore for MemoryStore {
    async fn create(
        &self,
        collection: &str,
        key: Option<&str>,
        fields: Map<String, Value>,
    ) -> Result<String> {
        let mut inner = self.inner.lock().await;
        inner.check()?;

        let id = match key {
            Some(k) => k.to_string(),
            None => {
                inner.next_id += 1;
                format!("doc{:08}", inner.next_id)
            }
        };
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), fields);
        Ok(id)
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>> {
        let mut inner = self.inner.lock().await;
        inner.check()?;

        Ok(inner
            .collections
            .get(collection)
            .and_then(|docs| docs.get(key))
            .map(|fields| Document::new(key.to_string(), fields.clone())))
    }

    async fn query(&self, collection: &str, filter: Option<&Filter>) -> Result<Vec<Document>> {
        let mut inner = self.inner.lock().await;
        inner.check()?;

        let docs = match inner.collections.get(collection) {
            Some(docs) => docs,
            None => return Ok(Vec::new()),
        };
        Ok(docs
            .iter()
            .filter(|(_, fields)| filter.map_or(true, |f| f.matches(fields)))
            .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
            .collect())
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.check()?;

        if let Some(docs) = inner.collections.get_mut(collection) {
            docs.remove(key);
        }
        Ok(())
    }
}
