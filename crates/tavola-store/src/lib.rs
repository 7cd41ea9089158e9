//! Tavola Document Store Client
//!
//! A thin client for a remote, schemaless document store. Documents live in
//! named collections and are addressed by string keys; fields are arbitrary
//! JSON objects.
//!
//! # Design
//!
//! The store exposes four operations: create (with a caller-chosen key or a
//! store-assigned id), point read, equality-filtered query, and delete. No
//! document-level transactions or multi-document atomicity are offered;
//! callers that need uniqueness encode it in the key itself (create/delete
//! against a fixed key is the only concurrency control primitive).
//!
//! Two implementations are provided:
//! - [`MemoryStore`]: in-process, for tests and demos
//! - [`HttpStore`]: REST client against a remote document service

mod document;
mod error;
mod http;
mod memory;

pub use document::{Document, Filter};
pub use error::{Error, Result};
pub use http::HttpStore;
pub use memory::MemoryStore;

use serde_json::{Map, Value};

/// A remote (or remote-shaped) schemaless document store.
///
/// All operations are suspension points; callers must not assume ordering
/// between two independently-issued calls. Implementations are cheap to
/// clone and share a single underlying connection/state.
pub trait DocumentStore {
    /// Create a document. With `key`, creates or replaces the document at
    /// that key and returns the key; without, the store assigns an id.
    fn create(
        &self,
        collection: &str,
        key: Option<&str>,
        fields: Map<String, Value>,
    ) -> impl std::future::Future<Output = Result<String>> + Send;

    /// Fetch one document by key. A missing document is `Ok(None)`.
    fn get(
        &self,
        collection: &str,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<Document>>> + Send;

    /// List documents in a collection, optionally filtered by field
    /// equality. `None` reads the entire collection.
    fn query(
        &self,
        collection: &str,
        filter: Option<&Filter>,
    ) -> impl std::future::Future<Output = Result<Vec<Document>>> + Send;

    /// Delete a document by key. Deleting a missing key succeeds.
    fn delete(
        &self,
        collection: &str,
        key: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
