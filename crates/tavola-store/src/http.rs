//! HTTP client for a remote document store.
//!
//! REST conventions:
//! - `PUT    {base}/{collection}/{key}`          create-or-replace at a key
//! - `POST   {base}/{collection}`                create with store-assigned id
//! - `GET    {base}/{collection}/{key}`          point read, 404 = missing
//! - `GET    {base}/{collection}?field=&value=`  equality query (value is JSON)
//! - `DELETE {base}/{collection}/{key}`          delete, 404 = already gone

use crate::document::{Document, Filter};
use crate::error::{Error, Result};
use crate::DocumentStore;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Client for a remote document store over HTTP.
#[derive(Debug, Clone)]
pub struct HttpStore {
    base: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct Created {
    id: String,
}

impl HttpStore {
    /// Create a client for the store at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base = base_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            base,
            client: reqwest::Client::new(),
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.base, collection)
    }

    fn document_url(&self, collection: &str, key: &str) -> String {
        format!("{}/{}/{}", self.base, collection, key)
    }
}

fn transport(e: reqwest::Error) -> Error {
    Error::Transport(e.to_string())
}

/// Turn a non-success response into a status error.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let code = resp.status().as_u16();
    let message = resp.text().await.unwrap_or_default();
    tracing::debug!(code, "store returned non-success status");
    Err(Error::Status { code, message })
}

impl DocumentStore for HttpStore {
    async fn create(
        &self,
        collection: &str,
        key: Option<&str>,
        fields: Map<String, Value>,
    ) -> Result<String> {
        match key {
            Some(k) => {
                let resp = self
                    .client
                    .put(self.document_url(collection, k))
                    .json(&fields)
                    .send()
                    .await
                    .map_err(transport)?;
                check(resp).await?;
                Ok(k.to_string())
            }
            None => {
                let resp = self
                    .client
                    .post(self.collection_url(collection))
                    .json(&fields)
                    .send()
                    .await
                    .map_err(transport)?;
                let created: Created = check(resp).await?.json().await.map_err(transport)?;
                Ok(created.id)
            }
        }
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>> {
        let resp = self
            .client
            .get(self.document_url(collection, key))
            .send()
            .await
            .map_err(transport)?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let doc: Document = check(resp).await?.json().await.map_err(transport)?;
        Ok(Some(doc))
    }

    async fn query(&self, collection: &str, filter: Option<&Filter>) -> Result<Vec<Document>> {
        let mut request = self.client.get(self.collection_url(collection));
        if let Some(f) = filter {
            let value = serde_json::to_string(&f.value)?;
            request = request.query(&[("field", f.field.as_str()), ("value", value.as_str())]);
        }
        let resp = request.send().await.map_err(transport)?;
        let docs: Vec<Document> = check(resp).await?.json().await.map_err(transport)?;
        Ok(docs)
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<()> {
        let resp = self
            .client
            .delete(self.document_url(collection, key))
            .send()
            .await
            .map_err(transport)?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        check(resp).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_stripped() {
        let store = HttpStore::new("http://localhost:8080/");
        assert_eq!(store.collection_url("likes"), "http://localhost:8080/likes");
        assert_eq!(
            store.document_url("likes", "u1_5"),
            "http://localhost:8080/likes/u1_5"
        );
    }
}
