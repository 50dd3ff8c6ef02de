//! Index and document operations
//!
//! The only component that performs I/O. Each operation issues one or
//! two backend calls and normalizes every failure at its own boundary;
//! the upsert flow's search-then-write sequence is the sole multi-step
//! operation and is explicitly not atomic.

use crate::client::SearchBackend;
use crate::config::RequestConfig;
use crate::error::Error;
use crate::pagination::PaginationWindow;
use crate::query::{FieldFilterMap, QueryDsl};
use crate::script::UpdateScript;
use crate::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// One search hit with its stored fields spread flat alongside the
/// owning index and document id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Orchestrates backend calls for the REST surface
pub struct IndexService {
    backend: Arc<dyn SearchBackend>,
    request: RequestConfig,
}

impl IndexService {
    /// The backend and pagination defaults are injected once at
    /// startup; the service holds no other state.
    pub fn new(backend: Arc<dyn SearchBackend>, request: RequestConfig) -> Self {
        Self { backend, request }
    }

    pub async fn list_indices(&self) -> Result<Value> {
        self.backend.list_indices().await
    }

    pub async fn get_index(&self, name: &str) -> Result<Value> {
        self.backend.get_index(name).await
    }

    pub async fn create_index(&self, name: &str) -> Result<Value> {
        let created = self.backend.create_index(name).await?;
        tracing::info!("Index {name} was created");
        Ok(created)
    }

    pub async fn delete_index(&self, name: &str) -> Result<Value> {
        let deleted = self.backend.delete_index(name).await?;
        tracing::info!("Index {name} was deleted");
        Ok(deleted)
    }

    pub async fn get_document(&self, name: &str, id: &str) -> Result<Value> {
        self.backend.get_document(name, id).await
    }

    pub async fn delete_document(&self, name: &str, id: &str) -> Result<Value> {
        let deleted = self.backend.delete_document(name, id).await?;
        tracing::info!("Document {id} from index {name} was deleted");
        Ok(deleted)
    }

    /// Search an index with a conjunctive filter map and flatten each
    /// hit envelope for the caller. Result order is whatever the
    /// cluster returned; no extra sort is applied.
    pub async fn search_documents(
        &self,
        name: &str,
        filters: &FieldFilterMap,
        from: Option<&str>,
        size: Option<&str>,
    ) -> Result<Vec<SearchHit>> {
        let window = PaginationWindow::resolve(from, size, &self.request);
        let query = QueryDsl::from_filters(filters);
        let results = self
            .backend
            .search(name, &query, window.from, window.size)
            .await?;
        Ok(flatten_hits(&results))
    }

    /// Create-or-update by query.
    ///
    /// Searches the index with the filter-derived query; one or more
    /// hits trigger an update-by-query that rewrites every match with
    /// a script built from `fields`, zero hits create a new document
    /// with `fields` as its body. The two steps are not atomic: a
    /// concurrent writer can slip a matching document in between.
    pub async fn upsert_document(
        &self,
        name: &str,
        filters: &FieldFilterMap,
        fields: FieldFilterMap,
    ) -> Result<Value> {
        if fields.is_empty() {
            return Err(Error::Validation {
                kind: "Could not process",
                reason: "Request body is empty while expected a filtering object".to_string(),
            });
        }

        let query = QueryDsl::from_filters(filters);
        let window = PaginationWindow::defaults(&self.request);
        let results = self
            .backend
            .search(name, &query, window.from, window.size)
            .await?;

        let matched = results
            .pointer("/hits/hits")
            .and_then(Value::as_array)
            .is_some_and(|hits| !hits.is_empty());

        if matched {
            let script = UpdateScript::from_params(fields);
            let updated = self.backend.update_by_query(name, &query, &script).await?;
            tracing::info!("Document(s) updated in index {name}");
            Ok(updated)
        } else {
            let created = self
                .backend
                .create_document(name, &Value::Object(fields))
                .await?;
            tracing::info!("Document created in index {name}");
            Ok(created)
        }
    }
}

/// Flatten the cluster's hit envelopes into the caller-facing shape.
fn flatten_hits(results: &Value) -> Vec<SearchHit> {
    let Some(hits) = results.pointer("/hits/hits").and_then(Value::as_array) else {
        return Vec::new();
    };

    hits.iter()
        .map(|hit| SearchHit {
            index: hit
                .get("_index")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            id: hit
                .get("_id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            fields: hit
                .get("_source")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
        })
        .collect()
}
