//! Document endpoints: fetch, delete, search, upsert-by-query

use crate::error::Error;
use crate::query::FieldFilterMap;
use crate::router::AppState;
use crate::service::SearchHit;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

/// Split raw query parameters into field filters and pagination
/// values, preserving the caller's parameter order. `from` and `size`
/// are reserved; everything else is an equality filter.
fn split_query(params: Vec<(String, String)>) -> (FieldFilterMap, Option<String>, Option<String>) {
    let mut filters = FieldFilterMap::new();
    let mut from = None;
    let mut size = None;

    for (key, value) in params {
        match key.as_str() {
            "from" => from = Some(value),
            "size" => size = Some(value),
            _ => {
                filters.insert(key, Value::String(value));
            }
        }
    }

    (filters, from, size)
}

/// GET /indexes/{name}/document - search with query-string filters
pub async fn search_documents_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<SearchHit>>, Error> {
    let (filters, from, size) = split_query(params);
    let hits = state
        .service
        .search_documents(&name, &filters, from.as_deref(), size.as_deref())
        .await?;
    Ok(Json(hits))
}

/// GET /indexes/{name}/document/{document_id}
pub async fn get_document_handler(
    State(state): State<AppState>,
    Path((name, document_id)): Path<(String, String)>,
) -> Result<Json<Value>, Error> {
    Ok(Json(state.service.get_document(&name, &document_id).await?))
}

/// DELETE /indexes/{name}/document/{document_id}
pub async fn delete_document_handler(
    State(state): State<AppState>,
    Path((name, document_id)): Path<(String, String)>,
) -> Result<Json<Value>, Error> {
    Ok(Json(
        state.service.delete_document(&name, &document_id).await?,
    ))
}

#[derive(Debug, Deserialize)]
pub struct UpsertBody {
    /// Fields to write; doubles as the update script's bindings
    #[serde(default)]
    pub params: FieldFilterMap,
}

/// POST /indexes/{name}/document - upsert by query
///
/// Query-string filters select the documents to update; the body's
/// `params` map supplies the new field values (or the created
/// document's body when nothing matches).
pub async fn upsert_document_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    Json(body): Json<UpsertBody>,
) -> Result<Json<Value>, Error> {
    let (filters, _, _) = split_query(params);
    Ok(Json(
        state
            .service
            .upsert_document(&name, &filters, body.params)
            .await?,
    ))
}
