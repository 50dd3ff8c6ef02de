//! Index CRUD endpoints

use crate::error::Error;
use crate::router::AppState;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

/// GET / - service banner
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /indexes - metadata for all indices
pub async fn list_indices_handler(
    State(state): State<AppState>,
) -> Result<Json<Value>, Error> {
    Ok(Json(state.service.list_indices().await?))
}

/// GET /indexes/{name}
pub async fn get_index_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, Error> {
    Ok(Json(state.service.get_index(&name).await?))
}

#[derive(Debug, Deserialize)]
pub struct CreateIndexBody {
    pub index: String,
}

/// POST /indexes
pub async fn create_index_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateIndexBody>,
) -> Result<Json<Value>, Error> {
    Ok(Json(state.service.create_index(&body.index).await?))
}

/// DELETE /indexes/{name}
pub async fn delete_index_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, Error> {
    Ok(Json(state.service.delete_index(&name).await?))
}
