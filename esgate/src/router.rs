//! HTTP router for the gateway

use crate::handlers::{
    create_index_handler, delete_document_handler, delete_index_handler, get_document_handler,
    get_index_handler, list_indices_handler, root_handler, search_documents_handler,
    upsert_document_handler,
};
use crate::service::IndexService;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared state for request handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<IndexService>,
}

/// Create the gateway router.
///
/// # Endpoints
///
/// - `GET /` - service banner
/// - `GET /indexes` - list all indices
/// - `POST /indexes` - create index
/// - `GET /indexes/{name}` - one index's metadata
/// - `DELETE /indexes/{name}` - delete index
/// - `GET /indexes/{name}/document` - search documents
/// - `POST /indexes/{name}/document` - upsert by query
/// - `GET /indexes/{name}/document/{id}` - fetch one document
/// - `DELETE /indexes/{name}/document/{id}` - delete one document
pub fn gateway_router(service: Arc<IndexService>) -> Router {
    let state = AppState { service };

    Router::new()
        .route("/", get(root_handler))
        .route(
            "/indexes",
            get(list_indices_handler).post(create_index_handler),
        )
        .route(
            "/indexes/:name",
            get(get_index_handler).delete(delete_index_handler),
        )
        .route(
            "/indexes/:name/document",
            get(search_documents_handler).post(upsert_document_handler),
        )
        .route(
            "/indexes/:name/document/:document_id",
            get(get_document_handler).delete(delete_document_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SearchBackend;
    use crate::config::RequestConfig;
    use crate::error::{Error, NormalizedError};
    use crate::query::QueryDsl;
    use crate::script::UpdateScript;
    use crate::Result;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    /// Canned backend: one stored document, index lookups fail with a
    /// backend-shaped 404.
    struct StaticBackend;

    #[async_trait]
    impl SearchBackend for StaticBackend {
        async fn list_indices(&self) -> Result<Value> {
            Ok(json!({"users": {"mappings": {}}}))
        }

        async fn get_index(&self, index: &str) -> Result<Value> {
            Err(Error::Backend(NormalizedError {
                status: 404,
                kind: "index_not_found_exception".to_string(),
                reason: format!("no such index [{index}]"),
            }))
        }

        async fn create_index(&self, _index: &str) -> Result<Value> {
            Ok(json!({"acknowledged": true}))
        }

        async fn delete_index(&self, _index: &str) -> Result<Value> {
            Ok(json!({"acknowledged": true}))
        }

        async fn get_document(&self, _index: &str, id: &str) -> Result<Value> {
            Ok(json!({"_id": id, "_source": {"author": "Roee"}}))
        }

        async fn delete_document(&self, _index: &str, _id: &str) -> Result<Value> {
            Ok(json!({"result": "deleted"}))
        }

        async fn create_document(&self, _index: &str, _body: &Value) -> Result<Value> {
            Ok(json!({"result": "created"}))
        }

        async fn search(
            &self,
            index: &str,
            _query: &QueryDsl,
            _from: u64,
            _size: u64,
        ) -> Result<Value> {
            Ok(json!({
                "hits": {"hits": [
                    {"_index": index, "_id": "1", "_source": {"author": "Roee", "role": "developer"}}
                ]}
            }))
        }

        async fn update_by_query(
            &self,
            _index: &str,
            _query: &QueryDsl,
            _script: &UpdateScript,
        ) -> Result<Value> {
            Ok(json!({"updated": 1}))
        }
    }

    fn router() -> Router {
        let service = Arc::new(IndexService::new(
            Arc::new(StaticBackend),
            RequestConfig::default(),
        ));
        gateway_router(service)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_all_routes_dispatch() {
        let cases = vec![
            ("GET", "/", None),
            ("GET", "/indexes", None),
            ("POST", "/indexes", Some(json!({"index": "users"}))),
            ("DELETE", "/indexes/users", None),
            ("GET", "/indexes/users/document", None),
            (
                "POST",
                "/indexes/users/document",
                Some(json!({"params": {"role": "dev"}})),
            ),
            ("GET", "/indexes/users/document/1", None),
            ("DELETE", "/indexes/users/document/1", None),
        ];

        for (method, path, body) in cases {
            let request = Request::builder()
                .method(method)
                .uri(path)
                .header("content-type", "application/json")
                .body(body.map_or(Body::empty(), |b| Body::from(b.to_string())))
                .unwrap();

            let response = router().oneshot(request).await.unwrap();
            assert_ne!(
                response.status(),
                StatusCode::NOT_FOUND,
                "Route {method} {path} should match but got 404"
            );
        }
    }

    #[tokio::test]
    async fn test_root_banner() {
        let response = router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["name"], "esgate");
    }

    #[tokio::test]
    async fn test_search_returns_flattened_hits() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/indexes/users/document?author=Roee")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(
            body,
            json!([{"index": "users", "_id": "1", "author": "Roee", "role": "developer"}])
        );
    }

    #[tokio::test]
    async fn test_backend_error_is_mirrored_in_status_and_body() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/indexes/missing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["status"], 404);
        assert_eq!(body["type"], "index_not_found_exception");
        assert_eq!(body["reason"], "no such index [missing]");
    }

    #[tokio::test]
    async fn test_upsert_empty_body_is_bad_request() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/indexes/users/document")
                    .header("content-type", "application/json")
                    .body(Body::from(json!({"params": {}}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["type"], "Could not process");
        assert_eq!(
            body["reason"],
            "Request body is empty while expected a filtering object"
        );
    }

    #[tokio::test]
    async fn test_upsert_with_filters_updates() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/indexes/users/document?author=Roee")
                    .header("content-type", "application/json")
                    .body(Body::from(json!({"params": {"role": "admin"}}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body, json!({"updated": 1}));
    }
}
