//! HTTP client for the Elasticsearch REST API
//!
//! The service layer talks to the cluster through the
//! [`SearchBackend`] trait so tests can substitute a mock; the real
//! implementation is a thin reqwest wrapper over the documented REST
//! endpoints.

use crate::config::ElasticConfig;
use crate::error::{Error, NormalizedError};
use crate::query::QueryDsl;
use crate::script::UpdateScript;
use crate::Result;
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::{json, Value};
use std::time::Duration;

/// Backend seam for index and document operations.
///
/// All methods return the cluster's JSON result verbatim; failures are
/// already normalized into [`Error`].
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn list_indices(&self) -> Result<Value>;
    async fn get_index(&self, index: &str) -> Result<Value>;
    async fn create_index(&self, index: &str) -> Result<Value>;
    async fn delete_index(&self, index: &str) -> Result<Value>;
    async fn get_document(&self, index: &str, id: &str) -> Result<Value>;
    async fn delete_document(&self, index: &str, id: &str) -> Result<Value>;
    async fn create_document(&self, index: &str, body: &Value) -> Result<Value>;
    async fn search(&self, index: &str, query: &QueryDsl, from: u64, size: u64) -> Result<Value>;
    async fn update_by_query(
        &self,
        index: &str,
        query: &QueryDsl,
        script: &UpdateScript,
    ) -> Result<Value>;
}

/// reqwest-backed Elasticsearch client
pub struct ElasticClient {
    http: Client,
    node: String,
    max_retries: u32,
}

impl ElasticClient {
    /// Create a client from cluster connection settings.
    pub fn new(config: &ElasticConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            http,
            node: config.node.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
        })
    }

    /// Issue one request, retrying connection failures up to the
    /// configured count. HTTP error replies are never retried: the
    /// cluster saw the request and answered.
    async fn execute(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        let url = format!("{}/{}", self.node, path);

        let mut attempt = 0;
        let response = loop {
            let mut request = self.http.request(method.clone(), &url);
            if let Some(body) = body {
                request = request.json(body);
            }

            match request.send().await {
                Ok(response) => break response,
                Err(err) if err.is_connect() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::debug!(
                        "connect error on {method} {url}, retry {attempt}/{}",
                        self.max_retries
                    );
                }
                Err(err) => return Err(err.into()),
            }
        };

        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            // Wrap the reply body in the client error envelope the
            // normalizer decodes; a non-JSON body yields the default
            // internal error.
            let body = response.json().await.unwrap_or(Value::Null);
            let envelope = json!({ "meta": { "body": body } });
            Err(Error::Backend(NormalizedError::from_raw(&envelope)))
        }
    }
}

#[async_trait]
impl SearchBackend for ElasticClient {
    async fn list_indices(&self) -> Result<Value> {
        self.execute(Method::GET, "_all", None).await
    }

    async fn get_index(&self, index: &str) -> Result<Value> {
        self.execute(Method::GET, index, None).await
    }

    async fn create_index(&self, index: &str) -> Result<Value> {
        self.execute(Method::PUT, index, None).await
    }

    async fn delete_index(&self, index: &str) -> Result<Value> {
        self.execute(Method::DELETE, index, None).await
    }

    async fn get_document(&self, index: &str, id: &str) -> Result<Value> {
        self.execute(Method::GET, &format!("{index}/_doc/{id}"), None)
            .await
    }

    async fn delete_document(&self, index: &str, id: &str) -> Result<Value> {
        self.execute(Method::DELETE, &format!("{index}/_doc/{id}"), None)
            .await
    }

    async fn create_document(&self, index: &str, body: &Value) -> Result<Value> {
        self.execute(Method::POST, &format!("{index}/_doc"), Some(body))
            .await
    }

    async fn search(&self, index: &str, query: &QueryDsl, from: u64, size: u64) -> Result<Value> {
        let body = json!({
            "query": query,
            "from": from,
            "size": size,
        });
        self.execute(Method::POST, &format!("{index}/_search"), Some(&body))
            .await
    }

    async fn update_by_query(
        &self,
        index: &str,
        query: &QueryDsl,
        script: &UpdateScript,
    ) -> Result<Value> {
        let body = json!({
            "query": query,
            "script": script,
        });
        self.execute(
            Method::POST,
            &format!("{index}/_update_by_query"),
            Some(&body),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed_from_node() {
        let client = ElasticClient::new(&ElasticConfig {
            node: "http://10.28.11.49:9200/".to_string(),
            ..ElasticConfig::default()
        })
        .unwrap();
        assert_eq!(client.node, "http://10.28.11.49:9200");
    }

    #[test]
    fn test_plain_node_kept_as_is() {
        let client = ElasticClient::new(&ElasticConfig::default()).unwrap();
        assert_eq!(client.node, "http://localhost:9200");
    }
}
