//! REST gateway for Elasticsearch
//!
//! This crate fronts an Elasticsearch cluster with a small REST
//! surface and translates flat key-value request parameters into
//! query-DSL bodies the cluster understands.
//!
//! # Endpoints
//!
//! - `GET /indexes` - list all indices
//! - `GET /indexes/{name}` - one index's metadata
//! - `POST /indexes` - create index
//! - `DELETE /indexes/{name}` - delete index
//! - `GET /indexes/{name}/document` - search with query-string filters
//! - `GET /indexes/{name}/document/{id}` - fetch one document
//! - `DELETE /indexes/{name}/document/{id}` - delete one document
//! - `POST /indexes/{name}/document` - upsert by query
//!
//! # Query translation
//!
//! Query-string filters become a `bool.must` conjunction of per-field
//! `match` clauses, or `match_all` when no filters are supplied.
//! Upsert payloads become painless update-by-query scripts. Only
//! conjunctive equality matches are supported; this is not a general
//! query planner.

pub mod client;
pub mod config;
pub mod error;
pub mod pagination;
pub mod query;
pub mod router;
pub mod script;
pub mod service;

mod handlers;

pub use client::{ElasticClient, SearchBackend};
pub use error::{Error, NormalizedError};
pub use router::gateway_router;

/// Result type for gateway operations
pub type Result<T> = std::result::Result<T, Error>;
