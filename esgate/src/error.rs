//! Error taxonomy and backend error normalization
//!
//! Every failure a caller can see is reduced to one uniform JSON
//! shape: `{status, type, reason}`. Backend failures carry the
//! cluster's own status and reason when the error envelope decodes;
//! everything else collapses to a 500/Internal default.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Caller-facing error contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedError {
    pub status: u16,
    #[serde(rename = "type")]
    pub kind: String,
    pub reason: String,
}

impl NormalizedError {
    /// Default shape for anything that is not a recognizable backend
    /// error: network failures, malformed responses, plain bugs.
    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            kind: "Internal".to_string(),
            reason: "An unknown error occurred".to_string(),
        }
    }

    /// Normalize a raw backend error value.
    ///
    /// Attempts to decode the client error envelope
    /// `{meta: {body: {status, error: {type, reason}}}}`; a failed
    /// decode falls back to [`NormalizedError::internal`]. Never
    /// fails.
    pub fn from_raw(raw: &Value) -> Self {
        match BackendErrorEnvelope::deserialize(raw) {
            Ok(envelope) => Self {
                status: envelope.meta.body.status,
                kind: envelope.meta.body.error.kind,
                reason: envelope.meta.body.error.reason,
            },
            Err(_) => Self::internal(),
        }
    }
}

/// Error envelope produced by the backend client on a non-2xx reply
#[derive(Debug, Deserialize)]
struct BackendErrorEnvelope {
    meta: EnvelopeMeta,
}

#[derive(Debug, Deserialize)]
struct EnvelopeMeta {
    body: EnvelopeBody,
}

#[derive(Debug, Deserialize)]
struct EnvelopeBody {
    status: u16,
    error: EnvelopeDetail,
}

#[derive(Debug, Deserialize)]
struct EnvelopeDetail {
    #[serde(rename = "type")]
    kind: String,
    reason: String,
}

/// Gateway errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Client input rejected before any backend call
    #[error("{reason}")]
    Validation {
        kind: &'static str,
        reason: String,
    },

    /// The cluster rejected or failed a request
    #[error("backend error ({}): {}", .0.status, .0.reason)]
    Backend(NormalizedError),

    /// Network-level failure talking to the cluster
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Reduce any gateway error to the caller-facing contract.
    pub fn to_normalized(&self) -> NormalizedError {
        match self {
            Error::Validation { kind, reason } => NormalizedError {
                status: StatusCode::BAD_REQUEST.as_u16(),
                kind: (*kind).to_string(),
                reason: reason.clone(),
            },
            Error::Backend(normalized) => normalized.clone(),
            _ => NormalizedError::internal(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = self.to_normalized();
        let status = StatusCode::from_u16(body.status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        tracing::error!(status = body.status, kind = %body.kind, "request failed: {self}");

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_shape_extracted() {
        let raw = json!({
            "meta": {
                "body": {
                    "status": 404,
                    "error": {
                        "type": "index_not_found_exception",
                        "reason": "no such index [users]"
                    }
                }
            }
        });

        let normalized = NormalizedError::from_raw(&raw);
        assert_eq!(normalized.status, 404);
        assert_eq!(normalized.kind, "index_not_found_exception");
        assert_eq!(normalized.reason, "no such index [users]");
    }

    #[test]
    fn test_unrelated_keys_default_to_internal() {
        let raw = json!({
            "temp": "temp",
            "not_relevant": "123",
            "key": "value"
        });

        let normalized = NormalizedError::from_raw(&raw);
        assert_eq!(normalized.status, 500);
        assert_eq!(normalized.kind, "Internal");
        assert_eq!(normalized.reason, "An unknown error occurred");
    }

    #[test]
    fn test_empty_object_defaults_to_internal() {
        assert_eq!(NormalizedError::from_raw(&json!({})), NormalizedError::internal());
    }

    #[test]
    fn test_null_defaults_to_internal() {
        assert_eq!(
            NormalizedError::from_raw(&Value::Null),
            NormalizedError::internal()
        );
    }

    #[test]
    fn test_partial_envelope_defaults_to_internal() {
        // meta.body present but the inner error detail missing
        let raw = json!({"meta": {"body": {"status": 400}}});
        assert_eq!(NormalizedError::from_raw(&raw), NormalizedError::internal());
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(NormalizedError::internal()).unwrap();
        assert_eq!(
            value,
            json!({
                "status": 500,
                "type": "Internal",
                "reason": "An unknown error occurred"
            })
        );
    }

    #[test]
    fn test_validation_error_normalizes_to_400() {
        let err = Error::Validation {
            kind: "Could not process",
            reason: "Request body is empty while expected a filtering object".to_string(),
        };

        let normalized = err.to_normalized();
        assert_eq!(normalized.status, 400);
        assert_eq!(normalized.kind, "Could not process");
    }

    #[test]
    fn test_backend_error_keeps_payload() {
        let payload = NormalizedError {
            status: 409,
            kind: "version_conflict_engine_exception".to_string(),
            reason: "conflict".to_string(),
        };
        assert_eq!(Error::Backend(payload.clone()).to_normalized(), payload);
    }

    #[test]
    fn test_other_errors_normalize_to_internal() {
        let err = Error::Config("bad bind address".to_string());
        assert_eq!(err.to_normalized(), NormalizedError::internal());
    }
}
