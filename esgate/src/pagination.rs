//! Pagination window resolution
//!
//! Caller-supplied `from`/`size` values arrive as raw query-string
//! text. Invalid or absent values fall back to configured defaults
//! rather than failing the request, and `size` can never exceed the
//! configured ceiling.

use crate::config::RequestConfig;

/// Effective offset and page size for one search request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationWindow {
    pub from: u64,
    pub size: u64,
}

impl PaginationWindow {
    /// Resolve the window from optional raw request values.
    ///
    /// `from` must parse to a number >= 0 (rounded to the nearest
    /// integer); `size` must parse to a number > 0 and is clamped to
    /// `defaults.max_size`. Anything else falls back to the defaults.
    pub fn resolve(from: Option<&str>, size: Option<&str>, defaults: &RequestConfig) -> Self {
        let from = from
            .and_then(parse_number)
            .filter(|n| *n >= 0.0)
            .map(|n| n.round() as u64)
            .unwrap_or(defaults.from);

        let size = size
            .and_then(parse_number)
            .filter(|n| *n > 0.0)
            .map(|n| (n.round() as u64).min(defaults.max_size))
            .unwrap_or(defaults.size);

        Self { from, size }
    }

    /// Window using only the configured defaults
    pub fn defaults(defaults: &RequestConfig) -> Self {
        Self {
            from: defaults.from,
            size: defaults.size,
        }
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
