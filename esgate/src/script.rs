//! Scripted-update payload construction for update-by-query

use crate::query::FieldFilterMap;
use serde::Serialize;

const SCRIPT_LANG: &str = "painless";

/// Scripted update body sent verbatim to `_update_by_query`.
///
/// `source` assigns every params key into the stored document;
/// `params` is the caller's field map passed through unmodified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateScript {
    pub lang: &'static str,
    pub source: String,
    pub params: FieldFilterMap,
}

impl UpdateScript {
    /// Build the painless source from an update-field map.
    ///
    /// One `ctx._source.<key>=params.<key>;` assignment per key, in
    /// map iteration order. Key names are not escaped: a key
    /// containing painless metacharacters produces an invalid script
    /// that the cluster will reject.
    pub fn from_params(params: FieldFilterMap) -> Self {
        let mut source = String::new();
        for key in params.keys() {
            source.push_str("ctx._source.");
            source.push_str(key);
            source.push_str("=params.");
            source.push_str(key);
            source.push(';');
        }

        Self {
            lang: SCRIPT_LANG,
            source,
            params,
        }
    }
}
