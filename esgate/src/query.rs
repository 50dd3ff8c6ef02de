//! Query DSL construction from flat filter maps

use serde::Serialize;
use serde_json::{Map, Value};

/// Flat field-to-value filter map.
///
/// `serde_json` is built with `preserve_order`, so iteration follows
/// insertion order and the caller's parameter order survives into the
/// generated query body.
pub type FieldFilterMap = Map<String, Value>;

/// Query body sent to the cluster: `match_all` or a conjunction of
/// per-field `match` clauses. Built fresh per request, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryDsl {
    /// `{"match_all": {}}`
    MatchAll { match_all: Map<String, Value> },
    /// `{"bool": {"must": [{"match": {field: value}}, ...]}}`
    BoolMust { bool: MustClauses },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MustClauses {
    pub must: Vec<MatchClause>,
}

/// A single-field equality match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchClause {
    #[serde(rename = "match")]
    pub field: Map<String, Value>,
}

impl QueryDsl {
    /// Build a query from a flat filter map.
    ///
    /// An empty map matches all documents. Otherwise every entry
    /// becomes one `match` clause under `bool.must`, in map iteration
    /// order. Values pass through verbatim; a non-scalar value is the
    /// cluster's problem to reject, not ours.
    pub fn from_filters(filters: &FieldFilterMap) -> Self {
        if filters.is_empty() {
            return QueryDsl::MatchAll {
                match_all: Map::new(),
            };
        }

        let must = filters
            .iter()
            .map(|(name, value)| {
                let mut field = Map::new();
                field.insert(name.clone(), value.clone());
                MatchClause { field }
            })
            .collect();

        QueryDsl::BoolMust {
            bool: MustClauses { must },
        }
    }

    /// Number of match clauses (0 for match_all)
    pub fn clause_count(&self) -> usize {
        match self {
            QueryDsl::MatchAll { .. } => 0,
            QueryDsl::BoolMust { bool } => bool.must.len(),
        }
    }
}
