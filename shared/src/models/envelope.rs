//! The outward JSON wrapper around query results.

use crate::models::Measurement;
use serde::{Deserialize, Serialize};

/// The response envelope returned by every measurement endpoint.
///
/// An empty result set is represented by an empty `Results` list. The legacy
/// wire format emitted a single-element list holding `null` instead; the
/// empty list is the canonical representation here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Envelope {
    /// The measurements matching the query, in order-by order.
    pub results: Vec<Measurement>,
    /// Request status, `"OK"` on success.
    pub status: String,
    /// The unique id assigned to this request, for log correlation.
    pub request_id: String,
    /// Always `null` on success; failures use the error response shape
    /// instead of the envelope.
    pub error: Option<String>,
}

impl Envelope {
    /// Wraps a successful result set.
    #[must_use]
    pub fn ok(results: Vec<Measurement>, request_id: impl Into<String>) -> Self {
        Self {
            results,
            status: "OK".to_string(),
            request_id: request_id.into(),
            error: None,
        }
    }
}
