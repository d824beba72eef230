//! The shared measurement-serving pipeline.
//!
//! Every dataset endpoint is a thin wrapper around [`serve`]: expand and
//! validate the query parameters, assemble the query specification, execute
//! it, and wrap the materialized records in the response envelope.
//! Validation failures surface before any database work happens.

use crate::error::ApiError;
use crate::request_id::RequestId;
use crate::state::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use shared::models::Envelope;
use shared::query::{build_filters, expand_params, Endpoint, QuerySpec};

/// The raw query pairs, or the rejection axum produced decoding them.
///
/// The rejection is accepted here so that an undecodable query string flows
/// through the normal error translator instead of axum's default body.
pub(crate) type RawParams = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// Serves one measurement request against the given endpoint context.
pub(crate) async fn serve(
    endpoint: &Endpoint,
    state: &AppState,
    request_id: RequestId,
    raw: RawParams,
) -> Result<Response, ApiError> {
    let Query(pairs) = raw.map_err(|rejection| ApiError::QueryString(rejection.body_text()))?;

    let params = expand_params(&pairs);
    let parsed = build_filters(&params, endpoint)?;
    let spec = QuerySpec::build(endpoint, parsed);

    let results = state.database().fetch(&spec).await?;

    tracing::debug!(
        endpoint = endpoint.name,
        request_id = %request_id,
        rows = results.len(),
        "query executed"
    );

    let envelope = Envelope::ok(results, request_id.as_str());
    encode(&envelope, spec.pretty())
}

/// Encodes the envelope, compact by default, indented when requested.
fn encode(envelope: &Envelope, pretty: bool) -> Result<Response, ApiError> {
    let body = if pretty {
        serde_json::to_string_pretty(envelope)?
    } else {
        serde_json::to_string(envelope)?
    };

    Ok((
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        body,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Ch4RecordSimple, Measurement};

    #[test]
    fn test_compact_encoding_has_no_newlines() {
        let envelope = Envelope::ok(Vec::new(), "deadbeefdeadbeef");
        let response = encode(&envelope, false).unwrap();
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json; charset=utf-8"
        );
    }

    #[test]
    fn test_pretty_and_compact_encode_the_same_envelope() {
        let envelope = Envelope::ok(
            vec![Measurement::Ch4Simple(Ch4RecordSimple {
                year: 2020,
                month: 11,
                average: 1891.7,
                trend: 1889.4,
            })],
            "deadbeefdeadbeef",
        );

        let compact = serde_json::to_string(&envelope).unwrap();
        let pretty = serde_json::to_string_pretty(&envelope).unwrap();

        let a: serde_json::Value = serde_json::from_str(&compact).unwrap();
        let b: serde_json::Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(a, b);
        assert!(pretty.contains('\n'));
        assert!(!compact.contains('\n'));
    }
}
