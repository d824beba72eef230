//! Error-to-response translation.
//!
//! Every failure in the request path funnels through [`ApiError`], which
//! logs the server-side detail and renders the legacy JSON error shape:
//!
//! ```json
//! {
//!     "Description": "Bad Request",
//!     "Content": {
//!         "Code": 400,
//!         "Message": "malformed query parameter 'year': ..."
//!     }
//! }
//! ```

use crate::db::DbError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use shared::query::ParamError;
use thiserror::Error;

/// A request-scoped failure, translated to an HTTP error response.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A malformed or out-of-range client parameter (400).
    #[error("error when parsing query parameters: {0}")]
    Parameter(#[from] ParamError),

    /// The query string itself could not be decoded (400).
    #[error("malformed query string: {0}")]
    QueryString(String),

    /// A database-layer failure (500); detail is logged, never echoed.
    #[error(transparent)]
    Database(#[from] DbError),

    /// The response body failed to serialize (500).
    #[error("error encoding data as json")]
    Encoding(#[from] serde_json::Error),
}

/// The JSON error payload returned to the client.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorResponse {
    /// The HTTP status text.
    pub description: String,
    /// The error context.
    pub content: ErrorContent,
}

/// The context of an error returned to the client.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorContent {
    /// The HTTP status code.
    pub code: u16,
    /// A human-readable message; for 500s this is deliberately generic.
    pub message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Parameter(_) | Self::QueryString(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message exposed to the client. Parameter errors carry their full
    /// detail; database failures collapse to a generic message with the
    /// detail logged server-side only.
    fn client_message(&self) -> String {
        match self {
            Self::Parameter(_) | Self::QueryString(_) | Self::Encoding(_) => self.to_string(),
            Self::Database(err) if err.is_connectivity() => {
                "failed to connect to database".to_string()
            }
            Self::Database(_) => "internal database error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, detail = ?self, "request failed");
        } else {
            tracing::debug!(error = %self, "rejecting request");
        }

        let body = ErrorResponse {
            description: status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
            content: ErrorContent {
                code: status.as_u16(),
                message: self.client_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use shared::query::ParamError;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_parameter_error_is_bad_request_with_detail() {
        let err = ApiError::Parameter(ParamError::MalformedDate {
            field: "year",
            value: "2020a".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["Description"], "Bad Request");
        assert_eq!(json["Content"]["Code"], 400);
        let message = json["Content"]["Message"].as_str().unwrap();
        assert!(message.contains("year"));
        assert!(message.contains("2020a"));
    }

    #[tokio::test]
    async fn test_database_error_is_generic_500() {
        let err = ApiError::Database(DbError::Query(sqlx::Error::PoolClosed));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["Description"], "Internal Server Error");
        assert_eq!(json["Content"]["Message"], "internal database error");
    }

    #[tokio::test]
    async fn test_connectivity_error_message() {
        let err = ApiError::Database(DbError::Connect(sqlx::Error::PoolClosed));
        let json = body_json(err.into_response()).await;
        assert_eq!(json["Content"]["Message"], "failed to connect to database");
    }
}
