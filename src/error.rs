//! Error handling for the shard gateway.
//!
//! Three failure kinds cross the HTTP boundary: malformed date input,
//! date components with no shard-name mapping, and anything the storage
//! backend reports. The first two are client errors detected before a
//! connection is ever checked out; the third is always a 500 carrying the
//! resolved table name so a bad shard mapping can be diagnosed from the
//! logs without replaying the request.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Main error type for the gateway core.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The raw date token does not match the endpoint's required pattern.
    #[error("invalid date token '{token}' - expected {expected} format")]
    Validation {
        token: String,
        expected: &'static str,
    },

    /// Validated date components fail the shard-naming lookup.
    #[error("no shard naming entry for month {month}")]
    Resolution { month: u32 },

    /// Connection, query, or row-decode failure. Missing shard tables land
    /// here too; they are not classified separately.
    #[error("query against table \"{table}\" failed: {source}")]
    Backend {
        table: String,
        #[source]
        source: sqlx::Error,
    },
}

impl GatewayError {
    pub fn validation(token: impl Into<String>, expected: &'static str) -> Self {
        Self::Validation {
            token: token.into(),
            expected,
        }
    }

    pub fn backend(table: impl Into<String>, source: sqlx::Error) -> Self {
        Self::Backend {
            table: table.into(),
            source,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::Resolution { .. } => StatusCode::BAD_REQUEST,
            Self::Backend { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match &self {
            Self::Validation { token, expected } => {
                tracing::warn!(%token, expected, "rejected malformed date token");
            }
            Self::Resolution { month } => {
                tracing::warn!(month, "shard name resolution failed");
            }
            Self::Backend { table, source } => {
                tracing::error!(%table, error = %source, "backend query failed");
            }
        }
        (self.status_code(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_and_resolution_are_client_errors() {
        let v = GatewayError::validation("06-08-2025", "MMDDYYYY");
        assert_eq!(v.status_code(), StatusCode::BAD_REQUEST);

        let r = GatewayError::Resolution { month: 13 };
        assert_eq!(r.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn backend_error_is_server_error_and_names_the_table() {
        let e = GatewayError::backend("june082025", sqlx::Error::RowNotFound);
        assert_eq!(e.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(e.to_string().contains("june082025"));
    }

    #[test]
    fn validation_message_names_the_offending_token() {
        let e = GatewayError::validation("2025/06/30", "YYYY-MM-DD");
        let msg = e.to_string();
        assert!(msg.contains("2025/06/30"));
        assert!(msg.contains("YYYY-MM-DD"));
    }
}
