// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 PaperVault

//! Request outcome taxonomy.
//!
//! Every failure a handler can produce is one of these variants, mapped to a
//! status and JSON body at the boundary. Denials carry the access transaction
//! hash so a rejected attempt is still traceable; upstream failures carry a
//! class ("storage" vs "ledger") but not upstream detail.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::crypto::CryptoError;
use crate::pinning::PinError;

/// Tagged outcome type for all gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Missing or malformed client input. No side effects were attempted.
    #[error("{0}")]
    Input(String),

    /// The blob store publish or fetch failed.
    #[error("{0}")]
    Storage(String),

    /// A ledger transaction or read failed for reasons other than denial.
    #[error("{0}")]
    Ledger(String),

    /// A ledger predicate (ownership, authorization, release time) evaluated
    /// false. `tx_hash`/`accessed_by` are present when an access transaction
    /// was recorded before the denial.
    #[error("{message}")]
    Forbidden {
        message: String,
        tx_hash: Option<String>,
        accessed_by: Option<String>,
    },

    /// The encryption primitive failed. Fatal for the request.
    #[error("{0}")]
    Internal(String),
}

impl GatewayError {
    pub fn input(message: impl Into<String>) -> Self {
        GatewayError::Input(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Input(_) => StatusCode::BAD_REQUEST,
            GatewayError::Storage(_) | GatewayError::Ledger(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Forbidden { .. } => StatusCode::FORBIDDEN,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PinError> for GatewayError {
    fn from(e: PinError) -> Self {
        GatewayError::Storage(e.to_string())
    }
}

impl From<CryptoError> for GatewayError {
    fn from(e: CryptoError) -> Self {
        GatewayError::Internal(e.to_string())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tx_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    accessed_by: Option<String>,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            GatewayError::Forbidden {
                message,
                tx_hash,
                accessed_by,
            } => ErrorBody {
                message,
                tx_hash,
                accessed_by,
            },
            other => ErrorBody {
                message: other.to_string(),
                tx_hash: None,
                accessed_by: None,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn variants_map_to_expected_statuses() {
        assert_eq!(
            GatewayError::input("missing paperId").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::Storage("storage publish failed".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            GatewayError::Ledger("ledger write failed".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            GatewayError::Forbidden {
                message: "denied".into(),
                tx_hash: None,
                accessed_by: None,
            }
            .status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            GatewayError::Internal("rng".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response = GatewayError::input("no file uploaded").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"message":"no file uploaded"}"#);
    }

    #[tokio::test]
    async fn forbidden_body_carries_audit_metadata() {
        let response = GatewayError::Forbidden {
            message: "paper not released or address not authorized".into(),
            tx_hash: Some("0xdead".into()),
            accessed_by: Some("0xBEEF".into()),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["txHash"], "0xdead");
        assert_eq!(body["accessedBy"], "0xBEEF");
        assert_eq!(
            body["message"],
            "paper not released or address not authorized"
        );
    }
}
