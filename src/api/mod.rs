// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 PaperVault

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        AddUserRequest, AddUserResponse, AuthorizedResponse, EncryptedBundle, RetrieveRequest,
        RetrieveResponse, UploadResponse,
    },
    state::AppState,
};

pub mod health;
pub mod papers;
pub mod users;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/upload", post(papers::upload_paper))
        .route("/decrypt", post(papers::decrypt_paper))
        .route("/users", post(users::add_authorized_user))
        .route("/users/{address}/authorized", get(users::is_authorized))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        papers::upload_paper,
        papers::decrypt_paper,
        users::add_authorized_user,
        users::is_authorized,
        health::health,
        health::liveness
    ),
    components(
        schemas(
            EncryptedBundle,
            UploadResponse,
            RetrieveRequest,
            RetrieveResponse,
            AddUserRequest,
            AddUserResponse,
            AuthorizedResponse,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Papers", description = "Encrypted paper upload and retrieval"),
        (name = "Users", description = "On-chain authorization administration"),
        (name = "Health", description = "Service health probes")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{fake_state, FakeLedger, FakeStore};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use std::sync::atomic::Ordering;
    use tower::ServiceExt;

    const BOUNDARY: &str = "paperform";

    fn multipart_body(fields: &[(&str, Option<&str>, &str)]) -> (String, Vec<u8>) {
        let mut body = Vec::new();
        for (name, filename, value) in fields {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match filename {
                Some(filename) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
                }
                None => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                }
            }
            body.extend_from_slice(value.as_bytes());
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        (
            format!("multipart/form-data; boundary={BOUNDARY}"),
            body,
        )
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let (state, _, _) = fake_state(FakeLedger::default(), FakeStore::default());
        let app = router(state);
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn upload_over_http_returns_locator_key_and_tx() {
        let (state, ledger, _) = fake_state(FakeLedger::default(), FakeStore::default());
        let app = router(state);

        let (content_type, body) = multipart_body(&[
            ("paperId", None, "phy-2026"),
            ("releaseTime", None, "1767225600"),
            ("file", Some("final.pdf"), "exam contents"),
        ]);

        let response = app
            .oneshot(
                Request::post("/upload")
                    .header(header::CONTENT_TYPE, content_type)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["locator"], "QmFake0000");
        assert_eq!(json["keyHex"].as_str().unwrap().len(), 32);
        assert!(json["txHash"].as_str().unwrap().starts_with("0x"));
        assert_eq!(ledger.upload_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn upload_without_paper_id_is_bad_request() {
        let (state, ledger, store) = fake_state(FakeLedger::default(), FakeStore::default());
        let app = router(state);

        let (content_type, body) = multipart_body(&[
            ("releaseTime", None, "1767225600"),
            ("file", Some("final.pdf"), "exam contents"),
        ]);

        let response = app
            .oneshot(
                Request::post("/upload")
                    .header(header::CONTENT_TYPE, content_type)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.publish_calls.load(Ordering::SeqCst), 0);
        assert_eq!(ledger.upload_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn denied_decrypt_over_http_is_forbidden_with_audit_fields() {
        let ledger = FakeLedger {
            deny_details: true,
            ..FakeLedger::default()
        };
        let (state, _, _) = fake_state(ledger, FakeStore::default());
        let app = router(state);

        let response = app
            .oneshot(
                Request::post("/decrypt")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"paperId":"phy-2026","address":"0x90F8bf6A479f320ead074411a4B0e7944Ea8c9C1"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json["txHash"].as_str().unwrap().starts_with("0x"));
        assert!(json["accessedBy"].as_str().unwrap().starts_with("0x"));
        assert!(json.get("keyHex").is_none());
        assert!(json.get("locator").is_none());
    }
}
