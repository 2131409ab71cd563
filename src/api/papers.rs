// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 PaperVault

//! Upload and retrieval endpoints.
//!
//! Upload sequencing is deliberate: encrypt, pin, then register on-chain.
//! The contract is never left referencing a blob that was not pinned; the
//! reverse window (pinned blob, failed ledger write) is accepted and logged.

use std::str::FromStr;

use alloy::primitives::Address;
use axum::extract::{Multipart, State};
use axum::Json;
use tracing::{info, warn};

use crate::{
    crypto,
    error::GatewayError,
    ledger::LedgerError,
    models::{EncryptedBundle, RetrieveRequest, RetrieveResponse, UploadResponse},
    state::AppState,
};

/// One file from the multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub mimetype: String,
}

/// Raw upload form fields before validation.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    pub paper_id: Option<String>,
    pub release_time: Option<String>,
}

/// Upload a question paper.
///
/// Encrypts the file under a fresh key, pins the encrypted bundle, and
/// registers paper id, locator, release time, and key on the contract.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "Papers",
    responses(
        (status = 200, description = "Paper pinned and registered", body = UploadResponse),
        (status = 400, description = "Missing file, paperId, or releaseTime"),
        (status = 502, description = "Pinning or ledger write failed"),
    )
)]
pub async fn upload_paper(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, GatewayError> {
    let form = read_upload_form(&mut multipart).await?;
    process_upload(&state, form).await.map(Json)
}

async fn read_upload_form(multipart: &mut Multipart) -> Result<UploadForm, GatewayError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| GatewayError::input(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("paper").to_string();
                let mimetype = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| GatewayError::input(format!("failed to read file field: {e}")))?
                    .to_vec();
                form.file = Some(UploadedFile {
                    bytes,
                    filename,
                    mimetype,
                });
            }
            "paperId" => {
                form.paper_id = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| GatewayError::input(format!("failed to read paperId: {e}")))?,
                );
            }
            "releaseTime" => {
                form.release_time = Some(field.text().await.map_err(|e| {
                    GatewayError::input(format!("failed to read releaseTime: {e}"))
                })?);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Validate and run the ingest workflow. Input errors return before any
/// collaborator is called.
pub async fn process_upload(
    state: &AppState,
    form: UploadForm,
) -> Result<UploadResponse, GatewayError> {
    let file = form
        .file
        .ok_or_else(|| GatewayError::input("no file uploaded"))?;
    let paper_id = form
        .paper_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| GatewayError::input("missing paperId"))?;
    let release_time: u64 = form
        .release_time
        .ok_or_else(|| GatewayError::input("missing releaseTime"))?
        .trim()
        .parse()
        .map_err(|_| GatewayError::input("releaseTime must be an integer epoch timestamp"))?;

    let sealed = crypto::seal(&file.bytes)?;
    let bundle = EncryptedBundle::from_sealed(&file.filename, &file.mimetype, &sealed);

    // Pin before the ledger write so the chain never references a missing blob.
    let locator = state
        .blobs
        .publish(&format!("{paper_id}.json"), &bundle)
        .await?;

    let tx_hash = state
        .ledger
        .record_upload(&paper_id, &locator, release_time, &sealed.key)
        .await
        .map_err(|e| {
            // The pinned blob is now orphaned; accepted, not compensated.
            warn!(%paper_id, %locator, error = %e, "ledger write failed after publish");
            GatewayError::Ledger(format!("ledger write failed: {e}"))
        })?;

    info!(%paper_id, %locator, release_time, "paper uploaded");
    Ok(UploadResponse {
        locator,
        key_hex: sealed.key.to_hex(),
        tx_hash: tx_hash.to_string(),
    })
}

/// Retrieve a paper's encrypted bundle and decryption key.
///
/// Records the access on-chain from the requester's address first; only if
/// that confirms does the gateway read the details and fetch the bundle.
#[utoipa::path(
    post,
    path = "/decrypt",
    tag = "Papers",
    request_body = RetrieveRequest,
    responses(
        (status = 200, description = "Bundle and key released", body = RetrieveResponse),
        (status = 400, description = "Missing paperId or wallet address"),
        (status = 403, description = "Paper not released or address not authorized"),
        (status = 502, description = "Ledger or storage failure"),
    )
)]
pub async fn decrypt_paper(
    State(state): State<AppState>,
    Json(request): Json<RetrieveRequest>,
) -> Result<Json<RetrieveResponse>, GatewayError> {
    process_retrieve(&state, request).await.map(Json)
}

pub async fn process_retrieve(
    state: &AppState,
    request: RetrieveRequest,
) -> Result<RetrieveResponse, GatewayError> {
    let paper_id = request
        .paper_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| GatewayError::input("missing paperId"))?;
    let address = request
        .address
        .filter(|a| !a.is_empty())
        .ok_or_else(|| GatewayError::input("missing wallet address"))?;
    let accessor = Address::from_str(&address)
        .map_err(|e| GatewayError::input(format!("invalid wallet address: {e}")))?;
    let accessed_by = accessor.to_checksum(None);

    // Always record the attempt; a denial further down stays auditable.
    let tx_hash = state
        .ledger
        .record_access(&paper_id, accessor)
        .await
        .map_err(|e| GatewayError::Ledger(format!("access transaction failed: {e}")))?
        .to_string();

    let (locator, key) = match state.ledger.paper_details(&paper_id, accessor).await {
        Ok(details) => details,
        Err(LedgerError::Denied(_)) => {
            info!(%paper_id, accessor = %accessed_by, %tx_hash, "paper detail read denied");
            return Err(GatewayError::Forbidden {
                message: "paper not released or address not authorized".to_string(),
                tx_hash: Some(tx_hash),
                accessed_by: Some(accessed_by),
            });
        }
        Err(e) => {
            return Err(GatewayError::Ledger(format!("paper detail read failed: {e}")));
        }
    };

    let paper = state.blobs.fetch(&locator).await?;

    info!(%paper_id, accessor = %accessed_by, %locator, "paper released");
    Ok(RetrieveResponse {
        locator,
        key_hex: key.to_hex(),
        paper,
        tx_hash,
        accessed_by,
    })
}
