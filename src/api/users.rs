// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 PaperVault

//! Authorization administration endpoints.
//!
//! Granting access is owner-gated at the application level: the gateway
//! reads the contract owner, compares it against the caller-asserted sender,
//! and only then submits the grant from the owner's node-held account. The
//! caller never signs anything themselves.

use std::str::FromStr;

use alloy::primitives::Address;
use axum::extract::{Path, State};
use axum::Json;
use tracing::info;

use crate::{
    error::GatewayError,
    models::{AddUserRequest, AddUserResponse, AuthorizedResponse},
    state::AppState,
};

/// Authorize a new wallet address.
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = AddUserRequest,
    responses(
        (status = 200, description = "User authorized", body = AddUserResponse),
        (status = 400, description = "Missing or malformed address"),
        (status = 403, description = "Sender is not the contract owner"),
        (status = 502, description = "Ledger failure"),
    )
)]
pub async fn add_authorized_user(
    State(state): State<AppState>,
    Json(request): Json<AddUserRequest>,
) -> Result<Json<AddUserResponse>, GatewayError> {
    process_add_user(&state, request).await.map(Json)
}

pub async fn process_add_user(
    state: &AppState,
    request: AddUserRequest,
) -> Result<AddUserResponse, GatewayError> {
    let new_user = request
        .new_user
        .filter(|a| !a.is_empty())
        .ok_or_else(|| GatewayError::input("missing newUser address"))?;
    let sender = request
        .sender
        .filter(|a| !a.is_empty())
        .ok_or_else(|| GatewayError::input("missing sender address"))?;

    let new_user = Address::from_str(&new_user)
        .map_err(|e| GatewayError::input(format!("invalid newUser address: {e}")))?;
    let sender = Address::from_str(&sender)
        .map_err(|e| GatewayError::input(format!("invalid sender address: {e}")))?;

    let owner = state
        .ledger
        .owner()
        .await
        .map_err(|e| GatewayError::Ledger(format!("owner read failed: {e}")))?;

    // Parsing normalized both sides, so this compare is case-insensitive
    // over the hex representations.
    if sender != owner {
        return Err(GatewayError::Forbidden {
            message: "only the contract owner can add users".to_string(),
            tx_hash: None,
            accessed_by: Some(sender.to_checksum(None)),
        });
    }

    let tx_hash = state
        .ledger
        .add_authorized_user(new_user)
        .await
        .map_err(|e| GatewayError::Ledger(format!("authorization transaction failed: {e}")))?;

    let new_user_checksummed = new_user.to_checksum(None);
    info!(new_user = %new_user_checksummed, "authorized user added");
    Ok(AddUserResponse {
        message: format!("authorized user added: {new_user_checksummed}"),
        owner: owner.to_checksum(None),
        sender: sender.to_checksum(None),
        tx_hash: tx_hash.to_string(),
    })
}

/// Look up the contract's authorization flag for an address.
#[utoipa::path(
    get,
    path = "/users/{address}/authorized",
    tag = "Users",
    params(
        ("address" = String, Path, description = "Wallet address to look up")
    ),
    responses(
        (status = 200, description = "Current authorization flag", body = AuthorizedResponse),
        (status = 400, description = "Malformed address"),
        (status = 502, description = "Ledger failure"),
    )
)]
pub async fn is_authorized(
    Path(address): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AuthorizedResponse>, GatewayError> {
    let address = Address::from_str(&address)
        .map_err(|e| GatewayError::input(format!("invalid wallet address: {e}")))?;

    let authorized = state
        .ledger
        .is_authorized(address)
        .await
        .map_err(|e| GatewayError::Ledger(format!("authorization read failed: {e}")))?;

    Ok(Json(AuthorizedResponse {
        address: address.to_checksum(None),
        authorized,
    }))
}
