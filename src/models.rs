// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 PaperVault

//! # API Data Models
//!
//! This module defines the request and response data structures used by
//! the REST API, plus the [`KeyBytes`] newtype and the [`EncryptedBundle`]
//! object that gets pinned to IPFS. All wire types derive `Serialize`,
//! `Deserialize`, and `ToSchema` for automatic JSON handling and OpenAPI
//! documentation.
//!
//! ## Key Handling
//!
//! Symmetric keys cross the HTTP and contract boundaries as hex strings but
//! are carried internally as [`KeyBytes`], a raw byte-sequence type. Encoding
//! and decoding happen exactly once, at the boundary.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::crypto::SealedPaper;

// =============================================================================
// Key Bytes Type
// =============================================================================

/// Raw symmetric key material.
///
/// Wraps the AES key bytes handed to the contract on upload and returned to
/// authorized retrievers. Hex encoding is explicit via [`KeyBytes::to_hex`]
/// and [`KeyBytes::from_hex`]; internal logic never sees hex strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBytes(Vec<u8>);

impl KeyBytes {
    pub fn new(bytes: Vec<u8>) -> Self {
        KeyBytes(bytes)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hex-encode for the wire (lowercase, no prefix).
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Decode a hex string from the wire.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        hex::decode(s).map(KeyBytes)
    }
}

impl AsRef<[u8]> for KeyBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// =============================================================================
// Encrypted Bundle
// =============================================================================

/// The JSON object pinned to IPFS for each uploaded paper.
///
/// Field names and hex encoding are the bundle's wire format; consumers
/// decrypt client-side with the key released by the contract. The tag is
/// kept separate from the ciphertext so tampering with either is detectable
/// at decrypt time.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct EncryptedBundle {
    /// Original filename of the uploaded paper.
    pub filename: String,
    /// Original MIME type of the uploaded paper.
    pub mimetype: String,
    /// AES-GCM nonce, hex-encoded. Unique per encryption.
    pub nonce: String,
    /// AES-GCM authentication tag, hex-encoded.
    pub tag: String,
    /// Ciphertext, hex-encoded.
    pub ciphertext: String,
}

impl EncryptedBundle {
    /// Build the pinnable bundle from a sealed paper.
    pub fn from_sealed(filename: &str, mimetype: &str, sealed: &SealedPaper) -> Self {
        EncryptedBundle {
            filename: filename.to_string(),
            mimetype: mimetype.to_string(),
            nonce: hex::encode(&sealed.nonce),
            tag: hex::encode(&sealed.tag),
            ciphertext: hex::encode(&sealed.ciphertext),
        }
    }
}

// =============================================================================
// Upload (Ingest) Models
// =============================================================================

/// Response for a successful paper upload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Content locator (IPFS hash) of the pinned encrypted bundle.
    pub locator: String,
    /// Hex-encoded symmetric key, as registered on the contract.
    pub key_hex: String,
    /// Hash of the confirmed upload transaction.
    pub tx_hash: String,
}

// =============================================================================
// Retrieve (Decrypt) Models
// =============================================================================

/// Request to retrieve a paper's encrypted bundle and key.
///
/// Fields are optional so that missing input is reported as a 400 with a
/// message rather than a deserialization rejection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveRequest {
    /// Identifier of the paper to retrieve.
    pub paper_id: Option<String>,
    /// Wallet address of the requester; the access transaction is submitted
    /// from this address.
    pub address: Option<String>,
}

/// Response for a successful paper retrieval.
///
/// Decryption is left to the caller: the gateway returns the bundle and the
/// key exactly as the contract holds them.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveResponse {
    /// Content locator of the encrypted bundle.
    pub locator: String,
    /// Hex-encoded symmetric key released by the contract.
    pub key_hex: String,
    /// The encrypted bundle fetched from the blob store.
    pub paper: EncryptedBundle,
    /// Hash of the confirmed access transaction (audit trail).
    pub tx_hash: String,
    /// Checksummed address the access was recorded for.
    pub accessed_by: String,
}

// =============================================================================
// Authorization Administration Models
// =============================================================================

/// Request to authorize a new wallet address.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddUserRequest {
    /// Address to authorize.
    pub new_user: Option<String>,
    /// Caller-asserted identity; must match the contract owner.
    pub sender: Option<String>,
}

/// Response for a successful authorization grant.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddUserResponse {
    pub message: String,
    /// Checksummed contract owner address.
    pub owner: String,
    /// Checksummed sender address (equals owner on success).
    pub sender: String,
    /// Hash of the confirmed authorization transaction.
    pub tx_hash: String,
}

/// Response for an authorization flag lookup.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AuthorizedResponse {
    /// Checksummed address that was queried.
    pub address: String,
    /// The contract's current flag for this address.
    pub authorized: bool,
}
