// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 PaperVault

//! Per-upload paper sealing with AES-128-GCM.
//!
//! Every call to [`seal`] draws a fresh random key and a fresh random nonce
//! from the OS, so a (key, nonce) pair is never reused across uploads. The
//! gateway never decrypts: the key is disclosed through the contract to
//! whichever address it authorizes, and tag verification happens client-side.

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes128Gcm,
};

use crate::models::KeyBytes;

/// AES-GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// AES-128 key length in bytes.
pub const KEY_LEN: usize = 16;

/// AES-GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// Errors from the encryption primitive. Non-retryable for the request.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("encryption failed: {0}")]
    Encrypt(String),
}

/// Output of one sealing operation: key, nonce, ciphertext, and the
/// authentication tag held separately.
#[derive(Debug, Clone)]
pub struct SealedPaper {
    pub key: KeyBytes,
    pub nonce: Vec<u8>,
    pub ciphertext: Vec<u8>,
    pub tag: Vec<u8>,
}

/// Encrypt a plaintext under a fresh random key and nonce.
pub fn seal(plaintext: &[u8]) -> Result<SealedPaper, CryptoError> {
    let key = Aes128Gcm::generate_key(&mut OsRng);
    let nonce = Aes128Gcm::generate_nonce(&mut OsRng);
    let cipher = Aes128Gcm::new(&key);

    // The aead API appends the tag to the ciphertext; split it back off so
    // the bundle carries them as separate fields.
    let mut sealed = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| CryptoError::Encrypt(e.to_string()))?;
    let tag = sealed.split_off(sealed.len() - TAG_LEN);

    Ok(SealedPaper {
        key: KeyBytes::new(key.to_vec()),
        nonce: nonce.to_vec(),
        ciphertext: sealed,
        tag,
    })
}
