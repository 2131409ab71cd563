// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 PaperVault

//! Blob store integration.
//!
//! The remote store is treated as content-addressable: publish returns a
//! locator, fetch retrieves the bundle by locator. Availability immediately
//! after publish is an external-service assumption, not something this
//! module guarantees.

use async_trait::async_trait;

use crate::models::EncryptedBundle;

pub mod pinata;

pub use pinata::PinataClient;

/// Errors from the pinning service.
#[derive(Debug, thiserror::Error)]
pub enum PinError {
    #[error("pinning service configuration missing: {0}")]
    MissingConfig(String),

    #[error("storage publish failed: {0}")]
    Publish(String),

    #[error("storage fetch failed: {0}")]
    Fetch(String),

    #[error("pinning service response was invalid: {0}")]
    InvalidResponse(String),
}

/// Content-addressable store for encrypted bundles.
///
/// Object-safe so handlers can take an in-memory fake in tests.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store a bundle under the given pin name; returns the content locator.
    async fn publish(&self, name: &str, bundle: &EncryptedBundle) -> Result<String, PinError>;

    /// Retrieve a previously published bundle by locator.
    async fn fetch(&self, locator: &str) -> Result<EncryptedBundle, PinError>;
}
