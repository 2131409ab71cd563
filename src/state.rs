// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 PaperVault

use std::sync::Arc;

use crate::ledger::Ledger;
use crate::pinning::BlobStore;

/// Shared collaborators, read-only from a request's perspective. The gateway
/// holds no mutable state between requests; all durable state lives in the
/// contract and the blob store.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<dyn Ledger>,
    pub blobs: Arc<dyn BlobStore>,
}

impl AppState {
    pub fn new(ledger: Arc<dyn Ledger>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { ledger, blobs }
    }
}
