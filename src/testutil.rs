// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 PaperVault

//! In-memory fakes for the ledger and blob store, with call counters so
//! tests can assert ordering invariants (e.g. a failed publish never reaches
//! the ledger).

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, TxHash};
use async_trait::async_trait;

use crate::ledger::{Ledger, LedgerError};
use crate::models::{EncryptedBundle, KeyBytes};
use crate::pinning::{BlobStore, PinError};
use crate::state::AppState;

pub const ACCESS_TX: TxHash = TxHash::repeat_byte(0xaa);
pub const UPLOAD_TX: TxHash = TxHash::repeat_byte(0xbb);
pub const ADD_USER_TX: TxHash = TxHash::repeat_byte(0xcc);

#[derive(Debug, Clone)]
pub struct StoredPaper {
    pub locator: String,
    pub key: KeyBytes,
    pub release_time: u64,
}

#[derive(Default)]
pub struct FakeLedger {
    pub contract_owner: Address,
    pub authorized: Mutex<HashSet<Address>>,
    pub papers: Mutex<HashMap<String, StoredPaper>>,
    pub upload_calls: AtomicUsize,
    pub access_calls: AtomicUsize,
    pub details_calls: AtomicUsize,
    pub add_user_calls: AtomicUsize,
    /// When set, paper_details reverts as the contract would before release
    /// or for an unauthorized reader.
    pub deny_details: bool,
    /// When set, recordAccess transactions fail to confirm.
    pub fail_access: bool,
    /// When set, upload transactions fail to confirm.
    pub fail_upload: bool,
}

impl FakeLedger {
    pub fn with_owner(owner: Address) -> Self {
        FakeLedger {
            contract_owner: owner,
            ..FakeLedger::default()
        }
    }
}

#[async_trait]
impl Ledger for FakeLedger {
    async fn record_upload(
        &self,
        paper_id: &str,
        locator: &str,
        release_time: u64,
        key: &KeyBytes,
    ) -> Result<TxHash, LedgerError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_upload {
            return Err(LedgerError::Transaction("upload transaction reverted".into()));
        }
        self.papers.lock().unwrap().insert(
            paper_id.to_string(),
            StoredPaper {
                locator: locator.to_string(),
                key: key.clone(),
                release_time,
            },
        );
        Ok(UPLOAD_TX)
    }

    async fn record_access(
        &self,
        _paper_id: &str,
        _accessor: Address,
    ) -> Result<TxHash, LedgerError> {
        self.access_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_access {
            return Err(LedgerError::Transaction("access transaction reverted".into()));
        }
        Ok(ACCESS_TX)
    }

    async fn paper_details(
        &self,
        paper_id: &str,
        _reader: Address,
    ) -> Result<(String, KeyBytes), LedgerError> {
        self.details_calls.fetch_add(1, Ordering::SeqCst);
        if self.deny_details {
            return Err(LedgerError::Denied("execution reverted".into()));
        }
        let papers = self.papers.lock().unwrap();
        let paper = papers
            .get(paper_id)
            .ok_or_else(|| LedgerError::Denied("execution reverted: unknown paper".into()))?;
        Ok((paper.locator.clone(), paper.key.clone()))
    }

    async fn add_authorized_user(&self, new_user: Address) -> Result<TxHash, LedgerError> {
        self.add_user_calls.fetch_add(1, Ordering::SeqCst);
        self.authorized.lock().unwrap().insert(new_user);
        Ok(ADD_USER_TX)
    }

    async fn owner(&self) -> Result<Address, LedgerError> {
        Ok(self.contract_owner)
    }

    async fn is_authorized(&self, address: Address) -> Result<bool, LedgerError> {
        Ok(self.authorized.lock().unwrap().contains(&address))
    }
}

#[derive(Default)]
pub struct FakeStore {
    pub bundles: Mutex<HashMap<String, EncryptedBundle>>,
    pub publish_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    pub fail_publish: bool,
    pub fail_fetch: bool,
}

#[async_trait]
impl BlobStore for FakeStore {
    async fn publish(&self, _name: &str, bundle: &EncryptedBundle) -> Result<String, PinError> {
        let n = self.publish_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_publish {
            return Err(PinError::Publish("pinning API returned 500".into()));
        }
        let locator = format!("QmFake{n:04}");
        self.bundles
            .lock()
            .unwrap()
            .insert(locator.clone(), bundle.clone());
        Ok(locator)
    }

    async fn fetch(&self, locator: &str) -> Result<EncryptedBundle, PinError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch {
            return Err(PinError::Fetch("gateway returned 504".into()));
        }
        self.bundles
            .lock()
            .unwrap()
            .get(locator)
            .cloned()
            .ok_or_else(|| PinError::Fetch(format!("unknown locator {locator}")))
    }
}

/// AppState wired to fresh fakes; returns the fakes for assertions.
pub fn fake_state(ledger: FakeLedger, store: FakeStore) -> (AppState, Arc<FakeLedger>, Arc<FakeStore>) {
    let ledger = Arc::new(ledger);
    let store = Arc::new(store);
    let state = AppState::new(ledger.clone(), store.clone());
    (state, ledger, store)
}
