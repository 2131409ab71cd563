// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 PaperVault

//! Ledger integration for the QuestionPaperStorage contract.
//!
//! The contract is the single source of truth for paper records, authorized
//! addresses, and the owner identity. The gateway never pre-checks
//! authorization locally; it submits the call and lets the contract decide.

use alloy::primitives::{Address, TxHash};
use async_trait::async_trait;

use crate::models::KeyBytes;

pub mod contract;

pub use contract::PaperLedger;

/// Errors from ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("transaction failed: {0}")]
    Transaction(String),

    /// The contract rejected the call (revert). On a detail read this means
    /// the caller is not currently permitted to view the paper.
    #[error("call denied by contract: {0}")]
    Denied(String),
}

/// The QuestionPaperStorage contract, behind an object-safe seam so tests
/// can substitute an in-memory fake.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Submit `uploadQuestionPaper` from the gateway account and wait for
    /// confirmed inclusion. Success implies durability.
    async fn record_upload(
        &self,
        paper_id: &str,
        locator: &str,
        release_time: u64,
        key: &KeyBytes,
    ) -> Result<TxHash, LedgerError>;

    /// Submit `recordAccess` as a transaction from the accessor's own
    /// address and wait for confirmation. The resulting hash is the audit
    /// trail for the attempt, granted or not.
    async fn record_access(&self, paper_id: &str, accessor: Address)
        -> Result<TxHash, LedgerError>;

    /// Read `getPaperDetails` as the given address. Returns the locator and
    /// the stored key only if the contract's access predicate holds right
    /// now; otherwise `LedgerError::Denied`.
    async fn paper_details(
        &self,
        paper_id: &str,
        reader: Address,
    ) -> Result<(String, KeyBytes), LedgerError>;

    /// Submit `addAuthorizedUser` from the contract owner's account and wait
    /// for confirmation.
    async fn add_authorized_user(&self, new_user: Address) -> Result<TxHash, LedgerError>;

    /// Read the contract owner address.
    async fn owner(&self) -> Result<Address, LedgerError>;

    /// Read the contract's authorization flag for an address.
    async fn is_authorized(&self, address: Address) -> Result<bool, LedgerError>;
}
