// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 PaperVault

//! Alloy client for the deployed QuestionPaperStorage contract.
//!
//! State-changing calls go through `eth_sendTransaction`: the node holds the
//! accounts (Ganache/Anvil development model), so `recordAccess` can be
//! submitted from the requesting wallet address and `addAuthorizedUser` from
//! the owner account without the gateway holding any private key.

use std::str::FromStr;

use alloy::{
    network::Ethereum,
    primitives::{Address, Bytes, TxHash, U256},
    providers::{
        fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
        Identity, Provider, ProviderBuilder, RootProvider,
    },
    sol,
};
use async_trait::async_trait;

use super::{Ledger, LedgerError};
use crate::models::KeyBytes;

// Contract interface, matching the deployed QuestionPaperStorage ABI.
sol! {
    #[sol(rpc)]
    interface IQuestionPaperStorage {
        function uploadQuestionPaper(string paperId, string ipfsHash, uint256 releaseTime, bytes key) external;
        function recordAccess(string paperId) external;
        function getPaperDetails(string paperId) external view returns (string ipfsHash, bytes key);
        function addAuthorizedUser(address newUser) external;
        function authorizedUsers(address user) external view returns (bool);
        function owner() external view returns (address);
    }
}

/// HTTP provider type (with all fillers).
type HttpProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider<Ethereum>,
>;

type PaperContract = IQuestionPaperStorage::IQuestionPaperStorageInstance<HttpProvider>;

/// QuestionPaperStorage client.
pub struct PaperLedger {
    provider: HttpProvider,
    contract: PaperContract,
    /// Account that signs uploads. Resolved from the node's account list at
    /// startup via [`PaperLedger::use_node_account`].
    default_sender: Address,
}

impl PaperLedger {
    /// Create a client for the contract at `contract_address` via `rpc_url`.
    ///
    /// Does not touch the network; call [`use_node_account`] before serving
    /// so uploads have a funded sender.
    ///
    /// [`use_node_account`]: PaperLedger::use_node_account
    pub fn connect(rpc_url: &str, contract_address: &str) -> Result<Self, LedgerError> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e: url::ParseError| LedgerError::InvalidRpcUrl(e.to_string()))?;

        let address = Address::from_str(contract_address)
            .map_err(|e| LedgerError::InvalidAddress(e.to_string()))?;

        let provider = ProviderBuilder::new().connect_http(url);
        let contract = IQuestionPaperStorage::new(address, provider.clone());

        Ok(Self {
            provider,
            contract,
            default_sender: Address::ZERO,
        })
    }

    /// Resolve the gateway's upload account from the node's unlocked
    /// account list (first entry, the dev-chain convention).
    pub async fn use_node_account(&mut self) -> Result<(), LedgerError> {
        let accounts = self
            .provider
            .get_accounts()
            .await
            .map_err(|e| LedgerError::Rpc(e.to_string()))?;

        self.default_sender = accounts
            .first()
            .copied()
            .ok_or_else(|| LedgerError::Rpc("node exposes no unlocked accounts".to_string()))?;
        Ok(())
    }

    /// Account used to sign upload transactions.
    pub fn default_sender(&self) -> Address {
        self.default_sender
    }
}

/// Classify a read (`eth_call`) failure: a node error response means the
/// contract reverted the call, anything else is transport trouble.
fn classify_call_error(e: alloy::contract::Error) -> LedgerError {
    match e {
        alloy::contract::Error::TransportError(rpc) => {
            if rpc.as_error_resp().is_some() {
                LedgerError::Denied(rpc.to_string())
            } else {
                LedgerError::Rpc(rpc.to_string())
            }
        }
        other => LedgerError::Rpc(other.to_string()),
    }
}

#[async_trait]
impl Ledger for PaperLedger {
    async fn record_upload(
        &self,
        paper_id: &str,
        locator: &str,
        release_time: u64,
        key: &KeyBytes,
    ) -> Result<TxHash, LedgerError> {
        let receipt = self
            .contract
            .uploadQuestionPaper(
                paper_id.to_string(),
                locator.to_string(),
                U256::from(release_time),
                Bytes::copy_from_slice(key.as_slice()),
            )
            .from(self.default_sender)
            .send()
            .await
            .map_err(|e| LedgerError::Transaction(e.to_string()))?
            .get_receipt()
            .await
            .map_err(|e| LedgerError::Rpc(e.to_string()))?;

        if !receipt.status() {
            return Err(LedgerError::Transaction(
                "upload transaction reverted".to_string(),
            ));
        }
        Ok(receipt.transaction_hash)
    }

    async fn record_access(
        &self,
        paper_id: &str,
        accessor: Address,
    ) -> Result<TxHash, LedgerError> {
        let receipt = self
            .contract
            .recordAccess(paper_id.to_string())
            .from(accessor)
            .send()
            .await
            .map_err(|e| LedgerError::Transaction(e.to_string()))?
            .get_receipt()
            .await
            .map_err(|e| LedgerError::Rpc(e.to_string()))?;

        if !receipt.status() {
            return Err(LedgerError::Transaction(
                "access transaction reverted".to_string(),
            ));
        }
        Ok(receipt.transaction_hash)
    }

    async fn paper_details(
        &self,
        paper_id: &str,
        reader: Address,
    ) -> Result<(String, KeyBytes), LedgerError> {
        let details = self
            .contract
            .getPaperDetails(paper_id.to_string())
            .from(reader)
            .call()
            .await
            .map_err(classify_call_error)?;

        Ok((details.ipfsHash, KeyBytes::new(details.key.to_vec())))
    }

    async fn add_authorized_user(&self, new_user: Address) -> Result<TxHash, LedgerError> {
        // The gateway signs on the owner's behalf via the node-held account.
        let owner = self.owner().await?;

        let receipt = self
            .contract
            .addAuthorizedUser(new_user)
            .from(owner)
            .send()
            .await
            .map_err(|e| LedgerError::Transaction(e.to_string()))?
            .get_receipt()
            .await
            .map_err(|e| LedgerError::Rpc(e.to_string()))?;

        if !receipt.status() {
            return Err(LedgerError::Transaction(
                "authorization transaction reverted".to_string(),
            ));
        }
        Ok(receipt.transaction_hash)
    }

    async fn owner(&self) -> Result<Address, LedgerError> {
        self.contract
            .owner()
            .call()
            .await
            .map_err(|e| LedgerError::Rpc(e.to_string()))
    }

    async fn is_authorized(&self, address: Address) -> Result<bool, LedgerError> {
        self.contract
            .authorizedUsers(address)
            .call()
            .await
            .map_err(|e| LedgerError::Rpc(e.to_string()))
    }
}
