// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 PaperVault

//! PaperVault Gateway - Sealed Exam Paper Distribution Service
//!
//! This crate provides an HTTP gateway that encrypts uploaded question
//! papers, pins the sealed bundle to IPFS through a Pinata-compatible
//! pinning service, and registers the locator and decryption key on the
//! `QuestionPaperStorage` contract. The contract alone decides who may
//! retrieve a paper and when.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `crypto` - Per-upload AES-128-GCM sealing
//! - `ledger` - QuestionPaperStorage contract client (alloy)
//! - `pinning` - Pinata-compatible IPFS pinning client

pub mod api;
pub mod config;
pub mod crypto;
pub mod error;
pub mod ledger;
pub mod models;
pub mod pinning;
pub mod state;

#[cfg(test)]
pub(crate) mod testutil;
