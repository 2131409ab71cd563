// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 PaperVault

//! # Runtime Configuration Constants
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `RPC_URL` | JSON-RPC endpoint of the ledger node | `http://127.0.0.1:7545` |
//! | `CONTRACT_ADDRESS` | Deployed QuestionPaperStorage contract address | Required |
//! | `PINATA_JWT` | Bearer token for the pinning service | Required |
//! | `PINATA_API_BASE_URL` | Pinning API base URL | `https://api.pinata.cloud` |
//! | `PINATA_GATEWAY_BASE_URL` | IPFS gateway base URL for fetches | `https://gateway.pinata.cloud` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `5000` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

/// Environment variable name for the ledger node's JSON-RPC endpoint.
pub const RPC_URL_ENV: &str = "RPC_URL";

/// Default RPC endpoint: a local Ganache/Anvil development node.
///
/// The gateway relies on the node holding unlocked accounts; `recordAccess`
/// transactions are submitted from the requesting wallet address without a
/// locally-held key.
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:7545";

/// Environment variable name for the deployed QuestionPaperStorage
/// contract address. No default; the gateway refuses to start without it.
pub const CONTRACT_ADDRESS_ENV: &str = "CONTRACT_ADDRESS";

/// Environment variable name for the server bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the server bind port.
pub const PORT_ENV: &str = "PORT";

/// Default bind port. Matches the port the original deployment served on.
pub const DEFAULT_PORT: u16 = 5000;

/// Environment variable selecting the log output format (`json` or `pretty`).
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
