#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! EVM order pipelines for the nftswap SDK.
//!
//! This crate implements the two exchange protocol versions end to end:
//!
//! - [`v3`] - Arbitrary multi-asset bundle orders: the proxy-id tagged
//!   asset-data codec, the order builder, EIP-712 signing (EOA, EIP-1271
//!   contract wallets, presigned), hashing/verification, and fills against
//!   the v3 exchange.
//! - [`v4`] - Single-NFT-for-ERC20 orders with fees: the ERC-721/ERC-1155
//!   order structs, structured nonce generation, v4 EIP-712 signing,
//!   four-way fill dispatch, cancellation, and status polling.
//!
//! Shared machinery:
//!
//! - [`networks`] - Chain-keyed default deployment tables
//! - [`contracts`] - Minimal `sol!` ABI surface for tokens and exchanges
//! - [`approval`] - Per-standard approval status checks and transactions
//! - [`gas`] - Chain-keyed gas-estimate buffering
//! - [`signer`] - Signer abstraction and contract-wallet detection
//! - [`signature`] - Packed signature parsing and the v3 type-tag scheme

pub mod approval;
mod call;
pub mod contracts;
pub mod gas;
pub mod networks;
pub mod signature;
pub mod signer;
pub mod v3;
pub mod v4;
