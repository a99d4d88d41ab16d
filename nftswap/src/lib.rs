#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the nftswap order SDK.
//!
//! This crate provides the protocol-agnostic foundation used throughout the
//! nftswap workspace for building, signing, and filling NFT-for-token swap
//! orders. Everything chain-specific (ABI encodings, EIP-712 schemas,
//! contract calls) lives in the `nftswap-evm` crate; the hosted orderbook
//! client lives in `nftswap-orderbook`.
//!
//! # Overview
//!
//! A swap order is built from user-facing [`asset::Asset`] descriptors,
//! signed off-chain by the maker, and later filled on-chain by a taker. The
//! types here capture the parts of that flow that are independent of the
//! exchange protocol version:
//!
//! - [`asset`] - Tagged-union token descriptors (ERC-20 / ERC-721 / ERC-1155)
//! - [`num`] - Decimal-string numerics and fixed-point parsing
//! - [`expiry`] - Unix-second expiration times and the far-future sentinel
//! - [`status`] - On-chain order lifecycle states
//! - [`error`] - Shared error types
//!
//! # Wire Format
//!
//! All numeric order fields serialize as decimal strings, never as native
//! JSON numbers, so 256-bit amounts survive JavaScript consumers without
//! precision loss. Addresses serialize as lowercase hex.

pub mod asset;
pub mod error;
pub mod expiry;
pub mod num;
pub mod status;

pub use asset::{Asset, Erc20Asset, Erc721Asset, Erc1155Asset};
pub use error::{UnexpectedAssetTypeError, UnknownChainError};
pub use expiry::{Expiry, INFINITE_ORDER_EXPIRY};
pub use num::TokenAmount;
pub use status::{OrderStatusV3, OrderStatusV4};
