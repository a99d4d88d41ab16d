#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! HTTP client for the hosted nftswap orderbook service.
//!
//! The orderbook is an external collaborator reached over HTTP/JSON: makers
//! post signed v4 orders to it, takers search it with structured filters.
//! This crate provides [`OrderbookClient`] plus the wire types for both
//! endpoints. All numeric fields travel as decimal strings and addresses as
//! lowercase hex, matching the rest of the SDK's wire conventions.
//!
//! Non-2xx responses are surfaced as [`error::OrderbookError::Api`] with
//! the parsed JSON error body, so integrators can branch on server-defined
//! error codes.

pub mod client;
pub mod error;
pub mod types;

pub use client::{DEFAULT_ORDERBOOK_URL, OrderbookClient, OrderbookConfig};
pub use error::OrderbookError;
pub use types::{NftType, PostedOrder, SearchOrdersQuery, SellOrBuyNft};
