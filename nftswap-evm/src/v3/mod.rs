//! Protocol v3: arbitrary multi-asset bundle orders.
//!
//! A v3 order swaps one encoded asset-data blob for another. Each blob is
//! either a single asset or a MultiAsset bundle, so one side of a trade can
//! carry several assets with independent weights. The flow:
//!
//! 1. [`asset_data::encode_asset_data`] turns user-facing descriptors into
//!    proxy-id tagged binary blobs.
//! 2. [`order::build_order`] assembles the canonical order record with
//!    deterministic defaults.
//! 3. [`eip712::sign_order`] produces the packed maker signature.
//! 4. [`fill`] submits fills and cancellations to the v3 exchange.

pub mod asset_data;
pub mod eip712;
pub mod fill;
pub mod order;

pub use asset_data::{DecodedAssetData, decode_asset_data, encode_asset_data, encode_multi_asset_data};
pub use eip712::{hash_order, sign_order, sign_order_with_classifier, verify_order_signature};
pub use order::{BuildOrderOptions, Order, SignedOrder, build_order, generate_pseudo_random_salt};
