//! Protocol v4: single-NFT-for-ERC20 orders with fees.
//!
//! A v4 order trades exactly one NFT (ERC-721 or ERC-1155) against an
//! ERC-20 amount. The order's [`order::TradeDirection`] is inferred from
//! which side holds the ERC-20: the maker either sells an NFT or bids on
//! one. Compared to v3, the nonce is structured ([`nonce`]) and the
//! signature is a typed tuple rather than a packed blob.

pub mod eip712;
pub mod fill;
pub mod nonce;
pub mod order;

pub use eip712::{NftSignature, SignatureTypeV4, SignedNftOrder, hash_nft_order, sign_nft_order, verify_nft_order_signature};
pub use fill::{FillNftOrderOverrides, wait_until_filled_or_cancelled};
pub use nonce::{DEFAULT_APP_ID, RESERVED_APP_ID_PREFIX, generate_nonce};
pub use order::{Erc721Order, Erc1155Order, NftOrder, NftOrderFee, NftOrderOptions, TradeDirection, build_order};
