//! Shared error types.
//!
//! Protocol-specific errors (codec failures, build validation, signing)
//! live next to their modules in `nftswap-evm`; this module holds the
//! errors that cut across crates.

/// An asset descriptor carried a token standard the pipeline does not
/// support.
///
/// Raised before any encoding or I/O takes place.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unexpected asset type '{0}'; expected one of ERC20, ERC721, ERC1155")]
pub struct UnexpectedAssetTypeError(pub String);

/// No default contract deployment is known for a chain id.
///
/// There is deliberately no silent fallback: building an order against a
/// nonexistent contract would produce unfillable signatures. Callers on
/// unlisted chains must supply addresses explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no default contract addresses for chain id {chain_id}; supply addresses explicitly")]
pub struct UnknownChainError {
    /// The unrecognized chain id.
    pub chain_id: u64,
}
