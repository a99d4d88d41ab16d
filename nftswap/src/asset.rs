//! User-facing asset descriptors.
//!
//! An [`Asset`] names one token position on one side of a swap: an ERC-20
//! amount, a single ERC-721, or an ERC-1155 id with an optional amount.
//! The `type` field discriminates the union on the wire, matching the JSON
//! shape consumed by the hosted orderbook and integrating front-ends.
//!
//! Which asset pairings are legal depends on the protocol version: v3
//! accepts arbitrary bundles per side, v4 requires exactly one NFT side.
//! That validation lives with the order builders in `nftswap-evm`.

use crate::num::TokenAmount;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// An ERC-20 position: a fungible token amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Erc20Asset {
    /// The token contract address.
    pub token_address: Address,
    /// The amount in the token's smallest unit, as a decimal string.
    pub amount: TokenAmount,
}

/// An ERC-721 position: a single non-fungible token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Erc721Asset {
    /// The token contract address.
    pub token_address: Address,
    /// The token id, as a decimal string.
    pub token_id: TokenAmount,
}

/// An ERC-1155 position: a semi-fungible token id with an optional amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Erc1155Asset {
    /// The token contract address.
    pub token_address: Address,
    /// The token id, as a decimal string.
    pub token_id: TokenAmount,
    /// Units of the token id to swap. Absent means a single unit,
    /// mirroring ERC-721 semantics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<TokenAmount>,
}

impl Erc1155Asset {
    /// The amount to swap, defaulting to one unit when unspecified.
    #[must_use]
    pub fn amount_or_one(&self) -> TokenAmount {
        self.amount.unwrap_or(TokenAmount::ONE)
    }
}

/// A token descriptor for one position of a swap.
///
/// The serialized form carries a `type` tag (`"ERC20"`, `"ERC721"`,
/// `"ERC1155"`) which discriminates the valid field set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Asset {
    /// A fungible ERC-20 amount.
    #[serde(rename = "ERC20")]
    Erc20(Erc20Asset),
    /// A single ERC-721 token.
    #[serde(rename = "ERC721")]
    Erc721(Erc721Asset),
    /// An ERC-1155 token id with an optional amount.
    #[serde(rename = "ERC1155")]
    Erc1155(Erc1155Asset),
}

impl Asset {
    /// Returns the token contract address of this asset.
    #[must_use]
    pub const fn token_address(&self) -> Address {
        match self {
            Self::Erc20(a) => a.token_address,
            Self::Erc721(a) => a.token_address,
            Self::Erc1155(a) => a.token_address,
        }
    }

    /// The wire name of this asset's token standard.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Erc20(_) => "ERC20",
            Self::Erc721(_) => "ERC721",
            Self::Erc1155(_) => "ERC1155",
        }
    }

    /// Returns `true` for the non-fungible standards (ERC-721 and ERC-1155).
    #[must_use]
    pub const fn is_nft(&self) -> bool {
        matches!(self, Self::Erc721(_) | Self::Erc1155(_))
    }
}

impl From<Erc20Asset> for Asset {
    fn from(asset: Erc20Asset) -> Self {
        Self::Erc20(asset)
    }
}

impl From<Erc721Asset> for Asset {
    fn from(asset: Erc721Asset) -> Self {
        Self::Erc721(asset)
    }
}

impl From<Erc1155Asset> for Asset {
    fn from(asset: Erc1155Asset) -> Self {
        Self::Erc1155(asset)
    }
}
