//! Wire types for the orderbook endpoints.

use alloy_primitives::Address;
use nftswap::{TokenAmount, UnexpectedAssetTypeError};
use nftswap_evm::v4::SignedNftOrder;
use serde::{Deserialize, Serialize};
use serde_with::{VecSkipError, serde_as};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Which NFT standard an order's non-fungible side uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NftType {
    /// An ERC-721 order.
    #[serde(rename = "ERC721")]
    Erc721,
    /// An ERC-1155 order.
    #[serde(rename = "ERC1155")]
    Erc1155,
}

impl NftType {
    /// The wire name of the standard.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Erc721 => "ERC721",
            Self::Erc1155 => "ERC1155",
        }
    }
}

impl fmt::Display for NftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NftType {
    type Err = UnexpectedAssetTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ERC721" => Ok(Self::Erc721),
            "ERC1155" => Ok(Self::Erc1155),
            other => Err(UnexpectedAssetTypeError(other.to_owned())),
        }
    }
}

/// Whether the posted order sells or buys the NFT, from the maker's
/// perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SellOrBuyNft {
    /// The maker sells the NFT.
    Sell,
    /// The maker bids on the NFT.
    Buy,
}

impl fmt::Display for SellOrBuyNft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sell => f.write_str("sell"),
            Self::Buy => f.write_str("buy"),
        }
    }
}

/// Request body for posting an order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostOrderBody<'a> {
    /// The serialized signed order.
    pub order: &'a SignedNftOrder,
    /// The chain id, as a decimal string.
    pub chain_id: String,
    /// Optional opaque key/value metadata stored alongside the order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<&'a HashMap<String, String>>,
}

/// An order as stored by the orderbook: the signed order plus decoded
/// convenience fields for filtering and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostedOrder {
    /// The ERC-20 side of the trade.
    pub erc20_token: Address,
    /// The ERC-20 amount, as a decimal string.
    pub erc20_token_amount: TokenAmount,
    /// The NFT contract address.
    pub nft_token: Address,
    /// The NFT token id, as a decimal string.
    pub nft_token_id: TokenAmount,
    /// The NFT standard.
    pub nft_type: NftType,
    /// Maker-perspective trade direction.
    pub sell_or_buy_nft: SellOrBuyNft,
    /// The chain id, as a decimal string.
    pub chain_id: String,
    /// The signed order itself.
    pub order: SignedNftOrder,
    /// Opaque integrator metadata.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Response envelope for the search endpoint.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct SearchOrdersResponse {
    /// Matching orders; entries that fail to parse are skipped rather than
    /// failing the whole page.
    #[serde_as(as = "VecSkipError<_>")]
    pub orders: Vec<PostedOrder>,
}

/// Query filters for searching orders. Unset fields are omitted from the
/// query string.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOrdersQuery {
    /// Filter by NFT token id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nft_token_id: Option<String>,
    /// Filter by ERC-20 token address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub erc20_token: Option<String>,
    /// Filter by NFT contract address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nft_token: Option<String>,
    /// Filter by NFT standard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nft_type: Option<NftType>,
    /// Filter by chain id (decimal string).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<String>,
    /// Filter by maker address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maker: Option<String>,
    /// Filter by taker address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taker: Option<String>,
    /// Filter by order nonce.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    /// Pagination offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// Pagination limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Filter by maker-perspective direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sell_or_buy_nft: Option<SellOrBuyNft>,
    /// Filter by service-defined status code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Filter by service-defined visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    /// Only return orders the service still considers valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
}

impl SearchOrdersQuery {
    /// Filters by NFT contract address (normalized to lowercase).
    #[must_use]
    pub fn with_nft_token(mut self, token: Address) -> Self {
        self.nft_token = Some(lowercase(token));
        self
    }

    /// Filters by NFT token id.
    #[must_use]
    pub fn with_nft_token_id(mut self, token_id: TokenAmount) -> Self {
        self.nft_token_id = Some(token_id.to_string());
        self
    }

    /// Filters by ERC-20 token address (normalized to lowercase).
    #[must_use]
    pub fn with_erc20_token(mut self, token: Address) -> Self {
        self.erc20_token = Some(lowercase(token));
        self
    }

    /// Filters by NFT standard.
    #[must_use]
    pub fn with_nft_type(mut self, nft_type: NftType) -> Self {
        self.nft_type = Some(nft_type);
        self
    }

    /// Filters by chain id.
    #[must_use]
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id.to_string());
        self
    }

    /// Filters by maker address (normalized to lowercase).
    #[must_use]
    pub fn with_maker(mut self, maker: Address) -> Self {
        self.maker = Some(lowercase(maker));
        self
    }

    /// Filters by taker address (normalized to lowercase).
    #[must_use]
    pub fn with_taker(mut self, taker: Address) -> Self {
        self.taker = Some(lowercase(taker));
        self
    }

    /// Filters by order nonce.
    #[must_use]
    pub fn with_nonce(mut self, nonce: TokenAmount) -> Self {
        self.nonce = Some(nonce.to_string());
        self
    }

    /// Filters by maker-perspective direction.
    #[must_use]
    pub const fn with_sell_or_buy(mut self, direction: SellOrBuyNft) -> Self {
        self.sell_or_buy_nft = Some(direction);
        self
    }

    /// Filters by service-defined status code.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Restricts results to orders the service still considers valid.
    #[must_use]
    pub const fn with_valid(mut self, valid: bool) -> Self {
        self.valid = Some(valid);
        self
    }

    /// Sets the pagination window.
    #[must_use]
    pub const fn with_page(mut self, offset: u64, limit: u64) -> Self {
        self.offset = Some(offset);
        self.limit = Some(limit);
        self
    }
}

/// Addresses are normalized to lowercase hex on the wire.
fn lowercase(address: Address) -> String {
    address.to_string().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn nft_type_parses_known_standards_only() {
        assert_eq!("ERC721".parse::<NftType>().unwrap(), NftType::Erc721);
        assert_eq!("ERC1155".parse::<NftType>().unwrap(), NftType::Erc1155);
        let err = "ERC20".parse::<NftType>().unwrap_err();
        assert_eq!(err, UnexpectedAssetTypeError("ERC20".to_owned()));
    }

    #[test]
    fn query_serializes_only_set_fields() {
        let query = SearchOrdersQuery::default()
            .with_nft_token(address!("72D39E53A1C1F093E164A95B6B78A3F87CF7364B"))
            .with_chain_id(1)
            .with_valid(true);
        let encoded = serde_json::to_value(&query).unwrap();
        let object = encoded.as_object().unwrap();
        assert_eq!(object.len(), 3);
        // Address filters are lowercased on normalization.
        assert_eq!(
            object["nftToken"],
            "0x72d39e53a1c1f093e164a95b6b78a3f87cf7364b"
        );
        assert_eq!(object["chainId"], "1");
        assert_eq!(object["valid"], true);
    }
}
