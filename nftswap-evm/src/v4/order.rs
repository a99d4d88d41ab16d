//! v4 order records and the high-level builder.
//!
//! A v4 order is a tagged union over the NFT standard: [`Erc721Order`] or
//! [`Erc1155Order`], discriminated on the wire by which token field is
//! present. The builder validates the asset pairing before any encoding:
//! exactly one side must be an NFT, and a bid (maker pays ERC-20) may not
//! escrow the native token.

use crate::contracts;
use crate::networks::{NATIVE_TOKEN_ADDRESS, NULL_ADDRESS};
use crate::v4::nonce::{DEFAULT_APP_ID, NonceError, generate_nonce};
use alloy_primitives::{Address, Bytes};
use nftswap::{Asset, Erc20Asset, Expiry, TokenAmount};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Which side of the trade the maker takes.
///
/// Derived from which side holds the ERC-20 asset; never supplied directly
/// by callers of [`build_order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TradeDirection {
    /// The maker offers the NFT and receives the ERC-20.
    SellNft = 0,
    /// The maker offers the ERC-20, i.e. bids on the NFT.
    BuyNft = 1,
}

impl TradeDirection {
    /// The numeric wire representation.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl Serialize for TradeDirection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for TradeDirection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(Self::SellNft),
            1 => Ok(Self::BuyNft),
            other => Err(serde::de::Error::custom(format!(
                "unknown trade direction {other}"
            ))),
        }
    }
}

/// A fee disbursed when the order fills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftOrderFee {
    /// The fee recipient.
    pub recipient: Address,
    /// The fee amount in the order's ERC-20 token.
    pub amount: TokenAmount,
    /// Opaque data forwarded to the recipient; `0x` when unused.
    #[serde(default)]
    pub fee_data: Bytes,
}

impl NftOrderFee {
    fn to_sol(&self) -> contracts::Fee {
        contracts::Fee {
            recipient: self.recipient,
            amount: self.amount.inner(),
            feeData: self.fee_data.clone(),
        }
    }
}

/// A property constraint for collection-wide offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftOrderProperty {
    /// The validator contract consulted at fill time.
    pub property_validator: Address,
    /// Opaque data passed to the validator.
    #[serde(default)]
    pub property_data: Bytes,
}

impl NftOrderProperty {
    fn to_sol(&self) -> contracts::Property {
        contracts::Property {
            propertyValidator: self.property_validator,
            propertyData: self.property_data.clone(),
        }
    }
}

/// A v4 order over an ERC-721 token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Erc721Order {
    /// Whether the maker sells or bids.
    pub direction: TradeDirection,
    /// The order creator and signer.
    pub maker: Address,
    /// The only address allowed to fill, or null for an open order.
    pub taker: Address,
    /// Unix-seconds expiration.
    pub expiry: Expiry,
    /// Structured replay nonce (see the `nonce` module).
    pub nonce: TokenAmount,
    /// The ERC-20 side of the trade.
    pub erc20_token: Address,
    /// The ERC-20 amount.
    pub erc20_token_amount: TokenAmount,
    /// Fees paid out of the ERC-20 leg on fill.
    #[serde(default)]
    pub fees: Vec<NftOrderFee>,
    /// The NFT contract.
    pub erc721_token: Address,
    /// The NFT token id.
    pub erc721_token_id: TokenAmount,
    /// Property constraints for collection offers; empty for a specific id.
    #[serde(default)]
    pub erc721_token_properties: Vec<NftOrderProperty>,
}

impl Erc721Order {
    /// Converts to the ABI struct used for hashing and contract calls.
    #[must_use]
    pub fn to_sol(&self) -> contracts::ERC721Order {
        contracts::ERC721Order {
            direction: self.direction.as_u8(),
            maker: self.maker,
            taker: self.taker,
            expiry: alloy_primitives::U256::from(self.expiry.as_secs()),
            nonce: self.nonce.inner(),
            erc20Token: self.erc20_token,
            erc20TokenAmount: self.erc20_token_amount.inner(),
            fees: self.fees.iter().map(NftOrderFee::to_sol).collect(),
            erc721Token: self.erc721_token,
            erc721TokenId: self.erc721_token_id.inner(),
            erc721TokenProperties: self
                .erc721_token_properties
                .iter()
                .map(NftOrderProperty::to_sol)
                .collect(),
        }
    }
}

/// A v4 order over an ERC-1155 token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Erc1155Order {
    /// Whether the maker sells or bids.
    pub direction: TradeDirection,
    /// The order creator and signer.
    pub maker: Address,
    /// The only address allowed to fill, or null for an open order.
    pub taker: Address,
    /// Unix-seconds expiration.
    pub expiry: Expiry,
    /// Structured replay nonce (see the `nonce` module).
    pub nonce: TokenAmount,
    /// The ERC-20 side of the trade.
    pub erc20_token: Address,
    /// The ERC-20 amount.
    pub erc20_token_amount: TokenAmount,
    /// Fees paid out of the ERC-20 leg on fill.
    #[serde(default)]
    pub fees: Vec<NftOrderFee>,
    /// The NFT contract.
    pub erc1155_token: Address,
    /// The NFT token id.
    pub erc1155_token_id: TokenAmount,
    /// Property constraints for collection offers; empty for a specific id.
    #[serde(default)]
    pub erc1155_token_properties: Vec<NftOrderProperty>,
    /// How many units of the token id the order covers.
    pub erc1155_token_amount: TokenAmount,
}

impl Erc1155Order {
    /// Converts to the ABI struct used for hashing and contract calls.
    #[must_use]
    pub fn to_sol(&self) -> contracts::ERC1155Order {
        contracts::ERC1155Order {
            direction: self.direction.as_u8(),
            maker: self.maker,
            taker: self.taker,
            expiry: alloy_primitives::U256::from(self.expiry.as_secs()),
            nonce: self.nonce.inner(),
            erc20Token: self.erc20_token,
            erc20TokenAmount: self.erc20_token_amount.inner(),
            fees: self.fees.iter().map(NftOrderFee::to_sol).collect(),
            erc1155Token: self.erc1155_token,
            erc1155TokenId: self.erc1155_token_id.inner(),
            erc1155TokenProperties: self
                .erc1155_token_properties
                .iter()
                .map(NftOrderProperty::to_sol)
                .collect(),
            erc1155TokenAmount: self.erc1155_token_amount.inner().saturating_to(),
        }
    }
}

/// A v4 order, discriminated by NFT standard.
///
/// On the wire the variant is recognized by field presence (`erc1155Token`
/// vs `erc721Token`); the ERC-1155 variant is tried first because its
/// field set is the superset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NftOrder {
    /// An ERC-1155 order (tried first during deserialization).
    Erc1155(Erc1155Order),
    /// An ERC-721 order.
    Erc721(Erc721Order),
}

impl NftOrder {
    /// The order's maker.
    #[must_use]
    pub const fn maker(&self) -> Address {
        match self {
            Self::Erc1155(o) => o.maker,
            Self::Erc721(o) => o.maker,
        }
    }

    /// The order's direction.
    #[must_use]
    pub const fn direction(&self) -> TradeDirection {
        match self {
            Self::Erc1155(o) => o.direction,
            Self::Erc721(o) => o.direction,
        }
    }

    /// The order's nonce.
    #[must_use]
    pub const fn nonce(&self) -> TokenAmount {
        match self {
            Self::Erc1155(o) => o.nonce,
            Self::Erc721(o) => o.nonce,
        }
    }

    /// The NFT contract address.
    #[must_use]
    pub const fn nft_token(&self) -> Address {
        match self {
            Self::Erc1155(o) => o.erc1155_token,
            Self::Erc721(o) => o.erc721_token,
        }
    }

    /// The NFT token id.
    #[must_use]
    pub const fn nft_token_id(&self) -> TokenAmount {
        match self {
            Self::Erc1155(o) => o.erc1155_token_id,
            Self::Erc721(o) => o.erc721_token_id,
        }
    }

    /// The ERC-20 side of the trade.
    #[must_use]
    pub const fn erc20_token(&self) -> Address {
        match self {
            Self::Erc1155(o) => o.erc20_token,
            Self::Erc721(o) => o.erc20_token,
        }
    }

    /// The ERC-20 amount.
    #[must_use]
    pub const fn erc20_token_amount(&self) -> TokenAmount {
        match self {
            Self::Erc1155(o) => o.erc20_token_amount,
            Self::Erc721(o) => o.erc20_token_amount,
        }
    }

    /// The order's fee entries.
    #[must_use]
    pub fn fees(&self) -> &[NftOrderFee] {
        match self {
            Self::Erc1155(o) => &o.fees,
            Self::Erc721(o) => &o.fees,
        }
    }

    /// The order's expiration.
    #[must_use]
    pub const fn expiry(&self) -> Expiry {
        match self {
            Self::Erc1155(o) => o.expiry,
            Self::Erc721(o) => o.expiry,
        }
    }
}

/// A fee entry as supplied by the caller, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeInput {
    /// The fee recipient.
    pub recipient: Address,
    /// The fee amount in the order's ERC-20 token.
    pub amount: TokenAmount,
    /// Opaque fee data; defaults to `0x`.
    pub fee_data: Option<Bytes>,
}

/// Optional knobs for [`build_order`]. Everything unset falls back to the
/// deterministic defaults.
#[derive(Debug, Clone, Default)]
pub struct NftOrderOptions {
    /// Restrict filling to this taker. Default: open order.
    pub taker: Option<Address>,
    /// Order expiration. Default: the far-future sentinel.
    pub expiry: Option<Expiry>,
    /// Fixed nonce for reproducible orders. Default: freshly generated.
    pub nonce: Option<TokenAmount>,
    /// App id baked into a generated nonce. Default: the SDK default id.
    pub app_id: Option<String>,
    /// Fees paid out of the ERC-20 leg.
    pub fees: Vec<FeeInput>,
}

impl NftOrderOptions {
    /// Restricts the order to a single taker.
    #[must_use]
    pub fn with_taker(mut self, taker: Address) -> Self {
        self.taker = Some(taker);
        self
    }

    /// Sets an explicit expiration.
    #[must_use]
    pub fn with_expiry(mut self, expiry: impl Into<Expiry>) -> Self {
        self.expiry = Some(expiry.into());
        self
    }

    /// Sets a fixed nonce for deterministic order construction.
    #[must_use]
    pub fn with_nonce(mut self, nonce: TokenAmount) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Sets the app id used for nonce generation.
    #[must_use]
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }
}

/// Errors from v4 order construction. All of these fire before any
/// encoding or I/O.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BuildNftOrderError {
    /// Both sides were NFTs; v4 never supports NFT-for-NFT.
    #[error("v4 orders cannot swap NFT for NFT; both sides are NFTs")]
    BothSidesNft,
    /// Both sides were ERC-20s; v4 has no fungible-for-fungible support.
    #[error(
        "v4 orders cannot swap ERC20 for ERC20; use the v3 pipeline for fungible-fungible trades"
    )]
    BothSidesErc20,
    /// The maker bid on an NFT with the native pseudo-token, which cannot
    /// be escrowed.
    #[error(
        "NFT bids cannot be placed with the native token; use the wrapped native token (e.g. WETH) instead"
    )]
    NativeTokenBid,
    /// Nonce generation rejected the supplied app id.
    #[error(transparent)]
    Nonce(#[from] NonceError),
}

/// Builds a v4 order from one maker asset and one taker asset.
///
/// Exactly one side must be an NFT. The direction is inferred: ERC-20 on
/// the taker side means the maker sells the NFT; ERC-20 on the maker side
/// means the maker bids on it. Bids priced in the native pseudo-token are
/// rejected outright, since the native token cannot be escrowed — only
/// spent in the same transaction as a fill.
///
/// # Errors
///
/// Returns [`BuildNftOrderError`] for illegal pairings or a bad app id.
pub fn build_order(
    maker_asset: &Asset,
    taker_asset: &Asset,
    maker: Address,
    options: &NftOrderOptions,
) -> Result<NftOrder, BuildNftOrderError> {
    let (direction, nft, erc20) = match (maker_asset, taker_asset) {
        (Asset::Erc20(_), Asset::Erc20(_)) => return Err(BuildNftOrderError::BothSidesErc20),
        (maker_side, taker_side) if maker_side.is_nft() && taker_side.is_nft() => {
            return Err(BuildNftOrderError::BothSidesNft);
        }
        (nft, Asset::Erc20(erc20)) => (TradeDirection::SellNft, nft, erc20),
        (Asset::Erc20(erc20), nft) => {
            if erc20.token_address == NATIVE_TOKEN_ADDRESS {
                return Err(BuildNftOrderError::NativeTokenBid);
            }
            (TradeDirection::BuyNft, nft, erc20)
        }
        // Unreachable: two NFTs are caught by the guard above and two
        // ERC-20s by the first arm.
        _ => return Err(BuildNftOrderError::BothSidesNft),
    };
    Ok(assemble(direction, nft, erc20, maker, options)?)
}

fn assemble(
    direction: TradeDirection,
    nft: &Asset,
    erc20: &Erc20Asset,
    maker: Address,
    options: &NftOrderOptions,
) -> Result<NftOrder, NonceError> {
    let nonce = match options.nonce {
        Some(nonce) => nonce,
        None => generate_nonce(options.app_id.as_deref().unwrap_or(DEFAULT_APP_ID))?,
    };
    let taker = options.taker.unwrap_or(NULL_ADDRESS);
    let expiry = options.expiry.unwrap_or_default();
    let fees = options
        .fees
        .iter()
        .map(|fee| NftOrderFee {
            recipient: fee.recipient,
            amount: fee.amount,
            fee_data: fee.fee_data.clone().unwrap_or_default(),
        })
        .collect();

    let order = match nft {
        Asset::Erc721(erc721) => NftOrder::Erc721(Erc721Order {
            direction,
            maker,
            taker,
            expiry,
            nonce,
            erc20_token: erc20.token_address,
            erc20_token_amount: erc20.amount,
            fees,
            erc721_token: erc721.token_address,
            erc721_token_id: erc721.token_id,
            erc721_token_properties: Vec::new(),
        }),
        Asset::Erc1155(erc1155) => NftOrder::Erc1155(Erc1155Order {
            direction,
            maker,
            taker,
            expiry,
            nonce,
            erc20_token: erc20.token_address,
            erc20_token_amount: erc20.amount,
            fees,
            erc1155_token: erc1155.token_address,
            erc1155_token_id: erc1155.token_id,
            erc1155_token_properties: Vec::new(),
            erc1155_token_amount: erc1155.amount_or_one(),
        }),
        // The dispatch above only routes NFTs here.
        Asset::Erc20(_) => unreachable!("NFT side cannot be an ERC-20"),
    };
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use nftswap::{Erc721Asset, Erc1155Asset, INFINITE_ORDER_EXPIRY};

    const MAKER: Address = address!("8cfcbc90e5ae28b5d2ae00456044e2f4f15b2e35");
    const WETH: Address = address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");

    fn nft() -> Asset {
        Asset::Erc721(Erc721Asset {
            token_address: address!("72d39e53a1c1f093e164a95b6b78a3f87cf7364b"),
            token_id: TokenAmount::from(1u64),
        })
    }

    fn sft(amount: Option<u64>) -> Asset {
        Asset::Erc1155(Erc1155Asset {
            token_address: address!("fa85acaaff1d2fd159aa8454222da76bdd8fa956"),
            token_id: TokenAmount::from(7u64),
            amount: amount.map(TokenAmount::from),
        })
    }

    fn weth(amount: u64) -> Asset {
        Asset::Erc20(Erc20Asset {
            token_address: WETH,
            amount: TokenAmount::from(amount),
        })
    }

    fn native(amount: u64) -> Asset {
        Asset::Erc20(Erc20Asset {
            token_address: NATIVE_TOKEN_ADDRESS,
            amount: TokenAmount::from(amount),
        })
    }

    #[test]
    fn direction_is_inferred_from_the_erc20_side() {
        let sell = build_order(&nft(), &weth(100), MAKER, &NftOrderOptions::default()).unwrap();
        assert_eq!(sell.direction(), TradeDirection::SellNft);

        let bid = build_order(&weth(100), &nft(), MAKER, &NftOrderOptions::default()).unwrap();
        assert_eq!(bid.direction(), TradeDirection::BuyNft);
    }

    #[test]
    fn nft_for_nft_is_rejected() {
        let err = build_order(&nft(), &sft(None), MAKER, &NftOrderOptions::default()).unwrap_err();
        assert_eq!(err, BuildNftOrderError::BothSidesNft);
    }

    #[test]
    fn erc20_for_erc20_is_rejected() {
        let err =
            build_order(&weth(1), &weth(2), MAKER, &NftOrderOptions::default()).unwrap_err();
        assert_eq!(err, BuildNftOrderError::BothSidesErc20);
        // The message points fungible-fungible traffic at the v3 pipeline.
        assert!(err.to_string().contains("v3"));
    }

    #[test]
    fn native_token_bid_is_rejected_with_the_remedy() {
        let err = build_order(&native(100), &nft(), MAKER, &NftOrderOptions::default())
            .unwrap_err();
        assert_eq!(err, BuildNftOrderError::NativeTokenBid);
        assert!(err.to_string().contains("wrapped native token"));

        // Selling an NFT for the native token is fine: the taker pays in
        // the same transaction, nothing is escrowed.
        assert!(build_order(&nft(), &native(100), MAKER, &NftOrderOptions::default()).is_ok());
    }

    #[test]
    fn defaults_are_deterministic() {
        let order = build_order(
            &nft(),
            &weth(100),
            MAKER,
            &NftOrderOptions::default().with_nonce(TokenAmount::from(5u64)),
        )
        .unwrap();
        let NftOrder::Erc721(order) = order else {
            panic!("wrong variant");
        };
        assert_eq!(order.taker, NULL_ADDRESS);
        assert_eq!(order.expiry.as_secs(), INFINITE_ORDER_EXPIRY);
        assert_eq!(order.nonce, TokenAmount::from(5u64));
        assert!(order.fees.is_empty());
        assert!(order.erc721_token_properties.is_empty());
    }

    #[test]
    fn erc1155_amount_defaults_to_one_unit() {
        let order =
            build_order(&sft(None), &weth(100), MAKER, &NftOrderOptions::default()).unwrap();
        let NftOrder::Erc1155(order) = order else {
            panic!("wrong variant");
        };
        assert_eq!(order.erc1155_token_amount, TokenAmount::ONE);

        let order =
            build_order(&sft(Some(40)), &weth(100), MAKER, &NftOrderOptions::default()).unwrap();
        let NftOrder::Erc1155(order) = order else {
            panic!("wrong variant");
        };
        assert_eq!(order.erc1155_token_amount, TokenAmount::from(40u64));
    }

    #[test]
    fn fee_data_is_normalized_to_empty_bytes() {
        let options = NftOrderOptions {
            fees: vec![FeeInput {
                recipient: MAKER,
                amount: TokenAmount::from(10u64),
                fee_data: None,
            }],
            ..Default::default()
        };
        let order = build_order(&nft(), &weth(100), MAKER, &options).unwrap();
        let NftOrder::Erc721(order) = order else {
            panic!("wrong variant");
        };
        assert_eq!(order.fees[0].fee_data, Bytes::default());
    }

    #[test]
    fn wire_format_discriminates_by_field_presence() {
        let order =
            build_order(&sft(Some(3)), &weth(100), MAKER, &NftOrderOptions::default()).unwrap();
        let json = serde_json::to_value(&order).unwrap();
        assert!(json.get("erc1155Token").is_some());
        assert!(json.get("erc721Token").is_none());
        assert_eq!(json["direction"], 0);
        assert_eq!(json["erc1155TokenAmount"], "3");

        let back: NftOrder = serde_json::from_value(json).unwrap();
        assert_eq!(back, order);

        let order = build_order(&nft(), &weth(100), MAKER, &NftOrderOptions::default()).unwrap();
        let json = serde_json::to_value(&order).unwrap();
        let back: NftOrder = serde_json::from_value(json).unwrap();
        assert_eq!(back, order);
    }
}
