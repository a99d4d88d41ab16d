//! The v3 order record and builder.
//!
//! [`build_order`] is deterministic given its inputs: supplying a fixed
//! salt and expiration reproduces the same order byte-for-byte, which is
//! what test fixtures and replay tooling rely on. Left to defaults, the
//! taker is open (null address), the expiration is the far-future
//! sentinel, and the salt is a fresh 256-bit pseudo-random value.

use crate::contracts;
use crate::networks::NULL_ADDRESS;
use crate::v3::asset_data::{encode_asset_data, encode_multi_asset_data, natural_amount};
use alloy_primitives::{Address, Bytes, U256};
use nftswap::{Asset, Expiry, TokenAmount};
use rand::{RngExt, rng};
use serde::{Deserialize, Serialize};

/// A v3 order, immutable once signed.
///
/// Field names mirror the protocol's canonical struct; all numerics
/// serialize as decimal strings and the asset-data blobs as hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// The order creator and signer.
    pub maker_address: Address,
    /// The only address allowed to fill, or the null address for an open
    /// order.
    pub taker_address: Address,
    /// Receives the maker/taker fees.
    pub fee_recipient_address: Address,
    /// The only address allowed to submit the fill transaction, or null.
    pub sender_address: Address,
    /// Top-level maker amount; forced to `1` when the maker side is a
    /// MultiAsset bundle (the real weights live inside the bundle).
    pub maker_asset_amount: TokenAmount,
    /// Top-level taker amount; same MultiAsset rule as the maker side.
    pub taker_asset_amount: TokenAmount,
    /// Fee paid by the maker on fill.
    pub maker_fee: TokenAmount,
    /// Fee paid by the taker on fill.
    pub taker_fee: TokenAmount,
    /// Unix-seconds expiration.
    pub expiration_time_seconds: Expiry,
    /// Replay/uniqueness nonce, up to 256 bits.
    pub salt: TokenAmount,
    /// Encoded maker asset blob.
    pub maker_asset_data: Bytes,
    /// Encoded taker asset blob.
    pub taker_asset_data: Bytes,
    /// Encoded maker fee asset blob, `0x` when the fee is zero.
    pub maker_fee_asset_data: Bytes,
    /// Encoded taker fee asset blob, `0x` when the fee is zero.
    pub taker_fee_asset_data: Bytes,
}

impl Order {
    /// Converts to the ABI struct used for hashing and contract calls.
    #[must_use]
    pub fn to_sol(&self) -> contracts::Order {
        contracts::Order {
            makerAddress: self.maker_address,
            takerAddress: self.taker_address,
            feeRecipientAddress: self.fee_recipient_address,
            senderAddress: self.sender_address,
            makerAssetAmount: self.maker_asset_amount.inner(),
            takerAssetAmount: self.taker_asset_amount.inner(),
            makerFee: self.maker_fee.inner(),
            takerFee: self.taker_fee.inner(),
            expirationTimeSeconds: U256::from(self.expiration_time_seconds.as_secs()),
            salt: self.salt.inner(),
            makerAssetData: self.maker_asset_data.clone(),
            takerAssetData: self.taker_asset_data.clone(),
            makerFeeAssetData: self.maker_fee_asset_data.clone(),
            takerFeeAssetData: self.taker_fee_asset_data.clone(),
        }
    }
}

/// A v3 order plus the maker's packed signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedOrder {
    /// The signed order record.
    #[serde(flatten)]
    pub order: Order,
    /// Packed signature blob: `r ‖ s ‖ v ‖ type-tag` (or a bare tag byte
    /// for presigned orders).
    pub signature: Bytes,
}

/// Optional knobs for [`build_order`]. Everything unset falls back to the
/// deterministic defaults.
#[derive(Debug, Clone, Default)]
pub struct BuildOrderOptions {
    /// Restrict filling to this taker. Default: open order.
    pub taker_address: Option<Address>,
    /// Order expiration. Default: the far-future sentinel.
    pub expiration: Option<Expiry>,
    /// Fixed salt for reproducible orders. Default: fresh pseudo-random.
    pub salt: Option<TokenAmount>,
    /// Fee recipient. Default: null address.
    pub fee_recipient_address: Option<Address>,
    /// Restricted sender. Default: null address.
    pub sender_address: Option<Address>,
    /// Maker fee amount. Default: zero.
    pub maker_fee: Option<TokenAmount>,
    /// Taker fee amount. Default: zero.
    pub taker_fee: Option<TokenAmount>,
    /// Maker fee asset blob. Default: empty.
    pub maker_fee_asset_data: Option<Bytes>,
    /// Taker fee asset blob. Default: empty.
    pub taker_fee_asset_data: Option<Bytes>,
}

impl BuildOrderOptions {
    /// Restricts the order to a single taker.
    #[must_use]
    pub fn with_taker(mut self, taker: Address) -> Self {
        self.taker_address = Some(taker);
        self
    }

    /// Sets an explicit expiration.
    #[must_use]
    pub fn with_expiration(mut self, expiration: impl Into<Expiry>) -> Self {
        self.expiration = Some(expiration.into());
        self
    }

    /// Sets a fixed salt for deterministic order construction.
    #[must_use]
    pub fn with_salt(mut self, salt: TokenAmount) -> Self {
        self.salt = Some(salt);
        self
    }
}

/// Errors from v3 order construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BuildOrderError {
    /// A side of the order listed no assets.
    #[error("{0} side of the order has no assets")]
    EmptySide(&'static str),
}

/// Builds a v3 order from maker and taker asset lists.
///
/// A side with exactly one asset is encoded directly and keeps its natural
/// amount; a side with several assets becomes a MultiAsset bundle with the
/// top-level amount forced to `1`.
///
/// # Errors
///
/// Returns [`BuildOrderError::EmptySide`] when either side is empty.
pub fn build_order(
    maker_assets: &[Asset],
    taker_assets: &[Asset],
    maker_address: Address,
    options: &BuildOrderOptions,
) -> Result<Order, BuildOrderError> {
    let (maker_asset_data, maker_asset_amount) = encode_side(maker_assets, "maker")?;
    let (taker_asset_data, taker_asset_amount) = encode_side(taker_assets, "taker")?;
    Ok(Order {
        maker_address,
        taker_address: options.taker_address.unwrap_or(NULL_ADDRESS),
        fee_recipient_address: options.fee_recipient_address.unwrap_or(NULL_ADDRESS),
        sender_address: options.sender_address.unwrap_or(NULL_ADDRESS),
        maker_asset_amount,
        taker_asset_amount,
        maker_fee: options.maker_fee.unwrap_or(TokenAmount::ZERO),
        taker_fee: options.taker_fee.unwrap_or(TokenAmount::ZERO),
        expiration_time_seconds: options.expiration.unwrap_or_default(),
        salt: options.salt.unwrap_or_else(generate_pseudo_random_salt),
        maker_asset_data,
        taker_asset_data,
        maker_fee_asset_data: options.maker_fee_asset_data.clone().unwrap_or_default(),
        taker_fee_asset_data: options.taker_fee_asset_data.clone().unwrap_or_default(),
    })
}

fn encode_side(
    assets: &[Asset],
    side: &'static str,
) -> Result<(Bytes, TokenAmount), BuildOrderError> {
    match assets {
        [] => Err(BuildOrderError::EmptySide(side)),
        [single] => Ok((encode_asset_data(single, false), natural_amount(single))),
        bundle => Ok((encode_multi_asset_data(bundle), TokenAmount::ONE)),
    }
}

/// Generates a fresh 256-bit pseudo-random salt.
#[must_use]
pub fn generate_pseudo_random_salt() -> TokenAmount {
    let bytes: [u8; 32] = rng().random();
    TokenAmount::new(U256::from_be_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, hex};
    use nftswap::{Erc20Asset, Erc721Asset, Erc1155Asset, INFINITE_ORDER_EXPIRY};

    const MAKER: Address = address!("8cfcbc90e5ae28b5d2ae00456044e2f4f15b2e35");

    fn maker_nft() -> Asset {
        Asset::Erc721(Erc721Asset {
            token_address: address!("72d39e53a1c1f093e164a95b6b78a3f87cf7364b"),
            token_id: TokenAmount::from(1u64),
        })
    }

    fn taker_nft() -> Asset {
        Asset::Erc721(Erc721Asset {
            token_address: address!("fa85acaaff1d2fd159aa8454222da76bdd8fa956"),
            token_id: TokenAmount::from(3u64),
        })
    }

    #[test]
    fn nft_for_nft_order_with_fixed_salt() {
        let salt = TokenAmount::parse(
            "16067189784881358057906593238688655078558518561185118904709866293383414615588",
        )
        .unwrap();
        let options = BuildOrderOptions::default().with_salt(salt);
        let order = build_order(&[maker_nft()], &[taker_nft()], MAKER, &options).unwrap();

        assert_eq!(order.maker_asset_amount, TokenAmount::ONE);
        assert_eq!(order.taker_asset_amount, TokenAmount::ONE);
        assert_eq!(order.taker_address, NULL_ADDRESS);
        assert_eq!(order.salt, salt);
        assert_eq!(
            order.expiration_time_seconds.as_secs(),
            INFINITE_ORDER_EXPIRY
        );
        assert_eq!(
            hex::encode(&order.maker_asset_data),
            "02571792\
             00000000000000000000000072d39e53a1c1f093e164a95b6b78a3f87cf7364b\
             0000000000000000000000000000000000000000000000000000000000000001"
        );
        assert_eq!(
            hex::encode(&order.taker_asset_data),
            "02571792\
             000000000000000000000000fa85acaaff1d2fd159aa8454222da76bdd8fa956\
             0000000000000000000000000000000000000000000000000000000000000003"
        );
    }

    #[test]
    fn multi_asset_side_forces_unit_amount() {
        let bundle = [
            maker_nft(),
            Asset::Erc1155(Erc1155Asset {
                token_address: address!("fa85acaaff1d2fd159aa8454222da76bdd8fa956"),
                token_id: TokenAmount::from(9u64),
                amount: Some(TokenAmount::from(40u64)),
            }),
        ];
        let taker = [Asset::Erc20(Erc20Asset {
            token_address: address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
            amount: TokenAmount::from(1_000_000u64),
        })];
        let order =
            build_order(&bundle, &taker, MAKER, &BuildOrderOptions::default()).unwrap();

        assert_eq!(order.maker_asset_amount, TokenAmount::ONE);
        // Single-asset taker side keeps its natural amount.
        assert_eq!(order.taker_asset_amount, TokenAmount::from(1_000_000u64));
    }

    #[test]
    fn empty_side_is_rejected() {
        let err = build_order(&[], &[taker_nft()], MAKER, &BuildOrderOptions::default())
            .unwrap_err();
        assert_eq!(err, BuildOrderError::EmptySide("maker"));
    }

    #[test]
    fn generated_salt_is_within_decimal_bounds() {
        for _ in 0..32 {
            let salt = generate_pseudo_random_salt().to_string();
            assert!(
                (32..=78).contains(&salt.len()),
                "salt '{salt}' has {} digits",
                salt.len()
            );
        }
    }

    #[test]
    fn order_serializes_with_camel_case_decimal_strings() {
        let order = build_order(
            &[maker_nft()],
            &[taker_nft()],
            MAKER,
            &BuildOrderOptions::default().with_salt(TokenAmount::from(7u64)),
        )
        .unwrap();
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["makerAssetAmount"], "1");
        assert_eq!(json["expirationTimeSeconds"], "2524604400");
        assert_eq!(json["salt"], "7");
        assert_eq!(
            json["makerAddress"],
            "0x8cfcbc90e5ae28b5d2ae00456044e2f4f15b2e35"
        );
        assert_eq!(json["makerFeeAssetData"], "0x");

        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(back, order);
    }
}
