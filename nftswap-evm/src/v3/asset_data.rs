//! The v3 asset-data codec.
//!
//! Every asset travels on the wire as a binary blob: a 4-byte proxy id
//! naming the token-standard codec, followed by an ABI-encoded tuple. A
//! MultiAsset blob is a recursive container of single-asset blobs with an
//! outer per-asset amounts array. The wire format would permit arbitrary
//! nesting, but the protocol rejects anything deeper than one level, so the
//! decoder enforces that explicitly; on the encode side nesting is
//! unrepresentable because [`Asset`] has no bundle variant.
//!
//! Protocol quirk reproduced exactly: an ERC-1155 nested inside a
//! MultiAsset carries a per-token value of `1`, and the real amount lives
//! in the bundle's outer `amounts` array at the matching index.

use alloy_primitives::{Address, Bytes, U256, hex};
use alloy_sol_types::SolValue;
use nftswap::{Asset, TokenAmount};

/// Proxy id tag for ERC-20 asset data.
pub const ERC20_PROXY_ID: [u8; 4] = hex!("f47261b0");

/// Proxy id tag for ERC-721 asset data.
pub const ERC721_PROXY_ID: [u8; 4] = hex!("02571792");

/// Proxy id tag for ERC-1155 asset data.
pub const ERC1155_PROXY_ID: [u8; 4] = hex!("a7cb5fb7");

/// Proxy id tag for MultiAsset bundle data.
pub const MULTI_ASSET_PROXY_ID: [u8; 4] = hex!("94cfcdd7");

/// The ERC-1155 callback-data sentinel: a single zero byte, not an empty
/// byte string.
const ERC1155_CALLBACK_DATA: [u8; 1] = [0x00];

/// Errors from decoding asset-data blobs.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AssetDataError {
    /// The blob is shorter than the 4-byte proxy id.
    #[error("asset data too short: {0} bytes")]
    TooShort(usize),
    /// The leading 4 bytes name no known asset proxy.
    #[error("unsupported asset proxy id 0x{0}")]
    UnsupportedAssetType(String),
    /// A MultiAsset blob was nested inside another MultiAsset blob.
    #[error("MultiAsset data nested deeper than one level")]
    NestedMultiAsset,
    /// The ABI payload after the proxy id is malformed.
    #[error(transparent)]
    Abi(#[from] alloy_sol_types::Error),
}

/// A decoded asset-data blob.
///
/// The decoded form keeps the raw protocol shape (ERC-1155 id/value arrays,
/// bundle amounts) rather than collapsing back into [`Asset`], because the
/// wire permits shapes the user-facing descriptor does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedAssetData {
    /// An ERC-20 token.
    Erc20 {
        /// The token contract address.
        token_address: Address,
    },
    /// An ERC-721 token.
    Erc721 {
        /// The token contract address.
        token_address: Address,
        /// The token id.
        token_id: U256,
    },
    /// An ERC-1155 position.
    Erc1155 {
        /// The token contract address.
        token_address: Address,
        /// The token ids.
        token_ids: Vec<U256>,
        /// The per-id values.
        token_values: Vec<U256>,
        /// Opaque callback data (the `0x00` sentinel when SDK-encoded).
        callback_data: Bytes,
    },
    /// A MultiAsset bundle of single-asset blobs.
    MultiAsset {
        /// The per-entry amounts; for nested ERC-1155 entries this is where
        /// the real amount lives.
        amounts: Vec<U256>,
        /// The decoded nested entries.
        nested_assets: Vec<DecodedAssetData>,
    },
}

/// The amount an asset contributes at the top level of an order side: the
/// ERC-20 amount, `1` for an ERC-721, the unit count for an ERC-1155.
#[must_use]
pub fn natural_amount(asset: &Asset) -> TokenAmount {
    match asset {
        Asset::Erc20(erc20) => erc20.amount,
        Asset::Erc721(_) => TokenAmount::ONE,
        Asset::Erc1155(erc1155) => erc1155.amount_or_one(),
    }
}

/// Encodes a single asset descriptor as a tagged blob.
///
/// `in_multi_asset` applies the nested-ERC-1155 quirk: the entry's own
/// value is forced to `1` because the real amount is carried by the
/// enclosing bundle.
#[must_use]
pub fn encode_asset_data(asset: &Asset, in_multi_asset: bool) -> Bytes {
    match asset {
        Asset::Erc20(erc20) => tagged(ERC20_PROXY_ID, erc20.token_address.abi_encode()),
        Asset::Erc721(erc721) => tagged(
            ERC721_PROXY_ID,
            (erc721.token_address, erc721.token_id.inner()).abi_encode_params(),
        ),
        Asset::Erc1155(erc1155) => {
            let value = if in_multi_asset {
                U256::ONE
            } else {
                erc1155.amount_or_one().inner()
            };
            tagged(
                ERC1155_PROXY_ID,
                (
                    erc1155.token_address,
                    vec![erc1155.token_id.inner()],
                    vec![value],
                    Bytes::from(ERC1155_CALLBACK_DATA),
                )
                    .abi_encode_params(),
            )
        }
    }
}

/// Encodes several assets as one MultiAsset bundle blob.
///
/// Each entry's natural amount goes into the outer `amounts` array; the
/// nested blobs are single-asset encodings with the nested quirk applied.
#[must_use]
pub fn encode_multi_asset_data(assets: &[Asset]) -> Bytes {
    let amounts: Vec<U256> = assets.iter().map(|a| natural_amount(a).inner()).collect();
    let nested: Vec<Bytes> = assets.iter().map(|a| encode_asset_data(a, true)).collect();
    tagged(MULTI_ASSET_PROXY_ID, (amounts, nested).abi_encode_params())
}

/// Decodes a tagged blob, dispatching purely on the leading 4-byte proxy
/// id. MultiAsset entries decode recursively, rejecting depth > 1.
///
/// # Errors
///
/// Returns [`AssetDataError`] on unknown tags, malformed ABI payloads, or
/// double-nested bundles.
pub fn decode_asset_data(data: &[u8]) -> Result<DecodedAssetData, AssetDataError> {
    decode_inner(data, false)
}

fn decode_inner(data: &[u8], nested: bool) -> Result<DecodedAssetData, AssetDataError> {
    if data.len() < 4 {
        return Err(AssetDataError::TooShort(data.len()));
    }
    let mut tag = [0u8; 4];
    tag.copy_from_slice(&data[..4]);
    let payload = &data[4..];
    match tag {
        ERC20_PROXY_ID => {
            let token_address = Address::abi_decode(payload)?;
            Ok(DecodedAssetData::Erc20 { token_address })
        }
        ERC721_PROXY_ID => {
            let (token_address, token_id) = <(Address, U256)>::abi_decode_params(payload)?;
            Ok(DecodedAssetData::Erc721 {
                token_address,
                token_id,
            })
        }
        ERC1155_PROXY_ID => {
            let (token_address, token_ids, token_values, callback_data) =
                <(Address, Vec<U256>, Vec<U256>, Bytes)>::abi_decode_params(payload)?;
            Ok(DecodedAssetData::Erc1155 {
                token_address,
                token_ids,
                token_values,
                callback_data,
            })
        }
        MULTI_ASSET_PROXY_ID => {
            if nested {
                return Err(AssetDataError::NestedMultiAsset);
            }
            let (amounts, blobs) = <(Vec<U256>, Vec<Bytes>)>::abi_decode_params(payload)?;
            let nested_assets = blobs
                .iter()
                .map(|blob| decode_inner(blob, true))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(DecodedAssetData::MultiAsset {
                amounts,
                nested_assets,
            })
        }
        other => Err(AssetDataError::UnsupportedAssetType(hex::encode(other))),
    }
}

fn tagged(tag: [u8; 4], payload: Vec<u8>) -> Bytes {
    let mut out = Vec::with_capacity(4 + payload.len());
    out.extend_from_slice(&tag);
    out.extend_from_slice(&payload);
    out.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use nftswap::{Erc20Asset, Erc721Asset, Erc1155Asset};

    fn erc20(amount: u64) -> Asset {
        Asset::Erc20(Erc20Asset {
            token_address: address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
            amount: TokenAmount::from(amount),
        })
    }

    fn erc721(token_id: u64) -> Asset {
        Asset::Erc721(Erc721Asset {
            token_address: address!("72d39e53a1c1f093e164a95b6b78a3f87cf7364b"),
            token_id: TokenAmount::from(token_id),
        })
    }

    fn erc1155(token_id: u64, amount: u64) -> Asset {
        Asset::Erc1155(Erc1155Asset {
            token_address: address!("fa85acaaff1d2fd159aa8454222da76bdd8fa956"),
            token_id: TokenAmount::from(token_id),
            amount: Some(TokenAmount::from(amount)),
        })
    }

    #[test]
    fn erc721_encoding_is_exact() {
        let encoded = encode_asset_data(&erc721(1), false);
        assert_eq!(
            hex::encode(&encoded),
            "02571792\
             00000000000000000000000072d39e53a1c1f093e164a95b6b78a3f87cf7364b\
             0000000000000000000000000000000000000000000000000000000000000001"
        );
    }

    #[test]
    fn erc20_encoding_is_exact() {
        let encoded = encode_asset_data(&erc20(1000), false);
        assert_eq!(
            hex::encode(&encoded),
            "f47261b0000000000000000000000000c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
        );
    }

    #[test]
    fn roundtrip_single_assets() {
        let decoded = decode_asset_data(&encode_asset_data(&erc20(5), false)).unwrap();
        assert_eq!(
            decoded,
            DecodedAssetData::Erc20 {
                token_address: address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
            }
        );

        let decoded = decode_asset_data(&encode_asset_data(&erc721(42), false)).unwrap();
        assert_eq!(
            decoded,
            DecodedAssetData::Erc721 {
                token_address: address!("72d39e53a1c1f093e164a95b6b78a3f87cf7364b"),
                token_id: U256::from(42u64),
            }
        );

        let decoded = decode_asset_data(&encode_asset_data(&erc1155(7, 50), false)).unwrap();
        assert_eq!(
            decoded,
            DecodedAssetData::Erc1155 {
                token_address: address!("fa85acaaff1d2fd159aa8454222da76bdd8fa956"),
                token_ids: vec![U256::from(7u64)],
                token_values: vec![U256::from(50u64)],
                callback_data: Bytes::from(ERC1155_CALLBACK_DATA),
            }
        );
    }

    #[test]
    fn erc1155_callback_data_is_zero_byte_sentinel() {
        let encoded = encode_asset_data(&erc1155(7, 50), false);
        let DecodedAssetData::Erc1155 { callback_data, .. } =
            decode_asset_data(&encoded).unwrap()
        else {
            panic!("wrong variant");
        };
        assert_eq!(callback_data.as_ref(), &[0x00]);
    }

    #[test]
    fn multi_asset_carries_amounts_outside_nested_erc1155() {
        let assets = [erc20(1000), erc1155(7, 50)];
        let encoded = encode_multi_asset_data(&assets);
        assert_eq!(encoded[..4], MULTI_ASSET_PROXY_ID);

        let DecodedAssetData::MultiAsset {
            amounts,
            nested_assets,
        } = decode_asset_data(&encoded).unwrap()
        else {
            panic!("wrong variant");
        };
        // Outer amounts keep the real per-asset quantities.
        assert_eq!(amounts, vec![U256::from(1000u64), U256::from(50u64)]);
        // The nested ERC-1155 entry's own value is forced to one.
        let DecodedAssetData::Erc1155 { token_values, .. } = &nested_assets[1] else {
            panic!("wrong nested variant");
        };
        assert_eq!(token_values, &[U256::ONE]);
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let blob = hex::decode("deadbeef0000000000000000000000000000000000000000").unwrap();
        assert!(matches!(
            decode_asset_data(&blob),
            Err(AssetDataError::UnsupportedAssetType(tag)) if tag == "deadbeef"
        ));
        assert!(matches!(
            decode_asset_data(&[0x01]),
            Err(AssetDataError::TooShort(1))
        ));
    }

    #[test]
    fn double_nesting_is_rejected() {
        // Hand-build a MultiAsset whose nested entry is itself a MultiAsset;
        // the wire format permits this, the protocol does not.
        let inner = encode_multi_asset_data(&[erc20(1)]);
        let payload = (vec![U256::ONE], vec![inner]).abi_encode_params();
        let mut blob = MULTI_ASSET_PROXY_ID.to_vec();
        blob.extend_from_slice(&payload);
        assert!(matches!(
            decode_asset_data(&blob),
            Err(AssetDataError::NestedMultiAsset)
        ));
    }
}
