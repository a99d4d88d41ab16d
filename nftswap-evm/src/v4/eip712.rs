//! v4 order hashing, signing, and signature verification.
//!
//! v4 keeps the signature as a structured tuple `{signatureType, v, r, s}`
//! rather than v3's packed blob. The typed-data schemas are the
//! `ERC721Order` / `ERC1155Order` structs with their nested `Fee[]` and
//! `Property[]` array types; the domain is fixed per chain and exchange
//! proxy.

use crate::contracts;
use crate::signer::{SignError, SignerLike};
use alloy_primitives::{Address, B256, Signature};
use alloy_sol_types::{Eip712Domain, SolStruct, eip712_domain};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::order::NftOrder;

/// The v4 EIP-712 domain name.
pub const EIP712_DOMAIN_NAME: &str = "ZeroEx";

/// The v4 EIP-712 domain version.
pub const EIP712_DOMAIN_VERSION: &str = "1.0.0";

/// The v4 signature scheme, carried as a numeric field rather than a
/// trailing tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SignatureTypeV4 {
    /// Reserved; always rejected on-chain.
    Illegal = 0,
    /// Explicitly invalid.
    Invalid = 1,
    /// A standard EIP-712 typed-data signature.
    Eip712 = 2,
    /// The order hash was pre-signed on-chain.
    PreSigned = 4,
}

impl SignatureTypeV4 {
    /// The numeric wire representation.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl Serialize for SignatureTypeV4 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for SignatureTypeV4 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(Self::Illegal),
            1 => Ok(Self::Invalid),
            2 => Ok(Self::Eip712),
            4 => Ok(Self::PreSigned),
            other => Err(serde::de::Error::custom(format!(
                "unknown v4 signature type {other}"
            ))),
        }
    }
}

/// A structured v4 signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftSignature {
    /// The scheme; `2` for a standard EIP-712 signature.
    pub signature_type: SignatureTypeV4,
    /// The recovery byte, normalized to 27/28.
    pub v: u8,
    /// The `r` scalar.
    pub r: B256,
    /// The `s` scalar.
    pub s: B256,
}

impl NftSignature {
    /// Wraps a recoverable signature as a standard EIP-712 tuple.
    #[must_use]
    pub fn from_signature(signature: &Signature) -> Self {
        Self {
            signature_type: SignatureTypeV4::Eip712,
            v: 27 + u8::from(signature.v()),
            r: B256::from(signature.r()),
            s: B256::from(signature.s()),
        }
    }

    /// Converts to the ABI tuple passed to the exchange proxy.
    #[must_use]
    pub fn to_sol(&self) -> contracts::IExchangeV4::Signature {
        contracts::IExchangeV4::Signature {
            signatureType: self.signature_type.as_u8(),
            v: self.v,
            r: self.r,
            s: self.s,
        }
    }

    /// Reassembles the recoverable `(r, s, v)` signature for address
    /// recovery. Only the EIP-712 scheme is recoverable off-chain.
    #[must_use]
    pub fn to_recoverable(&self) -> Option<Signature> {
        if self.signature_type != SignatureTypeV4::Eip712 {
            return None;
        }
        let mut raw = [0u8; 65];
        raw[..32].copy_from_slice(self.r.as_slice());
        raw[32..64].copy_from_slice(self.s.as_slice());
        raw[64] = self.v;
        Signature::from_raw(&raw).ok()
    }
}

/// A v4 order plus the maker's structured signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedNftOrder {
    /// The signed order record.
    #[serde(flatten)]
    pub order: NftOrder,
    /// The maker's signature tuple.
    pub signature: NftSignature,
}

/// Builds the v4 signing domain for a chain and exchange proxy address.
#[must_use]
pub fn signing_domain(chain_id: u64, exchange_proxy: Address) -> Eip712Domain {
    eip712_domain! {
        name: EIP712_DOMAIN_NAME,
        version: EIP712_DOMAIN_VERSION,
        chain_id: chain_id,
        verifying_contract: exchange_proxy,
    }
}

/// Computes the deterministic EIP-712 hash of a v4 order.
#[must_use]
pub fn hash_nft_order(order: &NftOrder, chain_id: u64, exchange_proxy: Address) -> B256 {
    let domain = signing_domain(chain_id, exchange_proxy);
    match order {
        NftOrder::Erc721(o) => o.to_sol().eip712_signing_hash(&domain),
        NftOrder::Erc1155(o) => o.to_sol().eip712_signing_hash(&domain),
    }
}

/// Signs a v4 order with the standard EIP-712 scheme.
///
/// # Errors
///
/// Returns [`SignError`] when the signer fails.
pub async fn sign_nft_order<S: SignerLike>(
    order: &NftOrder,
    signer: &S,
    chain_id: u64,
    exchange_proxy: Address,
) -> Result<SignedNftOrder, SignError> {
    let digest = hash_nft_order(order, chain_id, exchange_proxy);
    let raw = signer.sign_hash(&digest).await?;
    Ok(SignedNftOrder {
        order: order.clone(),
        signature: NftSignature::from_signature(&raw),
    })
}

/// Marks a v4 order as presigned: validity is established on-chain rather
/// than by a recoverable signature.
#[must_use]
pub fn presigned_nft_order(order: NftOrder) -> SignedNftOrder {
    SignedNftOrder {
        order,
        signature: NftSignature {
            signature_type: SignatureTypeV4::PreSigned,
            v: 0,
            r: B256::ZERO,
            s: B256::ZERO,
        },
    }
}

/// Verifies a structured v4 signature against the order's maker.
///
/// This is a predicate: malformed or non-recoverable signatures are simply
/// "not valid", never an error.
#[must_use]
pub fn verify_nft_order_signature(
    order: &NftOrder,
    signature: &NftSignature,
    chain_id: u64,
    exchange_proxy: Address,
) -> bool {
    let Some(recoverable) = signature.to_recoverable() else {
        return false;
    };
    let digest = hash_nft_order(order, chain_id, exchange_proxy);
    match recoverable.recover_address_from_prehash(&digest) {
        Ok(recovered) => recovered == order.maker(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::networks::v4_contracts;
    use crate::v4::order::{NftOrderOptions, build_order};
    use alloy_primitives::address;
    use alloy_signer_local::PrivateKeySigner;
    use nftswap::{Asset, Erc20Asset, Erc1155Asset, Erc721Asset, TokenAmount};

    fn proxy() -> Address {
        v4_contracts(1).unwrap().exchange_proxy
    }

    fn fixture_sell_order(maker: Address) -> NftOrder {
        let nft = Asset::Erc721(Erc721Asset {
            token_address: address!("72d39e53a1c1f093e164a95b6b78a3f87cf7364b"),
            token_id: TokenAmount::from(1u64),
        });
        let weth = Asset::Erc20(Erc20Asset {
            token_address: address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
            amount: TokenAmount::from(1_000_000u64),
        });
        build_order(
            &nft,
            &weth,
            maker,
            &NftOrderOptions::default().with_nonce(TokenAmount::from(77u64)),
        )
        .unwrap()
    }

    fn fixture_erc1155_order(maker: Address) -> NftOrder {
        let sft = Asset::Erc1155(Erc1155Asset {
            token_address: address!("fa85acaaff1d2fd159aa8454222da76bdd8fa956"),
            token_id: TokenAmount::from(7u64),
            amount: Some(TokenAmount::from(4u64)),
        });
        let weth = Asset::Erc20(Erc20Asset {
            token_address: address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
            amount: TokenAmount::from(500u64),
        });
        build_order(
            &weth,
            &sft,
            maker,
            &NftOrderOptions::default().with_nonce(TokenAmount::from(78u64)),
        )
        .unwrap()
    }

    #[test]
    fn hash_is_deterministic_per_variant() {
        let order = fixture_sell_order(address!("8cfcbc90e5ae28b5d2ae00456044e2f4f15b2e35"));
        assert_eq!(
            hash_nft_order(&order, 1, proxy()),
            hash_nft_order(&order, 1, proxy())
        );
        assert_ne!(
            hash_nft_order(&order, 1, proxy()),
            hash_nft_order(&order, 137, proxy())
        );

        let erc1155 = fixture_erc1155_order(address!("8cfcbc90e5ae28b5d2ae00456044e2f4f15b2e35"));
        assert_ne!(
            hash_nft_order(&order, 1, proxy()),
            hash_nft_order(&erc1155, 1, proxy())
        );
    }

    #[tokio::test]
    async fn signature_roundtrips_for_both_variants() {
        let signer = PrivateKeySigner::random();

        for order in [
            fixture_sell_order(signer.address()),
            fixture_erc1155_order(signer.address()),
        ] {
            let signed = sign_nft_order(&order, &signer, 1, proxy()).await.unwrap();
            assert_eq!(signed.signature.signature_type, SignatureTypeV4::Eip712);
            assert!(matches!(signed.signature.v, 27 | 28));
            assert!(verify_nft_order_signature(
                &signed.order,
                &signed.signature,
                1,
                proxy()
            ));
        }
    }

    #[tokio::test]
    async fn mutated_order_fails_verification() {
        let signer = PrivateKeySigner::random();
        let order = fixture_sell_order(signer.address());
        let signed = sign_nft_order(&order, &signer, 1, proxy()).await.unwrap();

        let NftOrder::Erc721(mut tampered) = signed.order.clone() else {
            panic!("wrong variant");
        };
        tampered.erc20_token_amount = TokenAmount::from(2u64);
        assert!(!verify_nft_order_signature(
            &NftOrder::Erc721(tampered),
            &signed.signature,
            1,
            proxy()
        ));
    }

    #[test]
    fn presigned_orders_are_not_off_chain_verifiable() {
        let order = fixture_sell_order(address!("8cfcbc90e5ae28b5d2ae00456044e2f4f15b2e35"));
        let signed = presigned_nft_order(order);
        assert_eq!(
            signed.signature.signature_type,
            SignatureTypeV4::PreSigned
        );
        assert!(!verify_nft_order_signature(
            &signed.order,
            &signed.signature,
            1,
            proxy()
        ));
    }

    #[test]
    fn signed_order_wire_format_nests_the_signature() {
        let order = fixture_sell_order(address!("8cfcbc90e5ae28b5d2ae00456044e2f4f15b2e35"));
        let signed = presigned_nft_order(order);
        let json = serde_json::to_value(&signed).unwrap();
        // Order fields are flattened; the signature is a nested object.
        assert!(json.get("erc721Token").is_some());
        assert_eq!(json["signature"]["signatureType"], 4);

        let back: SignedNftOrder = serde_json::from_value(json).unwrap();
        assert_eq!(back, signed);
    }
}
