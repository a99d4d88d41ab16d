//! v3 order hashing, signing, and signature verification.
//!
//! The order hash is the EIP-712 struct hash under the fixed v3 domain;
//! the same hash identifies the order on-chain, so it must match the
//! contract's derivation bit-for-bit.
//!
//! Signing strategies:
//! - EOA: sign the typed-data hash directly, pack as `r ‖ s ‖ v` plus the
//!   EIP-712 tag byte.
//! - EIP-1271 contract wallets: ABI-encode the order together with its own
//!   hash as an `OrderWithHash` call payload, message-sign the keccak of
//!   that payload, tag with the EIP-1271 scheme byte.
//! - Presigned: the signature is the bare presigned tag byte; validity is
//!   established on-chain, out of band.

use crate::contracts::IEip1271Data;
use crate::signature::{PackedSignature, SignatureType};
use crate::signer::{SignError, SignerLike, WalletClassifier, WalletKind};
use crate::v3::order::{Order, SignedOrder};
use alloy_primitives::{Address, B256, Bytes, keccak256, utils::eip191_hash_message};
use alloy_sol_types::{Eip712Domain, SolCall, SolStruct, eip712_domain};

/// The v3 EIP-712 domain name.
pub const EIP712_DOMAIN_NAME: &str = "0x Protocol";

/// The v3 EIP-712 domain version.
pub const EIP712_DOMAIN_VERSION: &str = "3.0.0";

/// Builds the v3 signing domain for a chain and exchange address.
#[must_use]
pub fn signing_domain(chain_id: u64, exchange: Address) -> Eip712Domain {
    eip712_domain! {
        name: EIP712_DOMAIN_NAME,
        version: EIP712_DOMAIN_VERSION,
        chain_id: chain_id,
        verifying_contract: exchange,
    }
}

/// Computes the deterministic EIP-712 hash of an order.
///
/// Same inputs always produce the same 32-byte hash; it doubles as the
/// order's identifier for fill-status lookups.
#[must_use]
pub fn hash_order(order: &Order, chain_id: u64, exchange: Address) -> B256 {
    order
        .to_sol()
        .eip712_signing_hash(&signing_domain(chain_id, exchange))
}

/// Signs a v3 order.
///
/// `signature_type` selects the strategy; `None` defaults to the standard
/// EOA EIP-712 path. Use [`sign_order_with_classifier`] to autodetect
/// contract wallets instead.
///
/// # Errors
///
/// Returns [`SignError`] when the signer fails or the requested type has
/// no local procedure (e.g. validator signatures).
pub async fn sign_order<S: SignerLike>(
    order: &Order,
    signer: &S,
    chain_id: u64,
    exchange: Address,
    signature_type: Option<SignatureType>,
) -> Result<SignedOrder, SignError> {
    let signature_type = signature_type.unwrap_or(SignatureType::Eip712);
    let signature = match signature_type {
        SignatureType::Eip712 => {
            let digest = hash_order(order, chain_id, exchange);
            let signature = signer.sign_hash(&digest).await?;
            PackedSignature::from_signature(&signature, SignatureType::Eip712).to_bytes()
        }
        SignatureType::EthSign => {
            let digest = hash_order(order, chain_id, exchange);
            let signature = signer.sign_message(digest.as_slice()).await?;
            PackedSignature::from_signature(&signature, SignatureType::EthSign).to_bytes()
        }
        SignatureType::Eip1271Wallet => {
            let payload = eip1271_payload(order, chain_id, exchange);
            let digest = keccak256(&payload);
            let signature = signer.sign_message(digest.as_slice()).await?;
            PackedSignature::from_signature(&signature, SignatureType::Eip1271Wallet).to_bytes()
        }
        SignatureType::PreSigned => Bytes::from(vec![SignatureType::PreSigned.tag()]),
        other => return Err(SignError::UnsupportedSignatureType(other)),
    };
    Ok(SignedOrder {
        order: order.clone(),
        signature,
    })
}

/// Signs a v3 order, choosing the strategy by probing the signer address
/// with `classifier`: contract wallets take the EIP-1271 path, everything
/// else the standard EOA path.
///
/// # Errors
///
/// Returns [`SignError`] when classification or signing fails.
pub async fn sign_order_with_classifier<S: SignerLike, C: WalletClassifier>(
    order: &Order,
    signer: &S,
    chain_id: u64,
    exchange: Address,
    classifier: &C,
) -> Result<SignedOrder, SignError> {
    let kind = classifier.classify(signer.address()).await?;
    let signature_type = match kind {
        WalletKind::Eoa => SignatureType::Eip712,
        WalletKind::Contract => SignatureType::Eip1271Wallet,
    };
    sign_order(order, signer, chain_id, exchange, Some(signature_type)).await
}

/// Verifies a packed v3 signature against the order's maker.
///
/// This is a predicate: any malformed or non-recoverable signature is
/// simply "not valid", never an error. Only the recoverable schemes
/// (EIP-712 and `eth_sign`) can be verified off-chain.
#[must_use]
pub fn verify_order_signature(
    order: &Order,
    signature: &[u8],
    chain_id: u64,
    exchange: Address,
) -> bool {
    let Ok(packed) = PackedSignature::parse(signature) else {
        return false;
    };
    let order_hash = hash_order(order, chain_id, exchange);
    let digest = match packed.signature_type {
        SignatureType::Eip712 => order_hash,
        SignatureType::EthSign => eip191_hash_message(order_hash),
        _ => return false,
    };
    let Ok(recoverable) = packed.to_recoverable() else {
        return false;
    };
    match recoverable.recover_address_from_prehash(&digest) {
        Ok(recovered) => recovered == order.maker_address,
        Err(_) => false,
    }
}

/// ABI-encodes the EIP-1271 `OrderWithHash` payload: the order plus its
/// own EIP-712 hash.
#[must_use]
pub fn eip1271_payload(order: &Order, chain_id: u64, exchange: Address) -> Vec<u8> {
    let order_hash = hash_order(order, chain_id, exchange);
    IEip1271Data::OrderWithHashCall {
        order: order.to_sol(),
        orderHash: order_hash,
    }
    .abi_encode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::networks::v3_contracts;
    use crate::v3::order::{BuildOrderOptions, build_order};
    use alloy_primitives::address;
    use alloy_signer_local::PrivateKeySigner;
    use nftswap::{Asset, Erc20Asset, Erc721Asset, TokenAmount};

    fn fixture_order(maker: Address) -> Order {
        let maker_asset = Asset::Erc721(Erc721Asset {
            token_address: address!("72d39e53a1c1f093e164a95b6b78a3f87cf7364b"),
            token_id: TokenAmount::from(1u64),
        });
        let taker_asset = Asset::Erc20(Erc20Asset {
            token_address: address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
            amount: TokenAmount::from(1_000_000u64),
        });
        build_order(
            &[maker_asset],
            &[taker_asset],
            maker,
            &BuildOrderOptions::default().with_salt(TokenAmount::from(12345u64)),
        )
        .unwrap()
    }

    fn exchange() -> Address {
        v3_contracts(1).unwrap().exchange
    }

    #[test]
    fn hash_is_deterministic_and_32_bytes() {
        let order = fixture_order(address!("8cfcbc90e5ae28b5d2ae00456044e2f4f15b2e35"));
        let first = hash_order(&order, 1, exchange());
        let second = hash_order(&order, 1, exchange());
        assert_eq!(first, second);
        assert_eq!(format!("{first}").len(), 66); // 0x + 64 hex chars

        // Different domain inputs change the hash.
        assert_ne!(first, hash_order(&order, 137, exchange()));
    }

    #[tokio::test]
    async fn eoa_signature_roundtrips() {
        let signer = PrivateKeySigner::random();
        let order = fixture_order(signer.address());
        let signed = sign_order(&order, &signer, 1, exchange(), None).await.unwrap();

        assert_eq!(signed.signature.len(), 66);
        assert_eq!(signed.signature[65], SignatureType::Eip712.tag());
        assert!(verify_order_signature(
            &signed.order,
            &signed.signature,
            1,
            exchange()
        ));
    }

    #[tokio::test]
    async fn mutated_order_fails_verification() {
        let signer = PrivateKeySigner::random();
        let order = fixture_order(signer.address());
        let signed = sign_order(&order, &signer, 1, exchange(), None).await.unwrap();

        let mut tampered = signed.order.clone();
        tampered.taker_asset_amount = TokenAmount::from(2_000_000u64);
        assert!(!verify_order_signature(
            &tampered,
            &signed.signature,
            1,
            exchange()
        ));

        // Wrong chain id also fails.
        assert!(!verify_order_signature(
            &signed.order,
            &signed.signature,
            137,
            exchange()
        ));
    }

    #[tokio::test]
    async fn eth_sign_signature_verifies() {
        let signer = PrivateKeySigner::random();
        let order = fixture_order(signer.address());
        let signed = sign_order(
            &order,
            &signer,
            1,
            exchange(),
            Some(SignatureType::EthSign),
        )
        .await
        .unwrap();
        assert_eq!(signed.signature[65], SignatureType::EthSign.tag());
        assert!(verify_order_signature(
            &signed.order,
            &signed.signature,
            1,
            exchange()
        ));
    }

    #[tokio::test]
    async fn presigned_orders_carry_only_the_tag_byte() {
        let signer = PrivateKeySigner::random();
        let order = fixture_order(signer.address());
        let signed = sign_order(
            &order,
            &signer,
            1,
            exchange(),
            Some(SignatureType::PreSigned),
        )
        .await
        .unwrap();
        assert_eq!(signed.signature.as_ref(), &[0x06]);
        // Not recoverable off-chain, so the predicate reports invalid.
        assert!(!verify_order_signature(
            &signed.order,
            &signed.signature,
            1,
            exchange()
        ));
    }

    #[tokio::test]
    async fn malformed_signatures_return_false_not_errors() {
        let signer = PrivateKeySigner::random();
        let order = fixture_order(signer.address());
        assert!(!verify_order_signature(&order, &[], 1, exchange()));
        assert!(!verify_order_signature(&order, &[0u8; 66], 1, exchange()));
        assert!(!verify_order_signature(&order, &[0xff; 65], 1, exchange()));
    }

    #[tokio::test]
    async fn unsupported_type_is_rejected_before_signing() {
        let signer = PrivateKeySigner::random();
        let order = fixture_order(signer.address());
        let err = sign_order(
            &order,
            &signer,
            1,
            exchange(),
            Some(SignatureType::Validator),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            SignError::UnsupportedSignatureType(SignatureType::Validator)
        ));
    }
}
