//! Signer abstraction and contract-wallet detection.
//!
//! Signing strategy selection (EOA vs EIP-1271) needs to know whether the
//! maker address is a smart-contract wallet. The default probe checks for
//! deployed bytecode, but some wallet providers sit behind proxies whose
//! `getCode` lazily reports empty; [`WalletClassifier`] is a trait so those
//! cases plug in without hard-coding any vendor.

use alloy_primitives::{Address, FixedBytes, Signature};
use alloy_provider::Provider;
use alloy_signer_local::PrivateKeySigner;
use std::future::Future;
use std::sync::Arc;

/// A trait that abstracts signing operations, allowing both owned signers
/// and Arc-wrapped signers.
///
/// This is necessary because Alloy's `Signer` trait is not implemented for
/// `Arc<T>`, but users may want to share signers via `Arc` (especially when
/// `PrivateKeySigner` doesn't implement `Clone`).
pub trait SignerLike: Send + Sync {
    /// Returns the address of the signer.
    fn address(&self) -> Address;

    /// Signs the given 32-byte hash directly.
    fn sign_hash(
        &self,
        hash: &FixedBytes<32>,
    ) -> impl Future<Output = Result<Signature, alloy_signer::Error>> + Send;

    /// Signs an arbitrary message with the EIP-191 prefix.
    fn sign_message(
        &self,
        message: &[u8],
    ) -> impl Future<Output = Result<Signature, alloy_signer::Error>> + Send;
}

impl SignerLike for PrivateKeySigner {
    fn address(&self) -> Address {
        Self::address(self)
    }

    async fn sign_hash(&self, hash: &FixedBytes<32>) -> Result<Signature, alloy_signer::Error> {
        alloy_signer::Signer::sign_hash(self, hash).await
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Signature, alloy_signer::Error> {
        alloy_signer::Signer::sign_message(self, message).await
    }
}

impl<T: SignerLike + Send + Sync> SignerLike for Arc<T> {
    fn address(&self) -> Address {
        (**self).address()
    }

    async fn sign_hash(&self, hash: &FixedBytes<32>) -> Result<Signature, alloy_signer::Error> {
        (**self).sign_hash(hash).await
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Signature, alloy_signer::Error> {
        (**self).sign_message(message).await
    }
}

/// What kind of account an address is, for signing-strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletKind {
    /// An externally-owned account; sign with plain EIP-712.
    Eoa,
    /// A smart-contract wallet; sign via the EIP-1271 scheme.
    Contract,
}

/// A classification probe failed (e.g. the provider call errored).
#[derive(Debug, Clone, thiserror::Error)]
#[error("wallet classification failed: {0}")]
pub struct ClassifyError(pub String);

/// Decides whether an address is a contract wallet.
///
/// Implementations may probe the chain, consult a static list, or combine
/// both. The signing pipeline consults the classifier only when signature
/// autodetection is enabled and no explicit signature type was given.
pub trait WalletClassifier: Send + Sync {
    /// Classifies `address` as an EOA or a contract wallet.
    fn classify(
        &self,
        address: Address,
    ) -> impl Future<Output = Result<WalletKind, ClassifyError>> + Send;
}

/// The default classifier: an address with deployed bytecode is a contract
/// wallet.
#[derive(Debug, Clone)]
pub struct BytecodeClassifier<P> {
    provider: P,
}

impl<P> BytecodeClassifier<P> {
    /// Creates a classifier backed by the given provider.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P: Provider + Send + Sync> WalletClassifier for BytecodeClassifier<P> {
    async fn classify(&self, address: Address) -> Result<WalletKind, ClassifyError> {
        let code = self
            .provider
            .get_code_at(address)
            .await
            .map_err(|e| ClassifyError(e.to_string()))?;
        if code.is_empty() {
            Ok(WalletKind::Eoa)
        } else {
            Ok(WalletKind::Contract)
        }
    }
}

/// Errors from signing an order.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SignError {
    /// The underlying signer failed.
    #[error(transparent)]
    Signer(#[from] alloy_signer::Error),
    /// Contract-wallet detection failed.
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    /// The requested signature type has no local signing procedure.
    #[error("signature type {0:?} cannot be produced locally")]
    UnsupportedSignatureType(crate::signature::SignatureType),
}
