//! Asset approval status and approval transactions.
//!
//! Before an order can be filled, the exchange's operator contract (a v3
//! asset proxy or the v4 exchange proxy) must be approved to move the
//! asset. The check and the transaction both dispatch on the token
//! standard:
//!
//! - ERC-20: allowance compared against a near-max threshold
//! - ERC-721: collection-wide `isApprovedForAll` plus the weaker per-token
//!   `getApproved` grant, both reported
//! - ERC-1155: collection-wide approval only (the standard has no
//!   per-token grant)

use crate::call::{SubmitError, submit};
use crate::contracts::{IERC20, IERC721, IERC1155};
use crate::gas::GasBuffer;
use crate::networks::V3Contracts;
use alloy_primitives::{Address, Bytes, TxHash, TxKind, U256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::{TransactionInput, TransactionRequest};
use alloy_sol_types::SolCall;
use nftswap::Asset;
use serde::{Deserialize, Serialize};

/// Errors from approval reads or transactions.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApprovalError {
    /// A contract call or transaction submission failed.
    #[error(transparent)]
    Contract(#[from] alloy_contract::Error),
    /// The transaction was submitted but dropped or failed to confirm.
    #[error("transaction dropped or failed to confirm: {0}")]
    Confirmation(String),
}

impl From<SubmitError> for ApprovalError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Contract(e) => Self::Contract(e),
            SubmitError::Confirmation(msg) => Self::Confirmation(msg),
        }
    }
}

/// Whether the operator may move an asset on the owner's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalStatus {
    /// Collection-wide (or allowance-based) approval.
    pub contract_approved: bool,
    /// Per-token-id approval. Only ERC-721 has this weaker grant; `None`
    /// for the other standards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_id_approved: Option<bool>,
}

impl ApprovalStatus {
    /// Returns `true` if any grant lets the operator move the asset.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.contract_approved || self.token_id_approved == Some(true)
    }
}

/// The default slack subtracted from the max allowance when deciding
/// whether an ERC-20 approval still counts as unlimited.
///
/// Some providers round large allowances; requiring the literal max would
/// flag those as unapproved. The exact width is a tunable, not a protocol
/// constant.
#[must_use]
pub fn default_allowance_buffer() -> U256 {
    U256::ONE << 100
}

/// ERC-20 approval predicate: the allowance counts as unlimited when it is
/// within `buffer` of the maximum value.
#[must_use]
pub fn erc20_contract_approved(allowance: U256, buffer: U256) -> bool {
    allowance >= U256::MAX - buffer
}

/// Combines the two ERC-721 approval signals into a status.
#[must_use]
pub fn erc721_approval_status(
    approved_for_all: bool,
    approved_address: Address,
    operator: Address,
) -> ApprovalStatus {
    ApprovalStatus {
        contract_approved: approved_for_all,
        token_id_approved: Some(approved_address == operator),
    }
}

/// Reads the current approval status of `asset` for `operator`.
///
/// `allowance_buffer` tunes the ERC-20 near-max threshold;
/// `None` uses [`default_allowance_buffer`].
///
/// # Errors
///
/// Returns [`ApprovalError`] when a contract read fails.
pub async fn load_approval_status<P: Provider>(
    provider: P,
    asset: &Asset,
    owner: Address,
    operator: Address,
    allowance_buffer: Option<U256>,
) -> Result<ApprovalStatus, ApprovalError> {
    let status = match asset {
        Asset::Erc20(erc20) => {
            let token = IERC20::new(erc20.token_address, provider);
            let allowance = token.allowance(owner, operator).call().await?;
            let buffer = allowance_buffer.unwrap_or_else(default_allowance_buffer);
            ApprovalStatus {
                contract_approved: erc20_contract_approved(allowance, buffer),
                token_id_approved: None,
            }
        }
        Asset::Erc721(erc721) => {
            let token = IERC721::new(erc721.token_address, &provider);
            let approved_for_all = token.isApprovedForAll(owner, operator).call().await?;
            let approved_address = token.getApproved(erc721.token_id.inner()).call().await?;
            erc721_approval_status(approved_for_all, approved_address, operator)
        }
        Asset::Erc1155(erc1155) => {
            let token = IERC1155::new(erc1155.token_address, provider);
            let approved = token.isApprovedForAll(owner, operator).call().await?;
            ApprovalStatus {
                contract_approved: approved,
                token_id_approved: None,
            }
        }
    };
    tracing::debug!(
        asset = asset.type_name(),
        owner = %owner,
        operator = %operator,
        approved = status.is_approved(),
        "loaded approval status"
    );
    Ok(status)
}

/// Maps a v3 asset to the proxy contract that must be approved to move it.
#[must_use]
pub const fn operator_for_asset_v3(contracts: &V3Contracts, asset: &Asset) -> Address {
    match asset {
        Asset::Erc20(_) => contracts.erc20_proxy,
        Asset::Erc721(_) => contracts.erc721_proxy,
        Asset::Erc1155(_) => contracts.erc1155_proxy,
    }
}

/// A prepared approval (or revocation) transaction, dispatched by token
/// standard.
///
/// `approve = false` produces the revoking form: a zero allowance for
/// ERC-20, `setApprovalForAll(operator, false)` for the NFT standards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreparedApproval {
    /// `approve(operator, amount)` on an ERC-20 token.
    Erc20 {
        /// The token contract.
        token: Address,
        /// The spender being granted (or revoked).
        operator: Address,
        /// Max for a grant, zero for a revocation.
        amount: U256,
    },
    /// `setApprovalForAll(operator, approved)` on an ERC-721 collection.
    Erc721 {
        /// The token contract.
        token: Address,
        /// The operator being granted (or revoked).
        operator: Address,
        /// The grant flag.
        approved: bool,
    },
    /// `setApprovalForAll(operator, approved)` on an ERC-1155 collection.
    Erc1155 {
        /// The token contract.
        token: Address,
        /// The operator being granted (or revoked).
        operator: Address,
        /// The grant flag.
        approved: bool,
    },
}

impl PreparedApproval {
    /// Prepares the approval (or, with `approve = false`, the revocation)
    /// of `asset` for `operator`.
    #[must_use]
    pub const fn new(asset: &Asset, operator: Address, approve: bool) -> Self {
        match asset {
            Asset::Erc20(erc20) => Self::Erc20 {
                token: erc20.token_address,
                operator,
                amount: if approve { U256::MAX } else { U256::ZERO },
            },
            Asset::Erc721(erc721) => Self::Erc721 {
                token: erc721.token_address,
                operator,
                approved: approve,
            },
            Asset::Erc1155(erc1155) => Self::Erc1155 {
                token: erc1155.token_address,
                operator,
                approved: approve,
            },
        }
    }

    /// The token contract this transaction targets.
    #[must_use]
    pub const fn to(&self) -> Address {
        match self {
            Self::Erc20 { token, .. } | Self::Erc721 { token, .. } | Self::Erc1155 { token, .. } => {
                *token
            }
        }
    }

    /// The ABI-encoded calldata.
    #[must_use]
    pub fn calldata(&self) -> Bytes {
        match self {
            Self::Erc20 {
                operator, amount, ..
            } => IERC20::approveCall {
                spender: *operator,
                amount: *amount,
            }
            .abi_encode()
            .into(),
            Self::Erc721 {
                operator, approved, ..
            } => IERC721::setApprovalForAllCall {
                operator: *operator,
                approved: *approved,
            }
            .abi_encode()
            .into(),
            Self::Erc1155 {
                operator, approved, ..
            } => IERC1155::setApprovalForAllCall {
                operator: *operator,
                approved: *approved,
            }
            .abi_encode()
            .into(),
        }
    }

    /// Builds an unsigned transaction request for callers that manage their
    /// own submission.
    #[must_use]
    pub fn into_transaction_request(self, from: Address) -> TransactionRequest {
        TransactionRequest {
            from: Some(from),
            to: Some(TxKind::Call(self.to())),
            input: TransactionInput::new(self.calldata()),
            ..Default::default()
        }
    }

    /// Submits the transaction through `provider` and waits for inclusion.
    ///
    /// The provider must be able to sign (a wallet-filler provider or a
    /// node holding the account).
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError`] when estimation, submission, or
    /// confirmation fails.
    pub async fn send<P: Provider>(
        &self,
        provider: P,
        chain_id: u64,
        gas_buffer: GasBuffer,
    ) -> Result<TxHash, ApprovalError> {
        let hash = match self {
            Self::Erc20 {
                token,
                operator,
                amount,
            } => {
                let contract = IERC20::new(*token, &provider);
                let call = contract.approve(*operator, *amount);
                submit(call, chain_id, gas_buffer).await?
            }
            Self::Erc721 {
                token,
                operator,
                approved,
            } => {
                let contract = IERC721::new(*token, &provider);
                let call = contract.setApprovalForAll(*operator, *approved);
                submit(call, chain_id, gas_buffer).await?
            }
            Self::Erc1155 {
                token,
                operator,
                approved,
            } => {
                let contract = IERC1155::new(*token, &provider);
                let call = contract.setApprovalForAll(*operator, *approved);
                submit(call, chain_id, gas_buffer).await?
            }
        };
        tracing::info!(to = %self.to(), tx = %hash, "approval transaction confirmed");
        Ok(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use nftswap::{Erc20Asset, Erc721Asset, TokenAmount};

    const OPERATOR: Address = address!("95e6f48254609a6ee006f7d493c8e5fb97094cef");

    #[test]
    fn erc20_threshold_tolerates_provider_rounding() {
        let buffer = default_allowance_buffer();
        assert!(erc20_contract_approved(U256::MAX, buffer));
        assert!(erc20_contract_approved(U256::MAX - U256::from(1u64), buffer));
        assert!(erc20_contract_approved(U256::MAX - buffer, buffer));
        assert!(!erc20_contract_approved(U256::from(1_000_000u64), buffer));
        assert!(!erc20_contract_approved(U256::ZERO, buffer));
    }

    #[test]
    fn erc721_token_id_approval_is_reported_separately() {
        // Approved individually by token id but not collection-wide.
        let status = erc721_approval_status(false, OPERATOR, OPERATOR);
        assert!(!status.contract_approved);
        assert_eq!(status.token_id_approved, Some(true));
        assert!(status.is_approved());

        let status = erc721_approval_status(false, Address::ZERO, OPERATOR);
        assert!(!status.is_approved());
    }

    #[test]
    fn revocation_zeroes_the_grant() {
        let erc20 = Asset::Erc20(Erc20Asset {
            token_address: address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
            amount: TokenAmount::from(1u64),
        });
        let PreparedApproval::Erc20 { amount, .. } = PreparedApproval::new(&erc20, OPERATOR, false)
        else {
            panic!("wrong dispatch");
        };
        assert_eq!(amount, U256::ZERO);

        let grant = PreparedApproval::new(&erc20, OPERATOR, true);
        let PreparedApproval::Erc20 { amount, .. } = grant else {
            panic!("wrong dispatch");
        };
        assert_eq!(amount, U256::MAX);
    }

    #[test]
    fn calldata_uses_the_standard_selectors() {
        let erc721 = Asset::Erc721(Erc721Asset {
            token_address: address!("72d39e53a1c1f093e164a95b6b78a3f87cf7364b"),
            token_id: TokenAmount::from(1u64),
        });
        let prepared = PreparedApproval::new(&erc721, OPERATOR, true);
        let calldata = prepared.calldata();
        assert_eq!(calldata[..4], IERC721::setApprovalForAllCall::SELECTOR);
        assert_eq!(prepared.to(), erc721.token_address());

        let request = prepared.into_transaction_request(OPERATOR);
        assert_eq!(request.to, Some(TxKind::Call(erc721.token_address())));
    }
}
