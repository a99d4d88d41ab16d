//! v4 fills, cancellations, and order-status polling.
//!
//! Fill dispatch is structural: the NFT standard (which order variant) and
//! the trade direction together select one of four exchange entry points.
//! A maker selling an NFT is filled by `buyERC721`/`buyERC1155`; a maker
//! bidding is filled by `sellERC721`/`sellERC1155`. A bid can also be
//! filled without a prior approval transaction by safe-transferring the
//! NFT to the exchange proxy with the order and signature as transfer
//! data.

use crate::call::{SubmitError, submit};
use crate::contracts::{IERC721, IERC1155, IExchangeV4};
use crate::gas::GasBuffer;
use crate::networks::NATIVE_TOKEN_ADDRESS;
use crate::v4::eip712::SignedNftOrder;
use crate::v4::order::{NftOrder, TradeDirection};
use alloy_primitives::{Address, B256, Bytes, TxHash, U256};
use alloy_provider::Provider;
use alloy_sol_types::{SolCall, SolValue};
use nftswap::status::UnknownStatusError;
use nftswap::{OrderStatusV4, TokenAmount};
use std::future;
use std::time::Duration;

/// Errors from v4 exchange interactions.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum NftFillError {
    /// A contract call or transaction submission failed.
    #[error(transparent)]
    Contract(#[from] alloy_contract::Error),
    /// The transaction was submitted but dropped or failed to confirm.
    #[error("transaction dropped or failed to confirm: {0}")]
    Confirmation(String),
    /// The contract reported an unrecognized status code.
    #[error(transparent)]
    UnknownStatus(#[from] UnknownStatusError),
    /// The order reached a terminal state other than fully filled while
    /// being awaited with `throw_on_unexpected` set.
    #[error("order reached terminal status '{0}' instead of being filled")]
    UnexpectedStatus(OrderStatusV4),
    /// Approval-free selling only applies to bids (the maker must be the
    /// buyer).
    #[error("sell-without-approval requires a buy-side (bid) order")]
    NotABid,
}

impl From<SubmitError> for NftFillError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Contract(e) => Self::Contract(e),
            SubmitError::Confirmation(msg) => Self::Confirmation(msg),
        }
    }
}

/// Optional knobs for filling a v4 order.
#[derive(Debug, Clone, Default)]
pub struct FillNftOrderOverrides {
    /// Native-token value to attach. Defaults to the order's ERC-20 amount
    /// plus fees when the order is priced in the native token.
    pub value: Option<U256>,
    /// Units to trade against an ERC-1155 order; defaults to the order's
    /// full amount.
    pub erc1155_fill_amount: Option<TokenAmount>,
    /// Unwrap the wrapped native token when selling into a bid.
    pub unwrap_native_token: bool,
    /// Opaque callback data forwarded by the exchange; defaults to `0x`.
    pub callback_data: Option<Bytes>,
    /// Gas buffering policy.
    pub gas_buffer: GasBuffer,
}

/// A decoded v4 ERC-1155 order-info tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NftOrderInfo {
    /// The order's EIP-712 hash, as derived on-chain.
    pub order_hash: B256,
    /// The contract-reported lifecycle status.
    pub status: OrderStatusV4,
    /// The total order amount.
    pub order_amount: u128,
    /// The unfilled remainder.
    pub remaining_amount: u128,
}

/// The native-token value a fill must attach, when the order is a sell
/// priced in the native pseudo-token: the ERC-20 amount plus all fees.
#[must_use]
pub fn native_fill_value(order: &NftOrder) -> Option<U256> {
    if order.direction() != TradeDirection::SellNft
        || order.erc20_token() != NATIVE_TOKEN_ADDRESS
    {
        return None;
    }
    let total = order
        .fees()
        .iter()
        .fold(order.erc20_token_amount().inner(), |acc, fee| {
            acc.saturating_add(fee.amount.inner())
        });
    Some(total)
}

/// Builds the calldata that fills `signed_order`, dispatching on the order
/// variant and direction.
#[must_use]
pub fn fill_calldata(signed_order: &SignedNftOrder, overrides: &FillNftOrderOverrides) -> Bytes {
    let signature = signed_order.signature.to_sol();
    let callback = overrides.callback_data.clone().unwrap_or_default();
    match &signed_order.order {
        NftOrder::Erc721(order) => match order.direction {
            TradeDirection::SellNft => IExchangeV4::buyERC721Call {
                sellOrder: order.to_sol(),
                signature,
                callbackData: callback,
            }
            .abi_encode()
            .into(),
            TradeDirection::BuyNft => IExchangeV4::sellERC721Call {
                buyOrder: order.to_sol(),
                signature,
                erc721TokenId: order.erc721_token_id.inner(),
                unwrapNativeToken: overrides.unwrap_native_token,
                callbackData: callback,
            }
            .abi_encode()
            .into(),
        },
        NftOrder::Erc1155(order) => {
            let amount = overrides
                .erc1155_fill_amount
                .unwrap_or(order.erc1155_token_amount)
                .inner()
                .saturating_to::<u128>();
            match order.direction {
                TradeDirection::SellNft => IExchangeV4::buyERC1155Call {
                    sellOrder: order.to_sol(),
                    signature,
                    erc1155BuyAmount: amount,
                    callbackData: callback,
                }
                .abi_encode()
                .into(),
                TradeDirection::BuyNft => IExchangeV4::sellERC1155Call {
                    buyOrder: order.to_sol(),
                    signature,
                    erc1155TokenId: order.erc1155_token_id.inner(),
                    erc1155SellAmount: amount,
                    unwrapNativeToken: overrides.unwrap_native_token,
                    callbackData: callback,
                }
                .abi_encode()
                .into(),
            }
        }
    }
}

/// Fills a signed v4 order on the exchange proxy.
///
/// # Errors
///
/// Returns [`NftFillError`] on estimation, submission, or confirmation
/// failure.
pub async fn fill_signed_nft_order<P: Provider>(
    provider: P,
    chain_id: u64,
    exchange_proxy: Address,
    signed_order: &SignedNftOrder,
    overrides: &FillNftOrderOverrides,
) -> Result<TxHash, NftFillError> {
    let value = overrides
        .value
        .or_else(|| native_fill_value(&signed_order.order));
    let contract = IExchangeV4::new(exchange_proxy, &provider);
    let signature = signed_order.signature.to_sol();
    let callback = overrides.callback_data.clone().unwrap_or_default();

    let hash = match &signed_order.order {
        NftOrder::Erc721(order) => match order.direction {
            TradeDirection::SellNft => {
                let call = contract.buyERC721(order.to_sol(), signature, callback);
                let call = match value {
                    Some(v) => call.value(v),
                    None => call,
                };
                submit(call, chain_id, overrides.gas_buffer).await?
            }
            TradeDirection::BuyNft => {
                let call = contract.sellERC721(
                    order.to_sol(),
                    signature,
                    order.erc721_token_id.inner(),
                    overrides.unwrap_native_token,
                    callback,
                );
                submit(call, chain_id, overrides.gas_buffer).await?
            }
        },
        NftOrder::Erc1155(order) => {
            let amount = overrides
                .erc1155_fill_amount
                .unwrap_or(order.erc1155_token_amount)
                .inner()
                .saturating_to::<u128>();
            match order.direction {
                TradeDirection::SellNft => {
                    let call = contract.buyERC1155(order.to_sol(), signature, amount, callback);
                    let call = match value {
                        Some(v) => call.value(v),
                        None => call,
                    };
                    submit(call, chain_id, overrides.gas_buffer).await?
                }
                TradeDirection::BuyNft => {
                    let call = contract.sellERC1155(
                        order.to_sol(),
                        signature,
                        order.erc1155_token_id.inner(),
                        amount,
                        overrides.unwrap_native_token,
                        callback,
                    );
                    submit(call, chain_id, overrides.gas_buffer).await?
                }
            }
        }
    };
    tracing::info!(tx = %hash, nonce = %signed_order.order.nonce(), "v4 fill submitted");
    Ok(hash)
}

/// Builds the safe-transfer call that fills a bid without a prior approval
/// transaction: the NFT is transferred straight to the exchange proxy with
/// the order and signature as transfer data, and the proxy executes the
/// swap in the same transaction.
///
/// Returns the NFT contract to call and the calldata.
///
/// # Errors
///
/// Returns [`NftFillError::NotABid`] for sell-side orders.
pub fn sell_without_approval_calldata(
    signed_order: &SignedNftOrder,
    owner: Address,
    exchange_proxy: Address,
    fill_amount: Option<TokenAmount>,
) -> Result<(Address, Bytes), NftFillError> {
    if signed_order.order.direction() != TradeDirection::BuyNft {
        return Err(NftFillError::NotABid);
    }
    match &signed_order.order {
        NftOrder::Erc721(order) => {
            let payload: Bytes = (order.to_sol(), signed_order.signature.to_sol())
                .abi_encode_params()
                .into();
            let calldata = IERC721::safeTransferFromCall {
                from: owner,
                to: exchange_proxy,
                tokenId: order.erc721_token_id.inner(),
                data: payload,
            }
            .abi_encode();
            Ok((order.erc721_token, calldata.into()))
        }
        NftOrder::Erc1155(order) => {
            let payload: Bytes = (order.to_sol(), signed_order.signature.to_sol())
                .abi_encode_params()
                .into();
            let amount = fill_amount.unwrap_or(order.erc1155_token_amount).inner();
            let calldata = IERC1155::safeTransferFromCall {
                from: owner,
                to: exchange_proxy,
                id: order.erc1155_token_id.inner(),
                amount,
                data: payload,
            }
            .abi_encode();
            Ok((order.erc1155_token, calldata.into()))
        }
    }
}

/// Fills a bid by safe-transferring the NFT to the exchange proxy,
/// skipping the separate approval transaction.
///
/// # Errors
///
/// Returns [`NftFillError`] for sell-side orders or submission failures.
pub async fn sell_nft_without_approval<P: Provider>(
    provider: P,
    chain_id: u64,
    exchange_proxy: Address,
    signed_order: &SignedNftOrder,
    owner: Address,
    fill_amount: Option<TokenAmount>,
    gas_buffer: GasBuffer,
) -> Result<TxHash, NftFillError> {
    if signed_order.order.direction() != TradeDirection::BuyNft {
        return Err(NftFillError::NotABid);
    }
    let hash = match &signed_order.order {
        NftOrder::Erc721(order) => {
            let payload: Bytes = (order.to_sol(), signed_order.signature.to_sol())
                .abi_encode_params()
                .into();
            let token = IERC721::new(order.erc721_token, &provider);
            let call = token.safeTransferFrom(
                owner,
                exchange_proxy,
                order.erc721_token_id.inner(),
                payload,
            );
            submit(call, chain_id, gas_buffer).await?
        }
        NftOrder::Erc1155(order) => {
            let payload: Bytes = (order.to_sol(), signed_order.signature.to_sol())
                .abi_encode_params()
                .into();
            let amount = fill_amount.unwrap_or(order.erc1155_token_amount).inner();
            let token = IERC1155::new(order.erc1155_token, &provider);
            let call = token.safeTransferFrom(
                owner,
                exchange_proxy,
                order.erc1155_token_id.inner(),
                amount,
                payload,
            );
            submit(call, chain_id, gas_buffer).await?
        }
    };
    tracing::info!(tx = %hash, "approval-free sell submitted");
    Ok(hash)
}

/// Builds the calldata that cancels `order`.
///
/// The protocol is asymmetric here: ERC-721 cancellation takes only the
/// nonce, ERC-1155 cancellation takes the full order.
#[must_use]
pub fn cancel_calldata(order: &NftOrder) -> Bytes {
    match order {
        NftOrder::Erc721(o) => IExchangeV4::cancelERC721OrderCall {
            orderNonce: o.nonce.inner(),
        }
        .abi_encode()
        .into(),
        NftOrder::Erc1155(o) => IExchangeV4::cancelERC1155OrderCall { order: o.to_sol() }
            .abi_encode()
            .into(),
    }
}

/// Cancels a v4 order on-chain. Only the maker may cancel.
///
/// # Errors
///
/// Returns [`NftFillError`] on submission or confirmation failure.
pub async fn cancel_nft_order<P: Provider>(
    provider: P,
    chain_id: u64,
    exchange_proxy: Address,
    order: &NftOrder,
    gas_buffer: GasBuffer,
) -> Result<TxHash, NftFillError> {
    let contract = IExchangeV4::new(exchange_proxy, &provider);
    let hash = match order {
        NftOrder::Erc721(o) => {
            let call = contract.cancelERC721Order(o.nonce.inner());
            submit(call, chain_id, gas_buffer).await?
        }
        NftOrder::Erc1155(o) => {
            let call = contract.cancelERC1155Order(o.to_sol());
            submit(call, chain_id, gas_buffer).await?
        }
    };
    Ok(hash)
}

/// Reads the order's current on-chain status.
///
/// # Errors
///
/// Returns [`NftFillError`] on call failure or an unrecognized status
/// code.
pub async fn get_nft_order_status<P: Provider>(
    provider: P,
    exchange_proxy: Address,
    order: &NftOrder,
) -> Result<OrderStatusV4, NftFillError> {
    let contract = IExchangeV4::new(exchange_proxy, provider);
    let status = match order {
        NftOrder::Erc721(o) => contract.getERC721OrderStatus(o.to_sol()).call().await?,
        NftOrder::Erc1155(o) => {
            contract
                .getERC1155OrderInfo(o.to_sol())
                .call()
                .await?
                .status
        }
    };
    Ok(OrderStatusV4::try_from(status)?)
}

/// Reads the full ERC-1155 order-info tuple (hash, status, amounts).
///
/// # Errors
///
/// Returns [`NftFillError`] on call failure or an unrecognized status
/// code.
pub async fn get_erc1155_order_info<P: Provider>(
    provider: P,
    exchange_proxy: Address,
    order: &crate::v4::order::Erc1155Order,
) -> Result<NftOrderInfo, NftFillError> {
    let contract = IExchangeV4::new(exchange_proxy, provider);
    let info = contract.getERC1155OrderInfo(order.to_sol()).call().await?;
    Ok(NftOrderInfo {
        order_hash: info.orderHash,
        status: OrderStatusV4::try_from(info.status)?,
        order_amount: info.orderAmount,
        remaining_amount: info.remainingAmount,
    })
}

/// Waits until the order leaves the fillable state or the timeout fires.
///
/// Three waiters race and the first to settle wins: a timeout timer
/// (→ `Ok(None)`, "outcome unknown"), a polling loop that re-reads the
/// on-chain status every `poll_interval` and finishes on any terminal
/// state, and a reserved event-subscription slot (currently inert). The
/// losing waiters are dropped, and with them their in-flight work — no
/// poller outlives the race.
///
/// # Errors
///
/// Returns [`NftFillError::UnexpectedStatus`] when `throw_on_unexpected`
/// is set and the order terminates in any state other than fully filled;
/// propagates status-read failures.
pub async fn wait_until_filled_or_cancelled<P: Provider>(
    provider: P,
    exchange_proxy: Address,
    order: &NftOrder,
    timeout: Duration,
    poll_interval: Duration,
    throw_on_unexpected: bool,
) -> Result<Option<OrderStatusV4>, NftFillError> {
    let poll = async {
        loop {
            let status = get_nft_order_status(&provider, exchange_proxy, order).await?;
            if status.is_terminal() {
                if throw_on_unexpected && status != OrderStatusV4::FullyFilled {
                    return Err(NftFillError::UnexpectedStatus(status));
                }
                return Ok(status);
            }
            tracing::debug!(status = %status, "order not terminal yet, polling again");
            tokio::time::sleep(poll_interval).await;
        }
    };
    // Reserved for a push-based order-event subscription.
    let subscription = future::pending::<Result<OrderStatusV4, NftFillError>>();

    tokio::select! {
        () = tokio::time::sleep(timeout) => Ok(None),
        result = poll => result.map(Some),
        result = subscription => result.map(Some),
    }
}
