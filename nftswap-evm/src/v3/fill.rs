//! v3 fills, cancellations, and order-status reads.

use crate::call::{SubmitError, submit};
use crate::contracts::IExchangeV3;
use crate::gas::GasBuffer;
use crate::v3::order::{Order, SignedOrder};
use alloy_primitives::{Address, B256, TxHash, U256};
use alloy_provider::Provider;
use nftswap::status::UnknownStatusError;
use nftswap::{OrderStatusV3, TokenAmount};

/// Errors from v3 exchange interactions.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FillError {
    /// A contract call or transaction submission failed.
    #[error(transparent)]
    Contract(#[from] alloy_contract::Error),
    /// The transaction was submitted but dropped or failed to confirm.
    #[error("transaction dropped or failed to confirm: {0}")]
    Confirmation(String),
    /// The contract reported an unrecognized status code.
    #[error(transparent)]
    UnknownStatus(#[from] UnknownStatusError),
}

impl From<SubmitError> for FillError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Contract(e) => Self::Contract(e),
            SubmitError::Confirmation(msg) => Self::Confirmation(msg),
        }
    }
}

/// A decoded v3 order-info tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderInfoV3 {
    /// The contract-reported lifecycle status.
    pub status: OrderStatusV3,
    /// The order's EIP-712 hash, as derived on-chain.
    pub order_hash: B256,
    /// How much of the taker asset amount has been filled so far.
    pub taker_asset_filled_amount: U256,
}

/// Optional knobs for [`fill_order`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FillOrderOverrides {
    /// Partial-fill amount; defaults to the order's full taker amount.
    pub taker_asset_fill_amount: Option<TokenAmount>,
    /// Native-token value to attach (protocol fees, native-priced fills).
    pub value: Option<U256>,
    /// Gas buffering policy.
    pub gas_buffer: GasBuffer,
}

/// Reads the order's on-chain status, hash, and filled amount.
///
/// # Errors
///
/// Returns [`FillError`] on call failure or an unrecognized status code.
pub async fn get_order_info<P: Provider>(
    provider: P,
    exchange: Address,
    order: &Order,
) -> Result<OrderInfoV3, FillError> {
    let contract = IExchangeV3::new(exchange, provider);
    let info = contract.getOrderInfo(order.to_sol()).call().await?;
    Ok(OrderInfoV3 {
        status: OrderStatusV3::try_from(info.orderStatus)?,
        order_hash: info.orderHash,
        taker_asset_filled_amount: info.orderTakerAssetFilledAmount,
    })
}

/// Fills a signed order on the v3 exchange.
///
/// # Errors
///
/// Returns [`FillError`] on estimation, submission, or confirmation
/// failure.
pub async fn fill_order<P: Provider>(
    provider: P,
    chain_id: u64,
    exchange: Address,
    signed_order: &SignedOrder,
    overrides: &FillOrderOverrides,
) -> Result<TxHash, FillError> {
    let fill_amount = overrides
        .taker_asset_fill_amount
        .unwrap_or(signed_order.order.taker_asset_amount)
        .inner();
    let contract = IExchangeV3::new(exchange, &provider);
    let call = contract.fillOrder(
        signed_order.order.to_sol(),
        fill_amount,
        signed_order.signature.clone(),
    );
    let call = match overrides.value {
        Some(value) => call.value(value),
        None => call,
    };
    let hash = submit(call, chain_id, overrides.gas_buffer).await?;
    tracing::info!(tx = %hash, fill_amount = %fill_amount, "fillOrder submitted");
    Ok(hash)
}

/// Cancels a single order on-chain. Only the maker may cancel.
///
/// # Errors
///
/// Returns [`FillError`] on submission or confirmation failure.
pub async fn cancel_order<P: Provider>(
    provider: P,
    chain_id: u64,
    exchange: Address,
    order: &Order,
    gas_buffer: GasBuffer,
) -> Result<TxHash, FillError> {
    let contract = IExchangeV3::new(exchange, &provider);
    let call = contract.cancelOrder(order.to_sol());
    Ok(submit(call, chain_id, gas_buffer).await?)
}

/// Cancels a batch of orders in one transaction.
///
/// # Errors
///
/// Returns [`FillError`] on submission or confirmation failure.
pub async fn batch_cancel_orders<P: Provider>(
    provider: P,
    chain_id: u64,
    exchange: Address,
    orders: &[Order],
    gas_buffer: GasBuffer,
) -> Result<TxHash, FillError> {
    let contract = IExchangeV3::new(exchange, &provider);
    let call = contract.batchCancelOrders(orders.iter().map(Order::to_sol).collect());
    Ok(submit(call, chain_id, gas_buffer).await?)
}

/// Cancels every order of the sender whose salt is at or below
/// `target_order_epoch`.
///
/// # Errors
///
/// Returns [`FillError`] on submission or confirmation failure.
pub async fn cancel_orders_up_to<P: Provider>(
    provider: P,
    chain_id: u64,
    exchange: Address,
    target_order_epoch: U256,
    gas_buffer: GasBuffer,
) -> Result<TxHash, FillError> {
    let contract = IExchangeV3::new(exchange, &provider);
    let call = contract.cancelOrdersUpTo(target_order_epoch);
    Ok(submit(call, chain_id, gas_buffer).await?)
}
