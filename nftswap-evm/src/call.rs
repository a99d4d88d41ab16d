//! Internal transaction submission with gas buffering.

use crate::gas::{GasBuffer, buffered_gas};
use alloy_contract::SolCallBuilder;
use alloy_primitives::TxHash;
use alloy_provider::Provider;
use alloy_sol_types::SolCall;

/// A submission failure, mapped into the public error of each caller.
#[derive(Debug, thiserror::Error)]
pub(crate) enum SubmitError {
    #[error(transparent)]
    Contract(#[from] alloy_contract::Error),
    #[error("transaction dropped or failed to confirm: {0}")]
    Confirmation(String),
}

/// Applies the gas buffer, submits the call as a transaction, and waits for
/// the transaction hash.
pub(crate) async fn submit<P: Provider, C: SolCall>(
    call: SolCallBuilder<P, C>,
    chain_id: u64,
    gas_buffer: GasBuffer,
) -> Result<TxHash, SubmitError> {
    let call = match gas_buffer.resolve(chain_id) {
        Some(percent) => {
            let estimate = call.estimate_gas().await?;
            call.gas(buffered_gas(estimate, percent))
        }
        None => call,
    };
    let pending = call.send().await?;
    pending
        .watch()
        .await
        .map_err(|e| SubmitError::Confirmation(e.to_string()))
}
