//! Gas-estimate buffering.
//!
//! Some chains under-estimate gas badly enough that a raw estimate reverts
//! at execution time; those get a default multiplier. Callers can override
//! per call: [`GasBuffer::Disabled`] is the explicit "no buffer at all"
//! signal, distinct from [`GasBuffer::Auto`] which falls back to the
//! chain-keyed default table.

use crate::networks::{AVALANCHE_MAINNET, POLYGON_MAINNET, POLYGON_MUMBAI};

/// How to pad a gas estimate before submitting a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GasBuffer {
    /// Use the chain-keyed default multiplier table.
    #[default]
    Auto,
    /// Submit the raw estimate with no buffer. Distinct from [`Self::Auto`]:
    /// this suppresses the default table.
    Disabled,
    /// Multiply the estimate by `percent / 100` (e.g. `150` = 1.5x).
    Percent(u64),
}

impl GasBuffer {
    /// Resolves to the effective percent multiplier for a chain, or `None`
    /// when the estimate should be used as-is.
    #[must_use]
    pub fn resolve(self, chain_id: u64) -> Option<u64> {
        match self {
            Self::Auto => default_gas_buffer_percent(chain_id),
            Self::Disabled => None,
            Self::Percent(percent) => Some(percent),
        }
    }

    /// Applies the resolved multiplier to an estimate.
    #[must_use]
    pub fn apply(self, estimate: u64, chain_id: u64) -> u64 {
        match self.resolve(chain_id) {
            Some(percent) => buffered_gas(estimate, percent),
            None => estimate,
        }
    }
}

/// The default buffer multiplier for a chain, as a percent.
///
/// Chains with less predictable gas estimation get a larger multiple.
#[must_use]
pub const fn default_gas_buffer_percent(chain_id: u64) -> Option<u64> {
    match chain_id {
        POLYGON_MAINNET | POLYGON_MUMBAI => Some(130),
        AVALANCHE_MAINNET => Some(120),
        _ => None,
    }
}

/// Multiplies a gas estimate by `percent / 100`, saturating at `u64::MAX`.
#[must_use]
pub fn buffered_gas(estimate: u64, percent: u64) -> u64 {
    let widened = u128::from(estimate) * u128::from(percent) / 100;
    u64::try_from(widened).unwrap_or(u64::MAX)
}
