//! Known exchange deployments per chain.
//!
//! These tables are the zero-config defaults; every pipeline entry point
//! also accepts explicit addresses, so callers on unlisted chains (or
//! running against forks) can inject their own [`V3Contracts`] /
//! [`V4Contracts`] instead. An unlisted chain id is an explicit
//! [`UnknownChainError`], never a silent fallback.

use alloy_primitives::{Address, address};
use nftswap::UnknownChainError;

/// Ethereum Mainnet chain ID.
pub const ETHEREUM_MAINNET: u64 = 1;

/// Goerli (testnet) chain ID.
pub const GOERLI: u64 = 5;

/// Optimism Mainnet chain ID.
pub const OPTIMISM_MAINNET: u64 = 10;

/// BNB Smart Chain chain ID.
pub const BSC_MAINNET: u64 = 56;

/// Polygon Mainnet chain ID.
pub const POLYGON_MAINNET: u64 = 137;

/// Polygon Mumbai (testnet) chain ID.
pub const POLYGON_MUMBAI: u64 = 80_001;

/// Fantom Opera chain ID.
pub const FANTOM_MAINNET: u64 = 250;

/// Arbitrum One chain ID.
pub const ARBITRUM_MAINNET: u64 = 42_161;

/// Avalanche C-Chain chain ID.
pub const AVALANCHE_MAINNET: u64 = 43_114;

/// The all-zero address: open taker, null sender, zero fee recipient.
pub const NULL_ADDRESS: Address = Address::ZERO;

/// The pseudo-token address conventionally standing in for the chain's
/// native token in ERC-20 positions.
pub const NATIVE_TOKEN_ADDRESS: Address = address!("eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee");

/// Contract addresses for the v3 exchange and its asset proxies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct V3Contracts {
    /// The exchange contract (fill, cancel, order info).
    pub exchange: Address,
    /// ERC-20 asset proxy: the operator that moves fungible tokens.
    pub erc20_proxy: Address,
    /// ERC-721 asset proxy.
    pub erc721_proxy: Address,
    /// ERC-1155 asset proxy.
    pub erc1155_proxy: Address,
    /// MultiAsset proxy: dispatches bundle fills to the per-standard proxies.
    pub multi_asset_proxy: Address,
    /// The forwarder helper contract.
    pub forwarder: Address,
}

/// Contract addresses for the v4 exchange proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct V4Contracts {
    /// The exchange proxy: single entry point for fills, cancels, status.
    pub exchange_proxy: Address,
    /// The canonical wrapped-native-token deployment, required for NFT bids
    /// (native token cannot be escrowed in a bid).
    pub wrapped_native_token: Address,
}

const V3_MAINNET: V3Contracts = V3Contracts {
    exchange: address!("61935cbdd02287b511119ddb11aeb42f1593b7ef"),
    erc20_proxy: address!("95e6f48254609a6ee006f7d493c8e5fb97094cef"),
    erc721_proxy: address!("efc70a1b18c432bdc64b596838b4d138f6bc6cad"),
    erc1155_proxy: address!("7eefbd48fd63d441ec7435d024ec7c5131019add"),
    multi_asset_proxy: address!("ef701d5389ae74503d633396c4d654eabedc9d78"),
    forwarder: address!("6958f5e95332d93d21af0d7b9ca85b8212fee0a5"),
};

/// The exchange proxy address shared by most v4 deployments.
const V4_EXCHANGE_PROXY: Address = address!("def1c0ded9bec7f1a1670819833240f027b25eff");

/// Returns the v3 contract set for a chain.
///
/// # Errors
///
/// Returns [`UnknownChainError`] when no v3 deployment is known for
/// `chain_id`.
pub fn v3_contracts(chain_id: u64) -> Result<V3Contracts, UnknownChainError> {
    match chain_id {
        ETHEREUM_MAINNET => Ok(V3_MAINNET),
        _ => Err(UnknownChainError { chain_id }),
    }
}

/// Returns the v4 contract set for a chain.
///
/// # Errors
///
/// Returns [`UnknownChainError`] when no v4 deployment is known for
/// `chain_id`.
pub fn v4_contracts(chain_id: u64) -> Result<V4Contracts, UnknownChainError> {
    let contracts = match chain_id {
        ETHEREUM_MAINNET => V4Contracts {
            exchange_proxy: V4_EXCHANGE_PROXY,
            wrapped_native_token: address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
        },
        GOERLI => V4Contracts {
            exchange_proxy: address!("f91bb752490473b8342a3e964e855b9f9a2a668e"),
            wrapped_native_token: address!("b4fbf271143f4fbf7b91a5ded31805e42b2208d6"),
        },
        OPTIMISM_MAINNET => V4Contracts {
            exchange_proxy: address!("def1abe32c034e558cdd535791643c58a13acc10"),
            wrapped_native_token: address!("4200000000000000000000000000000000000006"),
        },
        BSC_MAINNET => V4Contracts {
            exchange_proxy: V4_EXCHANGE_PROXY,
            wrapped_native_token: address!("bb4cdb9cbd36b01bd1cbaebf2de08d9173bc095c"),
        },
        POLYGON_MAINNET => V4Contracts {
            exchange_proxy: V4_EXCHANGE_PROXY,
            wrapped_native_token: address!("0d500b1d8e8ef31e21c99d1db9a6444d3adf1270"),
        },
        POLYGON_MUMBAI => V4Contracts {
            exchange_proxy: V4_EXCHANGE_PROXY,
            wrapped_native_token: address!("9c3c9283d3e44854697cd22d3faa240cfb032889"),
        },
        FANTOM_MAINNET => V4Contracts {
            exchange_proxy: V4_EXCHANGE_PROXY,
            wrapped_native_token: address!("21be370d5312f44cb42ce377bc9b8a0cef1a4c83"),
        },
        ARBITRUM_MAINNET => V4Contracts {
            exchange_proxy: V4_EXCHANGE_PROXY,
            wrapped_native_token: address!("82af49447d8a07e3bd95bd0d56f35241523fbab1"),
        },
        AVALANCHE_MAINNET => V4Contracts {
            exchange_proxy: V4_EXCHANGE_PROXY,
            wrapped_native_token: address!("b31f66aa3c1e785363f0875a1b74e27b85fd66c7"),
        },
        _ => return Err(UnknownChainError { chain_id }),
    };
    Ok(contracts)
}

/// Like [`v3_contracts`], for callers that will fall back to their own
/// addresses: an unknown chain logs a non-fatal advisory instead of
/// failing, since the SDK still works with explicit addresses supplied.
#[must_use]
pub fn try_v3_contracts(chain_id: u64) -> Option<V3Contracts> {
    match v3_contracts(chain_id) {
        Ok(contracts) => Some(contracts),
        Err(err) => {
            tracing::warn!(chain_id, %err, "no default v3 addresses; supply addresses manually");
            None
        }
    }
}

/// Like [`v4_contracts`], with the same advisory-not-fatal semantics as
/// [`try_v3_contracts`].
#[must_use]
pub fn try_v4_contracts(chain_id: u64) -> Option<V4Contracts> {
    match v4_contracts(chain_id) {
        Ok(contracts) => Some(contracts),
        Err(err) => {
            tracing::warn!(chain_id, %err, "no default v4 addresses; supply addresses manually");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mainnet_has_both_protocol_versions() {
        assert!(v3_contracts(ETHEREUM_MAINNET).is_ok());
        assert!(v4_contracts(ETHEREUM_MAINNET).is_ok());
    }

    #[test]
    fn unknown_chain_is_an_explicit_error() {
        let err = v4_contracts(424_242).unwrap_err();
        assert_eq!(err.chain_id, 424_242);
        let err = v3_contracts(POLYGON_MAINNET).unwrap_err();
        assert_eq!(err.chain_id, POLYGON_MAINNET);
    }

    #[test]
    fn native_token_sentinel_is_not_a_real_contract_address() {
        assert_ne!(NATIVE_TOKEN_ADDRESS, NULL_ADDRESS);
        assert_eq!(
            NATIVE_TOKEN_ADDRESS.to_string().to_lowercase(),
            "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee"
        );
    }
}
