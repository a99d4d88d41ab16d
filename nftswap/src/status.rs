//! On-chain order lifecycle states.
//!
//! The SDK never owns terminal state: it only observes the status the
//! exchange contract reports. The lifecycle is
//! `Invalid → Fillable → { FullyFilled | Expired | Cancelled }`, with v3
//! exposing finer-grained invalid sub-states for malformed amounts.

use std::fmt;

/// An unrecognized numeric status reported by a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status code {0}")]
pub struct UnknownStatusError(pub u8);

/// Order status as reported by the v3 exchange contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OrderStatusV3 {
    /// Default value; the order was never valid.
    Invalid = 0,
    /// The maker asset amount is zero or malformed.
    InvalidMakerAssetAmount = 1,
    /// The taker asset amount is zero or malformed.
    InvalidTakerAssetAmount = 2,
    /// The order is live and can be filled.
    Fillable = 3,
    /// The expiration time has passed.
    Expired = 4,
    /// The order was filled for its full taker amount.
    FullyFilled = 5,
    /// The maker cancelled the order on-chain.
    Cancelled = 6,
}

impl OrderStatusV3 {
    /// Returns `true` for states the order can never leave.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::FullyFilled | Self::Expired | Self::Cancelled)
    }

    /// Returns `true` if the order is live.
    #[must_use]
    pub const fn is_fillable(&self) -> bool {
        matches!(self, Self::Fillable)
    }
}

impl TryFrom<u8> for OrderStatusV3 {
    type Error = UnknownStatusError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Invalid),
            1 => Ok(Self::InvalidMakerAssetAmount),
            2 => Ok(Self::InvalidTakerAssetAmount),
            3 => Ok(Self::Fillable),
            4 => Ok(Self::Expired),
            5 => Ok(Self::FullyFilled),
            6 => Ok(Self::Cancelled),
            other => Err(UnknownStatusError(other)),
        }
    }
}

impl fmt::Display for OrderStatusV3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Invalid => "invalid",
            Self::InvalidMakerAssetAmount => "invalid_maker_asset_amount",
            Self::InvalidTakerAssetAmount => "invalid_taker_asset_amount",
            Self::Fillable => "fillable",
            Self::Expired => "expired",
            Self::FullyFilled => "fully_filled",
            Self::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// Order status as reported by the v4 exchange proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OrderStatusV4 {
    /// Default value; the order was never valid.
    Invalid = 0,
    /// The order is live and can be filled.
    Fillable = 1,
    /// The order was filled completely.
    FullyFilled = 2,
    /// The expiration time has passed.
    Expired = 3,
    /// The maker cancelled the order on-chain.
    Cancelled = 4,
}

impl OrderStatusV4 {
    /// Returns `true` for states the order can never leave.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::FullyFilled | Self::Expired | Self::Cancelled)
    }

    /// Returns `true` if the order is live.
    #[must_use]
    pub const fn is_fillable(&self) -> bool {
        matches!(self, Self::Fillable)
    }
}

impl TryFrom<u8> for OrderStatusV4 {
    type Error = UnknownStatusError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Invalid),
            1 => Ok(Self::Fillable),
            2 => Ok(Self::FullyFilled),
            3 => Ok(Self::Expired),
            4 => Ok(Self::Cancelled),
            other => Err(UnknownStatusError(other)),
        }
    }
}

impl fmt::Display for OrderStatusV4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Invalid => "invalid",
            Self::Fillable => "fillable",
            Self::FullyFilled => "fully_filled",
            Self::Expired => "expired",
            Self::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(OrderStatusV4::FullyFilled.is_terminal());
        assert!(OrderStatusV4::Expired.is_terminal());
        assert!(OrderStatusV4::Cancelled.is_terminal());
        assert!(!OrderStatusV4::Fillable.is_terminal());
        assert!(!OrderStatusV4::Invalid.is_terminal());

        assert!(OrderStatusV3::FullyFilled.is_terminal());
        assert!(!OrderStatusV3::InvalidMakerAssetAmount.is_terminal());
    }

    #[test]
    fn status_codes_roundtrip() {
        for code in 0u8..=6 {
            let status = OrderStatusV3::try_from(code).unwrap();
            assert_eq!(status as u8, code);
        }
        assert!(OrderStatusV3::try_from(7).is_err());

        for code in 0u8..=4 {
            let status = OrderStatusV4::try_from(code).unwrap();
            assert_eq!(status as u8, code);
        }
        assert!(OrderStatusV4::try_from(5).is_err());
    }
}
