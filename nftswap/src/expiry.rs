//! Order expiration times.
//!
//! Orders carry a unix-second expiration. Callers may pass an explicit
//! timestamp or a [`SystemTime`]; when nothing is supplied, builders default
//! to [`INFINITE_ORDER_EXPIRY`], a fixed far-future sentinel the protocol
//! treats as "never expires".

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::SystemTime;

/// The far-future expiration sentinel: 2050-01-01T00:00:00Z.
pub const INFINITE_ORDER_EXPIRY: u64 = 2_524_604_400;

/// A unix-second order expiration time.
///
/// Serialized as a stringified integer, like every other numeric order
/// field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Expiry(u64);

impl Expiry {
    /// Creates an expiry from raw unix seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// The far-future sentinel expiry.
    #[must_use]
    pub const fn infinite() -> Self {
        Self(INFINITE_ORDER_EXPIRY)
    }

    /// Returns the expiry as raw unix seconds.
    #[must_use]
    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    /// Returns `true` if this is the far-future sentinel.
    #[must_use]
    pub const fn is_infinite(&self) -> bool {
        self.0 == INFINITE_ORDER_EXPIRY
    }

    /// Returns the current system time as an expiry.
    ///
    /// # Panics
    ///
    /// Panics if the system clock is set to a time before the Unix epoch.
    #[must_use]
    pub fn now() -> Self {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .expect("SystemTime before UNIX epoch?!?")
            .as_secs();
        Self(now)
    }
}

impl Default for Expiry {
    fn default() -> Self {
        Self::infinite()
    }
}

impl From<u64> for Expiry {
    fn from(secs: u64) -> Self {
        Self(secs)
    }
}

impl From<SystemTime> for Expiry {
    /// Converts via unix-seconds truncation; sub-second precision is
    /// discarded. Times before the epoch clamp to zero.
    fn from(time: SystemTime) -> Self {
        let secs = time
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self(secs)
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Expiry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Expiry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let secs = s
            .parse::<u64>()
            .map_err(|_| serde::de::Error::custom("expiry must be a non-negative integer"))?;
        Ok(Self(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn default_is_far_future_sentinel() {
        assert_eq!(Expiry::default().as_secs(), INFINITE_ORDER_EXPIRY);
        assert!(Expiry::default().is_infinite());
    }

    #[test]
    fn system_time_conversion_truncates() {
        let time = SystemTime::UNIX_EPOCH + Duration::from_millis(1_700_000_000_500);
        assert_eq!(Expiry::from(time).as_secs(), 1_700_000_000);
    }

    #[test]
    fn serializes_as_string() {
        let expiry = Expiry::from_secs(1_700_000_000);
        assert_eq!(serde_json::to_string(&expiry).unwrap(), "\"1700000000\"");
        let back: Expiry = serde_json::from_str("\"1700000000\"").unwrap();
        assert_eq!(back, expiry);
    }
}
