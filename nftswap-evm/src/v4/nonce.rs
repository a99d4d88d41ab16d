//! Structured v4 nonce generation.
//!
//! A v4 nonce is a 78-digit decimal string (the base-10 ceiling for a
//! 256-bit unsigned integer) split into two 39-digit halves:
//!
//! - head: the reserved SDK prefix followed by the integrating
//!   application's numeric app id, right-padded with zeros. This lets a
//!   relying party attribute orders to the originating integration without
//!   an out-of-band registry.
//! - tail: a 128-bit random value (a v4 UUID's bit pattern reinterpreted
//!   as an integer), left-padded with zeros. This preserves per-order
//!   uniqueness with cryptographic-strength collision resistance.

use nftswap::TokenAmount;
use uuid::Uuid;

/// The reserved SDK prefix that starts every generated nonce.
pub const RESERVED_APP_ID_PREFIX: &str = "1001";

/// The app id used when the integrator does not supply one.
pub const DEFAULT_APP_ID: &str = "314159";

/// Digits per nonce half: 39 decimal digits cover 128 bits.
const SEGMENT_DIGITS: usize = 39;

/// Maximum app id length: the head half minus the reserved prefix.
pub const MAX_APP_ID_DIGITS: usize = SEGMENT_DIGITS - RESERVED_APP_ID_PREFIX.len();

/// Errors from app-id validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum NonceError {
    /// The app id contained non-digit characters (or was empty).
    #[error("app id '{0}' must be a non-empty string of decimal digits")]
    NonNumericAppId(String),
    /// The app id does not fit in the head half after the reserved prefix.
    #[error("app id '{0}' exceeds {MAX_APP_ID_DIGITS} digits")]
    AppIdTooLong(String),
}

/// Generates a fresh order nonce for the given app id.
///
/// The result always has exactly 78 decimal digits and parses as an
/// unsigned 256-bit integer (asserted, not assumed: the head starts with
/// `1001…`, keeping the value below 2^256).
///
/// # Errors
///
/// Returns [`NonceError`] when the app id is non-numeric or too long;
/// validation happens before any randomness is drawn.
///
/// # Panics
///
/// Panics if the generated string violates the 78-digit invariant, which
/// indicates a bug rather than bad input.
pub fn generate_nonce(app_id: &str) -> Result<TokenAmount, NonceError> {
    validate_app_id(app_id)?;
    let head = format!(
        "{:0<width$}",
        format!("{RESERVED_APP_ID_PREFIX}{app_id}"),
        width = SEGMENT_DIGITS
    );
    let tail_value = Uuid::new_v4().as_u128();
    let tail = format!("{tail_value:0>width$}", width = SEGMENT_DIGITS);
    let nonce = format!("{head}{tail}");
    assert_eq!(
        nonce.len(),
        2 * SEGMENT_DIGITS,
        "generated nonce must have exactly 78 digits"
    );
    Ok(TokenAmount::parse(&nonce).expect("78-digit nonce starting with the prefix fits in 256 bits"))
}

/// Generates a nonce under [`DEFAULT_APP_ID`].
///
/// # Panics
///
/// Never in practice: the default app id always validates.
#[must_use]
pub fn generate_default_nonce() -> TokenAmount {
    generate_nonce(DEFAULT_APP_ID).expect("default app id is valid")
}

fn validate_app_id(app_id: &str) -> Result<(), NonceError> {
    if app_id.is_empty() || !app_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NonceError::NonNumericAppId(app_id.to_owned()));
    }
    if app_id.len() > MAX_APP_ID_DIGITS {
        return Err(NonceError::AppIdTooLong(app_id.to_owned()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    #[test]
    fn nonce_shape() {
        let nonce = generate_nonce(DEFAULT_APP_ID).unwrap().to_string();
        assert_eq!(nonce.len(), 78);
        assert!(nonce.starts_with(RESERVED_APP_ID_PREFIX));
        // The app id sits immediately after the reserved prefix.
        assert!(nonce[RESERVED_APP_ID_PREFIX.len()..].starts_with(DEFAULT_APP_ID));
        // And the whole thing parses as an unsigned 256-bit integer.
        assert!(U256::from_str_radix(&nonce, 10).is_ok());
    }

    #[test]
    fn nonce_shape_for_custom_app_id() {
        let nonce = generate_nonce("42").unwrap().to_string();
        assert_eq!(nonce.len(), 78);
        assert!(nonce.starts_with("100142"));
        // Zero padding separates the head from the random tail.
        assert_eq!(&nonce[6..SEGMENT_DIGITS], "0".repeat(SEGMENT_DIGITS - 6));
    }

    #[test]
    fn max_length_app_id_fills_the_head() {
        let app_id = "9".repeat(MAX_APP_ID_DIGITS);
        let nonce = generate_nonce(&app_id).unwrap().to_string();
        assert_eq!(nonce.len(), 78);
        assert_eq!(&nonce[..SEGMENT_DIGITS], format!("1001{app_id}"));
    }

    #[test]
    fn nonces_are_unique() {
        let first = generate_nonce(DEFAULT_APP_ID).unwrap();
        let second = generate_nonce(DEFAULT_APP_ID).unwrap();
        assert_ne!(first, second);
        // The attribution head matches even though the tails differ.
        assert_eq!(
            &first.to_string()[..SEGMENT_DIGITS],
            &second.to_string()[..SEGMENT_DIGITS]
        );
    }

    #[test]
    fn invalid_app_ids_are_rejected_before_generation() {
        assert!(matches!(
            generate_nonce("abc"),
            Err(NonceError::NonNumericAppId(_))
        ));
        assert!(matches!(
            generate_nonce(""),
            Err(NonceError::NonNumericAppId(_))
        ));
        assert!(matches!(
            generate_nonce("-5"),
            Err(NonceError::NonNumericAppId(_))
        ));
        let too_long = "1".repeat(MAX_APP_ID_DIGITS + 1);
        assert!(matches!(
            generate_nonce(&too_long),
            Err(NonceError::AppIdTooLong(_))
        ));
    }
}
