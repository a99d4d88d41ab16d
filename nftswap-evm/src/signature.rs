//! Packed signature parsing and the v3 signature-type scheme.
//!
//! v3 signatures travel as a single hex blob: `r ‖ s ‖ v` followed by a
//! trailing tag byte naming the scheme. Raw 65-byte signatures arrive from
//! wallets in either `(r, s, v)` or `(v, r, s)` byte order depending on the
//! signing library; [`parse_raw_signature`] detects which and normalizes.

use alloy_primitives::{B256, Bytes, Signature};

/// The length of a raw ECDSA signature: 32-byte `r`, 32-byte `s`, 1-byte `v`.
const RAW_SIGNATURE_LEN: usize = 65;

/// The length of a packed v3 signature: raw signature plus the type tag.
const PACKED_SIGNATURE_LEN: usize = 66;

/// Errors from parsing signature bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SignatureError {
    /// The byte length matches no known signature layout.
    #[error("signature has invalid length {0}")]
    InvalidLength(usize),
    /// Neither the first nor the last byte is a plausible recovery id.
    #[error("signature carries no recognizable recovery byte")]
    InvalidRecoveryByte,
    /// The trailing tag byte names no known signature type.
    #[error("unknown signature type tag {0:#04x}")]
    UnknownSignatureType(u8),
    /// The r/s/v components do not form a valid signature.
    #[error("malformed signature components")]
    Malformed,
}

/// The v3 signature scheme tag appended to every packed signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SignatureType {
    /// Reserved; always rejected on-chain.
    Illegal = 0x00,
    /// Explicitly invalid; used to poison orders.
    Invalid = 0x01,
    /// A standard EIP-712 typed-data signature from an EOA.
    Eip712 = 0x02,
    /// A legacy `eth_sign` signature.
    EthSign = 0x03,
    /// A wallet-contract validated signature.
    Wallet = 0x04,
    /// A validator-contract validated signature.
    Validator = 0x05,
    /// The order hash was pre-signed on-chain; the signature carries only
    /// this tag byte.
    PreSigned = 0x06,
    /// An EIP-1271 contract-wallet signature.
    Eip1271Wallet = 0x07,
}

impl SignatureType {
    /// Returns the on-wire tag byte.
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for SignatureType {
    type Error = SignatureError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::Illegal),
            0x01 => Ok(Self::Invalid),
            0x02 => Ok(Self::Eip712),
            0x03 => Ok(Self::EthSign),
            0x04 => Ok(Self::Wallet),
            0x05 => Ok(Self::Validator),
            0x06 => Ok(Self::PreSigned),
            0x07 => Ok(Self::Eip1271Wallet),
            other => Err(SignatureError::UnknownSignatureType(other)),
        }
    }
}

/// A v3 signature in its packed wire layout: `r ‖ s ‖ v ‖ type-tag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedSignature {
    /// The `r` scalar.
    pub r: B256,
    /// The `s` scalar.
    pub s: B256,
    /// The recovery byte, normalized to 27/28.
    pub v: u8,
    /// The scheme tag.
    pub signature_type: SignatureType,
}

impl PackedSignature {
    /// Packs a recoverable signature under the given scheme tag.
    #[must_use]
    pub fn from_signature(signature: &Signature, signature_type: SignatureType) -> Self {
        Self {
            r: B256::from(signature.r()),
            s: B256::from(signature.s()),
            v: 27 + u8::from(signature.v()),
            signature_type,
        }
    }

    /// Serializes to the 66-byte wire layout.
    #[must_use]
    pub fn to_bytes(&self) -> Bytes {
        let mut out = Vec::with_capacity(PACKED_SIGNATURE_LEN);
        out.extend_from_slice(self.r.as_slice());
        out.extend_from_slice(self.s.as_slice());
        out.push(self.v);
        out.push(self.signature_type.tag());
        out.into()
    }

    /// Parses the 66-byte wire layout.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError`] on wrong length or an unknown tag.
    pub fn parse(bytes: &[u8]) -> Result<Self, SignatureError> {
        if bytes.len() != PACKED_SIGNATURE_LEN {
            return Err(SignatureError::InvalidLength(bytes.len()));
        }
        let signature_type = SignatureType::try_from(bytes[PACKED_SIGNATURE_LEN - 1])?;
        Ok(Self {
            r: B256::from_slice(&bytes[..32]),
            s: B256::from_slice(&bytes[32..64]),
            v: bytes[64],
            signature_type,
        })
    }

    /// Reassembles the recoverable `(r, s, v)` signature for address
    /// recovery.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::Malformed`] when the components do not
    /// form a valid signature.
    pub fn to_recoverable(&self) -> Result<Signature, SignatureError> {
        let mut raw = [0u8; RAW_SIGNATURE_LEN];
        raw[..32].copy_from_slice(self.r.as_slice());
        raw[32..64].copy_from_slice(self.s.as_slice());
        raw[64] = self.v;
        Signature::from_raw(&raw).map_err(|_| SignatureError::Malformed)
    }
}

/// Parses a raw 65-byte signature, detecting `(r, s, v)` vs `(v, r, s)`
/// byte order.
///
/// Detection prefers a valid recovery byte at the end (the common layout);
/// a valid recovery byte at the front is accepted as the legacy v-first
/// layout.
///
/// # Errors
///
/// Returns [`SignatureError`] on wrong length, no recognizable recovery
/// byte, or malformed scalars.
pub fn parse_raw_signature(bytes: &[u8]) -> Result<Signature, SignatureError> {
    if bytes.len() != RAW_SIGNATURE_LEN {
        return Err(SignatureError::InvalidLength(bytes.len()));
    }
    let first = bytes[0];
    let last = bytes[RAW_SIGNATURE_LEN - 1];
    if is_recovery_byte(last) {
        Signature::from_raw(bytes).map_err(|_| SignatureError::Malformed)
    } else if is_recovery_byte(first) {
        let mut reordered = [0u8; RAW_SIGNATURE_LEN];
        reordered[..64].copy_from_slice(&bytes[1..]);
        reordered[64] = first;
        Signature::from_raw(&reordered).map_err(|_| SignatureError::Malformed)
    } else {
        Err(SignatureError::InvalidRecoveryByte)
    }
}

const fn is_recovery_byte(byte: u8) -> bool {
    matches!(byte, 0 | 1 | 27 | 28)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_raw_rsv() -> [u8; 65] {
        let mut raw = [0u8; 65];
        raw[31] = 0x11; // r
        raw[63] = 0x22; // s
        raw[64] = 27; // v
        raw
    }

    #[test]
    fn packed_signature_roundtrip() {
        let raw = sample_raw_rsv();
        let signature = Signature::from_raw(&raw).unwrap();
        let packed = PackedSignature::from_signature(&signature, SignatureType::Eip712);
        let bytes = packed.to_bytes();
        assert_eq!(bytes.len(), 66);
        assert_eq!(bytes[65], 0x02);

        let reparsed = PackedSignature::parse(&bytes).unwrap();
        assert_eq!(reparsed, packed);
        let recovered = reparsed.to_recoverable().unwrap();
        assert_eq!(recovered.r(), signature.r());
        assert_eq!(recovered.s(), signature.s());
    }

    #[test]
    fn packed_signature_rejects_bad_lengths_and_tags() {
        assert!(matches!(
            PackedSignature::parse(&[0u8; 65]),
            Err(SignatureError::InvalidLength(65))
        ));
        let mut bytes = [0u8; 66];
        bytes[64] = 27;
        bytes[65] = 0x09;
        assert!(matches!(
            PackedSignature::parse(&bytes),
            Err(SignatureError::UnknownSignatureType(0x09))
        ));
    }

    #[test]
    fn raw_signature_detects_v_last() {
        let raw = sample_raw_rsv();
        let signature = parse_raw_signature(&raw).unwrap();
        assert_eq!(B256::from(signature.r()).as_slice()[31], 0x11);
    }

    #[test]
    fn raw_signature_detects_v_first() {
        let mut vrs = [0u8; 65];
        vrs[0] = 28; // v
        vrs[32] = 0x11; // r, right-aligned at [1..33]
        vrs[64] = 0x22; // s
        let signature = parse_raw_signature(&vrs).unwrap();
        assert_eq!(B256::from(signature.r()).as_slice()[31], 0x11);
        assert_eq!(B256::from(signature.s()).as_slice()[31], 0x22);
        assert!(signature.v());
    }

    #[test]
    fn raw_signature_rejects_garbage() {
        let mut raw = [0x55u8; 65];
        raw[0] = 0x55;
        raw[64] = 0x55;
        assert!(matches!(
            parse_raw_signature(&raw),
            Err(SignatureError::InvalidRecoveryByte)
        ));
        assert!(matches!(
            parse_raw_signature(&[0u8; 10]),
            Err(SignatureError::InvalidLength(10))
        ));
    }
}
