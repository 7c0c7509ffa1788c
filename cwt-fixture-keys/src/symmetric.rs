//! Random symmetric keys for HMAC fixtures.

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use rand::RngCore as _;
use serde::Serialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::KeyError;
use crate::jwk::{Jwk, random_kid};

/// Key size used when none is requested.
pub const DEFAULT_BITS: usize = 256;

/// Largest key size accepted.
pub const MAX_BITS: usize = 8192;

/// Random key material for HMAC.
///
/// The bytes are wiped when the key is dropped.
///
/// # Example
///
/// ```
/// use cwt_fixture_keys::SymmetricKey;
///
/// let key = SymmetricKey::generate(256).unwrap();
/// assert_eq!(key.len(), 32);
/// assert_eq!(key.to_hex().len(), 64);
///
/// assert!(SymmetricKey::generate(12).is_err());
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    bytes: Vec<u8>,
}

impl SymmetricKey {
    /// Generates `bits` bits of random key material.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::InvalidBitLength` if `bits` is zero, not a
    /// multiple of 8, or larger than [`MAX_BITS`].
    pub fn generate(bits: usize) -> Result<Self, KeyError> {
        if bits == 0 {
            return Err(KeyError::InvalidBitLength {
                bits,
                reason: "must be positive",
            });
        }
        if bits % 8 != 0 {
            return Err(KeyError::InvalidBitLength {
                bits,
                reason: "must be a multiple of 8",
            });
        }
        if bits > MAX_BITS {
            return Err(KeyError::InvalidBitLength {
                bits,
                reason: "exceeds the 8192-bit maximum",
            });
        }

        let mut bytes = vec![0u8; bits / 8];
        rand::thread_rng().fill_bytes(&mut bytes);
        Ok(Self { bytes })
    }

    /// Wraps existing key material.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    /// Returns the raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Key length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the key holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Key length in bits.
    #[must_use]
    pub fn bits(&self) -> usize {
        self.bytes.len() * 8
    }

    /// The HMAC algorithm whose hash output matches the key size, if any.
    #[must_use]
    pub fn algorithm_hint(&self) -> Option<&'static str> {
        match self.bits() {
            256 => Some("HS256"),
            384 => Some("HS384"),
            512 => Some("HS512"),
            _ => None,
        }
    }

    /// Lowercase hex.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Standard padded base64.
    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// Unpadded base64url.
    #[must_use]
    pub fn to_base64url(&self) -> String {
        URL_SAFE_NO_PAD.encode(&self.bytes)
    }

    /// Returns the key as an `oct` JWK.
    #[must_use]
    pub fn to_jwk(&self, kid: Option<&str>) -> Jwk {
        Jwk {
            kty: "oct".into(),
            crv: None,
            x: None,
            y: None,
            d: None,
            k: Some(self.to_base64url()),
            key_use: "sig".into(),
            alg: self.algorithm_hint().map(str::to_string),
            kid: kid.map_or_else(random_kid, str::to_string),
        }
    }

    /// Collects every export format into one serializable record.
    #[must_use]
    pub fn export(&self, kid: Option<&str>) -> SymmetricKeyExport {
        SymmetricKeyExport {
            bits: self.bits(),
            hex: self.to_hex(),
            base64: self.to_base64(),
            base64url: self.to_base64url(),
            jwk: self.to_jwk(kid),
        }
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("bits", &self.bits())
            .finish_non_exhaustive()
    }
}

/// Every export format of one symmetric key.
#[derive(Debug, Clone, Serialize)]
pub struct SymmetricKeyExport {
    /// Key size in bits.
    pub bits: usize,
    /// Lowercase hex.
    pub hex: String,
    /// Standard padded base64.
    pub base64: String,
    /// Unpadded base64url.
    pub base64url: String,
    /// `oct` JWK.
    pub jwk: Jwk,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_follow_bits() {
        for bits in [8, 256, 384, 512, MAX_BITS] {
            let key = SymmetricKey::generate(bits).unwrap();
            assert_eq!(key.len(), bits / 8);
            assert_eq!(key.bits(), bits);
        }
    }

    #[test]
    fn rejects_bad_sizes() {
        for bits in [0, 7, 12, 255, MAX_BITS + 8] {
            assert!(
                matches!(
                    SymmetricKey::generate(bits),
                    Err(KeyError::InvalidBitLength { .. })
                ),
                "{bits} accepted"
            );
        }
    }

    #[test]
    fn keys_are_random() {
        let a = SymmetricKey::generate(DEFAULT_BITS).unwrap();
        let b = SymmetricKey::generate(DEFAULT_BITS).unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn encodings_describe_the_same_bytes() {
        let key = SymmetricKey::from_bytes(&[0xfb, 0xff, 0x00]);

        assert_eq!(key.to_hex(), "fbff00");
        assert_eq!(key.to_base64(), "+/8A");
        assert_eq!(key.to_base64url(), "-_8A");
    }

    #[test]
    fn jwk_is_oct() {
        let key = SymmetricKey::generate(256).unwrap();
        let jwk = key.to_jwk(Some("hmac-key"));

        assert_eq!(jwk.kty, "oct");
        assert_eq!(jwk.alg.as_deref(), Some("HS256"));
        assert_eq!(jwk.kid, "hmac-key");
        assert_eq!(jwk.k.as_deref(), Some(key.to_base64url().as_str()));
        assert!(jwk.crv.is_none());
    }

    #[test]
    fn odd_sizes_have_no_algorithm_hint() {
        let key = SymmetricKey::generate(128).unwrap();
        assert_eq!(key.algorithm_hint(), None);
        assert!(key.to_jwk(None).alg.is_none());
    }

    #[test]
    fn debug_hides_bytes() {
        let key = SymmetricKey::from_bytes(&[0xab; 4]);
        assert_eq!(format!("{key:?}"), "SymmetricKey { bits: 32, .. }");
    }
}
