//! COSE header maps and the algorithm registry subset used by fixtures.

use std::fmt;

use crate::constants::{HEADER_ALG, HEADER_CONTENT_TYPE, HEADER_CRIT, HEADER_KID};
use crate::encoder::{Encoder, Profile};
use crate::error::EncodeError;
use crate::item::Item;

/// COSE algorithm identifiers (IANA "COSE Algorithms" registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// ECDSA w/ SHA-256 on P-256.
    #[default]
    Es256,
    /// ECDSA w/ SHA-384 on P-384.
    Es384,
    /// ECDSA w/ SHA-512 on P-521.
    Es512,
    /// HMAC w/ SHA-256, 256-bit tag.
    Hmac256,
}

impl Algorithm {
    /// Returns the registry value placed under header label 1.
    #[must_use]
    pub const fn id(self) -> i64 {
        match self {
            Self::Es256 => -7,
            Self::Es384 => -35,
            Self::Es512 => -36,
            Self::Hmac256 => 5,
        }
    }

    /// Looks up an algorithm by registry value.
    #[must_use]
    pub const fn from_id(id: i64) -> Option<Self> {
        match id {
            -7 => Some(Self::Es256),
            -35 => Some(Self::Es384),
            -36 => Some(Self::Es512),
            5 => Some(Self::Hmac256),
            _ => None,
        }
    }

    /// Returns the registered algorithm name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Es256 => "ES256",
            Self::Es384 => "ES384",
            Self::Es512 => "ES512",
            Self::Hmac256 => "HMAC 256/256",
        }
    }

    /// Returns the length of a signature or tag produced by this algorithm.
    ///
    /// ECDSA signatures are the fixed-width `r || s` concatenation.
    #[must_use]
    pub const fn signature_len(self) -> usize {
        match self {
            Self::Es256 | Self::Hmac256 => 64,
            Self::Es384 => 96,
            Self::Es512 => 132,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.id())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Algorithm {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i64(self.id())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Algorithm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = <i64 as serde::Deserialize>::deserialize(deserializer)?;
        Self::from_id(id)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown COSE algorithm {id}")))
    }
}

/// An ordered COSE header map.
///
/// Labels are written in insertion order. Setting a label that is already
/// present replaces its value in place.
///
/// # Example
///
/// ```
/// use cwt_fixture::{Algorithm, HeaderMap, Profile};
///
/// let protected = HeaderMap::new().alg(Algorithm::Es256);
/// assert_eq!(protected.to_bytes(Profile::Full)?, vec![0xa1, 0x01, 0x26]);
/// # Ok::<(), cwt_fixture::EncodeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderMap {
    entries: Vec<(i64, Item)>,
}

impl HeaderMap {
    /// Creates an empty header map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the algorithm (label 1).
    #[must_use]
    pub fn alg(self, alg: Algorithm) -> Self {
        self.custom(HEADER_ALG, Item::int(alg.id()))
    }

    /// Sets the critical-headers list (label 2).
    #[must_use]
    pub fn crit(self, labels: impl IntoIterator<Item = i64>) -> Self {
        self.custom(HEADER_CRIT, Item::array(labels.into_iter().map(Item::int)))
    }

    /// Sets the content type (label 3).
    #[must_use]
    pub fn content_type(self, content_type: impl Into<String>) -> Self {
        self.custom(HEADER_CONTENT_TYPE, Item::text(content_type))
    }

    /// Sets the key identifier (label 4).
    ///
    /// RFC 9052 defines `kid` as a byte string; debugger fixtures commonly
    /// use a readable text id instead, which is what this writes. Use
    /// [`HeaderMap::kid_bytes`] for the registered form.
    #[must_use]
    pub fn kid(self, kid: impl Into<String>) -> Self {
        self.custom(HEADER_KID, Item::text(kid))
    }

    /// Sets the key identifier (label 4) as a byte string.
    #[must_use]
    pub fn kid_bytes(self, kid: impl Into<Vec<u8>>) -> Self {
        self.custom(HEADER_KID, Item::bytes(kid))
    }

    /// Sets an arbitrary label.
    #[must_use]
    pub fn custom(mut self, label: i64, value: Item) -> Self {
        if let Some(slot) = self.entries.iter_mut().find(|(l, _)| *l == label) {
            slot.1 = value;
        } else {
            self.entries.push((label, value));
        }
        self
    }

    /// Returns the value stored under `label`.
    #[must_use]
    pub fn get(&self, label: i64) -> Option<&Item> {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v)
    }

    /// Returns the algorithm if label 1 holds a known registry value.
    #[must_use]
    pub fn algorithm(&self) -> Option<Algorithm> {
        self.get(HEADER_ALG)
            .and_then(Item::as_i128)
            .and_then(|id| i64::try_from(id).ok())
            .and_then(Algorithm::from_id)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &Item)> {
        self.entries.iter().map(|(l, v)| (*l, v))
    }

    /// Converts the header map into a CBOR map item.
    #[must_use]
    pub fn to_item(&self) -> Item {
        Item::map(
            self.entries
                .iter()
                .map(|(label, value)| (Item::int(*label), value.clone())),
        )
    }

    /// Encodes the header map into `enc`.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError` if a value is not encodable under the
    /// encoder's profile.
    pub fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        enc.item(&self.to_item())?;
        Ok(())
    }

    /// Encodes the header map on its own.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError` if a value is not encodable under `profile`.
    pub fn to_bytes(&self, profile: Profile) -> Result<Vec<u8>, EncodeError> {
        let mut enc = Encoder::with_profile(profile);
        self.encode(&mut enc)?;
        Ok(enc.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn es256_protected_header_bytes() {
        let bytes = HeaderMap::new()
            .alg(Algorithm::Es256)
            .to_bytes(Profile::Full)
            .unwrap();

        assert_eq!(bytes, [0xa1, 0x01, 0x26]);
    }

    #[test]
    fn kid_header_bytes() {
        let bytes = HeaderMap::new()
            .kid("test-key")
            .to_bytes(Profile::Full)
            .unwrap();

        assert_eq!(bytes[..3], [0xa1, 0x04, 0x68]);
        assert_eq!(&bytes[3..], b"test-key");
    }

    #[test]
    fn empty_header_is_empty_map() {
        assert_eq!(HeaderMap::new().to_bytes(Profile::Full).unwrap(), [0xa0]);
    }

    #[test]
    fn setting_label_twice_replaces_in_place() {
        let headers = HeaderMap::new()
            .alg(Algorithm::Es256)
            .kid("a")
            .alg(Algorithm::Es384);

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.algorithm(), Some(Algorithm::Es384));
        let labels: Vec<i64> = headers.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec![1, 4]);
    }

    #[test]
    fn crit_and_content_type() {
        let headers = HeaderMap::new()
            .content_type("application/cwt")
            .crit([1]);

        assert_eq!(
            headers.to_item().to_string(),
            r#"{3: "application/cwt", 2: [1]}"#
        );
    }

    #[test]
    fn algorithm_registry_round_trip() {
        for alg in [
            Algorithm::Es256,
            Algorithm::Es384,
            Algorithm::Es512,
            Algorithm::Hmac256,
        ] {
            assert_eq!(Algorithm::from_id(alg.id()), Some(alg));
        }
        assert_eq!(Algorithm::from_id(0), None);
        assert_eq!(Algorithm::Es256.to_string(), "ES256 (-7)");
    }
}
