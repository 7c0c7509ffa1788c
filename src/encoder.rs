//! Streaming CBOR encoder over an owned byte buffer.
//!
//! Every method appends exactly one head (and, for strings, its content)
//! to the buffer. Arrays and maps are written header-first: after
//! [`Encoder::array_header`] or [`Encoder::map_header`] the caller encodes
//! the announced number of items or key/value pairs. [`Encoder::item`]
//! does that walk for a whole [`Item`] tree.
//!
//! Heads always use the shortest form for their argument:
//!
//! | Argument | Head |
//! |----------|------|
//! | `0..=23` | initial byte only |
//! | `24..=0xff` | marker 24 + 1 byte |
//! | `0x100..=0xffff` | marker 25 + 2 bytes |
//! | `0x1_0000..=0xffff_ffff` | marker 26 + 4 bytes |
//! | larger | marker 27 + 8 bytes |

use std::fmt;

use crate::constants::{
    MARKER_EIGHT_BYTES, MARKER_FOUR_BYTES, MARKER_ONE_BYTE, MARKER_TWO_BYTES, MAX_IMMEDIATE,
};
use crate::error::EncodeError;
use crate::item::{Item, MajorType};

/// Encodable range selected for an [`Encoder`].
///
/// `Minimal` mirrors the small encoder the fixtures were first produced
/// with: integers up to 32 bits, negative magnitudes below 256, and
/// strings and containers shorter than 256. Anything larger fails with
/// [`EncodeError::UnsupportedLength`]. `Full` accepts every argument the
/// 8-byte marker can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Profile {
    /// Reference range: 4-byte integers, 1-byte lengths.
    Minimal,
    /// Complete marker ladder up to 8-byte arguments.
    #[default]
    Full,
}

impl Profile {
    /// Returns the largest head argument accepted for `major`.
    #[must_use]
    pub const fn max_argument(self, major: MajorType) -> u64 {
        match self {
            Self::Full => u64::MAX,
            Self::Minimal => match major {
                MajorType::UnsignedInt => 0xffff_ffff,
                _ => 0xff,
            },
        }
    }

    /// Returns the longest byte or text string accepted, in bytes.
    #[must_use]
    pub const fn max_string_length(self) -> u64 {
        self.max_argument(MajorType::ByteString)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minimal => f.write_str("minimal"),
            Self::Full => f.write_str("full"),
        }
    }
}

/// A CBOR encoder that owns its output buffer.
///
/// # Example
///
/// ```
/// use cwt_fixture::Encoder;
///
/// let mut enc = Encoder::new();
/// enc.map_header(1)?.unsigned_int(1)?.negative_int(-7)?;
///
/// assert_eq!(enc.as_bytes(), &[0xa1, 0x01, 0x26]);
/// # Ok::<(), cwt_fixture::EncodeError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    buf: Vec<u8>,
    profile: Profile,
}

impl Encoder {
    /// Creates an encoder with the [`Profile::Full`] range.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an encoder with the given profile.
    #[must_use]
    pub fn with_profile(profile: Profile) -> Self {
        Self {
            buf: Vec::new(),
            profile,
        }
    }

    /// Returns the active profile.
    #[must_use]
    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consumes the encoder and returns its buffer.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Encodes a non-negative integer (major type 0).
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::UnsupportedLength` if `value` is outside the
    /// profile's range.
    pub fn unsigned_int(&mut self, value: u64) -> Result<&mut Self, EncodeError> {
        self.head(MajorType::UnsignedInt, value)?;
        Ok(self)
    }

    /// Encodes a negative integer (major type 1).
    ///
    /// The head carries `-1 - value`, so `-1` encodes as `0x20` and `-7` as
    /// `0x26`.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::InvalidItemType` if `value >= 0`, or
    /// `EncodeError::UnsupportedLength` if the magnitude is outside the
    /// profile's range.
    pub fn negative_int(&mut self, value: i64) -> Result<&mut Self, EncodeError> {
        if value >= 0 {
            return Err(EncodeError::InvalidItemType {
                expected: MajorType::NegativeInt,
                found: format!("non-negative integer {value}"),
            });
        }
        // -1 - value is in 0..=i64::MAX for every negative i64.
        let magnitude = (-1 - value).unsigned_abs();
        self.head(MajorType::NegativeInt, magnitude)?;
        Ok(self)
    }

    /// Encodes a signed integer with the major type its sign calls for.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::UnsupportedLength` if the value is outside the
    /// profile's range.
    pub fn int(&mut self, value: i64) -> Result<&mut Self, EncodeError> {
        match u64::try_from(value) {
            Ok(unsigned) => self.unsigned_int(unsigned),
            Err(_) => self.negative_int(value),
        }
    }

    /// Encodes a byte string (major type 2).
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::UnsupportedLength` if the length is outside the
    /// profile's range.
    pub fn byte_string(&mut self, bytes: &[u8]) -> Result<&mut Self, EncodeError> {
        self.head(MajorType::ByteString, length_argument(bytes.len()))?;
        self.buf.extend_from_slice(bytes);
        Ok(self)
    }

    /// Encodes a text string (major type 3).
    ///
    /// The length is the UTF-8 byte count, not the number of characters.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::UnsupportedLength` if the encoded length is
    /// outside the profile's range.
    pub fn text_string(&mut self, text: &str) -> Result<&mut Self, EncodeError> {
        let bytes = text.as_bytes();
        self.head(MajorType::TextString, length_argument(bytes.len()))?;
        self.buf.extend_from_slice(bytes);
        Ok(self)
    }

    /// Writes an array head (major type 4) announcing `len` items.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::UnsupportedLength` if `len` is outside the
    /// profile's range.
    pub fn array_header(&mut self, len: usize) -> Result<&mut Self, EncodeError> {
        self.head(MajorType::Array, length_argument(len))?;
        Ok(self)
    }

    /// Writes a map head (major type 5) announcing `len` key/value pairs.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::UnsupportedLength` if `len` is outside the
    /// profile's range.
    pub fn map_header(&mut self, len: usize) -> Result<&mut Self, EncodeError> {
        self.head(MajorType::Map, length_argument(len))?;
        Ok(self)
    }

    /// Appends already-encoded CBOR without inspecting it.
    pub fn raw(&mut self, encoded: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(encoded);
        self
    }

    /// Encodes a complete item, recursing into arrays and maps.
    ///
    /// On failure the buffer is restored to its length before the call, so
    /// no partial item is left behind.
    ///
    /// # Errors
    ///
    /// Returns the first `EncodeError` raised by any nested item.
    pub fn item(&mut self, item: &Item) -> Result<&mut Self, EncodeError> {
        let start = self.buf.len();
        if let Err(e) = self.write_item(item) {
            self.buf.truncate(start);
            return Err(e);
        }
        Ok(self)
    }

    fn write_item(&mut self, item: &Item) -> Result<(), EncodeError> {
        match item {
            Item::UnsignedInt(v) => {
                self.unsigned_int(*v)?;
            }
            Item::NegativeInt(v) => {
                self.negative_int(*v)?;
            }
            Item::ByteString(b) => {
                self.byte_string(b)?;
            }
            Item::TextString(s) => {
                self.text_string(s)?;
            }
            Item::Array(items) => {
                self.array_header(items.len())?;
                for it in items {
                    self.write_item(it)?;
                }
            }
            Item::Map(pairs) => {
                self.map_header(pairs.len())?;
                for (key, value) in pairs {
                    self.write_item(key)?;
                    self.write_item(value)?;
                }
            }
        }
        Ok(())
    }

    /// Writes the initial byte and follow-on argument for `major`.
    fn head(&mut self, major: MajorType, argument: u64) -> Result<(), EncodeError> {
        let max = self.profile.max_argument(major);
        if argument > max {
            return Err(EncodeError::UnsupportedLength {
                major,
                value: argument,
                max,
                profile: self.profile,
            });
        }

        let initial = major.initial_byte();
        let be = argument.to_be_bytes();
        if argument <= MAX_IMMEDIATE {
            self.buf.push(initial | be[7]);
        } else if argument <= u64::from(u8::MAX) {
            self.buf.push(initial | MARKER_ONE_BYTE);
            self.buf.push(be[7]);
        } else if argument <= u64::from(u16::MAX) {
            self.buf.push(initial | MARKER_TWO_BYTES);
            self.buf.extend_from_slice(&be[6..]);
        } else if argument <= u64::from(u32::MAX) {
            self.buf.push(initial | MARKER_FOUR_BYTES);
            self.buf.extend_from_slice(&be[4..]);
        } else {
            self.buf.push(initial | MARKER_EIGHT_BYTES);
            self.buf.extend_from_slice(&be);
        }
        Ok(())
    }
}

/// Encodes a single item with the given profile.
///
/// # Errors
///
/// Returns `EncodeError` if any part of the item is not encodable.
///
/// # Example
///
/// ```
/// use cwt_fixture::{to_vec, Item, Profile};
///
/// let bytes = to_vec(&Item::text("erikw"), Profile::Full)?;
/// assert_eq!(bytes, b"\x65erikw");
/// # Ok::<(), cwt_fixture::EncodeError>(())
/// ```
pub fn to_vec(item: &Item, profile: Profile) -> Result<Vec<u8>, EncodeError> {
    let mut enc = Encoder::with_profile(profile);
    enc.item(item)?;
    Ok(enc.into_bytes())
}

/// Returns the number of bytes a head with `argument` occupies.
#[must_use]
pub const fn head_len(argument: u64) -> usize {
    if argument <= MAX_IMMEDIATE {
        1
    } else if argument <= 0xff {
        2
    } else if argument <= 0xffff {
        3
    } else if argument <= 0xffff_ffff {
        5
    } else {
        9
    }
}

pub(crate) fn length_argument(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}
