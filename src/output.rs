//! Text renderings of encoded bytes.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Returns the bytes as lowercase hex.
#[must_use]
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Returns the bytes as unpadded base64url (RFC 4648 §5).
#[must_use]
pub fn to_base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// The text encodings printed for a token.
///
/// # Example
///
/// ```
/// use cwt_fixture::EncodedOutput;
///
/// let out = EncodedOutput::new(&[0xfb, 0xff]);
/// assert_eq!(out.hex, "fbff");
/// assert_eq!(out.base64url, "-_8");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodedOutput {
    /// Byte count of the encoded value
    pub len: usize,
    /// Lowercase hex
    pub hex: String,
    /// Unpadded base64url
    pub base64url: String,
}

impl EncodedOutput {
    /// Renders `bytes` in every supported text encoding.
    #[must_use]
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            len: bytes.len(),
            hex: to_hex(bytes),
            base64url: to_base64url(bytes),
        }
    }
}
