//! `COSE_Sign1` envelope assembly (RFC 9052 §4.2).
//!
//! ```text
//! COSE_Sign1 = [
//!     protected   : bstr .cbor header_map,
//!     unprotected : header_map,
//!     payload     : bstr .cbor CWT claims,
//!     signature   : bstr
//! ]
//! ```
//!
//! The protected headers and the payload are encoded on their own and then
//! wrapped as byte strings. The unprotected headers are spliced into the
//! array as a plain map. The signature is produced by a [`SignatureSource`]
//! over the `Sig_structure`; the only sources shipped here return fixed or
//! placeholder bytes, so the resulting tokens never verify.

use std::fmt;

use crate::claims::CwtClaims;
use crate::constants::{COSE_SIGN1_LENGTH, PLACEHOLDER_FILL, SIGNATURE1_CONTEXT};
use crate::encoder::{Encoder, Profile, head_len, length_argument};
use crate::error::{CoseError, EncodeError};
use crate::header::{Algorithm, HeaderMap};

/// Produces the bytes placed in the signature slot.
///
/// Implementations receive the encoded `Sig_structure`
/// (`["Signature1", protected, external_aad, payload]`).
pub trait SignatureSource {
    /// Returns the signature over `to_be_signed`.
    ///
    /// # Errors
    ///
    /// Returns `CoseError::Signature` if no signature can be produced.
    fn sign(&self, to_be_signed: &[u8]) -> Result<Vec<u8>, CoseError>;
}

/// Placeholder signature bytes for fixtures.
///
/// Fills the slot with a repeating `DUMMY-SIGNATURE-` pattern of the
/// requested length, ignoring the data to be signed. Tokens carrying it
/// are structurally valid but can never be verified.
///
/// # Example
///
/// ```
/// use cwt_fixture::{Algorithm, PlaceholderSignature, SignatureSource};
///
/// let sig = PlaceholderSignature::for_algorithm(Algorithm::Es256).sign(b"ignored")?;
/// assert_eq!(sig.len(), 64);
/// assert!(sig.starts_with(b"DUMMY-SIGNATURE-"));
/// # Ok::<(), cwt_fixture::CoseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderSignature {
    len: usize,
}

impl PlaceholderSignature {
    /// Creates a placeholder of `len` bytes.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { len }
    }

    /// Creates a placeholder sized like a real signature from `alg`.
    #[must_use]
    pub const fn for_algorithm(alg: Algorithm) -> Self {
        Self::new(alg.signature_len())
    }

    /// Returns the placeholder length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the placeholder is zero bytes long.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl SignatureSource for PlaceholderSignature {
    fn sign(&self, _to_be_signed: &[u8]) -> Result<Vec<u8>, CoseError> {
        Ok(PLACEHOLDER_FILL
            .iter()
            .copied()
            .cycle()
            .take(self.len)
            .collect())
    }
}

/// Caller-supplied signature bytes, used as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSignature(pub Vec<u8>);

impl SignatureSource for FixedSignature {
    fn sign(&self, _to_be_signed: &[u8]) -> Result<Vec<u8>, CoseError> {
        Ok(self.0.clone())
    }
}

/// Encoded size of each envelope slot, heads included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sign1Layout {
    /// The 4-element array head
    pub array_head: usize,
    /// Protected headers wrapped as a byte string
    pub protected: usize,
    /// Unprotected header map
    pub unprotected: usize,
    /// Payload wrapped as a byte string
    pub payload: usize,
    /// Signature byte string
    pub signature: usize,
}

impl Sign1Layout {
    /// Returns the total envelope length.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.array_head + self.protected + self.unprotected + self.payload + self.signature
    }
}

/// An assembled `COSE_Sign1` envelope.
///
/// Immutable once built; every accessor returns a view into the encoded
/// parts.
///
/// # Example
///
/// ```
/// use cwt_fixture::{Algorithm, CoseSign1, CwtClaims, HeaderMap};
///
/// let claims = CwtClaims::builder().subject("erikw").build();
/// let token = CoseSign1::builder()
///     .protected(HeaderMap::new().alg(Algorithm::Es256))
///     .unprotected(HeaderMap::new().kid("test-key"))
///     .claims(&claims)
///     .build()?;
///
/// assert_eq!(token.as_bytes()[0], 0x84);
/// assert_eq!(token.layout().total(), token.as_bytes().len());
/// # Ok::<(), cwt_fixture::CoseError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoseSign1 {
    protected_headers: HeaderMap,
    unprotected_headers: HeaderMap,
    claims: Option<CwtClaims>,
    protected: Vec<u8>,
    unprotected: Vec<u8>,
    payload: Vec<u8>,
    signature: Vec<u8>,
    encoded: Vec<u8>,
    profile: Profile,
}

impl CoseSign1 {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> CoseSign1Builder {
        CoseSign1Builder::new()
    }

    /// Returns the complete envelope bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.encoded
    }

    /// Consumes the envelope and returns its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.encoded
    }

    /// Returns the serialized protected header map (before wrapping).
    #[must_use]
    pub fn protected_bytes(&self) -> &[u8] {
        &self.protected
    }

    /// Returns the encoded unprotected header map.
    #[must_use]
    pub fn unprotected_bytes(&self) -> &[u8] {
        &self.unprotected
    }

    /// Returns the payload (before wrapping).
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Returns the signature bytes.
    #[must_use]
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Returns the protected headers the envelope was built from.
    #[must_use]
    pub fn protected_headers(&self) -> &HeaderMap {
        &self.protected_headers
    }

    /// Returns the unprotected headers the envelope was built from.
    #[must_use]
    pub fn unprotected_headers(&self) -> &HeaderMap {
        &self.unprotected_headers
    }

    /// Returns the claims, if the payload was built from claims.
    #[must_use]
    pub fn claims(&self) -> Option<&CwtClaims> {
        self.claims.as_ref()
    }

    /// Returns the encoder profile used for every part.
    #[must_use]
    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Returns the encoded size of each slot.
    #[must_use]
    pub fn layout(&self) -> Sign1Layout {
        Sign1Layout {
            array_head: head_len(length_argument(COSE_SIGN1_LENGTH)),
            protected: wrapped_len(self.protected.len()),
            unprotected: self.unprotected.len(),
            payload: wrapped_len(self.payload.len()),
            signature: wrapped_len(self.signature.len()),
        }
    }

    /// Returns the `Sig_structure` a real signer would sign.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError` if the parts exceed the envelope's profile.
    pub fn to_be_signed(&self, external_aad: &[u8]) -> Result<Vec<u8>, EncodeError> {
        sig_structure(&self.protected, external_aad, &self.payload, self.profile)
    }
}

impl fmt::Display for CoseSign1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[<< {} >>, {}, << {} >>, h'{}']",
            self.protected_headers.to_item(),
            self.unprotected_headers.to_item(),
            self.claims.as_ref().map_or_else(
                || format!("h'{}'", hex::encode(&self.payload)),
                |c| c.to_item().to_string()
            ),
            hex::encode(&self.signature)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PayloadSource {
    Claims(CwtClaims),
    Raw(Vec<u8>),
}

/// Builder for [`CoseSign1`] envelopes.
///
/// Defaults: empty header maps, empty payload, [`Profile::Full`], no
/// external AAD. [`CoseSign1Builder::build`] fills the signature slot with
/// a [`PlaceholderSignature`] sized for the protected `alg` (ES256 when
/// absent).
#[derive(Debug, Clone)]
pub struct CoseSign1Builder {
    protected: HeaderMap,
    unprotected: HeaderMap,
    payload: PayloadSource,
    external_aad: Vec<u8>,
    profile: Profile,
}

impl CoseSign1Builder {
    /// Creates a builder with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            protected: HeaderMap::new(),
            unprotected: HeaderMap::new(),
            payload: PayloadSource::Raw(Vec::new()),
            external_aad: Vec::new(),
            profile: Profile::default(),
        }
    }

    /// Sets the protected header map.
    #[must_use]
    pub fn protected(mut self, headers: HeaderMap) -> Self {
        self.protected = headers;
        self
    }

    /// Sets the unprotected header map.
    #[must_use]
    pub fn unprotected(mut self, headers: HeaderMap) -> Self {
        self.unprotected = headers;
        self
    }

    /// Uses the encoded claims map as payload.
    #[must_use]
    pub fn claims(mut self, claims: &CwtClaims) -> Self {
        self.payload = PayloadSource::Claims(claims.clone());
        self
    }

    /// Uses raw bytes as payload.
    #[must_use]
    pub fn payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = PayloadSource::Raw(payload.into());
        self
    }

    /// Sets externally supplied authenticated data for the `Sig_structure`.
    #[must_use]
    pub fn external_aad(mut self, aad: impl Into<Vec<u8>>) -> Self {
        self.external_aad = aad.into();
        self
    }

    /// Sets the encoder profile used for every part.
    #[must_use]
    pub fn profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Builds the envelope with a placeholder signature.
    ///
    /// # Errors
    ///
    /// Returns `CoseError::Encode` if any part exceeds the profile.
    pub fn build(self) -> Result<CoseSign1, CoseError> {
        let alg = self.protected.algorithm().unwrap_or_default();
        self.build_with(&PlaceholderSignature::for_algorithm(alg))
    }

    /// Builds the envelope with a signature from `source`.
    ///
    /// # Errors
    ///
    /// Returns `CoseError::Encode` if any part exceeds the profile, or the
    /// source's error if it cannot sign.
    pub fn build_with<S: SignatureSource + ?Sized>(
        self,
        source: &S,
    ) -> Result<CoseSign1, CoseError> {
        let profile = self.profile;

        // An empty protected map is carried as a zero-length bstr.
        let protected = if self.protected.is_empty() {
            Vec::new()
        } else {
            self.protected.to_bytes(profile)?
        };
        let unprotected = self.unprotected.to_bytes(profile)?;
        let (claims, payload) = match self.payload {
            PayloadSource::Claims(claims) => {
                let bytes = claims.to_bytes(profile)?;
                (Some(claims), bytes)
            }
            PayloadSource::Raw(bytes) => (None, bytes),
        };

        let to_be_signed = sig_structure(&protected, &self.external_aad, &payload, profile)?;
        let signature = source.sign(&to_be_signed)?;

        let mut enc = Encoder::with_profile(profile);
        enc.array_header(COSE_SIGN1_LENGTH)?
            .byte_string(&protected)?
            .raw(&unprotected)
            .byte_string(&payload)?
            .byte_string(&signature)?;

        Ok(CoseSign1 {
            protected_headers: self.protected,
            unprotected_headers: self.unprotected,
            claims,
            protected,
            unprotected,
            payload,
            signature,
            encoded: enc.into_bytes(),
            profile,
        })
    }
}

impl Default for CoseSign1Builder {
    fn default() -> Self {
        Self::new()
    }
}

fn sig_structure(
    protected: &[u8],
    external_aad: &[u8],
    payload: &[u8],
    profile: Profile,
) -> Result<Vec<u8>, EncodeError> {
    let mut enc = Encoder::with_profile(profile);
    enc.array_header(4)?
        .text_string(SIGNATURE1_CONTEXT)?
        .byte_string(protected)?
        .byte_string(external_aad)?
        .byte_string(payload)?;
    Ok(enc.into_bytes())
}

fn wrapped_len(len: usize) -> usize {
    head_len(length_argument(len)) + len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;

    fn es256_builder() -> CoseSign1Builder {
        CoseSign1::builder()
            .protected(HeaderMap::new().alg(Algorithm::Es256))
            .unprotected(HeaderMap::new().kid("test-key"))
    }

    #[test]
    fn envelope_layout_is_positional() {
        let claims = CwtClaims::builder().subject("erikw").build();
        let token = es256_builder().claims(&claims).build().unwrap();
        let bytes = token.as_bytes();

        // array(4), bstr(3) wrapping {1: -7}
        assert_eq!(&bytes[..5], &[0x84, 0x43, 0xa1, 0x01, 0x26]);
        // inline unprotected map, not wrapped
        assert_eq!(&bytes[5..8], &[0xa1, 0x04, 0x68]);
        assert_eq!(&bytes[8..16], b"test-key");
        // bstr(8) wrapping {2: "erikw"}
        assert_eq!(bytes[16], 0x48);
        assert_eq!(&bytes[17..25], b"\xa1\x02\x65erikw");
        // bstr(64) placeholder signature
        assert_eq!(&bytes[25..27], &[0x58, 0x40]);
        assert_eq!(bytes.len(), 27 + 64);
    }

    #[test]
    fn layout_total_matches_encoding() {
        let claims = CwtClaims::builder()
            .issuer("coap://as.example.com")
            .custom(100, Item::text("x".repeat(40)))
            .build();
        let token = es256_builder().claims(&claims).build().unwrap();
        let layout = token.layout();

        assert_eq!(layout.array_head, 1);
        assert_eq!(layout.protected, 4);
        assert_eq!(layout.unprotected, token.unprotected_bytes().len());
        assert_eq!(layout.signature, 66);
        assert_eq!(layout.total(), token.as_bytes().len());
    }

    #[test]
    fn placeholder_tracks_algorithm() {
        let token = CoseSign1::builder()
            .protected(HeaderMap::new().alg(Algorithm::Es384))
            .build()
            .unwrap();

        assert_eq!(token.signature().len(), 96);
    }

    #[test]
    fn placeholder_pattern_repeats() {
        let sig = PlaceholderSignature::new(20).sign(&[]).unwrap();

        assert_eq!(sig, b"DUMMY-SIGNATURE-DUMM");
    }

    #[test]
    fn fixed_signature_is_used_verbatim() {
        let token = es256_builder()
            .payload(vec![0xa0])
            .build_with(&FixedSignature(vec![1, 2, 3]))
            .unwrap();

        assert_eq!(token.signature(), &[1, 2, 3]);
        assert!(token.as_bytes().ends_with(&[0x43, 1, 2, 3]));
        assert!(token.claims().is_none());
    }

    #[test]
    fn empty_protected_is_zero_length_bstr() {
        let token = CoseSign1::builder()
            .build_with(&FixedSignature(Vec::new()))
            .unwrap();

        assert_eq!(token.as_bytes(), &[0x84, 0x40, 0xa0, 0x40, 0x40]);
    }

    #[test]
    fn signature_source_sees_sig_structure() {
        struct Echo;
        impl SignatureSource for Echo {
            fn sign(&self, to_be_signed: &[u8]) -> Result<Vec<u8>, CoseError> {
                Ok(to_be_signed.to_vec())
            }
        }

        let token = es256_builder()
            .payload(b"hi".to_vec())
            .external_aad(vec![0xaa])
            .build_with(&Echo)
            .unwrap();

        let expected = token.to_be_signed(&[0xaa]).unwrap();
        assert_eq!(token.signature(), expected.as_slice());
        assert_eq!(expected[0], 0x84);
        assert_eq!(&expected[1..12], b"\x6aSignature1");
    }

    #[test]
    fn failing_source_propagates() {
        struct Broken;
        impl SignatureSource for Broken {
            fn sign(&self, _: &[u8]) -> Result<Vec<u8>, CoseError> {
                Err(CoseError::Signature {
                    reason: "no key".into(),
                })
            }
        }

        let result = es256_builder().build_with(&Broken);
        assert!(matches!(result, Err(CoseError::Signature { .. })));
    }

    #[test]
    fn minimal_profile_rejects_oversized_payload() {
        let result = es256_builder()
            .profile(Profile::Minimal)
            .payload(vec![0u8; 300])
            .build();

        assert!(matches!(
            result,
            Err(CoseError::Encode(EncodeError::UnsupportedLength { .. }))
        ));
    }

    #[test]
    fn building_twice_is_deterministic() {
        let claims = CwtClaims::builder().issuer("a").cti(vec![1]).build();
        let first = es256_builder().claims(&claims).build().unwrap();
        let second = es256_builder().claims(&claims).build().unwrap();

        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn display_uses_diagnostic_notation() {
        let claims = CwtClaims::builder().subject("erikw").build();
        let token = es256_builder()
            .claims(&claims)
            .build_with(&FixedSignature(vec![0xab]))
            .unwrap();

        assert_eq!(
            token.to_string(),
            r#"[<< {1: -7} >>, {4: "test-key"}, << {2: "erikw"} >>, h'ab']"#
        );
    }
}
