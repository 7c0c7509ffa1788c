//! Constants for CBOR encoding and the COSE / CWT registries.

/// Largest argument that fits in the initial byte of a CBOR head.
pub const MAX_IMMEDIATE: u64 = 23;

/// Additional-information marker for a 1-byte follow-on argument.
pub const MARKER_ONE_BYTE: u8 = 24;

/// Additional-information marker for a 2-byte follow-on argument.
pub const MARKER_TWO_BYTES: u8 = 25;

/// Additional-information marker for a 4-byte follow-on argument.
pub const MARKER_FOUR_BYTES: u8 = 26;

/// Additional-information marker for an 8-byte follow-on argument.
pub const MARKER_EIGHT_BYTES: u8 = 27;

/// Number of positional elements in a `COSE_Sign1` array.
pub const COSE_SIGN1_LENGTH: usize = 4;

/// Context string of the `COSE_Sign1` signature structure (RFC 9052 §4.4).
pub const SIGNATURE1_CONTEXT: &str = "Signature1";

/// COSE header label: algorithm.
pub const HEADER_ALG: i64 = 1;

/// COSE header label: critical headers.
pub const HEADER_CRIT: i64 = 2;

/// COSE header label: content type.
pub const HEADER_CONTENT_TYPE: i64 = 3;

/// COSE header label: key identifier.
pub const HEADER_KID: i64 = 4;

/// CWT claim key: issuer.
pub const CLAIM_ISS: i64 = 1;

/// CWT claim key: subject.
pub const CLAIM_SUB: i64 = 2;

/// CWT claim key: audience.
pub const CLAIM_AUD: i64 = 3;

/// CWT claim key: expiration time.
pub const CLAIM_EXP: i64 = 4;

/// CWT claim key: not before.
pub const CLAIM_NBF: i64 = 5;

/// CWT claim key: issued at.
pub const CLAIM_IAT: i64 = 6;

/// CWT claim key: CWT ID.
pub const CLAIM_CTI: i64 = 7;

/// Key id placed in the unprotected header of the sample fixture.
pub const DEFAULT_KID: &str = "test-key";

/// Filler repeated to build placeholder signatures.
///
/// The bytes spell out their purpose so a debugger showing the signature
/// slot makes it obvious the token cannot be verified.
pub const PLACEHOLDER_FILL: &[u8] = b"DUMMY-SIGNATURE-";
