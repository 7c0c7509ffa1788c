//! Minimal CBOR encoder and `COSE_Sign1` / CWT envelope assembler.
//!
//! This crate produces fixture tokens for exercising CBOR Web Token (CWT)
//! debuggers. It encodes the six CBOR major types needed for CWTs and
//! assembles them into the 4-element `COSE_Sign1` array.
//!
//! # Overview
//!
//! - [`Encoder`] appends items to a buffer it owns, always choosing the
//!   shortest head for each length or value.
//! - [`CwtClaims`] and [`HeaderMap`] describe the payload and headers.
//! - [`CoseSign1Builder`] wraps them into an envelope, filling the
//!   signature slot from a [`SignatureSource`].
//! - [`fixture`] holds the sample token and its configuration.
//!
//! Signatures are never real: the bundled sources return placeholder or
//! caller-supplied bytes, so tokens are structurally valid but do not
//! verify.
//!
//! # Quick Start
//!
//! ```rust
//! use cwt_fixture::fixture::{sample_envelope, FixtureConfig};
//! use cwt_fixture::EncodedOutput;
//!
//! let token = sample_envelope(&FixtureConfig::default()).unwrap();
//! let out = EncodedOutput::new(token.as_bytes());
//!
//! assert!(out.hex.starts_with("8443a10126"));
//! assert!(out.base64url.starts_with("hEOhASah"));
//! ```
//!
//! # Encoding Items
//!
//! ```rust
//! use cwt_fixture::{Encoder, Item};
//!
//! let mut enc = Encoder::new();
//! enc.unsigned_int(256)?.negative_int(-7)?.item(&Item::text("erikw"))?;
//!
//! assert_eq!(enc.as_bytes(), b"\x19\x01\x00\x26\x65erikw");
//! # Ok::<(), cwt_fixture::EncodeError>(())
//! ```
//!
//! # Profiles
//!
//! | Profile | Integers | Negative magnitude | Strings / containers |
//! |---------|----------|--------------------|----------------------|
//! | `Minimal` | < 2^32 | < 256 | < 256 |
//! | `Full` | < 2^64 | < 2^63 | < 2^64 |
//!
//! Values outside the active profile fail with
//! [`EncodeError::UnsupportedLength`]; nothing is truncated.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod claims;
mod constants;
mod encoder;
mod error;
pub mod fixture;
mod header;
mod item;
mod output;
pub mod prelude;
mod sign1;

pub use claims::{CwtClaims, CwtClaimsBuilder};
pub use constants::{
    CLAIM_AUD, CLAIM_CTI, CLAIM_EXP, CLAIM_IAT, CLAIM_ISS, CLAIM_NBF, CLAIM_SUB,
    COSE_SIGN1_LENGTH, DEFAULT_KID, HEADER_ALG, HEADER_CONTENT_TYPE, HEADER_CRIT, HEADER_KID,
    MARKER_EIGHT_BYTES, MARKER_FOUR_BYTES, MARKER_ONE_BYTE, MARKER_TWO_BYTES, MAX_IMMEDIATE,
    PLACEHOLDER_FILL, SIGNATURE1_CONTEXT,
};
pub use encoder::{Encoder, Profile, head_len, to_vec};
pub use error::{CoseError, EncodeError};
pub use header::{Algorithm, HeaderMap};
pub use item::{Item, MajorType};
pub use output::{EncodedOutput, to_base64url, to_hex};
pub use sign1::{
    CoseSign1, CoseSign1Builder, FixedSignature, PlaceholderSignature, Sign1Layout,
    SignatureSource,
};
