//! Test key material for CWT and COSE fixtures.
//!
//! Generates keys that pair with the tokens built by `cwt-fixture`:
//! P-256 key pairs for ES256 and random symmetric keys for HMAC. Each
//! key can be exported as PEM, JWK, hex and base64.
//!
//! These keys are for tests and debugging sessions. Nothing here stores
//! or protects them beyond wiping symmetric and scalar bytes on drop.
//!
//! # Example
//!
//! ```rust
//! use cwt_fixture_keys::{Curve, EcKeyPair, SymmetricKey};
//!
//! let curve = Curve::parse("P-256").unwrap();
//! let pair = EcKeyPair::generate(curve).with_kid("test-key");
//! let export = pair.export().unwrap();
//! assert_eq!(export.algorithm, "ES256");
//! assert_eq!(export.public_key_hex.len(), 130);
//!
//! let hmac = SymmetricKey::generate(256).unwrap();
//! assert_eq!(hmac.algorithm_hint(), Some("HS256"));
//! ```
//!
//! # Formats
//!
//! | Key | Formats |
//! |-----|---------|
//! | EC private | PKCS#8 PEM, JWK with `d`, raw scalar hex/base64 |
//! | EC public | SPKI PEM, JWK, uncompressed SEC1 point hex/base64 |
//! | Symmetric | hex, base64, base64url, `oct` JWK |

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod curve;
mod ec;
mod error;
mod jwk;
mod symmetric;

pub use curve::Curve;
pub use ec::{EcKeyExport, EcKeyPair};
pub use error::KeyError;
pub use jwk::{Jwk, random_kid};
pub use symmetric::{DEFAULT_BITS, MAX_BITS, SymmetricKey, SymmetricKeyExport};
