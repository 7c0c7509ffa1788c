//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use cwt_fixture::prelude::*;
//!
//! let token = CoseSign1::builder()
//!     .protected(HeaderMap::new().alg(Algorithm::Es256))
//!     .build()
//!     .unwrap();
//! assert_eq!(token.as_bytes()[0], 0x84);
//! ```

pub use crate::{
    // Encoding
    Encoder, Item, MajorType, Profile,
    // Envelope
    Algorithm, CoseSign1, CoseSign1Builder, CwtClaims, CwtClaimsBuilder, FixedSignature,
    HeaderMap, PlaceholderSignature, Sign1Layout, SignatureSource,
    // Output
    EncodedOutput,
    // Errors
    CoseError, EncodeError,
};
