//! The sample token used to exercise CWT debuggers.
//!
//! The claims are the RFC 8392 Appendix A.1 example plus two custom
//! claims, so debuggers can be checked against a well-known reference:
//!
//! | Key | Claim | Value |
//! |-----|-------|-------|
//! | 1 | iss | `"coap://as.example.com"` |
//! | 2 | sub | `"erikw"` |
//! | 3 | aud | `"coap://light.example.com"` |
//! | 4 | exp | `1444064944` |
//! | 5 | nbf | `1443944944` |
//! | 6 | iat | `1443944944` |
//! | 7 | cti | `h'0b71'` |
//! | 100 | custom | `"debugger-test"` |
//! | 101 | custom | `["read", "write"]` |

use crate::claims::CwtClaims;
use crate::constants::DEFAULT_KID;
use crate::encoder::Profile;
use crate::error::CoseError;
use crate::header::{Algorithm, HeaderMap};
use crate::item::Item;
use crate::sign1::{CoseSign1, PlaceholderSignature};

/// Custom claim key holding a text value in the sample.
pub const SAMPLE_CUSTOM_TEXT_KEY: i64 = 100;

/// Custom claim key holding an array of text values in the sample.
pub const SAMPLE_CUSTOM_ARRAY_KEY: i64 = 101;

/// Settings for building the sample token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureConfig {
    /// Key id placed in the unprotected header.
    ///
    /// Default: `"test-key"`
    pub kid: String,

    /// Algorithm announced in the protected header.
    ///
    /// Default: ES256
    pub algorithm: Algorithm,

    /// Encodable range for every part of the token.
    ///
    /// Default: [`Profile::Full`]
    pub profile: Profile,

    /// Placeholder signature length. `None` uses the algorithm's size.
    ///
    /// Default: None
    pub signature_len: Option<usize>,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            kid: DEFAULT_KID.to_owned(),
            algorithm: Algorithm::Es256,
            profile: Profile::Full,
            signature_len: None,
        }
    }
}

impl FixtureConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key id.
    #[must_use]
    pub fn with_kid(mut self, kid: impl Into<String>) -> Self {
        self.kid = kid.into();
        self
    }

    /// Sets the algorithm.
    #[must_use]
    pub const fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the encoder profile.
    #[must_use]
    pub const fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Overrides the placeholder signature length.
    #[must_use]
    pub const fn with_signature_len(mut self, len: usize) -> Self {
        self.signature_len = Some(len);
        self
    }

    /// Returns the placeholder the sample token is signed with.
    #[must_use]
    pub const fn placeholder(&self) -> PlaceholderSignature {
        match self.signature_len {
            Some(len) => PlaceholderSignature::new(len),
            None => PlaceholderSignature::for_algorithm(self.algorithm),
        }
    }
}

/// Returns the sample claims in their fixed order (1..=7, 100, 101).
#[must_use]
pub fn sample_claims() -> CwtClaims {
    CwtClaims::builder()
        .issuer("coap://as.example.com")
        .subject("erikw")
        .audience("coap://light.example.com")
        .expiration(1_444_064_944)
        .not_before(1_443_944_944)
        .issued_at(1_443_944_944)
        .cti(vec![0x0b, 0x71])
        .custom(SAMPLE_CUSTOM_TEXT_KEY, Item::text("debugger-test"))
        .custom(
            SAMPLE_CUSTOM_ARRAY_KEY,
            Item::array([Item::text("read"), Item::text("write")]),
        )
        .build()
}

/// Returns the protected headers: `{1: alg}`.
#[must_use]
pub fn sample_protected(config: &FixtureConfig) -> HeaderMap {
    HeaderMap::new().alg(config.algorithm)
}

/// Returns the unprotected headers: `{4: kid}`.
#[must_use]
pub fn sample_unprotected(config: &FixtureConfig) -> HeaderMap {
    HeaderMap::new().kid(config.kid.as_str())
}

/// Builds the sample `COSE_Sign1` token with a placeholder signature.
///
/// # Errors
///
/// Returns `CoseError::Encode` if the configuration pushes a part outside
/// the selected profile (for example a key id longer than 255 bytes under
/// [`Profile::Minimal`]).
///
/// # Example
///
/// ```
/// use cwt_fixture::fixture::{sample_envelope, FixtureConfig};
///
/// let token = sample_envelope(&FixtureConfig::default())?;
/// assert_eq!(token.as_bytes()[0], 0x84);
/// assert_eq!(token.payload()[0], 0xa9);
/// # Ok::<(), cwt_fixture::CoseError>(())
/// ```
pub fn sample_envelope(config: &FixtureConfig) -> Result<CoseSign1, CoseError> {
    CoseSign1::builder()
        .profile(config.profile)
        .protected(sample_protected(config))
        .unprotected(sample_unprotected(config))
        .claims(&sample_claims())
        .build_with(&config.placeholder())
}
