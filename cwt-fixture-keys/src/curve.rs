//! Supported elliptic curves.

use std::fmt;
use std::str::FromStr;

use crate::error::KeyError;

/// An elliptic curve usable for fixture key pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Curve {
    /// NIST P-256 (secp256r1), paired with ES256.
    #[default]
    P256,
}

impl Curve {
    /// The curve name as written in a JWK `crv` member.
    #[must_use]
    pub const fn jwk_name(self) -> &'static str {
        match self {
            Self::P256 => "P-256",
        }
    }

    /// The JOSE/COSE algorithm name conventionally paired with the curve.
    #[must_use]
    pub const fn algorithm(self) -> &'static str {
        match self {
            Self::P256 => "ES256",
        }
    }

    /// Size in bytes of one affine coordinate and of the private scalar.
    #[must_use]
    pub const fn coordinate_len(self) -> usize {
        match self {
            Self::P256 => 32,
        }
    }

    /// Parses a curve name.
    ///
    /// Accepts the JWK name as well as the common aliases `p256`,
    /// `secp256r1`, `prime256v1` and `es256`, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::UnsupportedCurve` for any other name.
    pub fn parse(name: &str) -> Result<Self, KeyError> {
        match name.to_ascii_lowercase().as_str() {
            "p-256" | "p256" | "secp256r1" | "prime256v1" | "es256" => Ok(Self::P256),
            _ => Err(KeyError::UnsupportedCurve {
                name: name.to_string(),
            }),
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.jwk_name())
    }
}

impl FromStr for Curve {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
