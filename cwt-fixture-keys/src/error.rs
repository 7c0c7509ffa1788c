//! Error types for key generation and export.

use std::fmt;

/// Errors that can occur while generating or exporting test keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// The requested curve is not supported.
    UnsupportedCurve {
        /// The curve name as given
        name: String,
    },
    /// The requested symmetric key size is not usable.
    InvalidBitLength {
        /// The requested size in bits
        bits: usize,
        /// Why the size was rejected
        reason: &'static str,
    },
    /// Raw key material is not a valid key for the curve.
    InvalidKeyMaterial {
        /// Description of the problem
        reason: String,
    },
    /// A key could not be serialized in the requested format.
    Export {
        /// The output format that failed
        format: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedCurve { name } => {
                write!(f, "unsupported curve '{name}'; only P-256 is available")
            }
            Self::InvalidBitLength { bits, reason } => {
                write!(f, "invalid key size of {bits} bits: {reason}")
            }
            Self::InvalidKeyMaterial { reason } => {
                write!(f, "invalid key material: {reason}")
            }
            Self::Export { format, reason } => {
                write!(f, "failed to export key as {format}: {reason}")
            }
        }
    }
}

impl std::error::Error for KeyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = KeyError::UnsupportedCurve {
            name: "secp256k1".into(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported curve 'secp256k1'; only P-256 is available"
        );

        let err = KeyError::InvalidBitLength {
            bits: 12,
            reason: "must be a multiple of 8",
        };
        assert!(err.to_string().contains("12 bits"));
    }
}
