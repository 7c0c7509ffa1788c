//! Error types for encoding and envelope assembly.

use std::fmt;

use crate::encoder::Profile;
use crate::item::MajorType;

/// Errors that can occur while encoding CBOR items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A value or length exceeds what the active profile can encode.
    UnsupportedLength {
        /// Major type being encoded
        major: MajorType,
        /// The argument that was rejected
        value: u64,
        /// Largest argument the profile accepts for this major type
        max: u64,
        /// Profile that imposed the limit
        profile: Profile,
    },
    /// A value is incompatible with the requested major type.
    InvalidItemType {
        /// Major type that was requested
        expected: MajorType,
        /// Description of the value that was supplied
        found: String,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedLength {
                major,
                value,
                max,
                profile,
            } => {
                write!(
                    f,
                    "{major} {} {value} exceeds the {profile} profile maximum of {max}; nothing was written",
                    major.argument_name()
                )
            }
            Self::InvalidItemType { expected, found } => {
                write!(f, "cannot encode {found} as {expected}")
            }
        }
    }
}

impl std::error::Error for EncodeError {}

/// Errors that can occur while assembling a `COSE_Sign1` envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoseError {
    /// One of the envelope parts could not be encoded.
    Encode(EncodeError),
    /// The signature source failed to produce bytes.
    Signature {
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for CoseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode(e) => write!(f, "failed to encode COSE_Sign1 envelope: {e}"),
            Self::Signature { reason } => {
                write!(f, "signature source failed: {reason}")
            }
        }
    }
}

impl std::error::Error for CoseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encode(e) => Some(e),
            Self::Signature { .. } => None,
        }
    }
}

impl From<EncodeError> for CoseError {
    fn from(e: EncodeError) -> Self {
        Self::Encode(e)
    }
}
