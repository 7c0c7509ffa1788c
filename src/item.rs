//! CBOR data items supported by the encoder.

use std::fmt;

/// The six CBOR major types this crate can emit.
///
/// The discriminant is the 3-bit value stored in the top of the initial byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MajorType {
    /// Major type 0.
    UnsignedInt = 0,
    /// Major type 1.
    NegativeInt = 1,
    /// Major type 2.
    ByteString = 2,
    /// Major type 3.
    TextString = 3,
    /// Major type 4.
    Array = 4,
    /// Major type 5.
    Map = 5,
}

impl MajorType {
    /// Returns the 3-bit major type code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns the initial byte with an empty additional-information field.
    #[must_use]
    pub const fn initial_byte(self) -> u8 {
        self.code() << 5
    }

    /// Describes what the head argument means for this major type.
    #[must_use]
    pub const fn argument_name(self) -> &'static str {
        match self {
            Self::UnsignedInt => "value",
            Self::NegativeInt => "magnitude",
            Self::ByteString | Self::TextString => "length",
            Self::Array => "item count",
            Self::Map => "pair count",
        }
    }
}

impl fmt::Display for MajorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UnsignedInt => "unsigned integer",
            Self::NegativeInt => "negative integer",
            Self::ByteString => "byte string",
            Self::TextString => "text string",
            Self::Array => "array",
            Self::Map => "map",
        };
        write!(f, "{name} (major type {})", self.code())
    }
}

/// A single CBOR data item.
///
/// Arrays and maps carry their elements, so their lengths are always known
/// before encoding. Map entries keep the order they were inserted in; the
/// encoder never sorts them.
///
/// # Example
///
/// ```
/// use cwt_fixture::Item;
///
/// let item = Item::map([
///     (Item::from(1u64), Item::text("coap://as.example.com")),
///     (Item::from(-7i64), Item::bytes(vec![0x0b, 0x71])),
/// ]);
///
/// assert_eq!(item.to_string(), r#"{1: "coap://as.example.com", -7: h'0b71'}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Item {
    /// A non-negative integer.
    UnsignedInt(u64),
    /// A negative integer. Holding a value `>= 0` is a caller error that the
    /// encoder reports as `InvalidItemType`.
    NegativeInt(i64),
    /// An opaque byte string.
    ByteString(Vec<u8>),
    /// A UTF-8 text string.
    TextString(String),
    /// An ordered sequence of items.
    Array(Vec<Item>),
    /// An ordered sequence of key/value pairs.
    Map(Vec<(Item, Item)>),
}

impl Item {
    /// Creates an integer item, choosing the major type from the sign.
    #[must_use]
    pub fn int(value: i64) -> Self {
        match u64::try_from(value) {
            Ok(unsigned) => Self::UnsignedInt(unsigned),
            Err(_) => Self::NegativeInt(value),
        }
    }

    /// Creates a text string item.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::TextString(value.into())
    }

    /// Creates a byte string item.
    #[must_use]
    pub fn bytes(value: impl Into<Vec<u8>>) -> Self {
        Self::ByteString(value.into())
    }

    /// Creates an array item.
    #[must_use]
    pub fn array(items: impl IntoIterator<Item = Item>) -> Self {
        Self::Array(items.into_iter().collect())
    }

    /// Creates a map item from pairs, preserving their order.
    #[must_use]
    pub fn map(pairs: impl IntoIterator<Item = (Item, Item)>) -> Self {
        Self::Map(pairs.into_iter().collect())
    }

    /// Returns the major type this item encodes as.
    #[must_use]
    pub const fn major_type(&self) -> MajorType {
        match self {
            Self::UnsignedInt(_) => MajorType::UnsignedInt,
            Self::NegativeInt(_) => MajorType::NegativeInt,
            Self::ByteString(_) => MajorType::ByteString,
            Self::TextString(_) => MajorType::TextString,
            Self::Array(_) => MajorType::Array,
            Self::Map(_) => MajorType::Map,
        }
    }

    /// Returns the integer value if this is an integer item.
    #[must_use]
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Self::UnsignedInt(v) => Some(i128::from(*v)),
            Self::NegativeInt(v) => Some(i128::from(*v)),
            _ => None,
        }
    }

    /// Returns the text if this is a text string item.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::TextString(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the bytes if this is a byte string item.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::ByteString(b) => Some(b),
            _ => None,
        }
    }
}

impl From<u64> for Item {
    fn from(value: u64) -> Self {
        Self::UnsignedInt(value)
    }
}

impl From<u32> for Item {
    fn from(value: u32) -> Self {
        Self::UnsignedInt(u64::from(value))
    }
}

impl From<i64> for Item {
    fn from(value: i64) -> Self {
        Self::int(value)
    }
}

impl From<i32> for Item {
    fn from(value: i32) -> Self {
        Self::int(i64::from(value))
    }
}

impl From<&str> for Item {
    fn from(value: &str) -> Self {
        Self::TextString(value.to_owned())
    }
}

impl From<String> for Item {
    fn from(value: String) -> Self {
        Self::TextString(value)
    }
}

impl From<&[u8]> for Item {
    fn from(value: &[u8]) -> Self {
        Self::ByteString(value.to_vec())
    }
}

impl From<Vec<u8>> for Item {
    fn from(value: Vec<u8>) -> Self {
        Self::ByteString(value)
    }
}

impl From<Vec<Item>> for Item {
    fn from(value: Vec<Item>) -> Self {
        Self::Array(value)
    }
}

/// Renders the item in CBOR diagnostic notation (RFC 8949 §8).
impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsignedInt(v) => write!(f, "{v}"),
            Self::NegativeInt(v) => write!(f, "{v}"),
            Self::ByteString(b) => write!(f, "h'{}'", hex::encode(b)),
            Self::TextString(s) => write!(f, "{s:?}"),
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(pairs) => {
                f.write_str("{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}
