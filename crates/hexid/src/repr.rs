use core::{fmt, str::FromStr};

use crate::{Error, FormatError, Id, Result, codec::BINARY_LEN, codec::TEXT_LEN};

/// The shape an [`Id`] takes when it crosses a storage boundary.
///
/// The numeric selectors `0..=3` match the declaration order and are what
/// [`Id::to_value_with`] and `TryFrom<u32>` accept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Representation {
    /// Signed 64-bit integer. Always non-negative since bit 63 is reserved.
    #[default]
    Int64 = 0,
    /// Unsigned 64-bit integer.
    Uint64 = 1,
    /// The 16-character scrambled hex token.
    Text = 2,
    /// The raw value as 8 big-endian bytes.
    Binary = 3,
}

impl Representation {
    /// All representations, in selector order.
    pub const ALL: [Self; 4] = [Self::Int64, Self::Uint64, Self::Text, Self::Binary];

    /// Returns the lowercase name accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
            Self::Text => "text",
            Self::Binary => "binary",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Representation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|repr| repr.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::unsupported(s))
    }
}

impl TryFrom<u32> for Representation {
    type Error = Error;

    fn try_from(selector: u32) -> Result<Self> {
        match selector {
            0 => Ok(Self::Int64),
            1 => Ok(Self::Uint64),
            2 => Ok(Self::Text),
            3 => Ok(Self::Binary),
            _ => Err(Error::unsupported(selector)),
        }
    }
}

/// A driver-neutral column value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StoredValue {
    Null,
    Int64(i64),
    Uint64(u64),
    Text(String),
    Binary(Vec<u8>),
}

impl Id {
    /// Converts the ID to a storable value of the chosen shape.
    ///
    /// [`Id::NIL`] always converts to [`StoredValue::Null`].
    ///
    /// ```
    /// use hexid::{Id, Representation, StoredValue};
    ///
    /// let id = Id::from_raw(123);
    /// assert_eq!(id.to_value(Representation::Int64), StoredValue::Int64(123));
    /// assert_eq!(
    ///     id.to_value(Representation::Text),
    ///     StoredValue::Text("4be605be3466b3f5".into())
    /// );
    /// assert_eq!(Id::NIL.to_value(Representation::Binary), StoredValue::Null);
    /// ```
    #[must_use]
    pub fn to_value(&self, repr: Representation) -> StoredValue {
        if self.is_nil() {
            return StoredValue::Null;
        }
        match repr {
            Representation::Int64 => StoredValue::Int64(self.to_i64()),
            Representation::Uint64 => StoredValue::Uint64(self.to_raw()),
            Representation::Text => StoredValue::Text(self.encode().to_string()),
            Representation::Binary => StoredValue::Binary(self.to_be_bytes().to_vec()),
        }
    }

    /// Like [`Self::to_value`], with the representation given as a numeric
    /// selector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedRepresentation`] if `selector` is not in
    /// `0..=3`, including for [`Id::NIL`].
    pub fn to_value_with(&self, selector: u32) -> Result<StoredValue> {
        let repr = Representation::try_from(selector)?;
        Ok(self.to_value(repr))
    }

    /// Reads an ID back from a stored value.
    ///
    /// Integers are taken as the raw value. Binary values of 8 bytes are the
    /// big-endian raw value and of 16 bytes a text token. `Null` is
    /// [`Id::NIL`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] for a malformed token or a binary
    /// value of any other length.
    pub fn from_value(value: &StoredValue) -> Result<Self> {
        match value {
            StoredValue::Null => Ok(Self::NIL),
            StoredValue::Int64(v) => Ok(Self::from_i64(*v)),
            StoredValue::Uint64(v) => Ok(Self::from_raw(*v)),
            StoredValue::Text(token) => Self::decode(token),
            StoredValue::Binary(bytes) => match bytes.len() {
                BINARY_LEN => Self::try_from(bytes.as_slice()),
                TEXT_LEN => Self::decode_bytes(bytes),
                len => Err(Error::InvalidFormat(FormatError::InvalidLen {
                    len,
                    expected: BINARY_LEN,
                })),
            },
        }
    }
}

impl From<Id> for StoredValue {
    /// Converts using the default [`Representation::Int64`].
    fn from(id: Id) -> Self {
        id.to_value(Representation::default())
    }
}

impl TryFrom<&StoredValue> for Id {
    type Error = Error;

    fn try_from(value: &StoredValue) -> Result<Self> {
        Self::from_value(value)
    }
}
