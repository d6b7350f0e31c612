use core::fmt;

use ::serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

use crate::Id;

/// Serializes as the text token, or as `null` for [`Id::NIL`].
impl Serialize for Id {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.is_nil() {
            return s.serialize_none();
        }
        s.serialize_str(self.encode().as_str())
    }
}

/// Accepts a text token, `null`, or a bare non-negative integer taken as the
/// raw value.
impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        d.deserialize_any(IdVisitor)
    }
}

struct IdVisitor;

impl<'de> Visitor<'de> for IdVisitor {
    type Value = Id;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a 16-character hex token, an integer, or null")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Id::decode(v).map_err(E::custom)
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Id::decode_bytes(v).map_err(E::custom)
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Id::from_raw(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        u64::try_from(v)
            .map(Id::from_raw)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Id::NIL)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Id::NIL)
    }

    fn visit_some<D>(self, d: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Id::deserialize(d)
    }
}

/// (De)serializes an [`Id`] as its raw integer, for use with
/// `#[serde(with = "hexid::as_native")]`.
pub mod as_native {
    use super::{Deserialize, Deserializer, Serialize, Serializer};
    use crate::Id;

    /// Serialize an ID as its raw `u64`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &Id, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.to_raw().serialize(s)
    }

    /// Deserialize an ID from its raw `u64`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The value sets the reserved top bit
    pub fn deserialize<'de, D>(d: D) -> Result<Id, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = Id::from_raw(u64::deserialize(d)?);
        if !id.is_valid() {
            return Err(::serde::de::Error::custom(format_args!(
                "raw id {} sets the reserved top bit",
                id.to_raw()
            )));
        }
        Ok(id)
    }
}
