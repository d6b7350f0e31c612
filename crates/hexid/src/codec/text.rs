use core::{fmt, ops::Deref, str::FromStr};

use super::hex::{decode_hex, encode_hex};
use crate::{Error, FormatError, Id, Result};

/// Odd multiplier applied to the raw value before hex encoding.
///
/// Multiplication by an odd constant is a bijection modulo 2^64, so
/// consecutive IDs map to unrelated-looking tokens without losing
/// information.
pub const MULTIPLIER: u64 = 0x6eed_0e9d_a4d9_4a4f;

/// Multiplicative inverse of [`MULTIPLIER`] modulo 2^64.
pub const INVERSE: u64 = 0x2f72_b421_5a3d_8caf;

const _: () = assert!(
    MULTIPLIER.wrapping_mul(INVERSE) == 1,
    "INVERSE must invert MULTIPLIER modulo 2^64"
);

/// Length of a text token in bytes.
pub const TEXT_LEN: usize = 16;

/// Scrambles a raw value for external display.
#[must_use]
pub const fn scramble(raw: u64) -> u64 {
    raw.wrapping_mul(MULTIPLIER)
}

/// Reverses [`scramble`].
#[must_use]
pub const fn unscramble(scrambled: u64) -> u64 {
    scrambled.wrapping_mul(INVERSE)
}

/// A stack-allocated text token.
///
/// Implements [`fmt::Display`], [`AsRef<str>`] and [`Deref<Target = str>`],
/// so it can be printed or compared without allocating.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HexFormatter {
    buf: [u8; TEXT_LEN],
}

impl HexFormatter {
    fn new(id: &Id) -> Self {
        let mut buf = [0u8; TEXT_LEN];
        id.encode_to_buf(&mut buf);
        Self { buf }
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // SAFETY: `buf` is only ever written by `encode_hex`, which emits
        // ASCII hex digits.
        unsafe { core::str::from_utf8_unchecked(&self.buf) }
    }

    /// Returns the raw token bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; TEXT_LEN] {
        &self.buf
    }
}

impl fmt::Display for HexFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for HexFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl AsRef<str> for HexFormatter {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for HexFormatter {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl PartialEq<str> for HexFormatter {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for HexFormatter {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Id {
    /// Returns the scrambled 16-character lowercase hex token.
    ///
    /// ```
    /// use hexid::Id;
    ///
    /// assert_eq!(Id::from_raw(123).encode(), "4be605be3466b3f5");
    /// ```
    #[doc(alias = "encode_text")]
    #[must_use]
    pub fn encode(&self) -> HexFormatter {
        HexFormatter::new(self)
    }

    /// Encodes the token into `buf` and returns it as a string slice.
    pub fn encode_to_buf<'buf>(&self, buf: &'buf mut [u8; TEXT_LEN]) -> &'buf str {
        encode_hex(&scramble(self.to_raw()).to_be_bytes(), buf);
        // SAFETY: `encode_hex` only writes ASCII hex digits.
        unsafe { core::str::from_utf8_unchecked(buf) }
    }

    /// Appends the token to `out`.
    pub fn append_text(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.encode().as_bytes());
    }

    /// Decodes a 16-character hex token.
    ///
    /// Both lower- and upper-case digits are accepted. Any well-formed token
    /// decodes, including ones never produced by [`Self::encode`]; such IDs
    /// may fail [`Self::is_valid`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if the input is not exactly 16 bytes
    /// long or contains a non-hex character.
    ///
    /// ```
    /// use hexid::{Error, FormatError, Id};
    ///
    /// let id = Id::decode("4be605be3466b3f5").unwrap();
    /// assert_eq!(id.to_raw(), 123);
    ///
    /// let err = Id::decode("3784432400289806371").unwrap_err();
    /// assert_eq!(err, Error::InvalidFormat(FormatError::InvalidLen { len: 19, expected: 16 }));
    /// ```
    #[doc(alias = "decode_text")]
    pub fn decode(token: &str) -> Result<Self> {
        Self::decode_bytes(token.as_bytes())
    }

    /// Decodes a 16-byte hex token given as raw bytes.
    ///
    /// # Errors
    ///
    /// Same as [`Self::decode`].
    pub fn decode_bytes(token: &[u8]) -> Result<Self> {
        if token.len() != TEXT_LEN {
            return Err(Error::InvalidFormat(FormatError::InvalidLen {
                len: token.len(),
                expected: TEXT_LEN,
            }));
        }
        let mut bytes = [0u8; 8];
        decode_hex(token, &mut bytes)?;
        Ok(Self::from_raw(unscramble(u64::from_be_bytes(bytes))))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.encode(), f)
    }
}

impl FromStr for Id {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl TryFrom<&str> for Id {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashed_id;
    use ::rand::{Rng, rng};

    #[test]
    fn multiplier_inverts() {
        assert_eq!(MULTIPLIER.wrapping_mul(INVERSE), 1);
        assert_eq!(INVERSE.wrapping_mul(MULTIPLIER), 1);
        assert_eq!(MULTIPLIER % 2, 1);
    }

    #[test]
    fn known_tokens() {
        assert_eq!(Id::from_raw(123).encode(), "4be605be3466b3f5");
        assert_eq!(Id::from_raw(123).to_string(), "4be605be3466b3f5");
        assert_eq!(Id::NIL.encode(), "0000000000000000");
        assert_eq!(hashed_id(["foobar"]).to_string(), "45ecc9eb54b12098");
        assert_eq!(hashed_id(["foobaz"]).to_string(), "951ba2f26ae6feb0");
        assert_eq!(
            Id::from_components(1_730_000_000, 123, 1, 42).encode(),
            "a6659ee02f6db0f6"
        );
    }

    #[test]
    fn text_roundtrip() {
        let mut r = rng();
        for raw in [0, 1, 123, u64::MAX >> 1, u64::MAX] {
            let id = Id::from_raw(raw);
            assert_eq!(Id::decode(&id.encode()).unwrap(), id);
        }
        for _ in 0..10_000 {
            let id = Id::from_raw(r.random());
            let token = id.encode();
            assert_eq!(token.len(), TEXT_LEN);
            assert!(token.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
            assert_eq!(token.parse::<Id>().unwrap(), id);
        }
    }

    #[test]
    fn sequential_ids_do_not_look_sequential() {
        let a = Id::from_raw(1000).encode();
        let b = Id::from_raw(1001).encode();
        let shared = a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count();
        assert!(shared < 8, "{a} vs {b}");
    }

    #[test]
    fn decode_accepts_uppercase() {
        let id = Id::from_raw(123);
        let upper = id.encode().to_ascii_uppercase();
        assert_eq!(Id::decode(&upper).unwrap(), id);
    }

    #[test]
    fn decode_invalid_length_fails() {
        for token in ["", "4be605be3466b3f", "4be605be3466b3f55", "3784432400289806371"] {
            assert_eq!(
                Id::decode(token).unwrap_err(),
                Error::InvalidFormat(FormatError::InvalidLen {
                    len: token.len(),
                    expected: TEXT_LEN,
                })
            );
        }
    }

    #[test]
    fn decode_invalid_character_fails() {
        assert_eq!(
            Id::decode("4be605be3466b3fz").unwrap_err(),
            Error::InvalidFormat(FormatError::InvalidAscii {
                byte: b'z',
                index: 15,
            })
        );
        assert!(matches!(
            Id::decode("-be605be3466b3f5"),
            Err(Error::InvalidFormat(FormatError::InvalidAscii { index: 0, .. }))
        ));
    }

    #[test]
    fn decode_multibyte_utf8_fails_without_panicking() {
        // 16 bytes, but not 16 characters of hex.
        let token = "ééééééééé";
        assert!(Id::decode(&token[..16]).is_err());
        assert!(Id::decode("é4be605be3466b3").is_err());
    }

    #[test]
    fn decode_any_well_formed_token() {
        let mut r = rng();
        let mut buf = [0u8; TEXT_LEN];
        for _ in 0..10_000 {
            for b in &mut buf {
                *b = b"0123456789abcdefABCDEF"[r.random_range(0..22)];
            }
            let token = core::str::from_utf8(&buf).unwrap();
            let id = Id::decode(token).unwrap();
            assert!(id.encode().eq_ignore_ascii_case(token));
        }
    }

    #[test]
    fn encode_to_buf_and_append() {
        let id = Id::from_raw(123);
        let mut buf = [0u8; TEXT_LEN];
        assert_eq!(id.encode_to_buf(&mut buf), "4be605be3466b3f5");
        let mut out = b"id=".to_vec();
        id.append_text(&mut out);
        assert_eq!(out, b"id=4be605be3466b3f5");
    }

    #[test]
    fn try_from_str() {
        assert_eq!(Id::try_from("4be605be3466b3f5"), Ok(Id::from_raw(123)));
    }
}
