use crate::{Error, FormatError, Id, Result};

/// Length of the binary encoding in bytes.
pub const BINARY_LEN: usize = 8;

impl Id {
    /// Returns the raw value as 8 big-endian bytes. No scrambling is applied.
    #[doc(alias = "encode_binary")]
    #[must_use]
    pub const fn to_be_bytes(&self) -> [u8; BINARY_LEN] {
        self.to_raw().to_be_bytes()
    }

    /// Reads an ID from 8 big-endian bytes.
    #[doc(alias = "decode_binary")]
    #[must_use]
    pub const fn from_be_bytes(bytes: [u8; BINARY_LEN]) -> Self {
        Self::from_raw(u64::from_be_bytes(bytes))
    }

    /// Appends the 8 big-endian bytes to `out`.
    pub fn append_binary(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_be_bytes());
    }
}

impl TryFrom<&[u8]> for Id {
    type Error = Error;

    /// Reads an ID from a big-endian byte slice of exactly 8 bytes.
    fn try_from(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; BINARY_LEN] = bytes.try_into().map_err(|_| {
            Error::InvalidFormat(FormatError::InvalidLen {
                len: bytes.len(),
                expected: BINARY_LEN,
            })
        })?;
        Ok(Self::from_be_bytes(bytes))
    }
}
