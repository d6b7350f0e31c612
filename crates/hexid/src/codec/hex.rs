use crate::FormatError;

const ALPHABET: &[u8; 16] = b"0123456789abcdef";
const NO_VALUE: u8 = 255;

/// Lookup table for hex decoding, accepting both cases.
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 16 {
        let c = ALPHABET[i as usize];
        lut[c as usize] = i;
        if c.is_ascii_lowercase() {
            lut[(c - 32) as usize] = i; // uppercase letter
        }
        i += 1;
    }
    lut
};

/// Encodes `input` as lowercase hex into `out`, which must be exactly twice
/// as long as `input`.
#[inline]
pub(crate) fn encode_hex(input: &[u8], out: &mut [u8]) {
    debug_assert_eq!(out.len(), input.len() * 2);
    for (pair, &b) in out.chunks_exact_mut(2).zip(input) {
        pair[0] = ALPHABET[(b >> 4) as usize];
        pair[1] = ALPHABET[(b & 0x0f) as usize];
    }
}

/// Decodes hex from `input` into `out`, which must be exactly half as long as
/// `input`.
///
/// Returns the first non-hex byte and its index on failure.
#[inline]
pub(crate) fn decode_hex(input: &[u8], out: &mut [u8]) -> Result<(), FormatError> {
    debug_assert_eq!(input.len(), out.len() * 2);
    for (i, (pair, slot)) in input.chunks_exact(2).zip(out.iter_mut()).enumerate() {
        let hi = nibble(pair[0], i * 2)?;
        let lo = nibble(pair[1], i * 2 + 1)?;
        *slot = (hi << 4) | lo;
    }
    Ok(())
}

#[inline]
fn nibble(byte: u8, index: usize) -> Result<u8, FormatError> {
    match LOOKUP[byte as usize] {
        NO_VALUE => Err(FormatError::InvalidAscii { byte, index }),
        val => Ok(val),
    }
}
