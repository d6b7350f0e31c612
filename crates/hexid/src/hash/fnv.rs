use core::hash::Hasher;

const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const PRIME: u64 = 0x0000_0100_0000_01b3;

/// A streaming, allocation-free FNV-1a 64-bit hasher.
///
/// Not cryptographic. Writes concatenate: hashing `b"ab"` in one call is the
/// same as hashing `b"a"` then `b"b"`.
///
/// # Example
/// ```
/// use hexid::Fnv64a;
///
/// let mut h = Fnv64a::new();
/// h.write(b"foo");
/// h.write(b"bar");
/// assert_eq!(h.sum64(), 0x85944171f73967e8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fnv64a {
    state: u64,
}

impl Fnv64a {
    /// Creates a hasher at the FNV offset basis.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: OFFSET_BASIS,
        }
    }

    /// Feeds `bytes` into the hash.
    pub fn write(&mut self, bytes: &[u8]) {
        let mut hash = self.state;
        for &b in bytes {
            hash ^= u64::from(b);
            hash = hash.wrapping_mul(PRIME);
        }
        self.state = hash;
    }

    /// Returns the current digest.
    #[must_use]
    pub const fn sum64(&self) -> u64 {
        self.state
    }

    /// Returns the current digest as 8 big-endian bytes.
    #[must_use]
    pub const fn sum_be_bytes(&self) -> [u8; 8] {
        self.state.to_be_bytes()
    }

    /// Resets the hasher to the offset basis.
    pub fn reset(&mut self) {
        self.state = OFFSET_BASIS;
    }
}

impl Default for Fnv64a {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Fnv64a {
    fn finish(&self) -> u64 {
        self.sum64()
    }

    fn write(&mut self, bytes: &[u8]) {
        Self::write(self, bytes);
    }
}
