use crate::{Fnv64a, Id};

/// Clears the node field (bits 20..15) and the reserved top bit.
const HASHED_MASK: u64 = !(Id::NODE_MASK << Id::NODE_SHIFT) & Id::VALUE_MASK;

/// Produces a deterministic content-derived ID from one or more parts.
///
/// Parts are fed to an FNV-1a/64 hash in order and concatenated without a
/// delimiter, so `["ab"]` and `["a", "b"]` yield the same ID. Callers that
/// need the part boundaries to matter must delimit the parts themselves.
///
/// The node field of the result is always `0`, which no generator ever
/// issues, so content-derived IDs never collide with time-based ones. The
/// timestamp bits carry no meaning.
///
/// # Example
/// ```
/// use hexid::hashed_id;
///
/// let a = hashed_id(["foobar"]);
/// let b = hashed_id(["foo", "bar"]);
/// assert_eq!(a, b);
/// assert!(a.is_hashed());
/// assert_eq!(a.encode(), "45ecc9eb54b12098");
/// ```
#[must_use]
pub fn hashed_id<I, B>(parts: I) -> Id
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut hasher = Fnv64a::new();
    for part in parts {
        hasher.write(part.as_ref());
    }
    Id::from_raw(hasher.sum64() & HASHED_MASK)
}

impl Id {
    /// Produces a content-derived ID from a single byte slice.
    ///
    /// Equivalent to `hashed_id([bytes])`.
    #[must_use]
    pub fn hashed(bytes: impl AsRef<[u8]>) -> Self {
        hashed_id([bytes])
    }
}
