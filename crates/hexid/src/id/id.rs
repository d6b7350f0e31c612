use core::fmt;

use crate::time::{Duration, SystemTime, UNIX_EPOCH};

/// A 63-bit identifier packed into a `u64`.
///
/// - 1 bit reserved (always zero, so the value fits a signed 64-bit column)
/// - 32 bits unix seconds (valid until 2106)
/// - 10 bits milliseconds within the second
/// - 6 bits node tag (`1..=63`; `0` marks a content-derived ID)
/// - 15 bits sequence (32768 IDs per millisecond per node)
///
/// ```text
///  Bit Index:  63          63 62          31 30       21 20     15 14          0
///              +-------------+--------------+-----------+---------+-------------+
///  Field:      | reserved(1) | seconds (32) | millis(10)| node (6)| sequence(15)|
///              +-------------+--------------+-----------+---------+-------------+
///              |<------------ MSB ----------- 64 bits ---------- LSB ---------->|
/// ```
///
/// Ordering compares the raw unsigned value, so IDs sort chronologically by
/// second and millisecond, then by node, then by sequence.
///
/// # Example
///
/// ```
/// use hexid::Id;
///
/// let id = Id::from_components(1_730_000_000, 123, 1, 42);
/// assert_eq!(id.unix_seconds(), 1_730_000_000);
/// assert_eq!(id.millis(), 123);
/// assert_eq!(id.node(), 1);
/// assert_eq!(id.sequence(), 42);
/// ```
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id {
    id: u64,
}

impl Id {
    /// The zero ID, reserved to mean "absent" or "unset".
    pub const NIL: Self = Self { id: 0 };

    pub const SEQUENCE_BITS: u64 = 15;
    pub const NODE_BITS: u64 = 6;
    pub const MILLIS_BITS: u64 = 10;
    pub const SECONDS_BITS: u64 = 32;
    pub const RESERVED_BITS: u64 = 1;

    /// Number of bits to shift the sequence field (bit 0).
    pub const SEQUENCE_SHIFT: u64 = 0;

    /// Number of bits to shift the node tag to its position (bit 15).
    pub const NODE_SHIFT: u64 = Self::SEQUENCE_SHIFT + Self::SEQUENCE_BITS;

    /// Number of bits to shift the milliseconds to their position (bit 21).
    pub const MILLIS_SHIFT: u64 = Self::NODE_SHIFT + Self::NODE_BITS;

    /// Number of bits to shift the seconds to their position (bit 31).
    pub const SECONDS_SHIFT: u64 = Self::MILLIS_SHIFT + Self::MILLIS_BITS;

    /// Bitmask for the 15-bit sequence field. Occupies bits 0 through 14.
    pub const SEQUENCE_MASK: u64 = (1 << Self::SEQUENCE_BITS) - 1;

    /// Bitmask for the 6-bit node field. Occupies bits 15 through 20.
    pub const NODE_MASK: u64 = (1 << Self::NODE_BITS) - 1;

    /// Bitmask for the 10-bit milliseconds field. Occupies bits 21 through
    /// 30.
    pub const MILLIS_MASK: u64 = (1 << Self::MILLIS_BITS) - 1;

    /// Bitmask for the 32-bit seconds field. Occupies bits 31 through 62.
    pub const SECONDS_MASK: u64 = (1 << Self::SECONDS_BITS) - 1;

    /// Bitmask for everything below the seconds field (millis, node and
    /// sequence).
    pub const ENTROPY_MASK: u64 = (1 << Self::SECONDS_SHIFT) - 1;

    /// Bitmask for the 63 defined bits. Bit 63 is always zero.
    pub const VALUE_MASK: u64 = u64::MAX >> Self::RESERVED_BITS;

    /// Smallest node tag a generator may use.
    pub const MIN_NODE: u8 = 1;

    /// Largest node tag a generator may use.
    pub const MAX_NODE: u8 = Self::NODE_MASK as u8;

    /// Largest value the sequence field can hold before wrapping.
    pub const MAX_SEQUENCE: u16 = Self::SEQUENCE_MASK as u16;

    /// Packs the given fields into an ID.
    ///
    /// Each field is masked to its bit width and never range-checked: a
    /// sequence beyond [`Self::MAX_SEQUENCE`] wraps, and out-of-range seconds,
    /// millis or node values are silently truncated.
    #[doc(alias = "pack")]
    #[must_use]
    pub const fn from_components(unix_seconds: u32, millis: u16, node: u8, sequence: u16) -> Self {
        let seconds = (unix_seconds as u64 & Self::SECONDS_MASK) << Self::SECONDS_SHIFT;
        let millis = (millis as u64 & Self::MILLIS_MASK) << Self::MILLIS_SHIFT;
        let node = (node as u64 & Self::NODE_MASK) << Self::NODE_SHIFT;
        let sequence = (sequence as u64 & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: (seconds | millis | node | sequence) & Self::VALUE_MASK,
        }
    }

    /// Reassembles an ID from [`Self::unix_seconds`] and [`Self::entropy`].
    ///
    /// Only the low 31 bits of `entropy` are used.
    #[must_use]
    pub const fn from_entropy(unix_seconds: u32, entropy: u32) -> Self {
        Self {
            id: ((unix_seconds as u64) << Self::SECONDS_SHIFT) | (entropy as u64 & Self::ENTROPY_MASK),
        }
    }

    /// Wraps a raw integer without validation.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Returns the raw integer.
    #[must_use]
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Wraps a signed integer, e.g. read back from a `BIGINT` column.
    #[must_use]
    pub const fn from_i64(raw: i64) -> Self {
        Self { id: raw as u64 }
    }

    /// Returns the raw value as a signed integer. Never negative for IDs
    /// produced by this crate.
    #[must_use]
    pub const fn to_i64(&self) -> i64 {
        self.id as i64
    }

    /// Extracts the unix seconds.
    #[must_use]
    pub const fn unix_seconds(&self) -> u32 {
        ((self.id >> Self::SECONDS_SHIFT) & Self::SECONDS_MASK) as u32
    }

    /// Extracts the milliseconds within the second.
    #[must_use]
    pub const fn millis(&self) -> u16 {
        ((self.id >> Self::MILLIS_SHIFT) & Self::MILLIS_MASK) as u16
    }

    /// Extracts the node tag.
    #[must_use]
    pub const fn node(&self) -> u8 {
        ((self.id >> Self::NODE_SHIFT) & Self::NODE_MASK) as u8
    }

    /// Extracts the sequence number.
    #[doc(alias = "seq")]
    #[must_use]
    pub const fn sequence(&self) -> u16 {
        ((self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK) as u16
    }

    /// Returns everything below the seconds field: millis, node and sequence.
    ///
    /// Together with [`Self::unix_seconds`] this round-trips exactly through
    /// [`Self::from_entropy`].
    #[must_use]
    pub const fn entropy(&self) -> u32 {
        (self.id & Self::ENTROPY_MASK) as u32
    }

    /// Returns `true` if this is a content-derived ID (node `0`).
    #[must_use]
    pub const fn is_hashed(&self) -> bool {
        self.node() == 0
    }

    /// Returns `true` for the reserved zero ID.
    #[doc(alias = "is_zero")]
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        self.id == 0
    }

    /// Returns `true` if the reserved top bit is clear.
    ///
    /// Every ID built by this crate is valid; decoding arbitrary tokens may
    /// produce values that are not.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.id & !Self::VALUE_MASK == 0
    }

    /// Milliseconds since the Unix epoch, or `None` for content-derived IDs
    /// whose upper bits carry no time.
    #[must_use]
    pub const fn unix_millis(&self) -> Option<u64> {
        if self.is_hashed() {
            return None;
        }
        Some(self.unix_seconds() as u64 * 1000 + self.millis() as u64)
    }

    /// Reconstructs the creation time with millisecond precision.
    ///
    /// Returns `None` for content-derived IDs.
    ///
    /// ```
    /// use hexid::Id;
    /// use std::time::{Duration, UNIX_EPOCH};
    ///
    /// let id = Id::from_components(1_730_000_000, 123, 1, 42);
    /// assert_eq!(id.time(), Some(UNIX_EPOCH + Duration::from_millis(1_730_000_000_123)));
    /// assert_eq!(hexid::hashed_id(["foobar"]).time(), None);
    /// ```
    #[must_use]
    pub fn time(&self) -> Option<SystemTime> {
        self.unix_millis()
            .map(|millis| UNIX_EPOCH + Duration::from_millis(millis))
    }
}

const _: () = {
    assert!(
        Id::RESERVED_BITS + Id::SECONDS_BITS + Id::MILLIS_BITS + Id::NODE_BITS + Id::SEQUENCE_BITS
            == u64::BITS as u64,
        "Id layout must cover exactly 64 bits"
    );
};

impl From<u64> for Id {
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<Id> for u64 {
    fn from(id: Id) -> Self {
        id.to_raw()
    }
}

impl From<Id> for i64 {
    fn from(id: Id) -> Self {
        id.to_i64()
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("Id");
        dbg.field("id", &format_args!("{} (0x{:016x})", self.id, self.id));
        dbg.field("text", &self.encode());
        if self.is_hashed() {
            dbg.field("hashed", &true);
        } else {
            dbg.field("unix_seconds", &self.unix_seconds());
            dbg.field("millis", &self.millis());
            dbg.field("node", &self.node());
        }
        dbg.field("sequence", &self.sequence());
        dbg.finish()
    }
}
