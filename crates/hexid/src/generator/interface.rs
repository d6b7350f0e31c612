use crate::{
    Error, Id, Result,
    time::{SystemTime, TimeSource, millis_since_epoch},
};

/// A minimal interface shared by the ID generators.
///
/// Every generator owns a node tag fixed at construction and a sequence
/// counter that wraps silently. Issuing more than [`Id::MAX_SEQUENCE`] + 1
/// IDs within one millisecond wraps the sequence and repeats earlier IDs;
/// callers that need strict uniqueness must stay below that rate.
pub trait IdGenerator<T: TimeSource> {
    /// Creates a new generator with a randomly seeded sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNode`] if `node` is outside `1..=63`.
    fn new(node: u8, time: T) -> Result<Self>
    where
        Self: Sized;

    /// Returns the node tag stamped into every issued ID.
    fn node(&self) -> u8;

    /// Issues an ID for the given milliseconds since the Unix epoch.
    fn next_id_from_millis(&self, unix_millis: u64) -> Id;

    /// Issues an ID for the given point in time.
    ///
    /// Times before the Unix epoch clamp to the epoch.
    fn next_id_at(&self, ts: SystemTime) -> Id {
        self.next_id_from_millis(millis_since_epoch(ts))
    }

    /// Issues an ID for the current time of the generator's time source.
    fn next_id(&self) -> Id;
}

/// Default node used when none is configured.
pub const DEFAULT_NODE: u8 = Id::MIN_NODE;

pub(crate) fn validate_node(node: u8) -> Result<u8> {
    if node < Id::MIN_NODE || node > Id::MAX_NODE {
        return Err(Error::InvalidNode { node });
    }
    Ok(node)
}

/// Packs a wall-clock time, node and raw counter value into an ID.
///
/// Only the low 15 bits of the counter are kept.
#[inline]
pub(crate) const fn compose(unix_millis: u64, node: u8, sequence: u32) -> Id {
    let seconds = (unix_millis / 1000) as u32;
    let millis = (unix_millis % 1000) as u16;
    Id::from_components(seconds, millis, node, (sequence & Id::SEQUENCE_MASK as u32) as u16)
}
