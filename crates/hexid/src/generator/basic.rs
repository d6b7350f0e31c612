use core::cell::Cell;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Id, RandSource, Result, ThreadRandom,
    generator::{DEFAULT_NODE, IdGenerator, compose, validate_node},
    time::{SystemClock, TimeSource},
};

/// A non-concurrent ID generator suitable for single-threaded use.
///
/// The sequence lives in a [`Cell`], so this generator is lightweight and
/// fast but **not** `Sync`.
///
/// ## Features
/// - ❌ Not thread-safe
/// - ✅ Injectable time source
///
/// ## Recommended When
/// - You're in a single-threaded environment (no shared access)
/// - You want the fastest generator
///
/// ## See Also
/// - [`AtomicGenerator`]
///
/// [`AtomicGenerator`]: crate::AtomicGenerator
#[derive(Debug)]
pub struct BasicGenerator<T = SystemClock>
where
    T: TimeSource,
{
    sequence: Cell<u32>,
    node: u8,
    time: T,
}

impl<T> BasicGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new [`BasicGenerator`] for the given node.
    ///
    /// The sequence is seeded from the thread-local RNG so that a restarted
    /// process does not resume at the tail sequence of its predecessor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNode`] if `node` is outside `1..=63`.
    ///
    /// # Example
    /// ```
    /// use hexid::{BasicGenerator, SystemClock};
    ///
    /// let generator = BasicGenerator::new(7, SystemClock).unwrap();
    /// let id = generator.next_id();
    /// assert_eq!(id.node(), 7);
    /// ```
    ///
    /// [`Error::InvalidNode`]: crate::Error::InvalidNode
    pub fn new(node: u8, time: T) -> Result<Self> {
        Self::with_rng(node, time, &ThreadRandom)
    }

    /// Creates a new generator seeding the sequence from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNode`] if `node` is outside `1..=63`.
    ///
    /// [`Error::InvalidNode`]: crate::Error::InvalidNode
    pub fn with_rng<R>(node: u8, time: T, rng: &R) -> Result<Self>
    where
        R: RandSource<u32>,
    {
        Self::from_components(node, rng.rand(), time)
    }

    /// Creates a new generator with an explicit starting sequence.
    ///
    /// Primarily useful for deterministic tests; prefer [`Self::new`]
    /// elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNode`] if `node` is outside `1..=63`.
    ///
    /// [`Error::InvalidNode`]: crate::Error::InvalidNode
    pub fn from_components(node: u8, sequence: u32, time: T) -> Result<Self> {
        let node = validate_node(node)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(node, sequence, "created basic id generator");
        Ok(Self {
            sequence: Cell::new(sequence),
            node,
            time,
        })
    }

    /// Returns the node tag.
    pub const fn node(&self) -> u8 {
        self.node
    }

    /// Issues an ID for the current time.
    pub fn next_id(&self) -> Id {
        self.next_id_from_millis(self.time.current_millis())
    }

    /// Issues an ID for the given milliseconds since the Unix epoch.
    ///
    /// Uses the current sequence, then advances it by one.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id_from_millis(&self, unix_millis: u64) -> Id {
        let sequence = self.sequence.get();
        self.sequence.set(sequence.wrapping_add(1));
        compose(unix_millis, self.node, sequence)
    }
}

impl Default for BasicGenerator<SystemClock> {
    /// A wall-clock generator on node 1.
    fn default() -> Self {
        Self {
            sequence: Cell::new(ThreadRandom.rand()),
            node: DEFAULT_NODE,
            time: SystemClock,
        }
    }
}

impl<T> IdGenerator<T> for BasicGenerator<T>
where
    T: TimeSource,
{
    fn new(node: u8, time: T) -> Result<Self> {
        Self::new(node, time)
    }

    fn node(&self) -> u8 {
        self.node()
    }

    fn next_id_from_millis(&self, unix_millis: u64) -> Id {
        self.next_id_from_millis(unix_millis)
    }

    fn next_id(&self) -> Id {
        self.next_id()
    }
}
