use portable_atomic::{AtomicU32, Ordering};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Id, RandSource, Result, ThreadRandom,
    generator::{DEFAULT_NODE, IdGenerator, compose, validate_node},
    time::{SystemClock, TimeSource},
};

/// A lock-free ID generator suitable for multi-threaded environments.
///
/// The sequence is an [`AtomicU32`] advanced with a single fetch-and-add, so
/// no two concurrent callers ever observe the same pre-increment value. The
/// node and time source are immutable after construction and need no further
/// synchronization.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Injectable time source
///
/// ## Recommended When
/// - You're in a multi-threaded environment
/// - A single generator is shared, e.g. behind an `Arc`
///
/// ## See Also
/// - [`BasicGenerator`]
///
/// [`BasicGenerator`]: crate::BasicGenerator
#[derive(Debug)]
pub struct AtomicGenerator<T = SystemClock>
where
    T: TimeSource,
{
    #[cfg(feature = "cache-padded")]
    sequence: crossbeam_utils::CachePadded<AtomicU32>,
    #[cfg(not(feature = "cache-padded"))]
    sequence: AtomicU32,
    node: u8,
    time: T,
}

impl<T> AtomicGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new [`AtomicGenerator`] for the given node.
    ///
    /// The sequence is seeded from the thread-local RNG.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNode`] if `node` is outside `1..=63`.
    ///
    /// # Example
    /// ```
    /// use hexid::{AtomicGenerator, SystemClock};
    /// use std::{sync::Arc, thread};
    ///
    /// let generator = Arc::new(AtomicGenerator::new(3, SystemClock).unwrap());
    /// let handles: Vec<_> = (0..2)
    ///     .map(|_| {
    ///         let generator = Arc::clone(&generator);
    ///         thread::spawn(move || generator.next_id())
    ///     })
    ///     .collect();
    /// let ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    /// assert_ne!(ids[0], ids[1]);
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
    /// # Errors
    ///
    /// Returns [`Error::InvalidNode`] if `node` is outside `1..=63`.
    ///
    /// [`Error::InvalidNode`]: crate::Error::InvalidNode
    pub fn from_components(node: u8, sequence: u32, time: T) -> Result<Self> {
        let node = validate_node(node)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(node, sequence, "created atomic id generator");
        Ok(Self::from_parts(node, sequence, time))
    }

    fn from_parts(node: u8, sequence: u32, time: T) -> Self {
        Self {
            #[cfg(feature = "cache-padded")]
            sequence: crossbeam_utils::CachePadded::new(AtomicU32::new(sequence)),
            #[cfg(not(feature = "cache-padded"))]
            sequence: AtomicU32::new(sequence),
            node,
            time,
        }
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
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id_from_millis(&self, unix_millis: u64) -> Id {
        // Only atomicity of the increment matters; no other memory is
        // published through the counter.
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        compose(unix_millis, self.node, sequence)
    }
}

impl Default for AtomicGenerator<SystemClock> {
    /// A wall-clock generator on node 1.
    fn default() -> Self {
        Self::from_parts(DEFAULT_NODE, ThreadRandom.rand(), SystemClock)
    }
}

impl<T> IdGenerator<T> for AtomicGenerator<T>
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
