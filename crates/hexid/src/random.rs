use rand::{Rng, rng};

/// A trait for random sources that return random integers.
///
/// Generators draw their starting sequence from a `RandSource` so that a
/// restarted process does not resume at the sequence where the previous one
/// stopped. Tests can plug in a fixed source.
///
/// # Example
/// ```
/// use hexid::RandSource;
///
/// struct FixedRand;
/// impl RandSource<u32> for FixedRand {
///     fn rand(&self) -> u32 {
///         1234
///     }
/// }
///
/// let rng = FixedRand;
/// assert_eq!(rng.rand(), 1234);
/// ```
pub trait RandSource<T> {
    /// Returns a random integer.
    fn rand(&self) -> T;
}

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// This type does not store the RNG; it accesses the thread-local generator
/// on each call, so it is freely shareable across threads.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource<u32> for ThreadRandom {
    fn rand(&self) -> u32 {
        rng().random()
    }
}

impl RandSource<u64> for ThreadRandom {
    fn rand(&self) -> u64 {
        rng().random()
    }
}
