//! Compact 63-bit identifiers.
//!
//! An [`Id`] packs a Unix timestamp with millisecond precision, a node tag
//! and a per-generator sequence into a single `u64`. IDs are issued by a
//! [`BasicGenerator`] or an [`AtomicGenerator`], or derived from content
//! with [`hashed_id`]. Externally they are shown as 16-character scrambled
//! hex tokens that do not reveal the issue order, and stored as integers,
//! tokens, or 8 big-endian bytes via [`Representation`].
//!
//! ```
//! use hexid::{BasicGenerator, Id, SystemClock};
//!
//! let generator = BasicGenerator::new(7, SystemClock).unwrap();
//! let id = generator.next_id();
//! let token = id.encode();
//! assert_eq!(Id::decode(&token).unwrap(), id);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod codec;
mod error;
mod generator;
mod hash;
mod id;
mod random;
mod repr;
#[cfg(feature = "serde")]
mod serde;
mod time;

pub use crate::codec::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::hash::*;
pub use crate::id::*;
pub use crate::random::*;
pub use crate::repr::*;
#[cfg(feature = "serde")]
pub use crate::serde::*;
pub use crate::time::*;
