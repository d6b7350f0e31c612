/// A result type whose error defaults to [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `hexid` can produce.
///
/// Every fallible operation in this crate is a pure computation over its
/// inputs, so each error is deterministic and retrying with the same input
/// will fail the same way.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A generator was constructed with a node tag outside `1..=63`.
    ///
    /// Node `0` is reserved for content-derived identifiers.
    #[error("invalid node {node}: must be between {} and {}", crate::Id::MIN_NODE, crate::Id::MAX_NODE)]
    InvalidNode {
        /// The rejected node tag.
        node: u8,
    },

    /// A text token or binary payload could not be decoded into an [`Id`].
    ///
    /// [`Id`]: crate::Id
    #[error("invalid format: {0}")]
    InvalidFormat(#[from] FormatError),

    /// A value conversion was asked for a representation selector that is
    /// not one of the recognized [`Representation`]s.
    ///
    /// [`Representation`]: crate::Representation
    #[error("unsupported representation: {selector}")]
    UnsupportedRepresentation {
        /// The rejected selector, as given by the caller.
        selector: String,
    },
}

/// Details of why decoding failed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    /// The input has the wrong length for the expected encoding.
    #[error("invalid length {len}, expected {expected}")]
    InvalidLen {
        /// Length of the rejected input.
        len: usize,
        /// Length the encoding requires.
        expected: usize,
    },

    /// The input contains a byte that is not a hexadecimal digit.
    #[error("invalid ascii byte {byte:#04x} at index {index}")]
    InvalidAscii {
        /// The offending byte.
        byte: u8,
        /// Position of the offending byte in the input.
        index: usize,
    },
}

impl Error {
    pub(crate) fn unsupported(selector: impl ToString) -> Self {
        Self::UnsupportedRepresentation {
            selector: selector.to_string(),
        }
    }
}
