//! Error types for timed collection operations.

use thiserror::Error;

/// Errors that can occur when building or addressing a [`TimedCollection`].
///
/// [`TimedCollection`]: crate::TimedCollection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// Collection assembled without a timestamp extractor.
    ///
    /// Every comparison and sort depends on the extractor, so this is
    /// rejected at construction rather than discovered later.
    #[error("timed collection requires a timestamp extractor")]
    MissingExtractor,

    /// Position outside the current sequence.
    #[error("index {index} out of bounds for collection of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}
