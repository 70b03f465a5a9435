//! Thread-safe collections ordered by time.
//!
//! A [`TimedCollection`] owns a sequence of arbitrary elements and a
//! caller-supplied extractor that maps each element to a [`Timestamp`].
//! Sorting is stable and never holds the lock while the extractor runs.
//!
//! # Design Philosophy
//!
//! The extractor is treated as foreign code: it may be slow (parsing a
//! string into a date) or touch shared state of its own. So:
//! - Keys are extracted once per element per sort (decorate-sort-undecorate)
//! - Extraction and comparison happen on a private snapshot, outside the lock
//! - The sorted result is published with a single write-locked replacement
//!
//! # Example
//!
//! ```
//! use chrono::{DateTime, TimeZone, Utc};
//! use timeslice::TimedCollection;
//!
//! #[derive(Clone)]
//! struct Post {
//!     title: &'static str,
//!     published: DateTime<Utc>,
//! }
//!
//! let posts = TimedCollection::new(
//!     vec![
//!         Post { title: "second", published: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap() },
//!         Post { title: "first", published: Utc.with_ymd_and_hms(2023, 5, 1, 0, 0, 0).unwrap() },
//!     ],
//!     |p: &Post| p.published,
//! );
//!
//! posts.sort_ascending();
//! let titles: Vec<_> = posts.items().iter().map(|p| p.title).collect();
//! assert_eq!(titles, ["first", "second"]);
//! ```
//!
//! # Key Types
//!
//! |---------------------|-------------------------------------------------|
//! | Type                | Purpose                                         |
//! |---------------------|-------------------------------------------------|
//! | [`TimedCollection`] | Lock-guarded sequence + timestamp extractor     |
//! | [`Timestamp`]       | Totally ordered point in time (sort key)        |
//! | [`UnixMillis`]      | Compact epoch-milliseconds timestamp            |
//! | [`SortDirection`]   | Oldest-first or newest-first                    |
//! | [`Sortable`]        | len / less / swap contract for generic sorting  |
//! |---------------------|-------------------------------------------------|

mod collection;
mod direction;
mod error;
mod sortable;
mod timestamp;

pub use collection::{Extractor, TimedCollection};
pub use direction::SortDirection;
pub use error::CollectionError;
pub use sortable::{stable_sort, SortView, Sortable};
pub use timestamp::{Timestamp, UnixMillis};

/// Result type for collection operations.
pub type Result<T> = std::result::Result<T, CollectionError>;
