//! Thread-safe collection ordered by extracted timestamps.
//!
//! # Concurrency Model
//!
//! - One `parking_lot::RwLock` per collection guards the backing `Vec`
//! - The extractor never runs while the lock is held
//! - Sorting works on a private snapshot and publishes it with a single
//!   write-locked replacement, so readers see either the old or the new
//!   sequence, never a mix
//!
//! A sort racing with a `swap` publishes the order computed from its own
//! snapshot, so the swap can be overwritten. No reader observes a torn
//! sequence either way.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::direction::SortDirection;
use crate::error::CollectionError;
use crate::sortable::SortView;
use crate::timestamp::Timestamp;
use crate::Result;

/// Shared handle to a timestamp extraction function.
///
/// Must be pure: the collection calls it from arbitrary threads, any number
/// of times, without holding its lock.
pub type Extractor<T, K> = Arc<dyn Fn(&T) -> K + Send + Sync>;

/// An ordered sequence of `T` sortable by the timestamp `K` each element
/// carries.
///
/// `K` defaults to `DateTime<Utc>`; any [`Timestamp`] works.
///
/// Out-of-range positions passed to [`less_ascending`](Self::less_ascending),
/// [`less_descending`](Self::less_descending), [`less`](Self::less) and
/// [`swap`](Self::swap) panic with a bounds-check failure. Use
/// [`try_less`](Self::try_less) and [`try_swap`](Self::try_swap) to get a
/// [`CollectionError::IndexOutOfBounds`] instead.
pub struct TimedCollection<T, K = DateTime<Utc>> {
    /// Elements in their current order.
    items: RwLock<Vec<T>>,
    /// Sort key extractor, fixed at construction.
    extract: Extractor<T, K>,
}

impl<T, K> TimedCollection<T, K> {
    /// Take ownership of `items` and bind the extractor.
    pub fn new(items: Vec<T>, extract: impl Fn(&T) -> K + Send + Sync + 'static) -> Self {
        Self::with_extractor(items, Arc::new(extract))
    }

    /// Like [`new`](Self::new), reusing an already shared extractor.
    pub fn with_extractor(items: Vec<T>, extract: Extractor<T, K>) -> Self {
        Self {
            items: RwLock::new(items),
            extract,
        }
    }

    /// Build from parts assembled at runtime.
    ///
    /// Fails with [`CollectionError::MissingExtractor`] if no extractor was
    /// supplied.
    pub fn from_parts(items: Vec<T>, extract: Option<Extractor<T, K>>) -> Result<Self> {
        let extract = extract.ok_or(CollectionError::MissingExtractor)?;
        Ok(Self::with_extractor(items, extract))
    }

    /// Number of elements currently held.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Shared handle to this collection's extractor.
    pub fn extractor(&self) -> Extractor<T, K> {
        Arc::clone(&self.extract)
    }

    /// Exchange the elements at `i` and `j`.
    ///
    /// # Panics
    ///
    /// If either index is out of range.
    pub fn swap(&self, i: usize, j: usize) {
        self.items.write().swap(i, j);
    }

    /// Exchange the elements at `i` and `j`, checking both positions first.
    pub fn try_swap(&self, i: usize, j: usize) -> Result<()> {
        let mut items = self.items.write();
        check_index(i, items.len())?;
        check_index(j, items.len())?;
        items.swap(i, j);
        Ok(())
    }

    /// Consume the collection, returning the elements without copying.
    pub fn into_items(self) -> Vec<T> {
        self.items.into_inner()
    }

    /// Borrow the collection as a [`Sortable`](crate::Sortable) ordered by
    /// `direction`.
    pub fn view(&self, direction: SortDirection) -> SortView<'_, T, K> {
        SortView::new(self, direction)
    }
}

impl<T: Clone, K> TimedCollection<T, K> {
    /// Independent copy of the current sequence.
    pub fn items(&self) -> Vec<T> {
        self.items.read().clone()
    }

    /// Clone the elements at `i` and `j` under a single read lock.
    fn pair(&self, i: usize, j: usize) -> (T, T) {
        let items = self.items.read();
        (items[i].clone(), items[j].clone())
    }

    fn try_pair(&self, i: usize, j: usize) -> Result<(T, T)> {
        let items = self.items.read();
        check_index(i, items.len())?;
        check_index(j, items.len())?;
        Ok((items[i].clone(), items[j].clone()))
    }
}

impl<T: Clone, K: Timestamp> TimedCollection<T, K> {
    /// True iff the element at `i` is strictly earlier than the one at `j`.
    pub fn less_ascending(&self, i: usize, j: usize) -> bool {
        self.less(i, j, SortDirection::Ascending)
    }

    /// True iff the element at `i` is strictly later than the one at `j`.
    pub fn less_descending(&self, i: usize, j: usize) -> bool {
        self.less(i, j, SortDirection::Descending)
    }

    /// Whether `i` sorts strictly before `j` in `direction`.
    pub fn less(&self, i: usize, j: usize, direction: SortDirection) -> bool {
        let (a, b) = self.pair(i, j);
        self.compare(&a, &b, direction)
    }

    /// Bounds-checked [`less`](Self::less).
    pub fn try_less(&self, i: usize, j: usize, direction: SortDirection) -> Result<bool> {
        let (a, b) = self.try_pair(i, j)?;
        Ok(self.compare(&a, &b, direction))
    }

    fn compare(&self, a: &T, b: &T, direction: SortDirection) -> bool {
        let ta = (self.extract)(a);
        let tb = (self.extract)(b);
        // Same ordering as `sort`, even if an impl overrides is_before/is_after.
        match direction {
            SortDirection::Ascending => ta.cmp(&tb) == Ordering::Less,
            SortDirection::Descending => ta.cmp(&tb) == Ordering::Greater,
        }
    }

    /// Sort oldest first.
    pub fn sort_ascending(&self) {
        self.sort(SortDirection::Ascending);
    }

    /// Sort newest first.
    pub fn sort_descending(&self) {
        self.sort(SortDirection::Descending);
    }

    /// Stable sort by extracted timestamp.
    ///
    /// Decorate-sort-undecorate: each element's key is extracted exactly
    /// once, outside the lock, and the sorted result replaces the stored
    /// sequence in one write. Elements with equal timestamps keep their
    /// relative order. If the extractor panics the stored sequence is left
    /// as it was.
    pub fn sort(&self, direction: SortDirection) {
        let snapshot = self.items();
        let len = snapshot.len();
        if len <= 1 {
            return;
        }

        let mut decorated: Vec<(K, T)> = snapshot
            .into_iter()
            .map(|item| ((self.extract)(&item), item))
            .collect();

        match direction {
            SortDirection::Ascending => decorated.sort_by(|a, b| a.0.cmp(&b.0)),
            SortDirection::Descending => decorated.sort_by(|a, b| b.0.cmp(&a.0)),
        }

        let sorted: Vec<T> = decorated.into_iter().map(|(_, item)| item).collect();

        // Guard drops at the end of the statement; the old Vec after it.
        let previous = std::mem::replace(&mut *self.items.write(), sorted);
        drop(previous);

        tracing::trace!(len, %direction, "sorted timed collection");
    }

    /// Whether the current sequence is ordered in `direction`.
    ///
    /// Equal neighbours count as ordered.
    pub fn is_sorted(&self, direction: SortDirection) -> bool {
        let keys: Vec<K> = self.items().iter().map(|item| (self.extract)(item)).collect();
        keys.windows(2).all(|w| match direction {
            SortDirection::Ascending => w[0].cmp(&w[1]) != Ordering::Greater,
            SortDirection::Descending => w[0].cmp(&w[1]) != Ordering::Less,
        })
    }
}

impl<T: Clone, K> Clone for TimedCollection<T, K> {
    /// Copy the sequence and share the extractor. The clone has its own lock.
    fn clone(&self) -> Self {
        Self {
            items: RwLock::new(self.items()),
            extract: Arc::clone(&self.extract),
        }
    }
}

impl<T: Clone + std::fmt::Debug, K> std::fmt::Debug for TimedCollection<T, K> {
    /// Formats a snapshot, so element `Debug` impls run outside the lock.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let items = self.items();
        f.debug_struct("TimedCollection")
            .field("len", &items.len())
            .field("items", &items)
            .finish_non_exhaustive()
    }
}

fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        tracing::debug!(index, len, "timed collection index out of bounds");
        Err(CollectionError::IndexOutOfBounds { index, len })
    }
}
