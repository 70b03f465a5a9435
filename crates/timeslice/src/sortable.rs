//! Positional sort contract.
//!
//! [`Sortable`] is the classic length / less-at-positions / swap-at-positions
//! interface. Anything implementing it can be ordered by [`stable_sort`]
//! without handing over its storage, which is how a [`TimedCollection`] is
//! plugged into generic comparison-based sorting.
//!
//! The methods take `&self`: implementors are expected to synchronize
//! internally, as `TimedCollection` does.
//!
//! [`TimedCollection`]: crate::TimedCollection

use crate::collection::TimedCollection;
use crate::direction::SortDirection;
use crate::timestamp::Timestamp;

/// Elements per insertion-sorted run before merging begins.
const STABLE_SORT_BLOCK: usize = 20;

/// A sequence that can be sorted through positional access alone.
pub trait Sortable {
    /// Number of elements.
    fn len(&self) -> usize;

    /// Whether the element at `i` must sort before the element at `j`.
    fn less(&self, i: usize, j: usize) -> bool;

    /// Exchange the elements at `i` and `j`.
    fn swap(&self, i: usize, j: usize);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A [`TimedCollection`] viewed through one sort direction.
///
/// Created by [`TimedCollection::view`].
pub struct SortView<'a, T, K> {
    collection: &'a TimedCollection<T, K>,
    direction: SortDirection,
}

impl<'a, T, K> SortView<'a, T, K> {
    pub(crate) fn new(collection: &'a TimedCollection<T, K>, direction: SortDirection) -> Self {
        Self { collection, direction }
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

impl<T, K> std::fmt::Debug for SortView<'_, T, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortView")
            .field("direction", &self.direction)
            .field("len", &self.collection.len())
            .finish()
    }
}

impl<T: Clone, K: Timestamp> Sortable for SortView<'_, T, K> {
    fn len(&self) -> usize {
        self.collection.len()
    }

    fn less(&self, i: usize, j: usize) -> bool {
        self.collection.less(i, j, self.direction)
    }

    fn swap(&self, i: usize, j: usize) {
        self.collection.swap(i, j);
    }
}

/// Sort `data` in place, keeping equal elements in their original order.
///
/// Insertion-sorts fixed-size runs, then merges neighbouring runs with
/// SymMerge (Kim & Kutzner), which rotates instead of buffering. Only
/// [`Sortable::less`] and [`Sortable::swap`] are used: O(n log n) calls to
/// `less` and O(n log² n) calls to `swap`.
///
/// Each `less` on a [`SortView`] runs the extractor twice, and each call
/// takes the collection lock separately, so concurrent writers can
/// interleave. Prefer [`TimedCollection::sort`] unless a generic routine is
/// required.
pub fn stable_sort<S: Sortable + ?Sized>(data: &S) {
    let n = data.len();

    let mut a = 0;
    let mut b = STABLE_SORT_BLOCK;
    while b <= n {
        insertion_sort(data, a, b);
        a = b;
        b += STABLE_SORT_BLOCK;
    }
    insertion_sort(data, a, n);

    let mut block = STABLE_SORT_BLOCK;
    while block < n {
        a = 0;
        b = 2 * block;
        while b <= n {
            sym_merge(data, a, a + block, b);
            a = b;
            b += 2 * block;
        }
        let m = a + block;
        if m < n {
            sym_merge(data, a, m, n);
        }
        block *= 2;
    }
}

fn insertion_sort<S: Sortable + ?Sized>(data: &S, a: usize, b: usize) {
    for i in a + 1..b {
        let mut j = i;
        while j > a && data.less(j, j - 1) {
            data.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Merge the sorted runs `[a, m)` and `[m, b)`.
fn sym_merge<S: Sortable + ?Sized>(data: &S, a: usize, m: usize, b: usize) {
    // Single element on the left: binary-search its slot and bubble it there.
    if m - a == 1 {
        let mut i = m;
        let mut j = b;
        while i < j {
            let h = i + (j - i) / 2;
            if data.less(h, a) {
                i = h + 1;
            } else {
                j = h;
            }
        }
        for k in a..i - 1 {
            data.swap(k, k + 1);
        }
        return;
    }

    // Single element on the right.
    if b - m == 1 {
        let mut i = a;
        let mut j = m;
        while i < j {
            let h = i + (j - i) / 2;
            if !data.less(m, h) {
                i = h + 1;
            } else {
                j = h;
            }
        }
        let mut k = m;
        while k > i {
            data.swap(k, k - 1);
            k -= 1;
        }
        return;
    }

    let mid = a + (b - a) / 2;
    let n = mid + m;
    let (mut start, mut r) = if m > mid { (n - b, mid) } else { (a, m) };
    let p = n - 1;

    while start < r {
        let c = start + (r - start) / 2;
        if !data.less(p - c, c) {
            start = c + 1;
        } else {
            r = c;
        }
    }

    let end = n - start;
    if start < m && m < end {
        rotate(data, start, m, end);
    }
    if a < start && start < mid {
        sym_merge(data, a, start, mid);
    }
    if mid < end && end < b {
        sym_merge(data, mid, end, b);
    }
}

/// Swap the `n` elements starting at `a` with the `n` starting at `b`.
fn swap_range<S: Sortable + ?Sized>(data: &S, a: usize, b: usize, n: usize) {
    for i in 0..n {
        data.swap(a + i, b + i);
    }
}

/// Rotate `[a, b)` so the element at `m` moves to `a`.
fn rotate<S: Sortable + ?Sized>(data: &S, a: usize, m: usize, b: usize) {
    let mut i = m - a;
    let mut j = b - m;

    while i != j {
        if i > j {
            swap_range(data, m - i, m, j);
            i -= j;
        } else {
            swap_range(data, m - i, m + j - i, i);
            j -= i;
        }
    }
    swap_range(data, m - i, m, i);
}
