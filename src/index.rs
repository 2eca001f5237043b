use crate::error::Result;

/// A fixed-length sequence supporting point updates and inclusive range sums.
///
/// Indices are 0-based. Queries take `&mut self` because some backends settle deferred
/// updates while reading; the logical content never changes on a read.
pub trait RangeAggregateIndex {
    type Elem;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds `delta` to element `i`.
    fn add(&mut self, i: usize, delta: Self::Elem) -> Result<()>;

    /// Sum of elements `l..=r`.
    fn sum(&mut self, l: usize, r: usize) -> Result<Self::Elem>;

    /// Sum of the whole sequence, the identity when empty.
    fn total(&mut self) -> Self::Elem;
}

/// Backends that can add to a whole range in O(log n).
pub trait RangeUpdate: RangeAggregateIndex {
    /// Adds `delta` to every element of `l..=r`.
    fn add_range(&mut self, l: usize, r: usize, delta: Self::Elem) -> Result<()>;
}
