use crate::error::{check_range, IndexError, Result};
use crate::groups::{repeat, CommutativeMonoid};
use crate::index::{RangeAggregateIndex, RangeUpdate};

/// Recursive segment tree with lazy range addition.
///
/// Node `1` covers `[0, len - 1]`, node `i` has children `2i` and `2i + 1` covering the two
/// halves around `mid = (left + right) / 2`. `lazy[i]` is a pending add for every element
/// under node `i` that has not been folded into `data[i]` yet.
#[derive(Clone, Debug)]
pub struct SegmentTree<G: CommutativeMonoid> {
    group: G,
    len: usize,
    data: Vec<G::Elem>,
    lazy: Vec<Option<G::Elem>>,
}

impl<G: CommutativeMonoid> SegmentTree<G> {
    /// `len` elements, all the identity.
    #[inline]
    pub fn new(group: G, len: usize) -> Self {
        let mut data = Vec::new();
        data.resize_with(4 * len, || group.id());
        log::debug!("SegmentTree::new len={}", len);
        Self {
            group,
            len,
            data,
            lazy: vec![None; 4 * len],
        }
    }

    /// O(n)
    pub fn from_values(group: G, values: Vec<G::Elem>) -> Self {
        let mut tree = Self::new(group, values.len());
        tree.build_from(&values);
        tree
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn group(&self) -> &G {
        &self.group
    }

    /// Replaces every element. Fails without touching the tree unless `iter` yields
    /// exactly `len` values.
    ///
    /// O(n)
    pub fn build<Iter: IntoIterator<Item = G::Elem>>(&mut self, iter: Iter) -> Result<()> {
        let values: Vec<_> = iter.into_iter().collect();
        if values.len() != self.len {
            return Err(IndexError::LengthMismatch {
                expected: self.len,
                found: values.len(),
            });
        }
        self.build_from(&values);
        Ok(())
    }

    fn build_from(&mut self, values: &[G::Elem]) {
        for pending in self.lazy.iter_mut() {
            *pending = None;
        }
        if !values.is_empty() {
            self.build_node(values, 1, 0, values.len() - 1);
        }
        log::debug!("SegmentTree::build len={}", values.len());
    }

    fn build_node(&mut self, values: &[G::Elem], node: usize, left: usize, right: usize) {
        if left == right {
            self.data[node] = values[left].clone();
            return;
        }
        let mid = (left + right) / 2;
        self.build_node(values, 2 * node, left, mid);
        self.build_node(values, 2 * node + 1, mid + 1, right);
        self.pull(node);
    }

    #[inline]
    fn pull(&mut self, node: usize) {
        self.data[node] = self.group.add(
            self.data[2 * node].clone(),
            self.data[2 * node + 1].clone(),
        );
    }

    /// Folds the pending add into `data[node]` and hands it to the children.
    fn propagate(&mut self, node: usize, left: usize, right: usize) {
        if let Some(delta) = self.lazy[node].take() {
            let width = right - left + 1;
            self.data[node] = self
                .group
                .add(self.data[node].clone(), repeat(&self.group, delta.clone(), width));

            if left < right {
                for child in [2 * node, 2 * node + 1].iter().copied() {
                    self.lazy[child] = Some(match self.lazy[child].take() {
                        Some(pending) => self.group.add(pending, delta.clone()),
                        None => delta.clone(),
                    });
                }
            }
        }
    }

    /// Adds `delta` to every element of `[l, r]`.
    ///
    /// O(log n)
    pub fn update(&mut self, l: usize, r: usize, delta: G::Elem) -> Result<()> {
        if let Err(err) = check_range(l, r, 0, self.len, self.len) {
            log::debug!("SegmentTree::update rejected: {}", err);
            return Err(err);
        }
        log::trace!("SegmentTree::update l={} r={}", l, r);
        self.update_node(1, 0, self.len - 1, l, r, &delta);
        Ok(())
    }

    fn update_node(
        &mut self,
        node: usize,
        left: usize,
        right: usize,
        l: usize,
        r: usize,
        delta: &G::Elem,
    ) {
        self.propagate(node, left, right);
        if right < l || r < left {
            return;
        }
        if l <= left && right <= r {
            self.lazy[node] = Some(delta.clone());
            self.propagate(node, left, right);
            return;
        }

        let mid = (left + right) / 2;
        self.update_node(2 * node, left, mid, l, r, delta);
        self.update_node(2 * node + 1, mid + 1, right, l, r, delta);
        self.pull(node);
    }

    /// Sum of `[l, r]`.
    ///
    /// O(log n)
    pub fn query(&mut self, l: usize, r: usize) -> Result<G::Elem> {
        if let Err(err) = check_range(l, r, 0, self.len, self.len) {
            log::debug!("SegmentTree::query rejected: {}", err);
            return Err(err);
        }
        log::trace!("SegmentTree::query l={} r={}", l, r);
        Ok(self.query_node(1, 0, self.len - 1, l, r))
    }

    fn query_node(
        &mut self,
        node: usize,
        left: usize,
        right: usize,
        l: usize,
        r: usize,
    ) -> G::Elem {
        self.propagate(node, left, right);
        if right < l || r < left {
            return self.group.id();
        }
        if l <= left && right <= r {
            return self.data[node].clone();
        }

        let mid = (left + right) / 2;
        let lhs = self.query_node(2 * node, left, mid, l, r);
        let rhs = self.query_node(2 * node + 1, mid + 1, right, l, r);
        self.group.add(lhs, rhs)
    }

    /// Element `i`.
    ///
    /// O(log n)
    pub fn get(&mut self, i: usize) -> Result<G::Elem> {
        self.query(i, i)
    }
}

impl<G: CommutativeMonoid> RangeAggregateIndex for SegmentTree<G> {
    type Elem = G::Elem;

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    fn add(&mut self, i: usize, delta: G::Elem) -> Result<()> {
        self.update(i, i, delta)
    }

    fn sum(&mut self, l: usize, r: usize) -> Result<G::Elem> {
        self.query(l, r)
    }

    fn total(&mut self) -> G::Elem {
        if self.len == 0 {
            return self.group.id();
        }
        self.propagate(1, 0, self.len - 1);
        self.data[1].clone()
    }
}

impl<G: CommutativeMonoid> RangeUpdate for SegmentTree<G> {
    fn add_range(&mut self, l: usize, r: usize, delta: G::Elem) -> Result<()> {
        self.update(l, r, delta)
    }
}
