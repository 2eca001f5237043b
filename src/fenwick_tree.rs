use crate::error::{check_index, check_range, Result};
use crate::groups::{AbelianGroup, CommutativeMonoid};
use crate::index::RangeAggregateIndex;

#[inline]
fn lsb<I: num::PrimInt>(n: I) -> I {
    n & (!n + I::one())
}

/// Binary-indexed tree. Positions are 1-based: slot `i` holds the sum of the `lsb(i)`
/// elements ending at `i`, slot 0 is unused.
#[derive(Clone, Debug)]
pub struct FenwickTree<G: CommutativeMonoid> {
    group: G,
    data: Vec<G::Elem>,
}

impl<G: CommutativeMonoid> FenwickTree<G> {
    /// `len` elements, all the identity.
    #[inline]
    pub fn new(group: G, len: usize) -> Self {
        let mut data = Vec::new();
        data.resize_with(len + 1, || group.id());
        log::debug!("FenwickTree::new len={}", len);
        Self { group, data }
    }

    /// O(n)
    pub fn from_values<Iter: IntoIterator<Item = G::Elem>>(group: G, iter: Iter) -> Self {
        let mut data = vec![group.id()];
        data.extend(iter);
        let len = data.len() - 1;

        for i in 1..=len {
            let j = i + lsb(i);
            if j <= len {
                data[j] = group.add(data[j].clone(), data[i].clone());
            }
        }

        log::debug!("FenwickTree::from_values len={}", len);
        Self { group, data }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn group(&self) -> &G {
        &self.group
    }

    /// Adds `delta` to position `i`, `1 <= i <= len`.
    ///
    /// O(log n)
    pub fn update(&mut self, i: usize, delta: G::Elem) -> Result<()> {
        if let Err(err) = check_index(i, 1, self.len() + 1, self.len()) {
            log::debug!("FenwickTree::update rejected: {}", err);
            return Err(err);
        }
        log::trace!("FenwickTree::update i={}", i);
        self.update_unchecked(i, delta);
        Ok(())
    }

    fn update_unchecked(&mut self, mut i: usize, delta: G::Elem) {
        let len = self.len();
        while i <= len {
            self.data[i] = self.group.add(self.data[i].clone(), delta.clone());
            i += lsb(i);
        }
    }

    /// Sum of positions `1..=i`. `prefix_sum(0)` is the identity.
    ///
    /// O(log n)
    pub fn prefix_sum(&self, i: usize) -> Result<G::Elem> {
        check_index(i, 0, self.len() + 1, self.len())?;
        Ok(self.prefix_sum_unchecked(i))
    }

    fn prefix_sum_unchecked(&self, mut i: usize) -> G::Elem {
        let mut ps = self.group.id();
        while i != 0 {
            ps = self.group.add(self.data[i].clone(), ps);
            i -= lsb(i);
        }
        ps
    }
}

impl<G: AbelianGroup> FenwickTree<G> {
    /// Sum of positions `l..=r`, `1 <= l <= r <= len`. `l = 0` means "from the start".
    ///
    /// O(log n)
    pub fn range_sum(&self, l: usize, r: usize) -> Result<G::Elem> {
        let len = self.len();
        let checked = if l == 0 {
            check_index(r, 1, len + 1, len)
        } else {
            check_range(l, r, 1, len + 1, len)
        };
        if let Err(err) = checked {
            log::debug!("FenwickTree::range_sum rejected: {}", err);
            return Err(err);
        }

        log::trace!("FenwickTree::range_sum l={} r={}", l, r);
        let right = self.prefix_sum_unchecked(r);
        if l <= 1 {
            Ok(right)
        } else {
            Ok(self.group.sub(right, self.prefix_sum_unchecked(l - 1)))
        }
    }

    /// Value at position `i`.
    ///
    /// Avg: O(1), Worst case: O(log i)
    pub fn get(&self, i: usize) -> Result<G::Elem> {
        check_index(i, 1, self.len() + 1, self.len())?;

        let mut x = self.data[i].clone();
        let bottom = i - lsb(i);
        let mut j = i - 1;
        while bottom < j {
            x = self.group.sub(x, self.data[j].clone());
            j -= lsb(j);
        }
        Ok(x)
    }

    /// Overwrites position `i` with `x`. `update` should be preferred, it doesn't call `get`.
    ///
    /// O(log n)
    pub fn set(&mut self, i: usize, x: G::Elem) -> Result<()> {
        let old = self.get(i)?;
        let delta = self.group.sub(x, old);
        self.update_unchecked(i, delta);
        Ok(())
    }
}

impl<G: AbelianGroup> RangeAggregateIndex for FenwickTree<G> {
    type Elem = G::Elem;

    #[inline]
    fn len(&self) -> usize {
        FenwickTree::len(self)
    }

    // Bounds are checked on the 0-based indices so errors name what the caller passed.
    fn add(&mut self, i: usize, delta: G::Elem) -> Result<()> {
        check_index(i, 0, self.len(), self.len())?;
        self.update(i + 1, delta)
    }

    fn sum(&mut self, l: usize, r: usize) -> Result<G::Elem> {
        check_range(l, r, 0, self.len(), self.len())?;
        self.range_sum(l + 1, r + 1)
    }

    fn total(&mut self) -> G::Elem {
        self.prefix_sum_unchecked(self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IndexError;
    use crate::groups::NumAdditiveGroups;
    use rand::prelude::*;

    fn tree(values: &[i64]) -> FenwickTree<NumAdditiveGroups<i64>> {
        FenwickTree::from_values(NumAdditiveGroups::new(), values.iter().cloned())
    }

    #[test]
    fn point_updates_from_zero() {
        let mut ft = FenwickTree::new(NumAdditiveGroups::<i64>::new(), 5);
        ft.update(1, 1).unwrap();
        ft.update(2, 2).unwrap();
        ft.update(3, 3).unwrap();

        assert_eq!(ft.range_sum(1, 3), Ok(6));
        assert_eq!(ft.prefix_sum(2), Ok(3));
        assert_eq!(ft.prefix_sum(0), Ok(0));
        assert_eq!(ft.range_sum(0, 3), Ok(6));
        assert_eq!(ft.range_sum(2, 3), Ok(5));
        assert_eq!(ft.range_sum(4, 5), Ok(0));
    }

    #[test]
    fn linear_build_matches_prefix_sums() {
        let values: Vec<i64> = (1..=37).map(|x| x * x - 40).collect();
        let ft = tree(&values);
        let mut expected = 0;
        for i in 0..=values.len() {
            assert_eq!(ft.prefix_sum(i), Ok(expected));
            if i < values.len() {
                expected += values[i];
            }
        }
    }

    #[test]
    fn get_and_set() {
        let mut ft = tree(&[4, -2, 9, 0, 7, 1]);
        for (i, &x) in [4, -2, 9, 0, 7, 1].iter().enumerate() {
            assert_eq!(ft.get(i + 1), Ok(x));
        }

        ft.set(3, -5).unwrap();
        assert_eq!(ft.get(3), Ok(-5));
        assert_eq!(ft.range_sum(1, 6), Ok(4 - 2 - 5 + 7 + 1));
    }

    #[test]
    fn rejects_bad_positions_without_mutation() {
        let mut ft = tree(&[1, 2, 3]);

        assert_eq!(
            ft.update(0, 10),
            Err(IndexError::OutOfRange { index: 0, len: 3 })
        );
        assert_eq!(
            ft.update(4, 10),
            Err(IndexError::OutOfRange { index: 4, len: 3 })
        );
        assert_eq!(
            ft.range_sum(3, 2),
            Err(IndexError::InvertedRange { left: 3, right: 2 })
        );
        assert_eq!(
            ft.range_sum(1, 4),
            Err(IndexError::OutOfRange { index: 4, len: 3 })
        );
        assert_eq!(
            ft.prefix_sum(4),
            Err(IndexError::OutOfRange { index: 4, len: 3 })
        );
        assert_eq!(ft.range_sum(1, 3), Ok(6));
    }

    #[test]
    fn empty_tree_rejects_everything() {
        let mut ft = tree(&[]);
        assert!(ft.is_empty());
        assert_eq!(ft.prefix_sum(0), Ok(0));
        assert!(ft.update(1, 1).is_err());
        assert!(ft.range_sum(0, 0).is_err());
        assert!(RangeAggregateIndex::sum(&mut ft, 0, 0).is_err());
        assert_eq!(ft.total(), 0);
    }

    #[test]
    fn zero_based_contract() {
        let mut ft = tree(&[1, 2, 3, 4, 5]);
        RangeAggregateIndex::add(&mut ft, 0, 10).unwrap();
        assert_eq!(RangeAggregateIndex::sum(&mut ft, 0, 0), Ok(11));
        assert_eq!(RangeAggregateIndex::sum(&mut ft, 1, 4), Ok(14));
        assert_eq!(ft.total(), 25);
        assert_eq!(
            RangeAggregateIndex::sum(&mut ft, 0, 5),
            Err(IndexError::OutOfRange { index: 5, len: 5 })
        );
        assert_eq!(
            RangeAggregateIndex::add(&mut ft, 5, 1),
            Err(IndexError::OutOfRange { index: 5, len: 5 })
        );
    }

    #[test]
    fn random_point_updates_match_vec() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        const N: usize = 200;

        let mut model: Vec<i64> = (0..N).map(|_| rng.gen_range(-1000..1000)).collect();
        let mut ft = tree(&model);

        for _ in 0..2000 {
            let i = rng.gen_range(1..=N);
            let delta = rng.gen_range(-50..50);
            ft.update(i, delta).unwrap();
            model[i - 1] += delta;

            let l = rng.gen_range(1..=N);
            let r = rng.gen_range(l..=N);
            let expected: i64 = model[l - 1..r].iter().sum();
            assert_eq!(ft.range_sum(l, r), Ok(expected));
        }
    }
}
