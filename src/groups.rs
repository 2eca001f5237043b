pub trait Magma {
    type Elem: Clone;

    fn add(&self, lhs: Self::Elem, rhs: Self::Elem) -> Self::Elem;
}

pub trait Associativity: Magma {}
pub trait Commutativity: Magma {}
pub trait Identity: Magma {
    /// Identity
    fn id(&self) -> Self::Elem;
}
pub trait Invertibility: Magma {
    fn inv(&self, x: Self::Elem) -> Self::Elem;

    #[inline]
    fn sub(&self, lhs: Self::Elem, rhs: Self::Elem) -> Self::Elem {
        self.add(lhs, self.inv(rhs))
    }
}

pub trait Monoid: Magma + Associativity + Identity {}
impl<M: Magma + Associativity + Identity> Monoid for M {}

pub trait CommutativeMonoid: Monoid + Commutativity {}
impl<CM: Monoid + Commutativity> CommutativeMonoid for CM {}

pub trait Group: Magma + Associativity + Identity + Invertibility {}
impl<G: Magma + Associativity + Identity + Invertibility> Group for G {}

pub trait AbelianGroup: Group + Commutativity {}
impl<AG: Group + Commutativity> AbelianGroup for AG {}

/// `x + x + ... + x` (`n` times), by doubling.
///
/// O(log n)
pub fn repeat<M: Monoid>(monoid: &M, mut x: M::Elem, mut n: usize) -> M::Elem {
    let mut acc = monoid.id();
    while n != 0 {
        if n & 1 == 1 {
            acc = monoid.add(acc, x.clone());
        }
        n >>= 1;
        if n != 0 {
            x = monoid.add(x.clone(), x);
        }
    }
    acc
}

/// Sum over any `num::Num`. `std::num::Wrapping<_>` gives wraparound on overflow.
#[derive(Clone, Copy, Debug)]
pub struct NumAdditiveGroups<T>(std::marker::PhantomData<T>);

impl<T> Default for NumAdditiveGroups<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NumAdditiveGroups<T> {
    pub const fn new() -> Self {
        Self(std::marker::PhantomData)
    }
}

impl<T: num::Num + Clone> Magma for NumAdditiveGroups<T> {
    type Elem = T;

    #[inline]
    fn add(&self, lhs: T, rhs: T) -> T {
        lhs + rhs
    }
}
impl<T: num::Num + Clone> Identity for NumAdditiveGroups<T> {
    #[inline]
    fn id(&self) -> T {
        T::zero()
    }
}
impl<T: num::Num + Clone> Invertibility for NumAdditiveGroups<T> {
    // 0 - x rather than -x, so unsigned `Wrapping` types are groups too.
    #[inline]
    fn inv(&self, x: T) -> T {
        T::zero() - x
    }

    #[inline]
    fn sub(&self, lhs: T, rhs: T) -> T {
        lhs - rhs
    }
}
impl<T: num::Num + Clone> Associativity for NumAdditiveGroups<T> {}
impl<T: num::Num + Clone> Commutativity for NumAdditiveGroups<T> {}
