//! Ordering policy.
//!
//! A [`Comparator`] is a strict weak order over keys: `less(a, b)` means
//! `a` strictly precedes `b`. Two keys are equivalent when neither precedes
//! the other. A [`ValueCompare`] lifts a key comparator onto the element
//! type stored in the tree: the set stores keys directly ([`Identity`]),
//! the map stores `(K, V)` pairs and compares the key only ([`ByKey`]).

/// Strict weak order over `K`.
pub trait Comparator<K: ?Sized> {
    fn less(&self, a: &K, b: &K) -> bool;
}

/// `Ord`-based ascending order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<K: Ord + ?Sized> Comparator<K> for Natural {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        a < b
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        self(a, b)
    }
}

/// Comparator over stored elements, expressed through a key projection.
pub trait ValueCompare<T> {
    type Key: ?Sized;

    fn key<'a>(&self, value: &'a T) -> &'a Self::Key;

    fn less_key(&self, a: &Self::Key, b: &Self::Key) -> bool;

    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self.less_key(self.key(a), self.key(b))
    }

    /// `!(a < b) && !(b < a)`.
    #[inline]
    fn equivalent(&self, a: &Self::Key, b: &Self::Key) -> bool {
        !self.less_key(a, b) && !self.less_key(b, a)
    }
}

/// Elements are their own keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Identity<C>(pub C);

impl<T, C: Comparator<T>> ValueCompare<T> for Identity<C> {
    type Key = T;

    #[inline]
    fn key<'a>(&self, value: &'a T) -> &'a T {
        value
    }

    #[inline]
    fn less_key(&self, a: &T, b: &T) -> bool {
        self.0.less(a, b)
    }
}

/// `(K, V)` pairs ordered by `K` alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ByKey<C>(pub C);

impl<K, V, C: Comparator<K>> ValueCompare<(K, V)> for ByKey<C> {
    type Key = K;

    #[inline]
    fn key<'a>(&self, value: &'a (K, V)) -> &'a K {
        &value.0
    }

    #[inline]
    fn less_key(&self, a: &K, b: &K) -> bool {
        self.0.less(a, b)
    }
}
