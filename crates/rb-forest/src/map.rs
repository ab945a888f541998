//! Ordered map with unique keys over the red-black engine.

use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::ops::Index;

use crate::alloc::{Allocator, Global};
use crate::compare::{ByKey, Comparator, Natural};
use crate::cursor::{Bidirectional, Cursor, RevCursor};
use crate::error::{Error, Result};
use crate::iter;
use crate::tree::RbTree;

/// Map from `K` to `V` ordered by the key comparator `C`.
///
/// Elements are `(K, V)` pairs; keys are never handed out mutably, so the
/// order can only change through insertion and erasure.
pub struct RbMap<K, V, C = Natural, A = Global> {
    tree: RbTree<(K, V), ByKey<C>, A>,
}

impl<K: Ord, V> RbMap<K, V> {
    /// Empty map in natural key order.
    pub fn new() -> Self {
        Self::with_comparator_in(Natural, Global)
    }
}

impl<K: Ord, V> Default for RbMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Comparator<K>> RbMap<K, V, C> {
    /// Empty map ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_comparator_in(comparator, Global)
    }
}

impl<K, V, C, A> RbMap<K, V, C, A> {
    /// Empty map ordered by `comparator`, allocating through `alloc`.
    pub fn with_comparator_in(comparator: C, alloc: A) -> Self {
        Self {
            tree: RbTree::with_compare_in(ByKey(comparator), alloc),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn key_comp(&self) -> &C {
        &self.tree.value_comp().0
    }

    /// Comparator over whole entries, ordering them by key.
    pub fn value_comp(&self) -> &ByKey<C> {
        self.tree.value_comp()
    }

    pub fn allocator(&self) -> &A {
        self.tree.allocator()
    }

    pub fn begin(&self) -> Cursor {
        self.tree.begin()
    }

    pub fn end(&self) -> Cursor {
        self.tree.end()
    }

    pub fn rbegin(&self) -> RevCursor {
        self.tree.rbegin()
    }

    pub fn rend(&self) -> RevCursor {
        self.tree.rend()
    }

    pub fn next(&self, at: Cursor) -> Cursor {
        self.tree.next(at)
    }

    pub fn prev(&self, at: Cursor) -> Cursor {
        self.tree.prev(at)
    }

    pub fn entry_at(&self, at: Cursor) -> Option<(&K, &V)> {
        self.tree.get(at).map(|(k, v)| (k, v))
    }

    pub fn key_at(&self, at: Cursor) -> Option<&K> {
        self.tree.get(at).map(|(k, _)| k)
    }

    pub fn value_at(&self, at: Cursor) -> Option<&V> {
        self.tree.get(at).map(|(_, v)| v)
    }

    pub fn value_mut(&mut self, at: Cursor) -> Option<&mut V> {
        self.tree.get_mut(at).map(|(_, v)| v)
    }

    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.first().map(|(k, v)| (k, v))
    }

    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.last().map(|(k, v)| (k, v))
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.tree.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.tree.iter_mut(),
        }
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator + '_ {
        self.iter().map(|(_, v)| v)
    }

    pub fn values_mut(
        &mut self,
    ) -> impl DoubleEndedIterator<Item = &mut V> + ExactSizeIterator + '_ {
        self.iter_mut().map(|(_, v)| v)
    }

    /// Entries in `[first, last)`.
    pub fn range(&self, first: Cursor, last: Cursor) -> Range<'_, K, V> {
        Range {
            inner: self.tree.range(first, last),
        }
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    pub fn print(&self) -> String
    where
        K: Debug,
        V: Debug,
    {
        self.tree.print()
    }
}

impl<K, V, C, A> RbMap<K, V, C, A>
where
    C: Comparator<K>,
    A: Allocator,
{
    pub fn max_size(&self) -> usize {
        self.tree.max_size()
    }

    /// Inserts `entry` unless its key is already present; an existing
    /// mapping is never overwritten. Returns the cursor to the entry for
    /// that key and whether the insertion happened.
    pub fn insert(&mut self, entry: (K, V)) -> Result<(Cursor, bool)> {
        self.tree.insert(entry)
    }

    pub fn insert_hint(&mut self, hint: Cursor, entry: (K, V)) -> Result<Cursor> {
        self.tree.insert_hint(hint, entry)
    }

    pub fn insert_iter<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) -> Result<()> {
        self.tree.insert_iter(iter)
    }

    /// The value for `key`, inserting `V::default()` first if it is absent.
    pub fn get_or_insert_default(&mut self, key: K) -> Result<&mut V>
    where
        V: Default,
    {
        let mut at = self.tree.find(&key);
        if at.is_end() {
            (at, _) = self.tree.insert((key, V::default()))?;
        }
        self.value_mut(at).ok_or(Error::OutOfRange)
    }

    pub fn at(&self, key: &K) -> Result<&V> {
        self.get(key).ok_or(Error::OutOfRange)
    }

    pub fn at_mut(&mut self, key: &K) -> Result<&mut V> {
        self.get_mut(key).ok_or(Error::OutOfRange)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.value_at(self.tree.find(key))
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let at = self.tree.find(key);
        self.value_mut(at)
    }

    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.entry_at(self.tree.find(key))
    }

    pub fn find(&self, key: &K) -> Cursor {
        self.tree.find(key)
    }

    pub fn count(&self, key: &K) -> usize {
        self.tree.count(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    pub fn lower_bound(&self, key: &K) -> Cursor {
        self.tree.lower_bound(key)
    }

    pub fn upper_bound(&self, key: &K) -> Cursor {
        self.tree.upper_bound(key)
    }

    pub fn equal_range(&self, key: &K) -> (Cursor, Cursor) {
        self.tree.equal_range(key)
    }

    /// Removes the entry at `at` and returns the cursor that followed it.
    pub fn erase(&mut self, at: Cursor) -> Cursor {
        self.tree.erase(at)
    }

    pub fn erase_key(&mut self, key: &K) -> usize {
        self.tree.erase_key(key)
    }

    pub fn erase_range(&mut self, first: Cursor, last: Cursor) -> Cursor {
        self.tree.erase_range(first, last)
    }

    /// Removes `key` and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let at = self.tree.find(key);
        self.tree.take(at).map(|(_, v)| v)
    }

    pub fn assert_valid(&self) -> std::result::Result<(), String> {
        self.tree.assert_valid()
    }

    pub fn try_clone(&self) -> Result<Self>
    where
        K: Clone,
        V: Clone,
        C: Clone,
    {
        Ok(Self {
            tree: self.tree.try_clone()?,
        })
    }
}

impl<K, V, C, A> Bidirectional for RbMap<K, V, C, A> {
    type Item = (K, V);

    fn next(&self, at: Cursor) -> Cursor {
        self.tree.next(at)
    }

    fn prev(&self, at: Cursor) -> Cursor {
        self.tree.prev(at)
    }

    fn get(&self, at: Cursor) -> Option<&(K, V)> {
        self.tree.get(at)
    }
}

impl<K, V, C, A> Index<&K> for RbMap<K, V, C, A>
where
    C: Comparator<K>,
    A: Allocator,
{
    type Output = V;

    /// Panics when `key` is absent; see [`RbMap::at`].
    fn index(&self, key: &K) -> &V {
        match self.get(key) {
            Some(v) => v,
            None => panic!("key not found"),
        }
    }
}

impl<K, V, C, A> Clone for RbMap<K, V, C, A>
where
    K: Clone,
    V: Clone,
    C: Comparator<K> + Clone,
    A: Allocator,
{
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.tree.clone_from(&source.tree);
    }
}

impl<K: Debug, V: Debug, C, A> Debug for RbMap<K, V, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, C, A> PartialEq for RbMap<K, V, C, A> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, V: Eq, C, A> Eq for RbMap<K, V, C, A> {}

impl<K: PartialOrd, V: PartialOrd, C, A> PartialOrd for RbMap<K, V, C, A> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.tree.partial_cmp(&other.tree)
    }
}

impl<K: Ord, V: Ord, C, A> Ord for RbMap<K, V, C, A> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.tree.cmp(&other.tree)
    }
}

impl<K: Hash, V: Hash, C, A> Hash for RbMap<K, V, C, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tree.hash(state);
    }
}

impl<K, V, C, A> Extend<(K, V)> for RbMap<K, V, C, A>
where
    C: Comparator<K>,
    A: Allocator,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.tree.extend(iter);
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RbMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for RbMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<'a, K, V, C, A> IntoIterator for &'a RbMap<K, V, C, A> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, C, A> IntoIterator for &'a mut RbMap<K, V, C, A> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V, C, A> IntoIterator for RbMap<K, V, C, A> {
    type Item = (K, V);
    type IntoIter = iter::IntoIter<(K, V)>;

    fn into_iter(self) -> iter::IntoIter<(K, V)> {
        self.tree.into_iter()
    }
}

/// In-order iterator over `(&K, &V)`.
pub struct Iter<'a, K, V> {
    inner: iter::Iter<'a, (K, V)>,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k, v))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// In-order iterator over `(&K, &mut V)`.
pub struct IterMut<'a, K, V> {
    inner: iter::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (&*k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (&*k, v))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Entries of a cursor range.
pub struct Range<'a, K, V> {
    inner: iter::Range<'a, (K, V)>,
}

impl<K, V> Clone for Range<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }
}

impl<K, V> DoubleEndedIterator for Range<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k, v))
    }
}

impl<K, V> FusedIterator for Range<'_, K, V> {}
