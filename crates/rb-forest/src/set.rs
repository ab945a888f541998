//! Ordered set of unique keys over the red-black engine.

use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};

use crate::alloc::{Allocator, Global};
use crate::compare::{Comparator, Identity, Natural};
use crate::cursor::{Bidirectional, Cursor, RevCursor};
use crate::error::Result;
use crate::iter::{IntoIter, Iter, Range};
use crate::tree::RbTree;

/// Set of `K` ordered by `C`. Elements are read-only once inserted.
pub struct RbSet<K, C = Natural, A = Global> {
    tree: RbTree<K, Identity<C>, A>,
}

impl<K: Ord> RbSet<K> {
    /// Empty set in natural order.
    pub fn new() -> Self {
        Self::with_comparator_in(Natural, Global)
    }
}

impl<K: Ord> Default for RbSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C: Comparator<K>> RbSet<K, C> {
    /// Empty set ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_comparator_in(comparator, Global)
    }
}

impl<K, C, A> RbSet<K, C, A> {
    /// Empty set ordered by `comparator`, allocating through `alloc`.
    pub fn with_comparator_in(comparator: C, alloc: A) -> Self {
        Self {
            tree: RbTree::with_compare_in(Identity(comparator), alloc),
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

    pub fn value_comp(&self) -> &C {
        self.key_comp()
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

    pub fn get(&self, at: Cursor) -> Option<&K> {
        self.tree.get(at)
    }

    pub fn first(&self) -> Option<&K> {
        self.tree.first()
    }

    pub fn last(&self) -> Option<&K> {
        self.tree.last()
    }

    pub fn iter(&self) -> Iter<'_, K> {
        self.tree.iter()
    }

    pub fn range(&self, first: Cursor, last: Cursor) -> Range<'_, K> {
        self.tree.range(first, last)
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
    {
        self.tree.print()
    }
}

impl<K, C, A> RbSet<K, C, A>
where
    C: Comparator<K>,
    A: Allocator,
{
    pub fn max_size(&self) -> usize {
        self.tree.max_size()
    }

    /// Inserts `key` unless an equivalent key is present, in which case
    /// `key` is dropped. Returns the cursor to the stored key and whether
    /// the insertion happened.
    pub fn insert(&mut self, key: K) -> Result<(Cursor, bool)> {
        self.tree.insert(key)
    }

    pub fn insert_hint(&mut self, hint: Cursor, key: K) -> Result<Cursor> {
        self.tree.insert_hint(hint, key)
    }

    pub fn insert_iter<I: IntoIterator<Item = K>>(&mut self, iter: I) -> Result<()> {
        self.tree.insert_iter(iter)
    }

    pub fn find(&self, key: &K) -> Cursor {
        self.tree.find(key)
    }

    pub fn count(&self, key: &K) -> usize {
        self.tree.count(key)
    }

    pub fn contains(&self, key: &K) -> bool {
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

    pub fn erase(&mut self, at: Cursor) -> Cursor {
        self.tree.erase(at)
    }

    pub fn erase_key(&mut self, key: &K) -> usize {
        self.tree.erase_key(key)
    }

    pub fn erase_range(&mut self, first: Cursor, last: Cursor) -> Cursor {
        self.tree.erase_range(first, last)
    }

    /// Removes and returns the stored key equivalent to `key`.
    pub fn take(&mut self, key: &K) -> Option<K> {
        let at = self.tree.find(key);
        self.tree.take(at)
    }

    pub fn assert_valid(&self) -> std::result::Result<(), String> {
        self.tree.assert_valid()
    }

    pub fn try_clone(&self) -> Result<Self>
    where
        K: Clone,
        C: Clone,
    {
        Ok(Self {
            tree: self.tree.try_clone()?,
        })
    }
}

impl<K, C, A> Bidirectional for RbSet<K, C, A> {
    type Item = K;

    fn next(&self, at: Cursor) -> Cursor {
        self.tree.next(at)
    }

    fn prev(&self, at: Cursor) -> Cursor {
        self.tree.prev(at)
    }

    fn get(&self, at: Cursor) -> Option<&K> {
        self.tree.get(at)
    }
}

impl<K, C, A> Clone for RbSet<K, C, A>
where
    K: Clone,
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

impl<K: Debug, C, A> Debug for RbSet<K, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tree.fmt(f)
    }
}

impl<K: PartialEq, C, A> PartialEq for RbSet<K, C, A> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, C, A> Eq for RbSet<K, C, A> {}

impl<K: PartialOrd, C, A> PartialOrd for RbSet<K, C, A> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.tree.partial_cmp(&other.tree)
    }
}

impl<K: Ord, C, A> Ord for RbSet<K, C, A> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.tree.cmp(&other.tree)
    }
}

impl<K: Hash, C, A> Hash for RbSet<K, C, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tree.hash(state);
    }
}

impl<K, C, A> Extend<K> for RbSet<K, C, A>
where
    C: Comparator<K>,
    A: Allocator,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.tree.extend(iter);
    }
}

impl<K: Ord> FromIterator<K> for RbSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K: Ord, const N: usize> From<[K; N]> for RbSet<K> {
    fn from(keys: [K; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl<'a, K, C, A> IntoIterator for &'a RbSet<K, C, A> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

impl<K, C, A> IntoIterator for RbSet<K, C, A> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> IntoIter<K> {
        self.tree.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_insert_keeps_the_first_key() {
        let mut set = RbSet::with_comparator(|a: &(i32, char), b: &(i32, char)| a.0 < b.0);
        set.insert((1, 'a')).unwrap();
        let (at, inserted) = set.insert((1, 'b')).unwrap();
        assert!(!inserted);
        assert_eq!(set.get(at), Some(&(1, 'a')));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn take_hands_back_the_stored_key() {
        let mut set = RbSet::from([3, 1, 2]);
        assert_eq!(set.take(&2), Some(2));
        assert_eq!(set.take(&2), None);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
        set.assert_valid().unwrap();
    }
}
