//! Red-black tree engine shared by [`RbMap`](crate::RbMap) and
//! [`RbSet`](crate::RbSet).
//!
//! Nodes and values live in two slab pools and are addressed by stable
//! `u32` handles. The one-past-the-last position is the tag
//! [`Cursor::End`]; the root is the only node without a parent link.
//! The first and last nodes are cached so that `begin()` and stepping back
//! from `end()` are O(1).

use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};

use crate::alloc::{create_node, Allocator, Global};
use crate::compare::{Comparator, Identity, Natural, ValueCompare};
use crate::cursor::{step_backward, step_forward, Bidirectional, Cursor, RevCursor};
use crate::error::Result;
use crate::iter::{IntoIter, Iter, IterMut, Range};
use crate::node::{
    self, counter_child, get_child, get_l, get_p, get_r, is_black, is_red, max_node, min_node,
    place_into, rotate, rotate_flip, rotate_swap, set_child, set_color, side_of, swap_position,
    Nodes,
};
use crate::pool::Pool;
use crate::types::{Color, Side};
use crate::verify;

/// Where a value belongs: an equivalent element already present, or an
/// empty child slot (`parent == None` means the empty root slot).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Place {
    Found(u32),
    Vacant { parent: Option<u32>, side: Side },
}

/// Red-black tree of unique elements ordered by `C`, with node and value
/// storage obtained through `A`.
pub struct RbTree<T, C = Identity<Natural>, A = Global> {
    nodes: Nodes,
    values: Pool<T>,
    root: Option<u32>,
    begin: Cursor,
    last: Option<u32>,
    len: usize,
    compare: C,
    alloc: A,
}

impl<T: Ord> RbTree<T, Identity<Natural>, Global> {
    /// Empty tree in natural order.
    pub fn new() -> Self {
        Self::with_compare_in(Identity(Natural), Global)
    }
}

impl<T: Ord> Default for RbTree<T, Identity<Natural>, Global> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K> RbTree<T, Identity<K>, Global>
where
    K: Comparator<T>,
{
    /// Tree ordered by a key comparator over the elements themselves.
    pub fn with_comparator(comparator: K) -> Self {
        Self::with_compare_in(Identity(comparator), Global)
    }
}

impl<T, C, A> RbTree<T, C, A> {
    /// Empty tree with an explicit value comparison and allocator.
    pub fn with_compare_in(compare: C, alloc: A) -> Self {
        Self {
            nodes: Pool::new(),
            values: Pool::new(),
            root: None,
            begin: Cursor::End,
            last: None,
            len: 0,
            compare,
            alloc,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn value_comp(&self) -> &C {
        &self.compare
    }

    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    pub fn root_index(&self) -> Option<u32> {
        self.root
    }

    pub(crate) fn last_index(&self) -> Option<u32> {
        self.last
    }

    pub(crate) fn nodes(&self) -> &Nodes {
        &self.nodes
    }

    pub(crate) fn values(&self) -> &Pool<T> {
        &self.values
    }

    /// O(1): the cached minimum.
    pub fn begin(&self) -> Cursor {
        self.begin
    }

    pub fn end(&self) -> Cursor {
        Cursor::End
    }

    pub fn rbegin(&self) -> RevCursor {
        RevCursor::new(Cursor::End)
    }

    pub fn rend(&self) -> RevCursor {
        RevCursor::new(self.begin)
    }

    pub fn first(&self) -> Option<&T> {
        self.get(self.begin)
    }

    pub fn last(&self) -> Option<&T> {
        self.get(self.last.into())
    }

    /// Element at `at`; `None` for `End`.
    pub fn get(&self, at: Cursor) -> Option<&T> {
        let n = at.node()?;
        Some(&self.values[self.nodes[n].v])
    }

    /// Mutable access for the map façade, which only hands out the mapped
    /// half of the pair.
    pub(crate) fn get_mut(&mut self, at: Cursor) -> Option<&mut T> {
        let n = at.node()?;
        let v = self.nodes[n].v;
        Some(&mut self.values[v])
    }

    pub fn next(&self, at: Cursor) -> Cursor {
        step_forward(&self.nodes, at)
    }

    pub fn prev(&self, at: Cursor) -> Cursor {
        step_backward(&self.nodes, self.last, at)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.range(self.begin, Cursor::End), self.len)
    }

    /// Elements in `[first, last)`.
    pub fn range(&self, first: Cursor, last: Cursor) -> Range<'_, T> {
        Range::new(&self.nodes, &self.values, self.last, first, last)
    }

    pub(crate) fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(
            &self.nodes,
            &mut self.values,
            self.begin,
            self.last,
            self.len,
        )
    }

    /// Removes every element. Cursors into this tree become invalid.
    pub fn clear(&mut self) {
        log::trace!("clearing tree with {} elements", self.len);
        self.nodes.clear();
        self.values.clear();
        self.root = None;
        self.begin = Cursor::End;
        self.last = None;
        self.len = 0;
    }

    /// Exchanges the contents, comparators and allocators of two trees in
    /// O(1). Cursors keep designating the same elements, now owned by the
    /// other tree.
    pub fn swap(&mut self, other: &mut Self) {
        log::trace!("swapping trees of {} and {} elements", self.len, other.len);
        std::mem::swap(self, other);
    }

    /// Indented dump of the node structure.
    pub fn print(&self) -> String
    where
        T: Debug,
    {
        verify::print(self)
    }

    fn value_of(&self, n: u32) -> &T {
        &self.values[self.nodes[n].v]
    }

    fn refresh_root(&mut self, top: u32) {
        if get_p(&self.nodes, top).is_none() {
            self.root = Some(top);
        }
    }

    fn rotate(&mut self, parent: u32, child: u32) {
        rotate(&mut self.nodes, parent, child);
        self.refresh_root(child);
    }

    fn rotate_flip(&mut self, parent: u32, child: u32) {
        rotate_flip(&mut self.nodes, parent, child);
        self.refresh_root(child);
    }

    fn rotate_swap(&mut self, parent: u32, child: u32) {
        rotate_swap(&mut self.nodes, parent, child);
        self.refresh_root(child);
    }
}

impl<T, C, A> RbTree<T, C, A>
where
    C: ValueCompare<T>,
    A: Allocator,
{
    pub fn max_size(&self) -> usize {
        self.alloc.max_slots().min(u32::MAX as usize)
    }

    /// Smallest element not less than `key`.
    pub fn lower_bound(&self, key: &C::Key) -> Cursor {
        let mut result = Cursor::End;
        let mut curr = self.root;
        while let Some(n) = curr {
            if self.compare.less_key(self.compare.key(self.value_of(n)), key) {
                curr = get_r(&self.nodes, n);
            } else {
                result = Cursor::Node(n);
                curr = get_l(&self.nodes, n);
            }
        }
        result
    }

    /// Smallest element greater than `key`.
    pub fn upper_bound(&self, key: &C::Key) -> Cursor {
        let mut result = Cursor::End;
        let mut curr = self.root;
        while let Some(n) = curr {
            if self.compare.less_key(key, self.compare.key(self.value_of(n))) {
                result = Cursor::Node(n);
                curr = get_l(&self.nodes, n);
            } else {
                curr = get_r(&self.nodes, n);
            }
        }
        result
    }

    pub fn find(&self, key: &C::Key) -> Cursor {
        let at = self.lower_bound(key);
        match self.get(at) {
            Some(v) if !self.compare.less_key(key, self.compare.key(v)) => at,
            _ => Cursor::End,
        }
    }

    /// `[found, next(found))` when `key` is present, otherwise the empty
    /// range positioned where `key` would be inserted.
    pub fn equal_range(&self, key: &C::Key) -> (Cursor, Cursor) {
        let at = self.lower_bound(key);
        match self.get(at) {
            Some(v) if !self.compare.less_key(key, self.compare.key(v)) => (at, self.next(at)),
            _ => (at, at),
        }
    }

    pub fn count(&self, key: &C::Key) -> usize {
        usize::from(!self.find(key).is_end())
    }

    pub fn contains(&self, key: &C::Key) -> bool {
        !self.find(key).is_end()
    }

    /// Inserts `value` unless an equivalent element exists. Returns the
    /// cursor to the element with that key and whether it was inserted; a
    /// rejected `value` is dropped.
    ///
    /// On allocation failure the tree is left unchanged.
    pub fn insert(&mut self, value: T) -> Result<(Cursor, bool)> {
        match self.find_place(self.compare.key(&value)) {
            Place::Found(n) => Ok((Cursor::Node(n), false)),
            Place::Vacant { parent, side } => {
                let n = self.insert_at(parent, side, value)?;
                Ok((Cursor::Node(n), true))
            }
        }
    }

    /// Inserts `value` as close as possible to `hint`. Amortized O(1) when
    /// the value belongs immediately before `hint`, or immediately after it
    /// when `hint` is the last element; O(log n) otherwise.
    pub fn insert_hint(&mut self, hint: Cursor, value: T) -> Result<Cursor> {
        match self.find_place_hinted(hint, &value) {
            Place::Found(n) => Ok(Cursor::Node(n)),
            Place::Vacant { parent, side } => {
                let n = self.insert_at(parent, side, value)?;
                Ok(Cursor::Node(n))
            }
        }
    }

    /// Inserts every item, using `end()` as the hint. Linear for input that
    /// is already sorted under this tree's order.
    pub fn insert_iter<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<()> {
        for value in iter {
            self.insert_hint(Cursor::End, value)?;
        }
        Ok(())
    }

    /// Removes the element at `at` and returns the cursor that followed it.
    /// `End` is left alone.
    pub fn erase(&mut self, at: Cursor) -> Cursor {
        self.detach(at).0
    }

    /// Like [`erase`](Self::erase), handing the removed element back.
    pub fn take(&mut self, at: Cursor) -> Option<T> {
        self.detach(at).1
    }

    fn detach(&mut self, at: Cursor) -> (Cursor, Option<T>) {
        let Cursor::Node(target) = at else {
            return (Cursor::End, None);
        };
        let next = self.next(at);
        if self.begin == at {
            self.begin = next;
        }
        if self.last == Some(target) {
            self.last = self.prev(at).node();
        }

        self.swap_down(target);

        let parent = get_p(&self.nodes, target);
        let side = side_of(&self.nodes, target);
        let was_black = is_black(&self.nodes, Some(target));
        match (parent, side) {
            (Some(p), Some(side)) => set_child(&mut self.nodes, p, side, None),
            _ => self.root = None,
        }
        let node = self.nodes.remove(target);
        let value = self.values.remove(node.v);
        self.len -= 1;

        if was_black {
            if let (Some(p), Some(side)) = (parent, side) {
                self.rebalance_after_erase(p, side);
            }
        }
        (next, Some(value))
    }

    /// Removes `[first, last)` and returns `last`.
    pub fn erase_range(&mut self, first: Cursor, last: Cursor) -> Cursor {
        if first == self.begin && last.is_end() {
            self.clear();
            return Cursor::End;
        }
        let mut at = first;
        while at != last && !at.is_end() {
            at = self.erase(at);
        }
        at
    }

    /// Removes the element equivalent to `key`, returning how many were
    /// removed (0 or 1).
    pub fn erase_key(&mut self, key: &C::Key) -> usize {
        let at = self.find(key);
        if at.is_end() {
            return 0;
        }
        self.erase(at);
        1
    }

    /// Checks the red-black invariants, parent links, strict ordering and
    /// the cached bookkeeping.
    pub fn assert_valid(&self) -> std::result::Result<(), String> {
        verify::assert_red_black_tree(self)
    }

    pub fn try_clone(&self) -> Result<Self>
    where
        T: Clone,
        C: Clone,
    {
        let mut tree = Self::with_compare_in(self.compare.clone(), self.alloc.clone());
        tree.insert_iter(self.iter().cloned())?;
        Ok(tree)
    }

    fn find_place(&self, key: &C::Key) -> Place {
        let Some(mut curr) = self.root else {
            return Place::Vacant {
                parent: None,
                side: Side::Left,
            };
        };
        loop {
            let curr_key = self.compare.key(self.value_of(curr));
            let side = if self.compare.less_key(key, curr_key) {
                Side::Left
            } else if self.compare.less_key(curr_key, key) {
                Side::Right
            } else {
                return Place::Found(curr);
            };
            match get_child(&self.nodes, curr, side) {
                Some(next) => curr = next,
                None => {
                    return Place::Vacant {
                        parent: Some(curr),
                        side,
                    }
                }
            }
        }
    }

    fn find_place_hinted(&self, hint: Cursor, value: &T) -> Place {
        let key = self.compare.key(value);
        let hint_key = self.get(hint).map(|v| self.compare.key(v));

        let before_hint = match hint_key {
            None => true,
            Some(hk) => self.compare.less_key(key, hk),
        };
        if before_hint {
            // prev < key < hint
            let prev = self.prev(hint);
            match (prev, hint) {
                (Cursor::End, Cursor::End) => {
                    return Place::Vacant {
                        parent: None,
                        side: Side::Left,
                    }
                }
                (Cursor::End, Cursor::Node(h)) => {
                    return Place::Vacant {
                        parent: Some(h),
                        side: Side::Left,
                    }
                }
                (Cursor::Node(p), _) => {
                    if self.compare.less_key(self.compare.key(self.value_of(p)), key) {
                        if get_r(&self.nodes, p).is_none() {
                            return Place::Vacant {
                                parent: Some(p),
                                side: Side::Right,
                            };
                        }
                        if let Cursor::Node(h) = hint {
                            return Place::Vacant {
                                parent: Some(h),
                                side: Side::Left,
                            };
                        }
                    }
                }
            }
        } else if let (Cursor::Node(h), Some(hk)) = (hint, hint_key) {
            if self.compare.less_key(hk, key) {
                // hint < key < next
                match self.next(hint) {
                    Cursor::End => {
                        return Place::Vacant {
                            parent: Some(h),
                            side: Side::Right,
                        }
                    }
                    Cursor::Node(nx) => {
                        if self.compare.less_key(key, self.compare.key(self.value_of(nx))) {
                            return if get_l(&self.nodes, nx).is_none() {
                                Place::Vacant {
                                    parent: Some(nx),
                                    side: Side::Left,
                                }
                            } else {
                                Place::Vacant {
                                    parent: Some(h),
                                    side: Side::Right,
                                }
                            };
                        }
                    }
                }
            } else {
                return Place::Found(h);
            }
        }

        log::trace!("insertion hint not adjacent; falling back to full search");
        self.find_place(key)
    }

    fn insert_at(&mut self, parent: Option<u32>, side: Side, value: T) -> Result<u32> {
        let n = create_node(&mut self.values, &mut self.nodes, &mut self.alloc, value)?;
        match parent {
            None => {
                self.root = Some(n);
                self.begin = Cursor::Node(n);
                self.last = Some(n);
            }
            Some(p) => {
                place_into(&mut self.nodes, p, side, Some(n));
                if side == Side::Left && self.begin == Cursor::Node(p) {
                    self.begin = Cursor::Node(n);
                }
                if side == Side::Right && self.last == Some(p) {
                    self.last = Some(n);
                }
            }
        }
        self.len += 1;
        self.rebalance_after_insert(n);
        Ok(n)
    }

    /// Classic fix-up of a red-red edge, iterating up from `n`.
    fn rebalance_after_insert(&mut self, mut n: u32) {
        loop {
            if is_black(&self.nodes, Some(n)) {
                return;
            }
            let Some(mut p) = get_p(&self.nodes, n) else {
                set_color(&mut self.nodes, n, Color::Black);
                return;
            };
            if is_black(&self.nodes, Some(p)) {
                return;
            }
            let Some(q) = get_p(&self.nodes, p) else {
                set_color(&mut self.nodes, p, Color::Black);
                return;
            };
            match counter_child(&self.nodes, q, p) {
                Some(u) if is_red(&self.nodes, Some(u)) => {
                    node::flip_color(&mut self.nodes, u);
                    node::flip_color(&mut self.nodes, p);
                    node::flip_color(&mut self.nodes, q);
                    n = q;
                }
                _ => {
                    if node::is_cis_child(&self.nodes, n) {
                        self.rotate(p, n);
                        p = n;
                    }
                    self.rotate_flip(q, p);
                    return;
                }
            }
        }
    }

    /// Moves `target` down by position swaps with its in-order neighbor
    /// until it is a leaf. Only links move; every other node keeps its
    /// handle and value.
    fn swap_down(&mut self, target: u32) {
        while let Some(root) = self.root {
            let other = if let Some(r) = get_r(&self.nodes, target) {
                min_node(&self.nodes, r)
            } else if let Some(l) = get_l(&self.nodes, target) {
                max_node(&self.nodes, l)
            } else {
                return;
            };
            self.root = Some(swap_position(&mut self.nodes, root, target, other));
        }
    }

    /// Restores black height after a black leaf was cut from `p`'s `side`.
    ///
    /// `m` is the deficient subtree (empty on the first pass), `s` its
    /// sibling, `x` the near nephew and `y` the far nephew.
    fn rebalance_after_erase(&mut self, mut p: u32, mut side: Side) {
        loop {
            let Some(mut s) = get_child(&self.nodes, p, side.opposite()) else {
                debug_assert!(false, "black child without a sibling");
                return;
            };
            let (mut x, mut y) = self.nephews(s);

            let p_black = is_black(&self.nodes, Some(p));
            let s_black = is_black(&self.nodes, Some(s));
            let xy_black = is_black(&self.nodes, x) && is_black(&self.nodes, y);

            if p_black && s_black && xy_black {
                set_color(&mut self.nodes, s, Color::Red);
                match (get_p(&self.nodes, p), side_of(&self.nodes, p)) {
                    (Some(pp), Some(p_side)) => {
                        p = pp;
                        side = p_side;
                        continue;
                    }
                    // m reached the root.
                    _ => return,
                }
            }

            if p_black && !s_black {
                self.rotate_flip(p, s);
                s = match get_child(&self.nodes, p, side.opposite()) {
                    Some(s) => s,
                    None => return,
                };
                (x, y) = self.nephews(s);
            }

            if is_red(&self.nodes, Some(p))
                && is_black(&self.nodes, Some(s))
                && is_black(&self.nodes, x)
                && is_black(&self.nodes, y)
            {
                node::flip_color(&mut self.nodes, p);
                node::flip_color(&mut self.nodes, s);
                return;
            }

            // One nephew is red here. Bring a red one to the far side.
            if is_black(&self.nodes, y) {
                if let Some(xn) = x {
                    self.rotate_flip(s, xn);
                    s = xn;
                    y = node::trans_child(&self.nodes, s);
                }
            }

            self.rotate_swap(p, s);
            if let Some(y) = y {
                set_color(&mut self.nodes, y, Color::Black);
            }
            return;
        }
    }

    fn nephews(&self, s: u32) -> (Option<u32>, Option<u32>) {
        (
            node::cis_child(&self.nodes, s),
            node::trans_child(&self.nodes, s),
        )
    }
}

impl<T, C, A> Bidirectional for RbTree<T, C, A> {
    type Item = T;

    fn next(&self, at: Cursor) -> Cursor {
        RbTree::next(self, at)
    }

    fn prev(&self, at: Cursor) -> Cursor {
        RbTree::prev(self, at)
    }

    fn get(&self, at: Cursor) -> Option<&T> {
        RbTree::get(self, at)
    }
}

impl<T: Clone, C: ValueCompare<T> + Clone, A: Allocator> Clone for RbTree<T, C, A> {
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(tree) => tree,
            Err(err) => panic!("cloning a tree of {} elements failed: {err}", self.len),
        }
    }

    /// Copy-and-swap: the new contents are built aside, then exchanged.
    fn clone_from(&mut self, source: &Self) {
        let mut tmp = source.clone();
        self.swap(&mut tmp);
    }
}

impl<T: Debug, C, A> Debug for RbTree<T, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, C, A> PartialEq for RbTree<T, C, A> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C, A> Eq for RbTree<T, C, A> {}

impl<T: PartialOrd, C, A> PartialOrd for RbTree<T, C, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, C, A> Ord for RbTree<T, C, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, C, A> Hash for RbTree<T, C, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for v in self.iter() {
            v.hash(state);
        }
    }
}

impl<'a, T, C, A> IntoIterator for &'a RbTree<T, C, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, C, A> IntoIterator for RbTree<T, C, A> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        let mut order = Vec::with_capacity(self.len);
        let mut at = self.begin;
        while let Cursor::Node(n) = at {
            order.push(self.nodes[n].v);
            at = self.next(at);
        }
        let items = order
            .into_iter()
            .map(|v| self.values.remove(v))
            .collect();
        IntoIter::new(items)
    }
}

impl<T, C, A> Extend<T> for RbTree<T, C, A>
where
    C: ValueCompare<T>,
    A: Allocator,
{
    /// Panics if the allocator refuses an element; use
    /// [`RbTree::insert_iter`] to handle that case.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        if let Err(err) = self.insert_iter(iter) {
            panic!("extend failed: {err}");
        }
    }
}

impl<T: Ord> FromIterator<T> for RbTree<T, Identity<Natural>, Global> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
