//! Standard Rust iterators over a tree, built on the same neighbor walk as
//! [`Cursor`] stepping.

use std::iter::FusedIterator;

use crate::cursor::{step_backward, step_forward, Cursor};
use crate::node::Nodes;
use crate::pool::Pool;

/// Borrowing iterator over `[front, back)`.
pub struct Range<'a, T> {
    nodes: &'a Nodes,
    values: &'a Pool<T>,
    last: Option<u32>,
    front: Cursor,
    back: Cursor,
}

impl<'a, T> Range<'a, T> {
    pub(crate) fn new(
        nodes: &'a Nodes,
        values: &'a Pool<T>,
        last: Option<u32>,
        front: Cursor,
        back: Cursor,
    ) -> Self {
        Self {
            nodes,
            values,
            last,
            front,
            back,
        }
    }

    fn value(&self, n: u32) -> &'a T {
        &self.values[self.nodes[n].v]
    }
}

impl<'a, T> Iterator for Range<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        let n = self.front.node()?;
        self.front = step_forward(self.nodes, self.front);
        Some(self.value(n))
    }
}

impl<'a, T> DoubleEndedIterator for Range<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        self.back = step_backward(self.nodes, self.last, self.back);
        let n = self.back.node()?;
        Some(self.value(n))
    }
}

impl<T> FusedIterator for Range<'_, T> {}

impl<T> Clone for Range<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

/// Borrowing in-order iterator over a whole tree.
pub struct Iter<'a, T> {
    range: Range<'a, T>,
    len: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(range: Range<'a, T>, len: usize) -> Self {
        Self { range, len }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        self.range.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        self.range.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            range: self.range.clone(),
            len: self.len,
        }
    }
}

/// In-order iterator handing out one `&mut T` per element.
///
/// Element borrows are split up front, one per value slot, so each element
/// is yielded at most once without aliasing.
pub(crate) struct IterMut<'a, T> {
    nodes: &'a Nodes,
    slots: Vec<Option<&'a mut T>>,
    last: Option<u32>,
    front: Cursor,
    back: Cursor,
    len: usize,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(
        nodes: &'a Nodes,
        values: &'a mut Pool<T>,
        first: Cursor,
        last: Option<u32>,
        len: usize,
    ) -> Self {
        Self {
            nodes,
            slots: values.slots_mut(),
            last,
            front: first,
            back: Cursor::End,
            len,
        }
    }

    fn take(&mut self, n: u32) -> Option<&'a mut T> {
        let v = self.nodes[n].v as usize;
        self.slots.get_mut(v).and_then(Option::take)
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        let n = self.front.node()?;
        self.front = step_forward(self.nodes, self.front);
        self.len -= 1;
        self.take(n)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        self.back = step_backward(self.nodes, self.last, self.back);
        let n = self.back.node()?;
        self.len -= 1;
        self.take(n)
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning in-order iterator.
pub struct IntoIter<T> {
    inner: std::vec::IntoIter<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(items: Vec<T>) -> Self {
        Self {
            inner: items.into_iter(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
