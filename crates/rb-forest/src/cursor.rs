//! Positions inside a tree.
//!
//! A [`Cursor`] is a plain copyable handle: either a node or the
//! one-past-the-last position. It does not borrow the tree, so it survives
//! insertions and erasures of *other* elements; it is invalidated only when
//! its own element is erased, the tree is cleared, or the tree is dropped.
//! Using an invalidated cursor, or one taken from another tree, is a caller
//! error: lookups through it panic or land on an unrelated element.

use crate::node::{backward_neighbor, forward_neighbor, Nodes};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cursor {
    Node(u32),
    /// One past the last element. Never holds a value.
    End,
}

impl Cursor {
    #[inline]
    pub fn is_end(self) -> bool {
        matches!(self, Cursor::End)
    }

    #[inline]
    pub fn node(self) -> Option<u32> {
        match self {
            Cursor::Node(n) => Some(n),
            Cursor::End => None,
        }
    }
}

impl From<Option<u32>> for Cursor {
    #[inline]
    fn from(n: Option<u32>) -> Self {
        n.map_or(Cursor::End, Cursor::Node)
    }
}

/// Step forward. `End` stays at `End`.
#[inline]
pub(crate) fn step_forward(nodes: &Nodes, at: Cursor) -> Cursor {
    match at {
        Cursor::Node(n) => forward_neighbor(nodes, n).into(),
        Cursor::End => Cursor::End,
    }
}

/// Step backward. From `End` this lands on `last`; from the first element
/// it lands on `End`.
#[inline]
pub(crate) fn step_backward(nodes: &Nodes, last: Option<u32>, at: Cursor) -> Cursor {
    match at {
        Cursor::Node(n) => backward_neighbor(nodes, n).into(),
        Cursor::End => last.into(),
    }
}

/// Containers whose cursors can move both ways and be dereferenced.
pub trait Bidirectional {
    type Item: ?Sized;

    fn next(&self, at: Cursor) -> Cursor;

    fn prev(&self, at: Cursor) -> Cursor;

    fn get(&self, at: Cursor) -> Option<&Self::Item>;
}

/// Reverse cursor over any [`Bidirectional`] container.
///
/// Wraps a base cursor and designates the element just *before* it, so
/// `RevCursor::new(end)` is the reverse begin and `RevCursor::new(begin)`
/// the reverse end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RevCursor {
    base: Cursor,
}

impl RevCursor {
    #[inline]
    pub fn new(base: Cursor) -> Self {
        Self { base }
    }

    /// The forward cursor one past the designated element.
    #[inline]
    pub fn base(self) -> Cursor {
        self.base
    }

    pub fn get<B: Bidirectional>(self, container: &B) -> Option<&B::Item> {
        let at = container.prev(self.base);
        if at == self.base {
            return None;
        }
        container.get(at)
    }

    /// Moves toward the front of the container.
    pub fn next<B: Bidirectional>(self, container: &B) -> Self {
        Self::new(container.prev(self.base))
    }

    /// Moves toward the back of the container.
    pub fn prev<B: Bidirectional>(self, container: &B) -> Self {
        Self::new(container.next(self.base))
    }
}
