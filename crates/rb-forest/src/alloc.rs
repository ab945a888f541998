//! Pluggable allocation strategy and the two-phase node holder.
//!
//! Every stored element costs two slots: one in the value pool and one in
//! the node pool. Before either slot is claimed the tree asks its
//! [`Allocator`] for permission, so a strategy can cap memory, and tests
//! can make the second request fail after the first one succeeded.

use crate::error::{Error, Result};
use crate::node::RbNode;
use crate::pool::Pool;
use crate::types::SlotKind;

/// Admission policy for value and node slots.
pub trait Allocator: Clone {
    /// Called before one more `kind` slot is claimed; `live` is the number
    /// of `kind` slots in use right now.
    fn grant(&mut self, kind: SlotKind, live: usize) -> Result<()>;

    /// Upper bound on the number of elements this strategy admits.
    fn max_slots(&self) -> usize {
        usize::MAX
    }
}

/// Unbounded strategy. Fails only when the pool itself cannot grow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Global;

impl Allocator for Global {
    #[inline]
    fn grant(&mut self, _kind: SlotKind, _live: usize) -> Result<()> {
        Ok(())
    }
}

/// Refuses to hold more than a fixed number of live value or node slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bounded {
    pub values: usize,
    pub nodes: usize,
}

impl Bounded {
    /// Same limit for values and nodes.
    pub fn new(limit: usize) -> Self {
        Self {
            values: limit,
            nodes: limit,
        }
    }
}

impl Allocator for Bounded {
    fn grant(&mut self, kind: SlotKind, live: usize) -> Result<()> {
        let limit = match kind {
            SlotKind::Value => self.values,
            SlotKind::Node => self.nodes,
        };
        if live >= limit {
            log::debug!("bounded allocator refused {kind} slot ({live}/{limit} live)");
            return Err(Error::Alloc(kind));
        }
        Ok(())
    }

    fn max_slots(&self) -> usize {
        self.values.min(self.nodes)
    }
}

/// Owns a freshly constructed value (and then node) until [`release`] hands
/// the node over to the tree. Dropping the holder before that frees every
/// slot it still owns, so a failed insertion leaves both pools untouched.
///
/// [`release`]: NodeHolder::release
pub(crate) struct NodeHolder<'a, T, A: Allocator> {
    values: &'a mut Pool<T>,
    nodes: &'a mut Pool<RbNode>,
    alloc: &'a mut A,
    value: Option<u32>,
    node: Option<u32>,
}

impl<'a, T, A: Allocator> NodeHolder<'a, T, A> {
    pub(crate) fn new(
        values: &'a mut Pool<T>,
        nodes: &'a mut Pool<RbNode>,
        alloc: &'a mut A,
    ) -> Self {
        Self {
            values,
            nodes,
            alloc,
            value: None,
            node: None,
        }
    }

    pub(crate) fn construct_value(&mut self, value: T) -> Result<()> {
        self.alloc.grant(SlotKind::Value, self.values.len())?;
        match self.values.try_insert(value) {
            Ok(idx) => {
                self.value = Some(idx);
                Ok(())
            }
            Err((_, full)) => {
                log::debug!("value pool could not grow: {full:?}");
                Err(Error::Alloc(SlotKind::Value))
            }
        }
    }

    /// Builds a detached red node referring to the held value.
    pub(crate) fn construct_node(&mut self) -> Result<u32> {
        let Some(v) = self.value else {
            return Err(Error::Alloc(SlotKind::Value));
        };
        self.alloc.grant(SlotKind::Node, self.nodes.len())?;
        match self.nodes.try_insert(RbNode::new(v)) {
            Ok(idx) => {
                self.node = Some(idx);
                Ok(idx)
            }
            Err((_, full)) => {
                log::debug!("node pool could not grow: {full:?}");
                Err(Error::Alloc(SlotKind::Node))
            }
        }
    }

    /// Gives up ownership of the constructed slots.
    pub(crate) fn release(mut self) {
        self.value = None;
        self.node = None;
    }
}

impl<T, A: Allocator> Drop for NodeHolder<'_, T, A> {
    fn drop(&mut self) {
        if let Some(node) = self.node.take() {
            self.nodes.remove(node);
        }
        if let Some(value) = self.value.take() {
            drop(self.values.remove(value));
        }
    }
}

/// Allocates the value and node slots for one element.
pub(crate) fn create_node<T, A: Allocator>(
    values: &mut Pool<T>,
    nodes: &mut Pool<RbNode>,
    alloc: &mut A,
    value: T,
) -> Result<u32> {
    let mut holder = NodeHolder::new(values, nodes, alloc);
    holder.construct_value(value)?;
    let node = holder.construct_node()?;
    holder.release();
    Ok(node)
}
