//! Arena-based red-black tree with ordered map and set façades.
//!
//! One balanced-tree engine, [`RbTree`], stores unique elements under a
//! strict weak order and is shared by [`RbMap`] (`(K, V)` pairs ordered by
//! key) and [`RbSet`] (keys ordered by themselves).
//!
//! Instead of raw pointers, all links are `Option<u32>` handles into a
//! node [`Pool`](pool::Pool); elements live in a second pool and never move
//! while they are in the tree. A position is a [`Cursor`]: either a node
//! handle or [`Cursor::End`]. Cursors are plain values that stay valid
//! across insertion and erasure of other elements.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] link trait, [`Side`], [`Color`], [`SlotKind`] |
//! [`pool`] | Slab with a free list and stable `u32` handles |
//! [`alloc`] | [`Allocator`] strategies ([`Global`], [`Bounded`]) and the node holder |
//! [`node`] | [`RbNode`], neighbor walks, rotations, position swap |
//! [`compare`] | [`Comparator`], [`ValueCompare`] projections |
//! [`cursor`] | [`Cursor`], [`RevCursor`], [`Bidirectional`] |
//! [`tree`] | [`RbTree`]: search, insertion, erasure, rebalancing |
//! [`iter`] | Borrowing, mutable, ranged and owning iterators |
//! [`verify`] | Invariant checker and debug dump |
//! [`map`] | [`RbMap`] |
//! [`set`] | [`RbSet`] |
//!
//! ```
//! use rb_forest::RbMap;
//!
//! let mut map = RbMap::new();
//! map.insert((2, "two")).unwrap();
//! map.insert((1, "one")).unwrap();
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
//! ```

pub mod alloc;
pub mod compare;
pub mod cursor;
pub mod error;
pub mod iter;
pub mod map;
pub mod node;
pub mod pool;
pub mod set;
pub mod tree;
pub mod types;
pub mod verify;

pub use alloc::{Allocator, Bounded, Global};
pub use compare::{ByKey, Comparator, Identity, Natural, ValueCompare};
pub use cursor::{Bidirectional, Cursor, RevCursor};
pub use error::{Error, Result};
pub use map::RbMap;
pub use node::RbNode;
pub use set::RbSet;
pub use tree::RbTree;
pub use types::{Color, Node, Side, SlotKind};
