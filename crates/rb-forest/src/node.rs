//! Red-black tree vertex and the structural helpers the engine is built on.
//!
//! Helpers are free functions over the node pool, in the same arena style
//! as the rest of the crate: a node is a `u32` handle, a missing link is
//! `None`, and the root is the only node whose parent link is `None`.

use crate::pool::Pool;
use crate::types::{Color, Node, Side};

/// A tree vertex. `v` is the handle of its element in the value pool; the
/// node never moves its value, only its links change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RbNode {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub v: u32,
    pub color: Color,
}

impl RbNode {
    /// A detached red node.
    pub fn new(v: u32) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            v,
            color: Color::Red,
        }
    }
}

impl Node for RbNode {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

pub type Nodes = Pool<RbNode>;

#[inline]
pub(crate) fn get_p(nodes: &Nodes, n: u32) -> Option<u32> {
    nodes[n].p()
}

#[inline]
pub(crate) fn get_l(nodes: &Nodes, n: u32) -> Option<u32> {
    nodes[n].l()
}

#[inline]
pub(crate) fn get_r(nodes: &Nodes, n: u32) -> Option<u32> {
    nodes[n].r()
}

#[inline]
pub(crate) fn get_child(nodes: &Nodes, n: u32, side: Side) -> Option<u32> {
    nodes[n].child(side)
}

#[inline]
pub(crate) fn set_p(nodes: &mut Nodes, n: u32, v: Option<u32>) {
    nodes[n].set_p(v);
}

#[inline]
pub(crate) fn set_child(nodes: &mut Nodes, n: u32, side: Side, v: Option<u32>) {
    nodes[n].set_child(side, v);
}

/// Color of an optional node; missing nodes are black.
#[inline]
pub fn color(nodes: &Nodes, n: Option<u32>) -> Color {
    n.map_or(Color::Black, |n| nodes[n].color)
}

#[inline]
pub fn is_black(nodes: &Nodes, n: Option<u32>) -> bool {
    color(nodes, n) == Color::Black
}

#[inline]
pub fn is_red(nodes: &Nodes, n: Option<u32>) -> bool {
    !is_black(nodes, n)
}

#[inline]
pub(crate) fn set_color(nodes: &mut Nodes, n: u32, color: Color) {
    nodes[n].color = color;
}

#[inline]
pub(crate) fn flip_color(nodes: &mut Nodes, n: u32) {
    let c = nodes[n].color;
    nodes[n].color = c.flipped();
}

pub(crate) fn swap_color(nodes: &mut Nodes, a: u32, b: u32) {
    let ca = nodes[a].color;
    let cb = nodes[b].color;
    nodes[a].color = cb;
    nodes[b].color = ca;
}

/// Side of `n` under its parent, `None` for the root.
pub fn side_of(nodes: &Nodes, n: u32) -> Option<Side> {
    let p = get_p(nodes, n)?;
    if get_l(nodes, p) == Some(n) {
        Some(Side::Left)
    } else {
        Some(Side::Right)
    }
}

pub fn is_left_child(nodes: &Nodes, n: u32) -> bool {
    side_of(nodes, n) == Some(Side::Left)
}

pub fn is_right_child(nodes: &Nodes, n: u32) -> bool {
    side_of(nodes, n) == Some(Side::Right)
}

pub fn has_left_child(nodes: &Nodes, n: u32) -> bool {
    get_l(nodes, n).is_some()
}

pub fn has_right_child(nodes: &Nodes, n: u32) -> bool {
    get_r(nodes, n).is_some()
}

/// Leftmost node of the subtree rooted at `n`.
pub fn min_node(nodes: &Nodes, mut n: u32) -> u32 {
    while let Some(l) = get_l(nodes, n) {
        n = l;
    }
    n
}

/// Rightmost node of the subtree rooted at `n`.
pub fn max_node(nodes: &Nodes, mut n: u32) -> u32 {
    while let Some(r) = get_r(nodes, n) {
        n = r;
    }
    n
}

/// In-order successor; `None` means the end position.
pub fn forward_neighbor(nodes: &Nodes, n: u32) -> Option<u32> {
    if let Some(r) = get_r(nodes, n) {
        return Some(min_node(nodes, r));
    }
    let mut curr = n;
    while is_right_child(nodes, curr) {
        curr = get_p(nodes, curr)?;
    }
    get_p(nodes, curr)
}

/// In-order predecessor; `None` when `n` is the minimum.
pub fn backward_neighbor(nodes: &Nodes, n: u32) -> Option<u32> {
    if let Some(l) = get_l(nodes, n) {
        return Some(max_node(nodes, l));
    }
    let mut curr = n;
    while is_left_child(nodes, curr) {
        curr = get_p(nodes, curr)?;
    }
    get_p(nodes, curr)
}

/// Child on the opposite side to the one `n` hangs from. For a sibling this
/// is the nephew nearest to the other child; for an inserted node whose
/// parent is a cis child the shape is a zig-zag.
pub fn cis_child(nodes: &Nodes, n: u32) -> Option<u32> {
    let side = side_of(nodes, n)?;
    get_child(nodes, n, side.opposite())
}

/// Child on the same side `n` hangs from.
pub fn trans_child(nodes: &Nodes, n: u32) -> Option<u32> {
    let side = side_of(nodes, n)?;
    get_child(nodes, n, side)
}

/// Whether `n` hangs from the opposite side than its parent does.
pub fn is_cis_child(nodes: &Nodes, n: u32) -> bool {
    let Some(p) = get_p(nodes, n) else {
        return false;
    };
    match (side_of(nodes, n), side_of(nodes, p)) {
        (Some(a), Some(b)) => a != b,
        _ => false,
    }
}

/// Sibling of `child` under `parent`; `None` if `child` is not a child of
/// `parent` or has no sibling.
pub fn counter_child(nodes: &Nodes, parent: u32, child: u32) -> Option<u32> {
    if get_l(nodes, parent) == Some(child) {
        get_r(nodes, parent)
    } else if get_r(nodes, parent) == Some(child) {
        get_l(nodes, parent)
    } else {
        None
    }
}

/// Links `child` into `parent`'s `side` slot, fixing the back-link.
pub fn place_into(nodes: &mut Nodes, parent: u32, side: Side, child: Option<u32>) {
    set_child(nodes, parent, side, child);
    if let Some(child) = child {
        set_p(nodes, child, Some(parent));
    }
}

/// Rotates `child` above `parent`. The direction follows from the side
/// `child` hangs from; the rotated subtree is reattached to `parent`'s old
/// slot, or becomes parentless when `parent` was the root.
pub fn rotate(nodes: &mut Nodes, parent: u32, child: u32) {
    let side = if get_l(nodes, parent) == Some(child) {
        Side::Left
    } else {
        debug_assert_eq!(get_r(nodes, parent), Some(child), "rotation of a non-child");
        Side::Right
    };
    let grand = get_p(nodes, parent);
    let parent_side = side_of(nodes, parent);
    let inner = get_child(nodes, child, side.opposite());

    place_into(nodes, parent, side, inner);
    place_into(nodes, child, side.opposite(), Some(parent));
    match (grand, parent_side) {
        (Some(g), Some(s)) => place_into(nodes, g, s, Some(child)),
        _ => set_p(nodes, child, None),
    }
}

/// `n`'s right child takes its place.
pub fn rotate_left(nodes: &mut Nodes, n: u32) {
    if let Some(r) = get_r(nodes, n) {
        rotate(nodes, n, r);
    }
}

/// `n`'s left child takes its place.
pub fn rotate_right(nodes: &mut Nodes, n: u32) {
    if let Some(l) = get_l(nodes, n) {
        rotate(nodes, n, l);
    }
}

/// Flips both colors, then rotates `child` above `parent`.
pub fn rotate_flip(nodes: &mut Nodes, parent: u32, child: u32) {
    flip_color(nodes, child);
    flip_color(nodes, parent);
    rotate(nodes, parent, child);
}

/// Exchanges both colors, then rotates `child` above `parent`.
pub fn rotate_swap(nodes: &mut Nodes, parent: u32, child: u32) {
    swap_color(nodes, parent, child);
    rotate(nodes, parent, child);
}

/// Exchanges the graph positions (links and colors) of `x` and `y`. Values
/// stay attached to their nodes. Handles `x` and `y` being parent and child
/// of each other. Returns the root after the swap.
pub fn swap_position(nodes: &mut Nodes, mut root: u32, x: u32, y: u32) -> u32 {
    if x == y {
        return root;
    }
    swap_color(nodes, x, y);

    let xp = get_p(nodes, x);
    let xl = get_l(nodes, x);
    let xr = get_r(nodes, x);
    let x_side = side_of(nodes, x);

    let yp = get_p(nodes, y);
    let yl = get_l(nodes, y);
    let yr = get_r(nodes, y);
    let y_side = side_of(nodes, y);

    for (side, yc) in [(Side::Left, yl), (Side::Right, yr)] {
        if yc == Some(x) {
            set_child(nodes, x, side, Some(y));
            set_p(nodes, y, Some(x));
        } else {
            place_into(nodes, x, side, yc);
        }
    }

    for (side, xc) in [(Side::Left, xl), (Side::Right, xr)] {
        if xc == Some(y) {
            set_child(nodes, y, side, Some(x));
            set_p(nodes, x, Some(y));
        } else {
            place_into(nodes, y, side, xc);
        }
    }

    match (xp, x_side) {
        (None, _) | (_, None) => {
            root = y;
            set_p(nodes, y, None);
        }
        (Some(xp), Some(side)) if xp != y => place_into(nodes, xp, side, Some(y)),
        _ => {}
    }

    match (yp, y_side) {
        (None, _) | (_, None) => {
            root = x;
            set_p(nodes, x, None);
        }
        (Some(yp), Some(side)) if yp != x => place_into(nodes, yp, side, Some(x)),
        _ => {}
    }

    root
}
