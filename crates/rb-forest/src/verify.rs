//! Structural checks and a debug dump, for tests and diagnostics.

use std::fmt::Debug;

use crate::compare::ValueCompare;
use crate::cursor::Cursor;
use crate::node::{forward_neighbor, get_l, get_p, get_r, is_black, max_node, min_node, Nodes};
use crate::pool::Pool;
use crate::tree::RbTree;

/// Validates a tree: black root, parent links, no red-red edge, equal black
/// height on every path, strictly increasing order, and that the cached
/// length, first and last positions agree with the structure.
pub fn assert_red_black_tree<T, C, A>(tree: &RbTree<T, C, A>) -> Result<(), String>
where
    C: ValueCompare<T>,
{
    let nodes = tree.nodes();
    let Some(root) = tree.root_index() else {
        if tree.len() != 0 {
            return Err(format!("Empty tree reports length {}", tree.len()));
        }
        if !tree.begin().is_end() || tree.last_index().is_some() {
            return Err("Empty tree has a cached first or last node".to_string());
        }
        return Ok(());
    };

    if get_p(nodes, root).is_some() {
        return Err("Root has parent".to_string());
    }
    if !is_black(nodes, Some(root)) {
        return Err("Root is not black".to_string());
    }

    let mut count = 0usize;
    black_height(nodes, Some(root), &mut count)?;
    if count != tree.len() {
        return Err(format!(
            "Reachable node count {count} differs from length {}",
            tree.len()
        ));
    }
    if nodes.len() != count || tree.values().len() != count {
        return Err(format!(
            "Pools hold {} nodes and {} values for {count} elements",
            nodes.len(),
            tree.values().len()
        ));
    }

    let first = min_node(nodes, root);
    if tree.begin() != Cursor::Node(first) {
        return Err("Cached first node is stale".to_string());
    }
    if tree.last_index() != Some(max_node(nodes, root)) {
        return Err("Cached last node is stale".to_string());
    }

    let cmp = tree.value_comp();
    let mut prev: Option<&T> = None;
    let mut curr = Some(first);
    while let Some(n) = curr {
        let value = &tree.values()[nodes[n].v];
        if let Some(prev) = prev {
            if !cmp.less(prev, value) {
                return Err("Node order violated".to_string());
            }
        }
        prev = Some(value);
        curr = forward_neighbor(nodes, n);
    }

    Ok(())
}

fn black_height(nodes: &Nodes, node: Option<u32>, count: &mut usize) -> Result<usize, String> {
    let Some(node) = node else {
        return Ok(1);
    };
    *count += 1;

    let l = get_l(nodes, node);
    let r = get_r(nodes, node);

    if let Some(li) = l {
        if get_p(nodes, li) != Some(node) {
            return Err(format!("Broken parent link on left child of {node}"));
        }
    }
    if let Some(ri) = r {
        if get_p(nodes, ri) != Some(node) {
            return Err(format!("Broken parent link on right child of {node}"));
        }
    }

    let black = is_black(nodes, Some(node));
    if !black {
        if !is_black(nodes, l) {
            return Err(format!("Red node {node} has red left child"));
        }
        if !is_black(nodes, r) {
            return Err(format!("Red node {node} has red right child"));
        }
    }

    let lh = black_height(nodes, l, count)?;
    let rh = black_height(nodes, r, count)?;
    if lh != rh {
        return Err(format!("Black height mismatch under {node}: {lh} vs {rh}"));
    }

    Ok(lh + usize::from(black))
}

/// Indented dump of the tree shape, one node per line.
pub fn print<T: Debug, C, A>(tree: &RbTree<T, C, A>) -> String {
    fn go<T: Debug>(
        nodes: &Nodes,
        values: &Pool<T>,
        node: Option<u32>,
        tab: &str,
        out: &mut String,
    ) {
        match node {
            None => out.push('∅'),
            Some(i) => {
                let n = &nodes[i];
                let color = if is_black(nodes, Some(i)) { "black" } else { "red" };
                out.push_str(&format!("Node[{i}] {color} {:?}", values[n.v]));
                let child_tab = format!("{tab}  ");
                out.push_str(&format!("\n{tab}L="));
                go(nodes, values, n.l, &child_tab, out);
                out.push_str(&format!("\n{tab}R="));
                go(nodes, values, n.r, &child_tab, out);
            }
        }
    }

    let mut out = String::new();
    go(tree.nodes(), tree.values(), tree.root_index(), "", &mut out);
    out
}
