use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use rb_forest::{Cursor, RbTree};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn collect(tree: &RbTree<i32>) -> Vec<i32> {
    tree.iter().copied().collect()
}

#[test]
fn tree_small_insert_begin_and_traversal_matrix() {
    let mut tree = RbTree::new();
    for k in [5, 3, 8, 1, 4, 7, 9] {
        let (_, inserted) = tree.insert(k).unwrap();
        assert!(inserted);
        tree.assert_valid().unwrap();
    }

    assert_eq!(tree.get(tree.begin()), Some(&1));
    assert_eq!(collect(&tree), vec![1, 3, 4, 5, 7, 8, 9]);

    let mut walked = Vec::new();
    let mut at = tree.begin();
    while at != tree.end() {
        walked.push(*tree.get(at).unwrap());
        at = tree.next(at);
    }
    assert_eq!(walked, vec![1, 3, 4, 5, 7, 8, 9]);
    assert_eq!(tree.len(), 7);
}

#[test]
fn tree_shuffled_insert_erase_keeps_invariants_matrix() {
    init_logging();
    let mut rng = Xoshiro256StarStar::seed_from_u64(0x5eed);
    let mut keys: Vec<i32> = (1..=1000).collect();
    keys.shuffle(&mut rng);

    let mut tree = RbTree::new();
    for &k in &keys {
        tree.insert(k).unwrap();
    }
    tree.assert_valid().unwrap();
    assert_eq!(tree.len(), 1000);
    assert_eq!(collect(&tree), (1..=1000).collect::<Vec<_>>());

    keys.shuffle(&mut rng);
    for (i, &k) in keys.iter().enumerate() {
        assert_eq!(tree.erase_key(&k), 1);
        tree.assert_valid().unwrap();
        assert_eq!(tree.len(), 999 - i);
    }

    assert_eq!(tree.len(), 0);
    assert!(tree.is_empty());
    assert_eq!(tree.begin(), tree.end());
}

#[test]
fn tree_bounds_present_and_absent_key_matrix() {
    let with_four: RbTree<i32> = [1, 2, 4, 6].into_iter().collect();
    assert_eq!(with_four.get(with_four.lower_bound(&4)), Some(&4));
    assert_eq!(with_four.get(with_four.upper_bound(&4)), Some(&6));

    let without_four: RbTree<i32> = [1, 2, 6].into_iter().collect();
    assert_eq!(without_four.get(without_four.lower_bound(&4)), Some(&6));
    assert_eq!(without_four.get(without_four.upper_bound(&4)), Some(&6));

    assert_eq!(with_four.lower_bound(&7), Cursor::End);
    assert_eq!(with_four.upper_bound(&6), Cursor::End);
    assert_eq!(with_four.get(with_four.lower_bound(&0)), Some(&1));
}

#[test]
fn tree_find_count_equal_range_matrix() {
    let tree: RbTree<i32> = [10, 20, 30].into_iter().collect();

    let at = tree.find(&20);
    assert_eq!(tree.get(at), Some(&20));
    assert_eq!(tree.find(&25), Cursor::End);
    assert_eq!(tree.count(&30), 1);
    assert_eq!(tree.count(&31), 0);
    assert!(tree.contains(&10));

    let (lo, hi) = tree.equal_range(&20);
    assert_eq!(lo, at);
    assert_eq!(tree.get(hi), Some(&30));

    let (lo, hi) = tree.equal_range(&25);
    assert_eq!(lo, hi);
    assert_eq!(tree.get(lo), Some(&30));

    let empty = RbTree::<i32>::new();
    assert_eq!(empty.find(&1), Cursor::End);
    assert_eq!(empty.equal_range(&1), (Cursor::End, Cursor::End));
}

#[test]
fn tree_copy_is_independent_matrix() {
    let mut a: RbTree<i32> = (0..100).collect();
    let b = a.clone();
    b.assert_valid().unwrap();

    a.insert(1000).unwrap();
    a.erase_key(&0);

    assert_eq!(b.len(), 100);
    assert_eq!(collect(&b), (0..100).collect::<Vec<_>>());
    assert_eq!(a.len(), 100);
    assert_ne!(a, b);
}

#[test]
fn tree_erase_with_two_children_keeps_other_elements_in_place_matrix() {
    let mut tree: RbTree<i32> = (1..=7).collect();
    let cursors: Vec<Cursor> = {
        let mut out = Vec::new();
        let mut at = tree.begin();
        while !at.is_end() {
            out.push(at);
            at = tree.next(at);
        }
        out
    };
    let addresses: Vec<*const i32> = cursors
        .iter()
        .map(|&c| tree.get(c).unwrap() as *const i32)
        .collect();

    let root = Cursor::Node(tree.root_index().unwrap());
    let victim = *tree.get(root).unwrap();
    let after = tree.erase(root);
    tree.assert_valid().unwrap();

    assert_eq!(tree.get(after), Some(&(victim + 1)));
    for (i, &c) in cursors.iter().enumerate() {
        let expected = i as i32 + 1;
        if expected == victim {
            continue;
        }
        let value = tree.get(c).unwrap();
        assert_eq!(*value, expected);
        assert!(std::ptr::eq(value, addresses[i]));
    }
    let expected: Vec<i32> = (1..=7).filter(|&k| k != victim).collect();
    assert_eq!(collect(&tree), expected);
}

#[test]
fn tree_duplicate_insert_is_idempotent_matrix() {
    let mut tree = RbTree::new();
    let (first, inserted) = tree.insert(42).unwrap();
    assert!(inserted);
    let (again, inserted) = tree.insert(42).unwrap();
    assert!(!inserted);
    assert_eq!(first, again);
    assert_eq!(tree.len(), 1);
    tree.assert_valid().unwrap();
}

#[test]
fn tree_hinted_insert_matrix() {
    init_logging();
    let mut tree = RbTree::new();
    for k in 0..64 {
        let at = tree.insert_hint(tree.end(), k).unwrap();
        assert_eq!(tree.get(at), Some(&k));
    }
    tree.assert_valid().unwrap();
    assert_eq!(collect(&tree), (0..64).collect::<Vec<_>>());

    let mut desc = RbTree::new();
    let mut hint = desc.end();
    for k in (0..64).rev() {
        hint = desc.insert_hint(hint, k).unwrap();
        desc.assert_valid().unwrap();
    }
    assert_eq!(desc.get(hint), Some(&0));
    assert_eq!(desc, tree);

    let mut odd: RbTree<i32> = (0..20).map(|k| k * 2 + 1).collect();
    let at_11 = odd.find(&11);
    // Good hint: 10 belongs right before 11.
    let placed = odd.insert_hint(at_11, 10).unwrap();
    assert_eq!(odd.next(placed), at_11);
    // Bad hint: 30 is far from 11.
    let placed = odd.insert_hint(at_11, 30).unwrap();
    assert_eq!(odd.get(placed), Some(&30));
    // Equal hint returns the existing element.
    assert_eq!(odd.insert_hint(at_11, 11).unwrap(), at_11);
    // Equal key elsewhere is found through the fallback search.
    let at_21 = odd.find(&21);
    assert_eq!(odd.insert_hint(at_11, 21).unwrap(), at_21);
    odd.assert_valid().unwrap();
    assert_eq!(odd.len(), 22);
}

#[test]
fn tree_reverse_cursor_matrix() {
    let tree: RbTree<i32> = [1, 2, 3].into_iter().collect();

    let mut seen = Vec::new();
    let mut r = tree.rbegin();
    while r != tree.rend() {
        seen.push(*r.get(&tree).unwrap());
        r = r.next(&tree);
    }
    assert_eq!(seen, vec![3, 2, 1]);
    assert_eq!(r.prev(&tree).get(&tree), Some(&1));
    assert_eq!(r.prev(&tree).prev(&tree).get(&tree), Some(&2));

    let empty = RbTree::<i32>::new();
    assert_eq!(empty.rbegin(), empty.rend());
    assert_eq!(empty.rbegin().get(&empty), None);
    assert_eq!(tree.iter().rev().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
}

#[test]
fn tree_prev_from_end_and_before_begin_matrix() {
    let tree: RbTree<i32> = [4, 2, 9].into_iter().collect();
    let last = tree.prev(tree.end());
    assert_eq!(tree.get(last), Some(&9));
    assert_eq!(tree.last(), Some(&9));
    assert_eq!(tree.first(), Some(&2));
    assert_eq!(tree.prev(tree.begin()), Cursor::End);
    assert_eq!(tree.next(tree.end()), Cursor::End);
    assert_eq!(tree.get(tree.end()), None);
}

#[test]
fn tree_erase_range_and_clear_matrix() {
    let mut tree: RbTree<i32> = (0..10).collect();
    let first = tree.find(&3);
    let last = tree.find(&7);
    let ret = tree.erase_range(first, last);
    assert_eq!(ret, last);
    assert_eq!(collect(&tree), vec![0, 1, 2, 7, 8, 9]);
    tree.assert_valid().unwrap();

    assert_eq!(tree.erase(tree.end()), Cursor::End);
    assert_eq!(tree.len(), 6);

    let all = tree.erase_range(tree.begin(), tree.end());
    assert_eq!(all, Cursor::End);
    assert!(tree.is_empty());
    tree.assert_valid().unwrap();

    tree.insert(5).unwrap();
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.begin(), tree.end());
    tree.assert_valid().unwrap();
}

#[test]
fn tree_erase_min_and_max_moves_cached_ends_matrix() {
    let mut tree: RbTree<i32> = (0..16).collect();
    let next = tree.erase(tree.begin());
    assert_eq!(tree.get(next), Some(&1));
    assert_eq!(tree.begin(), next);

    let max = tree.prev(tree.end());
    assert_eq!(tree.erase(max), Cursor::End);
    assert_eq!(tree.last(), Some(&14));
    tree.assert_valid().unwrap();
}

#[test]
fn tree_swap_exchanges_contents_and_keeps_cursors_matrix() {
    let mut a: RbTree<i32> = [1, 2, 3].into_iter().collect();
    let mut b: RbTree<i32> = [10, 20].into_iter().collect();
    let at_two = a.find(&2);

    a.swap(&mut b);
    assert_eq!(collect(&a), vec![10, 20]);
    assert_eq!(collect(&b), vec![1, 2, 3]);
    assert_eq!(b.get(at_two), Some(&2));
    a.assert_valid().unwrap();
    b.assert_valid().unwrap();
}

#[test]
fn tree_clone_from_replaces_contents_matrix() {
    let source: RbTree<i32> = (0..5).collect();
    let mut target: RbTree<i32> = (100..200).collect();
    target.clone_from(&source);
    assert_eq!(target, source);
    target.assert_valid().unwrap();
}

#[test]
fn tree_comparisons_matrix() {
    let a: RbTree<i32> = [1, 2, 3].into_iter().collect();
    let b: RbTree<i32> = [1, 2, 4].into_iter().collect();
    let c: RbTree<i32> = [1, 2].into_iter().collect();

    assert!(a < b);
    assert!(c < a);
    assert_eq!(a.clone(), a);
    assert_eq!(format!("{a:?}"), "{1, 2, 3}");
}

#[test]
fn tree_custom_comparator_matrix() {
    let mut tree = RbTree::with_comparator(|a: &i32, b: &i32| a > b);
    for k in [3, 1, 4, 1, 5, 9, 2, 6] {
        tree.insert(k).unwrap();
    }
    assert_eq!(
        tree.iter().copied().collect::<Vec<_>>(),
        vec![9, 6, 5, 4, 3, 2, 1]
    );
    assert_eq!(tree.get(tree.lower_bound(&7)), Some(&6));
    tree.assert_valid().unwrap();
}

#[test]
fn tree_owned_iteration_matrix() {
    let tree: RbTree<String> = ["b", "c", "a"].into_iter().map(String::from).collect();
    let owned: Vec<String> = tree.into_iter().collect();
    assert_eq!(owned, vec!["a", "b", "c"]);
}

#[test]
fn tree_freed_slots_are_reused_matrix() {
    let mut tree: RbTree<i32> = (0..8).collect();
    let at = tree.find(&3);
    tree.erase(at);
    let (reused, _) = tree.insert(100).unwrap();
    assert_eq!(reused, at);
    tree.assert_valid().unwrap();
}
