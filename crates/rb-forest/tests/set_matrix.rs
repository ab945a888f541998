use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rb_forest::{Cursor, RbSet};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn set_insert_lookup_matrix() {
    let mut set = RbSet::new();
    for k in [8, 3, 10, 1, 6, 14, 4, 7, 13] {
        assert!(set.insert(k).unwrap().1);
    }
    assert!(!set.insert(6).unwrap().1);
    assert_eq!(set.len(), 9);

    assert!(set.contains(&13));
    assert!(!set.contains(&2));
    assert_eq!(set.count(&4), 1);
    assert_eq!(set.get(set.find(&7)), Some(&7));
    assert_eq!(set.find(&2), Cursor::End);
    assert_eq!(set.first(), Some(&1));
    assert_eq!(set.last(), Some(&14));
    set.assert_valid().unwrap();
}

#[test]
fn set_bounds_matrix() {
    let set: RbSet<i32> = [10, 20, 30, 40].into();
    assert_eq!(set.get(set.lower_bound(&20)), Some(&20));
    assert_eq!(set.get(set.upper_bound(&20)), Some(&30));
    assert_eq!(set.get(set.lower_bound(&25)), Some(&30));
    assert_eq!(set.lower_bound(&41), set.end());

    let (lo, hi) = set.equal_range(&40);
    assert_eq!(set.get(lo), Some(&40));
    assert_eq!(hi, Cursor::End);

    let mid: Vec<i32> = set
        .range(set.lower_bound(&15), set.lower_bound(&35))
        .copied()
        .collect();
    assert_eq!(mid, vec![20, 30]);
}

#[test]
fn set_erase_surface_matrix() {
    let mut set: RbSet<u32> = (0..50).collect();
    assert_eq!(set.erase_key(&10), 1);
    assert_eq!(set.erase_key(&10), 0);

    let at = set.find(&20);
    let next = set.erase(at);
    assert_eq!(set.get(next), Some(&21));

    let from = set.find(&30);
    let ret = set.erase_range(from, set.end());
    assert_eq!(ret, Cursor::End);
    assert_eq!(set.len(), 28);
    assert_eq!(set.last(), Some(&29));
    set.assert_valid().unwrap();
}

#[test]
fn set_hinted_bulk_load_matrix() {
    let mut set = RbSet::new();
    set.insert_iter((0..500).map(|k| k * 3)).unwrap();
    assert_eq!(set.len(), 500);
    set.assert_valid().unwrap();

    let mut hint = set.find(&300);
    for k in [299, 298, 297] {
        hint = set.insert_hint(hint, k).unwrap();
    }
    // 297 is already present.
    assert_eq!(set.len(), 502);
    assert_eq!(set.get(hint), Some(&297));
    set.assert_valid().unwrap();
}

#[test]
fn set_iteration_and_reverse_matrix() {
    let set: RbSet<&str> = ["pear", "apple", "fig"].into();
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec!["apple", "fig", "pear"]);
    assert_eq!(set.iter().rev().copied().collect::<Vec<_>>(), vec!["pear", "fig", "apple"]);
    assert_eq!(set.iter().len(), 3);

    let mut r = set.rbegin();
    let mut seen = Vec::new();
    while r != set.rend() {
        seen.push(*r.get(&set).unwrap());
        r = r.next(&set);
    }
    assert_eq!(seen, vec!["pear", "fig", "apple"]);

    let borrowed: Vec<&&str> = (&set).into_iter().collect();
    assert_eq!(borrowed.len(), 3);
}

#[test]
fn set_equality_order_and_hash_matrix() {
    let a: RbSet<i32> = [3, 1, 2].into();
    let b: RbSet<i32> = [1, 2, 3].into();
    let c: RbSet<i32> = [1, 2, 4].into();

    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert!(a < c);
    assert_eq!(a.cmp(&c), std::cmp::Ordering::Less);
    assert_eq!(format!("{a:?}"), "{1, 2, 3}");
}

#[test]
fn set_clone_swap_and_take_matrix() {
    let mut a: RbSet<String> = ["x", "y"].into_iter().map(String::from).collect();
    let mut b = a.try_clone().unwrap();
    assert_eq!(a, b);

    assert_eq!(a.take(&"x".to_string()), Some("x".to_string()));
    assert_eq!(b.len(), 2);

    a.swap(&mut b);
    assert_eq!(a.len(), 2);
    assert_eq!(b.iter().cloned().collect::<Vec<_>>(), vec!["y".to_string()]);

    let owned: Vec<String> = a.into_iter().collect();
    assert_eq!(owned, vec!["x".to_string(), "y".to_string()]);
}

#[test]
fn set_descending_comparator_matrix() {
    let mut set = RbSet::with_comparator(|a: &i64, b: &i64| b < a);
    set.extend([5, -2, 11, 0]);
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![11, 5, 0, -2]);
    assert_eq!(set.get(set.upper_bound(&5)), Some(&0));
    assert!(set.key_comp()(&3, &2));
    set.assert_valid().unwrap();
}
