use avl_tree::{AvlTree, TreeError};
use simplelog::{Config, LevelFilter, SimpleLogger};

fn init_logging() {
    let _ = SimpleLogger::init(LevelFilter::Trace, Config::default());
}

fn tree_of(keys: &[i32]) -> AvlTree<i32, String> {
    let mut tree = AvlTree::new();
    for &k in keys {
        tree.insert(k, format!("v{k}")).unwrap();
        tree.assert_valid().unwrap();
    }
    tree
}

fn render<K, V, C>(tree: &AvlTree<K, V, C>) -> String
where
    K: std::fmt::Display,
    V: std::fmt::Display,
    C: Fn(&K, &K) -> i32,
{
    let mut out = Vec::new();
    tree.print(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn height_bound(n: usize) -> f64 {
    1.44 * ((n + 2) as f64).log2() - 0.328
}

const BALANCED_10_20_30: &str = "\
.Key: 10 Value: v10
Key: 20 Value: v20 (root)
.Key: 30 Value: v30
";

#[test]
fn empty_tree_matrix() {
    let tree = AvlTree::<i32, i32>::new();
    assert!(tree.is_empty());
    assert_eq!(tree.size(), 0);
    assert_eq!(tree.height(), 0);
    assert!(!tree.contains(&1));
    assert_eq!(tree.get(&1), None);
    assert_eq!(tree.first(), None);
    assert_eq!(tree.last(), None);
    assert_eq!(tree.keys().count(), 0);
    assert_eq!(tree.iter().next(), None);
    assert_eq!(render(&tree), "");
    assert_eq!(format!("{tree:?}"), "∅");
    tree.assert_valid().unwrap();
}

#[test]
fn single_root_matrix() {
    let tree = tree_of(&[7]);
    assert!(!tree.is_empty());
    assert_eq!(tree.size(), 1);
    assert_eq!(tree.height(), 0);
    assert_eq!(tree.get(&7).map(String::as_str), Some("v7"));
    assert_eq!(render(&tree), "Key: 7 Value: v7 (root)\n");
}

#[test]
fn ascending_triple_rotates_left_matrix() {
    init_logging();
    let tree = tree_of(&[10, 20, 30]);
    assert_eq!(tree.height(), 1);
    assert_eq!(render(&tree), BALANCED_10_20_30);
}

#[test]
fn descending_triple_rotates_right_matrix() {
    let tree = tree_of(&[30, 20, 10]);
    assert_eq!(tree.height(), 1);
    assert_eq!(render(&tree), BALANCED_10_20_30);
}

#[test]
fn left_right_triple_matrix() {
    let tree = tree_of(&[30, 10, 20]);
    assert_eq!(tree.height(), 1);
    assert_eq!(render(&tree), BALANCED_10_20_30);
}

#[test]
fn right_left_triple_matrix() {
    let tree = tree_of(&[10, 30, 20]);
    assert_eq!(tree.height(), 1);
    assert_eq!(render(&tree), BALANCED_10_20_30);
}

#[test]
fn fifty_ascending_keys_matrix() {
    let keys: Vec<i32> = (1..=50).collect();
    let tree = tree_of(&keys);
    assert_eq!(tree.size(), 50);
    assert!((tree.height() as f64) <= height_bound(50));
    assert_eq!(tree.height(), 5);
    assert_eq!(tree.keys().copied().collect::<Vec<_>>(), keys);
}

#[test]
fn deep_rebalance_matrix() {
    // Exercises rotations below the root as well as at it.
    let keys = [50, 25, 75, 10, 30, 60, 80, 5, 15, 27, 1, 2, 3, 4, 28, 29, 26];
    let tree = tree_of(&keys);
    let mut sorted = keys.to_vec();
    sorted.sort_unstable();
    assert_eq!(tree.keys().copied().collect::<Vec<_>>(), sorted);
    assert!((tree.height() as f64) <= height_bound(keys.len()));
}

#[test]
fn lookup_matrix() {
    let tree = tree_of(&[8, 3, 10, 1, 6, 14, 4, 7, 13]);
    for k in [8, 3, 10, 1, 6, 14, 4, 7, 13] {
        assert!(tree.contains(&k));
        assert_eq!(tree.get(&k), Some(&format!("v{k}")));
    }
    for k in [0, 2, 5, 9, 11, 12, 15] {
        assert!(!tree.contains(&k));
        assert_eq!(tree.get(&k), None);
    }
    assert_eq!(tree.first().map(|(k, _)| *k), Some(1));
    assert_eq!(tree.last().map(|(k, _)| *k), Some(14));
}

#[test]
fn duplicate_key_is_rejected_matrix() {
    init_logging();
    let mut tree = AvlTree::new();
    tree.insert(5, "first").unwrap();
    tree.insert(3, "three").unwrap();
    assert_eq!(tree.insert(5, "second"), Err(TreeError::DuplicateKey));
    assert_eq!(tree.insert(3, "again"), Err(TreeError::DuplicateKey));
    assert_eq!(tree.size(), 2);
    assert_eq!(tree.get(&5), Some(&"first"));
    assert_eq!(tree.get(&3), Some(&"three"));
    tree.assert_valid().unwrap();
}

#[test]
fn unordered_key_is_rejected_matrix() {
    let mut tree = AvlTree::<f64, ()>::new();
    assert_eq!(tree.insert(f64::NAN, ()), Err(TreeError::UnorderedKey));
    assert!(tree.is_empty());

    tree.insert(1.5, ()).unwrap();
    tree.insert(-0.5, ()).unwrap();
    assert_eq!(tree.insert(f64::NAN, ()), Err(TreeError::UnorderedKey));
    assert_eq!(tree.size(), 2);
    assert!(!tree.contains(&f64::NAN));
    assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![-0.5, 1.5]);
    tree.assert_valid().unwrap();
}

/// Bitset ordered by inclusion, so `0b011` and `0b100` are incomparable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Bits(u8);

impl PartialOrd for Bits {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        use std::cmp::Ordering;
        if self.0 == other.0 {
            Some(Ordering::Equal)
        } else if self.0 & other.0 == self.0 {
            Some(Ordering::Less)
        } else if self.0 & other.0 == other.0 {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

#[test]
fn incomparable_keys_are_rejected_matrix() {
    init_logging();
    let mut tree = AvlTree::new();
    let results: Vec<_> = [0b011, 0b100, 0b001, 0b110, 0b010]
        .into_iter()
        .map(|b| tree.insert(Bits(b), b))
        .collect();
    assert_eq!(
        results,
        vec![
            Ok(()),
            Err(TreeError::UnorderedKey),
            Ok(()),
            Err(TreeError::UnorderedKey),
            Err(TreeError::UnorderedKey),
        ]
    );
    tree.assert_valid().unwrap();
    assert_eq!(tree.size(), 2);
    assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![Bits(0b001), Bits(0b011)]);
    assert!(!tree.contains(&Bits(0b100)));

    tree.insert(Bits(0b111), 0b111).unwrap();
    tree.insert(Bits(0b000), 0).unwrap();
    tree.assert_valid().unwrap();
    assert_eq!(tree.size(), 4);
}

#[test]
fn error_messages_matrix() {
    assert_eq!(
        TreeError::DuplicateKey.to_string(),
        "key already present in tree"
    );
    assert_eq!(
        TreeError::UnorderedKey.to_string(),
        "key has no total order under the comparator"
    );
}

#[test]
fn reverse_comparator_matrix() {
    let mut tree = AvlTree::with_comparator(|a: &i32, b: &i32| b - a);
    for k in 0..20 {
        tree.insert(k, ()).unwrap();
        tree.assert_valid().unwrap();
    }
    let keys: Vec<i32> = tree.keys().copied().collect();
    assert_eq!(keys, (0..20).rev().collect::<Vec<_>>());
    assert_eq!(tree.first().map(|(k, _)| *k), Some(19));
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Pair(i32, i32);

#[test]
fn custom_comparator_on_struct_keys_matrix() {
    let cmp = |a: &Pair, b: &Pair| {
        let dx = a.0 - b.0;
        if dx == 0 {
            a.1 - b.1
        } else {
            dx
        }
    };
    let mut tree = AvlTree::with_comparator(cmp);
    tree.insert(Pair(0, 1), "b").unwrap();
    tree.insert(Pair(0, 0), "a").unwrap();
    tree.insert(Pair(2, 3), "c").unwrap();
    tree.insert(Pair(3, 3), "d").unwrap();
    assert_eq!(tree.insert(Pair(0, 0), "x"), Err(TreeError::DuplicateKey));
    assert_eq!(tree.size(), 4);
    assert_eq!(tree.get(&Pair(0, 0)), Some(&"a"));
    assert!(!tree.contains(&Pair(1, 0)));
    let values: Vec<&str> = tree.iter().map(|(_, v)| *v).collect();
    assert_eq!(values, vec!["a", "b", "c", "d"]);
}

#[test]
fn iteration_matrix() {
    let tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);

    let keys = tree.keys();
    assert_eq!(keys.len(), 7);
    assert_eq!(keys.rev().copied().collect::<Vec<_>>(), vec![7, 6, 5, 4, 3, 2, 1]);

    let mut iter = tree.iter();
    assert_eq!(iter.len(), 7);
    assert_eq!(iter.next(), Some((&1, &"v1".to_string())));
    assert_eq!(iter.len(), 6);

    let mut seen = Vec::new();
    for (k, v) in &tree {
        assert_eq!(v, &format!("v{k}"));
        seen.push(*k);
    }
    assert_eq!(seen, (1..=7).collect::<Vec<_>>());
}

#[test]
fn print_marks_depth_matrix() {
    let tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
    let expected = "\
..Key: 1 Value: v1
.Key: 2 Value: v2
..Key: 3 Value: v3
Key: 4 Value: v4 (root)
..Key: 5 Value: v5
.Key: 6 Value: v6
..Key: 7 Value: v7
";
    assert_eq!(render(&tree), expected);
    assert_eq!(tree.to_string(), expected);
}

#[test]
fn debug_dump_matrix() {
    let mut tree = AvlTree::new();
    tree.insert(2, 'b').unwrap();
    tree.insert(1, 'a').unwrap();
    assert_eq!(
        format!("{tree:?}"),
        "Node[0] [h=2] { 2 = 'b' }\n├─ Node[1] [h=1] { 1 = 'a' }\n└─ ∅"
    );
}
