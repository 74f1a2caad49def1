use ordered_tree::OrderedTree;

use std::collections::{HashMap, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a hashmap.
/// This way we can ensure that after a random smattering of inserts
/// and removes we have the same set of keys in the map.
fn do_ops<K, V>(ops: &[Op<K, V>], bst: &mut OrderedTree<K, V>, map: &mut HashMap<K, V>)
where
    K: std::hash::Hash + Eq + Clone + Ord,
    V: Clone,
{
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                bst.insert(k.clone(), v.clone());
                map.insert(k.clone(), v.clone());
            }
            Op::Remove(k) => {
                bst.remove(k);
                map.remove(k);
            }
        }
    }
}

fn in_order_keys<K: Clone, V>(tree: &mut OrderedTree<K, V>) -> Vec<K> {
    let mut keys = Vec::new();
    tree.in_order_traversal(|key, _| keys.push(key.clone()));
    keys
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
    let mut tree = OrderedTree::new();
    let mut map = HashMap::new();

    do_ops(&ops, &mut tree, &mut map);
    tree.size() == map.len()
        && map
            .iter()
            .all(|(key, value)| tree.search(key) == Some((key, value)))
}

#[quickcheck]
fn in_order_is_strictly_ascending(ops: Vec<Op<i16, u8>>) -> bool {
    let mut tree = OrderedTree::new();
    let mut map = HashMap::new();

    do_ops(&ops, &mut tree, &mut map);
    let keys = in_order_keys(&mut tree);
    keys.windows(2).all(|pair| pair[0] < pair[1]) && tree.validate().is_ok()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = OrderedTree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }

    xs.iter().all(|x| tree.search(x) == Some((x, x)))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = OrderedTree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.search(x).is_none())
}

#[quickcheck]
fn overwrite_keeps_size(xs: Vec<i8>, key: i8, first: u8, second: u8) -> bool {
    let mut tree: OrderedTree<i8, u8> = xs.iter().map(|&x| (x, 0)).collect();

    tree.insert(key, first);
    let size = tree.size();
    tree.insert(key, second);

    tree.size() == size && tree.search(&key) == Some((&key, &second))
}

#[quickcheck]
fn size_and_height_agree_with_traversal(xs: Vec<i8>) -> bool {
    let mut tree: OrderedTree<i8, i8> = xs.iter().map(|&x| (x, x)).collect();

    let mut visited = 0;
    tree.in_order_traversal(|_, _| visited += 1);

    let distinct = xs.iter().collect::<HashSet<_>>().len();
    tree.size() == visited
        && visited == distinct
        && tree.height() <= tree.size()
        && (tree.size() == 0) == (tree.height() == 0)
}

#[quickcheck]
fn every_traversal_visits_each_entry_once(xs: Vec<i8>) -> bool {
    let mut tree: OrderedTree<i8, i8> = xs.iter().map(|&x| (x, x)).collect();
    let expected = in_order_keys(&mut tree);

    let mut pre = Vec::new();
    tree.pre_order_traversal(|key, _| pre.push(*key));
    let mut post = Vec::new();
    tree.post_order_traversal(|key, _| post.push(*key));
    let mut level = Vec::new();
    tree.level_order_traversal(|key, _| level.push(*key));

    [pre, post, level].iter_mut().all(|keys| {
        keys.sort_unstable();
        *keys == expected
    })
}

#[quickcheck]
fn with_removals(xs: Vec<i8>, removes: Vec<i8>) -> bool {
    let mut tree = OrderedTree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }
    for remove in &removes {
        tree.remove(remove);
    }

    let mut still_present = xs;
    for remove in &removes {
        // We may have inserted the same value multiple times - remove each one.
        while let Some(pos) = still_present.iter().position(|x| x == remove) {
            still_present.swap_remove(pos);
        }
    }

    removes.iter().all(|x| tree.search(x).is_none())
        && still_present.iter().all(|x| tree.search(x).is_some())
        && tree.validate().is_ok()
}

#[quickcheck]
fn removing_everything_empties_the_tree(xs: Vec<i8>) -> bool {
    let mut tree: OrderedTree<i8, i8> = xs.iter().map(|&x| (x, x)).collect();
    for x in &xs {
        tree.remove(x);
    }

    tree.size() == 0
        && tree.height() == 0
        && tree.is_empty()
        && tree.minimum().is_none()
        && tree.maximum().is_none()
}
