use super::edge::Edge;
use super::RadixSet;

use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

#[derive(Debug, Clone)]
enum Op {
    Insert(String),
    Contains(String, bool),
    Remove(String, bool),
}

// A tiny alphabet keeps shared prefixes, splits and merges frequent.
fn key() -> impl Strategy<Value = String> {
    "[abc]{0,6}"
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => key().prop_map(Op::Insert),
        2 => (key(), any::<bool>()).prop_map(|(k, p)| Op::Contains(k, p)),
        2 => (key(), any::<bool>()).prop_map(|(k, p)| Op::Remove(k, p)),
    ]
}

fn collect_members(children: &[Edge], path: &mut Vec<u8>, out: &mut BTreeSet<Vec<u8>>) {
    for edge in children {
        let added = edge.label().len();
        path.extend_from_slice(edge.label().bytes());

        if edge.is_final() {
            assert!(out.insert(path.clone()), "member spelled twice: {:?}", path);
        }
        collect_members(edge.children(), path, out);

        let new_len = path.len() - added;
        path.truncate(new_len);
    }
}

fn validate_edges(children: &[Edge]) {
    let mut first_bytes = HashSet::new();

    for edge in children {
        let label = edge.label().bytes();
        assert!(!label.is_empty(), "empty edge label");
        assert!(
            first_bytes.insert(label[0]),
            "siblings share a prefix starting with {:?}",
            label[0] as char
        );
        assert!(
            edge.is_final() || edge.children().len() >= 2,
            "non-final edge {:?} with {} children was not merged",
            edge.label().to_string(),
            edge.children().len()
        );

        validate_edges(edge.children());
    }
}

fn validate_set(set: &RadixSet, model: &BTreeSet<Vec<u8>>) {
    validate_edges(set.root());

    let mut members = BTreeSet::new();
    collect_members(set.root(), &mut Vec::new(), &mut members);

    assert_eq!(&members, model);
    assert_eq!(set.len(), model.len());
}

fn model_contains(model: &BTreeSet<Vec<u8>>, key: &[u8], as_prefix: bool) -> bool {
    if key.is_empty() {
        return true;
    }
    if as_prefix {
        model.iter().any(|member| member.starts_with(key))
    } else {
        model.contains(key)
    }
}

fn model_remove(model: &mut BTreeSet<Vec<u8>>, key: &[u8], as_prefix: bool) -> bool {
    if key.is_empty() {
        if as_prefix {
            model.clear();
        }
        return as_prefix;
    }
    if as_prefix {
        let before = model.len();
        model.retain(|member| !member.starts_with(key));
        model.len() != before
    } else {
        model.remove(key)
    }
}

proptest! {
    #[test]
    fn matches_btreeset_model(ops in prop::collection::vec(op(), 0..200)) {
        let mut set = RadixSet::new();
        let mut model = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(k) => {
                    let expected = !k.is_empty() && model.insert(k.clone().into_bytes());
                    prop_assert_eq!(set.insert(&k), expected, "insert {:?}", k);
                }
                Op::Contains(k, as_prefix) => {
                    prop_assert_eq!(
                        set.contains(&k, as_prefix),
                        model_contains(&model, k.as_bytes(), as_prefix),
                        "contains {:?} (prefix: {})", k, as_prefix
                    );
                }
                Op::Remove(k, as_prefix) => {
                    prop_assert_eq!(
                        set.remove(&k, as_prefix),
                        model_remove(&mut model, k.as_bytes(), as_prefix),
                        "remove {:?} (prefix: {})", k, as_prefix
                    );
                }
            }

            validate_set(&set, &model);
        }
    }

    #[test]
    fn inserted_keys_are_members(keys in prop::collection::vec("[a-d]{1,8}", 1..64)) {
        let set: RadixSet = keys.iter().collect();

        for k in keys.iter() {
            prop_assert!(set.contains(k, false));
            prop_assert!(set.contains(k, true));
            for end in 0..k.len() {
                prop_assert!(set.contains(&k[..end], true));
            }
        }
    }

    #[test]
    fn removing_everything_leaves_empty_tree(keys in prop::collection::vec("[a-d]{1,8}", 1..64)) {
        let mut set: RadixSet = keys.iter().collect();

        for k in keys.iter() {
            set.remove(k, false);
            prop_assert!(!set.contains(k, false));
        }

        prop_assert!(set.is_empty());
        prop_assert!(set.root().is_empty());
    }
}
