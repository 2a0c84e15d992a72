use std::collections::BTreeMap;

use cskl_skip_list::skip_list::{SkipList, SkipListBuilder};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(u16, u32),
    Remove(u16),
    Search(u16),
    Update(u16, u32),
    RemoveFirst,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..128u16, any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => (0..128u16).prop_map(Op::Remove),
        2 => (0..128u16).prop_map(Op::Search),
        1 => (0..128u16, any::<u32>()).prop_map(|(k, v)| Op::Update(k, v)),
        1 => Just(Op::RemoveFirst),
    ]
}

fn build(max_level: usize, probability: f64, seed: u64) -> SkipList<u16, u32> {
    SkipListBuilder::default()
        .set_max_level(max_level)
        .set_probability(probability)
        .set_seed(seed)
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]
    #[test]
    fn test_matches_btree_map(
        ops in prop::collection::vec(op_strategy(), 0..400),
        max_level in 1..20usize,
        probability in 0.05..=1.0f64,
        seed in any::<u64>(),
    ) {
        let list = build(max_level, probability, seed);
        let mut model = BTreeMap::new();
        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let entry = list.insert(k, v);
                    model.insert(k, v);
                    prop_assert_eq!(entry.into_inner(), (k, v));
                }
                Op::Remove(k) => {
                    let removed = list.remove(&k).map(|e| e.into_inner());
                    prop_assert_eq!(removed, model.remove(&k).map(|v| (k, v)));
                }
                Op::Search(k) => {
                    let found = list.search(&k).map(|e| e.into_inner());
                    prop_assert_eq!(found, model.get(&k).map(|v| (k, *v)));
                    prop_assert_eq!(list.contains(&k), model.contains_key(&k));
                }
                Op::Update(k, v) => {
                    let updated = list.update(k, v).map(|e| e.into_inner());
                    let expected = model.get_mut(&k).map(|slot| {
                        *slot = v;
                        (k, v)
                    });
                    prop_assert_eq!(updated, expected);
                }
                Op::RemoveFirst => {
                    let removed = list.remove_first().map(|e| e.into_inner());
                    prop_assert_eq!(removed, model.pop_first());
                }
            }
            prop_assert_eq!(list.len(), model.len());
            prop_assert_eq!(list.is_empty(), model.is_empty());
        }
        let entries: Vec<(u16, u32)> = list.to_vec().into_iter().map(|e| e.into_inner()).collect();
        let expected: Vec<(u16, u32)> = model.into_iter().collect();
        prop_assert_eq!(entries, expected);
        prop_assert!(list.height() <= max_level);
    }

    #[test]
    fn test_filter_matches_model(keys in prop::collection::btree_set(any::<u32>(), 0..300)) {
        let list = SkipList::new();
        for k in &keys {
            list.insert(*k, k.count_ones());
        }
        let odd: Vec<u32> = list
            .filter(|_, ones| ones % 2 == 1)
            .into_iter()
            .map(|e| *e.key())
            .collect();
        let expected: Vec<u32> = keys.iter().copied().filter(|k| k.count_ones() % 2 == 1).collect();
        prop_assert_eq!(odd, expected);
        prop_assert_eq!(list.first().map(|e| *e.key()), keys.first().copied());
    }
}
