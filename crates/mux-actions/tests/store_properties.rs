//! Property-based invariant tests for the quick action store.
//!
//! Verifies:
//! 1. after any reorder, sort orders are 0..N-1 in list order
//! 2. reorder only permutes, never adds or drops actions
//! 3. enabled_actions is sorted and contains no disabled entries

use mux_actions::{QuickAction, QuickActionStore, QUICK_ACTIONS_INITIALIZED_KEY};
use mux_core::{MemoryStore, PreferenceStoreExt};
use proptest::prelude::*;

fn populated<'a>(prefs: &'a MemoryStore, enabled: &[bool]) -> QuickActionStore<&'a MemoryStore> {
    prefs.set_flag(QUICK_ACTIONS_INITIALIZED_KEY, true).unwrap();
    let mut store = QuickActionStore::load(prefs);
    for (i, on) in enabled.iter().enumerate() {
        let name = format!("action-{}", i);
        store.add(QuickAction::new(name.clone(), "star", "#FFFFFF", name).with_enabled(*on));
    }
    store
}

proptest! {
    #[test]
    fn reorder_keeps_dense_orders(
        enabled in prop::collection::vec(any::<bool>(), 1..10),
        from in prop::collection::vec(0usize..12, 0..5),
        to in 0usize..12,
    ) {
        let prefs = MemoryStore::new();
        let mut store = populated(&prefs, &enabled);
        let mut before: Vec<_> = store.actions().iter().map(|a| a.id).collect();

        store.reorder(&from, to);

        let orders: Vec<i32> = store.actions().iter().map(|a| a.sort_order).collect();
        let expected: Vec<i32> = (0..store.len() as i32).collect();
        prop_assert_eq!(orders, expected);

        let mut after: Vec<_> = store.actions().iter().map(|a| a.id).collect();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn enabled_actions_sorted_and_enabled(
        enabled in prop::collection::vec(any::<bool>(), 0..10),
        toggles in prop::collection::vec(0usize..10, 0..6),
        moves in prop::collection::vec((0usize..10, 0usize..11), 0..4),
    ) {
        let prefs = MemoryStore::new();
        let mut store = populated(&prefs, &enabled);

        for index in toggles {
            if let Some(id) = store.actions().get(index).map(|a| a.id) {
                store.toggle_enabled(id);
            }
        }
        for (from, to) in moves {
            store.reorder(&[from], to);
        }

        let visible = store.enabled_actions();
        prop_assert!(visible.iter().all(|a| a.is_enabled));
        prop_assert!(visible.windows(2).all(|w| w[0].sort_order < w[1].sort_order));
        let expected = store.actions().iter().filter(|a| a.is_enabled).count();
        prop_assert_eq!(visible.len(), expected);
    }
}
