//! Property-based tests for checklist positions

use ponta_solta::backend::store::{ChecklistRepository, MemoryStore};
use ponta_solta::shared::kanban::{next_position, ChecklistItem};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_next_position_follows_max(max in proptest::option::of(any::<i32>())) {
        let next = next_position(max);
        match max {
            Some(i32::MAX) => prop_assert_eq!(next, None),
            Some(max) => prop_assert_eq!(next, Some(max + 1)),
            None => prop_assert_eq!(next, Some(0)),
        }
    }

    #[test]
    fn test_appended_item_sorts_last(positions in proptest::collection::vec(0..500i32, 0..20)) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        runtime.block_on(async {
            let store = MemoryStore::new();
            for (i, position) in positions.iter().enumerate() {
                store
                    .insert_item(&ChecklistItem::new("card", format!("item {}", i), *position))
                    .await
                    .unwrap();
            }

            let position = next_position(store.max_position("card").await.unwrap()).unwrap();
            let item = ChecklistItem::new("card", "new", position);
            store.insert_item(&item).await.unwrap();

            let listed = store.list_items("card").await.unwrap();
            assert_eq!(listed.last().map(|i| i.id.as_str()), Some(item.id.as_str()));
        });
    }
}
