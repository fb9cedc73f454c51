//! Collection store integration tests
//!
//! Wishlist/cart persistence across store instances ("pages") sharing one
//! local storage area.

use std::rc::Rc;

use fggate::collection::{CollectionKind, PersistentCollectionStore};
use fggate::storage::{FileStorage, MemoryStorage, Storage};
use pretty_assertions::assert_eq;

fn hydrated<S: Storage>(kind: CollectionKind, storage: S) -> PersistentCollectionStore<S> {
    let mut store = PersistentCollectionStore::for_kind(kind, storage);
    store.hydrate();
    store
}

// =============================================================================
// Algebraic properties
// =============================================================================

mod property_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const IDS: [&str; 4] = ["sku-1", "sku-2", "loan-12m", ""];

    #[test]
    fn test_add_is_idempotent() {
        for id in IDS {
            let local = MemoryStorage::new();
            let mut cart = hydrated(CollectionKind::Cart, &local);
            cart.add("existing");

            cart.add(id);
            let count = cart.count();
            cart.add(id);
            assert_eq!(cart.count(), count);
            assert!(cart.contains(id));
        }
    }

    #[test]
    fn test_add_then_remove_restores() {
        for id in IDS {
            let local = MemoryStorage::new();
            let mut wishlist = hydrated(CollectionKind::Wishlist, &local);
            wishlist.add("keep");
            let before = wishlist.count();

            wishlist.add(id);
            wishlist.remove(id);
            assert!(!wishlist.contains(id));
            assert_eq!(wishlist.count(), before);
        }
    }

    #[test]
    fn test_double_toggle_is_noop() {
        for start_with in [false, true] {
            let local = MemoryStorage::new();
            let mut cart = hydrated(CollectionKind::Cart, &local);
            cart.add("a");
            if start_with {
                cart.add("b");
            }
            let before = cart.items().to_vec();

            let first = cart.toggle("b");
            let second = cart.toggle("b");
            assert_eq!(first, !start_with);
            assert_eq!(second, start_with);
            assert_eq!(cart.items(), before.as_slice());
        }
    }

    #[test]
    fn test_count_matches_distinct_ids() {
        let local = MemoryStorage::new();
        let mut cart = hydrated(CollectionKind::Cart, &local);
        for id in ["a", "b", "a", "c", "b"] {
            cart.add(id);
        }
        assert_eq!(cart.count(), 3);
    }
}

// =============================================================================
// Persistence across pages
// =============================================================================

mod persistence_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_preserves_insertion_order() {
        let local = Rc::new(MemoryStorage::new());
        let mut wishlist = hydrated(CollectionKind::Wishlist, Rc::clone(&local));
        for id in ["loan-c", "loan-a", "loan-b"] {
            wishlist.add(id);
        }

        let next_page = hydrated(CollectionKind::Wishlist, Rc::clone(&local));
        assert_eq!(next_page.items(), wishlist.items());
    }

    #[test]
    fn test_wishlist_and_cart_are_independent() {
        let local = MemoryStorage::new();
        let mut wishlist = hydrated(CollectionKind::Wishlist, &local);
        let mut cart = hydrated(CollectionKind::Cart, &local);

        wishlist.add("loan-a");
        cart.add("sku-1");
        cart.clear();

        let wishlist_again = hydrated(CollectionKind::Wishlist, &local);
        assert_eq!(wishlist_again.items(), &["loan-a".to_string()]);
        assert_eq!(hydrated(CollectionKind::Cart, &local).count(), 0);
    }

    #[test]
    fn test_fresh_cart_scenario() {
        let dir = TempDir::new().unwrap();
        let local = FileStorage::open(dir.path().join("local.json"));

        let mut cart = PersistentCollectionStore::for_kind(CollectionKind::Cart, &local);
        cart.hydrate();
        assert!(!cart.contains("sku-1"));

        cart.add("sku-1");
        assert!(cart.contains("sku-1"));
        assert_eq!(cart.count(), 1);

        let reloaded = hydrated(CollectionKind::Cart, FileStorage::open(local.path()));
        assert_eq!(reloaded.count(), 1);
    }

    #[test]
    fn test_early_render_does_not_erase_durable_state() {
        let local = MemoryStorage::new();
        {
            let mut cart = hydrated(CollectionKind::Cart, &local);
            cart.add("sku-1");
            cart.add("sku-2");
        }

        // Next page: first render happens before hydration
        let mut cart = PersistentCollectionStore::for_kind(CollectionKind::Cart, &local);
        assert_eq!(cart.count(), 0);
        cart.add("sku-3");
        assert_eq!(
            local.get_item("cart").unwrap().as_deref(),
            Some(r#"["sku-1","sku-2"]"#)
        );

        let revision = cart.revision();
        cart.hydrate();
        assert!(cart.revision() > revision);
        assert_eq!(
            cart.items(),
            &["sku-1".to_string(), "sku-2".to_string(), "sku-3".to_string()]
        );
        assert_eq!(
            local.get_item("cart").unwrap().as_deref(),
            Some(r#"["sku-1","sku-2","sku-3"]"#)
        );
    }

    #[test]
    fn test_two_tabs_last_writer_wins() {
        let local = MemoryStorage::new();
        let mut tab_a = hydrated(CollectionKind::Wishlist, &local);
        let mut tab_b = hydrated(CollectionKind::Wishlist, &local);

        tab_a.add("from-a");
        tab_b.add("from-b");

        let reader = hydrated(CollectionKind::Wishlist, &local);
        assert_eq!(reader.items(), &["from-b".to_string()]);
    }
}

// =============================================================================
// Degraded storage
// =============================================================================

mod degraded_storage_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_corrupt_values_hydrate_empty() {
        for raw in ["{", "null", "42", r#"{"ids":[]}"#, r#"["ok", 1]"#] {
            let local = MemoryStorage::with_items([("cart", raw)]);
            let cart = hydrated(CollectionKind::Cart, &local);
            assert!(cart.is_hydrated());
            assert_eq!(cart.count(), 0, "{raw}");
        }
    }

    #[test]
    fn test_corrupt_value_is_replaced_on_first_write() {
        let local = MemoryStorage::with_items([("cart", "{")]);
        let mut cart = hydrated(CollectionKind::Cart, &local);
        cart.add("sku-1");
        assert_eq!(
            local.get_item("cart").unwrap().as_deref(),
            Some(r#"["sku-1"]"#)
        );
    }

    #[test]
    fn test_corrupt_file_is_replaced_for_the_next_page() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("local.json");
        std::fs::write(&path, "{not json").unwrap();

        let mut cart = hydrated(CollectionKind::Cart, FileStorage::open(&path));
        assert_eq!(cart.count(), 0);
        cart.add("sku-1");

        let next_page = hydrated(CollectionKind::Cart, FileStorage::open(&path));
        assert_eq!(next_page.items(), &["sku-1".to_string()]);
    }

    #[test]
    fn test_storage_recovering_after_hydration() {
        let local = MemoryStorage::unavailable();
        let mut cart = hydrated(CollectionKind::Cart, &local);
        cart.add("sku-1");

        local.set_available(true);
        cart.add("sku-2");
        assert_eq!(
            local.get_item("cart").unwrap().as_deref(),
            Some(r#"["sku-1","sku-2"]"#)
        );
    }
}
