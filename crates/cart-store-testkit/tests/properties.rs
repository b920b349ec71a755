//! Property tests over random operation sequences, plus fault-injection
//! scenarios built on the testkit backend.

use proptest::prelude::*;

use cart_store::{CartStore, MemoryBackend};
use cart_store_testkit::{apply, op_sequence, raw_item, ChangeRecorder, TestFixture};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn invariants_hold_after_every_op(ops in op_sequence(40)) {
        let fixture = TestFixture::new();
        let mut cart = fixture.cart();

        for op in &ops {
            apply(&mut cart, op);
            for item in cart.get_items() {
                prop_assert_eq!(item.total(), item.price() * item.quantity() as f64);
                prop_assert!(item.quantity() >= 1);
                prop_assert!(item.price() >= 0.0);
            }
        }
    }

    #[test]
    fn reopened_cart_matches(ops in op_sequence(40)) {
        let fixture = TestFixture::new();
        let mut cart = fixture.cart();
        for op in &ops {
            apply(&mut cart, op);
        }

        let reopened = fixture.cart();
        prop_assert_eq!(reopened.get_items(), cart.get_items());
        prop_assert_eq!(reopened.get_total_quantity(), cart.get_total_quantity());
    }

    #[test]
    fn one_notification_per_saving_op(ops in op_sequence(40)) {
        let mut cart = CartStore::new(MemoryBackend::new());
        let recorder = ChangeRecorder::new();
        recorder.attach(&mut cart);

        let mut expected = 0;
        for op in &ops {
            if apply(&mut cart, op) {
                expected += 1;
            }
        }

        prop_assert_eq!(recorder.count(), expected);
        if let Some(last) = recorder.last() {
            prop_assert_eq!(last.values().cloned().collect::<Vec<_>>(), cart.get_items());
        }
    }

    #[test]
    fn totals_are_sums(ops in op_sequence(30)) {
        let mut cart = CartStore::new(MemoryBackend::new());
        for op in &ops {
            apply(&mut cart, op);
        }

        let items = cart.get_items();
        let quantity: u64 = items.iter().map(|i| i.quantity()).sum();
        let price: f64 = items.iter().map(|i| i.total()).sum();

        let summary = cart.get_summary();
        prop_assert_eq!(summary.total_quantity, quantity);
        prop_assert_eq!(summary.total_price, price);
        prop_assert_eq!(summary.items, items);
    }
}

#[test]
fn probe_failure_disables_persistence() {
    let fixture = TestFixture::new();
    fixture.backend.fail_remove(true);

    let mut cart = fixture.cart();
    assert!(!cart.is_storage_available());

    let before = fixture.backend.calls();
    cart.add_item(&raw_item("a", 1.0, 1)).unwrap();
    cart.clear();

    // No further backend traffic once the probe has failed
    assert_eq!(fixture.backend.calls(), before);
}

#[test]
fn read_failure_loads_empty() {
    let fixture = TestFixture::new();
    fixture.cart().add_item(&raw_item("a", 4.0, 2)).unwrap();

    fixture.backend.fail_get(true);
    let cart = fixture.cart();
    assert!(cart.is_empty());
    assert!(cart.is_storage_available());
}

#[test]
fn write_failure_mid_session() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let fixture = TestFixture::new();
    let mut cart = fixture.cart();
    let recorder = ChangeRecorder::new();
    recorder.attach(&mut cart);

    cart.add_item(&raw_item("a", 3.0, 1)).unwrap();
    let saved = fixture.stored();

    fixture.backend.fail_set(true);
    cart.increment("a");

    // Memory moved on, storage did not, listeners still heard about it
    assert_eq!(cart.get_item("a").unwrap().quantity(), 2);
    assert_eq!(fixture.stored(), saved);
    assert_eq!(recorder.count(), 2);

    fixture.backend.fail_set(false);
    cart.increment("a");
    assert_eq!(fixture.cart().get_item("a").unwrap().quantity(), 3);
}

#[test]
fn sqlite_backend_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cart.db");

    {
        let backend = cart_store::SqliteBackend::open(&path).unwrap();
        let mut cart = CartStore::new(backend);
        cart.add_item(&raw_item("a", 1.5, 4))
            .unwrap()
            .add_item(&raw_item("b", 2.0, 1))
            .unwrap()
            .remove_item("b");
    }

    let cart = CartStore::new(cart_store::SqliteBackend::open(&path).unwrap());
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.get_total_price(), 6.0);
}
