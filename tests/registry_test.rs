use region_viewer::registry::{RegionRegistry, RegionSlots, Slot};

mod common;

use crate::common::test_utils::registry;

#[test]
fn should_match_names_exactly() {
    let registry = registry();
    assert_eq!(registry.len(), 19);
    assert_eq!(registry.index_of("Bankura"), Some(0));
    assert_eq!(registry.index_of("Dakshin Dinajpur"), Some(4));
    assert_eq!(registry.index_of("Uttar Dinajpur"), Some(18));
    assert_eq!(registry.index_of("bankura"), None);
    assert_eq!(registry.index_of(" Bankura"), None);
    assert_eq!(registry.index_of("Bankura "), None);
    assert_eq!(registry.index_of("DakshinDinajpur"), None);
    assert_eq!(registry.index_of(""), None);
}

#[test]
fn should_prefer_first_duplicate() {
    let registry = RegionRegistry::new(["A", "B", "A"]);
    assert_eq!(registry.index_of("A"), Some(0));
    assert_eq!(registry.name(2), Some("A"));
    assert_eq!(registry.name(3), None);
}

#[test]
fn should_fill_slots_in_any_order() {
    let mut slots: RegionSlots<&str> = RegionSlots::new(4);
    assert!(!slots.is_settled());
    assert_eq!(slots.loaded_count(), 0);

    assert!(slots.insert(3, "three"));
    assert!(slots.mark_failed(1));
    assert!(slots.insert(0, "zero"));

    assert_eq!(slots.get(0), Some(&"zero"));
    assert_eq!(slots.get(1), None);
    assert_eq!(slots.slot(1), Some(&Slot::Failed));
    assert_eq!(slots.get(2), None);
    assert_eq!(slots.slot(2), Some(&Slot::Pending));
    assert_eq!(slots.get(3), Some(&"three"));
    assert_eq!(slots.get(4), None);
    assert!(!slots.is_settled());

    assert!(slots.insert(2, "two"));
    assert!(slots.is_settled());
    assert_eq!(slots.loaded_count(), 3);
    let loaded: Vec<_> = slots.loaded().map(|(i, v)| (i, *v)).collect();
    assert_eq!(loaded, vec![(0, "zero"), (2, "two"), (3, "three")]);
}

#[test]
fn should_not_overwrite_resolved_slots() {
    let mut slots = RegionSlots::new(2);
    assert!(slots.insert(0, 1));
    assert!(!slots.insert(0, 2));
    assert!(!slots.mark_failed(0));
    assert_eq!(slots.get(0), Some(&1));

    assert!(slots.mark_failed(1));
    assert!(!slots.insert(1, 3));
    assert_eq!(slots.get(1), None);

    assert!(!slots.insert(7, 4));
    assert!(!slots.mark_failed(7));
    assert_eq!(slots.len(), 2);
}

#[test]
fn should_mutate_loaded_values_only() {
    let mut slots = RegionSlots::new(3);
    slots.insert(0, 10);
    slots.insert(2, 30);
    for (_, value) in slots.loaded_mut() {
        *value += 1;
    }
    assert_eq!(slots.get(0), Some(&11));
    assert_eq!(slots.get(2), Some(&31));
    assert!(slots.get_mut(1).is_none());
}
