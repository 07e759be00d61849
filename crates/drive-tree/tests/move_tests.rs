use drive_tree::prelude::*;
use pretty_assertions::assert_eq;

fn id(n: u32) -> ItemId {
    ItemId::from(n)
}

/// 1 and 4 at the top level, 2 and 3 inside 1
fn four_items() -> ItemStore {
    ItemStore::from_items(vec![
        Item::folder(1, "one"),
        Item::file(2, "two").with_parent(1),
        Item::file(3, "three").with_parent(1),
        Item::folder(4, "four"),
    ])
    .unwrap()
}

fn order(store: &ItemStore) -> Vec<String> {
    store.flatten().iter().map(|row| row.id().to_string()).collect()
}

/// Indented outline of the store, one item per line
fn outline(store: &ItemStore) -> String {
    store
        .flatten()
        .iter()
        .map(|row| format!("{}{} {}", "  ".repeat(row.depth), row.id(), row.item.name))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_move_selection_into_folder() {
    let mut store = four_items();
    let mut selection = Selection::new();
    selection.set_selected(3, true);

    let request = MoveRequest::from_selection(Some(id(4)), 2, &selection);
    let outcome = store.apply_move(&request, &mut selection).unwrap();

    assert_eq!(outcome.moved, vec![id(2), id(3)]);
    assert_eq!(store.parent(&id(2)), Some(&id(4)));
    assert_eq!(store.parent(&id(3)), Some(&id(4)));
    assert_eq!(order(&store), vec!["1", "4", "2", "3"]);
    assert!(selection.is_empty());

    insta::assert_snapshot!(outline(&store), @r"
1 one
4 four
  2 two
  3 three
");
}

#[test]
fn test_move_into_descendant_rejected() {
    let mut store = four_items();
    let before = store.clone();
    let mut selection = Selection::new();

    let err = store
        .apply_move(&MoveRequest::new(Some(id(2)), 1), &mut selection)
        .unwrap_err();

    assert_eq!(
        err,
        MoveError::CycleRejected {
            id: id(1),
            target: id(2)
        }
    );
    assert_eq!(err.kind(), ErrorKind::InvalidMove);
    assert_eq!(store, before);
}

#[test]
fn test_move_parent_under_child_rejected() {
    // B's parent is A; dropping A onto B must fail
    let mut store = ItemStore::from_items(vec![
        Item::folder("A", "a"),
        Item::folder("B", "b").with_parent("A"),
    ])
    .unwrap();
    let before = store.clone();

    let result = store.apply_move(&MoveRequest::new(Some("B".into()), "A"), &mut Selection::new());

    assert!(matches!(result, Err(MoveError::CycleRejected { .. })));
    assert_eq!(store, before);
}

#[test]
fn test_drop_onto_self_is_no_op() {
    let mut store = four_items();
    let before = store.clone();
    let mut selection = Selection::new();

    let err = store
        .apply_move(&MoveRequest::new(Some(id(2)), 2), &mut selection)
        .unwrap_err();
    assert_eq!(err, MoveError::NoOpSelf { id: id(2) });
    assert_eq!(store, before);

    // Target inside the selection
    selection.toggle_multi_select_mode(true);
    selection.set_selected(4, true);
    let request = MoveRequest::from_selection(Some(id(4)), 2, &selection);
    let err = store.apply_move(&request, &mut selection).unwrap_err();
    assert_eq!(err, MoveError::NoOpSelf { id: id(4) });
    assert_eq!(store, before);
    assert!(selection.is_selected(&id(4)));
}

#[test]
fn test_multi_move_to_top_level() {
    let mut store = ItemStore::from_items(vec![
        Item::folder("P", "parent"),
        Item::file("A", "a").with_parent("P"),
        Item::file("B", "b").with_parent("P"),
        Item::file("C", "c").with_parent("P"),
    ])
    .unwrap();
    let mut selection = Selection::new();
    selection.toggle_multi_select_mode(true);
    selection.set_selected("B", true);
    selection.set_selected("C", true);

    let request = MoveRequest::from_selection(None, "A", &selection);
    let outcome = store.apply_move(&request, &mut selection).unwrap();

    assert_eq!(outcome.target, None);
    assert_eq!(outcome.moved.len(), 3);
    for name in ["A", "B", "C"] {
        assert!(store.get(&ItemId::from(name)).unwrap().is_root());
    }
    assert_eq!(order(&store), vec!["P", "A", "B", "C"]);
}

#[test]
fn test_missing_items() {
    let mut store = four_items();
    let before = store.clone();
    let mut selection = Selection::new();

    let err = store
        .apply_move(&MoveRequest::new(Some(id(4)), 9), &mut selection)
        .unwrap_err();
    assert_eq!(err, MoveError::SourceNotFound { id: id(9) });
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = store
        .apply_move(&MoveRequest::new(Some(id(8)), 2), &mut selection)
        .unwrap_err();
    assert_eq!(err, MoveError::TargetNotFound { id: id(8) });
    assert_eq!(store, before);
}

#[test]
fn test_payload_passes_through() {
    let mut store = ItemStore::from_items(vec![
        Item::folder(1, "dir"),
        Item::file(2, "big.zip").with_size(1_048_576),
    ])
    .unwrap();

    store
        .apply_move(&MoveRequest::new(Some(id(1)), 2), &mut Selection::new())
        .unwrap();

    let moved = store.get(&id(2)).unwrap();
    assert_eq!(moved.size, 1_048_576);
    assert_eq!(moved.name, "big.zip");
    assert_eq!(moved.kind, ItemKind::File);
}

#[test]
fn test_drive_flash_lookup_after_move() {
    let mut drive = Drive::new(four_items());
    drive.set_selected(3, true);

    let outcome = drive.apply_move(Some(id(4)), 2).unwrap();

    // Positions are final as soon as the move returns
    let positions: Vec<_> = outcome
        .moved
        .iter()
        .map(|moved| drive.position_of(moved))
        .collect();
    assert_eq!(positions, vec![Some(2), Some(3)]);
    assert!(drive.selection().is_empty());
}

#[test]
fn test_deep_chain_drive() {
    let depth = 100_000u32;
    let mut store = ItemStore::new();
    store.insert(Item::folder(0, "level 0")).unwrap();
    for n in 1..depth {
        store
            .insert(Item::folder(n, format!("level {}", n)).with_parent(n - 1))
            .unwrap();
    }
    assert_eq!(store.flatten().len(), depth as usize);

    let mut drive = Drive::new(store);
    let last = id(depth - 1);
    assert_eq!(drive.rows().len(), depth as usize);
    assert_eq!(drive.depth_of(&last), Some(depth as usize - 1));

    // Lift the middle of the chain to the top level, carrying its subtree
    let middle = id(depth / 2);
    drive.apply_move(None, middle.clone()).unwrap();
    assert_eq!(drive.position_of(&middle), Some(depth as usize / 2));
    assert_eq!(drive.depth_of(&last), Some(depth as usize / 2 - 1));
}
