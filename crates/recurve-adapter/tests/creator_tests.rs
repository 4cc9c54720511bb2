//! Tests for flat position translation and host notifications.

use recurve_adapter::{
    ClickHandler, CreatorConfig, CreatorError, Dimension, ExpandableBinder, ExpandableCreator,
    HostNotification, RecordingHost, RowKind, RowRef,
};

struct NullBinder;

impl ExpandableBinder<&'static str, &'static str> for NullBinder {
    type Container = ();
    type Visual = ();

    fn create_parent_visual(&mut self, _container: &()) {}
    fn create_child_visual(&mut self, _container: &()) {}
    fn bind_parent(&mut self, _: &mut (), _: &&'static str, _: usize, _: usize) {}
    fn bind_child(&mut self, _: &mut (), _: &&'static str, _: usize, _: usize) {}
    fn set_on_click(&mut self, _: &mut (), _: ClickHandler<()>) {}
}

type Creator = ExpandableCreator<&'static str, &'static str, NullBinder>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn sample() -> (Creator, RecordingHost) {
    init_tracing();
    let host = RecordingHost::new();
    let mut creator = Creator::with_config(NullBinder, CreatorConfig::new(1)).unwrap();
    creator.attach_host(host.clone());
    creator.set_data([("a", vec!["x", "y"]), ("b", vec!["z"])]);
    assert_eq!(host.take(), vec![HostNotification::SetChanged { creator_type: 1 }]);
    (creator, host)
}

/// Flattens the creator into `(kind, label)` rows by walking flat positions.
fn flatten(creator: &Creator) -> Vec<&'static str> {
    (0..creator.item_count())
        .map(|flat| match creator.resolve(flat).unwrap() {
            RowRef::Parent { key, .. } => *key,
            RowRef::Child { .. } => *creator.resolve_child(flat).unwrap().0,
        })
        .collect()
}

fn assert_invariants(creator: &Creator) {
    let groups = creator.groups();
    let children: usize = groups.iter().map(|(_, children)| children.len()).sum();
    assert_eq!(creator.item_count(), creator.group_count() + children);

    for flat in 0..creator.item_count() {
        let row = creator.resolve(flat).unwrap();
        assert_eq!(groups.flat_index_of_row(&row), Ok(flat));
    }
    assert!(matches!(
        creator.resolve(creator.item_count()),
        Err(CreatorError::OutOfRange {
            dimension: Dimension::Rows,
            ..
        })
    ));
}

#[test]
fn test_scenario_flat_order() {
    let (creator, _host) = sample();
    assert_eq!(flatten(&creator), vec!["a", "x", "y", "b", "z"]);
    assert_eq!(
        creator.resolve(2),
        Ok(RowRef::Child {
            key: &"a",
            group: 0,
            offset: 1
        })
    );
    assert_eq!(creator.resolve_child(2), Ok((&"y", 1)));
    assert_eq!(creator.flat_index_of_group(&"b"), Ok(3));
    assert_eq!(creator.flat_index_of_child_value(&"a", &"y"), Ok(2));
    assert_invariants(&creator);
}

#[test]
fn test_scenario_remove_group() {
    let (mut creator, host) = sample();
    assert_eq!(creator.remove_group(&"a"), Ok(vec!["x", "y"]));
    assert_eq!(
        host.take(),
        vec![HostNotification::RangeRemoved {
            creator_type: 1,
            start: 0,
            end: 3
        }]
    );
    assert_eq!(flatten(&creator), vec!["b", "z"]);
    assert_eq!(creator.item_count(), 2);
    assert_invariants(&creator);
}

#[test]
fn test_scenario_add_child() {
    let (mut creator, host) = sample();
    creator.add_child(&"b", "w").unwrap();
    assert_eq!(
        host.take(),
        vec![HostNotification::Inserted {
            creator_type: 1,
            position: 5
        }]
    );
    assert_eq!(flatten(&creator), vec!["a", "x", "y", "b", "z", "w"]);
    assert_invariants(&creator);
}

#[test]
fn test_scenario_insert_group() {
    let (mut creator, host) = sample();
    creator.add_group("c");
    host.take();

    assert_eq!(creator.flat_index_of_group(&"b"), Ok(3));
    assert_eq!(creator.insert_group(1, "m"), Ok(None));
    assert_eq!(
        host.take(),
        vec![HostNotification::Inserted {
            creator_type: 1,
            position: 3
        }]
    );
    assert_eq!(flatten(&creator), vec!["a", "x", "y", "m", "b", "z", "c"]);
    assert_eq!(creator.flat_index_of_group(&"b"), Ok(4));
    assert_invariants(&creator);
}

#[test]
fn test_scenario_resolve_past_end() {
    let (creator, _host) = sample();
    assert_eq!(
        creator.resolve(creator.item_count()),
        Err(CreatorError::OutOfRange {
            dimension: Dimension::Rows,
            index: 5,
            len: 5
        })
    );
}

#[test]
fn test_range_removal_covers_whole_group() {
    let (mut creator, host) = sample();
    creator.add_group("c");
    for child in ["1", "2", "3", "4"] {
        creator.add_child(&"c", child).unwrap();
    }
    host.take();

    let start = creator.flat_index_of_group(&"c").unwrap();
    let children = creator.child_count(&"c").unwrap();
    creator.remove_group(&"c").unwrap();
    assert_eq!(
        host.take(),
        vec![HostNotification::RangeRemoved {
            creator_type: 1,
            start,
            end: start + children + 1
        }]
    );
    assert_eq!((start, children), (5, 4));
}

#[test]
fn test_child_mutation_preserves_order() {
    let (mut creator, _host) = sample();
    creator.add_group("c");
    creator.add_child(&"c", "q").unwrap();

    creator.insert_child(&"a", 1, "n").unwrap();
    assert_eq!(flatten(&creator), vec!["a", "x", "n", "y", "b", "z", "c", "q"]);
    assert_invariants(&creator);

    creator.remove_child(&"a", &"x").unwrap();
    assert_eq!(flatten(&creator), vec!["a", "n", "y", "b", "z", "c", "q"]);
    assert_invariants(&creator);

    creator.remove_child_at(&"b", 0).unwrap();
    assert_eq!(flatten(&creator), vec!["a", "n", "y", "b", "c", "q"]);
    assert_invariants(&creator);
}

#[test]
fn test_every_mutation_emits_exactly_one_notification() {
    let (mut creator, host) = sample();

    creator.add_group("c");
    creator.add_child(&"c", "1").unwrap();
    creator.insert_child(0usize, 0, "0").unwrap();
    creator.set_child(&"c", 0, "one").unwrap();
    creator.insert_group(0, "first").unwrap();
    creator.set_group(1, "second").unwrap();
    creator.remove_child(&"b", &"z").unwrap();
    creator.remove_child_at(&"c", 0).unwrap();
    creator.remove_group(0usize).unwrap();
    assert_eq!(host.len(), 9);
    assert_invariants(&creator);

    // Failed calls notify nothing.
    assert!(creator.insert_group(10, "late").is_err());
    assert!(creator.remove_group(&"missing").is_err());
    assert!(creator.set_child(&"c", 10, "nope").is_err());
    assert_eq!(host.len(), 9);
}

#[test]
fn test_reads_do_not_mutate() {
    let (creator, host) = sample();
    let snapshot = creator.data();
    for flat in 0..creator.item_count() {
        assert_eq!(creator.resolve(flat), creator.resolve(flat));
        let _ = creator.row_kind(flat);
        let _ = creator.view_type(flat);
    }
    assert_eq!(creator.data(), snapshot);
    assert!(host.is_empty());
}

#[test]
fn test_row_kinds_match_view_types() {
    let (creator, _host) = sample();
    let kinds: Vec<_> = (0..creator.item_count())
        .map(|flat| creator.row_kind(flat).unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec![
            RowKind::Parent,
            RowKind::Child,
            RowKind::Child,
            RowKind::Parent,
            RowKind::Child
        ]
    );
    for (flat, kind) in kinds.into_iter().enumerate() {
        let tag = creator.view_type(flat).unwrap();
        assert_eq!(tag.kind(), Some(kind));
        assert_eq!(tag.creator_type(), creator.creator_type());
    }
}

/// Applies recorded notifications to a host-side row count, the way a list
/// view adjusts its item count, and checks it against the creator.
fn sync_host_rows(host_rows: &mut usize, creator: &Creator, host: &RecordingHost) {
    for notification in host.take() {
        match notification {
            HostNotification::SetChanged { .. } => *host_rows = creator.item_count(),
            HostNotification::Inserted { .. } => *host_rows += 1,
            HostNotification::Removed { .. } => *host_rows -= 1,
            HostNotification::Changed { .. } => {}
            HostNotification::RangeRemoved { start, end, .. } => *host_rows -= end - start,
        }
    }
    assert_eq!(*host_rows, creator.item_count());
}

#[test]
fn test_host_row_count_tracks_group_moves() {
    let (mut creator, host) = sample();
    let mut host_rows = creator.item_count();

    // Moving "b" to the front drops its header and child from the old slot.
    assert_eq!(creator.insert_group(0, "b"), Ok(Some(vec!["z"])));
    sync_host_rows(&mut host_rows, &creator, &host);
    assert_eq!(flatten(&creator), vec!["b", "a", "x", "y"]);

    creator.add_group("c");
    creator.add_child(&"c", "1").unwrap();
    sync_host_rows(&mut host_rows, &creator, &host);

    assert_eq!(creator.insert_group(2, "a"), Ok(Some(vec!["x", "y"])));
    sync_host_rows(&mut host_rows, &creator, &host);

    assert_eq!(creator.set_group(0, "c"), Ok(Some(vec!["1"])));
    sync_host_rows(&mut host_rows, &creator, &host);

    creator.add_child(&"c", "2").unwrap();
    creator.add_child(&"c", "3").unwrap();
    assert_eq!(creator.add_group("c"), Some(vec!["2", "3"]));
    sync_host_rows(&mut host_rows, &creator, &host);

    assert_eq!(creator.insert_group(0, "d"), Ok(None));
    creator.add_child(&"d", "4").unwrap();
    creator.remove_group(&"d").unwrap();
    sync_host_rows(&mut host_rows, &creator, &host);
    assert_invariants(&creator);
}

#[test]
fn test_value_addressed_child_by_ordinal() {
    let (mut creator, host) = sample();
    assert_eq!(creator.flat_index_of_child_value(0usize, &"y"), Ok(2));
    assert_eq!(creator.flat_index_of_child_value(1usize, &"z"), Ok(4));
    assert_eq!(
        creator.flat_index_of_child_value(1usize, &"x"),
        Err(CreatorError::ChildNotFound { group: 1 })
    );

    assert_eq!(creator.remove_child(0usize, &"x"), Ok(true));
    assert_eq!(
        host.take(),
        vec![HostNotification::Removed {
            creator_type: 1,
            position: 1
        }]
    );
    assert_eq!(creator.remove_child(1usize, &"x"), Ok(false));
    assert!(host.is_empty());
    assert_eq!(
        creator.remove_child(2usize, &"x"),
        Err(CreatorError::out_of_range(Dimension::Groups, 2, 2))
    );
    assert_eq!(flatten(&creator), vec!["a", "y", "b", "z"]);
}
