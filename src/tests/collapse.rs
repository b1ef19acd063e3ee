use super::CollapseMachine;
use crate::fake_host::{FakeHost, HostCall};
use crate::host::DocumentHost;
use crate::persistence::{MemoryStore, SessionStore, Unavailable};
use crate::section::{CollapseState, NodeKind};
use crate::tree::SectionTree;
use proptest::prelude::*;

fn guide() -> FakeHost {
    FakeHost::new(10)
        .heading("Guide", 1, 10)
        .heading("Install", 2, 25)
        .heading("From source", 3, 40)
        .heading("Binaries", 4, 10)
        .heading("Usage", 2, 10)
        .heading("Examples", 2, 0)
        .heading("API", 2, 30)
}

fn machine(host: &mut FakeHost, store: &MemoryStore, levels: &[usize]) -> CollapseMachine {
    let tree = SectionTree::build(&host.headers(), NodeKind::Section, levels);
    CollapseMachine::initialize(tree, host, store)
}

fn allotted(machine: &CollapseMachine) -> Vec<u32> {
    machine.tree().nodes.iter().map(|n| n.allotted).collect()
}

#[test]
fn test_sections_default_to_expanded_at_natural_extent() {
    let mut host = guide();
    let machine = machine(&mut host, &MemoryStore::new(), &[2, 3]);

    assert_eq!(machine.state(1), CollapseState::Expanded);
    assert_eq!(host.max_extent(NodeKind::Section, "From source"), Some(6));
    assert_eq!(host.max_extent(NodeKind::Section, "Install"), Some(10));
    assert_eq!(
        host.class(NodeKind::Section, "Install"),
        Some(CollapseState::Expanded)
    );
    assert_eq!(machine.tree().natural_extent(0), 19);
}

#[test]
fn test_header_without_content_gets_no_handler() {
    let mut host = guide();
    let mut store = MemoryStore::new();
    let mut machine = machine(&mut host, &store, &[2, 3]);
    let examples = machine.tree().find("Examples").unwrap();

    assert!(!machine.is_registered(examples));
    assert_eq!(host.max_extent(NodeKind::Section, "Examples"), None);
    assert_eq!(host.class(NodeKind::Section, "Examples"), None);

    let calls_before = host.calls.len();
    assert!(machine.activate(host.index_of("Examples"), &mut host, &mut store).is_none());
    assert_eq!(host.calls.len(), calls_before);
    assert!(store.is_empty());
}

#[test]
fn test_remembered_none_token_restores_collapsed() {
    let mut host = guide();
    let mut store = MemoryStore::new();
    store.set("API", "none");

    let machine = machine(&mut host, &store, &[2, 3]);
    let api = machine.tree().find("API").unwrap();

    assert_eq!(machine.state(api), CollapseState::Collapsed);
    assert_eq!(host.max_extent(NodeKind::Section, "API"), Some(0));
    assert_eq!(
        host.class(NodeKind::Section, "API"),
        Some(CollapseState::Collapsed)
    );
    assert_eq!(machine.tree().natural_extent(0), 16);
}

#[test]
fn test_unavailable_store_applies_defaults() {
    let mut host = guide();
    let tree = SectionTree::build(&host.headers(), NodeKind::Section, &[2, 3]);
    let mut store = Unavailable;
    let mut machine = CollapseMachine::initialize(tree, &mut host, &store);

    let toggle = machine.activate(host.index_of("API"), &mut host, &mut store).unwrap();

    assert_eq!(toggle.state, CollapseState::Collapsed);
    assert_eq!(store.get("API"), None);
}

#[test]
fn test_toggle_persists_and_adjusts_parent() {
    let mut host = guide();
    let mut store = MemoryStore::new();
    let mut machine = machine(&mut host, &store, &[2, 3]);

    let from_source = host.index_of("From source");
    let toggle = machine.activate(from_source, &mut host, &mut store).unwrap();

    assert_eq!(toggle.old_extent, 6);
    assert_eq!(toggle.new_extent, 0);
    assert_eq!(toggle.delta(), -6);
    assert_eq!(store.get("From source").as_deref(), Some("none"));
    assert_eq!(host.max_extent(NodeKind::Section, "Install"), Some(4));

    machine.activate(from_source, &mut host, &mut store);
    assert_eq!(store.get("From source").as_deref(), Some("block"));
    assert_eq!(host.max_extent(NodeKind::Section, "Install"), Some(10));
}

#[test]
fn test_delta_chains_through_every_expanded_ancestor() {
    let mut host = guide();
    let mut store = MemoryStore::new();
    let mut machine = machine(&mut host, &store, &[2, 3, 4]);

    assert_eq!(host.max_extent(NodeKind::Section, "Binaries"), Some(1));
    machine.activate(host.index_of("Binaries"), &mut host, &mut store).unwrap();

    assert_eq!(host.max_extent(NodeKind::Section, "From source"), Some(5));
    assert_eq!(host.max_extent(NodeKind::Section, "Install"), Some(9));
}

#[test]
fn test_collapsed_ancestor_stops_propagation() {
    let mut host = guide();
    let mut store = MemoryStore::new();
    let mut machine = machine(&mut host, &store, &[2, 3]);

    machine.activate(host.index_of("Install"), &mut host, &mut store).unwrap();
    machine.activate(host.index_of("From source"), &mut host, &mut store).unwrap();
    assert_eq!(host.max_extent(NodeKind::Section, "Install"), Some(0));

    let toggle = machine.activate(host.index_of("Install"), &mut host, &mut store).unwrap();
    assert_eq!(toggle.new_extent, 3 + 1);
}

#[test]
fn test_recalculate_remeasures_after_reflow() {
    let mut host = guide();
    let mut store = MemoryStore::new();
    let mut machine = machine(&mut host, &store, &[2, 3]);
    machine.activate(host.index_of("API"), &mut host, &mut store).unwrap();

    host.resize(5);
    host.calls.clear();
    machine.recalculate(&mut host);

    assert_eq!(host.max_extent(NodeKind::Section, "From source"), Some(8 + 1 + 2));
    assert_eq!(host.max_extent(NodeKind::Section, "Install"), Some(5 + 1 + 11));
    assert_eq!(host.max_extent(NodeKind::Section, "API"), Some(0));
    assert_eq!(machine.state(machine.tree().find("API").unwrap()), CollapseState::Collapsed);
    assert_eq!(host.calls.first(), Some(&HostCall::Transitions(false)));
    assert_eq!(host.calls.last(), Some(&HostCall::Transitions(true)));
    assert!(host.transitions);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_menu_items_default_to_collapsed() {
    let mut host = guide();
    let store = MemoryStore::new();
    let tree = SectionTree::build(&host.headers(), NodeKind::Menu, &[]);
    let machine = CollapseMachine::initialize(tree, &mut host, &store);

    assert_eq!(machine.state(0), CollapseState::Collapsed);
    assert_eq!(host.max_extent(NodeKind::Menu, "Guide"), Some(0));
    // Only the top-level item is visible.
    assert_eq!(machine.tree().document_extent(), 1);
}

proptest! {
    #[test]
    fn double_toggle_restores_every_extent(
        history in prop::collection::vec(0usize..7, 0..12),
        target in 0usize..7,
    ) {
        let mut host = guide();
        let mut store = MemoryStore::new();
        let mut machine = machine(&mut host, &store, &[2, 3, 4]);
        for id in history {
            machine.toggle(id, &mut host, &mut store);
        }

        let before = allotted(&machine);
        let state = machine.state(target);
        machine.toggle(target, &mut host, &mut store);
        machine.toggle(target, &mut host, &mut store);

        prop_assert_eq!(allotted(&machine), before);
        prop_assert_eq!(machine.state(target), state);
    }
}
