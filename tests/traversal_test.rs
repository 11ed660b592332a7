//! Integration tests for the traversal engine: visit order, deduplication,
//! bounded termination, and failure resilience

use memgraph::config::ScanConfig;
use memgraph::memory::mock::{words, MockMemory};
use memgraph::symbols::MapSymbols;
use memgraph::{Address, Traversal};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn scan(mem: &MockMemory, root: usize, root_size: usize, budget: usize) -> memgraph::ResultTree {
    let syms = MapSymbols::new();
    let config = ScanConfig::default().with_node_budget(budget);
    Traversal::new(mem, &syms, config)
        .run(Address::new(root), Some(root_size))
        .expect("scan must not fail")
}

#[test]
fn breadth_first_discovery_order() {
    // Root points at A, B, C at offsets 0, 8, 16; A points at D. BFS means
    // D is visited after all of root's own children, never right after A.
    let mut mem = MockMemory::new();
    let (root, a, b, c, d) = (0x1000, 0x2000, 0x3000, 0x4000, 0x5000);
    mem.add_region(Address::new(root), words(&[a, b, c]));
    mem.add_heap_block(Address::new(a), words(&[d]));
    mem.add_heap_block(Address::new(b), vec![0xBB; 8]);
    mem.add_heap_block(Address::new(c), vec![0xCC; 8]);
    mem.add_heap_block(Address::new(d), vec![0xDD; 8]);

    let tree = scan(&mem, root, 24, 150);

    assert_eq!(tree.len(), 5);
    assert_eq!(tree.node_at(Address::new(root)).unwrap().discovery_index, 0);
    assert_eq!(tree.node_at(Address::new(a)).unwrap().discovery_index, 1);
    assert_eq!(tree.node_at(Address::new(b)).unwrap().discovery_index, 2);
    assert_eq!(tree.node_at(Address::new(c)).unwrap().discovery_index, 3);
    assert_eq!(tree.node_at(Address::new(d)).unwrap().discovery_index, 4);
}

#[test]
fn children_keep_parent_offsets() {
    let mut mem = MockMemory::new();
    let (root, a, b) = (0x1000, 0x2000, 0x3000);
    mem.add_region(Address::new(root), words(&[0, a, b]));
    mem.add_heap_block(Address::new(a), vec![1; 8]);
    mem.add_heap_block(Address::new(b), vec![2; 8]);

    let tree = scan(&mem, root, 24, 150);

    assert_eq!(tree.node_at(Address::new(a)).unwrap().parent_offset, 8);
    assert_eq!(tree.node_at(Address::new(b)).unwrap().parent_offset, 16);
}

#[test]
fn self_referential_block_recorded_exactly_once() {
    let mut mem = MockMemory::new();
    mem.add_heap_block(Address::new(0x1000), words(&[0x1000, 0x1000]));

    let tree = scan(&mem, 0x1000, 16, 150);

    assert_eq!(tree.len(), 1);
    assert!(tree.root().unwrap().children.is_empty());
}

#[test]
fn shared_reference_keeps_first_parent_only() {
    // Both A and B point at D; D was discovered through A first, so its
    // sole tree edge is from A and the later reference from B is dropped.
    let mut mem = MockMemory::new();
    let (root, a, b, d) = (0x1000, 0x2000, 0x3000, 0x4000);
    mem.add_region(Address::new(root), words(&[a, b]));
    mem.add_heap_block(Address::new(a), words(&[d]));
    mem.add_heap_block(Address::new(b), words(&[d]));
    mem.add_heap_block(Address::new(d), vec![9; 8]);

    let tree = scan(&mem, root, 16, 150);

    assert_eq!(tree.len(), 4);
    let d_node = tree.node_at(Address::new(d)).unwrap();
    let a_node = tree.node_at(Address::new(a)).unwrap();
    let b_node = tree.node_at(Address::new(b)).unwrap();
    assert_eq!(d_node.parent, Some(a_node.discovery_index));
    assert_eq!(a_node.children.len(), 1);
    assert!(b_node.children.is_empty());
}

#[test]
fn unreadable_candidate_does_not_abort_siblings() {
    // The middle word points into nothing; its siblings must still be
    // recorded and the scan must complete normally.
    let mut mem = MockMemory::new();
    let (root, a, c) = (0x1000, 0x2000, 0x4000);
    mem.add_region(Address::new(root), words(&[a, 0xDEAD0000, c]));
    mem.add_heap_block(Address::new(a), vec![1; 8]);
    mem.add_heap_block(Address::new(c), vec![3; 8]);

    let tree = scan(&mem, root, 24, 150);

    assert_eq!(tree.len(), 3);
    assert!(tree.node_at(Address::new(0xDEAD0000)).is_none());
    assert_eq!(tree.node_at(Address::new(c)).unwrap().discovery_index, 2);
}

#[test]
fn budget_cuts_off_fully_connected_graph() {
    // Four blocks all pointing at each other; a budget of 3 records
    // exactly 3 nodes and stops.
    let mut mem = MockMemory::new();
    let addrs = [0x1000, 0x2000, 0x3000, 0x4000];
    for &addr in &addrs {
        mem.add_heap_block(Address::new(addr), words(&addrs));
    }

    let tree = scan(&mem, 0x1000, 32, 3);
    assert_eq!(tree.len(), 3);
}

#[test]
fn type_registry_annotates_without_affecting_traversal() {
    use memgraph::registry::{MapTypeRegistry, TypeRegistry as _};

    let mut mem = MockMemory::new();
    let (root, a) = (0x1000, 0x2000);
    mem.add_region(Address::new(root), words(&[a]));
    mem.add_heap_block(Address::new(a), vec![5; 8]);

    let mut registry = MapTypeRegistry::new();
    registry.add(Address::new(a), "Widget");
    assert_eq!(registry.type_name_at(Address::new(a)), Some("Widget"));

    let syms = MapSymbols::new();
    let config = ScanConfig::default();

    let bare = Traversal::new(&mem, &syms, config.clone())
        .run(Address::new(root), Some(8))
        .unwrap();
    let enriched = Traversal::new(&mem, &syms, config)
        .with_registry(&registry)
        .run(Address::new(root), Some(8))
        .unwrap();

    // Same shape either way; only the display name differs.
    assert_eq!(bare.len(), enriched.len());
    assert_eq!(bare.node_at(Address::new(a)).unwrap().type_name, None);
    assert_eq!(
        enriched.node_at(Address::new(a)).unwrap().type_name,
        Some("Widget".to_string())
    );
}

proptest! {
    // Termination: arbitrary mutually-referencing graphs never exceed the
    // node budget, whatever shape the references take.
    #[test]
    fn scan_terminates_within_budget(
        edges in proptest::collection::vec(
            proptest::collection::vec(0usize..8, 1..4),
            8,
        ),
        budget in 1usize..20,
    ) {
        let mut mem = MockMemory::new();
        let addr = |i: usize| 0x10000 + i * 0x100;
        for (i, targets) in edges.iter().enumerate() {
            let ws: Vec<usize> = targets.iter().map(|&t| addr(t)).collect();
            mem.add_heap_block(Address::new(addr(i)), words(&ws));
        }

        let tree = scan(&mem, addr(0), 8, budget);
        prop_assert!(tree.len() <= budget);
        prop_assert!(!tree.is_empty());
        prop_assert_eq!(tree.root().unwrap().discovery_index, 0);
    }
}
