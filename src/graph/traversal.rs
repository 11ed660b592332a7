//! Bounded breadth-first traversal over discovered addresses
//!
//! One `Traversal` owns all mutable scan state (seen-set, frontier,
//! recorded count) for exactly one run. Reads may fail between
//! classification and acquisition; every read failure drops that node
//! silently and the walk continues. The node budget is the only bound on
//! work and the only defense against cyclic or fully-connected graphs.

use crate::config::ScanConfig;
use crate::core::types::{Address, ScanResult};
use crate::graph::tree::{NodeId, ResultTree};
use crate::memory::access::MemoryAccess;
use crate::memory::classifier::BlockClassifier;
use crate::memory::reader::SafeReader;
use crate::registry::TypeRegistry;
use crate::scan::{scan_pointers, scan_strings};
use crate::symbols::SymbolResolver;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info, trace};

/// Transient record of a discovered address awaiting its visit.
/// Discarded once the node is built (or the read fails).
struct ScanEntry {
    address: Address,
    parent: Option<NodeId>,
    parent_offset: usize,
}

/// One scan invocation over the memory graph reachable from a root.
pub struct Traversal<'a, M: MemoryAccess, S: SymbolResolver> {
    memory: &'a M,
    symbols: &'a S,
    registry: Option<&'a dyn TypeRegistry>,
    config: ScanConfig,
}

impl<'a, M: MemoryAccess, S: SymbolResolver> Traversal<'a, M, S> {
    pub fn new(memory: &'a M, symbols: &'a S, config: ScanConfig) -> Self {
        Traversal {
            memory,
            symbols,
            registry: None,
            config,
        }
    }

    /// Attaches the optional type-identity registry. Only display names
    /// are affected; discovery and ordering never are.
    pub fn with_registry(mut self, registry: &'a dyn TypeRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Runs the scan from `root`, with an optional caller-known root size.
    ///
    /// Returns the finished tree; it is empty when the root itself was
    /// unreadable. The only error path is an invariant violation, which
    /// indicates a defect in the scanner, not a property of the inspected
    /// memory.
    pub fn run(&self, root: Address, root_size: Option<usize>) -> ScanResult<ResultTree> {
        let classifier =
            BlockClassifier::new(self.memory, self.symbols, self.config.symbol_span_probe);
        let reader = SafeReader::new(self.memory, self.config.probe_chunk, self.config.probe_cap);

        let mut tree = ResultTree::new();
        let mut seen: HashSet<Address> = HashSet::new();
        let mut frontier: VecDeque<ScanEntry> = VecDeque::new();

        seen.insert(root);
        frontier.push_back(ScanEntry {
            address: root,
            parent: None,
            parent_offset: 0,
        });

        while tree.len() < self.config.node_budget {
            let Some(entry) = frontier.pop_front() else {
                break;
            };

            let is_root = entry.parent.is_none();
            let classified = classifier.classify(
                entry.address,
                is_root,
                if is_root { root_size } else { None },
            );

            let block = match reader.read_block(entry.address, classified) {
                Ok(block) => block,
                Err(err) if err.is_read_failure() => {
                    // Expected for speculative candidates; the entry
                    // contributes nothing and is not expanded.
                    debug!(address = %entry.address, %err, "dropping unreadable candidate");
                    continue;
                }
                Err(err) => return Err(err),
            };

            let strings = scan_strings(&block, self.config.string_min_len);
            let symbol = self.symbols.resolve(entry.address).map(|s| s.name);
            let type_name = self
                .registry
                .and_then(|r| r.type_name_at(entry.address))
                .map(str::to_owned);
            let candidates = scan_pointers(&block);

            let id = tree.insert(
                entry.address,
                block,
                entry.parent,
                entry.parent_offset,
                symbol,
                type_name,
                strings,
            )?;
            debug!(
                address = %entry.address,
                index = id,
                candidates = candidates.len(),
                "recorded node"
            );

            for candidate in candidates {
                if seen.insert(candidate.address) {
                    trace!(
                        address = %candidate.address,
                        offset = candidate.offset,
                        "enqueued candidate"
                    );
                    frontier.push_back(ScanEntry {
                        address: candidate.address,
                        parent: Some(id),
                        parent_offset: candidate.offset,
                    });
                }
            }
        }

        info!(
            nodes = tree.len(),
            budget = self.config.node_budget,
            pending = frontier.len(),
            "scan complete"
        );
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::mock::{words, MockMemory};
    use crate::symbols::MapSymbols;

    fn traverse(mem: &MockMemory, root: usize, budget: usize) -> ResultTree {
        let syms = MapSymbols::new();
        let config = ScanConfig::default().with_node_budget(budget);
        Traversal::new(mem, &syms, config)
            .run(Address::new(root), Some(8))
            .expect("scan must not fail")
    }

    #[test]
    fn test_single_node_no_pointers() {
        let mut mem = MockMemory::new();
        mem.add_region(Address::new(0x1000), words(&[0]));

        let tree = traverse(&mem, 0x1000, 150);
        // The null word is a candidate but unreadable, so only the root
        // is recorded.
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root().unwrap().address, Address::new(0x1000));
        assert_eq!(tree.root().unwrap().discovery_index, 0);
    }

    #[test]
    fn test_self_reference_recorded_once() {
        let mut mem = MockMemory::new();
        mem.add_region(Address::new(0x1000), words(&[0x1000]));

        let tree = traverse(&mem, 0x1000, 150);
        assert_eq!(tree.len(), 1);
        assert!(tree.root().unwrap().children.is_empty());
    }

    #[test]
    fn test_unreadable_root_yields_empty_tree() {
        let mem = MockMemory::new();
        let tree = traverse(&mem, 0x1000, 150);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_budget_bounds_recorded_nodes() {
        // Two blocks referencing each other endlessly
        let mut mem = MockMemory::new();
        mem.add_heap_block(Address::new(0x1000), words(&[0x2000]));
        mem.add_heap_block(Address::new(0x2000), words(&[0x1000]));

        let tree = traverse(&mem, 0x1000, 1);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_invariant_error_propagates() {
        // Drive insert into a duplicate through the public path is not
        // possible (the seen-set prevents it); assert the error type is
        // surfaced by the tree directly instead.
        let mut tree = ResultTree::new();
        let block = crate::core::types::MemoryBlock::new(
            vec![0; 8],
            crate::core::types::Provenance::Unclassified,
        );
        tree.insert(Address::new(1), block.clone(), None, 0, None, None, vec![])
            .unwrap();
        let err = tree
            .insert(Address::new(1), block, None, 0, None, None, vec![])
            .unwrap_err();
        assert!(!err.is_read_failure());
    }
}
