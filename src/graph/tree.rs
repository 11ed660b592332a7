//! The persisted result of one scan
//!
//! An index-keyed arena: nodes are appended only on successful reads, and
//! children attach to an already-built parent looked up by id, so the
//! builder never needs back-patching or forward references.

use crate::core::types::{Address, MemoryBlock, ScanError, ScanResult};
use std::collections::HashMap;

/// Stable handle to a node within one `ResultTree`
pub type NodeId = usize;

/// A recorded block and its place in the discovery tree.
///
/// Children are stored in insertion order, which is also BFS discovery
/// order among the node's own children.
#[derive(Debug)]
pub struct ResultNode {
    pub address: Address,
    /// 0-based BFS visit order; the root is always 0
    pub discovery_index: usize,
    pub block: MemoryBlock,
    pub parent: Option<NodeId>,
    /// Byte offset within the parent's block where this address was found
    pub parent_offset: usize,
    pub children: Vec<NodeId>,
    /// Symbol name at this address, when resolvable
    pub symbol: Option<String>,
    /// Type name from the optional registry
    pub type_name: Option<String>,
    /// Printable runs extracted from the block
    pub strings: Vec<String>,
}

/// Arena of `ResultNode`s produced by one traversal, immutable thereafter.
///
/// Central invariant: each address maps to at most one node for the
/// lifetime of the scan. Later inbound references to a recorded address
/// are not re-recorded as tree edges.
#[derive(Debug, Default)]
pub struct ResultTree {
    nodes: Vec<ResultNode>,
    by_address: HashMap<Address, NodeId>,
}

impl ResultTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a node and links it into its parent's child list.
    ///
    /// The parent, when given, must already be in the arena; a dangling
    /// parent id is an invariant violation, as is recording the same
    /// address twice.
    #[allow(clippy::too_many_arguments)]
    pub fn insert(
        &mut self,
        address: Address,
        block: MemoryBlock,
        parent: Option<NodeId>,
        parent_offset: usize,
        symbol: Option<String>,
        type_name: Option<String>,
        strings: Vec<String>,
    ) -> ScanResult<NodeId> {
        if self.by_address.contains_key(&address) {
            return Err(ScanError::invariant(format!(
                "address {} recorded twice",
                address
            )));
        }
        if let Some(pid) = parent {
            if pid >= self.nodes.len() {
                return Err(ScanError::invariant(format!(
                    "parent node {} does not exist for child at {}",
                    pid, address
                )));
            }
        }

        let id = self.nodes.len();
        self.nodes.push(ResultNode {
            address,
            discovery_index: id,
            block,
            parent,
            parent_offset,
            children: Vec::new(),
            symbol,
            type_name,
            strings,
        });
        self.by_address.insert(address, id);

        if let Some(pid) = parent {
            self.nodes[pid].children.push(id);
        }
        Ok(id)
    }

    /// The root node, when the scan recorded anything at all
    pub fn root(&self) -> Option<&ResultNode> {
        self.nodes.first()
    }

    pub fn node(&self, id: NodeId) -> &ResultNode {
        &self.nodes[id]
    }

    pub fn get(&self, id: NodeId) -> Option<&ResultNode> {
        self.nodes.get(id)
    }

    /// Looks up the node recorded for an address
    pub fn node_at(&self, address: Address) -> Option<&ResultNode> {
        self.by_address.get(&address).map(|&id| &self.nodes[id])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order depth-first walk over the children lists, the display
    /// order of the rendering contract. Children are visited in their
    /// recorded order among siblings.
    pub fn pre_order(&self) -> PreOrder<'_> {
        let mut stack = Vec::new();
        if !self.nodes.is_empty() {
            stack.push(0);
        }
        PreOrder { tree: self, stack }
    }
}

/// Iterator over node ids in pre-order depth-first display order
pub struct PreOrder<'a> {
    tree: &'a ResultTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        // Reverse push so the first child is visited first
        for &child in self.tree.node(id).children.iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Provenance;

    fn block() -> MemoryBlock {
        MemoryBlock::new(vec![0; 8], Provenance::Unclassified)
    }

    fn insert_plain(
        tree: &mut ResultTree,
        address: usize,
        parent: Option<NodeId>,
    ) -> ScanResult<NodeId> {
        tree.insert(
            Address::new(address),
            block(),
            parent,
            0,
            None,
            None,
            Vec::new(),
        )
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut tree = ResultTree::new();
        let root = insert_plain(&mut tree, 0x1000, None).unwrap();
        let child = insert_plain(&mut tree, 0x2000, Some(root)).unwrap();

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.root().unwrap().address, Address::new(0x1000));
        assert_eq!(tree.node(root).children, vec![child]);
        assert_eq!(tree.node(child).parent, Some(root));
        assert_eq!(
            tree.node_at(Address::new(0x2000)).unwrap().discovery_index,
            1
        );
    }

    #[test]
    fn test_duplicate_address_is_invariant_violation() {
        let mut tree = ResultTree::new();
        insert_plain(&mut tree, 0x1000, None).unwrap();
        let err = insert_plain(&mut tree, 0x1000, None).unwrap_err();
        assert!(matches!(err, ScanError::InvariantViolation(_)));
    }

    #[test]
    fn test_dangling_parent_is_invariant_violation() {
        let mut tree = ResultTree::new();
        let err = insert_plain(&mut tree, 0x1000, Some(7)).unwrap_err();
        assert!(matches!(err, ScanError::InvariantViolation(_)));
    }

    #[test]
    fn test_pre_order_visits_subtrees_before_siblings() {
        // root -> a, b; a -> c. BFS insertion order: root, a, b, c.
        let mut tree = ResultTree::new();
        let root = insert_plain(&mut tree, 0x1, None).unwrap();
        let a = insert_plain(&mut tree, 0x2, Some(root)).unwrap();
        let b = insert_plain(&mut tree, 0x3, Some(root)).unwrap();
        let c = insert_plain(&mut tree, 0x4, Some(a)).unwrap();

        let order: Vec<NodeId> = tree.pre_order().collect();
        assert_eq!(order, vec![root, a, c, b]);
    }

    #[test]
    fn test_empty_tree() {
        let tree = ResultTree::new();
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
        assert_eq!(tree.pre_order().count(), 0);
    }
}
