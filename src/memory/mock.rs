//! Deterministic in-memory adapter for tests
//!
//! Backs the `MemoryAccess` seam with a map of synthetic regions so
//! traversal, classifier, and reader behavior can be exercised against
//! controlled address graphs, including deliberately unreadable spans.

use crate::core::types::{Address, ScanError, ScanResult};
use crate::memory::access::MemoryAccess;
use std::collections::BTreeMap;

/// A synthetic address space: disjoint byte regions plus a table of
/// addresses the allocator claims as heap blocks.
#[derive(Debug, Default)]
pub struct MockMemory {
    regions: BTreeMap<usize, Vec<u8>>,
    heap_sizes: BTreeMap<usize, usize>,
}

impl MockMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a readable region at `address`. Overlapping regions are a
    /// test-setup bug and are not detected.
    pub fn add_region(&mut self, address: Address, bytes: Vec<u8>) -> &mut Self {
        self.regions.insert(address.as_usize(), bytes);
        self
    }

    /// Installs a readable region at `address` and marks it as a heap
    /// allocation of that length, as the allocator would report it.
    pub fn add_heap_block(&mut self, address: Address, bytes: Vec<u8>) -> &mut Self {
        self.heap_sizes.insert(address.as_usize(), bytes.len());
        self.add_region(address, bytes)
    }

    /// Finds the region containing `address`, if any, and the offset into it
    fn locate(&self, address: Address) -> Option<(&Vec<u8>, usize)> {
        let addr = address.as_usize();
        let (&start, bytes) = self.regions.range(..=addr).next_back()?;
        let offset = addr - start;
        if offset < bytes.len() {
            Some((bytes, offset))
        } else {
            None
        }
    }
}

impl MemoryAccess for MockMemory {
    fn read(&self, address: Address, buf: &mut [u8]) -> ScanResult<()> {
        if buf.is_empty() {
            return Ok(());
        }
        let (bytes, offset) = self
            .locate(address)
            .ok_or_else(|| ScanError::read_failed(address, "unmapped"))?;

        let available = bytes.len() - offset;
        if available < buf.len() {
            return Err(ScanError::read_failed(
                address,
                format!("short read: {} of {} bytes", available, buf.len()),
            ));
        }
        buf.copy_from_slice(&bytes[offset..offset + buf.len()]);
        Ok(())
    }

    fn allocated_size_of(&self, address: Address) -> usize {
        self.heap_sizes.get(&address.as_usize()).copied().unwrap_or(0)
    }
}

/// Encodes a sequence of words as little-endian bytes, the layout the
/// pointer scanner expects. Test convenience.
pub fn words(values: &[usize]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}
