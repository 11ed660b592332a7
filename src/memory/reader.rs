//! Safe block acquisition on top of the raw read primitive
//!
//! Heap and static blocks have a trustworthy declared extent and are read
//! in one shot. Unclassified addresses have no declared extent at all, so
//! they are probed in small chunks: cheap on unmapped garbage, still
//! useful for small unknown values like stack scalars.

use crate::core::types::{Address, MemoryBlock, ScanError, ScanResult};
use crate::memory::access::MemoryAccess;
use crate::memory::classifier::Classified;
use tracing::debug;

/// Turns a classified address into a `MemoryBlock`, treating any read
/// failure as a value for the traversal to absorb.
pub struct SafeReader<'a, M: MemoryAccess> {
    memory: &'a M,
    /// Chunk size for probing unclassified blocks
    probe_chunk: usize,
    /// Hard cap on bytes accumulated for an unclassified block
    probe_cap: usize,
}

impl<'a, M: MemoryAccess> SafeReader<'a, M> {
    pub fn new(memory: &'a M, probe_chunk: usize, probe_cap: usize) -> Self {
        SafeReader {
            memory,
            probe_chunk,
            probe_cap,
        }
    }

    /// Reads the block described by `classified` at `address`.
    ///
    /// With a known length this is a single bounded read; any failure fails
    /// the node. With no known length the span is probed chunk by chunk and
    /// any non-empty prefix is a success with that shorter length.
    pub fn read_block(&self, address: Address, classified: Classified) -> ScanResult<MemoryBlock> {
        match classified.length {
            Some(len) => {
                let bytes = self.memory.read_vec(address, len)?;
                if bytes.is_empty() {
                    return Err(ScanError::read_failed(address, "zero-length block"));
                }
                Ok(MemoryBlock::new(bytes, classified.provenance))
            }
            None => {
                let bytes = self.probe(address)?;
                Ok(MemoryBlock::new(bytes, classified.provenance))
            }
        }
    }

    /// Accumulates readable chunks from `address` up to the cap. Stops at
    /// the first chunk that fails; zero accumulated bytes is a failure.
    fn probe(&self, address: Address) -> ScanResult<Vec<u8>> {
        let mut accumulated = Vec::with_capacity(self.probe_cap);
        let mut chunk = vec![0u8; self.probe_chunk];

        while accumulated.len() < self.probe_cap {
            let cursor = address.offset(accumulated.len() as isize);
            let want = self.probe_chunk.min(self.probe_cap - accumulated.len());
            chunk.truncate(want);

            if self.memory.read(cursor, &mut chunk[..want]).is_err() {
                break;
            }
            accumulated.extend_from_slice(&chunk[..want]);
        }

        if accumulated.is_empty() {
            debug!(%address, "probe read found no readable bytes");
            Err(ScanError::read_failed(address, "no readable bytes"))
        } else {
            Ok(accumulated)
        }
    }
}
