//! Memory blocks, provenance tags, and candidate pointers

use super::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a block's origin, in decreasing order of confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provenance {
    /// The allocator reported a nonzero block size at this address
    HeapAllocated,
    /// The address resolved to a known symbol in a loaded image
    StaticSymbol,
    /// Neither allocator nor symbol table knows this address
    Unclassified,
}

impl Provenance {
    /// Short display tag used in rendered output
    pub fn tag(&self) -> &'static str {
        match self {
            Provenance::HeapAllocated => "<malloc>",
            Provenance::StaticSymbol => "<static>",
            Provenance::Unclassified => "<unknwn>",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// An immutable byte sequence read from one address, tagged with provenance.
///
/// Invariant: a block is never empty. A candidate whose memory could not be
/// read at all does not become a `MemoryBlock`; the scan step fails and the
/// candidate is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryBlock {
    bytes: Vec<u8>,
    provenance: Provenance,
}

impl MemoryBlock {
    /// Wraps read bytes with their provenance tag.
    ///
    /// Panics if `bytes` is empty; the read layer must never construct an
    /// empty block.
    pub fn new(bytes: Vec<u8>, provenance: Provenance) -> Self {
        assert!(!bytes.is_empty(), "MemoryBlock must contain at least one byte");
        MemoryBlock { bytes, provenance }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Lowercase hex dump of the block contents
    pub fn hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Hex dump truncated to `max_len` characters, with a `...`
    /// continuation marker when truncated
    pub fn hex_preview(&self, max_len: usize) -> String {
        let full = self.hex();
        if full.len() <= max_len {
            full
        } else {
            let mut s = full[..max_len].to_string();
            s.push_str("...");
            s
        }
    }
}

/// A (byte-offset, address) pair extracted from a block.
///
/// Purely speculative: no validity guarantee beyond "looked like a
/// pointer-sized word". The traversal tolerates false positives through
/// its read-failure path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidatePointer {
    /// Byte offset of the word within its block
    pub offset: usize,
    /// The word value reinterpreted as an address
    pub address: Address,
}

impl CandidatePointer {
    pub fn new(offset: usize, address: Address) -> Self {
        CandidatePointer { offset, address }
    }
}
