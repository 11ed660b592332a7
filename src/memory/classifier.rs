//! Block classification: how long is the block at an address, and where
//! did it come from
//!
//! Queries are ordered by decreasing confidence: allocator first, then the
//! symbol table, then nothing. The order is load-bearing; it decides which
//! provenance tag a node receives and therefore its displayed size.

use crate::core::types::{Address, Provenance};
use crate::memory::access::MemoryAccess;
use crate::symbols::SymbolResolver;
use tracing::trace;

/// Outcome of classification. `length` is `None` when no facility could
/// vouch for an extent; the read step then probes incrementally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified {
    pub length: Option<usize>,
    pub provenance: Provenance,
}

/// Decides byte length and provenance for the block at an address.
pub struct BlockClassifier<'a, M: MemoryAccess, S: SymbolResolver> {
    memory: &'a M,
    symbols: &'a S,
    /// Upper bound on the forward probe for a static symbol's span
    symbol_span_probe: usize,
}

impl<'a, M: MemoryAccess, S: SymbolResolver> BlockClassifier<'a, M, S> {
    pub fn new(memory: &'a M, symbols: &'a S, symbol_span_probe: usize) -> Self {
        BlockClassifier {
            memory,
            symbols,
            symbol_span_probe,
        }
    }

    /// Classifies the block at `address`.
    ///
    /// The root is special-cased: its size is supplied by the caller and its
    /// provenance stays `Unclassified`, because a root is typically a stack
    /// or register value rather than an independent heap object.
    pub fn classify(
        &self,
        address: Address,
        is_root: bool,
        known_root_size: Option<usize>,
    ) -> Classified {
        if is_root {
            if let Some(size) = known_root_size {
                return Classified {
                    length: Some(size),
                    provenance: Provenance::Unclassified,
                };
            }
        }

        let heap_size = self.memory.allocated_size_of(address);
        if heap_size > 0 {
            trace!(%address, size = heap_size, "classified as heap block");
            return Classified {
                length: Some(heap_size),
                provenance: Provenance::HeapAllocated,
            };
        }

        if self.symbols.resolve(address).is_some() {
            let length = self
                .symbols
                .next_distinct_symbol(address, self.symbol_span_probe)
                .map(|next| address.distance_to(next))
                .unwrap_or(self.symbol_span_probe);
            trace!(%address, length, "classified as static symbol");
            return Classified {
                length: Some(length),
                provenance: Provenance::StaticSymbol,
            };
        }

        // No facility vouches for this address; the read step determines
        // how much is actually readable.
        Classified {
            length: None,
            provenance: Provenance::Unclassified,
        }
    }
}
