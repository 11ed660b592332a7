//! Core type definitions for memgraph
//!
//! Address wrappers, memory blocks with provenance, candidate pointers
//! discovered inside blocks, and the scanner error types.

mod address;
mod block;
mod error;

// Re-export all public types
pub use address::Address;
pub use block::{CandidatePointer, MemoryBlock, Provenance};
pub use error::{ScanError, ScanResult};

// Common type aliases
pub type Offset = usize;
pub type Size = usize;

/// Width of a candidate pointer in bytes. Blocks are scanned as
/// consecutive words of this size.
pub const POINTER_SIZE: usize = std::mem::size_of::<usize>();
