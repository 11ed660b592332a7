//! memgraph library for scanning the memory graph of in-process values
//!
//! Given the address of a value in the running process, memgraph walks the
//! blocks that value transitively points into, classifies each block's
//! provenance (heap, static symbol, or unclassified), extracts candidate
//! pointers and printable strings from its bytes, and builds a bounded,
//! deduplicated result tree ready for ordered rendering.

pub mod config;
pub mod core;
pub mod graph;
pub mod memory;
pub mod registry;
pub mod render;
pub mod scan;
pub mod symbols;

// Re-export main types from core module
pub use crate::core::types::{
    Address, CandidatePointer, MemoryBlock, Provenance, ScanError, ScanResult,
};

pub use config::ScanConfig;
pub use graph::{NodeId, ResultNode, ResultTree, Traversal};
pub use memory::{BlockClassifier, MemoryAccess, SafeReader};
#[cfg(target_os = "linux")]
pub use memory::ProcessMemory;
pub use registry::TypeRegistry;
pub use render::{RenderSink, Renderer};
pub use symbols::SymbolResolver;
