//! Core module containing fundamental types for memgraph
//!
//! This module provides the foundational building blocks used throughout
//! the scanner: address handling, memory blocks with provenance tags,
//! candidate pointers, and error types.

pub mod types;

// Re-export commonly used types for convenience
pub use types::{Address, CandidatePointer, MemoryBlock, Provenance, ScanError, ScanResult};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

#[cfg(not(target_pointer_width = "64"))]
compile_error!("memgraph requires a 64-bit architecture");
