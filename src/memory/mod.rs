//! Memory access and block acquisition
//!
//! This module provides the seam to the raw read primitive and the two
//! layers built on top of it:
//! - `MemoryAccess`: the privileged read/allocator-query interface
//! - `BlockClassifier`: decides a block's length and provenance
//! - `SafeReader`: turns a classified address into a `MemoryBlock`,
//!   tolerating unmapped and protected regions

pub mod access;
pub mod classifier;
pub mod mock;
pub mod reader;

pub use access::MemoryAccess;
#[cfg(target_os = "linux")]
pub use access::ProcessMemory;
pub use classifier::{BlockClassifier, Classified};
pub use mock::MockMemory;
pub use reader::SafeReader;
