//! Content scanners: heuristic lenses over a block's raw bytes
//!
//! Both scanners are explicitly unsound. Pointer extraction keeps every
//! complete word with no plausibility filtering; the traversal's
//! read-failure path absorbs the false positives. String extraction and
//! pointer extraction overlap freely; they are independent views of the
//! same bytes.

pub mod pointers;
pub mod strings;

pub use pointers::scan_pointers;
pub use strings::scan_strings;
