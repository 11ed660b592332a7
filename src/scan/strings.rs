//! Printable-string extraction

use crate::core::types::MemoryBlock;

const PRINTABLE_LOW: u8 = 32;
const PRINTABLE_HIGH: u8 = 126;

/// Scans the block left to right for runs of printable ASCII bytes
/// `[32, 126]`. A non-printable byte terminates the current run; a run is
/// kept only if it is at least `min_len` bytes. The trailing run is
/// flushed at end of block.
pub fn scan_strings(block: &MemoryBlock, min_len: usize) -> Vec<String> {
    let mut strings = Vec::new();
    let mut current = Vec::new();

    let mut flush = |current: &mut Vec<u8>| {
        if current.len() >= min_len {
            // Printable ASCII is always valid UTF-8
            strings.push(String::from_utf8_lossy(current).into_owned());
        }
        current.clear();
    };

    for &byte in block.bytes() {
        if (PRINTABLE_LOW..=PRINTABLE_HIGH).contains(&byte) {
            current.push(byte);
        } else {
            flush(&mut current);
        }
    }
    flush(&mut current);

    strings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Provenance;

    fn block(bytes: &[u8]) -> MemoryBlock {
        MemoryBlock::new(bytes.to_vec(), Provenance::Unclassified)
    }

    #[test]
    fn test_minimum_length_boundary() {
        // 3 printable bytes: discarded
        assert!(scan_strings(&block(b"abc\0"), 4).is_empty());
        // 4 printable bytes: kept
        assert_eq!(scan_strings(&block(b"test\0"), 4), vec!["test"]);
    }

    #[test]
    fn test_interrupted_run_splits() {
        // One non-printable byte splits the run; each half is measured
        // against the minimum independently.
        let found = scan_strings(&block(b"hello\x01world"), 4);
        assert_eq!(found, vec!["hello", "world"]);

        let found = scan_strings(&block(b"hey\x01there"), 4);
        assert_eq!(found, vec!["there"]);
    }

    #[test]
    fn test_trailing_run_flushed() {
        let found = scan_strings(&block(b"\x00\x00tail"), 4);
        assert_eq!(found, vec!["tail"]);
    }

    #[test]
    fn test_printable_range_edges() {
        // Space (32) and tilde (126) are printable; 31 and 127 are not
        let found = scan_strings(&block(b" ~ ~\x1f\x7fnope"), 4);
        assert_eq!(found, vec![" ~ ~", "nope"]);
    }

    #[test]
    fn test_no_printable_bytes() {
        assert!(scan_strings(&block(&[0u8, 1, 2, 255]), 4).is_empty());
    }
}
