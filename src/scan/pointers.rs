//! Candidate-pointer extraction

use crate::core::types::{Address, CandidatePointer, MemoryBlock, POINTER_SIZE};

/// Reinterprets the block as consecutive pointer-sized aligned words from
/// offset 0. Every complete word is a candidate, tagged with its byte
/// offset; a trailing partial word is ignored.
pub fn scan_pointers(block: &MemoryBlock) -> Vec<CandidatePointer> {
    let bytes = block.bytes();
    let count = bytes.len() / POINTER_SIZE;

    let mut candidates = Vec::with_capacity(count);
    for i in 0..count {
        let start = i * POINTER_SIZE;
        let word = usize::from_le_bytes(
            bytes[start..start + POINTER_SIZE]
                .try_into()
                .expect("slice is exactly one word"),
        );
        candidates.push(CandidatePointer::new(start, Address::new(word)));
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Provenance;
    use crate::memory::mock::words;

    fn block(bytes: Vec<u8>) -> MemoryBlock {
        MemoryBlock::new(bytes, Provenance::Unclassified)
    }

    #[test]
    fn test_extracts_every_word_with_offsets() {
        let b = block(words(&[0x1000, 0x2000, 0x3000]));
        let candidates = scan_pointers(&b);

        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0], CandidatePointer::new(0, Address::new(0x1000)));
        assert_eq!(candidates[1], CandidatePointer::new(8, Address::new(0x2000)));
        assert_eq!(candidates[2], CandidatePointer::new(16, Address::new(0x3000)));
    }

    #[test]
    fn test_trailing_partial_word_ignored() {
        let mut bytes = words(&[0xAAAA]);
        bytes.extend_from_slice(&[1, 2, 3]); // 11 bytes total
        let candidates = scan_pointers(&block(bytes));
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_block_smaller_than_word() {
        let candidates = scan_pointers(&block(vec![1, 2, 3]));
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_no_plausibility_filtering() {
        // Null and garbage words are still candidates; the traversal's
        // read path is responsible for rejecting them.
        let b = block(words(&[0, usize::MAX]));
        let candidates = scan_pointers(&b);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].address, Address::null());
        assert_eq!(candidates[1].address, Address::new(usize::MAX));
    }
}
