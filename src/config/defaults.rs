//! Default scan tunables

use super::loader::ScanConfig;

/// Maximum nodes recorded per scan
pub(crate) fn default_node_budget() -> usize {
    150
}

/// Chunk size for probing unclassified blocks, one machine word
pub(crate) fn default_probe_chunk() -> usize {
    8
}

/// Hard cap on bytes accumulated for an unclassified block
pub(crate) fn default_probe_cap() -> usize {
    128
}

/// Forward probe bound when sizing a static symbol's span
pub(crate) fn default_symbol_span_probe() -> usize {
    4096
}

/// Minimum kept length for a printable run
pub(crate) fn default_string_min_len() -> usize {
    4
}

/// Hex characters shown per block before truncation
pub(crate) fn default_hex_preview_len() -> usize {
    64
}

/// Returns a configuration with all defaults applied
pub fn default_config() -> ScanConfig {
    ScanConfig::default()
}
