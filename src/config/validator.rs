//! Configuration validation

use super::loader::{ConfigError, ScanConfig};

/// Rejects degenerate scan tunables.
pub fn validate_config(config: &ScanConfig) -> Result<(), ConfigError> {
    if config.node_budget == 0 {
        return Err(ConfigError::Invalid(
            "node_budget must be at least 1".to_string(),
        ));
    }
    if config.probe_chunk == 0 {
        return Err(ConfigError::Invalid(
            "probe_chunk must be at least 1".to_string(),
        ));
    }
    if config.probe_cap == 0 {
        return Err(ConfigError::Invalid(
            "probe_cap must be at least 1".to_string(),
        ));
    }
    if config.probe_chunk > config.probe_cap {
        return Err(ConfigError::Invalid(format!(
            "probe_chunk ({}) exceeds probe_cap ({})",
            config.probe_chunk, config.probe_cap
        )));
    }
    if config.string_min_len == 0 {
        return Err(ConfigError::Invalid(
            "string_min_len must be at least 1".to_string(),
        ));
    }
    Ok(())
}
