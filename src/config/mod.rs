//! Configuration module for memgraph
//!
//! Provides the scan tunables with defaults, TOML loading, and validation.

mod defaults;
mod loader;
mod validator;

pub use defaults::default_config;
pub use loader::{load_config, load_config_from, ConfigError, ConfigLoader, ScanConfig};
pub use validator::validate_config;

// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_module_exports() {
        let config = default_config();
        assert!(validate_config(&config).is_ok());

        let result: ConfigResult<String> = Ok("test".to_string());
        assert!(result.is_ok());
    }

    #[test]
    fn test_load_config_export() {
        // Returns defaults when no file exists at the conventional path
        let result = load_config();
        assert!(result.is_ok());
    }
}
