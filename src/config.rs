//! Runtime configuration.

/// Runtime configuration for the pricer.
///
/// Values arrive from the command line (see `main.rs`); there is exactly
/// one tunable, the target size.
#[derive(Debug, Clone)]
pub struct Config {
    /// Target size (shares) priced on every book change.
    pub target_size: u64,
    /// Enable verbose logging.
    pub verbose: bool,
}

impl Config {
    /// Creates a configuration with the given target size.
    pub fn new(target_size: u64) -> Self {
        Self {
            target_size,
            verbose: false,
        }
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.target_size == 0 {
            return Err("target size must be a positive integer".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_target_size_is_valid() {
        assert!(Config::new(200).validate().is_ok());
    }

    #[test]
    fn zero_target_size_is_rejected() {
        assert!(Config::new(0).validate().is_err());
    }
}
