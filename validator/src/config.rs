//! Validator configuration.

use serde::{Deserialize, Serialize};

/// Settings for batch validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Validate documents of a batch in parallel. Output order is input
    /// order either way.
    pub parallel: bool,
}

impl ValidatorConfig {
    /// Sequential validation.
    #[must_use]
    pub fn sequential() -> Self {
        Self { parallel: false }
    }

    /// Parallel validation.
    #[must_use]
    pub fn parallel() -> Self {
        Self { parallel: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_sequential() {
        assert_eq!(ValidatorConfig::default(), ValidatorConfig::sequential());
    }

    #[test]
    fn deserializes_with_missing_fields() -> Result<(), serde_json::Error> {
        let config: ValidatorConfig = serde_json::from_str("{}")?;
        assert!(!config.parallel);
        let config: ValidatorConfig = serde_json::from_str(r#"{"parallel": true}"#)?;
        assert!(config.parallel);
        Ok(())
    }
}
