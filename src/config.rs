//! Pipeline configuration.
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Tunable pipeline parameters.
///
/// The probability rounding behavior is contractual (two decimals at
/// computation, six for unnormalized scores) and deliberately not
/// configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Fraction of each class kept for training.
    pub train_fraction: f64,
    /// ASCII field delimiter for the input file.
    pub delimiter: char,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            train_fraction: 0.7,
            delimiter: ';',
        }
    }
}

/// Load a pipeline configuration from a JSON file. Missing fields fall back
/// to the defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: PipelineConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_seventy_thirty_semicolon() {
        let config = PipelineConfig::default();
        assert_eq!(config.train_fraction, 0.7);
        assert_eq!(config.delimiter, ';');
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: PipelineConfig = serde_json::from_str(r#"{"train_fraction": 0.8}"#).unwrap();
        assert_eq!(config.train_fraction, 0.8);
        assert_eq!(config.delimiter, ';');
    }

    #[test]
    fn round_trips_through_json() {
        let config = PipelineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.train_fraction, config.train_fraction);
        assert_eq!(back.delimiter, config.delimiter);
    }
}
