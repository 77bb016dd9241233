use chrono_tz::Tz;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::interpolate::InterpolationOptions;
use crate::time::{TimeCodec, DEFAULT_ZONE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unknown time zone: {0}")]
    UnknownZone(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// IANA zone in which wall-clock timestamps are read.
    pub reference_zone: String,
    pub interpolation: InterpolationOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference_zone: DEFAULT_ZONE.name().to_string(),
            interpolation: InterpolationOptions::default(),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.zone()?;
        Ok(config)
    }

    pub fn zone(&self) -> Result<Tz, ConfigError> {
        self.reference_zone
            .parse()
            .map_err(|_| ConfigError::UnknownZone(self.reference_zone.clone()))
    }

    pub fn codec(&self) -> Result<TimeCodec, ConfigError> {
        Ok(TimeCodec::new(self.zone()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolate::{Bounds, Kind};

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_str("{}").unwrap();
        assert_eq!(config.zone().unwrap(), chrono_tz::Asia::Tokyo);
        assert_eq!(config.interpolation.kind, Kind::Linear);
        assert_eq!(config.interpolation.bounds, Bounds::Error);
    }

    #[test]
    fn reads_zone_and_interpolation() {
        let config = Config::from_str(
            "reference_zone: UTC\ninterpolation:\n  kind: nearest\n  bounds: extrapolate\n",
        )
        .unwrap();
        assert_eq!(config.codec().unwrap(), TimeCodec::new(chrono_tz::UTC));
        assert_eq!(config.interpolation.kind, Kind::Nearest);
        assert_eq!(config.interpolation.bounds, Bounds::Extrapolate);
    }

    #[test]
    fn fill_bounds_are_a_single_key_map() {
        let config = Config::from_str("interpolation:\n  bounds: {fill: 0.0}\n").unwrap();
        assert_eq!(config.interpolation.bounds, Bounds::Fill(0.0));
        assert_eq!(config.interpolation.kind, Kind::Linear);
    }

    #[test]
    fn unknown_zone_is_rejected() {
        let err = Config::from_str("reference_zone: Mars/Olympus\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownZone(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("geotrace.yaml");
        std::fs::write(&path, "reference_zone: Europe/Berlin\n").unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.zone().unwrap(), chrono_tz::Europe::Berlin);
    }
}
