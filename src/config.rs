use std::env;
use std::path::PathBuf;

use log::{debug, info};
use thiserror::Error;

use crate::codec::FloatEncoding;
use crate::latest::DEFAULT_TEMP_SENSORS;
use crate::sinks::SinkKind;

/// Upper bound on temperature slots in the latest-snapshot cache
pub const MAX_TEMP_SENSORS: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("no sinks enabled, set WMR_SINKS to one or more of: log, stream, snapshot")]
    NoSinks,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Encoded reading log to replay; stdin when unset
    pub input: Option<PathBuf>,
    /// Destination of the stream sink; stdout when unset
    pub output: Option<PathBuf>,
    pub float_encoding: FloatEncoding,
    pub temp_sensors: usize,
    pub sinks: Vec<SinkKind>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            input: None,
            output: None,
            float_encoding: FloatEncoding::default(),
            temp_sensors: DEFAULT_TEMP_SENSORS,
            sinks: vec![SinkKind::Log, SinkKind::Snapshot],
        }
    }
}

impl LoggerConfig {
    /// Load configuration from `.env` and the process environment
    pub fn new() -> Result<Self, ConfigError> {
        // Load environment variables
        dotenv::dotenv().ok();

        let config = Self::from_lookup(|key| env::var(key).ok())?;
        info!(
            "Loaded configuration: floats={}, temp sensors={}, sinks={}",
            config.float_encoding,
            config.temp_sensors,
            config
                .sinks
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",")
        );
        Ok(config)
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = LoggerConfig::default();

        config.input = lookup("WMR_INPUT")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        config.output = lookup("WMR_OUTPUT")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        if let Some(value) = lookup("WMR_FLOAT_ENCODING") {
            config.float_encoding = value.parse().map_err(|reason| ConfigError::Invalid {
                key: "WMR_FLOAT_ENCODING",
                value: value.clone(),
                reason,
            })?;
        }

        if let Some(value) = lookup("WMR_TEMP_SENSORS") {
            config.temp_sensors = parse_temp_sensors(&value)?;
        }

        if let Some(value) = lookup("WMR_SINKS") {
            let mut sinks = Vec::new();
            for name in value.split(',') {
                let name = name.trim();
                if name.is_empty() {
                    continue;
                }
                debug!("Processing sink: '{}'", name);
                let kind: SinkKind = name.parse().map_err(|reason| ConfigError::Invalid {
                    key: "WMR_SINKS",
                    value: value.clone(),
                    reason,
                })?;
                if !sinks.contains(&kind) {
                    sinks.push(kind);
                }
            }
            if sinks.is_empty() {
                return Err(ConfigError::NoSinks);
            }
            config.sinks = sinks;
        }

        Ok(config)
    }
}

fn parse_temp_sensors(value: &str) -> Result<usize, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key: "WMR_TEMP_SENSORS",
        value: value.to_string(),
        reason,
    };
    let count: usize = value.trim().parse().map_err(|e| invalid(format!("{}", e)))?;
    if count == 0 || count > MAX_TEMP_SENSORS {
        return Err(invalid(format!("must be between 1 and {}", MAX_TEMP_SENSORS)));
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<LoggerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LoggerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, LoggerConfig::default());
        assert_eq!(config.float_encoding, FloatEncoding::None);
        assert_eq!(config.temp_sensors, 10);
        assert_eq!(config.sinks, vec![SinkKind::Log, SinkKind::Snapshot]);
    }

    #[test]
    fn test_all_variables() {
        let config = config_from(&[
            ("WMR_INPUT", "/var/log/wmr.bin"),
            ("WMR_OUTPUT", "/tmp/readings.log"),
            ("WMR_FLOAT_ENCODING", "ieee754"),
            ("WMR_TEMP_SENSORS", "4"),
            ("WMR_SINKS", "stream, snapshot,stream"),
        ])
        .unwrap();

        assert_eq!(config.input, Some(PathBuf::from("/var/log/wmr.bin")));
        assert_eq!(config.output, Some(PathBuf::from("/tmp/readings.log")));
        assert_eq!(config.float_encoding, FloatEncoding::Ieee754);
        assert_eq!(config.temp_sensors, 4);
        assert_eq!(config.sinks, vec![SinkKind::Stream, SinkKind::Snapshot]);
    }

    #[test]
    fn test_invalid_float_encoding() {
        let err = config_from(&[("WMR_FLOAT_ENCODING", "f16")]).unwrap_err();
        assert!(err.to_string().contains("WMR_FLOAT_ENCODING"));
    }

    #[test]
    fn test_temp_sensor_bounds() {
        assert!(config_from(&[("WMR_TEMP_SENSORS", "0")]).is_err());
        assert!(config_from(&[("WMR_TEMP_SENSORS", "65")]).is_err());
        assert!(config_from(&[("WMR_TEMP_SENSORS", "ten")]).is_err());
        assert_eq!(
            config_from(&[("WMR_TEMP_SENSORS", "64")]).unwrap().temp_sensors,
            64
        );
    }

    #[test]
    fn test_empty_sink_list() {
        assert_eq!(config_from(&[("WMR_SINKS", " , ")]), Err(ConfigError::NoSinks));
    }
}
