use crate::core::{
    GeoCoordinate, HomePosition, DEFAULT_MAX_SPEED_DIFF_KNOTS, DEFAULT_MIN_SPEED_KNOTS,
    DEFAULT_SAMPLE_INTERVAL_MS,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Shortest accepted time between two GPS samples (milliseconds)
pub const MIN_SAMPLE_INTERVAL_MS: u32 = 100;

/// Longest accepted time between two GPS samples (milliseconds)
pub const MAX_SAMPLE_INTERVAL_MS: u32 = 10_000;

/// Instrument-wide configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InstrumentConfig {
    /// Home position used for the bearing/distance readout
    #[serde(default)]
    pub home: HomeConfig,
    /// Odometer plausibility filter settings
    #[serde(default)]
    pub odometer: OdometerConfig,
    /// Enable debug logging
    #[serde(default)]
    pub debug_logging: bool,
}

/// Home position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HomeConfig {
    pub latitude: f64,
    pub longitude: f64,
    /// Whether the home readout is active
    pub enabled: bool,
}

/// Odometer plausibility filter parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OdometerConfig {
    /// Maximum allowed difference between computed and reported speed (knots)
    pub max_speed_diff_knots: f32,
    /// Reported ground speed must exceed this for a delta to count (knots)
    pub min_speed_knots: f32,
    /// Nominal time between two GPS samples (milliseconds)
    pub sample_interval_ms: u32,
}

impl Default for OdometerConfig {
    fn default() -> Self {
        Self {
            max_speed_diff_knots: DEFAULT_MAX_SPEED_DIFF_KNOTS,
            min_speed_knots: DEFAULT_MIN_SPEED_KNOTS,
            sample_interval_ms: DEFAULT_SAMPLE_INTERVAL_MS,
        }
    }
}

impl OdometerConfig {
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms as u64)
    }
}

impl HomeConfig {
    /// Fixed-point home position, valid only when enabled
    pub fn to_home_position(&self) -> HomePosition {
        HomePosition {
            coordinate: GeoCoordinate::from_degrees(self.latitude, self.longitude),
            valid: self.enabled,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Invalid parameter value
    InvalidParameter { parameter: String, value: String, reason: String },
    /// Configuration file I/O error
    IoError { message: String },
    /// JSON serialization/deserialization error
    SerializationError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidParameter { parameter, value, reason } => {
                write!(f, "Invalid {} = {}: {}", parameter, value, reason)
            }
            ConfigError::IoError { message } => write!(f, "Configuration I/O error: {}", message),
            ConfigError::SerializationError { message } => {
                write!(f, "Configuration format error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Owns the instrument configuration and its backing file
#[derive(Debug, Default)]
pub struct ConfigurationManager {
    config: InstrumentConfig,
    config_file_path: Option<String>,
    is_modified: bool,
}

impl ConfigurationManager {
    /// Create a new configuration manager with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration manager and load from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn config(&self) -> &InstrumentConfig {
        &self.config
    }

    pub fn odometer_config(&self) -> OdometerConfig {
        self.config.odometer
    }

    /// Fixed-point home position for the odometer updater
    pub fn home_position(&self) -> HomePosition {
        self.config.home.to_home_position()
    }

    /// Replace the whole configuration after validation
    pub fn update_config(&mut self, config: InstrumentConfig) -> Result<(), ConfigError> {
        Self::validate(&config)?;
        self.config = config;
        self.is_modified = true;
        Ok(())
    }

    /// Load configuration from JSON file
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            message: format!("Failed to read config file '{}': {}", path_str, e),
        })?;

        let config: InstrumentConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::SerializationError {
                message: format!("Failed to parse config file '{}': {}", path_str, e),
            })?;

        if let Err(e) = Self::validate(&config) {
            warn!(path = %path_str, error = %e, "Rejected configuration file");
            return Err(e);
        }

        info!(
            path = %path_str,
            home_enabled = config.home.enabled,
            sample_interval_ms = config.odometer.sample_interval_ms,
            "Loaded configuration"
        );

        self.config = config;
        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save configuration to JSON file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = serde_json::to_string_pretty(&self.config).map_err(|e| {
            ConfigError::SerializationError {
                message: format!("Failed to serialize config: {}", e),
            }
        })?;

        fs::write(&path, content).map_err(|e| ConfigError::IoError {
            message: format!("Failed to write config file '{}': {}", path_str, e),
        })?;

        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save to the currently loaded file path
    pub fn save(&mut self) -> Result<(), ConfigError> {
        match self.config_file_path.clone() {
            Some(path) => self.save_to_file(path),
            None => Err(ConfigError::IoError {
                message: "No file path set for saving configuration".to_string(),
            }),
        }
    }

    /// Check if configuration has been modified since last save
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    /// Update both plausibility thresholds, returning the previous pair
    pub fn set_speed_thresholds(
        &mut self,
        max_speed_diff_knots: f32,
        min_speed_knots: f32,
    ) -> Result<(f32, f32), ConfigError> {
        validate_threshold("max_speed_diff_knots", max_speed_diff_knots)?;
        validate_threshold("min_speed_knots", min_speed_knots)?;

        let odometer = &mut self.config.odometer;
        let old = (odometer.max_speed_diff_knots, odometer.min_speed_knots);
        odometer.max_speed_diff_knots = max_speed_diff_knots;
        odometer.min_speed_knots = min_speed_knots;
        self.is_modified = true;
        Ok(old)
    }

    /// Update the nominal sampling interval, returning the previous value
    pub fn set_sample_interval(&mut self, interval_ms: u32) -> Result<u32, ConfigError> {
        validate_interval(interval_ms)?;

        let old = self.config.odometer.sample_interval_ms;
        self.config.odometer.sample_interval_ms = interval_ms;
        self.is_modified = true;
        Ok(old)
    }

    /// Set and enable the home position
    pub fn set_home(&mut self, latitude: f64, longitude: f64) -> Result<(), ConfigError> {
        let home = HomeConfig {
            latitude,
            longitude,
            enabled: true,
        };
        validate_home(&home)?;

        self.config.home = home;
        self.is_modified = true;
        Ok(())
    }

    /// Disable the home readout, keeping the stored coordinate
    pub fn clear_home(&mut self) {
        self.config.home.enabled = false;
        self.is_modified = true;
    }

    /// Check every parameter of a configuration
    pub fn validate(config: &InstrumentConfig) -> Result<(), ConfigError> {
        validate_threshold("max_speed_diff_knots", config.odometer.max_speed_diff_knots)?;
        validate_threshold("min_speed_knots", config.odometer.min_speed_knots)?;
        validate_interval(config.odometer.sample_interval_ms)?;
        validate_home(&config.home)
    }
}

fn validate_threshold(parameter: &str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: "Speed threshold must be a positive number of knots".to_string(),
        });
    }
    Ok(())
}

fn validate_interval(interval_ms: u32) -> Result<(), ConfigError> {
    if !(MIN_SAMPLE_INTERVAL_MS..=MAX_SAMPLE_INTERVAL_MS).contains(&interval_ms) {
        return Err(ConfigError::InvalidParameter {
            parameter: "sample_interval_ms".to_string(),
            value: interval_ms.to_string(),
            reason: format!(
                "Sample interval must be between {} and {} ms",
                MIN_SAMPLE_INTERVAL_MS, MAX_SAMPLE_INTERVAL_MS
            ),
        });
    }
    Ok(())
}

fn validate_home(home: &HomeConfig) -> Result<(), ConfigError> {
    if !(-90.0..=90.0).contains(&home.latitude) {
        return Err(ConfigError::InvalidParameter {
            parameter: "home.latitude".to_string(),
            value: home.latitude.to_string(),
            reason: "Latitude must be between -90 and 90 degrees".to_string(),
        });
    }
    if !(-180.0..=180.0).contains(&home.longitude) {
        return Err(ConfigError::InvalidParameter {
            parameter: "home.longitude".to_string(),
            value: home.longitude.to_string(),
            reason: "Longitude must be between -180 and 180 degrees".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gps_odometer_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_default_config() {
        let config = InstrumentConfig::default();
        assert!(!config.home.enabled);
        assert_eq!(config.odometer.sample_interval_ms, 1000);
        assert!((config.odometer.max_speed_diff_knots - 5.3996).abs() < 1e-3);
        assert!((config.odometer.min_speed_knots - 0.53996).abs() < 1e-4);
        assert!(ConfigurationManager::validate(&config).is_ok());
    }

    #[test]
    fn test_home_position_from_config() {
        let mut manager = ConfigurationManager::new();
        assert!(!manager.home_position().valid);

        manager.set_home(47.5, 11.25).unwrap();
        let home = manager.home_position();
        assert!(home.valid);
        assert_eq!(home.coordinate, GeoCoordinate::new(475_000_000, 112_500_000));
        assert!(manager.is_modified());

        manager.clear_home();
        assert!(manager.home_position().active().is_none());
    }

    #[test]
    fn test_invalid_home_rejected() {
        let mut manager = ConfigurationManager::new();
        assert!(manager.set_home(91.0, 0.0).is_err());
        assert!(manager.set_home(0.0, -181.0).is_err());
        assert!(!manager.is_modified());
    }

    #[test]
    fn test_speed_threshold_adjustment() {
        let mut manager = ConfigurationManager::new();

        let (old_diff, old_min) = manager.set_speed_thresholds(8.0, 1.0).unwrap();
        assert_eq!(old_diff, DEFAULT_MAX_SPEED_DIFF_KNOTS);
        assert_eq!(old_min, DEFAULT_MIN_SPEED_KNOTS);
        assert_eq!(manager.odometer_config().max_speed_diff_knots, 8.0);

        assert!(manager.set_speed_thresholds(0.0, 1.0).is_err());
        assert!(manager.set_speed_thresholds(5.0, f32::NAN).is_err());
        assert_eq!(manager.odometer_config().min_speed_knots, 1.0);
    }

    #[test]
    fn test_sample_interval_adjustment() {
        let mut manager = ConfigurationManager::new();

        assert_eq!(manager.set_sample_interval(200).unwrap(), 1000);
        assert_eq!(
            manager.odometer_config().sample_interval(),
            Duration::from_millis(200)
        );

        assert!(manager.set_sample_interval(50).is_err());
        assert!(manager.set_sample_interval(20_000).is_err());
    }

    #[test]
    fn test_update_config_validates() {
        let mut manager = ConfigurationManager::new();

        let config = InstrumentConfig {
            home: HomeConfig {
                latitude: 46.0,
                longitude: 7.5,
                enabled: true,
            },
            odometer: OdometerConfig {
                sample_interval_ms: 250,
                ..OdometerConfig::default()
            },
            debug_logging: true,
        };
        manager.update_config(config.clone()).unwrap();
        assert_eq!(manager.config(), &config);
        assert!(manager.is_modified());
        assert_eq!(manager.home_position().coordinate, GeoCoordinate::new(460_000_000, 75_000_000));

        let mut invalid = config.clone();
        invalid.odometer.sample_interval_ms = 0;
        assert!(matches!(
            manager.update_config(invalid),
            Err(ConfigError::InvalidParameter { .. })
        ));
        assert_eq!(manager.config(), &config);
    }

    #[test]
    fn test_config_file_round_trip() {
        let path = temp_path("round_trip");

        let mut manager = ConfigurationManager::new();
        manager.set_home(-33.9, 151.2).unwrap();
        manager.set_sample_interval(500).unwrap();
        manager.save_to_file(&path).unwrap();
        assert!(!manager.is_modified());

        let loaded = ConfigurationManager::from_file(&path).unwrap();
        assert_eq!(loaded.config(), manager.config());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let path = temp_path("partial");
        fs::write(
            &path,
            r#"{"home": {"latitude": 1.0, "longitude": 2.0, "enabled": true}}"#,
        )
        .unwrap();

        let manager = ConfigurationManager::from_file(&path).unwrap();
        assert!(manager.config().home.enabled);
        assert_eq!(manager.odometer_config(), OdometerConfig::default());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_invalid_config_file_rejected() {
        let path = temp_path("invalid");
        fs::write(
            &path,
            r#"{"odometer": {"max_speed_diff_knots": -1.0, "min_speed_knots": 0.5,
                "sample_interval_ms": 1000}}"#,
        )
        .unwrap();

        let result = ConfigurationManager::from_file(&path);
        assert!(matches!(result, Err(ConfigError::InvalidParameter { .. })));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_missing_and_malformed_files() {
        assert!(matches!(
            ConfigurationManager::from_file("/nonexistent/odometer.json"),
            Err(ConfigError::IoError { .. })
        ));

        let path = temp_path("malformed");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            ConfigurationManager::from_file(&path),
            Err(ConfigError::SerializationError { .. })
        ));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_save_without_path() {
        let mut manager = ConfigurationManager::new();
        assert!(matches!(manager.save(), Err(ConfigError::IoError { .. })));
    }
}
