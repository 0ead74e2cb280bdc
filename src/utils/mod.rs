//! Utility modules for configuration and logging

pub mod config;
pub mod logging;

pub use config::{ConfigError, ConfigurationManager, HomeConfig, InstrumentConfig, OdometerConfig};
pub use logging::init_logging;
