//! Config - Application Configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{
    DEFAULT_FIXED_MAGNITUDE, DEFAULT_MODBUS_PORT, DEFAULT_MQTT_BROKER, DEFAULT_OPCUA_ENDPOINT,
    DEFAULT_PROPORTIONAL_RATIO, DEFAULT_SCAN_RATE_MS, DEFAULT_TICK_INTERVAL_MS,
};
use crate::error::{Error, Result};

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Update simulator settings
    pub simulation: SimulationConfig,
    /// Network settings (display only)
    pub network: NetworkSettings,
    /// Monitoring settings
    pub monitoring: MonitoringSettings,
}

impl AppConfig {
    /// Parse a TOML document; missing sections fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()
    }
}

/// How the simulator sizes its random step
///
/// The step `delta` is drawn uniformly from `[-k/2, +k/2]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum NoiseMode {
    /// `k` is an absolute span
    Fixed { magnitude: f64 },
    /// `k = ratio * |value|`
    Proportional { ratio: f64 },
}

impl NoiseMode {
    pub fn fixed() -> Self {
        NoiseMode::Fixed {
            magnitude: DEFAULT_FIXED_MAGNITUDE,
        }
    }

    pub fn proportional() -> Self {
        NoiseMode::Proportional {
            ratio: DEFAULT_PROPORTIONAL_RATIO,
        }
    }

    /// Full span `k` for a point currently holding `value`
    pub fn span(&self, value: f64) -> f64 {
        match *self {
            NoiseMode::Fixed { magnitude } => magnitude,
            NoiseMode::Proportional { ratio } => ratio * value.abs(),
        }
    }

    /// Settings-panel text, e.g. "fixed (±1.00)"
    pub fn describe(&self) -> String {
        match *self {
            NoiseMode::Fixed { magnitude } => format!("fixed (±{:.2})", magnitude / 2.0),
            NoiseMode::Proportional { ratio } => {
                format!("proportional (±{:.1}% of value)", ratio * 50.0)
            }
        }
    }

    fn validate(&self) -> Result<()> {
        let (name, v) = match *self {
            NoiseMode::Fixed { magnitude } => ("magnitude", magnitude),
            NoiseMode::Proportional { ratio } => ("ratio", ratio),
        };
        if !v.is_finite() || v < 0.0 {
            return Err(Error::Invalid {
                message: format!("noise {name} must be a finite non-negative number, got {v}"),
            });
        }
        Ok(())
    }
}

impl Default for NoiseMode {
    fn default() -> Self {
        Self::fixed()
    }
}

/// Optional bounds for perturbed values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueClamp {
    pub min: f64,
    pub max: f64,
}

impl ValueClamp {
    pub fn apply(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

/// Update simulator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Tick period in milliseconds
    pub tick_interval_ms: u64,
    /// Default noise policy
    pub noise: NoiseMode,
    /// Not applied unless set
    pub clamp: Option<ValueClamp>,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            noise: NoiseMode::default(),
            clamp: None,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(Error::Invalid {
                message: "simulation.tick_interval_ms must be greater than zero".to_string(),
            });
        }
        self.noise.validate()?;
        if let Some(clamp) = &self.clamp {
            if clamp.min.is_nan() || clamp.max.is_nan() || clamp.min > clamp.max {
                return Err(Error::Invalid {
                    message: format!(
                        "simulation.clamp min ({}) must not exceed max ({})",
                        clamp.min, clamp.max
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Network connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    /// Modbus TCP port
    pub modbus_port: u16,
    /// OPC UA endpoint URL
    pub opcua_endpoint: String,
    /// MQTT broker address
    pub mqtt_broker: String,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            modbus_port: DEFAULT_MODBUS_PORT,
            opcua_endpoint: DEFAULT_OPCUA_ENDPOINT.to_string(),
            mqtt_broker: DEFAULT_MQTT_BROKER.to_string(),
        }
    }
}

/// Log verbosity selectable from the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogFilter {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogFilter {
    pub fn as_level(&self) -> tracing::Level {
        match self {
            LogFilter::Debug => tracing::Level::DEBUG,
            LogFilter::Info => tracing::Level::INFO,
            LogFilter::Warn => tracing::Level::WARN,
            LogFilter::Error => tracing::Level::ERROR,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LogFilter::Debug => "DEBUG",
            LogFilter::Info => "INFO",
            LogFilter::Warn => "WARN",
            LogFilter::Error => "ERROR",
        }
    }
}

/// Monitoring settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringSettings {
    /// Polling rate in milliseconds
    pub scan_rate_ms: u64,
    pub log_level: LogFilter,
    pub auto_reconnect: bool,
}

impl Default for MonitoringSettings {
    fn default() -> Self {
        Self {
            scan_rate_ms: DEFAULT_SCAN_RATE_MS,
            log_level: LogFilter::Info,
            auto_reconnect: true,
        }
    }
}
