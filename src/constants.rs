//! Console Constants
//!
//! Centralized defaults shared by configuration, simulation and rendering.

/// Default simulation period
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 2000;

/// Default absolute noise span for fixed-magnitude mode (delta in [-1.0, 1.0])
pub const DEFAULT_FIXED_MAGNITUDE: f64 = 2.0;

/// Default noise span as a fraction of the current value for proportional mode
pub const DEFAULT_PROPORTIONAL_RATIO: f64 = 0.05;

/// Settings panel defaults
pub const DEFAULT_MODBUS_PORT: u16 = 502;
pub const DEFAULT_OPCUA_ENDPOINT: &str = "opc.tcp://localhost:4840";
pub const DEFAULT_MQTT_BROKER: &str = "localhost:1883";
pub const DEFAULT_SCAN_RATE_MS: u64 = 1000;

/// Bounded cache capacities
pub const CONSOLE_LOG_CAPACITY: usize = 500;

/// Table rendering
pub const NAME_COLUMN_WIDTH: usize = 24;
pub const VALUE_COLUMN_WIDTH: usize = 16;

/// Config file name inside the platform config directory
pub const CONFIG_FILE_NAME: &str = "console.toml";

/// Log file prefix inside the platform data directory
pub const LOG_FILE_PREFIX: &str = "scada-console.log";
