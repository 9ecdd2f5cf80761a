//! # API Configuration
//!
//! Server, machine, and logging settings for the HTTP shell.
//!
//! ## Load Order (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults          ApiConfig::default()                             │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  2. TOML file         $VENDO_CONFIG, else <config dir>/vendo.toml      │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  3. Environment       VENDO_BIND_ADDR, VENDO_PORT, VENDO_SLOTS,        │
//! │          │            VENDO_LOG                                        │
//! │          ▼                                                              │
//! │  4. validate()        rejects values the machine would refuse          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example File
//! ```toml
//! [server]
//! bind_addr = "127.0.0.1"
//! port = 8080
//!
//! [machine]
//! slots = 10
//! coins = [0.1, 0.2, 0.5, 1.0]
//! initial_coin_quantity = 10
//!
//! [logging]
//! filter = "info,vendo=debug"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vendo_core::{Coin, VendingMachine, VendResult};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "VENDO_CONFIG";

// =============================================================================
// Config Error
// =============================================================================

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

impl ConfigError {
    fn invalid(key: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Server Settings
// =============================================================================

/// Where the HTTP server listens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Bind address (default: 0.0.0.0 for all interfaces).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            bind_addr: default_bind_addr(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    /// Returns `addr:port` for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

// =============================================================================
// Machine Settings
// =============================================================================

/// Shape and initial stock of the machine built at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineSettings {
    /// Number of product slots.
    #[serde(default = "default_slots")]
    pub slots: usize,

    /// Accepted denominations as decimal face values.
    #[serde(default = "default_coins")]
    pub coins: Vec<f64>,

    /// Stock loaded into every coin tube at startup.
    #[serde(default)]
    pub initial_coin_quantity: i64,

    /// Price given to every slot at startup, in pence. 0 leaves slots unpriced.
    #[serde(default)]
    pub initial_product_price: i64,

    /// Units loaded into every slot at startup.
    #[serde(default)]
    pub initial_product_quantity: i64,
}

fn default_slots() -> usize {
    10
}

fn default_coins() -> Vec<f64> {
    Coin::ALL.iter().map(|coin| coin.face_value()).collect()
}

impl Default for MachineSettings {
    fn default() -> Self {
        MachineSettings {
            slots: default_slots(),
            coins: default_coins(),
            initial_coin_quantity: 0,
            initial_product_price: 0,
            initial_product_quantity: 0,
        }
    }
}

impl MachineSettings {
    /// Builds and stocks a machine from these settings.
    pub fn build(&self) -> VendResult<VendingMachine> {
        let machine = VendingMachine::new(self.slots, &self.coins)?;

        if self.initial_coin_quantity > 0 {
            machine.fill_coins(self.initial_coin_quantity)?;
        }
        for index in 0..machine.slot_count() {
            if self.initial_product_price > 0 {
                machine.set_product_price(index, self.initial_product_price)?;
            }
            if self.initial_product_quantity > 0 {
                machine.set_product_quantity(index, self.initial_product_quantity)?;
            }
        }

        Ok(machine)
    }
}

// =============================================================================
// Logging Settings
// =============================================================================

/// Fallback tracing filter, used when `RUST_LOG` is not set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info,vendo=debug".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_filter(),
        }
    }
}

// =============================================================================
// API Config
// =============================================================================

/// Complete configuration for the HTTP shell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub machine: MachineSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl ApiConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// `config_path` wins over `VENDO_CONFIG`, which wins over the platform
    /// config directory. A missing file is not an error.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document. Missing sections and fields take defaults.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Checks every value the server or the machine would refuse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind_addr.trim().is_empty() {
            return Err(ConfigError::invalid("server.bind_addr", "must not be empty"));
        }

        let machine = &self.machine;
        if machine.slots == 0 {
            return Err(ConfigError::invalid("machine.slots", "must be greater than 0"));
        }
        if machine.coins.is_empty() {
            return Err(ConfigError::invalid("machine.coins", "must not be empty"));
        }
        if let Some(bad) = machine
            .coins
            .iter()
            .find(|face_value| Coin::from_face_value(**face_value).is_err())
        {
            return Err(ConfigError::invalid(
                "machine.coins",
                format!("{} is not a supported coin", bad),
            ));
        }
        if machine.initial_coin_quantity < 0 {
            return Err(ConfigError::invalid(
                "machine.initial_coin_quantity",
                "must not be negative",
            ));
        }
        if machine.initial_product_price < 0 {
            return Err(ConfigError::invalid(
                "machine.initial_product_price",
                "must not be negative",
            ));
        }
        if machine.initial_product_quantity < 0 {
            return Err(ConfigError::invalid(
                "machine.initial_product_quantity",
                "must not be negative",
            ));
        }

        Ok(())
    }

    /// Applies `VENDO_*` environment variable overrides.
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any key lookup.
    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("VENDO_BIND_ADDR") {
            debug!(addr = %addr, "Overriding bind address from environment");
            self.server.bind_addr = addr;
        }

        if let Some(port) = lookup("VENDO_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::invalid("VENDO_PORT", format!("'{}' is not a port", port)))?;
            debug!(port = self.server.port, "Overriding port from environment");
        }

        if let Some(slots) = lookup("VENDO_SLOTS") {
            self.machine.slots = slots.parse().map_err(|_| {
                ConfigError::invalid("VENDO_SLOTS", format!("'{}' is not a slot count", slots))
            })?;
            debug!(slots = self.machine.slots, "Overriding slot count from environment");
        }

        if let Some(filter) = lookup("VENDO_LOG") {
            self.logging.filter = filter;
        }

        Ok(())
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "vendo", "vendo")
            .map(|dirs| dirs.config_dir().join("vendo.toml"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
