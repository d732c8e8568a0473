//! Scenario configuration management.
//!
//! Loads scenario definitions from TOML files with environment variable
//! override support. The defaults reproduce the reference three-asset
//! scenario: 390 daily steps starting 2024-01-01, a 1% shock with a 240-step
//! onset and 50-step recovery.
//!
//! ```toml
//! log_level = "info"
//!
//! [scenario]
//! steps = 390
//! shock_percent = 1.0
//! onset = 240
//! recovery = 50
//! start_date = "2024-01-01"
//! seed = 42
//!
//! [[assets]]
//! label = "Equity"
//! initial_price = 100.0
//! growth = 0.02
//! volatility = 0.01
//! sensitivity = 0.4
//! ```

use serde::Deserialize;
use std::path::Path;
use synth_core::params::{Horizon, PriceFloor, SimulationParameters, DEFAULT_EPSILON};
use synth_core::types::{Date, ScenarioError};
use thiserror::Error;
use tracing::warn;

/// Scenario-wide settings shared by every asset.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioSettings {
    /// Number of steps (N)
    pub steps: i64,
    /// Shock magnitude in percent
    pub shock_percent: f64,
    /// Onset duration (L)
    pub onset: i64,
    /// Recovery duration (I)
    pub recovery: i64,
    /// First calendar date; `None` omits the date column
    pub start_date: Option<String>,
    /// Seed for reproducible runs
    pub seed: Option<u64>,
    /// Numerical floor
    pub epsilon: f64,
    /// Whether `epsilon` clamps the growth recurrence
    pub price_floor: PriceFloor,
}

impl Default for ScenarioSettings {
    fn default() -> Self {
        Self {
            steps: 390,
            shock_percent: 1.0,
            onset: 240,
            recovery: 50,
            start_date: Some("2024-01-01".to_string()),
            seed: None,
            epsilon: DEFAULT_EPSILON,
            price_floor: PriceFloor::Disabled,
        }
    }
}

/// Per-asset process inputs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AssetConfig {
    /// Column label; defaults to `Asset_<n>`
    #[serde(default)]
    pub label: Option<String>,
    /// Initial price (f0)
    pub initial_price: f64,
    /// Growth rate over the horizon (mu)
    #[serde(default)]
    pub growth: f64,
    /// Per-step volatility (sigma)
    #[serde(default)]
    pub volatility: f64,
    /// Shock sensitivity (alpha)
    #[serde(default)]
    pub sensitivity: f64,
}

impl AssetConfig {
    fn new(initial_price: f64, growth: f64, volatility: f64, sensitivity: f64) -> Self {
        Self {
            label: None,
            initial_price,
            growth,
            volatility,
            sensitivity,
        }
    }
}

fn default_assets() -> Vec<AssetConfig> {
    vec![
        AssetConfig::new(100.0, 0.02, 0.01, 0.4),
        AssetConfig::new(50.0, 0.05, 0.02, 0.8),
        AssetConfig::new(200.0, -0.01, 0.015, 0.2),
    ]
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Complete scenario configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Shared settings
    #[serde(default)]
    pub scenario: ScenarioSettings,

    /// Assets, one output column each
    #[serde(default = "default_assets")]
    pub assets: Vec<AssetConfig>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            scenario: ScenarioSettings::default(),
            assets: default_assets(),
            log_level: default_log_level(),
        }
    }
}

impl ScenarioConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from `path` if it exists, otherwise return the defaults.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(mut self) -> Self {
        if let Ok(raw) = std::env::var("SYNTH_SEED") {
            match raw.parse() {
                Ok(seed) => self.scenario.seed = Some(seed),
                Err(e) => warn!("Ignoring SYNTH_SEED='{}': {}", raw, e),
            }
        }

        if let Ok(raw) = std::env::var("SYNTH_STEPS") {
            match raw.parse() {
                Ok(steps) => self.scenario.steps = steps,
                Err(e) => warn!("Ignoring SYNTH_STEPS='{}': {}", raw, e),
            }
        }

        if let Ok(log_level) = std::env::var("SYNTH_LOG_LEVEL") {
            self.log_level = log_level;
        }

        self
    }

    /// Validate the configuration, collecting every problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        if self.assets.is_empty() {
            errors.push("at least one [[assets]] entry is required".to_string());
        }

        if let Err(e) = self.start_date() {
            errors.push(e.to_string());
        }

        match self.horizon() {
            Ok(_) => {
                for (label, result) in self.labelled_results() {
                    if let Err(e) = result {
                        errors.push(format!("{}: {}", label, e));
                    }
                }
            }
            Err(e) => errors.push(e.to_string()),
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Horizon shared by every asset
    pub fn horizon(&self) -> Result<Horizon, ScenarioError> {
        Horizon::from_signed(
            self.scenario.steps,
            self.scenario.onset,
            self.scenario.recovery,
        )
    }

    /// Parsed start date, if a date column is configured
    pub fn start_date(&self) -> Result<Option<Date>, ScenarioError> {
        self.scenario
            .start_date
            .as_deref()
            .map(Date::parse)
            .transpose()
            .map_err(ScenarioError::from)
    }

    /// Validated parameters for each asset, paired with its label
    pub fn asset_parameters(&self) -> Result<Vec<(String, SimulationParameters)>, ScenarioError> {
        self.labelled_results()
            .into_iter()
            .map(|(label, result)| result.map(|params| (label, params)))
            .collect()
    }

    fn labelled_results(&self) -> Vec<(String, Result<SimulationParameters, ScenarioError>)> {
        let horizon = self.horizon();
        self.assets
            .iter()
            .enumerate()
            .map(|(i, asset)| {
                let label = asset
                    .label
                    .clone()
                    .unwrap_or_else(|| synth_models::dataset::default_label(i));
                let params = horizon.clone().and_then(|horizon| {
                    SimulationParameters::builder()
                        .initial_price(asset.initial_price)
                        .growth_rate(asset.growth)
                        .volatility(asset.volatility)
                        .sensitivity(asset.sensitivity)
                        .shock_percent(self.scenario.shock_percent)
                        .horizon(horizon)
                        .epsilon(self.scenario.epsilon)
                        .price_floor(self.scenario.price_floor)
                        .build()
                });
                (label, params)
            })
            .collect()
    }
}

/// Configuration error type
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
