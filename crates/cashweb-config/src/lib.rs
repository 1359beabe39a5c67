//! Configuration management for cashweb
//!
//! This module handles loading, validation, and management of
//! cashweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Data directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the stored collections
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Transactions collection file name
    #[serde(default = "default_transactions_file")]
    pub transactions_file: String,
    /// Debts collection file name
    #[serde(default = "default_debts_file")]
    pub debts_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            transactions_file: default_transactions_file(),
            debts_file: default_debts_file(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data")
}

fn default_transactions_file() -> String {
    "transactions.json".to_string()
}

fn default_debts_file() -> String {
    "debts.json".to_string()
}

/// Report kind enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// One month, bucketed by day
    Monthly,
    /// Optional month, grouped by category
    Category,
    /// Whole collection, bucketed by month of year
    Yearly,
}

impl Default for ReportKind {
    fn default() -> Self {
        ReportKind::Monthly
    }
}

impl std::str::FromStr for ReportKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" => Ok(ReportKind::Monthly),
            "category" | "categories" => Ok(ReportKind::Category),
            "yearly" | "year" => Ok(ReportKind::Yearly),
            _ => Err(format!("Invalid report kind: {}", s)),
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportKind::Monthly => write!(f, "monthly"),
            ReportKind::Category => write!(f, "category"),
            ReportKind::Yearly => write!(f, "yearly"),
        }
    }
}

/// Report page settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReportsConfig {
    /// Report shown when the page opens
    #[serde(default)]
    pub default_kind: ReportKind,
}

/// Chart and visualization settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// RGB triplet of the income series, e.g. "76, 201, 240"
    #[serde(default = "default_income_color")]
    pub income_color: String,
    /// RGB triplet of the expense series
    #[serde(default = "default_expense_color")]
    pub expense_color: String,
    /// Show chart legends
    #[serde(default = "default_true")]
    pub show_legend: bool,
    /// Lay the legend out right-to-left
    #[serde(default = "default_true")]
    pub rtl_legend: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            income_color: default_income_color(),
            expense_color: default_expense_color(),
            show_legend: true,
            rtl_legend: true,
        }
    }
}

fn default_income_color() -> String {
    "76, 201, 240".to_string()
}

fn default_expense_color() -> String {
    "247, 37, 133".to_string()
}

fn default_true() -> bool {
    true
}

/// Currency and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Suffix appended to every formatted amount
    #[serde(default = "default_suffix")]
    pub suffix: String,
    /// Short suffix used on chart axis ticks
    #[serde(default = "default_short_suffix")]
    pub short_suffix: String,
    /// Number of decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Thousands separator (empty disables grouping)
    #[serde(default)]
    pub thousands_separator: String,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            short_suffix: default_short_suffix(),
            decimal_places: default_decimal_places(),
            thousands_separator: String::new(),
        }
    }
}

fn default_suffix() -> String {
    "جنيه".to_string()
}

fn default_short_suffix() -> String {
    "ج".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Data directory settings
    #[serde(default)]
    pub data: DataConfig,
    /// Report page settings
    #[serde(default)]
    pub reports: ReportsConfig,
    /// Chart settings
    #[serde(default)]
    pub charts: ChartConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::IoError)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        if self.data.transactions_file.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "data.transactions_file".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Full path to the transactions collection
    pub fn transactions_path(&self) -> PathBuf {
        self.data.path.join(&self.data.transactions_file)
    }

    /// Full path to the debts collection
    pub fn debts_path(&self) -> PathBuf {
        self.data.path.join(&self.data.debts_file)
    }
}

// ==================== Tests ====================
