//! qrexport runtime configuration handling

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default URL encoded when no override is supplied
pub const DEFAULT_URL: &str =
    "https://daily-co.github.io/pipecat-crush-quest/download_contacts.html";

/// Default output path for the PNG artifact
pub const DEFAULT_OUTPUT: &str = "crush_quest_contacts_qr.png";

/// Top-level configuration structure persisted to disk or environment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QrExportConfig {
    /// Export parameter overrides
    pub export: ExportOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl Default for QrExportConfig {
    fn default() -> Self {
        Self {
            export: ExportOptions::default(),
            logging: LoggingOptions::default(),
        }
    }
}

impl QrExportConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No qrexport.toml / qrexport.yaml found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["qrexport.toml", "qrexport.yaml", "qrexport.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qrexport");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply environment variable overrides after file/default loading.
    fn apply_env_overrides(&mut self) {
        self.export.apply_env_overrides();
        self.logging.apply_env_overrides();
    }
}

/// Export parameters merged on top of the built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Text encoded into the QR symbol (a URL in the default setup)
    pub url: String,
    /// Destination path for the PNG artifact
    pub output: PathBuf,
    /// QR error-correction level applied to both export operations
    pub ecc_level: EccLevel,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            ecc_level: EccLevel::High,
        }
    }
}

impl ExportOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| env::var(key).ok());
    }

    /// Overrides layer on top of whatever file/default values are already set.
    /// Takes a lookup closure so the layering is testable without touching
    /// process-global environment.
    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("QREXPORT_URL") {
            self.url = url;
        }
        if let Some(output) = lookup("QREXPORT_OUTPUT") {
            self.output = PathBuf::from(output);
        }
        if let Some(level) = lookup("QREXPORT_ECC_LEVEL") {
            if let Ok(parsed) = level.parse::<EccLevel>() {
                self.ecc_level = parsed;
            }
        }
    }
}

/// QR error-correction levels, lowest to highest redundancy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EccLevel {
    /// ~7% of codewords recoverable
    #[serde(alias = "l")]
    Low,
    /// ~15% of codewords recoverable
    #[serde(alias = "m")]
    Medium,
    /// ~25% of codewords recoverable
    #[serde(alias = "q")]
    Quartile,
    /// ~30% of codewords recoverable
    #[serde(alias = "h")]
    High,
}

impl EccLevel {
    /// Parse a level identifier (case-insensitive, single letter or full name).
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "l" | "low" => Some(Self::Low),
            "m" | "medium" => Some(Self::Medium),
            "q" | "quartile" => Some(Self::Quartile),
            "h" | "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Single-letter label as used in QR literature (L/M/Q/H).
    pub fn letter(&self) -> &'static str {
        match self {
            Self::Low => "L",
            Self::Medium => "M",
            Self::Quartile => "Q",
            Self::High => "H",
        }
    }

    /// Convert to the `qrcode` crate's level type.
    pub fn to_ec_level(self) -> qrcode::EcLevel {
        match self {
            Self::Low => qrcode::EcLevel::L,
            Self::Medium => qrcode::EcLevel::M,
            Self::Quartile => qrcode::EcLevel::Q,
            Self::High => qrcode::EcLevel::H,
        }
    }
}

impl FromStr for EccLevel {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| {
            format!("Unsupported error-correction level '{value}', expected L, M, Q, or H")
        })
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QREXPORT_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stdout logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| env::var(key).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(level) = lookup("QREXPORT_LOG_LEVEL") {
            self.level = level;
        }
        if let Some(file) = lookup("QREXPORT_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Some(color) = lookup("QREXPORT_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {}
            }
        }
        if let Some(rotation) = lookup("QREXPORT_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::from_str(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}
