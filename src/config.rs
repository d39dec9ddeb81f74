//! Runtime configuration - heap sizing and logging
//!
//! Loaded from `vm-native.toml` (current directory or any parent), then
//! overridden by `VM_NATIVE_*` environment variables.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::allocator::{ALLOC_ALIGN, DEFAULT_HEAP_CAPACITY};
use crate::error::ConfigError;
use crate::logging::{warn, LogConfig};

/// File name searched for by `RuntimeConfig::discover`
pub const CONFIG_FILE_NAME: &str = "vm-native.toml";

pub const ENV_HEAP_SIZE: &str = "VM_NATIVE_HEAP_SIZE";
pub const ENV_LOG_LEVEL: &str = "VM_NATIVE_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "VM_NATIVE_LOG_FORMAT";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub heap: HeapConfig,

    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeapConfig {
    /// Size of the region reserved at startup
    #[serde(default = "default_capacity")]
    pub capacity_bytes: usize,
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self { capacity_bytes: default_capacity() }
    }
}

fn default_capacity() -> usize {
    DEFAULT_HEAP_CAPACITY
}

impl RuntimeConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Find and load the config file from the current directory or parents,
    /// then apply environment overrides
    ///
    /// Falls back to defaults when no usable file is found.
    pub fn discover() -> Self {
        let mut current = std::env::current_dir().ok();
        let mut config = None;

        while let Some(dir) = current {
            let path = dir.join(CONFIG_FILE_NAME);
            if path.exists() {
                match Self::load(&path) {
                    Ok(c) => {
                        config = Some(c);
                        break;
                    }
                    Err(e) => warn!(path = %path.display(), error = %e, "ignoring config file"),
                }
            }
            current = dir.parent().map(|p| p.to_path_buf());
        }

        let mut config = config.unwrap_or_default();
        if let Err(e) = config.apply_env() {
            warn!(error = %e, "ignoring environment overrides");
        }
        config
    }

    /// Apply `VM_NATIVE_*` overrides from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    ///
    /// The config is left unchanged if any override is invalid.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut next = self.clone();

        if let Some(raw) = lookup(ENV_HEAP_SIZE) {
            next.heap.capacity_bytes = parse_size(&raw).ok_or_else(|| ConfigError::Invalid {
                field: ENV_HEAP_SIZE,
                reason: format!("'{}' is not a byte size", raw),
            })?;
        }
        if let Some(raw) = lookup(ENV_LOG_LEVEL) {
            next.log.level = raw
                .parse()
                .map_err(|reason| ConfigError::Invalid { field: ENV_LOG_LEVEL, reason })?;
        }
        if let Some(raw) = lookup(ENV_LOG_FORMAT) {
            next.log.format = raw
                .parse()
                .map_err(|reason| ConfigError::Invalid { field: ENV_LOG_FORMAT, reason })?;
        }

        next.validate()?;
        *self = next;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let capacity = self.heap.capacity_bytes;
        if capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "heap.capacity_bytes",
                reason: "must be greater than zero".into(),
            });
        }
        if capacity % ALLOC_ALIGN != 0 {
            return Err(ConfigError::Invalid {
                field: "heap.capacity_bytes",
                reason: format!("{} is not a multiple of {}", capacity, ALLOC_ALIGN),
            });
        }
        Ok(())
    }

    /// Render as TOML (for writing a starter config)
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Parse a byte size with an optional `k`, `m` or `g` suffix (binary units)
pub fn parse_size(raw: &str) -> Option<usize> {
    let raw = raw.trim().to_lowercase();
    let (digits, shift) = match raw.strip_suffix(&['k', 'm', 'g'][..]) {
        Some(digits) => {
            let shift = match raw.chars().last() {
                Some('k') => 10,
                Some('m') => 20,
                _ => 30,
            };
            (digits, shift)
        }
        None => (raw.as_str(), 0),
    };
    let value: usize = digits.trim().parse().ok()?;
    value.checked_mul(1usize.checked_shl(shift)?)
}
