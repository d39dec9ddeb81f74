//! Runtime error types
//!
//! Design: One enum per subsystem (heap, arithmetic, configuration), each
//! with a human-readable `Display`. The FFI layer maps these onto
//! `VmStatus` codes.

use std::error::Error;
use std::fmt;

/// Errors from heap reservation and allocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeapError {
    /// The host could not provide the backing region.
    ReservationFailed { capacity: usize },
    /// Capacity is zero or does not form a valid layout.
    InvalidCapacity { capacity: usize },
    /// Negative allocation size.
    InvalidSize { size: i32 },
    /// Rounded request does not fit in the remaining region.
    OutOfMemory { requested: usize, remaining: usize },
    /// The process-wide heap was already set up.
    AlreadyInitialized,
    /// The process-wide heap has not been set up yet.
    NotInitialized,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReservationFailed { capacity } => {
                write!(f, "failed to reserve heap region of {} bytes", capacity)
            }
            Self::InvalidCapacity { capacity } => {
                write!(f, "invalid heap capacity: {} bytes", capacity)
            }
            Self::InvalidSize { size } => {
                write!(f, "invalid allocation size: {}", size)
            }
            Self::OutOfMemory { requested, remaining } => {
                write!(
                    f,
                    "heap exhausted: requested {} bytes, {} bytes remaining",
                    requested, remaining
                )
            }
            Self::AlreadyInitialized => write!(f, "heap already initialized"),
            Self::NotInitialized => write!(f, "heap not initialized"),
        }
    }
}

impl Error for HeapError {}

/// Errors from the checked arithmetic variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithError {
    DivisionByZero,
}

impl fmt::Display for ArithError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "division by zero"),
        }
    }
}

impl Error for ArithError {}

/// Errors from loading or validating `RuntimeConfig`
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config: {}", e),
            Self::Parse(e) => write!(f, "failed to parse config: {}", e),
            Self::Invalid { field, reason } => {
                write!(f, "invalid config value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e)
    }
}
