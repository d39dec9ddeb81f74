//! Logging infrastructure - structured tracing throughout the runtime
//!
//! Design: Uses `tracing` for structured, contextual logging with:
//! - Configurable level and output format
//! - Zero-cost when disabled (allocation events are `trace`)
//! - Non-blocking stderr writer via `tracing-appender`
//!
//! `RUST_LOG` takes precedence over the configured level when set.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

pub use tracing::{debug, error, info, trace, warn, Level};

use crate::error::HeapError;

/// Global logging state
static LOGGER_INITIALIZED: OnceCell<()> = OnceCell::new();

/// Minimum level, as written in config files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, multi-line
    Pretty,
    /// Single-line, for production
    Compact,
    /// Structured JSON
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    /// Emit span enter/close events
    pub span_events: bool,
    /// Extra filter directives (e.g., "vm_native::allocator=trace")
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            span_events: false,
            filter: None,
        }
    }
}

impl LogConfig {
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

/// Install the global subscriber
///
/// Returns the writer guard on first successful initialization; keep it
/// alive until exit so buffered events are flushed. Later calls, or calls
/// made after another subscriber was installed, return `None`.
pub fn init(config: &LogConfig) -> Option<WorkerGuard> {
    if is_initialized() {
        return None;
    }

    let filter = build_filter(config);
    let span_events = if config.span_events {
        FmtSpan::ENTER | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    let installed = match config.format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(writer)
                    .pretty()
                    .with_span_events(span_events)
                    .with_filter(filter),
            )
            .try_init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(writer)
                    .compact()
                    .with_span_events(span_events)
                    .with_filter(filter),
            )
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(writer)
                    .json()
                    .with_span_events(span_events)
                    .with_filter(filter),
            )
            .try_init(),
    };

    if installed.is_err() {
        return None;
    }
    let _ = LOGGER_INITIALIZED.set(());
    Some(guard)
}

/// Check if logging is initialized
pub fn is_initialized() -> bool {
    LOGGER_INITIALIZED.get().is_some()
}

fn build_filter(config: &LogConfig) -> EnvFilter {
    let level = Level::from(config.level).as_str().to_lowercase();
    let base = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vm_native={}", level)));

    match &config.filter {
        Some(directives) => directives
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .fold(base, |filter, directive| match directive.parse() {
                Ok(d) => filter.add_directive(d),
                Err(_) => {
                    warn!(directive, "ignoring invalid filter directive");
                    filter
                }
            }),
        None => base,
    }
}

// ============================================================================
// Runtime-specific events
// ============================================================================

/// Log heap region setup
#[inline]
pub fn log_heap_init(base: usize, capacity: usize) {
    debug!(
        target: "vm_native::allocator",
        base = format_args!("{:#x}", base),
        capacity_bytes = capacity,
        "heap region reserved"
    );
}

/// Log an allocation
#[inline]
pub fn log_allocation(size: i32, offset: usize) {
    trace!(
        target: "vm_native::allocator",
        size_bytes = size,
        offset,
        "allocated"
    );
}

/// Log a rejected allocation
#[inline]
pub fn log_allocation_failure(error: &HeapError) {
    warn!(
        target: "vm_native::allocator",
        error = %error,
        "allocation failed"
    );
}

/// Log a fatal arithmetic fault just before aborting
pub fn log_arith_fault(function: &str, reason: &str) {
    error!(
        target: "vm_native::arith",
        function,
        reason,
        "fatal arithmetic fault"
    );
}

/// Log a rejected FFI call
pub fn log_ffi_error(function: &str, error: &str) {
    error!(
        target: "vm_native::ffi",
        function,
        error,
        "FFI call rejected"
    );
}

/// Log runtime initialization
pub fn log_runtime_init(base: usize, capacity: usize) {
    info!(
        target: "vm_native::runtime",
        base = format_args!("{:#x}", base),
        capacity_bytes = capacity,
        "runtime initialized"
    );
}

/// Log runtime shutdown
pub fn log_runtime_shutdown(used: usize, allocations: u64) {
    info!(
        target: "vm_native::runtime",
        used_bytes = used,
        allocations,
        "runtime shutting down"
    );
}
