//! Runtime lifecycle - the process-wide heap used by generated code
//!
//! Design: Generated code calls `gcMalloc(size)` with no heap argument, so
//! exactly one `SharedBumpAllocator` is installed per process. Everything
//! else in the crate works on explicit allocator values.

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing_appender::non_blocking::WorkerGuard;

use crate::allocator::SharedBumpAllocator;
use crate::config::{HeapConfig, RuntimeConfig};
use crate::error::HeapError;
use crate::logging::{self, log_runtime_init, log_runtime_shutdown};

static HEAP: OnceCell<SharedBumpAllocator> = OnceCell::new();

/// Serializes the check-then-install in `init`
static INIT_LOCK: Mutex<()> = parking_lot::const_mutex(());

/// Keeps the log writer alive between `bootstrap` and `shutdown`
static LOG_GUARD: Mutex<Option<WorkerGuard>> = parking_lot::const_mutex(None);

/// Reserve and install the process-wide heap
///
/// Must be called once, before any `gcMalloc`.
pub fn init(config: &HeapConfig) -> Result<&'static SharedBumpAllocator, HeapError> {
    let _guard = INIT_LOCK.lock();
    if HEAP.get().is_some() {
        return Err(HeapError::AlreadyInitialized);
    }

    let heap = SharedBumpAllocator::with_capacity(config.capacity_bytes)?;
    let base = heap.region().base();
    let capacity = heap.region().size();

    if HEAP.set(heap).is_err() {
        return Err(HeapError::AlreadyInitialized);
    }
    log_runtime_init(base, capacity);
    HEAP.get().ok_or(HeapError::NotInitialized)
}

/// Start logging, then install the heap
pub fn bootstrap(config: &RuntimeConfig) -> Result<&'static SharedBumpAllocator, HeapError> {
    if let Some(guard) = logging::init(&config.log) {
        *LOG_GUARD.lock() = Some(guard);
    }
    init(&config.heap)
}

/// Log final heap usage and flush logs
///
/// The heap itself stays mapped until the process exits.
pub fn shutdown() {
    if let Some(heap) = heap() {
        let stats = heap.stats();
        log_runtime_shutdown(stats.used, stats.allocations);
    }
    flush_logs();
}

/// Drain buffered log events to the writer
///
/// Dropping the guard blocks until the background writer has written
/// everything queued so far. Events after this go nowhere, so call it only
/// on the way out of the process.
pub fn flush_logs() {
    LOG_GUARD.lock().take();
}

/// The installed heap, if any
#[inline]
pub fn heap() -> Option<&'static SharedBumpAllocator> {
    HEAP.get()
}

#[inline]
pub fn is_initialized() -> bool {
    HEAP.get().is_some()
}
